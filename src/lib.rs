// Copyright 2025 ModerRAS
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! # Donut De-polar
//!
//! Unwraps annular ("donut") images into rectangles with one hand-made
//! calibration.
//!
//! The first image is shown in a window. The user left-clicks the donut
//! center, then a point on the inner edge and a point on the outer edge,
//! both to the right of the center, and presses Esc. The derived center and
//! radii are then applied to every image with ImageMagick's `DePolar`
//! distort.
//!
//! ## Example
//!
//! ```rust,no_run
//! use std::path::PathBuf;
//! use donut_depolar::{
//!     gui::run_capture_window, input::load_image, BatchTransformer, Calibration,
//!     MagickTransform,
//! };
//!
//! fn main() -> anyhow::Result<()> {
//!     let files = vec![PathBuf::from("a.png"), PathBuf::from("b.png")];
//!
//!     let first = load_image(&files[0])?;
//!     let points = run_capture_window(&first, "a.png", (1280, 1024))?;
//!     let calibration = Calibration::from_points(&points)?;
//!
//!     let report = BatchTransformer::new(MagickTransform::new()).run(&files, &calibration);
//!     println!("{} ok, {} failed", report.succeeded(), report.failed());
//!     Ok(())
//! }
//! ```

pub mod calibration;
pub mod capture;
pub mod gui;
pub mod input;
pub mod settings;
pub mod transform;

pub use calibration::{Calibration, CalibrationError};
pub use capture::{capture_points, ClickPoint, DisplaySurface, PointSequence};
pub use input::{validate_inputs, UsageError};
pub use settings::AppSettings;
pub use transform::{
    BatchReport, BatchTransformer, DryRunTransform, MagickTransform, TransformProvider,
};
