//! Transform provider seam for the de-polar warp.

use std::path::PathBuf;

use thiserror::Error;

use crate::calibration::Calibration;

/// Transform errors.
#[derive(Error, Debug)]
pub enum TransformError {
    #[error("Failed to launch {program}: {reason}")]
    Spawn { program: String, reason: String },
    #[error("Transform exited with {status}: {stderr}")]
    Failed { status: String, stderr: String },
}

/// One de-polar invocation: where to read, where to write, and the geometry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DepolarRequest {
    pub input: PathBuf,
    pub output: PathBuf,
    pub outer_radius: i32,
    pub inner_radius: i32,
    pub center_x: i32,
    pub center_y: i32,
}

impl DepolarRequest {
    /// Build a request for one input/output pair.
    pub fn new(input: impl Into<PathBuf>, output: impl Into<PathBuf>, calibration: &Calibration) -> Self {
        Self {
            input: input.into(),
            output: output.into(),
            outer_radius: calibration.outer_radius,
            inner_radius: calibration.inner_radius,
            center_x: calibration.center_x,
            center_y: calibration.center_y,
        }
    }

    /// Geometry in DePolar argument order: `"<outer> <inner> <cx> <cy>"`.
    pub fn distort_arguments(&self) -> String {
        format!(
            "{} {} {} {}",
            self.outer_radius, self.inner_radius, self.center_x, self.center_y
        )
    }
}

/// Something that can unwrap an annulus into a rectangle.
///
/// Implementations decide how: a subprocess, a library call, a remote
/// service. The batch loop only looks at pass/fail.
pub trait TransformProvider {
    /// Short name for log lines.
    fn name(&self) -> &str;

    /// Run the transform for one file.
    fn depolarize(&self, request: &DepolarRequest) -> Result<(), TransformError>;
}

impl<T: TransformProvider + ?Sized> TransformProvider for Box<T> {
    fn name(&self) -> &str {
        (**self).name()
    }

    fn depolarize(&self, request: &DepolarRequest) -> Result<(), TransformError> {
        (**self).depolarize(request)
    }
}

/// Prints what would be run and writes nothing.
#[derive(Debug, Clone, Default)]
pub struct DryRunTransform;

impl TransformProvider for DryRunTransform {
    fn name(&self) -> &str {
        "dry-run"
    }

    fn depolarize(&self, request: &DepolarRequest) -> Result<(), TransformError> {
        println!(
            "   would unwrap {} -> {} with DePolar '{}'",
            request.input.display(),
            request.output.display(),
            request.distort_arguments()
        );
        Ok(())
    }
}
