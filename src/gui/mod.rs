//! GUI module for point capture.
//!
//! Provides the interactive display surface using Iced.

pub mod viewer;

pub use viewer::{run_capture_window, CaptureViewer, Message};
