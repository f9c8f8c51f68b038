//! Donut calibration derived from clicked points.

mod calibrator;

pub use calibrator::{Calibration, CalibrationError, REQUIRED_POINTS};
