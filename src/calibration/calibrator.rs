//! Derivation of de-polar parameters from the clicked points.
//!
//! The first three points of a capture session are read as:
//! - **center** of the donut
//! - a point on the **inner** edge, to the right of the center
//! - a point on the **outer** edge, to the right of the center
//!
//! Radii are horizontal offsets from the center, not Euclidean distances.
//! Clicks are expected on the horizontal line through the center.

use std::fmt;

use thiserror::Error;

use crate::capture::{ClickPoint, PointSequence};

/// Number of points needed to derive a calibration.
pub const REQUIRED_POINTS: usize = 3;

/// Calibration errors.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CalibrationError {
    #[error("Need 3 points (center, inner edge, outer edge), got {found}")]
    InsufficientPoints { found: usize },
}

/// Center and radii applied to every image of a batch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Calibration {
    pub center_x: i32,
    pub center_y: i32,
    pub inner_radius: i32,
    pub outer_radius: i32,
}

impl Calibration {
    /// Derive a calibration from the first three recorded points.
    ///
    /// Later points are ignored. Negative radii (edge clicked left of the
    /// center) are passed through unchanged.
    pub fn from_points(points: &PointSequence) -> Result<Self, CalibrationError> {
        let (center, inner, outer) = match points.as_slice() {
            [center, inner, outer, ..] => (*center, *inner, *outer),
            _ => {
                return Err(CalibrationError::InsufficientPoints {
                    found: points.len(),
                })
            }
        };

        let calibration = Self {
            center_x: center.x,
            center_y: center.y,
            inner_radius: inner.x - center.x,
            outer_radius: outer.x - center.x,
        };

        tracing::debug!(
            "Euclidean radii for comparison: inner={:.1}, outer={:.1}",
            distance(center, inner),
            distance(center, outer)
        );
        if calibration.inner_radius < 0 || calibration.outer_radius < 0 {
            tracing::warn!("Negative radius in {}", calibration);
        }

        Ok(calibration)
    }
}

impl fmt::Display for Calibration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "center=({}, {}) inner_radius={} outer_radius={}",
            self.center_x, self.center_y, self.inner_radius, self.outer_radius
        )
    }
}

fn distance(a: ClickPoint, b: ClickPoint) -> f64 {
    let dx = f64::from(b.x - a.x);
    let dy = f64::from(b.y - a.y);
    dx.hypot(dy)
}
