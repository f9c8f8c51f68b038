//! Interactive point capture on a display surface.

mod points;
mod surface;

pub use points::{ClickPoint, PointRecorder, PointRole, PointSequence};
pub use surface::{capture_points, CaptureSession, DisplayError, DisplaySurface, Poll};
