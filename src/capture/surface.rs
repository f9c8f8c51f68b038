//! Display surface seam and the polling loop that drives it.

use image::DynamicImage;
use thiserror::Error;

use super::points::{ClickPoint, PointRecorder, PointSequence};

/// Display surface errors.
#[derive(Error, Debug)]
pub enum DisplayError {
    #[error("Failed to render image: {0}")]
    RenderFailed(String),
    #[error("Display window error: {0}")]
    Window(String),
}

/// A window that shows an image and reports the left mouse button.
///
/// Each call to [`DisplaySurface::is_session_done`] or
/// [`DisplaySurface::left_button_down_position`] is one poll; a blocking
/// surface may wait for new events inside either call.
pub trait DisplaySurface {
    /// Show `image` to the user.
    fn render_image(&mut self, image: &DynamicImage) -> Result<(), DisplayError>;

    /// Whether the user closed the session (escape key or window close).
    fn is_session_done(&mut self) -> bool;

    /// Current position of the left button if it is held down.
    fn left_button_down_position(&mut self) -> Option<ClickPoint>;
}

/// Outcome of a single poll.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Poll {
    /// Session still open; carries the point recorded on this poll, if any.
    Pending(Option<ClickPoint>),
    /// Session closed; no further points are accepted.
    Done,
}

/// State of one point-capture session.
#[derive(Debug, Default)]
pub struct CaptureSession {
    recorder: PointRecorder,
    done: bool,
}

impl CaptureSession {
    pub fn new() -> Self {
        Self::default()
    }

    /// Poll `surface` once.
    pub fn poll<S: DisplaySurface + ?Sized>(&mut self, surface: &mut S) -> Poll {
        if self.done {
            return Poll::Done;
        }
        if surface.is_session_done() {
            tracing::debug!("Capture session closed after {} points", self.recorder.count());
            self.done = true;
            return Poll::Done;
        }
        Poll::Pending(self.recorder.observe(surface.left_button_down_position()))
    }

    pub fn is_done(&self) -> bool {
        self.done
    }

    /// Number of points recorded so far.
    pub fn point_count(&self) -> usize {
        self.recorder.count()
    }

    /// Freeze the recorded points.
    pub fn into_points(self) -> PointSequence {
        self.recorder.finish()
    }
}

/// Render `image` once, then poll `surface` until the session closes.
///
/// Blocking driver for surfaces that wait inside their poll calls. The iced
/// window is event driven and calls [`CaptureSession::poll`] per event instead.
pub fn capture_points<S: DisplaySurface + ?Sized>(
    surface: &mut S,
    image: &DynamicImage,
) -> Result<PointSequence, DisplayError> {
    surface.render_image(image)?;

    let mut session = CaptureSession::new();
    while session.poll(surface) != Poll::Done {}

    Ok(session.into_points())
}
