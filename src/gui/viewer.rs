//! Iced window that shows the first image and records left clicks.

use std::sync::{Arc, Mutex, PoisonError};

use iced::keyboard::{self, key::Named, Key};
use iced::widget::image::{Handle, Image};
use iced::widget::{column, mouse_area, scrollable, text};
use iced::{ContentFit, Element, Length, Point, Size, Subscription, Task, Theme};
use image::DynamicImage;

use crate::capture::{
    CaptureSession, ClickPoint, DisplayError, DisplaySurface, Poll, PointRole, PointSequence,
};

/// Messages for the capture window.
#[derive(Debug, Clone)]
pub enum Message {
    CursorMoved(Point),
    CursorLeft,
    LeftPressed,
    LeftReleased,
    CloseRequested,
}

/// Window state, read by the capture session as a polled surface.
#[derive(Debug, Default)]
struct WindowState {
    handle: Option<Handle>,
    width: u32,
    height: u32,
    cursor: Option<Point>,
    /// Where the held left button went down, in image pixels.
    pressed_at: Option<ClickPoint>,
    close_requested: bool,
}

impl WindowState {
    /// Cursor position as an image pixel, if it lies on the image.
    fn cursor_pixel(&self) -> Option<ClickPoint> {
        let cursor = self.cursor?;
        let (x, y) = (cursor.x.floor() as i64, cursor.y.floor() as i64);
        if x < 0 || y < 0 || x >= i64::from(self.width) || y >= i64::from(self.height) {
            return None;
        }
        Some(ClickPoint::new(x as i32, y as i32))
    }
}

impl DisplaySurface for WindowState {
    fn render_image(&mut self, image: &DynamicImage) -> Result<(), DisplayError> {
        let rgba = image.to_rgba8();
        let (width, height) = rgba.dimensions();
        if width == 0 || height == 0 {
            return Err(DisplayError::RenderFailed(format!(
                "image has no pixels ({}x{})",
                width, height
            )));
        }

        self.handle = Some(Handle::from_rgba(width, height, rgba.into_raw()));
        self.width = width;
        self.height = height;
        Ok(())
    }

    fn is_session_done(&mut self) -> bool {
        self.close_requested
    }

    fn left_button_down_position(&mut self) -> Option<ClickPoint> {
        self.pressed_at
    }
}

/// Capture window application.
pub struct CaptureViewer {
    surface: WindowState,
    session: Arc<Mutex<CaptureSession>>,
    image_name: String,
}

impl CaptureViewer {
    fn session(&self) -> std::sync::MutexGuard<'_, CaptureSession> {
        self.session.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Window title with the point expected next.
    pub fn title(&self) -> String {
        let count = self.session().point_count();
        match PointRole::for_index(count) {
            PointRole::Extra => format!("{} - {} points, press Esc to finish", self.image_name, count),
            role => format!("{} - click the {} (Esc to finish)", self.image_name, role.as_str()),
        }
    }

    pub fn theme(&self) -> Theme {
        Theme::Dark
    }

    /// Update window state, then poll the capture session once.
    pub fn update(&mut self, message: Message) -> Task<Message> {
        match message {
            Message::CursorMoved(position) => {
                self.surface.cursor = Some(position);
            }
            Message::CursorLeft => {
                // No release event arrives once the cursor is off the image
                self.surface.cursor = None;
                self.surface.pressed_at = None;
            }
            Message::LeftPressed => {
                self.surface.pressed_at = self.surface.cursor_pixel();
            }
            Message::LeftReleased => {
                self.surface.pressed_at = None;
            }
            Message::CloseRequested => {
                self.surface.close_requested = true;
            }
        }

        let mut session = self.session.lock().unwrap_or_else(PoisonError::into_inner);
        match session.poll(&mut self.surface) {
            Poll::Done => iced::exit(),
            Poll::Pending(_) => Task::none(),
        }
    }

    pub fn view(&self) -> Element<'_, Message> {
        let hint = text(
            "Left click the donut center, then the inner edge and the outer edge \
             to the right of it. Press Esc to finish.",
        );

        let Some(handle) = self.surface.handle.clone() else {
            return column![hint, text("No image loaded")].padding(10).into();
        };

        let image = Image::<Handle>::new(handle)
            .width(Length::Fixed(self.surface.width as f32))
            .height(Length::Fixed(self.surface.height as f32))
            .content_fit(ContentFit::Fill);

        let clickable = mouse_area(image)
            .on_move(Message::CursorMoved)
            .on_exit(Message::CursorLeft)
            .on_press(Message::LeftPressed)
            .on_release(Message::LeftReleased);

        let canvas = scrollable(clickable)
            .direction(scrollable::Direction::Both {
                vertical: scrollable::Scrollbar::default(),
                horizontal: scrollable::Scrollbar::default(),
            })
            .width(Length::Fill)
            .height(Length::Fill);

        column![hint, canvas].spacing(10).padding(10).into()
    }

    pub fn subscription(&self) -> Subscription<Message> {
        keyboard::on_key_press(|key, _modifiers| match key {
            Key::Named(Named::Escape) => Some(Message::CloseRequested),
            _ => None,
        })
    }
}

/// Show `image` in a window and collect left clicks until Esc or close.
///
/// Blocks until the window is gone. Closing the window ends the session the
/// same way as Esc.
pub fn run_capture_window(
    image: &DynamicImage,
    image_name: &str,
    window_size: (u32, u32),
) -> Result<PointSequence, DisplayError> {
    let mut surface = WindowState::default();
    surface.render_image(image)?;

    let session = Arc::new(Mutex::new(CaptureSession::new()));
    let shared = Arc::clone(&session);
    let image_name = image_name.to_string();

    tracing::info!(
        "Opening capture window for {} ({}x{})",
        image_name,
        surface.width,
        surface.height
    );

    iced::application(CaptureViewer::title, CaptureViewer::update, CaptureViewer::view)
        .subscription(CaptureViewer::subscription)
        .theme(CaptureViewer::theme)
        .window_size(Size::new(window_size.0 as f32, window_size.1 as f32))
        .run_with(move || {
            let viewer = CaptureViewer {
                surface,
                session: shared,
                image_name,
            };
            (viewer, Task::none())
        })
        .map_err(|e| DisplayError::Window(e.to_string()))?;

    let mut session = session.lock().unwrap_or_else(PoisonError::into_inner);
    Ok(std::mem::take(&mut *session).into_points())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn viewer(width: u32, height: u32) -> CaptureViewer {
        let mut surface = WindowState::default();
        surface
            .render_image(&DynamicImage::new_rgb8(width, height))
            .unwrap();
        CaptureViewer {
            surface,
            session: Arc::new(Mutex::new(CaptureSession::new())),
            image_name: "donut.png".to_string(),
        }
    }

    fn click(viewer: &mut CaptureViewer, x: f32, y: f32) {
        let _ = viewer.update(Message::CursorMoved(Point::new(x, y)));
        let _ = viewer.update(Message::LeftPressed);
        let _ = viewer.update(Message::LeftReleased);
    }

    #[test]
    fn test_clicks_are_recorded_in_image_pixels() {
        let mut viewer = viewer(300, 200);
        click(&mut viewer, 100.4, 100.9);
        click(&mut viewer, 150.0, 100.0);
        click(&mut viewer, 200.0, 100.0);

        let points = std::mem::take(&mut *viewer.session()).into_points();
        assert_eq!(
            points.as_slice(),
            &[
                ClickPoint::new(100, 100),
                ClickPoint::new(150, 100),
                ClickPoint::new(200, 100)
            ]
        );
    }

    #[test]
    fn test_held_button_records_once() {
        let mut viewer = viewer(300, 200);
        let _ = viewer.update(Message::CursorMoved(Point::new(10.0, 10.0)));
        let _ = viewer.update(Message::LeftPressed);
        let _ = viewer.update(Message::CursorMoved(Point::new(40.0, 10.0)));
        let _ = viewer.update(Message::CursorMoved(Point::new(80.0, 10.0)));
        assert_eq!(viewer.session().point_count(), 1);
    }

    #[test]
    fn test_click_outside_image_is_ignored() {
        let mut viewer = viewer(50, 50);
        click(&mut viewer, 60.0, 10.0);
        let _ = viewer.update(Message::CursorLeft);
        let _ = viewer.update(Message::LeftPressed);
        assert_eq!(viewer.session().point_count(), 0);
    }

    #[test]
    fn test_leaving_image_releases_button() {
        let mut viewer = viewer(50, 50);
        let _ = viewer.update(Message::CursorMoved(Point::new(20.0, 20.0)));
        let _ = viewer.update(Message::LeftPressed);
        assert_eq!(
            viewer.surface.left_button_down_position(),
            Some(ClickPoint::new(20, 20))
        );

        let _ = viewer.update(Message::CursorLeft);
        assert_eq!(viewer.surface.left_button_down_position(), None);

        click(&mut viewer, 30.0, 20.0);
        assert_eq!(viewer.session().point_count(), 2);
    }

    #[test]
    fn test_escape_ends_session() {
        let mut viewer = viewer(50, 50);
        click(&mut viewer, 5.0, 5.0);
        let _ = viewer.update(Message::CloseRequested);
        assert!(viewer.session().is_done());

        click(&mut viewer, 6.0, 6.0);
        assert_eq!(viewer.session().point_count(), 1);
    }

    #[test]
    fn test_title_tracks_next_point() {
        let mut viewer = viewer(300, 200);
        assert!(viewer.title().contains("center"));
        click(&mut viewer, 1.0, 1.0);
        assert!(viewer.title().contains("inner edge"));
        click(&mut viewer, 2.0, 1.0);
        click(&mut viewer, 3.0, 1.0);
        assert!(viewer.title().contains("3 points"));
    }

    #[test]
    fn test_empty_image_fails_to_render() {
        let mut surface = WindowState::default();
        let err = surface
            .render_image(&DynamicImage::new_rgb8(0, 0))
            .unwrap_err();
        assert!(matches!(err, DisplayError::RenderFailed(_)));
    }
}
