//! Click points and the recorder that turns raw button readings into them.

use std::fmt;

/// An (x, y) pixel coordinate on the displayed image.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ClickPoint {
    pub x: i32,
    pub y: i32,
}

impl ClickPoint {
    /// Create a new click point.
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

impl From<(i32, i32)> for ClickPoint {
    fn from((x, y): (i32, i32)) -> Self {
        Self { x, y }
    }
}

impl fmt::Display for ClickPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// What a recorded point stands for, by its position in the sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointRole {
    Center,
    InnerEdge,
    OuterEdge,
    /// Clicks past the third are kept but never used.
    Extra,
}

impl PointRole {
    /// Role of the point at `index` in click order.
    pub fn for_index(index: usize) -> Self {
        match index {
            0 => PointRole::Center,
            1 => PointRole::InnerEdge,
            2 => PointRole::OuterEdge,
            _ => PointRole::Extra,
        }
    }

    /// Human readable label.
    pub fn as_str(&self) -> &'static str {
        match self {
            PointRole::Center => "center",
            PointRole::InnerEdge => "inner edge",
            PointRole::OuterEdge => "outer edge",
            PointRole::Extra => "extra (ignored)",
        }
    }
}

/// Points recorded during one capture session, in click order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PointSequence {
    points: Vec<ClickPoint>,
}

impl PointSequence {
    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<ClickPoint> {
        self.points.get(index).copied()
    }

    pub fn as_slice(&self) -> &[ClickPoint] {
        &self.points
    }
}

impl From<Vec<ClickPoint>> for PointSequence {
    fn from(points: Vec<ClickPoint>) -> Self {
        Self { points }
    }
}

/// Deduplicates left-button readings by value change.
///
/// A reading is recorded only when it differs from the last *recorded*
/// point, so holding the button across several polls yields one point.
/// Absent readings (button up) leave the state untouched.
#[derive(Debug, Clone, Default)]
pub struct PointRecorder {
    last: Option<ClickPoint>,
    points: Vec<ClickPoint>,
}

impl PointRecorder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed one reading. Returns the newly recorded point, if any.
    pub fn observe(&mut self, reading: Option<ClickPoint>) -> Option<ClickPoint> {
        let point = reading?;
        if self.last == Some(point) {
            return None;
        }

        self.last = Some(point);
        self.points.push(point);

        tracing::info!(
            "Recorded point {} at {} ({})",
            self.points.len(),
            point,
            PointRole::for_index(self.points.len() - 1).as_str()
        );

        Some(point)
    }

    /// Number of points recorded so far.
    pub fn count(&self) -> usize {
        self.points.len()
    }

    /// Consume the recorder and freeze the sequence.
    pub fn finish(self) -> PointSequence {
        PointSequence::from(self.points)
    }
}
