//! Canvas state: bounding box, dirty rect and pen position

use crate::font::{Advance, F26Dot6};
use crate::metrics::StringMetrics;

/// Rectangle in whole pixels
///
/// Used both as the placement anchor and as the clip region of a render call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TextBox {
    pub start_x: i32,
    pub start_y: i32,
    pub width: i32,
    pub height: i32,
}

impl TextBox {
    pub fn new(start_x: i32, start_y: i32, width: i32, height: i32) -> Self {
        Self { start_x, start_y, width, height }
    }

    /// Box at `(start_x, start_y)` sized to a measured string
    pub fn from_metrics(start_x: i32, start_y: i32, metrics: &StringMetrics) -> Self {
        Self::new(start_x, start_y, metrics.width, metrics.height)
    }

    /// One past the rightmost column
    #[inline]
    pub fn right(&self) -> i32 {
        self.start_x + self.width
    }

    /// One past the bottom row
    #[inline]
    pub fn bottom(&self) -> i32 {
        self.start_y + self.height
    }
}

/// Baseline cursor in 26.6 units, relative to the bounding box origin
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PenPos {
    pub x: F26Dot6,
    pub y: F26Dot6,
}

impl PenPos {
    pub fn new(x: F26Dot6, y: F26Dot6) -> Self {
        Self { x, y }
    }

    /// Pen at the left edge, `pen_pos_y` pixels below the box top
    pub fn at_baseline(pen_pos_y: i32) -> Self {
        Self::new(F26Dot6::ZERO, F26Dot6::from_i32(pen_pos_y))
    }

    /// Move by a glyph advance
    #[inline]
    pub fn advance(&mut self, advance: Advance) {
        self.x += advance.x;
        self.y += advance.y;
    }
}

/// Mutable state threaded through a render call
///
/// The dirty rect is owned by the caller; rendering never updates it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CanvasProps {
    pub bound_box: TextBox,
    pub dirty_rect: TextBox,
    pub pen: PenPos,
}

impl CanvasProps {
    pub fn new(bound_box: TextBox, pen: PenPos) -> Self {
        Self {
            bound_box,
            dirty_rect: TextBox::default(),
            pen,
        }
    }
}
