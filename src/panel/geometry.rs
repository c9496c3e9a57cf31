//! Host geometry and the panel frame derived from it
//!
//! Offsets are measured from the fully-expanded top edge of the panel:
//! offset `0` is `Full`, offset `full_height` is `Hidden`. Larger offsets are
//! always less visible.

use super::position::{Distance, Fraction};

/// A point in host coordinates (origin top-left, y grows downward)
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Axis-aligned rectangle in host coordinates
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Bottom edge is inclusive so a finger resting on the host edge still counts
    pub fn contains(&self, point: Point) -> bool {
        point.x >= self.x
            && point.x <= self.x + self.width
            && point.y >= self.y
            && point.y <= self.y + self.height
    }

    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }
}

/// Safe-area insets along the drag axis
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Insets {
    pub top: Distance,
    pub bottom: Distance,
}

impl Insets {
    pub fn new(top: Distance, bottom: Distance) -> Self {
        Self { top, bottom }
    }
}

/// Host bounds as reported by the integration shim on each layout pass
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct HostGeometry {
    pub width: Distance,
    pub height: Distance,
    pub safe_area: Insets,
}

impl HostGeometry {
    pub fn new(width: Distance, height: Distance) -> Self {
        Self {
            width,
            height,
            safe_area: Insets::default(),
        }
    }

    pub fn with_safe_area(mut self, safe_area: Insets) -> Self {
        self.safe_area = safe_area;
        self
    }

    /// Zero, negative or non-finite bounds cannot produce a ratio
    pub fn is_degenerate(&self) -> bool {
        !self.height.is_finite() || !self.width.is_finite() || self.height <= 0.0
    }

    /// Tallest the panel may grow without covering the top safe area
    pub fn max_panel_height(&self) -> Distance {
        (self.height - self.safe_area.top).max(0.0)
    }
}

/// Offset range of a laid-out panel
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PanelSpan {
    /// Visible height at offset zero
    pub full_height: Distance,
}

impl PanelSpan {
    /// Returns `None` when the span would divide by zero
    pub fn new(full_height: Distance) -> Option<Self> {
        if full_height.is_finite() && full_height > 0.0 {
            Some(Self { full_height })
        } else {
            None
        }
    }

    pub fn min_offset(&self) -> Distance {
        0.0
    }

    pub fn max_offset(&self) -> Distance {
        self.full_height
    }

    pub fn clamp_offset(&self, offset: Distance) -> Distance {
        offset.clamp(self.min_offset(), self.max_offset())
    }

    /// Offset at which `visible_height` of the panel shows
    pub fn offset_for_visible(&self, visible_height: Distance) -> Distance {
        self.clamp_offset(self.full_height - visible_height)
    }

    pub fn visible_height(&self, offset: Distance) -> Distance {
        self.full_height - self.clamp_offset(offset)
    }

    /// 0 = hidden, 1 = fully expanded
    pub fn ratio(&self, offset: Distance) -> Fraction {
        (self.visible_height(offset) / self.full_height).clamp(0.0, 1.0)
    }

    pub fn offset_for_ratio(&self, ratio: Fraction) -> Distance {
        self.clamp_offset(self.full_height * (1.0 - ratio.clamp(0.0, 1.0)))
    }

    /// Frame of the bottom-anchored panel inside the host
    pub fn frame(&self, host: &HostGeometry, offset: Distance) -> Rect {
        let visible = self.visible_height(offset);
        Rect::new(0.0, host.height - visible, host.width, visible)
    }
}
