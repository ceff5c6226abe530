// File: crates/bar-core/src/geometry.rs
// Summary: Viewport and plot-area pixel math.

use crate::types::Margins;

/// Host-supplied drawing surface size, in pixels.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Viewport {
    pub width: f64,
    pub height: f64,
}

impl Viewport {
    pub const fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }
}

/// Inner plotting rectangle, positioned at (margins.left, margins.top) on the canvas.
/// Width or height go zero or negative when the viewport is smaller than the margins.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PlotArea {
    pub width: f64,
    pub height: f64,
}

impl PlotArea {
    pub fn from_viewport(viewport: Viewport, margins: &Margins) -> Self {
        Self {
            width: viewport.width - margins.hsum() as f64,
            height: viewport.height - margins.vsum() as f64,
        }
    }

    /// True when either dimension leaves no room to draw.
    pub fn is_degenerate(&self) -> bool {
        !(self.width > 0.0 && self.height > 0.0)
    }
}
