// File: crates/bar-core/src/types.rs
// Summary: Shared types and constants (margins, band padding, headroom, bar colors).

/// Fraction of each band step left empty between (and outside) bars.
pub const BAND_PADDING: f64 = 0.1;
/// Headroom added above the tallest amount, in data units.
pub const VALUE_HEADROOM: f64 = 10.0;
/// Bar fill color.
pub const BAR_FILL: &str = "yellow";
/// Bar outline color.
pub const BAR_STROKE: &str = "black";

/// Fixed margins between the canvas edge and the plot area, in pixels.
/// Contract: all fields are non-negative.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Margins {
    pub top: u32,
    pub right: u32,
    pub bottom: u32,
    pub left: u32,
}

impl Margins {
    /// Create new margins (non-negative by type).
    pub const fn new(top: u32, right: u32, bottom: u32, left: u32) -> Self {
        Self { top, right, bottom, left }
    }
    /// Total horizontal margin (left + right).
    pub const fn hsum(&self) -> u32 { self.left + self.right }
    /// Total vertical margin (top + bottom).
    pub const fn vsum(&self) -> u32 { self.top + self.bottom }
}

impl Default for Margins {
    /// The bottom margin is large so rotated category labels fit under the plot.
    fn default() -> Self {
        Self::new(20, 20, 200, 70)
    }
}

/// How the bar set is redrawn on each update.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum RedrawPolicy {
    /// Keep existing bar elements and reconcile them against the new records.
    #[default]
    Incremental,
    /// Remove every bar and create all of them again.
    ClearAll,
}
