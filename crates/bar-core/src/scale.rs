// File: crates/bar-core/src/scale.rs
// Summary: Category (X) band scale and value (Y) linear scale.

use std::collections::HashMap;

use crate::ticks;

/// Round half toward positive infinity, matching pixel snapping on the host.
#[inline]
fn round_half_up(v: f64) -> f64 {
    (v + 0.5).floor()
}

/// Ordinal scale mapping distinct categories to contiguous, pixel-rounded bands.
///
/// Bands are laid out across `[0, width]` with the same padding fraction between
/// bands and at both ends. Categories keep first-seen order; duplicates share a band.
#[derive(Clone, Debug, PartialEq)]
pub struct BandScale {
    domain: Vec<String>,
    index: HashMap<String, usize>,
    range_start: f64,
    range_end: f64,
    starts: Vec<f64>,
    step: f64,
    band_width: f64,
}

impl BandScale {
    pub fn new<I, S>(categories: I, width: f64, padding: f64) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut domain: Vec<String> = Vec::new();
        let mut index: HashMap<String, usize> = HashMap::new();
        for c in categories {
            let c = c.as_ref();
            if !index.contains_key(c) {
                index.insert(c.to_string(), domain.len());
                domain.push(c.to_string());
            }
        }

        let n = domain.len();
        if n == 0 || !(width > 0.0) || !width.is_finite() {
            return Self {
                starts: vec![0.0; n],
                domain,
                index,
                range_start: 0.0,
                range_end: width,
                step: 0.0,
                band_width: 0.0,
            };
        }

        let n_f = n as f64;
        let step = (width / (n_f - padding + 2.0 * padding)).floor();
        let error = width - (n_f - padding) * step;
        let first = round_half_up(error / 2.0);
        let starts = (0..n).map(|i| first + step * i as f64).collect();
        let band_width = round_half_up(step * (1.0 - padding));
        Self { domain, index, range_start: 0.0, range_end: width, starts, step, band_width }
    }

    /// Band start for `category`, or `None` when it is not in the domain.
    pub fn map(&self, category: &str) -> Option<f64> {
        self.index_of(category).map(|i| self.starts[i])
    }

    /// Band center for `category`, where ticks are placed.
    pub fn center(&self, category: &str) -> Option<f64> {
        self.map(category).map(|x| x + self.band_width * 0.5)
    }

    pub fn index_of(&self, category: &str) -> Option<usize> {
        self.index.get(category).copied()
    }

    pub fn band_width(&self) -> f64 { self.band_width }
    pub fn step(&self) -> f64 { self.step }
    pub fn domain(&self) -> &[String] { &self.domain }

    /// Pixel extent the axis line spans.
    pub fn range_extent(&self) -> (f64, f64) {
        (self.range_start, self.range_end)
    }
}

/// Vertical linear scale mapping `[0, vmax]` onto `[bottom_px, top_px]`.
/// Larger values map to smaller y, so bars grow upward from the bottom edge.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ValueScale {
    pub vmin: f64,
    pub vmax: f64,
    pub bottom_px: f64,
    pub top_px: f64,
}

impl ValueScale {
    pub fn new_linear(vmin: f64, vmax: f64, bottom_px: f64, top_px: f64) -> Self {
        Self { vmin, vmax, bottom_px, top_px }
    }

    /// Domain `[0, max(finite amounts) + headroom]` over the plot height.
    /// With no finite amount the domain is `[0, headroom]`.
    pub fn for_amounts<I>(amounts: I, headroom: f64, plot_height: f64) -> Self
    where
        I: IntoIterator<Item = f64>,
    {
        let max = amounts
            .into_iter()
            .filter(|a| a.is_finite())
            .fold(None, |acc: Option<f64>, a| Some(acc.map_or(a, |m| m.max(a))));
        let vmax = max.unwrap_or(0.0) + headroom;
        Self::new_linear(0.0, vmax, plot_height, 0.0)
    }

    #[inline]
    pub fn to_px(&self, v: f64) -> f64 {
        let span = self.vmax - self.vmin;
        if span == 0.0 || !span.is_finite() {
            return self.bottom_px;
        }
        self.bottom_px + (v - self.vmin) / span * (self.top_px - self.bottom_px)
    }

    #[inline]
    pub fn from_px(&self, py: f64) -> f64 {
        let range = self.top_px - self.bottom_px;
        if range == 0.0 {
            return self.vmin;
        }
        self.vmin + (py - self.bottom_px) / range * (self.vmax - self.vmin)
    }

    /// About `count` round tick values inside the domain.
    pub fn ticks(&self, count: usize) -> Vec<f64> {
        ticks::nice_ticks(self.vmin, self.vmax, count)
    }

    /// Labels for `ticks(count)`, formatted with a precision matching the tick step.
    pub fn tick_labels(&self, count: usize) -> Vec<(f64, String)> {
        let step = ticks::tick_step(self.vmin, self.vmax, count);
        self.ticks(count)
            .into_iter()
            .map(|t| (t, ticks::format_tick(t, step)))
            .collect()
    }
}
