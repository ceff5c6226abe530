// File: crates/bar-core/src/axis.rs
// Summary: Axis generator: tick layout from a scale and emission of tick/label/domain elements.

use crate::scale::{BandScale, ValueScale};
use crate::surface::{fmt_num, AttrValue, NodeId, Surface, Tag, Transform};

pub const INNER_TICK_SIZE: f64 = 6.0;
pub const OUTER_TICK_SIZE: f64 = 6.0;
pub const TICK_PADDING: f64 = 3.0;
/// Approximate number of ticks requested from a value scale.
pub const VALUE_TICK_COUNT: usize = 10;

/// Which side of the plot the axis sits on; labels go outward.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Orient {
    Bottom,
    Left,
}

#[derive(Clone, Debug, PartialEq)]
pub struct AxisTick {
    /// Offset along the axis, in pixels.
    pub position: f64,
    pub label: String,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Axis {
    pub orient: Orient,
    pub ticks: Vec<AxisTick>,
    /// Sorted pixel extent of the scale's range.
    pub extent: (f64, f64),
    pub inner_tick_size: f64,
    pub outer_tick_size: f64,
    pub tick_padding: f64,
}

/// Handles produced by [`Axis::render`].
#[derive(Clone, Debug, Default)]
pub struct AxisNodes {
    pub ticks: Vec<NodeId>,
    pub labels: Vec<NodeId>,
    pub domain: Option<NodeId>,
}

fn sorted(a: f64, b: f64) -> (f64, f64) {
    if a <= b { (a, b) } else { (b, a) }
}

impl Axis {
    fn with_ticks(orient: Orient, ticks: Vec<AxisTick>, extent: (f64, f64)) -> Self {
        Self {
            orient,
            ticks,
            extent,
            inner_tick_size: INNER_TICK_SIZE,
            outer_tick_size: OUTER_TICK_SIZE,
            tick_padding: TICK_PADDING,
        }
    }

    /// Category axis: one tick per band, centered in the band.
    pub fn bottom(scale: &BandScale) -> Self {
        let ticks = scale
            .domain()
            .iter()
            .filter_map(|c| scale.center(c).map(|position| AxisTick { position, label: c.clone() }))
            .collect();
        let (a, b) = scale.range_extent();
        Self::with_ticks(Orient::Bottom, ticks, sorted(a, b))
    }

    /// Value axis: round ticks over the scale's domain.
    pub fn left(scale: &ValueScale) -> Self {
        let ticks = scale
            .tick_labels(VALUE_TICK_COUNT)
            .into_iter()
            .map(|(v, label)| AxisTick { position: scale.to_px(v), label })
            .collect();
        Self::with_ticks(Orient::Left, ticks, sorted(scale.bottom_px, scale.top_px))
    }

    /// SVG path data for the axis line with its outer end ticks.
    pub fn domain_path(&self) -> String {
        let (r0, r1) = (fmt_num(self.extent.0), fmt_num(self.extent.1));
        match self.orient {
            Orient::Bottom => {
                let o = fmt_num(self.outer_tick_size);
                format!("M{r0},{o}V0H{r1}V{o}")
            }
            Orient::Left => {
                let o = fmt_num(-self.outer_tick_size);
                format!("M{o},{r0}H0V{r1}H{o}")
            }
        }
    }

    /// Emit tick groups (line + label) and the domain path into `group`.
    pub fn render<S: Surface + ?Sized>(&self, surface: &mut S, group: NodeId) -> AxisNodes {
        let mut nodes = AxisNodes::default();
        let label_offset = self.inner_tick_size.max(0.0) + self.tick_padding;

        for tick in &self.ticks {
            let g = surface.append(group, Tag::Group);
            surface.set_class(g, "tick");
            let line = surface.append(g, Tag::Line);
            let text = surface.append(g, Tag::Text);
            match self.orient {
                Orient::Bottom => {
                    surface.set_attr(g, "transform", Transform::Translate(tick.position, 0.0).into());
                    surface.set_attr(line, "x2", AttrValue::Number(0.0));
                    surface.set_attr(line, "y2", self.inner_tick_size.into());
                    surface.set_attr(text, "x", AttrValue::Number(0.0));
                    surface.set_attr(text, "y", label_offset.into());
                    surface.set_attr(text, "dy", AttrValue::Em(0.71));
                    surface.set_style(text, "text-anchor", "middle");
                }
                Orient::Left => {
                    surface.set_attr(g, "transform", Transform::Translate(0.0, tick.position).into());
                    surface.set_attr(line, "x2", (-self.inner_tick_size).into());
                    surface.set_attr(line, "y2", AttrValue::Number(0.0));
                    surface.set_attr(text, "x", (-label_offset).into());
                    surface.set_attr(text, "y", AttrValue::Number(0.0));
                    surface.set_attr(text, "dy", AttrValue::Em(0.32));
                    surface.set_style(text, "text-anchor", "end");
                }
            }
            surface.set_text(text, &tick.label);
            nodes.ticks.push(g);
            nodes.labels.push(text);
        }

        let domain = surface.append(group, Tag::Path);
        surface.set_class(domain, "domain");
        surface.set_attr(domain, "d", AttrValue::Text(self.domain_path()));
        nodes.domain = Some(domain);
        nodes
    }
}
