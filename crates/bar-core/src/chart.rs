// File: crates/bar-core/src/chart.rs
// Summary: Bar chart renderer: owns the canvas handles and redraws axes and bars on every host update.

use crate::axis::Axis;
use crate::convert::{convert, ConvertError, Record};
use crate::dataview::{DataView, UpdateOptions};
use crate::geometry::PlotArea;
use crate::join::{ElementSet, JoinStats};
use crate::scale::{BandScale, ValueScale};
use crate::settings::{ChartSettings, EnumerateOptions, ObjectInstance, SettingsError, VisualSettings};
use crate::surface::{AttrValue, NodeId, Surface, Tag, Transform};
use crate::types::{Margins, RedrawPolicy, BAND_PADDING, BAR_FILL, BAR_STROKE, VALUE_HEADROOM};

pub const AXIS_CLASS: &str = "axis";
pub const BAR_CLASS: &str = "bar";
pub const BAR_LAYER_CLASS: &str = "bars";

#[derive(Clone, Debug, PartialEq)]
pub struct ChartOptions {
    pub margins: Margins,
    pub band_padding: f64,
    pub value_headroom: f64,
    pub bar_fill: String,
    pub bar_stroke: String,
    pub redraw: RedrawPolicy,
}

impl Default for ChartOptions {
    fn default() -> Self {
        Self {
            margins: Margins::default(),
            band_padding: BAND_PADDING,
            value_headroom: VALUE_HEADROOM,
            bar_fill: BAR_FILL.to_string(),
            bar_stroke: BAR_STROKE.to_string(),
            redraw: RedrawPolicy::default(),
        }
    }
}

/// What the last `update` did.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct UpdateStats {
    pub records: usize,
    pub plot: Option<PlotArea>,
    pub join: JoinStats,
    /// Set when the rows could not be converted and an empty dataset was drawn.
    pub conversion_error: Option<ConvertError>,
    /// Set when persisted settings were malformed and defaults were used.
    pub settings_error: Option<SettingsError>,
}

/// One chart instance. Lives as long as the host's visual; handles are never recreated.
pub struct BarChart<S: Surface, V: VisualSettings = ChartSettings> {
    surface: S,
    options: ChartOptions,
    svg: NodeId,
    plot: NodeId,
    bar_layer: NodeId,
    bars: ElementSet<usize>,
    settings: V,
    stats: UpdateStats,
}

impl<S: Surface, V: VisualSettings> BarChart<S, V> {
    /// Attach a canvas and its plot group under `container`. Nothing is drawn yet.
    pub fn construct(surface: S, container: NodeId) -> Self {
        Self::with_options(surface, container, ChartOptions::default())
    }

    pub fn with_options(mut surface: S, container: NodeId, options: ChartOptions) -> Self {
        let svg = surface.append(container, Tag::Svg);
        let plot = surface.append(svg, Tag::Group);
        let bar_layer = surface.append(plot, Tag::Group);
        surface.set_class(bar_layer, BAR_LAYER_CLASS);
        Self {
            surface,
            options,
            svg,
            plot,
            bar_layer,
            bars: ElementSet::new(),
            settings: V::default(),
            stats: UpdateStats::default(),
        }
    }

    pub fn surface(&self) -> &S { &self.surface }
    pub fn into_surface(self) -> S { self.surface }
    pub fn options(&self) -> &ChartOptions { &self.options }
    pub fn settings(&self) -> &V { &self.settings }
    pub fn stats(&self) -> &UpdateStats { &self.stats }
    /// Outer canvas handle.
    pub fn canvas(&self) -> NodeId { self.svg }
    /// Translated plot-area group handle.
    pub fn plot_group(&self) -> NodeId { self.plot }

    /// Bar elements in record order.
    pub fn bar_nodes(&self) -> Vec<NodeId> {
        self.bars.nodes().collect()
    }

    pub fn set_redraw_policy(&mut self, policy: RedrawPolicy) {
        self.options.redraw = policy;
    }

    /// Redraw for the given viewport and data. Never fails: bad input renders
    /// an empty or degenerate chart and is reported through [`Self::stats`].
    pub fn update(&mut self, update: &UpdateOptions) {
        let mut stats = UpdateStats::default();
        let view = update.data_view();

        self.settings = match view.map(V::parse) {
            Some(Ok(settings)) => settings,
            Some(Err(e)) => {
                log::warn!("malformed settings, using defaults: {e}");
                stats.settings_error = Some(e);
                V::default()
            }
            None => V::default(),
        };

        let viewport = update.viewport;
        self.surface.set_attr(self.svg, "height", viewport.height.into());
        self.surface.set_attr(self.svg, "width", viewport.width.into());

        let margins = self.options.margins;
        let plot = PlotArea::from_viewport(viewport, &margins);
        self.surface.set_attr(self.plot, "height", plot.height.into());
        self.surface.set_attr(self.plot, "width", plot.width.into());
        self.surface.set_attr(
            self.plot,
            "transform",
            Transform::Translate(margins.left as f64, margins.top as f64).into(),
        );
        if plot.is_degenerate() {
            log::warn!(
                "viewport {}x{} leaves no plot area ({}x{})",
                viewport.width, viewport.height, plot.width, plot.height
            );
        }

        let records = match self.records_from(view) {
            Ok(records) => records,
            Err(e) => {
                log::warn!("cannot convert rows, drawing empty chart: {e}");
                stats.conversion_error = Some(e);
                Vec::new()
            }
        };

        self.clear_stale();

        let x_scale = BandScale::new(
            records.iter().map(|r| r.category.as_str()),
            plot.width,
            self.options.band_padding,
        );
        let y_scale = ValueScale::for_amounts(
            records.iter().map(|r| r.amount),
            self.options.value_headroom,
            plot.height,
        );

        self.draw_x_axis(&x_scale, plot);
        self.draw_y_axis(&y_scale);
        stats.join = self.draw_bars(&records, &x_scale, &y_scale, plot);

        stats.records = records.len();
        stats.plot = Some(plot);
        log::debug!(
            "update: {} records, plot {}x{}, bars +{} ~{} -{}",
            stats.records, plot.width, plot.height,
            stats.join.entered, stats.join.updated, stats.join.exited
        );
        self.stats = stats;
    }

    /// Settings for the property pane; defaults until the first update.
    pub fn enumerate_object_instances(&self, options: &EnumerateOptions) -> Vec<ObjectInstance> {
        self.settings.enumerate_object_instances(options)
    }

    fn records_from(&self, view: Option<&DataView>) -> Result<Vec<Record>, ConvertError> {
        match view {
            Some(v) => convert(&v.table.rows),
            None => Ok(Vec::new()),
        }
    }

    /// Axes are always rebuilt; bars only under the clear-all policy.
    fn clear_stale(&mut self) {
        for node in self.surface.select_all(self.svg, AXIS_CLASS) {
            self.surface.remove(node);
        }
        if self.options.redraw == RedrawPolicy::ClearAll {
            for node in self.surface.select_all(self.svg, BAR_CLASS) {
                self.surface.remove(node);
            }
        }
        self.bars.prune(&self.surface);
    }

    fn draw_x_axis(&mut self, scale: &BandScale, plot: PlotArea) {
        let g = self.surface.insert_before(self.plot, Tag::Group, self.bar_layer);
        self.surface.set_class(g, "x axis");
        self.surface.set_style(g, "fill", "black");
        self.surface.set_attr(g, "transform", Transform::Translate(0.0, plot.height - 1.0).into());

        let nodes = Axis::bottom(scale).render(&mut self.surface, g);
        // rotated so long category names do not collide
        for label in nodes.labels {
            self.surface.set_style(label, "text-anchor", "end");
            self.surface.set_attr(label, "dx", AttrValue::Em(-0.8));
            self.surface.set_attr(label, "dy", AttrValue::Em(-0.6));
            self.surface.set_attr(label, "transform", Transform::Rotate(-90.0).into());
        }
    }

    fn draw_y_axis(&mut self, scale: &ValueScale) {
        let g = self.surface.insert_before(self.plot, Tag::Group, self.bar_layer);
        self.surface.set_class(g, "y axis");
        self.surface.set_style(g, "fill", "black");
        Axis::left(scale).render(&mut self.surface, g);
    }

    fn draw_bars(
        &mut self,
        records: &[Record],
        x_scale: &BandScale,
        y_scale: &ValueScale,
        plot: PlotArea,
    ) -> JoinStats {
        let keys: Vec<usize> = (0..records.len()).collect();
        let layer = self.bar_layer;
        let fill = self.options.bar_fill.as_str();
        let stroke = self.options.bar_stroke.as_str();
        let band_width = x_scale.band_width();

        self.bars.reconcile(
            &mut self.surface,
            &keys,
            |s| {
                let rect = s.append(layer, Tag::Rect);
                s.set_class(rect, BAR_CLASS);
                rect
            },
            |s, rect, i, _phase| {
                let record = &records[i];
                let y = y_scale.to_px(record.amount);
                s.set_attr(rect, "fill", fill.into());
                s.set_attr(rect, "stroke", stroke.into());
                s.set_attr(rect, "x", x_scale.map(&record.category).unwrap_or(0.0).into());
                s.set_attr(rect, "width", band_width.into());
                s.set_attr(rect, "y", y.into());
                s.set_attr(rect, "height", (plot.height - y).into());
            },
        )
    }
}
