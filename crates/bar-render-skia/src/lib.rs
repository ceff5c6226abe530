// File: crates/bar-render-skia/src/lib.rs
// Summary: Paints a retained bar-core Scene onto Skia CPU raster surfaces and encodes PNG or RGBA8.

use anyhow::{anyhow, Context, Result};
use bar_core::{AttrValue, NodeId, Scene, Surface, Tag, Transform};
use skia_safe as skia;

pub mod color;
pub mod text;

pub use color::parse_color;
pub use text::{Anchor, LabelShaper};

#[derive(Clone, Debug)]
pub struct RasterOptions {
    pub background: skia::Color,
    /// Text is the main source of cross-platform pixel variance; tests turn it off.
    pub draw_labels: bool,
    /// Pixel size of one `em`.
    pub font_size: f32,
    /// Used for text when no ancestor sets a fill.
    pub text_color: skia::Color,
    /// Stroke for tick lines and domain paths that carry no stroke of their own.
    pub axis_color: skia::Color,
}

impl Default for RasterOptions {
    fn default() -> Self {
        Self {
            background: skia::Color::WHITE,
            draw_labels: true,
            font_size: 10.0,
            text_color: skia::Color::BLACK,
            axis_color: skia::Color::BLACK,
        }
    }
}

/// Paint inherited down the tree. `None` means `none`.
#[derive(Clone, Copy, Debug)]
struct Inherited {
    fill: Option<skia::Color>,
    stroke: Option<skia::Color>,
}

impl Default for Inherited {
    fn default() -> Self {
        Self { fill: Some(skia::Color::BLACK), stroke: None }
    }
}

pub struct SkiaRasterizer {
    shaper: LabelShaper,
}

impl Default for SkiaRasterizer {
    fn default() -> Self {
        Self::new()
    }
}

impl SkiaRasterizer {
    pub fn new() -> Self {
        Self { shaper: LabelShaper::new() }
    }

    /// Canvas size declared by the scene's `svg` element, at least 1x1.
    pub fn canvas_size(scene: &Scene) -> Result<(i32, i32)> {
        let svg = scene.find_tag(Tag::Svg).ok_or_else(|| anyhow!("scene has no svg element"))?;
        let dim = |name: &str| {
            let v = scene.attr_number(svg, name).unwrap_or(0.0);
            if v.is_finite() { v.round().clamp(1.0, i32::MAX as f64) as i32 } else { 1 }
        };
        Ok((dim("width"), dim("height")))
    }

    fn paint(&self, scene: &Scene, opts: &RasterOptions) -> Result<skia::Surface> {
        let (width, height) = Self::canvas_size(scene)?;
        let mut surface = skia::surfaces::raster_n32_premul((width, height))
            .ok_or_else(|| anyhow!("failed to create {width}x{height} raster surface"))?;
        let canvas = surface.canvas();
        canvas.clear(opts.background);
        if let Some(svg) = scene.find_tag(Tag::Svg) {
            self.draw_node(canvas, scene, svg, Inherited::default(), opts);
        }
        log::debug!("rasterized scene at {width}x{height}");
        Ok(surface)
    }

    /// Returns `(pixels, width, height, row_bytes)` in unpremultiplied RGBA order.
    pub fn render_rgba8(&self, scene: &Scene, opts: &RasterOptions) -> Result<(Vec<u8>, i32, i32, usize)> {
        let mut surface = self.paint(scene, opts)?;
        let (w, h) = (surface.width(), surface.height());
        let info = skia::ImageInfo::new((w, h), skia::ColorType::RGBA8888, skia::AlphaType::Unpremul, None);
        let stride = w as usize * 4;
        let mut pixels = vec![0u8; stride * h as usize];
        if !surface.read_pixels(&info, &mut pixels, stride, (0, 0)) {
            return Err(anyhow!("reading back {w}x{h} pixels failed"));
        }
        Ok((pixels, w, h, stride))
    }

    pub fn render_png(&self, scene: &Scene, opts: &RasterOptions) -> Result<Vec<u8>> {
        let mut surface = self.paint(scene, opts)?;
        let image = surface.image_snapshot();
        #[allow(deprecated)]
        let data = image
            .encode_to_data(skia::EncodedImageFormat::PNG)
            .ok_or_else(|| anyhow!("encode PNG failed"))?;
        Ok(data.as_bytes().to_vec())
    }

    pub fn render_to_png(
        &self,
        scene: &Scene,
        opts: &RasterOptions,
        output_png_path: impl AsRef<std::path::Path>,
    ) -> Result<()> {
        let path = output_png_path.as_ref();
        let bytes = self.render_png(scene, opts)?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("creating {}", parent.display()))?;
        }
        std::fs::write(path, bytes).with_context(|| format!("writing {}", path.display()))?;
        Ok(())
    }

    fn draw_node(&self, canvas: &skia::Canvas, scene: &Scene, id: NodeId, parent: Inherited, opts: &RasterOptions) {
        let Some(tag) = scene.tag(id) else { return };
        let paint = Inherited {
            fill: paint_of(scene, id, "fill").unwrap_or(parent.fill),
            stroke: paint_of(scene, id, "stroke").unwrap_or(parent.stroke),
        };

        canvas.save();
        if let Some(t) = scene.attr(id, "transform").and_then(AttrValue::as_transform) {
            match t {
                Transform::Translate(x, y) => {
                    canvas.translate((x as f32, y as f32));
                }
                Transform::Rotate(deg) => {
                    canvas.rotate(deg as f32, None);
                }
            }
        }

        match tag {
            Tag::Rect => draw_rect(canvas, scene, id, paint),
            Tag::Line => draw_line(canvas, scene, id, paint, opts),
            Tag::Path => draw_path(canvas, scene, id, paint, opts),
            Tag::Text if opts.draw_labels => self.draw_text(canvas, scene, id, paint, opts),
            _ => {}
        }
        for child in scene.children(id) {
            self.draw_node(canvas, scene, child, paint, opts);
        }
        canvas.restore();
    }

    fn draw_text(&self, canvas: &skia::Canvas, scene: &Scene, id: NodeId, paint: Inherited, opts: &RasterOptions) {
        let Some(label) = scene.text(id).filter(|t| !t.is_empty()) else { return };
        let x = length(scene, id, "x", opts.font_size) + length(scene, id, "dx", opts.font_size);
        let y = length(scene, id, "y", opts.font_size) + length(scene, id, "dy", opts.font_size);
        if !(x.is_finite() && y.is_finite()) {
            return;
        }
        let anchor = Anchor::from_css(scene.style(id, "text-anchor"));
        let color = paint.fill.unwrap_or(opts.text_color);
        self.shaper.draw(canvas, label, (x, y), anchor, opts.font_size, color);
    }
}

/// `Some(paint)` when the element sets `name` as attribute or style, `None` to inherit.
fn paint_of(scene: &Scene, id: NodeId, name: &str) -> Option<Option<skia::Color>> {
    let value = scene
        .attr(id, name)
        .and_then(AttrValue::as_text)
        .or_else(|| scene.style(id, name))?;
    if value.trim() == "none" {
        return Some(None);
    }
    match parse_color(value) {
        Some(c) => Some(Some(c)),
        None => {
            log::debug!("unrecognised color {value:?}, inheriting");
            None
        }
    }
}

/// Attribute as user-space pixels; `em` lengths scale by the font size, missing is 0.
fn length(scene: &Scene, id: NodeId, name: &str, font_size: f32) -> f32 {
    match scene.attr(id, name) {
        Some(AttrValue::Number(v)) => *v as f32,
        Some(AttrValue::Em(v)) => *v as f32 * font_size,
        Some(AttrValue::Text(s)) => s.trim().parse().unwrap_or(0.0),
        _ => 0.0,
    }
}

fn fill_paint(color: skia::Color) -> skia::Paint {
    let mut p = skia::Paint::default();
    p.set_anti_alias(true);
    p.set_color(color);
    p.set_style(skia::paint::Style::Fill);
    p
}

fn stroke_paint(color: skia::Color) -> skia::Paint {
    let mut p = skia::Paint::default();
    p.set_anti_alias(true);
    p.set_color(color);
    p.set_stroke_width(1.0);
    p.set_style(skia::paint::Style::Stroke);
    p
}

fn draw_rect(canvas: &skia::Canvas, scene: &Scene, id: NodeId, paint: Inherited) {
    let num = |name: &str| scene.attr_number(id, name).unwrap_or(0.0);
    let (x, y, w, h) = (num("x"), num("y"), num("width"), num("height"));
    if ![x, y, w, h].iter().all(|v| v.is_finite()) || w < 0.0 || h < 0.0 {
        log::debug!("skipping rect {id:?} with unusable geometry ({x}, {y}, {w}, {h})");
        return;
    }
    let rect = skia::Rect::from_xywh(x as f32, y as f32, w as f32, h as f32);
    if let Some(fill) = paint.fill {
        canvas.draw_rect(rect, &fill_paint(fill));
    }
    if let Some(stroke) = paint.stroke {
        canvas.draw_rect(rect, &stroke_paint(stroke));
    }
}

fn draw_line(canvas: &skia::Canvas, scene: &Scene, id: NodeId, paint: Inherited, opts: &RasterOptions) {
    let num = |name: &str| scene.attr_number(id, name).unwrap_or(0.0) as f32;
    let (x1, y1, x2, y2) = (num("x1"), num("y1"), num("x2"), num("y2"));
    let color = paint.stroke.unwrap_or(opts.axis_color);
    canvas.draw_line((x1, y1), (x2, y2), &stroke_paint(color));
}

fn draw_path(canvas: &skia::Canvas, scene: &Scene, id: NodeId, paint: Inherited, opts: &RasterOptions) {
    let Some(d) = scene.attr(id, "d").and_then(AttrValue::as_text) else { return };
    let Some(path) = skia::Path::from_svg(d) else {
        log::debug!("unparseable path data {d:?}");
        return;
    };
    let color = paint.stroke.unwrap_or(opts.axis_color);
    canvas.draw_path(&path, &stroke_paint(color));
}
