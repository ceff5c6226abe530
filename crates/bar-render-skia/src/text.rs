// File: crates/bar-render-skia/src/text.rs
// Summary: Label shaping with Skia textlayout; positions text by SVG anchor and baseline.

use skia_safe as skia;
use skia::textlayout::{FontCollection, Paragraph, ParagraphBuilder, ParagraphStyle, TextStyle};

/// Horizontal alignment of a label relative to its x position.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Anchor {
    Start,
    Middle,
    End,
}

impl Anchor {
    /// CSS `text-anchor` keyword; anything unrecognised is `start`.
    pub fn from_css(value: Option<&str>) -> Self {
        match value.map(str::trim) {
            Some("middle") => Anchor::Middle,
            Some("end") => Anchor::End,
            _ => Anchor::Start,
        }
    }
}

pub struct LabelShaper {
    fonts: FontCollection,
}

impl Default for LabelShaper {
    fn default() -> Self {
        Self::new()
    }
}

impl LabelShaper {
    pub fn new() -> Self {
        let mut fc = FontCollection::new();
        fc.set_default_font_manager(skia::FontMgr::default(), None);
        Self { fonts: fc }
    }

    fn layout(&self, text: &str, size: f32, color: skia::Color) -> Paragraph {
        let mut ts = TextStyle::new();
        ts.set_font_size(size.max(1.0));
        ts.set_color(color);
        ts.set_font_families(&["Arial", "Helvetica", "DejaVu Sans", "sans-serif"]);

        let mut builder = ParagraphBuilder::new(&ParagraphStyle::new(), &self.fonts);
        builder.push_style(&ts);
        builder.add_text(text);
        let mut paragraph = builder.build();
        paragraph.layout(10_000.0);
        paragraph
    }

    pub fn measure_width(&self, text: &str, size: f32) -> f32 {
        self.layout(text, size, skia::Color::TRANSPARENT).longest_line()
    }

    /// Paint `text` with its alphabetic baseline at `y`, aligned on `x` per `anchor`.
    pub fn draw(
        &self,
        canvas: &skia::Canvas,
        text: &str,
        (x, y): (f32, f32),
        anchor: Anchor,
        size: f32,
        color: skia::Color,
    ) {
        let paragraph = self.layout(text, size, color);
        let width = paragraph.longest_line();
        let left = match anchor {
            Anchor::Start => x,
            Anchor::Middle => x - width / 2.0,
            Anchor::End => x - width,
        };
        paragraph.paint(canvas, (left, y - paragraph.alphabetic_baseline()));
    }
}
