// File: crates/bar-render-skia/src/color.rs
// Summary: CSS color keywords and hex notation -> Skia colors.

use skia_safe as skia;

/// Parse `name`, `#rgb` or `#rrggbb`. `none`, empty and unknown values yield `None`.
pub fn parse_color(value: &str) -> Option<skia::Color> {
    let v = value.trim();
    if let Some(hex) = v.strip_prefix('#') {
        return parse_hex(hex);
    }
    let rgb = match v.to_ascii_lowercase().as_str() {
        "black" => (0, 0, 0),
        "white" => (255, 255, 255),
        "yellow" => (255, 255, 0),
        "red" => (255, 0, 0),
        "green" => (0, 128, 0),
        "lime" => (0, 255, 0),
        "blue" => (0, 0, 255),
        "navy" => (0, 0, 128),
        "orange" => (255, 165, 0),
        "purple" => (128, 0, 128),
        "steelblue" => (70, 130, 180),
        "gray" | "grey" => (128, 128, 128),
        "lightgray" | "lightgrey" => (211, 211, 211),
        _ => return None,
    };
    Some(skia::Color::from_rgb(rgb.0, rgb.1, rgb.2))
}

fn parse_hex(hex: &str) -> Option<skia::Color> {
    let digit = |i: usize| u8::from_str_radix(hex.get(i..i + 1)?, 16).ok();
    let pair = |i: usize| u8::from_str_radix(hex.get(i..i + 2)?, 16).ok();
    match hex.len() {
        3 => {
            let (r, g, b) = (digit(0)?, digit(1)?, digit(2)?);
            Some(skia::Color::from_rgb(r * 17, g * 17, b * 17))
        }
        6 => Some(skia::Color::from_rgb(pair(0)?, pair(2)?, pair(4)?)),
        _ => None,
    }
}
