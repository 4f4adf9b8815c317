use std::fmt;

use csscolorparser::Color;
/// An opaque sRGB color with 8-bit channels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const BLACK: Rgb = Rgb::new(0, 0, 0);
    pub const WHITE: Rgb = Rgb::new(255, 255, 255);

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// 6-digit lower-case hex form, e.g. `#1e293b`.
    pub fn to_hex(self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "rgb({},{},{})", self.r, self.g, self.b)
    }
}

/// Parse a CSS color string into RGB channels, dropping any alpha.
///
/// Handles `#rgb`, `#rgba`, `#rrggbb`, `#rrggbbaa`, `rgb(...)` / `rgba(...)`
/// (first three numeric tokens), and whatever else csscolorparser understands
/// (named colors, hsl, ...). Anything unrecognized yields black; callers get a
/// wrong color rather than an error for malformed input.
pub fn parse_color(value: &str) -> Rgb {
    let trimmed = value.trim();

    if let Some(raw) = trimmed.strip_prefix('#') {
        return parse_hex_digits(raw).unwrap_or(Rgb::BLACK);
    }

    if trimmed.to_ascii_lowercase().starts_with("rgb") {
        return parse_rgb_function(trimmed).unwrap_or(Rgb::BLACK);
    }

    match trimmed.parse::<Color>() {
        Ok(color) => {
            let [r, g, b, _] = color.to_rgba8();
            Rgb::new(r, g, b)
        }
        Err(_) => Rgb::BLACK,
    }
}

/// Read hex digits (without the leading `#`). Short forms are expanded and an
/// alpha group is ignored. Returns None for any other length or a non-hex digit.
fn parse_hex_digits(raw: &str) -> Option<Rgb> {
    if !raw.bytes().all(|b| b.is_ascii_hexdigit()) {
        return None;
    }

    let expanded: String = match raw.len() {
        3 | 4 => raw[0..3].chars().flat_map(|c| [c, c]).collect(),
        6 | 8 => raw[0..6].to_string(),
        _ => return None,
    };

    let r = u8::from_str_radix(&expanded[0..2], 16).ok()?;
    let g = u8::from_str_radix(&expanded[2..4], 16).ok()?;
    let b = u8::from_str_radix(&expanded[4..6], 16).ok()?;
    Some(Rgb::new(r, g, b))
}

/// Take the first three numeric tokens of an `rgb(...)`/`rgba(...)` string.
fn parse_rgb_function(value: &str) -> Option<Rgb> {
    let mut channels = numeric_tokens(value).map(|n| n.round().clamp(0.0, 255.0) as u8);
    let r = channels.next()?;
    let g = channels.next()?;
    let b = channels.next()?;
    Some(Rgb::new(r, g, b))
}

fn numeric_tokens(value: &str) -> impl Iterator<Item = f64> + '_ {
    value
        .split(|c: char| !(c.is_ascii_digit() || c == '.'))
        .filter(|token| token.bytes().any(|b| b.is_ascii_digit()))
        .filter_map(|token| token.parse::<f64>().ok())
}

/// Numeric alpha (0.0-1.0) of any CSS color string, `None` if unparseable.
/// `transparent` reads as 0.0.
pub fn color_alpha(value: &str) -> Option<f64> {
    value
        .trim()
        .parse::<Color>()
        .ok()
        .map(|color| f64::from(color.a))
}

/// True when the color string encodes zero alpha, in any notation.
/// Unparseable strings count as opaque.
pub fn is_transparent(value: &str) -> bool {
    matches!(color_alpha(value), Some(a) if a <= 0.0)
}
