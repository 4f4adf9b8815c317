use super::color::Rgb;

/// Minimum ratio for normal-size text (WCAG 2.1 AA).
pub const NORMAL_TEXT_RATIO: f64 = 4.5;
/// Minimum ratio for large text (WCAG 2.1 AA).
pub const LARGE_TEXT_RATIO: f64 = 3.0;

/// Large text: at least 18px, or bold and at least 14px.
const LARGE_TEXT_PX: f64 = 18.0;
const LARGE_BOLD_TEXT_PX: f64 = 14.0;

/// Convert sRGB channel (0-255) to linear light value.
/// sRGB -> linear: if V <= 0.03928: V/12.92, else ((V+0.055)/1.055)^2.4
fn srgb_to_linear(channel: u8) -> f64 {
    let v = channel as f64 / 255.0;
    if v <= 0.03928 {
        v / 12.92
    } else {
        ((v + 0.055) / 1.055).powf(2.4)
    }
}

/// Calculate relative luminance per WCAG 2.1.
/// L = 0.2126 * R + 0.7152 * G + 0.0722 * B (linear channels)
pub fn relative_luminance(color: Rgb) -> f64 {
    0.2126 * srgb_to_linear(color.r) + 0.7152 * srgb_to_linear(color.g) + 0.0722 * srgb_to_linear(color.b)
}

/// Calculate WCAG 2.1 contrast ratio between two colors.
/// ratio = (L1 + 0.05) / (L2 + 0.05) where L1 >= L2
pub fn contrast_ratio(a: Rgb, b: Rgb) -> f64 {
    let l1 = relative_luminance(a);
    let l2 = relative_luminance(b);
    let (lighter, darker) = if l1 > l2 { (l1, l2) } else { (l2, l1) };
    (lighter + 0.05) / (darker + 0.05)
}

/// Round to 2 decimal places, the precision reported for ratios.
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

pub fn is_large_text(font_size_px: f64, bold: bool) -> bool {
    font_size_px >= LARGE_TEXT_PX || (bold && font_size_px >= LARGE_BOLD_TEXT_PX)
}

/// Required contrast for text of the given size and weight.
pub fn required_ratio(font_size_px: f64, bold: bool) -> f64 {
    if is_large_text(font_size_px, bold) {
        LARGE_TEXT_RATIO
    } else {
        NORMAL_TEXT_RATIO
    }
}
