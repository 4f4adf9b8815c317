use super::color::Rgb;
use super::wcag::relative_luminance;

/// Which way the text color should move to gain contrast.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Darken,
    Lighten,
}

/// Direction heuristic: target luminance `0.05 + L(bg) * required`; above 0.5
/// the text should get darker, otherwise lighter. This is a nudge only, the
/// resulting color is never checked against the threshold.
pub fn suggest_direction(background: Rgb, required: f64) -> Direction {
    let target = 0.05 + relative_luminance(background) * required;
    if target > 0.5 {
        Direction::Darken
    } else {
        Direction::Lighten
    }
}

/// Remediation hint for a failing element.
pub fn suggest(background: Rgb, required: f64) -> String {
    match suggest_direction(background, required) {
        Direction::Darken => "darken the text color".to_string(),
        Direction::Lighten => "lighten the text color".to_string(),
    }
}
