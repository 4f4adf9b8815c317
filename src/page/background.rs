use super::{ElementId, PageHost};
use crate::error::HostError;
use crate::math::color::is_transparent;

/// Used when no element up to the root paints a background.
pub const FALLBACK_BACKGROUND: &str = "#ffffff";

/// Walk from `id` up through its ancestors and return the first background
/// color that is not fully transparent, or white when the root is reached.
///
/// Transparency is judged on the numeric alpha, so `transparent`,
/// `rgba(0, 0, 0, 0)`, `#0000` and friends are all skipped.
pub fn effective_background<H: PageHost + ?Sized>(host: &H, id: ElementId) -> Result<String, HostError> {
    let mut current = Some(id);
    while let Some(element) = current {
        let style = host.computed_style(element)?;
        if !is_transparent(&style.background_color) {
            return Ok(style.background_color);
        }
        current = host.parent(element)?;
    }
    Ok(FALLBACK_BACKGROUND.to_string())
}
