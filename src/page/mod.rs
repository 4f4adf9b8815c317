pub mod background;
pub mod selector;
pub mod snapshot;

use std::fmt;

use crate::error::HostError;
use crate::types::ElementStyle;

pub use snapshot::SnapshotHost;

/// Stable, non-owning handle to a page element.
///
/// Assigned by the host; the engine only ever stores the number, so a memo
/// keyed by it never keeps the element itself alive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ElementId(pub u32);

impl fmt::Display for ElementId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Rendered box of an element.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct BoxMetrics {
    pub offset_width: f64,
    pub offset_height: f64,
    pub client_rects: u32,
}

impl BoxMetrics {
    /// Visible when it has a non-zero box or at least one client rect.
    pub fn is_visible(&self) -> bool {
        self.offset_width != 0.0 || self.offset_height != 0.0 || self.client_rects > 0
    }
}

impl ElementStyle {
    /// Leading number of the computed `font-size` (e.g. `16px` -> 16.0).
    /// Unparseable sizes read as 0.
    pub fn font_size_px(&self) -> f64 {
        let trimmed = self.font_size.trim_start();
        let end = trimmed
            .char_indices()
            .find(|&(i, c)| !(c.is_ascii_digit() || c == '.' || (i == 0 && (c == '-' || c == '+'))))
            .map_or(trimmed.len(), |(i, _)| i);
        trimmed[..end].parse().unwrap_or(0.0)
    }

    /// `bold`, `bolder`, or a numeric weight of 700 and above.
    pub fn is_bold(&self) -> bool {
        let weight = self.font_weight.trim();
        if weight.eq_ignore_ascii_case("bold") || weight.eq_ignore_ascii_case("bolder") {
            return true;
        }
        weight.parse::<f64>().map_or(false, |w| w >= 700.0)
    }
}

/// The live element tree of one page, as seen by the scanner.
///
/// Every query may fail for a single element (detached node, style read
/// error); the scanner skips such elements. `elements_by_tag` failing means
/// the page cannot be scanned at all.
pub trait PageHost {
    /// Source identifier, usually the page URL.
    fn url(&self) -> &str;

    /// Elements whose tag is in `tags`, in document order.
    fn elements_by_tag(&self, tags: &[String]) -> Result<Vec<ElementId>, HostError>;

    /// Lower-case tag name.
    fn tag_name(&self, id: ElementId) -> Result<String, HostError>;

    /// The element's `id` attribute, if any.
    fn dom_id(&self, id: ElementId) -> Result<Option<String>, HostError>;

    fn text_content(&self, id: ElementId) -> Result<String, HostError>;

    fn computed_style(&self, id: ElementId) -> Result<ElementStyle, HostError>;

    fn box_metrics(&self, id: ElementId) -> Result<BoxMetrics, HostError>;

    fn parent(&self, id: ElementId) -> Result<Option<ElementId>, HostError>;

    /// Previous sibling element (any tag).
    fn previous_sibling(&self, id: ElementId) -> Result<Option<ElementId>, HostError>;
}
