use crate::types::{HighlightMark, ScanReport};

/// One mark per failing element, in scan order. The highlighting side clears
/// its previous marks and re-locates each element through `selector`.
pub fn highlight_marks(report: &ScanReport) -> Vec<HighlightMark> {
    report
        .errors
        .iter()
        .map(|error| HighlightMark {
            selector: error.selector.clone(),
            message: format!("Contrast: {}:1 (required {}:1)", error.contrast, error.required),
        })
        .collect()
}
