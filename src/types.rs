use napi_derive::napi;
use serde::{Deserialize, Serialize};

/// Computed style values of one element, as the browser reports them.
#[napi(object)]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ElementStyle {
    /// e.g. "rgb(51, 51, 51)"
    pub color: String,
    /// e.g. "rgba(0, 0, 0, 0)"
    pub background_color: String,
    /// e.g. "16px"
    pub font_size: String,
    /// e.g. "400" | "bold"
    pub font_weight: String,
}

/// One element of a page snapshot. Snapshots list elements in document order.
#[napi(object)]
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ElementSnapshot {
    /// Stable handle assigned by the content script.
    pub key: u32,
    pub tag: String,
    /// The element's `id` attribute
    pub dom_id: Option<String>,
    /// Key of the parent element; None at the root.
    pub parent: Option<u32>,
    pub text: String,
    /// None when the style read failed on the page side.
    pub style: Option<ElementStyle>,
    pub offset_width: f64,
    pub offset_height: f64,
    pub client_rects: u32,
}

#[napi(object)]
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PageSnapshot {
    pub url: String,
    pub elements: Vec<ElementSnapshot>,
}

/// Classification of one text element.
#[napi(object)]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ElementResult {
    /// Lower-case tag name
    pub element: String,
    pub selector: String,
    /// "rgb(r,g,b)"
    pub text_color: String,
    /// "rgb(r,g,b)"
    pub bg_color: String,
    /// Rounded to 2 decimals
    pub contrast: f64,
    /// 3.0 for large text, 4.5 otherwise
    pub required: f64,
    /// Rendered font size in px
    pub font_size: f64,
    /// "PASS" | "FAIL"
    pub verdict: String,
    pub suggestion: Option<String>,
}

/// Result of one scan of one page.
#[napi(object)]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScanReport {
    pub url: String,
    /// RFC 3339, UTC
    pub timestamp: String,
    /// All classified elements, in scan order
    pub elements: Vec<ElementResult>,
    /// FAIL subset of `elements`, in scan order
    pub errors: Vec<ElementResult>,
    /// Qualifying elements found before the cap and budget applied
    pub candidates: u32,
    pub elapsed_ms: f64,
}

/// Scanner limits passed from JS. Missing fields take the defaults.
#[napi(object)]
#[derive(Debug, Clone, Default)]
pub struct ScanOptions {
    pub max_elements: Option<u32>,
    pub time_budget_ms: Option<f64>,
    pub tags: Option<Vec<String>>,
}

/// Input of the batch contrast entry point.
#[napi(object)]
#[derive(Debug, Clone)]
pub struct ColorPairInput {
    pub text_color: String,
    pub bg_color: String,
}

#[napi(object)]
#[derive(Debug, Clone, PartialEq)]
pub struct ContrastPairResult {
    /// Normalized 6-digit hex
    pub text_hex: String,
    /// Normalized 6-digit hex
    pub bg_hex: String,
    pub contrast: f64,
    pub pass_normal: bool,
    pub pass_large: bool,
}

/// What the highlighting side needs to mark one failing element.
#[napi(object)]
#[derive(Debug, Clone, PartialEq)]
pub struct HighlightMark {
    pub selector: String,
    pub message: String,
}
