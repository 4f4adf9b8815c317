use serde::Deserialize;

use crate::types::ScanOptions;

/// Most elements classified in one scan.
pub const DEFAULT_MAX_ELEMENTS: u32 = 1000;
/// Soft wall-clock budget of one scan, in milliseconds.
pub const DEFAULT_TIME_BUDGET_MS: f64 = 500.0;
/// Text-bearing tags a scan looks at.
pub const DEFAULT_TAGS: &[&str] = &[
    "p", "h1", "h2", "h3", "h4", "h5", "h6", "span", "a", "li", "td", "button", "label",
];

/// Scanner limits. Deserializes from partial JSON; absent keys keep defaults.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ScanConfig {
    pub max_elements: u32,
    pub time_budget_ms: f64,
    pub tags: Vec<String>,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            max_elements: DEFAULT_MAX_ELEMENTS,
            time_budget_ms: DEFAULT_TIME_BUDGET_MS,
            tags: DEFAULT_TAGS.iter().map(|t| t.to_string()).collect(),
        }
    }
}

impl ScanConfig {
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}

impl From<ScanOptions> for ScanConfig {
    fn from(options: ScanOptions) -> Self {
        let defaults = Self::default();
        Self {
            max_elements: options.max_elements.unwrap_or(defaults.max_elements),
            time_budget_ms: options.time_budget_ms.unwrap_or(defaults.time_budget_ms),
            tags: options.tags.unwrap_or(defaults.tags),
        }
    }
}
