#[macro_use]
extern crate napi_derive;

pub mod classifier;
pub mod config;
pub mod engine;
pub mod error;
pub mod highlight;
pub mod history;
pub mod logging;
pub mod math;
pub mod page;
pub mod scanner;
pub mod types;

use crate::config::ScanConfig;
use crate::error::ScanError;
use crate::history::{ScanHistory, DEFAULT_HISTORY_CAPACITY};
use crate::page::SnapshotHost;
use crate::scanner::{Scanner, SystemClock};
use crate::types::{
    ColorPairInput, ContrastPairResult, HighlightMark, PageSnapshot, ScanOptions, ScanReport,
};

#[napi]
pub fn health_check() -> String {
    "contrast-scan-native ok".to_string()
}

/// One scanner per page-load context. Caches live as long as the instance.
#[napi]
pub struct ContrastScanner {
    inner: Scanner,
}

#[napi]
impl ContrastScanner {
    #[napi(constructor)]
    pub fn new(options: Option<ScanOptions>) -> Self {
        logging::init();
        Self {
            inner: Scanner::new(options.unwrap_or_default().into()),
        }
    }

    /// Build a scanner from stored JSON config; absent keys keep defaults.
    #[napi(factory)]
    pub fn from_config_json(json: String) -> napi::Result<Self> {
        logging::init();
        let config = ScanConfig::from_json(&json)
            .map_err(|e| napi::Error::from_reason(format!("invalid scan config: {e}")))?;
        Ok(Self {
            inner: Scanner::new(config),
        })
    }

    /// Scan a snapshot of the page's element tree.
    #[napi]
    pub fn scan(&self, snapshot: PageSnapshot) -> napi::Result<ScanReport> {
        let host = SnapshotHost::new(snapshot).map_err(ScanError::from)?;
        Ok(self.inner.scan_blocking(&host, &SystemClock::new())?)
    }

    /// Forget cached ratios and memoized results.
    #[napi]
    pub fn reset(&self) {
        self.inner.reset_blocking();
    }
}

#[napi]
pub fn contrast_batch(pairs: Vec<ColorPairInput>) -> Vec<ContrastPairResult> {
    engine::contrast_batch(&pairs)
}

#[napi]
pub fn highlight_marks(report: ScanReport) -> Vec<HighlightMark> {
    highlight::highlight_marks(&report)
}

#[napi]
pub fn is_url_supported(url: String) -> bool {
    scanner::is_url_supported(&url)
}

/// Prepend `report` to a stored history (JSON array, absent = empty) and
/// return the bounded result as JSON.
#[napi]
pub fn record_history(history_json: Option<String>, report: ScanReport) -> napi::Result<String> {
    let mut history = match history_json.as_deref() {
        Some(json) => ScanHistory::from_json(json, DEFAULT_HISTORY_CAPACITY),
        None => Ok(ScanHistory::default()),
    }
    .map_err(|e| napi::Error::from_reason(format!("invalid scan history: {e}")))?;

    history.record(report, chrono::Utc::now());
    history
        .to_json()
        .map_err(|e| napi::Error::from_reason(format!("failed to encode scan history: {e}")))
}
