use std::collections::VecDeque;

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

use crate::types::ScanReport;

/// Entries kept by default.
pub const DEFAULT_HISTORY_CAPACITY: usize = 50;

/// Summary of one stored scan.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryEntry {
    /// Milliseconds since the epoch, unique within one history.
    pub id: i64,
    pub timestamp: String,
    pub url: String,
    pub error_count: usize,
    pub elements_scanned: usize,
    pub details: ScanReport,
}

/// Bounded scan history, newest first.
#[derive(Debug, Clone)]
pub struct ScanHistory {
    capacity: usize,
    entries: VecDeque<HistoryEntry>,
}

impl Default for ScanHistory {
    fn default() -> Self {
        Self::with_capacity(DEFAULT_HISTORY_CAPACITY)
    }
}

impl ScanHistory {
    /// A capacity of 0 is raised to 1 so the newest scan is always kept.
    pub fn with_capacity(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            capacity,
            entries: VecDeque::with_capacity(capacity),
        }
    }

    /// Restore a history from its JSON array form, dropping entries past `capacity`.
    pub fn from_json(json: &str, capacity: usize) -> Result<Self, serde_json::Error> {
        let capacity = capacity.max(1);
        let mut entries: VecDeque<HistoryEntry> = serde_json::from_str(json)?;
        entries.truncate(capacity);
        Ok(Self { capacity, entries })
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(&self.entries)
    }

    /// Store `report` as the newest entry and evict the oldest beyond capacity.
    pub fn record(&mut self, report: ScanReport, now: DateTime<Utc>) -> &HistoryEntry {
        let mut id = now.timestamp_millis();
        if let Some(newest) = self.entries.front() {
            id = id.max(newest.id + 1);
        }

        let entry = HistoryEntry {
            id,
            timestamp: now.to_rfc3339_opts(SecondsFormat::Millis, true),
            url: report.url.clone(),
            error_count: report.errors.len(),
            elements_scanned: report.elements.len(),
            details: report,
        };
        tracing::debug!(id, url = %entry.url, errors = entry.error_count, "scan recorded");

        self.entries.push_front(entry);
        self.entries.truncate(self.capacity);
        &self.entries[0]
    }

    pub fn entries(&self) -> impl Iterator<Item = &HistoryEntry> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
