use std::time::Instant;

use chrono::{SecondsFormat, Utc};
use tokio::sync::Mutex;

use crate::classifier::Classifier;
use crate::config::ScanConfig;
use crate::error::ScanError;
use crate::page::{ElementId, PageHost};
use crate::types::ScanReport;

/// Monotonic milliseconds, used for the scan time budget.
pub trait Clock {
    fn now_ms(&self) -> f64;
}

/// Wall clock measured from construction.
pub struct SystemClock {
    origin: Instant,
}

impl SystemClock {
    pub fn new() -> Self {
        Self { origin: Instant::now() }
    }
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for SystemClock {
    fn now_ms(&self) -> f64 {
        self.origin.elapsed().as_secs_f64() * 1000.0
    }
}

/// Whether a page is worth offering for scanning: only http(s) pages.
/// The scanner itself scans whatever host it is given.
pub fn is_url_supported(url: &str) -> bool {
    let Some((scheme, rest)) = url.split_once(':') else {
        return false;
    };
    (scheme.eq_ignore_ascii_case("http") || scheme.eq_ignore_ascii_case("https")) && rest.starts_with("//")
}

/// Contrast scanner for one page-load context.
///
/// Owns the contrast cache and element memo; both live as long as the
/// Scanner and are dropped by [`Scanner::reset`]. Scans on the same Scanner
/// run one at a time: the state mutex is held for the whole scan.
pub struct Scanner {
    config: ScanConfig,
    state: Mutex<Classifier>,
}

impl Scanner {
    pub fn new(config: ScanConfig) -> Self {
        Self {
            config,
            state: Mutex::new(Classifier::new()),
        }
    }

    /// Scan the host's page.
    ///
    /// Visible, non-empty elements of the allowed tags are classified in
    /// document order, at most `max_elements` of them. Before each element the
    /// elapsed time is checked against `time_budget_ms`; once over budget the
    /// rest is left out of the report. Elements whose queries fail are skipped.
    pub async fn scan<H, C>(&self, host: &H, clock: &C) -> Result<ScanReport, ScanError>
    where
        H: PageHost + ?Sized,
        C: Clock + ?Sized,
    {
        let mut classifier = self.state.lock().await;
        let start = clock.now_ms();
        let created = Utc::now();
        let url = host.url().to_string();

        let candidates = self.candidates(host)?;
        tracing::debug!(url = %url, candidates = candidates.len(), "scan started");

        let mut elements = Vec::new();
        let mut errors = Vec::new();
        let limit = self.config.max_elements as usize;

        for (processed, &id) in candidates.iter().take(limit).enumerate() {
            let elapsed = clock.now_ms() - start;
            if elapsed > self.config.time_budget_ms {
                tracing::debug!(processed, elapsed_ms = elapsed, "time budget exhausted");
                break;
            }

            match classifier.classify(host, id) {
                Ok(result) => {
                    if result.is_failure() {
                        errors.push(result.clone());
                    }
                    elements.push(result);
                }
                Err(err) => {
                    tracing::warn!(element = %id, error = %err, "skipping element");
                }
            }

            tokio::task::yield_now().await;
        }

        let elapsed_ms = clock.now_ms() - start;
        tracing::info!(
            url = %url,
            scanned = elements.len(),
            failures = errors.len(),
            elapsed_ms,
            "scan finished"
        );

        Ok(ScanReport {
            url,
            timestamp: created.to_rfc3339_opts(SecondsFormat::Millis, true),
            elements,
            errors,
            candidates: u32::try_from(candidates.len()).unwrap_or(u32::MAX),
            elapsed_ms,
        })
    }

    /// Blocking variant for synchronous callers, driven by a current-thread
    /// runtime. Must not be called from inside an async runtime.
    pub fn scan_blocking<H, C>(&self, host: &H, clock: &C) -> Result<ScanReport, ScanError>
    where
        H: PageHost + ?Sized,
        C: Clock + ?Sized,
    {
        let runtime = tokio::runtime::Builder::new_current_thread().build()?;
        runtime.block_on(self.scan(host, clock))
    }

    /// Drop cached ratios and memoized results, e.g. on page reload.
    /// Waits for an in-flight scan to finish.
    pub async fn reset(&self) {
        self.state.lock().await.clear();
    }

    /// [`Scanner::reset`] for synchronous callers. Must not be called from
    /// inside an async runtime.
    pub fn reset_blocking(&self) {
        self.state.blocking_lock().clear();
    }

    /// Elements of the allowed tags with non-empty text and a rendered box.
    fn candidates<H: PageHost + ?Sized>(&self, host: &H) -> Result<Vec<ElementId>, ScanError> {
        let all = host.elements_by_tag(&self.config.tags)?;
        Ok(all
            .into_iter()
            .filter(|&id| match qualifies(host, id) {
                Ok(keep) => keep,
                Err(err) => {
                    tracing::warn!(element = %id, error = %err, "skipping element");
                    false
                }
            })
            .collect())
    }
}

impl Default for Scanner {
    fn default() -> Self {
        Self::new(ScanConfig::default())
    }
}

fn qualifies<H: PageHost + ?Sized>(host: &H, id: ElementId) -> Result<bool, crate::error::HostError> {
    if host.text_content(id)?.trim().is_empty() {
        return Ok(false);
    }
    Ok(host.box_metrics(id)?.is_visible())
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;

    use super::*;
    use crate::error::HostError;
    use crate::page::snapshot::test_support::{node, page};
    use crate::page::SnapshotHost;
    use crate::types::{ElementSnapshot, ElementStyle, PageSnapshot};

    /// Advances by a fixed step every time it is read.
    struct SteppingClock {
        now: Cell<f64>,
        step: f64,
    }

    impl SteppingClock {
        fn new(step: f64) -> Self {
            Self { now: Cell::new(0.0), step }
        }
    }

    impl Clock for SteppingClock {
        fn now_ms(&self) -> f64 {
            let now = self.now.get();
            self.now.set(now + self.step);
            now
        }
    }

    fn frozen() -> SteppingClock {
        SteppingClock::new(0.0)
    }

    fn body_with(children: Vec<ElementSnapshot>) -> PageSnapshot {
        let mut elements = vec![node(0, "body", None).bg("#ffffff")];
        elements.extend(children);
        page(elements)
    }

    #[tokio::test]
    async fn black_paragraph_on_white_passes() {
        let host = SnapshotHost::new(body_with(vec![node(1, "p", Some(0)).fg("#000000")])).unwrap();
        let report = Scanner::default().scan(&host, &frozen()).await.unwrap();
        assert_eq!(report.elements.len(), 1);
        assert!(report.errors.is_empty());
        let result = &report.elements[0];
        assert_eq!(result.contrast, 21.0);
        assert_eq!(result.required, 4.5);
        assert_eq!(result.verdict, "PASS");
        assert!(result.suggestion.is_none());
        assert_eq!(report.url, "https://example.com/");
    }

    #[tokio::test]
    async fn mid_gray_span_passes_at_boundary() {
        let host = SnapshotHost::new(body_with(vec![node(1, "span", Some(0))
            .fg("#767676")
            .font("12px", "400")]))
        .unwrap();
        let report = Scanner::default().scan(&host, &frozen()).await.unwrap();
        assert_eq!(report.elements[0].contrast, 4.54);
        assert_eq!(report.elements[0].verdict, "PASS");
    }

    #[tokio::test]
    async fn light_gray_fails_and_lands_in_errors() {
        let host = SnapshotHost::new(body_with(vec![
            node(1, "p", Some(0)).fg("#000000"),
            node(2, "p", Some(0)).fg("#cccccc"),
            node(3, "li", Some(0)).fg("#dddddd"),
        ]))
        .unwrap();
        let report = Scanner::default().scan(&host, &frozen()).await.unwrap();
        assert_eq!(report.elements.len(), 3);
        assert_eq!(report.errors.len(), 2);
        assert_eq!(report.errors[0].selector, "body > p:nth-of-type(2)");
        assert_eq!(report.errors[1].selector, "body > li");
        assert!(report.errors[0].suggestion.as_deref().unwrap().contains("darken"));
    }

    #[tokio::test]
    async fn element_cap_limits_processing() {
        let children = (1..=5000).map(|k| node(k, "p", Some(0))).collect();
        let host = SnapshotHost::new(body_with(children)).unwrap();
        let report = Scanner::default().scan(&host, &frozen()).await.unwrap();
        assert_eq!(report.candidates, 5000);
        assert_eq!(report.elements.len(), 1000);
        assert_eq!(report.elements[999].selector, "body > p:nth-of-type(1000)");
    }

    #[tokio::test]
    async fn empty_text_and_invisible_elements_are_excluded() {
        let host = SnapshotHost::new(body_with(vec![
            node(1, "p", Some(0)).text("   "),
            node(2, "p", Some(0)).hidden(),
            node(3, "div", Some(0)),
            node(4, "label", Some(0)).text("Name"),
        ]))
        .unwrap();
        let report = Scanner::default().scan(&host, &frozen()).await.unwrap();
        assert_eq!(report.candidates, 1);
        assert_eq!(report.elements.len(), 1);
        assert_eq!(report.elements[0].element, "label");
    }

    #[tokio::test]
    async fn time_budget_stops_the_scan_early() {
        let children = (1..=100).map(|k| node(k, "p", Some(0))).collect();
        let host = SnapshotHost::new(body_with(children)).unwrap();
        // start reads 0; element checks read 100, 200, ... so elements 1-5 fit in 500ms
        let clock = SteppingClock::new(100.0);
        let report = Scanner::default().scan(&host, &clock).await.unwrap();
        assert_eq!(report.candidates, 100);
        assert_eq!(report.elements.len(), 5);
    }

    #[tokio::test]
    async fn failing_element_is_skipped_and_scan_continues() {
        let host = SnapshotHost::new(body_with(vec![
            node(1, "p", Some(0)).no_style(),
            node(2, "p", Some(0)).fg("#000000"),
        ]))
        .unwrap();
        let report = Scanner::default().scan(&host, &frozen()).await.unwrap();
        assert_eq!(report.candidates, 2);
        assert_eq!(report.elements.len(), 1);
        assert_eq!(report.elements[0].selector, "body > p:nth-of-type(2)");
    }

    #[tokio::test]
    async fn non_http_pages_are_scanned() {
        for url in ["file:///tmp/a.html", "fixture-page"] {
            let mut snapshot = body_with(vec![node(1, "p", Some(0)).fg("#000000")]);
            snapshot.url = url.to_string();
            let host = SnapshotHost::new(snapshot).unwrap();
            let report = Scanner::default().scan(&host, &frozen()).await.unwrap();
            assert_eq!(report.url, url);
            assert_eq!(report.elements.len(), 1);
            assert_eq!(report.elements[0].verdict, "PASS");
        }
    }

    #[tokio::test]
    async fn timestamp_is_taken_when_the_scan_starts() {
        let host = SnapshotHost::new(body_with(vec![node(1, "p", Some(0))])).unwrap();
        let before = Utc::now();
        let report = Scanner::default().scan(&host, &frozen()).await.unwrap();
        let after = Utc::now();
        let stamp = chrono::DateTime::parse_from_rfc3339(&report.timestamp).unwrap();
        // millisecond precision in the report
        assert!(stamp.timestamp_millis() >= before.timestamp_millis());
        assert!(stamp.timestamp_millis() <= after.timestamp_millis());
    }

    struct BrokenHost;

    impl PageHost for BrokenHost {
        fn url(&self) -> &str {
            "https://example.com/"
        }
        fn elements_by_tag(&self, _tags: &[String]) -> Result<Vec<ElementId>, HostError> {
            Err(HostError::Unavailable("document not ready".to_string()))
        }
        fn tag_name(&self, id: ElementId) -> Result<String, HostError> {
            Err(HostError::UnknownElement(id))
        }
        fn dom_id(&self, id: ElementId) -> Result<Option<String>, HostError> {
            Err(HostError::UnknownElement(id))
        }
        fn text_content(&self, id: ElementId) -> Result<String, HostError> {
            Err(HostError::UnknownElement(id))
        }
        fn computed_style(&self, id: ElementId) -> Result<ElementStyle, HostError> {
            Err(HostError::UnknownElement(id))
        }
        fn box_metrics(&self, id: ElementId) -> Result<crate::page::BoxMetrics, HostError> {
            Err(HostError::UnknownElement(id))
        }
        fn parent(&self, id: ElementId) -> Result<Option<ElementId>, HostError> {
            Err(HostError::UnknownElement(id))
        }
        fn previous_sibling(&self, id: ElementId) -> Result<Option<ElementId>, HostError> {
            Err(HostError::UnknownElement(id))
        }
    }

    #[tokio::test]
    async fn unavailable_host_rejects_whole_scan() {
        let err = Scanner::default().scan(&BrokenHost, &frozen()).await.unwrap_err();
        assert!(matches!(err, ScanError::Host(HostError::Unavailable(_))));
        assert!(err.to_string().contains("document not ready"));
    }

    #[tokio::test]
    async fn rescan_reuses_memo_and_matches() {
        let host = SnapshotHost::new(body_with(vec![
            node(1, "p", Some(0)).fg("#cccccc"),
            node(2, "a", Some(0)).fg("#cccccc"),
        ]))
        .unwrap();
        let scanner = Scanner::default();
        let first = scanner.scan(&host, &frozen()).await.unwrap();
        let second = scanner.scan(&host, &frozen()).await.unwrap();
        assert_eq!(first.elements, second.elements);
        assert_eq!(first.errors, second.errors);
        assert_eq!(scanner.state.lock().await.memo_len(), 2);
        // same color pair on both elements
        assert_eq!(scanner.state.lock().await.cached_ratios(), 1);

        scanner.reset().await;
        assert_eq!(scanner.state.lock().await.memo_len(), 0);
    }

    #[tokio::test]
    async fn concurrent_scans_are_serialized() {
        let host = SnapshotHost::new(body_with((1..=20).map(|k| node(k, "p", Some(0))).collect())).unwrap();
        let scanner = Scanner::default();
        let clock = frozen();
        let (a, b) = tokio::join!(scanner.scan(&host, &clock), scanner.scan(&host, &clock));
        let (a, b) = (a.unwrap(), b.unwrap());
        assert_eq!(a.elements.len(), 20);
        assert_eq!(a.elements, b.elements);
    }

    #[test]
    fn blocking_scan_runs_without_a_runtime() {
        let host = SnapshotHost::new(body_with(vec![node(1, "h2", Some(0))])).unwrap();
        let report = Scanner::default().scan_blocking(&host, &SystemClock::new()).unwrap();
        assert_eq!(report.elements.len(), 1);
        assert!(report.timestamp.ends_with('Z'));
    }

    #[test]
    fn url_support() {
        assert!(is_url_supported("https://example.com/"));
        assert!(is_url_supported("HTTP://example.com"));
        assert!(!is_url_supported("chrome://extensions"));
        assert!(!is_url_supported("file:///tmp/a.html"));
        assert!(!is_url_supported("about:blank"));
        assert!(!is_url_supported("not a url"));
    }

    #[test]
    fn system_clock_is_monotonic() {
        let clock = SystemClock::new();
        let a = clock.now_ms();
        let b = clock.now_ms();
        assert!(b >= a);
    }
}
