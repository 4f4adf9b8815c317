use std::collections::HashMap;

use crate::error::HostError;
use crate::math::cache::ContrastCache;
use crate::math::color::parse_color;
use crate::math::suggest::suggest;
use crate::math::wcag::{required_ratio, round2};
use crate::page::background::effective_background;
use crate::page::selector::selector_path;
use crate::page::{ElementId, PageHost};
use crate::types::{ElementResult, ElementStyle};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    Pass,
    Fail,
}

impl Verdict {
    /// Compared on the unrounded ratio: a ratio reported as 4.50 may still fail 4.5.
    pub fn of(contrast: f64, required: f64) -> Self {
        if contrast >= required {
            Self::Pass
        } else {
            Self::Fail
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Pass => "PASS",
            Self::Fail => "FAIL",
        }
    }
}

impl ElementResult {
    pub fn is_failure(&self) -> bool {
        self.verdict == Verdict::Fail.as_str()
    }
}

/// Everything a classification depends on. A memo entry is reused only while
/// these are unchanged.
#[derive(Debug, Clone, PartialEq)]
struct ElementInputs {
    tag: String,
    selector: String,
    style: ElementStyle,
    background: String,
}

struct MemoEntry {
    inputs: ElementInputs,
    result: ElementResult,
}

/// Per-element contrast classification for one page session.
///
/// Owns the contrast cache and the element memo. The memo is keyed by
/// `ElementId` only and holds no reference into the host.
#[derive(Default)]
pub struct Classifier {
    contrast: ContrastCache,
    memo: HashMap<ElementId, MemoEntry>,
}

impl Classifier {
    pub fn new() -> Self {
        Self::default()
    }

    /// Classify one element. Returns the memoized result when neither the
    /// element's style, its effective background nor its selector changed.
    pub fn classify<H: PageHost + ?Sized>(&mut self, host: &H, id: ElementId) -> Result<ElementResult, HostError> {
        let inputs = ElementInputs {
            tag: host.tag_name(id)?,
            selector: selector_path(host, id)?,
            style: host.computed_style(id)?,
            background: effective_background(host, id)?,
        };

        if let Some(entry) = self.memo.get(&id) {
            if entry.inputs == inputs {
                return Ok(entry.result.clone());
            }
            tracing::debug!(element = %id, "inputs changed since last classification");
        }

        let result = self.evaluate(&inputs);
        self.memo.insert(
            id,
            MemoEntry {
                inputs,
                result: result.clone(),
            },
        );
        Ok(result)
    }

    fn evaluate(&mut self, inputs: &ElementInputs) -> ElementResult {
        let text = parse_color(&inputs.style.color);
        let background = parse_color(&inputs.background);
        let contrast = self.contrast.ratio(text, background);
        let font_size = inputs.style.font_size_px();
        let required = required_ratio(font_size, inputs.style.is_bold());
        let verdict = Verdict::of(contrast, required);

        ElementResult {
            element: inputs.tag.clone(),
            selector: inputs.selector.clone(),
            text_color: text.to_string(),
            bg_color: background.to_string(),
            contrast: round2(contrast),
            required,
            font_size,
            verdict: verdict.as_str().to_string(),
            suggestion: match verdict {
                Verdict::Pass => None,
                Verdict::Fail => Some(suggest(background, required)),
            },
        }
    }

    pub fn memo_len(&self) -> usize {
        self.memo.len()
    }

    pub fn cached_ratios(&self) -> usize {
        self.contrast.len()
    }

    pub fn clear(&mut self) {
        self.memo.clear();
        self.contrast.clear();
    }
}
