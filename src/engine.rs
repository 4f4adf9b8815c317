use rayon::prelude::*;

use crate::math::color::parse_color;
use crate::math::wcag::{contrast_ratio, round2, LARGE_TEXT_RATIO, NORMAL_TEXT_RATIO};
use crate::types::{ColorPairInput, ContrastPairResult};

/// Evaluate many text/background pairs in parallel.
///
/// Uses Rayon's `par_iter()`; pairs are independent, so there is no shared
/// cache here. Output order matches input order. This is the batch path for
/// callers that already have color pairs and no page to walk.
pub fn contrast_batch(pairs: &[ColorPairInput]) -> Vec<ContrastPairResult> {
    pairs
        .par_iter()
        .map(|pair| {
            let text = parse_color(&pair.text_color);
            let background = parse_color(&pair.bg_color);
            let ratio = contrast_ratio(text, background);
            ContrastPairResult {
                text_hex: text.to_hex(),
                bg_hex: background.to_hex(),
                contrast: round2(ratio),
                pass_normal: ratio >= NORMAL_TEXT_RATIO,
                pass_large: ratio >= LARGE_TEXT_RATIO,
            }
        })
        .collect()
}
