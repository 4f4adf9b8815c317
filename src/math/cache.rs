use std::collections::HashMap;

use super::color::Rgb;
use super::wcag::contrast_ratio;

/// Memoized contrast ratios for one scan session.
///
/// Keyed by the ordered `(text, background)` pair, so `(a, b)` and `(b, a)`
/// occupy separate slots even though they hold the same ratio. No eviction:
/// the scanner's element cap bounds growth and the owner clears it on reset.
#[derive(Debug, Default)]
pub struct ContrastCache {
    ratios: HashMap<(Rgb, Rgb), f64>,
}

impl ContrastCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn ratio(&mut self, text: Rgb, background: Rgb) -> f64 {
        *self
            .ratios
            .entry((text, background))
            .or_insert_with(|| contrast_ratio(text, background))
    }

    pub fn len(&self) -> usize {
        self.ratios.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ratios.is_empty()
    }

    pub fn clear(&mut self) {
        self.ratios.clear();
    }
}
