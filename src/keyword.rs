//! Keyword records as returned by the analysis service.

use serde::{Deserialize, Serialize};

/// Smallest world-space font size a word is drawn at.
pub const MIN_FONT_SIZE: f32 = 0.28;
/// Largest world-space font size a word is drawn at.
pub const MAX_FONT_SIZE: f32 = 1.1;

/// A word paired with its normalised relevance weight.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Keyword {
    pub word: String,
    pub weight: f32,
}

impl Keyword {
    pub fn new(word: impl Into<String>, weight: f32) -> Self {
        Self {
            word: word.into(),
            weight,
        }
    }
}

/// Stable descending sort by weight. NaN weights sink to the end.
pub fn sort_by_weight_desc(keywords: &[Keyword]) -> Vec<Keyword> {
    let mut sorted = keywords.to_vec();
    sorted.sort_by(|a, b| sort_key(b.weight).total_cmp(&sort_key(a.weight)));
    sorted
}

fn sort_key(weight: f32) -> f32 {
    if weight.is_nan() {
        f32::NEG_INFINITY
    } else {
        weight
    }
}

/// Linear interpolation of font size from weight, clamped to `[min, max]`.
pub fn font_size(weight: f32, min: f32, max: f32) -> f32 {
    let w = if weight.is_nan() { 0.0 } else { weight.clamp(0.0, 1.0) };
    min + (max - min) * w
}
