use serde::{Deserialize, Serialize};

use crate::engine::WordObservation;

/// Text and aggregate confidence recognized from one image.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecognitionResult {
    /// Full-page text, whitespace-trimmed.
    pub text: String,
    /// Mean word confidence in percent (0..100).
    pub confidence: f64,
}

impl RecognitionResult {
    /// Builds a result from raw engine output.
    pub fn from_observations(raw_text: Option<String>, words: &[WordObservation]) -> Self {
        Self {
            text: raw_text.as_deref().map(str::trim).unwrap_or_default().to_string(),
            confidence: average_confidence(words),
        }
    }
}

/// Mean of the word confidences with negative sentinels counted as 0.
/// Returns 0.0 when there are no words.
pub fn average_confidence(words: &[WordObservation]) -> f64 {
    if words.is_empty() {
        return 0.0;
    }
    let sum: f64 = words
        .iter()
        .map(|w| f64::from(w.confidence.max(0.0)))
        .sum();
    sum / words.len() as f64
}
