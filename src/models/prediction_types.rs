use serde::Serialize;

/// One label and its confidence, as produced by the classifier.
///
/// A classification may carry several comma-separated synonyms
/// (`"tabby, tabby cat"`); the first one is the canonical display name.
#[derive(Debug, Serialize, Clone, PartialEq)]
pub struct Prediction {
    pub classification: String,
    pub confidence: f32,
}

impl Prediction {
    pub fn new(classification: impl Into<String>, confidence: f32) -> Self {
        Self {
            classification: classification.into(),
            confidence,
        }
    }

    /// The text before the first comma, or the whole classification.
    pub fn primary_name(&self) -> &str {
        match self.classification.find(',') {
            Some(idx) => &self.classification[..idx],
            None => &self.classification,
        }
    }

    /// Confidence as a whole percentage. Halves round away from zero, so an
    /// exact 12.5% shows as 13%.
    pub fn confidence_percentage(&self) -> u32 {
        (f64::from(self.confidence) * 100.0).round() as u32
    }
}

/// A non-empty list of predictions in the order the classifier ranked them.
///
/// Only truncation is offered; the list is never re-sorted.
#[derive(Debug, Serialize, Clone, PartialEq)]
#[serde(transparent)]
pub struct PredictionList(Vec<Prediction>);

impl PredictionList {
    /// Returns `None` for an empty list, which is the "no predictions" outcome.
    pub fn new(predictions: Vec<Prediction>) -> Option<Self> {
        if predictions.is_empty() {
            None
        } else {
            Some(Self(predictions))
        }
    }

    pub fn top(&self, k: usize) -> &[Prediction] {
        &self.0[..k.min(self.0.len())]
    }

    pub fn as_slice(&self) -> &[Prediction] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        false
    }

    pub fn into_inner(self) -> Vec<Prediction> {
        self.0
    }
}
