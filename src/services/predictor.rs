use crate::error::PredictionError;
use crate::models::photo_types::Photo;
use crate::models::prediction_types::{Prediction, PredictionList};
use crate::services::classifier::ImageClassifier;
use crate::services::orientation;
use image::DynamicImage;
use std::sync::Arc;
use tracing::debug;

/// Runs one classification per call against a shared classifier.
///
/// Holds no per-request state, so concurrent calls with different photos are
/// independent.
#[derive(Clone)]
pub struct Predictor {
    classifier: Arc<dyn ImageClassifier>,
}

impl Predictor {
    pub fn new(classifier: Arc<dyn ImageClassifier>) -> Self {
        Self { classifier }
    }

    /// Classify `photo`, returning the candidates in the classifier's order.
    ///
    /// Decoding and inference run on the blocking pool; the classifier is
    /// invoked at most once and failures are never retried.
    pub async fn predict(&self, photo: &Photo) -> Result<PredictionList, PredictionError> {
        let photo = photo.clone();
        let classifier = Arc::clone(&self.classifier);

        tokio::task::spawn_blocking(move || -> Result<PredictionList, PredictionError> {
            let image = prepare_image(&photo)?;
            let raw = classifier.classify(&image)?;
            normalize(raw)
        })
        .await
        .map_err(|e| PredictionError::Classification(format!("Classifier task failed: {}", e)))?
    }
}

/// Decode `photo` into the upright bitmap the classifier expects.
pub fn prepare_image(photo: &Photo) -> Result<DynamicImage, PredictionError> {
    if photo.is_empty() {
        return Err(PredictionError::InvalidInput("photo has no data".to_string()));
    }

    let orientation = orientation::read_orientation(photo.bytes()).ok_or_else(|| {
        PredictionError::InvalidInput("cannot determine photo orientation".to_string())
    })?;

    let image = image::load_from_memory(photo.bytes())
        .map_err(|e| PredictionError::InvalidInput(format!("cannot decode photo: {}", e)))?;

    debug!(
        width = image.width(),
        height = image.height(),
        orientation,
        "decoded photo"
    );

    Ok(orientation::apply_orientation(image, orientation))
}

/// Turn raw classifier output into a prediction list without reordering it.
///
/// Confidences are clamped into [0, 1]. An empty result or a NaN confidence
/// fails the whole request.
pub fn normalize(raw: Vec<Prediction>) -> Result<PredictionList, PredictionError> {
    if let Some(bad) = raw.iter().find(|p| p.confidence.is_nan()) {
        return Err(PredictionError::Classification(format!(
            "classifier returned no confidence for {:?}",
            bad.classification
        )));
    }

    let predictions = raw
        .into_iter()
        .map(|p| Prediction {
            confidence: p.confidence.clamp(0.0, 1.0),
            ..p
        })
        .collect();

    PredictionList::new(predictions).ok_or_else(|| {
        PredictionError::Classification("classifier returned no candidates".to_string())
    })
}
