use super::inference;
use super::model_manager::{self, ModelFiles};
use super::ImageClassifier;
use crate::config::ClassifierConfig;
use crate::error::AppError;
use crate::models::prediction_types::Prediction;
use image::DynamicImage;
use ort::session::Session;
use std::sync::Mutex;
use tracing::{debug, info};

/// Image classifier backed by an ONNX Runtime session.
///
/// Preprocessing runs on the calling thread; the session itself is used by one
/// caller at a time.
pub struct OnnxClassifier {
    session: Mutex<Session>,
    labels: Vec<String>,
    crop_size: u32,
    top_k: usize,
}

impl OnnxClassifier {
    pub fn load(config: &ClassifierConfig) -> Result<Self, AppError> {
        config.validate()?;
        let files = ModelFiles::locate(&config.model_dir, config.model_type);
        files.ensure_present()?;

        let labels = model_manager::load_labels(&files.labels_path)?;
        let session =
            model_manager::load_session(&files.model_path, config.use_gpu, config.intra_threads)?;

        info!(
            model = %files.model_path.display(),
            labels = labels.len(),
            "loaded classifier model"
        );

        Ok(Self {
            session: Mutex::new(session),
            labels,
            crop_size: config.model_type.crop_size(),
            top_k: config.top_k,
        })
    }
}

impl ImageClassifier for OnnxClassifier {
    fn classify(&self, image: &DynamicImage) -> Result<Vec<Prediction>, AppError> {
        let tensor = inference::preprocess_image(image, self.crop_size)?;

        let mut session = self
            .session
            .lock()
            .map_err(|_| AppError::from("Classifier session is poisoned"))?;
        let predictions = inference::run_inference(&mut session, tensor, &self.labels, self.top_k)?;

        debug!(candidates = predictions.len(), "inference finished");
        Ok(predictions)
    }
}
