pub mod inference;
pub mod model_manager;
#[cfg(feature = "onnx")]
pub mod onnx;

use crate::error::AppError;
use crate::models::prediction_types::Prediction;
use image::DynamicImage;

/// A pretrained image-recognition model.
///
/// Returns candidates in descending confidence order. Implementations must be
/// safe to call from several threads at once; calls block until inference
/// finishes.
pub trait ImageClassifier: Send + Sync {
    fn classify(&self, image: &DynamicImage) -> Result<Vec<Prediction>, AppError>;
}
