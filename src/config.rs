use crate::error::AppError;
use crate::services::classifier::model_manager::ModelType;
use serde::Deserialize;
use std::path::{Path, PathBuf};

pub const WORKING_MESSAGE: &str = "Making predictions for the photo...";
pub const NO_PREDICTIONS_MESSAGE: &str = "No predictions. (Check console log.)";

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct PresenterConfig {
    /// The largest number of predictions shown to the user.
    pub predictions_to_show: usize,
    pub working_message: String,
    pub no_predictions_message: String,
    pub line_separator: String,
}

impl Default for PresenterConfig {
    fn default() -> Self {
        Self {
            predictions_to_show: 1,
            working_message: WORKING_MESSAGE.to_string(),
            no_predictions_message: NO_PREDICTIONS_MESSAGE.to_string(),
            line_separator: "\n".to_string(),
        }
    }
}

impl PresenterConfig {
    pub fn validate(&self) -> Result<(), AppError> {
        if self.predictions_to_show == 0 {
            return Err("predictions_to_show must be at least 1".into());
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct ClassifierConfig {
    pub model_dir: PathBuf,
    pub model_type: ModelType,
    pub top_k: usize,
    pub use_gpu: bool,
    pub intra_threads: usize,
}

impl ClassifierConfig {
    pub fn validate(&self) -> Result<(), AppError> {
        if self.top_k == 0 {
            return Err("top_k must be at least 1".into());
        }
        Ok(())
    }
}

impl Default for ClassifierConfig {
    fn default() -> Self {
        Self {
            model_dir: PathBuf::from("models"),
            model_type: ModelType::MobileNetV3Large,
            top_k: 5,
            use_gpu: false,
            intra_threads: 4,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct Config {
    pub presenter: PresenterConfig,
    pub classifier: ClassifierConfig,
}

impl Config {
    pub fn load(path: &Path) -> Result<Self, AppError> {
        let raw = std::fs::read_to_string(path).map_err(|e| AppError {
            message: format!("Failed to read config file {}: {}", path.display(), e),
        })?;
        let config: Config = toml::from_str(&raw)?;
        config.presenter.validate()?;
        config.classifier.validate()?;
        Ok(config)
    }
}
