use serde::Serialize;
use std::fmt;
use thiserror::Error;

#[derive(Debug, Serialize, Clone, PartialEq)]
pub struct AppError {
    pub message: String,
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for AppError {}

impl From<std::io::Error> for AppError {
    fn from(err: std::io::Error) -> Self {
        AppError {
            message: err.to_string(),
        }
    }
}

impl From<image::ImageError> for AppError {
    fn from(err: image::ImageError) -> Self {
        AppError {
            message: err.to_string(),
        }
    }
}

impl From<toml::de::Error> for AppError {
    fn from(err: toml::de::Error) -> Self {
        AppError {
            message: format!("Invalid configuration: {}", err),
        }
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError {
            message: err.to_string(),
        }
    }
}

#[cfg(feature = "onnx")]
impl From<ort::Error> for AppError {
    fn from(err: ort::Error) -> Self {
        AppError {
            message: err.to_string(),
        }
    }
}

impl From<String> for AppError {
    fn from(msg: String) -> Self {
        AppError { message: msg }
    }
}

impl From<&str> for AppError {
    fn from(msg: &str) -> Self {
        AppError {
            message: msg.to_string(),
        }
    }
}

/// The single failure signal a prediction request can produce.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum PredictionError {
    /// The photo could not be turned into an upright bitmap. Retrying with the
    /// same photo will fail the same way.
    #[error("invalid input image: {0}")]
    InvalidInput(String),
    /// The classifier itself failed to produce a usable result.
    #[error("classification failed: {0}")]
    Classification(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PredictionErrorKind {
    InvalidInput,
    Classification,
}

impl PredictionError {
    pub fn kind(&self) -> PredictionErrorKind {
        match self {
            PredictionError::InvalidInput(_) => PredictionErrorKind::InvalidInput,
            PredictionError::Classification(_) => PredictionErrorKind::Classification,
        }
    }
}

impl From<AppError> for PredictionError {
    fn from(err: AppError) -> Self {
        PredictionError::Classification(err.message)
    }
}

impl fmt::Display for PredictionErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PredictionErrorKind::InvalidInput => write!(f, "invalid_input"),
            PredictionErrorKind::Classification => write!(f, "classification"),
        }
    }
}
