use crate::error::AppError;
use serde::Deserialize;
use std::path::{Path, PathBuf};

#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, Deserialize)]
pub enum ModelType {
    ConvNextBase,
    ConvNextLarge,
    MobileNetV3Large,
}

impl ModelType {
    /// (model file, label config file)
    fn file_names(&self) -> (&'static str, &'static str) {
        match self {
            ModelType::ConvNextBase => (
                "convnextv2-base-22k-384.onnx",
                "convnextv2-base-22k-384-config.json",
            ),
            ModelType::ConvNextLarge => (
                "convnextv2-large-22k-384.onnx",
                "convnextv2-large-22k-384-config.json",
            ),
            ModelType::MobileNetV3Large => ("mobilenetv3_large.onnx", "mobilenetv3_config.json"),
        }
    }

    pub fn crop_size(&self) -> u32 {
        match self {
            ModelType::ConvNextBase | ModelType::ConvNextLarge => 384,
            ModelType::MobileNetV3Large => 224,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ModelFiles {
    pub model_path: PathBuf,
    pub labels_path: PathBuf,
}

impl ModelFiles {
    pub fn locate(model_dir: &Path, model_type: ModelType) -> Self {
        let (model_file, labels_file) = model_type.file_names();
        Self {
            model_path: model_dir.join(model_file),
            labels_path: model_dir.join(labels_file),
        }
    }

    pub fn ensure_present(&self) -> Result<(), AppError> {
        for path in [&self.model_path, &self.labels_path] {
            if !path.exists() {
                return Err(format!("Model file not found: {}", path.display()).into());
            }
        }
        Ok(())
    }
}

/// Read the `id2label` table of a model config into a label vector indexed by
/// output position. Indices must run from 0 without gaps.
pub fn load_labels(config_path: &Path) -> Result<Vec<String>, AppError> {
    let config_content = std::fs::read_to_string(config_path).map_err(|e| AppError {
        message: format!("Failed to read config file {}: {}", config_path.display(), e),
    })?;

    let config: serde_json::Value = serde_json::from_str(&config_content).map_err(|e| AppError {
        message: format!("Failed to parse config JSON: {}", e),
    })?;

    let id2label = config["id2label"].as_object().ok_or_else(|| AppError {
        message: "Config missing id2label field".to_string(),
    })?;

    let mut labels: Vec<(usize, String)> = id2label
        .iter()
        .map(|(k, v)| {
            let idx = k.parse::<usize>().map_err(|_| AppError {
                message: format!("Invalid label index {:?}", k),
            })?;
            let label = v.as_str().unwrap_or("unknown").to_string();
            Ok((idx, label))
        })
        .collect::<Result<_, AppError>>()?;
    labels.sort_by_key(|(idx, _)| *idx);

    if let Some((position, (idx, _))) = labels
        .iter()
        .enumerate()
        .find(|(position, (idx, _))| position != idx)
    {
        return Err(format!(
            "Label indices are not contiguous: expected {}, found {}",
            position, idx
        )
        .into());
    }

    Ok(labels.into_iter().map(|(_, label)| label).collect())
}

#[cfg(feature = "onnx")]
pub fn load_session(
    model_path: &Path,
    use_gpu: bool,
    intra_threads: usize,
) -> Result<ort::session::Session, AppError> {
    use ort::execution_providers::{
        CPUExecutionProvider, CUDAExecutionProvider, CoreMLExecutionProvider,
    };
    use ort::session::builder::GraphOptimizationLevel;
    use ort::session::Session;

    let _ = ort::init().with_name("photo-label").commit();

    let mut builder = Session::builder()
        .map_err(|e| AppError { message: format!("Failed to create session builder: {}", e) })?
        .with_optimization_level(GraphOptimizationLevel::Level3)
        .map_err(|e| AppError { message: format!("Failed to set optimization level: {}", e) })?
        .with_intra_threads(intra_threads)
        .map_err(|e| AppError { message: format!("Failed to set intra threads: {}", e) })?;

    builder = if use_gpu {
        builder
            .with_execution_providers([
                CoreMLExecutionProvider::default().build(),
                CUDAExecutionProvider::default().build(),
                CPUExecutionProvider::default().build(),
            ])
            .map_err(|e| AppError {
                message: format!("Failed to register GPU execution providers: {}", e),
            })?
    } else {
        builder
            .with_execution_providers([CPUExecutionProvider::default().build()])
            .map_err(|e| AppError {
                message: format!("Failed to register CPU execution provider: {}", e),
            })?
    };

    builder.commit_from_file(model_path).map_err(|e| AppError {
        message: format!("Failed to load ONNX model {}: {}", model_path.display(), e),
    })
}
