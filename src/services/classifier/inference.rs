use crate::models::prediction_types::Prediction;

#[cfg(feature = "onnx")]
pub use self::onnx_io::{preprocess_image, run_inference};

/// Softmax the raw logits and keep the `top_k` most confident labels, best
/// first. Indices without a label are named `class_<idx>`.
pub fn rank_logits(logits: &[f32], labels: &[String], top_k: usize) -> Vec<Prediction> {
    if logits.is_empty() {
        return Vec::new();
    }

    let max_logit = logits.iter().fold(f32::NEG_INFINITY, |a, &b| a.max(b));
    let exp_sum: f32 = logits.iter().map(|&x| (x - max_logit).exp()).sum();

    let mut indexed: Vec<(usize, f32)> = logits
        .iter()
        .map(|&x| (x - max_logit).exp() / exp_sum)
        .enumerate()
        .collect();
    indexed.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(std::cmp::Ordering::Equal));
    indexed.truncate(top_k);

    indexed
        .into_iter()
        .map(|(idx, confidence)| {
            let classification = labels
                .get(idx)
                .cloned()
                .unwrap_or_else(|| format!("class_{}", idx));
            Prediction {
                classification,
                confidence,
            }
        })
        .collect()
}

#[cfg(feature = "onnx")]
mod onnx_io {
    use super::rank_logits;
    use crate::error::AppError;
    use crate::models::prediction_types::Prediction;
    use image::DynamicImage;
    use ndarray::Array4;
    use ort::session::Session;
    use ort::value::Value;

    const CROP_PCT: f32 = 0.875;

    // ImageNet normalization constants
    const MEAN: [f32; 3] = [0.485, 0.456, 0.406];
    const STD: [f32; 3] = [0.229, 0.224, 0.225];

    /// Shortest-edge resize to `crop_size / CROP_PCT`, center crop, then
    /// normalize into a 1x3xHxW tensor.
    pub fn preprocess_image(img: &DynamicImage, crop_size: u32) -> Result<Array4<f32>, AppError> {
        let resize_size = (crop_size as f32 / CROP_PCT).ceil() as u32;
        let (w, h) = (img.width().max(1), img.height().max(1));
        let (new_w, new_h) = if w < h {
            (resize_size, ((h as f32 / w as f32) * resize_size as f32).round() as u32)
        } else {
            (((w as f32 / h as f32) * resize_size as f32).round() as u32, resize_size)
        };
        let resized = img.resize_exact(new_w, new_h, image::imageops::FilterType::Triangle);

        let crop_x = new_w.saturating_sub(crop_size) / 2;
        let crop_y = new_h.saturating_sub(crop_size) / 2;
        let rgb = resized.crop_imm(crop_x, crop_y, crop_size, crop_size).to_rgb8();

        let side = crop_size as usize;
        let hw = side * side;
        let mut data = vec![0f32; 3 * hw];
        for (i, pixel) in rgb.into_raw().chunks_exact(3).enumerate() {
            for c in 0..3 {
                data[c * hw + i] = (pixel[c] as f32 / 255.0 - MEAN[c]) / STD[c];
            }
        }

        Array4::from_shape_vec((1, 3, side, side), data).map_err(|e| AppError {
            message: format!("Failed to create tensor: {}", e),
        })
    }

    pub fn run_inference(
        session: &mut Session,
        input: Array4<f32>,
        labels: &[String],
        top_k: usize,
    ) -> Result<Vec<Prediction>, AppError> {
        let input_name = session.inputs()[0].name().to_string();

        let input_tensor = Value::from_array(input).map_err(|e| AppError {
            message: format!("Failed to create tensor value: {}", e),
        })?;

        let outputs = session
            .run(ort::inputs![input_name.as_str() => input_tensor])
            .map_err(|e| AppError {
                message: format!("Inference failed: {}", e),
            })?;

        let output_value = outputs.values().next().ok_or_else(|| AppError {
            message: "Model produced no outputs".to_string(),
        })?;

        let (_, logits) = output_value.try_extract_tensor::<f32>().map_err(|e| AppError {
            message: format!("Failed to extract output tensor: {}", e),
        })?;

        Ok(rank_logits(logits, labels, top_k))
    }
}
