//! Inference Engine - ONNX Runtime Integration
//!
//! Runs the exported battery classifier. Expected export (scikit-learn,
//! ZipMap disabled): input `[1, 5]` f32, output 0 = label (i64),
//! output 1 = probabilities (f32, `[1, 3]`).

use std::path::Path;

use ndarray::Array2;
use parking_lot::Mutex;
use ort::session::{Session, builder::GraphOptimizationLevel};
use ort::value::Value;
use sha2::{Digest, Sha256};
use thiserror::Error;

use super::scaler::StandardScaler;
use super::types::{ClassificationResult, ModelMetadata};
use crate::logic::features::{FeatureVector, LayoutMismatchError, FEATURE_COUNT};

// ============================================================================
// ERROR HANDLING
// ============================================================================

#[derive(Debug, Error)]
pub enum InferenceError {
    #[error("model artifact not found: {0}")]
    NotFound(String),

    #[error("failed to load model: {0}")]
    Load(String),

    #[error("scaler error: {0}")]
    Scaler(String),

    #[error(transparent)]
    Layout(#[from] LayoutMismatchError),

    #[error("download failed: {0}")]
    Download(String),

    #[error("inference failed: {0}")]
    Runtime(String),

    #[error("invalid model output: {0}")]
    InvalidOutput(String),
}

// ============================================================================
// CLASSIFIER TRAIT
// ============================================================================

/// Scaler + classifier as one opaque operation
pub trait Classifier: Send + Sync {
    fn predict(&self, features: &FeatureVector) -> Result<ClassificationResult, InferenceError>;
    fn metadata(&self) -> ModelMetadata;
}

// ============================================================================
// ONNX IMPLEMENTATION
// ============================================================================

pub struct OnnxClassifier {
    // `Session::run` needs `&mut`
    session: Mutex<Session>,
    scaler: StandardScaler,
    label_output: Option<String>,
    probability_output: String,
    metadata: ModelMetadata,
}

impl OnnxClassifier {
    /// Load classifier + scaler from disk
    pub fn from_files(model_path: &Path, scaler_path: &Path) -> Result<Self, InferenceError> {
        log::info!("Loading ONNX model from: {}", model_path.display());

        if !model_path.exists() {
            return Err(InferenceError::NotFound(model_path.display().to_string()));
        }

        let scaler = StandardScaler::from_file(scaler_path)?;
        let model_bytes = std::fs::read(model_path)
            .map_err(|e| InferenceError::Load(format!("{}: {}", model_path.display(), e)))?;

        Self::from_bytes(
            &model_bytes,
            scaler,
            &model_path.display().to_string(),
            &scaler_path.display().to_string(),
        )
    }

    /// Load classifier from memory
    pub fn from_bytes(
        model_bytes: &[u8],
        scaler: StandardScaler,
        model_name: &str,
        scaler_name: &str,
    ) -> Result<Self, InferenceError> {
        let session = Session::builder()
            .map_err(|e| InferenceError::Load(format!("Session builder error: {}", e)))?
            .with_optimization_level(GraphOptimizationLevel::Level3)
            .map_err(|e| InferenceError::Load(format!("Optimization error: {}", e)))?
            .commit_from_memory(model_bytes)
            .map_err(|e| InferenceError::Load(format!("Load from memory error: {}", e)))?;

        let output_names: Vec<String> = session.outputs.iter().map(|o| o.name.clone()).collect();
        let (label_output, probability_output) = select_outputs(&output_names)?;

        let metadata = ModelMetadata {
            model_path: model_name.to_string(),
            scaler_path: scaler_name.to_string(),
            checksum: hex::encode(Sha256::digest(model_bytes)),
            features: FEATURE_COUNT,
            runtime: "ONNX Runtime (CPU)".to_string(),
            loaded_at: chrono::Utc::now(),
        };

        log::info!(
            "ONNX model loaded: {} (sha256 {}, outputs {:?})",
            metadata.model_path,
            metadata.checksum,
            output_names
        );

        Ok(Self {
            session: Mutex::new(session),
            scaler,
            label_output,
            probability_output,
            metadata,
        })
    }
}

impl Classifier for OnnxClassifier {
    fn predict(&self, features: &FeatureVector) -> Result<ClassificationResult, InferenceError> {
        let input_array = build_input(&self.scaler, features)?;
        let input_tensor = Value::from_array(input_array)
            .map_err(|e| InferenceError::Runtime(format!("Tensor error: {}", e)))?;

        let mut session = self.session.lock();
        let outputs = session
            .run(ort::inputs![input_tensor])
            .map_err(|e| InferenceError::Runtime(e.to_string()))?;

        let probabilities: Vec<f32> = outputs
            .get(&self.probability_output)
            .ok_or_else(|| InferenceError::InvalidOutput(format!("missing output {}", self.probability_output)))?
            .try_extract_tensor::<f32>()
            .map_err(|e| InferenceError::InvalidOutput(format!("Extract error: {}", e)))?
            .1
            .to_vec();

        let label = match &self.label_output {
            Some(name) => outputs
                .get(name)
                .ok_or_else(|| InferenceError::InvalidOutput(format!("missing output {}", name)))?
                .try_extract_tensor::<i64>()
                .map_err(|e| InferenceError::InvalidOutput(format!("Extract error: {}", e)))?
                .1
                .first()
                .copied(),
            None => None,
        };

        decode_outputs(label, &probabilities)
    }

    fn metadata(&self) -> ModelMetadata {
        self.metadata.clone()
    }
}

// ============================================================================
// TENSOR PLUMBING
// ============================================================================

/// Pick `(label, probabilities)` output names: two outputs means label first,
/// a single output is the probability tensor
fn select_outputs(names: &[String]) -> Result<(Option<String>, String), InferenceError> {
    match names {
        [] => Err(InferenceError::Load("model defines no outputs".to_string())),
        [probabilities] => Ok((None, probabilities.clone())),
        [label, probabilities, ..] => Ok((Some(label.clone()), probabilities.clone())),
    }
}

/// Scaled features as a `[1, FEATURE_COUNT]` f32 batch
fn build_input(scaler: &StandardScaler, features: &FeatureVector) -> Result<Array2<f32>, InferenceError> {
    let scaled = scaler.transform(features);
    Array2::<f32>::from_shape_vec((1, FEATURE_COUNT), scaled.to_vec())
        .map_err(|e| InferenceError::Runtime(format!("Array error: {}", e)))
}

/// Turn raw outputs into a result; without a label the argmax wins
fn decode_outputs(label: Option<i64>, probabilities: &[f32]) -> Result<ClassificationResult, InferenceError> {
    match label {
        Some(label) => ClassificationResult::new(label, probabilities),
        None => ClassificationResult::from_probabilities(probabilities),
    }
}
