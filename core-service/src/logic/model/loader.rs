//! Model Loader - Guarded-once model state
//!
//! `ModelSource` knows how to produce a classifier; `SharedModel` makes
//! sure that happens at most once per process, even when the first
//! requests race each other.

use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

use once_cell::sync::OnceCell;
use serde::{Deserialize, Serialize};

use super::inference::{Classifier, InferenceError, OnnxClassifier};
use super::types::{ClassificationResult, ModelMetadata};
use crate::constants::{DOWNLOAD_TIMEOUT_SECS, MODEL_FILE_NAME, SCALER_FILE_NAME};
use crate::logic::features::FeatureVector;

// ============================================================================
// SOURCES
// ============================================================================

/// Produces a ready classifier + scaler pair
pub trait ModelSource: Send + Sync {
    fn load(&self) -> Result<Arc<dyn Classifier>, InferenceError>;

    /// Where the artifacts come from (for logs)
    fn describe(&self) -> String;
}

/// Artifacts on local disk
#[derive(Debug, Clone)]
pub struct FileModelSource {
    model_path: PathBuf,
    scaler_path: PathBuf,
}

impl FileModelSource {
    pub fn new(model_path: impl Into<PathBuf>, scaler_path: impl Into<PathBuf>) -> Self {
        Self {
            model_path: model_path.into(),
            scaler_path: scaler_path.into(),
        }
    }
}

impl ModelSource for FileModelSource {
    fn load(&self) -> Result<Arc<dyn Classifier>, InferenceError> {
        let classifier = OnnxClassifier::from_files(&self.model_path, &self.scaler_path)?;
        Ok(Arc::new(classifier))
    }

    fn describe(&self) -> String {
        format!("{} + {}", self.model_path.display(), self.scaler_path.display())
    }
}

/// Artifacts fetched over HTTP into a local cache on first use
#[derive(Debug, Clone)]
pub struct RemoteModelSource {
    base_url: String,
    cache_dir: PathBuf,
}

impl RemoteModelSource {
    pub fn new(base_url: impl Into<String>, cache_dir: impl Into<PathBuf>) -> Self {
        Self {
            base_url: base_url.into(),
            cache_dir: cache_dir.into(),
        }
    }

    pub fn artifact_url(&self, file_name: &str) -> String {
        format!("{}/{}", self.base_url.trim_end_matches('/'), file_name)
    }

    /// Download `file_name` unless it is already cached
    fn fetch(&self, file_name: &str) -> Result<PathBuf, InferenceError> {
        let target = self.cache_dir.join(file_name);
        if target.exists() {
            log::debug!("Using cached artifact {}", target.display());
            return Ok(target);
        }

        std::fs::create_dir_all(&self.cache_dir)
            .map_err(|e| InferenceError::Download(format!("{}: {}", self.cache_dir.display(), e)))?;

        let url = self.artifact_url(file_name);
        log::info!("Downloading {} -> {}", url, target.display());

        let agent = ureq::AgentBuilder::new()
            .timeout(Duration::from_secs(DOWNLOAD_TIMEOUT_SECS))
            .build();
        let response = agent
            .get(&url)
            .call()
            .map_err(|e| InferenceError::Download(format!("{}: {}", url, e)))?;

        persist(&mut response.into_reader(), &target)?;
        Ok(target)
    }
}

/// Stream into `<target>.partial`, then rename into place.
/// A partial download must never look like a cached artifact, so the
/// temp file is removed on any failure.
fn persist(reader: &mut dyn std::io::Read, target: &Path) -> Result<(), InferenceError> {
    let partial = target.with_extension("partial");

    let result = write_stream(reader, &partial).and_then(|()| {
        std::fs::rename(&partial, target)
            .map_err(|e| InferenceError::Download(format!("{}: {}", target.display(), e)))
    });

    if result.is_err() {
        if let Err(e) = std::fs::remove_file(&partial) {
            log::debug!("Could not remove {}: {}", partial.display(), e);
        }
    }
    result
}

fn write_stream(reader: &mut dyn std::io::Read, path: &Path) -> Result<(), InferenceError> {
    let mut file = std::fs::File::create(path)
        .map_err(|e| InferenceError::Download(format!("{}: {}", path.display(), e)))?;
    std::io::copy(reader, &mut file)
        .map_err(|e| InferenceError::Download(format!("{}: {}", path.display(), e)))?;
    Ok(())
}

impl ModelSource for RemoteModelSource {
    fn load(&self) -> Result<Arc<dyn Classifier>, InferenceError> {
        let model_path = self.fetch(MODEL_FILE_NAME)?;
        let scaler_path = self.fetch(SCALER_FILE_NAME)?;
        FileModelSource::new(model_path, scaler_path).load()
    }

    fn describe(&self) -> String {
        format!("{} (cache: {})", self.base_url, self.cache_dir.display())
    }
}

// ============================================================================
// SHARED MODEL
// ============================================================================

/// Engine Status for health checks
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EngineStatus {
    pub model_loaded: bool,
    pub metadata: Option<ModelMetadata>,
    pub avg_latency_ms: f32,
    pub inference_count: u64,
}

/// Lazily-loaded, read-only classifier shared by all requests
pub struct SharedModel {
    source: Box<dyn ModelSource>,
    classifier: OnceCell<Arc<dyn Classifier>>,
    latency_sum_us: AtomicU64,
    inference_count: AtomicU64,
}

impl SharedModel {
    pub fn new(source: Box<dyn ModelSource>) -> Self {
        Self {
            source,
            classifier: OnceCell::new(),
            latency_sum_us: AtomicU64::new(0),
            inference_count: AtomicU64::new(0),
        }
    }

    /// Get the classifier, loading it on first use
    ///
    /// Concurrent callers block until the single in-flight load finishes.
    /// A failed load leaves the cell empty so a later call can try again.
    pub fn get(&self) -> Result<Arc<dyn Classifier>, InferenceError> {
        self.classifier
            .get_or_try_init(|| {
                log::info!("Loading battery model from {}", self.source.describe());
                self.source.load().map_err(|e| {
                    log::warn!("Model load failed: {}", e);
                    e
                })
            })
            .map(Arc::clone)
    }

    pub fn is_loaded(&self) -> bool {
        self.classifier.get().is_some()
    }

    /// Run one prediction on an already-obtained classifier
    pub fn predict_with(
        &self,
        classifier: &dyn Classifier,
        features: &FeatureVector,
    ) -> Result<ClassificationResult, InferenceError> {
        let start = Instant::now();
        let result = classifier.predict(features);

        self.latency_sum_us
            .fetch_add(start.elapsed().as_micros() as u64, Ordering::Relaxed);
        self.inference_count.fetch_add(1, Ordering::Relaxed);

        result
    }

    pub fn status(&self) -> EngineStatus {
        let sum = self.latency_sum_us.load(Ordering::Relaxed);
        let count = self.inference_count.load(Ordering::Relaxed);
        let avg = if count > 0 { (sum as f32 / count as f32) / 1000.0 } else { 0.0 };

        EngineStatus {
            model_loaded: self.is_loaded(),
            metadata: self.classifier.get().map(|c| c.metadata()),
            avg_latency_ms: avg,
            inference_count: count,
        }
    }
}
