//! Model Module - Classifier Adapter
//!
//! The scaler + classifier pair is opaque to the rest of the pipeline:
//! callers only see `Classifier::predict` and `ModelSource::load`.
//! `SharedModel` owns the process-wide, load-once instance.

pub mod types;
pub mod scaler;
pub mod inference;
pub mod loader;

// Re-export common types
pub use types::{ClassificationResult, HealthClass, ModelMetadata, CLASS_COUNT};
pub use scaler::StandardScaler;
pub use inference::{Classifier, InferenceError, OnnxClassifier};
pub use loader::{EngineStatus, FileModelSource, ModelSource, RemoteModelSource, SharedModel};
