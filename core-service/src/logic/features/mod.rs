//! Features Module - Feature Vector Construction
//!
//! Turns a validated `Measurement` into the fixed-order vector the
//! scaler and classifier were fitted on.

pub mod layout;
pub mod vector;


// Re-export common types
pub use layout::{FEATURE_COUNT, FEATURE_LAYOUT, LayoutMismatchError, validate_layout};
pub use vector::FeatureVector;
