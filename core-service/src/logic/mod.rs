//! Logic Module - Diagnostic Pipeline
//!
//! - `measurement` - input validation (raw JSON -> Measurement)
//! - `features` - fixed-order feature vector
//! - `model` - scaler + classifier adapter, guarded-once loading
//! - `diagnosis` - risk factors, recommendations, report
//! - `pipeline` - wires the above together

pub mod measurement;
pub mod features;
pub mod model;
pub mod diagnosis;
pub mod pipeline;
