//! Data models

pub mod health;
pub mod event;

pub use health::*;
pub use event::*;
