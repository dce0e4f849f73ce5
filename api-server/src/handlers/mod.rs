//! HTTP handlers

pub mod health;
pub mod predict;
pub mod invoke;
