//! Battery Health Prediction API
//!
//! HTTP front end for the shared diagnostic pipeline.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────┐
//! │                 BATTERY HEALTH API                       │
//! ├──────────────────────────────────────────────────────────┤
//! │  ┌──────────────┐  ┌──────────────┐  ┌────────────────┐  │
//! │  │ /api/predict │  │ /api/invoke  │  │ /health        │  │
//! │  │ (JSON)       │  │ (serverless) │  │                │  │
//! │  └──────┬───────┘  └──────┬───────┘  └───────┬────────┘  │
//! │         └─────────────────┼──────────────────┘           │
//! │                           ▼                              │
//! │              battery-health-core pipeline                │
//! │      validate → features → classify → diagnose           │
//! └──────────────────────────────────────────────────────────┘
//! ```

mod config;
mod models;
mod handlers;
mod error;

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Context;
use axum::{
    Router,
    http::{header, Method},
    routing::{get, post},
};
use tower_http::{
    cors::{CorsLayer, Any},
    trace::TraceLayer,
    compression::CompressionLayer,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use battery_health_core::SharedModel;

pub use error::{AppError, AppResult};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load configuration
    dotenvy::dotenv().ok();
    let config = config::Config::from_env();

    // Initialize logging
    init_tracing(&config);

    tracing::info!("Battery Health API starting ({})...", config.environment);
    tracing::info!("Model source: {}", config.model.describe());

    let model = Arc::new(SharedModel::new(config.model.clone().into_source()));

    if config.preload_model {
        tracing::info!("Preloading model...");
        let preload = Arc::clone(&model);
        match tokio::task::spawn_blocking(move || preload.get().map(|_| ())).await? {
            Ok(()) => tracing::info!("Model ready"),
            // Keep serving: requests report 503 until a later load succeeds
            Err(e) => tracing::warn!("Model preload failed: {}", e),
        }
    }

    // Build application state
    let state = AppState {
        model,
        config: config.clone(),
    };

    // Build router
    let app = create_router(state);

    // Start server
    let addr: SocketAddr = config
        .bind_address()
        .parse()
        .with_context(|| format!("invalid bind address {}", config.bind_address()))?;
    tracing::info!("🚀 Server listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {}", addr))?;
    axum::serve(listener, app).await?;

    Ok(())
}

fn init_tracing(config: &config::Config) {
    let default_filter = if config.is_production() {
        "battery_health_api=info,tower_http=info"
    } else {
        "battery_health_api=debug,tower_http=debug"
    };
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| default_filter.into());

    let (json_layer, text_layer) = if config.json_logs() {
        (Some(tracing_subscriber::fmt::layer().json()), None)
    } else {
        (None, Some(tracing_subscriber::fmt::layer()))
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(json_layer)
        .with(text_layer)
        .init();
}

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub model: Arc<SharedModel>,
    pub config: config::Config,
}

/// Create the main router with all routes
fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(handlers::health::check))
        .route("/api/health", get(handlers::health::check))
        .route("/api/predict", post(handlers::predict::predict))
        .route("/api/invoke", post(handlers::invoke::invoke))
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
                .allow_headers([header::CONTENT_TYPE])
        )
        .with_state(state)
}

#[cfg(test)]
mod tests;
