//! Router tests
//!
//! Exercise the HTTP surface end to end with a stub model source.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use axum::{
    body::{to_bytes, Body},
    http::{Request, StatusCode},
    Router,
};
use serde_json::{json, Value};
use tower::ServiceExt;

use battery_health_core::{
    ClassificationResult, Classifier, FeatureVector, InferenceError, ModelConfig, ModelMetadata,
    ModelSource, SharedModel,
};

use crate::handlers::invoke::handle_event;
use crate::models::ServerlessEvent;
use crate::{config::Config, create_router, AppState};

struct FixedClassifier {
    label: i64,
    probabilities: [f32; 3],
}

impl Classifier for FixedClassifier {
    fn predict(&self, _: &FeatureVector) -> Result<ClassificationResult, InferenceError> {
        ClassificationResult::new(self.label, &self.probabilities)
    }

    fn metadata(&self) -> ModelMetadata {
        ModelMetadata {
            model_path: "fixed.onnx".to_string(),
            scaler_path: "fixed.json".to_string(),
            checksum: "abc123".to_string(),
            features: 5,
            runtime: "test".to_string(),
            loaded_at: chrono::Utc::now(),
        }
    }
}

struct StubSource {
    available: bool,
    loads: Arc<AtomicUsize>,
}

impl ModelSource for StubSource {
    fn load(&self) -> Result<Arc<dyn Classifier>, InferenceError> {
        self.loads.fetch_add(1, Ordering::SeqCst);
        if !self.available {
            return Err(InferenceError::NotFound("models/battery_model.onnx".to_string()));
        }
        Ok(Arc::new(FixedClassifier {
            label: 0,
            probabilities: [0.92, 0.06, 0.02],
        }))
    }

    fn describe(&self) -> String {
        "stub".to_string()
    }
}

fn test_state(available: bool) -> (AppState, Arc<AtomicUsize>) {
    let loads = Arc::new(AtomicUsize::new(0));
    let source = StubSource {
        available,
        loads: Arc::clone(&loads),
    };
    let state = AppState {
        model: Arc::new(SharedModel::new(Box::new(source))),
        config: Config {
            host: "127.0.0.1".to_string(),
            port: 0,
            environment: "test".to_string(),
            preload_model: false,
            log_format: "text".to_string(),
            model: ModelConfig::default(),
        },
    };
    (state, loads)
}

fn app(available: bool) -> Router {
    create_router(test_state(available).0)
}

fn post_json(uri: &str, body: &str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

async fn read_json(response: axum::response::Response) -> Value {
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

fn healthy_body() -> Value {
    json!({
        "voltage": 12.6,
        "current": 150,
        "temperature": 25,
        "age_months": 24,
        "resistance": 0.03
    })
}

#[tokio::test]
async fn test_predict_success() {
    let response = app(true)
        .oneshot(post_json("/api/predict", &healthy_body().to_string()))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = read_json(response).await;
    assert_eq!(body["status"], "Healthy ✅");
    assert_eq!(body["prediction"], 0);
    assert_eq!(body["confidence"], 92.0);
    assert_eq!(body["probabilities"]["healthy"], 92.0);
    assert_eq!(body["risk_factors"], json!([]));
    assert_eq!(
        body["recommendations"],
        json!(["Battery is in good condition", "Regular maintenance recommended"])
    );
    assert_eq!(body["input_values"]["voltage"], 12.6);
}

#[tokio::test]
async fn test_predict_missing_field() {
    let response = app(true)
        .oneshot(post_json(
            "/api/predict",
            r#"{"voltage": 12.6, "current": 150, "temperature": 25}"#,
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(read_json(response).await["error"], "Missing field: age_months");
}

#[tokio::test]
async fn test_predict_out_of_range_names_bounds() {
    let mut body = healthy_body();
    body["voltage"] = json!(14.2);

    let response = app(true)
        .oneshot(post_json("/api/predict", &body.to_string()))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(read_json(response).await["error"], "voltage must be between 10.5 and 13");
}

#[tokio::test]
async fn test_predict_rejects_non_object_and_bad_json() {
    let response = app(true)
        .oneshot(post_json("/api/predict", "[1, 2, 3]"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let response = app(true)
        .oneshot(post_json("/api/predict", "{not json"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert!(read_json(response).await["error"].is_string());
}

#[tokio::test]
async fn test_predict_model_unavailable() {
    let response = app(false)
        .oneshot(post_json("/api/predict", &healthy_body().to_string()))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);

    let body = read_json(response).await;
    assert_eq!(body["error"], "Failed to load ML models");
    assert_eq!(body["status"], 503);
}

#[tokio::test]
async fn test_health_reports_lazy_model() {
    let (state, loads) = test_state(true);
    let router = create_router(state);

    let response = router
        .clone()
        .oneshot(Request::get("/api/health").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = read_json(response).await;
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["model_loaded"], false);
    assert_eq!(loads.load(Ordering::SeqCst), 0);

    router
        .clone()
        .oneshot(post_json("/api/predict", &healthy_body().to_string()))
        .await
        .unwrap();

    let response = router
        .oneshot(Request::get("/health").body(Body::empty()).unwrap())
        .await
        .unwrap();
    let body = read_json(response).await;
    assert_eq!(body["model_loaded"], true);
    assert_eq!(body["model_checksum"], "abc123");
    assert_eq!(body["inference_count"], 1);
}

#[tokio::test]
async fn test_predict_requires_post() {
    let response = app(true)
        .oneshot(Request::get("/api/predict").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
}

#[tokio::test]
async fn test_cors_headers_present() {
    let request = Request::builder()
        .method("POST")
        .uri("/api/predict")
        .header("content-type", "application/json")
        .header("origin", "https://battery.example.com")
        .body(Body::from(healthy_body().to_string()))
        .unwrap();

    let response = app(true).oneshot(request).await.unwrap();
    assert_eq!(
        response.headers().get("access-control-allow-origin").unwrap(),
        "*"
    );
}

// ============================================================================
// SERVERLESS ADAPTER
// ============================================================================

fn event(method: &str, path: &str, body: Option<&str>) -> ServerlessEvent {
    ServerlessEvent {
        http_method: method.to_string(),
        path: path.to_string(),
        body: body.map(|b| b.to_string()),
    }
}

#[tokio::test]
async fn test_event_preflight() {
    let (state, _) = test_state(true);
    let response = handle_event(&state, event("OPTIONS", "/api/predict", None)).await;

    assert_eq!(response.status_code, 200);
    assert!(response.body.is_empty());
    assert_eq!(response.headers["Access-Control-Allow-Methods"], "GET, POST, OPTIONS");
}

#[tokio::test]
async fn test_event_health_on_get() {
    let (state, loads) = test_state(true);
    let response = handle_event(&state, event("GET", "/", None)).await;

    assert_eq!(response.status_code, 200);
    let body: Value = serde_json::from_str(&response.body).unwrap();
    assert_eq!(body["service"], "Battery Health Prediction API");
    assert_eq!(loads.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn test_event_predict() {
    let (state, _) = test_state(true);
    let body = healthy_body().to_string();
    let response = handle_event(&state, event("POST", "/api/predict", Some(&body))).await;

    assert_eq!(response.status_code, 200);
    assert_eq!(response.headers["Content-Type"], "application/json");
    let report: Value = serde_json::from_str(&response.body).unwrap();
    assert_eq!(report["confidence"], 92.0);
}

#[tokio::test]
async fn test_event_errors() {
    let (state, _) = test_state(true);

    let response = handle_event(&state, event("POST", "/api/predict", None)).await;
    assert_eq!(response.status_code, 400);
    let body: Value = serde_json::from_str(&response.body).unwrap();
    assert_eq!(body["error"], "Missing field: voltage");

    let response = handle_event(&state, event("POST", "/api/predict", Some("not json"))).await;
    assert_eq!(response.status_code, 400);

    let response = handle_event(&state, event("DELETE", "/api/predict", None)).await;
    assert_eq!(response.status_code, 405);
    let body: Value = serde_json::from_str(&response.body).unwrap();
    assert_eq!(body["error"], "Method not allowed");

    let (state, _) = test_state(false);
    let body = healthy_body().to_string();
    let response = handle_event(&state, event("POST", "/api/predict", Some(&body))).await;
    assert_eq!(response.status_code, 503);
}

#[tokio::test]
async fn test_invoke_route() {
    let envelope = json!({
        "httpMethod": "POST",
        "path": "/api/predict",
        "body": healthy_body().to_string()
    });
    let response = app(true)
        .oneshot(post_json("/api/invoke", &envelope.to_string()))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = read_json(response).await;
    assert_eq!(body["statusCode"], 200);
    let report: Value = serde_json::from_str(body["body"].as_str().unwrap()).unwrap();
    assert_eq!(report["status"], "Healthy ✅");
}

#[test]
fn test_concurrent_requests_share_one_load() {
    let (state, loads) = test_state(true);
    let router = create_router(state);

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .worker_threads(4)
        .enable_all()
        .build()
        .unwrap();

    let statuses = runtime.block_on(async {
        let handles: Vec<_> = (0..16)
            .map(|_| {
                let router = router.clone();
                tokio::spawn(async move {
                    router
                        .oneshot(post_json("/api/predict", &healthy_body().to_string()))
                        .await
                        .map(|r| r.status())
                })
            })
            .collect();

        let mut statuses = Vec::new();
        for handle in handles {
            let status = tokio_test::assert_ok!(handle.await.unwrap());
            statuses.push(status);
        }
        statuses
    });

    assert!(statuses.iter().all(|s| *s == StatusCode::OK));
    assert_eq!(loads.load(Ordering::SeqCst), 1);
}
