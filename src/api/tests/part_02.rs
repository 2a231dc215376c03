use axum::body::Body;
use axum::http::{Request, StatusCode};
use tower::util::ServiceExt;

use crate::api::test_helpers::*;
use crate::api::{
    create_router, AppState, ErrorResponse, HealthResponse, ModelInfoResponse, PredictResponse,
};
use crate::classifier::SeverityClass;
use crate::form::FormSubmission;
use crate::request::build_request;

async fn body_json<T: serde::de::DeserializeOwned>(response: axum::response::Response) -> T {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("test");
    serde_json::from_slice(&bytes).expect("test")
}

fn json_request(uri: &str, body: String) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body))
        .expect("test")
}

fn default_json() -> String {
    serde_json::to_string(&build_request(&FormSubmission::default())).expect("test")
}

// ===== POST /v1/predict =====

#[tokio::test]
async fn test_json_predict_returns_label_and_color() {
    let stub = CountingClassifier::new(SeverityClass::OverweightLevelII);
    let app = create_router(AppState::new(stub.clone()).expect("test"));

    let response = app
        .oneshot(json_request("/v1/predict", default_json()))
        .await
        .expect("test");
    assert_eq!(response.status(), StatusCode::OK);
    let result: PredictResponse = body_json(response).await;
    assert_eq!(result.label, "Overweight_Level_II");
    assert_eq!(result.display_name, "Overweight Level II");
    assert_eq!(result.color, "#FF8C00");
    assert_eq!(result.model_version, "test");
    assert!(result.latency_ms >= 0.0);
    assert_eq!(stub.calls(), 1);
}

#[tokio::test]
async fn test_json_predict_with_bundled_model() {
    let response = create_test_app()
        .oneshot(json_request("/v1/predict", default_json()))
        .await
        .expect("test");
    assert_eq!(response.status(), StatusCode::OK);
    let result: PredictResponse = body_json(response).await;
    assert!(result.label.parse::<SeverityClass>().is_ok());
}

#[tokio::test]
async fn test_json_predict_without_model() {
    let response = create_missing_model_app()
        .oneshot(json_request("/v1/predict", default_json()))
        .await
        .expect("test");
    assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
    let err: ErrorResponse = body_json(response).await;
    assert!(err.error.contains("Model not loaded"));
}

#[tokio::test]
async fn test_json_predict_malformed_without_model() {
    let response = create_missing_model_app()
        .oneshot(json_request("/v1/predict", r#"{"Gender": "Male"}"#.to_string()))
        .await
        .expect("test");
    assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
    let err: ErrorResponse = body_json(response).await;
    assert!(err.error.contains("Model not loaded"));
}

#[tokio::test]
async fn test_json_predict_missing_field_rejected() {
    let response = create_test_app()
        .oneshot(json_request("/v1/predict", r#"{"Gender": "Male"}"#.to_string()))
        .await
        .expect("test");
    assert!(response.status().is_client_error());
    let err: ErrorResponse = body_json(response).await;
    assert!(!err.error.is_empty());
}

#[tokio::test]
async fn test_json_predict_failure_is_server_error() {
    let app = create_router(AppState::new(FailingClassifier::new()).expect("test"));
    let response = app
        .oneshot(json_request("/v1/predict", default_json()))
        .await
        .expect("test");
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let err: ErrorResponse = body_json(response).await;
    assert!(err.error.contains("Prediction failed"));
}

// ===== GET /v1/model =====

#[tokio::test]
async fn test_model_info() {
    let response = create_test_app()
        .oneshot(Request::builder().uri("/v1/model").body(Body::empty()).expect("test"))
        .await
        .expect("test");
    assert_eq!(response.status(), StatusCode::OK);
    let info: ModelInfoResponse = body_json(response).await;
    assert_eq!(info.fields.len(), 16);
    assert_eq!(info.fields[0], "Gender");
    assert_eq!(info.classes.len(), 7);
    assert_eq!(info.name, "obesity_classifier_v2_optimized");
}

// ===== GET /health, /metrics =====

#[tokio::test]
async fn test_health_reports_model_state() {
    let response = create_test_app()
        .oneshot(Request::builder().uri("/health").body(Body::empty()).expect("test"))
        .await
        .expect("test");
    let health: HealthResponse = body_json(response).await;
    assert_eq!(health.status, "healthy");
    assert!(health.model_loaded);

    let response = create_missing_model_app()
        .oneshot(Request::builder().uri("/health").body(Body::empty()).expect("test"))
        .await
        .expect("test");
    let health: HealthResponse = body_json(response).await;
    assert_eq!(health.status, "degraded");
    assert!(!health.model_loaded);
}

#[tokio::test]
async fn test_metrics_count_predictions() {
    let stub = CountingClassifier::new(SeverityClass::NormalWeight);
    let state = AppState::new(stub).expect("test");
    let app = create_router(state.clone());

    let response = app
        .clone()
        .oneshot(json_request("/v1/predict", default_json()))
        .await
        .expect("test");
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(state.metrics().snapshot().successful_requests, 1);

    let response = app
        .oneshot(Request::builder().uri("/metrics").body(Body::empty()).expect("test"))
        .await
        .expect("test");
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("test");
    let text = String::from_utf8(bytes.to_vec()).expect("test");
    assert!(text.contains("obesity_predictions_total 1"));
    assert!(text.contains("obesity_predictions_by_class{class=\"Normal_Weight\"} 1"));
}
