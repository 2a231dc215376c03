//! HTTP front-end for the classifier
//!
//! Serves the assessment form and the prediction API using axum.
//!
//! ## Endpoints
//!
//! - `GET /` - Assessment form (or the load error, when the model is missing)
//! - `POST /predict` - Form submission; re-renders the form with the result card
//! - `POST /v1/predict` - JSON prediction for one record
//! - `GET /v1/model` - Loaded model description
//! - `GET /health` - Health check
//! - `GET /metrics` - Prometheus-formatted metrics
//!
//! ## Example
//!
//! ```rust,ignore
//! use obesity_risk::api::{create_router, AppState};
//!
//! let state = AppState::from_load(load_model(&path))?;
//! let app = create_router(state);
//! axum::serve(listener, app).await?;
//! ```

use std::sync::Arc;
use std::time::{Duration, Instant};

use axum::{
    extract::{
        rejection::{FormRejection, JsonRejection},
        State,
    },
    http::StatusCode,
    response::{Html, IntoResponse, Response},
    routing::{get, post},
    Form, Json, Router,
};
use tracing::{debug, warn};

use crate::{
    classifier::{Classifier, PredictionError, SeverityClass},
    error::Result,
    forest::ForestClassifier,
    form::FormSubmission,
    metrics::MetricsCollector,
    model_loader::LoadError,
    presentation::{color_for, display_text, format_accuracy, ResultCard},
    record::Record,
    request::{build_record, PredictionRequest, FIELD_NAMES},
    ui::Pages,
};

mod types;
pub use types::{ErrorResponse, HealthResponse, ModelInfoResponse, PredictResponse};

const DEMO_MODEL: &str = include_str!("../../models/obesity_classifier_v2_optimized.json");

/// Model availability, fixed at startup
#[derive(Clone)]
enum ModelSlot {
    /// Loaded and shared read-only by every request
    Ready(Arc<dyn Classifier>),
    /// Load failed; the message is shown instead of the form
    Failed(Arc<str>),
}

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    /// Classifier, loaded once per process
    model: ModelSlot,
    /// Compiled page templates
    pages: Arc<Pages>,
    /// Metrics collector for monitoring
    metrics: Arc<MetricsCollector>,
}

impl AppState {
    /// Create state around a loaded classifier
    ///
    /// # Errors
    ///
    /// Returns error if the page templates fail to compile.
    pub fn new(model: Arc<dyn Classifier>) -> Result<Self> {
        Self::with_slot(ModelSlot::Ready(model))
    }

    /// Create state for a session whose model failed to load
    ///
    /// Every page shows the error and no submission is accepted.
    ///
    /// # Errors
    ///
    /// Returns error if the page templates fail to compile.
    pub fn load_failed(error: &LoadError) -> Result<Self> {
        Self::with_slot(ModelSlot::Failed(Arc::from(error.to_string())))
    }

    /// Create state from the outcome of loading the model
    ///
    /// # Errors
    ///
    /// Returns error if the page templates fail to compile.
    pub fn from_load(result: std::result::Result<ForestClassifier, LoadError>) -> Result<Self> {
        match result {
            Ok(model) => Self::new(Arc::new(model)),
            Err(e) => Self::load_failed(&e),
        }
    }

    /// Create state with the bundled demo model
    ///
    /// # Errors
    ///
    /// Returns error if the bundled artifact or templates are invalid.
    pub fn demo() -> Result<Self> {
        let model = ForestClassifier::from_json(DEMO_MODEL)?;
        Self::new(Arc::new(model))
    }

    fn with_slot(model: ModelSlot) -> Result<Self> {
        Ok(Self {
            model,
            pages: Arc::new(Pages::new()?),
            metrics: Arc::new(MetricsCollector::new()),
        })
    }

    /// Whether the classifier is available
    #[must_use]
    pub fn has_model(&self) -> bool {
        matches!(self.model, ModelSlot::Ready(_))
    }

    /// Metrics collector
    #[must_use]
    pub fn metrics(&self) -> &MetricsCollector {
        &self.metrics
    }

    /// Invoke the classifier once, recording metrics
    fn classify(
        &self,
        model: &dyn Classifier,
        record: &Record,
    ) -> std::result::Result<(SeverityClass, Duration), PredictionError> {
        let start = Instant::now();
        match model.predict(record) {
            Ok(class) => {
                let elapsed = start.elapsed();
                self.metrics.record_success(class, elapsed);
                debug!(label = %class, latency_ms = elapsed.as_secs_f64() * 1000.0, "Prediction");
                Ok((class, elapsed))
            }
            Err(e) => {
                self.metrics.record_failure();
                warn!(error = %e, "Prediction failed");
                Err(e)
            }
        }
    }
}

/// Create the API router
///
/// # Arguments
///
/// * `state` - Application state with the loaded (or failed) model
pub fn create_router(state: AppState) -> Router {
    Router::new()
        // Interactive UI
        .route("/", get(index_handler))
        .route("/predict", post(predict_form_handler))
        // JSON API
        .route("/v1/predict", post(predict_json_handler))
        .route("/v1/model", get(model_info_handler))
        // Health and metrics
        .route("/health", get(health_handler))
        .route("/metrics", get(metrics_handler))
        .with_state(state)
}

// ============================================================================
// UI handlers
// ============================================================================

/// Plain-text fallback when the page template itself fails
fn render_error(err: &crate::error::Error) -> Response {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        format!("Internal error: {err}"),
    )
        .into_response()
}

fn page(status: StatusCode, rendered: Result<String>) -> Response {
    match rendered {
        Ok(html) => (status, Html(html)).into_response(),
        Err(e) => render_error(&e),
    }
}

fn accuracy_of(model: &dyn Classifier) -> Option<String> {
    model.metadata().accuracy.map(format_accuracy)
}

/// Assessment form with default values
async fn index_handler(State(state): State<AppState>) -> Response {
    let model = match &state.model {
        ModelSlot::Ready(model) => model,
        ModelSlot::Failed(message) => {
            return page(StatusCode::SERVICE_UNAVAILABLE, state.pages.load_failure(message))
        },
    };
    let accuracy = accuracy_of(model.as_ref());
    page(
        StatusCode::OK,
        state.pages.form(&FormSubmission::default(), None, accuracy.as_deref()),
    )
}

/// Form submission: build the record, classify, render the result card
///
/// The model slot is checked before the body is decoded, so a halted
/// session answers every submission with the load failure.
async fn predict_form_handler(
    State(state): State<AppState>,
    form: std::result::Result<Form<FormSubmission>, FormRejection>,
) -> Response {
    let model = match &state.model {
        ModelSlot::Ready(model) => model.clone(),
        ModelSlot::Failed(message) => {
            return page(StatusCode::SERVICE_UNAVAILABLE, state.pages.load_failure(message))
        },
    };
    let form = match form {
        Ok(Form(form)) => form.clamped(),
        Err(rejection) => {
            let status = rejection.status();
            return page(status, state.pages.error(&rejection.body_text()));
        },
    };

    let record = build_record(&form);
    let class = match state.classify(model.as_ref(), &record) {
        Ok((class, _)) => class,
        Err(e) => {
            let message = format!("Prediction failed: {e}");
            return page(StatusCode::INTERNAL_SERVER_ERROR, state.pages.error(&message));
        },
    };

    let card = ResultCard::new(class, model.metadata().accuracy);
    page(
        StatusCode::OK,
        state.pages.form(&form, Some(&card), card.accuracy.as_deref()),
    )
}

// ============================================================================
// JSON API handlers
// ============================================================================

type JsonError = (StatusCode, Json<ErrorResponse>);

fn json_error(status: StatusCode, error: String) -> JsonError {
    (status, Json(ErrorResponse { error }))
}

fn ready_model(state: &AppState) -> std::result::Result<Arc<dyn Classifier>, JsonError> {
    match &state.model {
        ModelSlot::Ready(model) => Ok(model.clone()),
        ModelSlot::Failed(message) => Err(json_error(
            StatusCode::SERVICE_UNAVAILABLE,
            format!("Model not loaded: {message}"),
        )),
    }
}

/// JSON prediction handler (/v1/predict)
async fn predict_json_handler(
    State(state): State<AppState>,
    request: std::result::Result<Json<PredictionRequest>, JsonRejection>,
) -> std::result::Result<Json<PredictResponse>, JsonError> {
    let model = ready_model(&state)?;
    let Json(request) = request.map_err(|r| json_error(r.status(), r.body_text()))?;
    let record = request.to_record();
    let (class, elapsed) = state.classify(model.as_ref(), &record).map_err(|e| {
        json_error(
            StatusCode::INTERNAL_SERVER_ERROR,
            format!("Prediction failed: {e}"),
        )
    })?;

    Ok(Json(PredictResponse {
        label: class.as_str().to_string(),
        display_name: display_text(class.as_str()),
        color: color_for(class.as_str()).to_string(),
        model_version: model.metadata().version.clone(),
        latency_ms: elapsed.as_secs_f64() * 1000.0,
    }))
}

/// Loaded model description (/v1/model)
async fn model_info_handler(
    State(state): State<AppState>,
) -> std::result::Result<Json<ModelInfoResponse>, JsonError> {
    let model = ready_model(&state)?;
    let meta = model.metadata();
    Ok(Json(ModelInfoResponse {
        name: meta.name.clone(),
        version: meta.version.clone(),
        accuracy: meta.accuracy,
        fields: FIELD_NAMES.iter().map(ToString::to_string).collect(),
        classes: SeverityClass::ALL.iter().map(ToString::to_string).collect(),
    }))
}

/// Health check handler
async fn health_handler(State(state): State<AppState>) -> Json<HealthResponse> {
    let model_loaded = state.has_model();
    Json(HealthResponse {
        status: if model_loaded { "healthy" } else { "degraded" }.to_string(),
        version: crate::VERSION.to_string(),
        model_loaded,
    })
}

/// Metrics handler - returns Prometheus-formatted metrics
async fn metrics_handler(State(state): State<AppState>) -> String {
    state.metrics.to_prometheus()
}

#[cfg(test)]
pub(crate) mod test_helpers;

#[cfg(test)]
mod tests;
