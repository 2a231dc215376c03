//! API request/response types

use serde::{Deserialize, Serialize};

/// Health check response
#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    /// "healthy" when the model is loaded, "degraded" otherwise
    pub status: String,
    /// Service version
    pub version: String,
    /// Whether the classifier is available
    pub model_loaded: bool,
}

/// Prediction response for `/v1/predict`
#[derive(Debug, Serialize, Deserialize)]
pub struct PredictResponse {
    /// Predicted label from the closed severity set
    pub label: String,
    /// Label with underscores replaced by spaces
    pub display_name: String,
    /// Display color for the label
    pub color: String,
    /// Version of the model that produced the label
    pub model_version: String,
    /// Classifier latency in milliseconds
    pub latency_ms: f64,
}

/// Model description for `/v1/model`
#[derive(Debug, Serialize, Deserialize)]
pub struct ModelInfoResponse {
    /// Model name
    pub name: String,
    /// Model version
    pub version: String,
    /// Reported accuracy (0..1)
    pub accuracy: Option<f64>,
    /// Input fields in schema order
    pub fields: Vec<String>,
    /// Output labels, least to most severe
    pub classes: Vec<String>,
}

/// Error response
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Error message
    pub error: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_health_response_format() {
        let response = HealthResponse {
            status: "healthy".to_string(),
            version: "0.2.0".to_string(),
            model_loaded: true,
        };
        let json = serde_json::to_string(&response).expect("test");
        assert!(json.contains("healthy"));
        assert!(json.contains("\"model_loaded\":true"));
    }

    #[test]
    fn test_predict_response_format() {
        let response = PredictResponse {
            label: "Normal_Weight".to_string(),
            display_name: "Normal Weight".to_string(),
            color: "#2e7d32".to_string(),
            model_version: "2.0.0".to_string(),
            latency_ms: 0.12,
        };
        let json = serde_json::to_string(&response).expect("test");
        assert!(json.contains("Normal_Weight"));
        assert!(json.contains("#2e7d32"));
        assert!(json.contains("0.12"));
    }

    #[test]
    fn test_error_response_format() {
        let response = ErrorResponse {
            error: "Model not loaded".to_string(),
        };
        let json = serde_json::to_string(&response).expect("test");
        assert_eq!(json, r#"{"error":"Model not loaded"}"#);
    }
}
