//! Integration tests for loading model artifacts from disk
//!
//! Covers the failure modes a deployment can hit (missing file, garbage,
//! structurally invalid artifacts) and end-to-end prediction with the
//! bundled artifact.

use std::io::Write;
use std::path::{Path, PathBuf};

use obesity_risk::form::FormSubmission;
use obesity_risk::model_loader::{model_path_for_exe, MODEL_FILE_NAME};
use obesity_risk::request::build_record;
use obesity_risk::{load_model, Classifier, LoadError, PredictionError, Record, SeverityClass};
use tempfile::TempDir;

fn bundled_model_path() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("models")
        .join(MODEL_FILE_NAME)
}

fn write_artifact(dir: &TempDir, json: &str) -> PathBuf {
    let path = dir.path().join(MODEL_FILE_NAME);
    let mut file = std::fs::File::create(&path).expect("create artifact");
    file.write_all(json.as_bytes()).expect("write artifact");
    path
}

/// Smallest valid artifact: one numeric feature, one stump
fn stump_artifact(feature: &str, threshold: f64) -> String {
    serde_json::json!({
        "format": "obesity-forest",
        "format_version": 1,
        "name": "stump",
        "version": "0.0.1",
        "classes": ["Normal_Weight", "Obesity_Type_I"],
        "features": [{"name": feature, "kind": "numeric"}],
        "trees": [{"nodes": [
            {"feature": 0, "threshold": threshold, "left": 1, "right": 2},
            {"value": [1.0, 0.0]},
            {"value": [0.0, 1.0]}
        ]}]
    })
    .to_string()
}

// ============================================================================
// LOAD FAILURES
// ============================================================================

#[test]
fn test_missing_file_reports_not_found() {
    let dir = TempDir::new().expect("tempdir");
    let path = dir.path().join("models").join(MODEL_FILE_NAME);

    let err = load_model(&path).expect_err("file is absent");
    assert_eq!(err, LoadError::NotFound { path: path.clone() });
    assert!(err.to_string().starts_with("Model file not found"));
}

#[test]
fn test_garbage_file_reports_parse_error() {
    let dir = TempDir::new().expect("tempdir");
    let path = write_artifact(&dir, "\u{80}\u{3}pickle protocol");

    let err = load_model(&path).expect_err("not JSON");
    assert!(matches!(err, LoadError::Parse(_)), "got {err:?}");
}

#[test]
fn test_directory_instead_of_file() {
    let dir = TempDir::new().expect("tempdir");
    let err = load_model(dir.path()).expect_err("directory");
    assert!(matches!(err, LoadError::Io { .. }), "got {err:?}");
}

#[test]
fn test_wrong_format_tag_rejected() {
    let dir = TempDir::new().expect("tempdir");
    let json = stump_artifact("BMI", 25.0).replace("obesity-forest", "sklearn-pickle");
    let path = write_artifact(&dir, &json);

    let err = load_model(&path).expect_err("wrong tag");
    assert!(matches!(err, LoadError::Format { .. }), "got {err:?}");
}

#[test]
fn test_unknown_class_label_rejected() {
    let dir = TempDir::new().expect("tempdir");
    let json = stump_artifact("BMI", 25.0).replace("Obesity_Type_I", "Obese");
    let path = write_artifact(&dir, &json);

    let err = load_model(&path).expect_err("label outside the closed set");
    assert!(err.to_string().contains("Obese"));
}

// ============================================================================
// PREDICTION
// ============================================================================

#[test]
fn test_bundled_model_default_form_is_normal_weight() {
    let model = load_model(&bundled_model_path()).expect("bundled model");
    assert_eq!(model.metadata().name, "obesity_classifier_v2_optimized");
    assert_eq!(model.metadata().accuracy, Some(0.9622));

    let record = build_record(&FormSubmission::default());
    assert_eq!(model.predict(&record), Ok(SeverityClass::NormalWeight));
}

#[test]
fn test_bundled_model_high_bmi_is_obesity_type_iii() {
    let model = load_model(&bundled_model_path()).expect("bundled model");
    let form = FormSubmission {
        height: 1.60,
        weight: 120.0,
        ..FormSubmission::default()
    };
    assert_eq!(
        model.predict(&build_record(&form)),
        Ok(SeverityClass::ObesityTypeIII)
    );
}

#[test]
fn test_bundled_model_low_bmi_is_insufficient_weight() {
    let model = load_model(&bundled_model_path()).expect("bundled model");
    let form = FormSubmission {
        height: 1.85,
        weight: 55.0,
        ..FormSubmission::default()
    };
    assert_eq!(
        model.predict(&build_record(&form)),
        Ok(SeverityClass::InsufficientWeight)
    );
}

#[test]
fn test_schema_mismatch_fails_at_prediction_time() {
    let dir = TempDir::new().expect("tempdir");
    let path = write_artifact(&dir, &stump_artifact("Waist", 90.0));

    // Loads: feature names are only checked against records
    let model = load_model(&path).expect("structurally valid");
    let err = model
        .predict(&build_record(&FormSubmission::default()))
        .expect_err("record has no Waist");
    assert!(matches!(err, PredictionError::Feature(_)), "got {err:?}");
}

#[test]
fn test_stump_on_record_field() {
    let dir = TempDir::new().expect("tempdir");
    let path = write_artifact(&dir, &stump_artifact("Weight", 90.0));
    let model = load_model(&path).expect("valid");

    let light = Record::new().with("Weight", 70.0);
    let heavy = Record::new().with("Weight", 110.0);
    assert_eq!(model.predict(&light), Ok(SeverityClass::NormalWeight));
    assert_eq!(model.predict(&heavy), Ok(SeverityClass::ObesityTypeI));
}

// ============================================================================
// PATH RESOLUTION
// ============================================================================

#[test]
fn test_model_path_is_sibling_models_dir() {
    let dir = TempDir::new().expect("tempdir");
    let exe = dir.path().join("bin").join("obesity-risk");
    let path = model_path_for_exe(&exe);
    assert!(path.starts_with(dir.path()));
    assert!(path.ends_with(Path::new("models").join(MODEL_FILE_NAME)));
}
