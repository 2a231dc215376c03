//! Test helper functions for api tests
//!
//! Shared routers and stub classifiers used across the test parts.

use super::*;
use std::path::PathBuf;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use crate::classifier::ModelMetadata;

/// Create a test application with the bundled demo model
pub fn create_test_app() -> Router {
    let state = AppState::demo().expect("test");
    create_router(state)
}

/// Create a test application whose model failed to load
pub fn create_missing_model_app() -> Router {
    let err = LoadError::NotFound {
        path: PathBuf::from("/nowhere/models/obesity_classifier_v2_optimized.json"),
    };
    create_router(AppState::load_failed(&err).expect("test"))
}

/// Classifier stub that counts calls and remembers the records it saw
pub struct CountingClassifier {
    /// Label returned for every call
    pub label: SeverityClass,
    /// Number of `predict` calls
    pub calls: AtomicUsize,
    /// Records received, in call order
    pub seen: Mutex<Vec<Record>>,
    metadata: ModelMetadata,
}

impl CountingClassifier {
    /// Stub that always answers `label`
    pub fn new(label: SeverityClass) -> Arc<Self> {
        Arc::new(Self {
            label,
            calls: AtomicUsize::new(0),
            seen: Mutex::new(Vec::new()),
            metadata: ModelMetadata {
                name: "counting".to_string(),
                version: "test".to_string(),
                accuracy: Some(0.9622),
            },
        })
    }

    /// Number of calls so far
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl Classifier for CountingClassifier {
    fn predict(&self, record: &Record) -> std::result::Result<SeverityClass, PredictionError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.seen.lock().expect("test").push(record.clone());
        Ok(self.label)
    }

    fn metadata(&self) -> &ModelMetadata {
        &self.metadata
    }
}

/// Classifier stub that rejects every record
pub struct FailingClassifier(ModelMetadata);

impl FailingClassifier {
    /// Create the stub
    pub fn new() -> Arc<Self> {
        Arc::new(Self(ModelMetadata::default()))
    }
}

impl Classifier for FailingClassifier {
    fn predict(&self, _record: &Record) -> std::result::Result<SeverityClass, PredictionError> {
        Err(PredictionError::UnknownCategory {
            feature: "MTRANS".to_string(),
            value: "Teleport".to_string(),
        })
    }

    fn metadata(&self) -> &ModelMetadata {
        &self.0
    }
}

/// URL-encoded body for the default form values
pub fn default_form_body() -> String {
    "Gender=Male&Age=25&Height=1.75&Weight=75.0&family_history_with_overweight=yes\
     &FAVC=yes&FCVC=2&NCP=3&CAEC=Sometimes&SMOKE=no&CH2O=2.0&SCC=no&FAF=1&TUE=1\
     &CALC=no&MTRANS=Public_Transportation"
        .to_string()
}
