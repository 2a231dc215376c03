//! # Obesity Risk
//!
//! Obesity-category assessment: a form collects sixteen physical and
//! lifestyle attributes, a pre-trained tree ensemble classifies them into
//! one of seven weight categories, and the result is shown as a colored
//! card.
//!
//! ## Features
//!
//! - **Typed inputs**: the sixteen fields and their closed option sets are
//!   Rust enums; the record handed to the classifier keeps schema order
//! - **Portable model artifact**: random forests exported as JSON, validated
//!   once at load time
//! - **Optional preprocessing**: artifacts may declare a BMI-derivation step
//! - **Web front-end**: axum + minijinja form, plus a JSON prediction API
//!
//! ## Example
//!
//! ```rust,no_run
//! use obesity_risk::{load_model, build_record, Classifier, FormSubmission};
//! use std::path::Path;
//!
//! let model = load_model(Path::new("models/obesity_classifier_v2_optimized.json"))?;
//! let record = build_record(&FormSubmission::default());
//! let class = model.predict(&record)?;
//! println!("{}", class);
//! # Ok::<(), obesity_risk::Error>(())
//! ```

#![deny(missing_docs)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]
// Clippy allows (MUST come after deny/warn to override them)
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::cast_precision_loss)] // i64 -> f64 for slider values
#![allow(clippy::cast_possible_truncation)] // u128 -> u64 for metrics
#![allow(clippy::must_use_candidate)] // Not all methods need #[must_use]
#![allow(clippy::doc_markdown)] // Allow technical terms without backticks
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::float_cmp)] // Allow float comparisons in tests

/// HTTP front-end (form pages and JSON API)
#[cfg(feature = "server")]
pub mod api;
/// Classifier contract and the closed label set
pub mod classifier;
pub mod config;
pub mod error;
/// Random-forest artifact and classifier
pub mod forest;
/// Input widgets, their ranges and defaults
pub mod form;
pub mod metrics;
/// Model artifact location and loading
pub mod model_loader;
/// Record transformers (BMI derivation)
pub mod preprocessing;
/// Label colors and result card
pub mod presentation;
/// Named, ordered feature records
pub mod record;
/// Typed prediction request and record assembly
pub mod request;
/// HTML page rendering
#[cfg(feature = "server")]
pub mod ui;

// Re-exports for convenience
pub use classifier::{Classifier, ModelMetadata, PredictionError, SeverityClass};
pub use error::{Error, Result};
pub use forest::ForestClassifier;
pub use form::FormSubmission;
pub use model_loader::{default_model_path, load_model, LoadError};
pub use record::{FeatureError, FieldValue, Record};
pub use request::{build_record, build_request, PredictionRequest, FIELD_NAMES};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
