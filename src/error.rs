//! Crate-level error type
//!
//! Each concern has its own error enum ([`LoadError`], [`PredictionError`],
//! [`FeatureError`]); [`Error`] unifies them for callers that drive the
//! whole flow, such as the binary.

use crate::classifier::PredictionError;
use crate::model_loader::LoadError;
use crate::record::FeatureError;

/// Any failure surfaced by this crate
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Model artifact could not be loaded
    #[error(transparent)]
    Load(#[from] LoadError),
    /// Classifier invocation failed
    #[error(transparent)]
    Prediction(#[from] PredictionError),
    /// Record field missing or mistyped
    #[error(transparent)]
    Feature(#[from] FeatureError),
    /// Page rendering failed
    #[error("Render error: {0}")]
    Render(String),
    /// Server socket or runtime error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// Invalid configuration value
    #[error("Invalid configuration: {0}")]
    Config(String),
}

/// Result alias using [`Error`]
pub type Result<T> = std::result::Result<T, Error>;
