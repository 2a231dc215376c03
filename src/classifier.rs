//! Classifier seam
//!
//! The loaded model is an opaque collaborator: given one record it returns
//! exactly one [`SeverityClass`]. Implementations must be immutable after
//! loading so a single instance can be shared by every request.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::record::{FeatureError, Record};

/// Weight-status category, in ordinal order of severity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum SeverityClass {
    /// BMI below the normal range
    #[serde(rename = "Insufficient_Weight")]
    InsufficientWeight,
    /// Normal weight
    #[serde(rename = "Normal_Weight")]
    NormalWeight,
    /// Overweight, level I
    #[serde(rename = "Overweight_Level_I")]
    OverweightLevelI,
    /// Overweight, level II
    #[serde(rename = "Overweight_Level_II")]
    OverweightLevelII,
    /// Obesity, type I
    #[serde(rename = "Obesity_Type_I")]
    ObesityTypeI,
    /// Obesity, type II
    #[serde(rename = "Obesity_Type_II")]
    ObesityTypeII,
    /// Obesity, type III
    #[serde(rename = "Obesity_Type_III")]
    ObesityTypeIII,
}

impl SeverityClass {
    /// The closed label set, least to most severe
    pub const ALL: [Self; 7] = [
        Self::InsufficientWeight,
        Self::NormalWeight,
        Self::OverweightLevelI,
        Self::OverweightLevelII,
        Self::ObesityTypeI,
        Self::ObesityTypeII,
        Self::ObesityTypeIII,
    ];

    /// Label exactly as the classifier emits it
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::InsufficientWeight => "Insufficient_Weight",
            Self::NormalWeight => "Normal_Weight",
            Self::OverweightLevelI => "Overweight_Level_I",
            Self::OverweightLevelII => "Overweight_Level_II",
            Self::ObesityTypeI => "Obesity_Type_I",
            Self::ObesityTypeII => "Obesity_Type_II",
            Self::ObesityTypeIII => "Obesity_Type_III",
        }
    }

    /// Position in [`SeverityClass::ALL`]
    #[must_use]
    pub const fn index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for SeverityClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SeverityClass {
    type Err = PredictionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|c| c.as_str() == s)
            .ok_or_else(|| PredictionError::UnknownLabel(s.to_string()))
    }
}

/// Errors raised while invoking the classifier
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum PredictionError {
    /// Preprocessing or feature lookup failed
    #[error("Feature error: {0}")]
    Feature(#[from] FeatureError),
    /// Categorical value not seen in training
    #[error("Unknown category '{value}' for feature '{feature}'")]
    UnknownCategory {
        /// Feature name
        feature: String,
        /// Offending value
        value: String,
    },
    /// Categorical feature received a number
    #[error("Feature '{feature}' expects a category, got {value}")]
    NotCategorical {
        /// Feature name
        feature: String,
        /// Offending value
        value: String,
    },
    /// Label outside the closed severity set
    #[error("Unknown label '{0}'")]
    UnknownLabel(String),
}

/// Descriptive metadata carried by a loaded model
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ModelMetadata {
    /// Model name
    pub name: String,
    /// Model version
    pub version: String,
    /// Held-out accuracy reported by the training process (0..1)
    #[serde(default)]
    pub accuracy: Option<f64>,
}

/// A loaded, immutable weight-status classifier
pub trait Classifier: Send + Sync {
    /// Predict the severity class of one record
    ///
    /// # Errors
    ///
    /// Returns [`PredictionError`] when the record does not match the schema
    /// the model was trained on.
    fn predict(&self, record: &Record) -> Result<SeverityClass, PredictionError>;

    /// Model metadata
    fn metadata(&self) -> &ModelMetadata;
}
