//! Structured single-row records
//!
//! A [`Record`] is an ordered list of named scalar fields: the one-row table
//! the classifier consumes. Field order is significant and preserved exactly
//! as inserted; setting an existing field overwrites it in place.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Errors raised while reading or deriving record fields
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum FeatureError {
    /// Field is absent from the record
    #[error("Missing field '{name}'")]
    MissingField {
        /// Field name
        name: String,
    },
    /// Field holds text where a number is required
    #[error("Field '{name}' is not numeric: {value}")]
    NotNumeric {
        /// Field name
        name: String,
        /// Offending value
        value: String,
    },
}

/// A single scalar cell value
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    /// Integer value (e.g. Age)
    Int(i64),
    /// Floating point value
    Float(f64),
    /// Categorical value
    Text(String),
}

impl FieldValue {
    /// Numeric view of the value, `None` for text
    #[must_use]
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Int(v) => Some(*v as f64),
            Self::Float(v) => Some(*v),
            Self::Text(_) => None,
        }
    }

    /// Text view of the value, `None` for numbers
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Text(s) => Some(s),
            _ => None,
        }
    }
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Int(v) => write!(f, "{v}"),
            Self::Float(v) => write!(f, "{v}"),
            Self::Text(s) => f.write_str(s),
        }
    }
}

impl From<i64> for FieldValue {
    fn from(v: i64) -> Self {
        Self::Int(v)
    }
}

impl From<f64> for FieldValue {
    fn from(v: f64) -> Self {
        Self::Float(v)
    }
}

impl From<&str> for FieldValue {
    fn from(v: &str) -> Self {
        Self::Text(v.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(v: String) -> Self {
        Self::Text(v)
    }
}

/// Ordered, single-row structured record
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Record {
    fields: Vec<(String, FieldValue)>,
}

impl Record {
    /// Create an empty record
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert, see [`Record::set`]
    #[must_use]
    pub fn with(mut self, name: impl Into<String>, value: impl Into<FieldValue>) -> Self {
        self.set(name, value);
        self
    }

    /// Set a field: overwrite in place when present, append otherwise
    pub fn set(&mut self, name: impl Into<String>, value: impl Into<FieldValue>) {
        let name = name.into();
        let value = value.into();
        match self.fields.iter_mut().find(|(n, _)| *n == name) {
            Some((_, slot)) => *slot = value,
            None => self.fields.push((name, value)),
        }
    }

    /// Look up a field by name
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&FieldValue> {
        self.fields.iter().find(|(n, _)| n == name).map(|(_, v)| v)
    }

    /// Numeric field lookup
    ///
    /// # Errors
    ///
    /// Returns [`FeatureError`] if the field is missing or holds text.
    pub fn numeric(&self, name: &str) -> Result<f64, FeatureError> {
        let value = self.get(name).ok_or_else(|| FeatureError::MissingField {
            name: name.to_string(),
        })?;
        value.as_f64().ok_or_else(|| FeatureError::NotNumeric {
            name: name.to_string(),
            value: value.to_string(),
        })
    }

    /// Field names in order
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|(n, _)| n.as_str())
    }

    /// Iterate `(name, value)` pairs in order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &FieldValue)> {
        self.fields.iter().map(|(n, v)| (n.as_str(), v))
    }

    /// Number of fields
    #[must_use]
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Whether the record has no fields
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}
