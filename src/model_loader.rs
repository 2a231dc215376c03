//! Model artifact loading
//!
//! The classifier lives in a single artifact next to the application:
//! `<binary dir>/../models/obesity_classifier_v2_optimized.json`. It is read
//! once at startup; callers wrap the result in an `Arc` and share it for the
//! rest of the process. A load failure is fatal to the interactive session.

use std::path::{Path, PathBuf};

use tracing::{error, info};

use crate::classifier::Classifier;
use crate::forest::ForestClassifier;

/// Directory holding model artifacts, relative to the application root
pub const MODELS_DIR: &str = "models";

/// Artifact file name
pub const MODEL_FILE_NAME: &str = "obesity_classifier_v2_optimized.json";

/// Maximum artifact size in bytes (64 MB)
pub const MAX_MODEL_SIZE: u64 = 64 * 1024 * 1024;

/// Errors that make the model unavailable
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum LoadError {
    /// No file at the expected path
    #[error("Model file not found: {}", .path.display())]
    NotFound {
        /// Path that was tried
        path: PathBuf,
    },
    /// File exists but could not be read
    #[error("I/O error reading {}: {}", .path.display(), .reason)]
    Io {
        /// Path that was read
        path: PathBuf,
        /// Underlying error
        reason: String,
    },
    /// Artifact exceeds [`MAX_MODEL_SIZE`]
    #[error("Model file too large: {size} bytes")]
    TooLarge {
        /// Actual size
        size: u64,
    },
    /// Not valid artifact JSON
    #[error("Parse error: {0}")]
    Parse(String),
    /// Valid JSON but not a usable classifier
    #[error("Incompatible model format: {reason}")]
    Format {
        /// What was wrong
        reason: String,
    },
    /// Location of the running binary is unknown
    #[error("Cannot resolve application directory: {0}")]
    Location(String),
}

/// Resolve the model path relative to a binary location
///
/// `exe` is the binary itself; the artifact is looked up in the `models`
/// directory beside the binary's parent directory.
#[must_use]
pub fn model_path_for_exe(exe: &Path) -> PathBuf {
    let app_dir = exe.parent().unwrap_or_else(|| Path::new("."));
    app_dir.join("..").join(MODELS_DIR).join(MODEL_FILE_NAME)
}

/// Default artifact path for the running binary
///
/// # Errors
///
/// Returns [`LoadError::Location`] if the binary path cannot be determined.
pub fn default_model_path() -> Result<PathBuf, LoadError> {
    let exe = std::env::current_exe().map_err(|e| LoadError::Location(e.to_string()))?;
    Ok(model_path_for_exe(&exe))
}

/// Read, parse and validate the artifact at `path`
///
/// # Errors
///
/// Returns [`LoadError`] when the file is missing, unreadable, oversized or
/// not a valid classifier artifact.
pub fn load_model(path: &Path) -> Result<ForestClassifier, LoadError> {
    let result = read_artifact(path).and_then(|json| ForestClassifier::from_json(&json));
    match &result {
        Ok(model) => info!(
            path = %path.display(),
            name = %model.metadata().name,
            version = %model.metadata().version,
            trees = model.n_trees(),
            "Model loaded"
        ),
        Err(e) => error!(path = %path.display(), error = %e, "Model load failed"),
    }
    result
}

fn read_artifact(path: &Path) -> Result<String, LoadError> {
    let meta = std::fs::metadata(path).map_err(|e| io_error(path, &e))?;
    if meta.len() > MAX_MODEL_SIZE {
        return Err(LoadError::TooLarge { size: meta.len() });
    }
    std::fs::read_to_string(path).map_err(|e| io_error(path, &e))
}

fn io_error(path: &Path, e: &std::io::Error) -> LoadError {
    if e.kind() == std::io::ErrorKind::NotFound {
        LoadError::NotFound {
            path: path.to_path_buf(),
        }
    } else {
        LoadError::Io {
            path: path.to_path_buf(),
            reason: e.to_string(),
        }
    }
}
