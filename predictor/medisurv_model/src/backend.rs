//! Artifact traits and error types for model inference.

use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while loading or evaluating a model artifact.
#[derive(Debug, Error)]
pub enum ModelError {
    #[error("Failed to read artifact {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Failed to parse artifact {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("Invalid artifact: {0}")]
    Invalid(String),
    #[error("Expected {expected} features, got {got}")]
    Shape { expected: usize, got: usize },
}

/// A pre-fitted feature scaler.
///
/// Implementations are immutable after loading and may be shared across
/// threads.
pub trait Scaler: Send + Sync {
    /// Width of the vectors this scaler was fitted on.
    fn n_features(&self) -> usize;

    /// Column names seen at fit time, in order, when the artifact recorded them.
    fn feature_names(&self) -> Option<&[String]> {
        None
    }

    /// Normalize a feature vector. The output has the same width as the input.
    fn transform(&self, features: &[f64]) -> Result<Vec<f64>, ModelError>;
}

/// A pre-fitted classifier returning a single class label per sample.
pub trait Classifier: Send + Sync {
    /// Width of the vectors this classifier was fitted on.
    fn n_features(&self) -> usize;

    fn predict(&self, features: &[f64]) -> Result<i64, ModelError>;
}

pub(crate) fn check_width(expected: usize, features: &[f64]) -> Result<(), ModelError> {
    if features.len() != expected {
        return Err(ModelError::Shape {
            expected,
            got: features.len(),
        });
    }
    Ok(())
}
