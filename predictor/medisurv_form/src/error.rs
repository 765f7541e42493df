use medisurv_model::ModelError;
use thiserror::Error;

use crate::input::Field;

/// A submitted value that cannot be turned into a feature.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum FormError {
    #[error("{field}: {value:?} is not a valid number")]
    InvalidNumber { field: Field, value: String },
    #[error("{field}: {value} is outside the allowed values {allowed}")]
    OutOfRange {
        field: Field,
        value: String,
        allowed: &'static str,
    },
    #[error("{field}: unrecognized option {value:?}")]
    UnknownOption { field: Field, value: String },
}

/// Failure to build the handler or to produce a prediction.
#[derive(Debug, Error)]
pub enum PredictError {
    #[error(transparent)]
    Form(#[from] FormError),
    #[error(transparent)]
    Model(#[from] ModelError),
    #[error("{artifact} expects {got} features, the form produces {expected}")]
    Width {
        artifact: &'static str,
        expected: usize,
        got: usize,
    },
    #[error("scaler was fitted on features {got:?}, expected {expected:?}")]
    FeatureNames {
        expected: Vec<String>,
        got: Vec<String>,
    },
}
