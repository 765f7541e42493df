//! Breast cancer 10-year survival form.
//!
//! Turns the nine values of the patient details form into the feature vector
//! the pre-fitted artifacts expect, runs scaler and classifier, and maps the
//! label onto one of two messages.

pub mod error;
pub mod features;
pub mod handler;
pub mod input;
pub mod options;

pub use error::{FormError, PredictError};
pub use features::{build_feature_vector, FeatureVector, FEATURE_COUNT, FEATURE_NAMES};
pub use handler::{render, Label, Outcome, Prediction, PredictionHandler};
pub use input::{Field, RawInputs, TextInputs};
