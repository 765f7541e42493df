//! Pre-fitted model artifacts for the medisurv survival predictor.
//!
//! The scaler and classifier are fitted elsewhere and exported to JSON. This
//! crate loads and validates them once, then evaluates them read-only through
//! the [`Scaler`] and [`Classifier`] traits.

pub mod backend;
pub mod forest;
pub mod scaler;

pub use backend::{Classifier, ModelError, Scaler};
pub use forest::{DecisionTree, RandomForest, LEAF};
pub use scaler::StandardScaler;

use serde::de::DeserializeOwned;
use std::fs::read_to_string;
use std::path::Path;

fn read_artifact<T: DeserializeOwned>(path: &Path) -> Result<T, ModelError> {
    let s = read_to_string(path).map_err(|source| ModelError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_str::<T>(&s).map_err(|source| ModelError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

/// Load and validate a scaler artifact.
pub fn load_scaler(path: impl AsRef<Path>) -> Result<StandardScaler, ModelError> {
    let path = path.as_ref();
    let scaler: StandardScaler = read_artifact(path)?;
    scaler.validate()?;
    log::info!(
        "loaded scaler from {} ({} features)",
        path.display(),
        scaler.n_features()
    );
    Ok(scaler)
}

/// Load and validate a random forest classifier artifact.
pub fn load_classifier(path: impl AsRef<Path>) -> Result<RandomForest, ModelError> {
    let path = path.as_ref();
    let forest: RandomForest = read_artifact(path)?;
    forest.validate()?;
    log::info!(
        "loaded classifier from {} ({} trees, classes {:?})",
        path.display(),
        forest.trees.len(),
        forest.classes
    );
    Ok(forest)
}
