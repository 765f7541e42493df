//! Prediction form handler: build the feature vector, scale it, classify it
//! and map the label to the message shown to the user.

use medisurv_model::{load_classifier, load_scaler, Classifier, Scaler};
use serde::Serialize;
use std::path::Path;
use std::sync::Arc;

use crate::error::PredictError;
use crate::features::{build_feature_vector, FeatureVector, FEATURE_COUNT, FEATURE_NAMES};
use crate::input::RawInputs;

/// Class label returned by the classifier. `1` means survival past 10 years.
pub type Label = i64;

pub const SURVIVAL_LABEL: Label = 1;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Outcome {
    LikelySurvival,
    MortalityRisk,
}

impl Outcome {
    pub fn message(self) -> &'static str {
        match self {
            Outcome::LikelySurvival => "🎯 Patient is Likely to Survive More Than 10 Years",
            Outcome::MortalityRisk => "⚠️ Patient is at Risk of Mortality Within 10 Years",
        }
    }

    pub fn is_favorable(self) -> bool {
        matches!(self, Outcome::LikelySurvival)
    }
}

/// Two-way branch on the classifier label. Anything but `1`, including
/// labels the model should never produce, is reported as a mortality risk.
pub fn render(label: Label) -> Outcome {
    match label {
        SURVIVAL_LABEL => Outcome::LikelySurvival,
        0 => Outcome::MortalityRisk,
        other => {
            log::warn!("classifier returned unexpected label {other}; reporting mortality risk");
            Outcome::MortalityRisk
        }
    }
}

/// Holds the loaded artifacts and answers one submission at a time.
///
/// The artifacts are never mutated, so a single handler can be shared across
/// threads behind an `Arc`.
pub struct PredictionHandler {
    scaler: Arc<dyn Scaler>,
    classifier: Arc<dyn Classifier>,
}

impl std::fmt::Debug for PredictionHandler {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PredictionHandler")
            .field("scaler_features", &self.scaler.n_features())
            .field("classifier_features", &self.classifier.n_features())
            .finish()
    }
}

impl PredictionHandler {
    /// Wire a scaler and classifier together, checking that both were fitted
    /// on the form's nine columns.
    pub fn new(
        scaler: Arc<dyn Scaler>,
        classifier: Arc<dyn Classifier>,
    ) -> Result<Self, PredictError> {
        for (artifact, width) in [
            ("scaler", scaler.n_features()),
            ("classifier", classifier.n_features()),
        ] {
            if width != FEATURE_COUNT {
                return Err(PredictError::Width {
                    artifact,
                    expected: FEATURE_COUNT,
                    got: width,
                });
            }
        }
        if let Some(names) = scaler.feature_names() {
            if names.iter().map(String::as_str).ne(FEATURE_NAMES) {
                return Err(PredictError::FeatureNames {
                    expected: FEATURE_NAMES.iter().map(|n| n.to_string()).collect(),
                    got: names.to_vec(),
                });
            }
        }
        Ok(Self { scaler, classifier })
    }

    /// Load both artifacts from disk. Any failure here means the process
    /// cannot serve predictions.
    pub fn from_artifacts(
        classifier_path: impl AsRef<Path>,
        scaler_path: impl AsRef<Path>,
    ) -> Result<Self, PredictError> {
        let classifier = load_classifier(classifier_path)?;
        let scaler = load_scaler(scaler_path)?;
        Self::new(Arc::new(scaler), Arc::new(classifier))
    }

    /// Scale then classify.
    pub fn predict(&self, vector: &FeatureVector) -> Result<Label, PredictError> {
        let scaled = self.scaler.transform(vector.as_slice())?;
        let label = self.classifier.predict(&scaled)?;
        log::debug!("scaled {scaled:?} -> label {label}");
        Ok(label)
    }

    /// One click of the Predict button.
    pub fn submit(&self, raw: &RawInputs) -> Result<Prediction, PredictError> {
        let features = build_feature_vector(raw)?;
        let label = self.predict(&features)?;
        let outcome = render(label);
        log::info!("prediction complete: label {label} ({outcome:?})");
        Ok(Prediction {
            features,
            label,
            outcome,
        })
    }
}

/// Result of a single submission.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Prediction {
    pub features: FeatureVector,
    pub label: Label,
    pub outcome: Outcome,
}
