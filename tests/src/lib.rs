//! Shared fixtures: artifact files written to a temporary directory.

use medisurv_form::{FEATURE_COUNT, FEATURE_NAMES};
use medisurv_model::{DecisionTree, RandomForest, StandardScaler, LEAF};
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Identity scaler carrying the fitted column names.
pub fn identity_scaler() -> StandardScaler {
    StandardScaler::new(vec![0.0; FEATURE_COUNT], vec![1.0; FEATURE_COUNT])
        .and_then(|s| s.with_feature_names(FEATURE_NAMES.iter().map(|n| n.to_string()).collect()))
        .expect("valid scaler")
}

/// One split on `feature` at `threshold`; samples above it get `above`,
/// everything else gets `at_or_below`.
pub fn stump(feature: usize, threshold: f64, at_or_below: i64, above: i64) -> RandomForest {
    let vote = |label: i64| if label == 1 { vec![0.0, 1.0] } else { vec![1.0, 0.0] };
    let tree = DecisionTree {
        children_left: vec![1, LEAF, LEAF],
        children_right: vec![2, LEAF, LEAF],
        feature: vec![feature as i64, -2, -2],
        threshold: vec![threshold, -2.0, -2.0],
        value: vec![vec![1.0, 1.0], vote(at_or_below), vote(above)],
    };
    RandomForest::new(FEATURE_COUNT, vec![0, 1], vec![tree]).expect("valid forest")
}

/// A single-class forest that returns `label` for every input.
pub fn constant_forest(label: i64) -> RandomForest {
    let tree = DecisionTree {
        children_left: vec![LEAF],
        children_right: vec![LEAF],
        feature: vec![-2],
        threshold: vec![-2.0],
        value: vec![vec![1.0]],
    };
    RandomForest::new(FEATURE_COUNT, vec![label], vec![tree]).expect("valid forest")
}

/// Temporary directory holding a scaler and classifier artifact.
pub struct ArtifactDir {
    dir: TempDir,
}

impl ArtifactDir {
    pub fn new() -> Self {
        Self {
            dir: tempfile::tempdir().expect("tmpdir"),
        }
    }

    pub fn with(scaler: &StandardScaler, forest: &RandomForest) -> Self {
        let dir = Self::new();
        dir.write_scaler(scaler);
        dir.write_classifier(forest);
        dir
    }

    pub fn scaler_path(&self) -> PathBuf {
        self.dir.path().join("scaler.json")
    }

    pub fn classifier_path(&self) -> PathBuf {
        self.dir.path().join("random_forest_model.json")
    }

    pub fn write_scaler(&self, scaler: &StandardScaler) {
        let json = serde_json::to_string_pretty(scaler).expect("serialize scaler");
        std::fs::write(self.scaler_path(), json).expect("write scaler");
    }

    pub fn write_classifier(&self, forest: &RandomForest) {
        let json = serde_json::to_string_pretty(forest).expect("serialize forest");
        std::fs::write(self.classifier_path(), json).expect("write classifier");
    }

    /// Replace the classifier artifact with arbitrary bytes.
    pub fn corrupt_classifier(&self, bytes: &[u8]) {
        std::fs::write(self.classifier_path(), bytes).expect("write classifier");
    }
}

impl Default for ArtifactDir {
    fn default() -> Self {
        Self::new()
    }
}

/// The demonstration artifacts shipped with the repository.
pub fn bundled_artifacts() -> (PathBuf, PathBuf) {
    let root = Path::new(env!("CARGO_MANIFEST_DIR")).join("../artifacts");
    (
        root.join("random_forest_model.json"),
        root.join("scaler.json"),
    )
}
