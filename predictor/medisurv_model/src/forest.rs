//! Random forest classifier evaluated from exported scikit-learn tree arrays.
//!
//! Each tree is stored the way scikit-learn keeps it internally: parallel
//! arrays indexed by node id. A node is a leaf when its left child is
//! [`LEAF`]. Samples go left when `x[feature] <= threshold`.

use serde::{Deserialize, Serialize};

use crate::backend::{check_width, Classifier, ModelError};

/// Child index marking a leaf node.
pub const LEAF: i64 = -1;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DecisionTree {
    pub children_left: Vec<i64>,
    pub children_right: Vec<i64>,
    pub feature: Vec<i64>,
    pub threshold: Vec<f64>,
    /// Per-node class weights, one entry per class.
    pub value: Vec<Vec<f64>>,
}

impl DecisionTree {
    fn node_count(&self) -> usize {
        self.children_left.len()
    }

    /// Checks array lengths, split features and child links. Children must
    /// point strictly forward, so traversal always terminates.
    pub fn validate(&self, n_features: usize, n_classes: usize) -> Result<(), ModelError> {
        let n = self.node_count();
        if n == 0 {
            return Err(ModelError::Invalid("tree has no nodes".into()));
        }
        if self.children_right.len() != n
            || self.feature.len() != n
            || self.threshold.len() != n
            || self.value.len() != n
        {
            return Err(ModelError::Invalid(
                "tree node arrays have different lengths".into(),
            ));
        }

        for node in 0..n {
            let (left, right) = (self.children_left[node], self.children_right[node]);
            if self.value[node].len() != n_classes {
                return Err(ModelError::Invalid(format!(
                    "node {node} has {} class weights, expected {n_classes}",
                    self.value[node].len()
                )));
            }
            if self.value[node].iter().any(|w| !w.is_finite() || *w < 0.0) {
                return Err(ModelError::Invalid(format!(
                    "node {node} has a negative or non-finite class weight"
                )));
            }
            if left == LEAF || right == LEAF {
                if left != right {
                    return Err(ModelError::Invalid(format!(
                        "node {node} has only one child"
                    )));
                }
                // A leaf without weight would vote for no class at all.
                if self.value[node].iter().sum::<f64>() <= 0.0 {
                    return Err(ModelError::Invalid(format!(
                        "leaf {node} has no class weight"
                    )));
                }
                continue;
            }
            for child in [left, right] {
                if child <= node as i64 || child >= n as i64 {
                    return Err(ModelError::Invalid(format!(
                        "node {node} links to invalid child {child}"
                    )));
                }
            }
            let feature = self.feature[node];
            if feature < 0 || feature as usize >= n_features {
                return Err(ModelError::Invalid(format!(
                    "node {node} splits on feature {feature}, model has {n_features}"
                )));
            }
            if self.threshold[node].is_nan() {
                return Err(ModelError::Invalid(format!(
                    "node {node} has a NaN threshold"
                )));
            }
        }
        Ok(())
    }

    /// Class weights of the leaf reached by `features`. Assumes a validated
    /// tree and a correctly sized input.
    fn leaf_value(&self, features: &[f64]) -> &[f64] {
        let mut node = 0usize;
        while self.children_left[node] != LEAF {
            let x = features[self.feature[node] as usize];
            node = if x <= self.threshold[node] {
                self.children_left[node] as usize
            } else {
                self.children_right[node] as usize
            };
        }
        &self.value[node]
    }

    /// Leaf class distribution normalized to sum to 1. Validation guarantees
    /// every leaf has positive total weight.
    pub fn predict_proba(&self, features: &[f64]) -> Vec<f64> {
        let value = self.leaf_value(features);
        let total: f64 = value.iter().sum();
        value.iter().map(|v| v / total).collect()
    }
}

/// An ensemble of decision trees voting by averaged class probability.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RandomForest {
    pub n_features: usize,
    pub classes: Vec<i64>,
    pub trees: Vec<DecisionTree>,
}

impl RandomForest {
    pub fn new(
        n_features: usize,
        classes: Vec<i64>,
        trees: Vec<DecisionTree>,
    ) -> Result<Self, ModelError> {
        let forest = Self {
            n_features,
            classes,
            trees,
        };
        forest.validate()?;
        Ok(forest)
    }

    pub fn validate(&self) -> Result<(), ModelError> {
        if self.n_features == 0 {
            return Err(ModelError::Invalid("forest expects zero features".into()));
        }
        if self.classes.is_empty() {
            return Err(ModelError::Invalid("forest has no classes".into()));
        }
        if self.trees.is_empty() {
            return Err(ModelError::Invalid("forest has no trees".into()));
        }
        for (i, tree) in self.trees.iter().enumerate() {
            tree.validate(self.n_features, self.classes.len())
                .map_err(|e| match e {
                    ModelError::Invalid(msg) => ModelError::Invalid(format!("tree {i}: {msg}")),
                    other => other,
                })?;
        }
        Ok(())
    }

    /// Mean of the per-tree class distributions, ordered like `classes`.
    pub fn predict_proba(&self, features: &[f64]) -> Result<Vec<f64>, ModelError> {
        check_width(self.n_features, features)?;
        let mut proba = vec![0.0; self.classes.len()];
        for tree in &self.trees {
            for (acc, p) in proba.iter_mut().zip(tree.predict_proba(features)) {
                *acc += p;
            }
        }
        let n_trees = self.trees.len() as f64;
        proba.iter_mut().for_each(|p| *p /= n_trees);
        Ok(proba)
    }
}

impl Classifier for RandomForest {
    fn n_features(&self) -> usize {
        self.n_features
    }

    fn predict(&self, features: &[f64]) -> Result<i64, ModelError> {
        let proba = self.predict_proba(features)?;
        // First maximum wins on ties.
        let best = proba
            .iter()
            .enumerate()
            .fold(0, |best, (i, p)| if *p > proba[best] { i } else { best });
        log::debug!("forest class probabilities {proba:?}, picked class index {best}");
        Ok(self.classes[best])
    }
}
