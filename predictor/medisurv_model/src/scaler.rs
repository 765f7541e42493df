use serde::{Deserialize, Serialize};

use crate::backend::{check_width, ModelError, Scaler};

/// Per-column standardization `(x - mean) / scale`, exported from a fitted
/// scikit-learn `StandardScaler`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StandardScaler {
    pub mean: Vec<f64>,
    pub scale: Vec<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub feature_names: Option<Vec<String>>,
}

impl StandardScaler {
    pub fn new(mean: Vec<f64>, scale: Vec<f64>) -> Result<Self, ModelError> {
        let scaler = Self {
            mean,
            scale,
            feature_names: None,
        };
        scaler.validate()?;
        Ok(scaler)
    }

    pub fn with_feature_names(mut self, names: Vec<String>) -> Result<Self, ModelError> {
        self.feature_names = Some(names);
        self.validate()?;
        Ok(self)
    }

    pub fn validate(&self) -> Result<(), ModelError> {
        if self.mean.is_empty() {
            return Err(ModelError::Invalid("scaler has no columns".into()));
        }
        if self.mean.len() != self.scale.len() {
            return Err(ModelError::Invalid(format!(
                "scaler mean has {} columns but scale has {}",
                self.mean.len(),
                self.scale.len()
            )));
        }
        if let Some(names) = &self.feature_names {
            if names.len() != self.mean.len() {
                return Err(ModelError::Invalid(format!(
                    "scaler lists {} feature names for {} columns",
                    names.len(),
                    self.mean.len()
                )));
            }
        }
        if let Some(col) = self
            .mean
            .iter()
            .chain(self.scale.iter())
            .position(|v| !v.is_finite())
        {
            return Err(ModelError::Invalid(format!(
                "scaler parameter {} is not finite",
                col % self.mean.len()
            )));
        }
        Ok(())
    }

    /// Scale of one column. Constant columns were fitted with a zero scale,
    /// which scikit-learn replaces by 1.
    fn column_scale(&self, col: usize) -> f64 {
        let s = self.scale[col];
        if s == 0.0 {
            1.0
        } else {
            s
        }
    }
}

impl Scaler for StandardScaler {
    fn n_features(&self) -> usize {
        self.mean.len()
    }

    fn feature_names(&self) -> Option<&[String]> {
        self.feature_names.as_deref()
    }

    fn transform(&self, features: &[f64]) -> Result<Vec<f64>, ModelError> {
        check_width(self.n_features(), features)?;
        Ok(features
            .iter()
            .enumerate()
            .map(|(col, &x)| (x - self.mean[col]) / self.column_scale(col))
            .collect())
    }
}
