//! Fixed-order feature vector fed to the scaler and classifier.

use serde::Serialize;

use crate::error::FormError;
use crate::input::{Field, RawInputs, AGE_RANGE, GRADES, TUMOR_SIZE_RANGE};
use crate::options::{parse_option, ReceptorStatus, Therapy, TumorStage};

pub const FEATURE_COUNT: usize = 9;

/// Column names the artifacts were fitted with, in fitted order.
pub const FEATURE_NAMES: [&str; FEATURE_COUNT] = [
    "Age at Diagnosis",
    "Tumor Size",
    "Neoplasm Histologic Grade",
    "Tumor Stage",
    "ER Status_Positive",
    "PR Status_Positive",
    "HER2 Status_Positive",
    "Hormone Therapy_Yes",
    "Radio Therapy_Yes",
];

/// One submission's features. Immutable once built.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct FeatureVector([f64; FEATURE_COUNT]);

impl FeatureVector {
    pub fn as_slice(&self) -> &[f64] {
        &self.0
    }

    /// `(fitted name, value)` pairs in column order.
    pub fn named(&self) -> impl Iterator<Item = (&'static str, f64)> + '_ {
        FEATURE_NAMES.iter().copied().zip(self.0.iter().copied())
    }
}

/// Map the form values onto the model's columns.
///
/// Numeric values pass through unchanged; values outside their domain and
/// unknown option labels are errors.
pub fn build_feature_vector(raw: &RawInputs) -> Result<FeatureVector, FormError> {
    if !AGE_RANGE.contains(&raw.age) {
        return Err(FormError::OutOfRange {
            field: Field::Age,
            value: raw.age.to_string(),
            allowed: "20 to 100",
        });
    }
    if !TUMOR_SIZE_RANGE.contains(&raw.tumor_size) {
        return Err(FormError::OutOfRange {
            field: Field::TumorSize,
            value: raw.tumor_size.to_string(),
            allowed: "0.0 to 200.0",
        });
    }
    if !GRADES.contains(&raw.grade) {
        return Err(FormError::OutOfRange {
            field: Field::Grade,
            value: raw.grade.to_string(),
            allowed: "1, 2, 3",
        });
    }

    let stage = parse_option(Field::TumorStage, &raw.tumor_stage, TumorStage::from_label)?;
    let er = parse_option(Field::ErStatus, &raw.er_status, ReceptorStatus::from_label)?;
    let pr = parse_option(Field::PrStatus, &raw.pr_status, ReceptorStatus::from_label)?;
    let her2 = parse_option(Field::Her2Status, &raw.her2_status, ReceptorStatus::from_label)?;
    let hormone = parse_option(Field::HormoneTherapy, &raw.hormone_therapy, Therapy::from_label)?;
    let radio = parse_option(Field::RadioTherapy, &raw.radio_therapy, Therapy::from_label)?;

    let vector = FeatureVector([
        raw.age as f64,
        raw.tumor_size,
        raw.grade as f64,
        f64::from(stage.code()),
        f64::from(er.indicator()),
        f64::from(pr.indicator()),
        f64::from(her2.indicator()),
        f64::from(hormone.indicator()),
        f64::from(radio.indicator()),
    ]);
    log::debug!("built feature vector {:?}", vector.as_slice());
    Ok(vector)
}
