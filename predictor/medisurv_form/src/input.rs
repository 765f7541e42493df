//! Raw values submitted from the patient details form.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::RangeInclusive;

use crate::error::FormError;
use crate::options::{ReceptorStatus, Therapy, TumorStage};

pub const AGE_RANGE: RangeInclusive<i64> = 20..=100;
pub const TUMOR_SIZE_RANGE: RangeInclusive<f64> = 0.0..=200.0;
pub const GRADES: [i64; 3] = [1, 2, 3];

/// One control of the form, in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    Age,
    TumorSize,
    Grade,
    TumorStage,
    ErStatus,
    PrStatus,
    Her2Status,
    HormoneTherapy,
    RadioTherapy,
}

impl Field {
    pub const ALL: [Field; 9] = [
        Field::Age,
        Field::TumorSize,
        Field::Grade,
        Field::TumorStage,
        Field::ErStatus,
        Field::PrStatus,
        Field::Her2Status,
        Field::HormoneTherapy,
        Field::RadioTherapy,
    ];

    /// Label shown next to the control.
    pub fn label(self) -> &'static str {
        match self {
            Field::Age => "Age at Diagnosis",
            Field::TumorSize => "Tumor Size (in mm)",
            Field::Grade => "Neoplasm Histologic Grade",
            Field::TumorStage => "Tumor Stage",
            Field::ErStatus => "ER Status",
            Field::PrStatus => "PR Status",
            Field::Her2Status => "HER2 Status",
            Field::HormoneTherapy => "Hormone Therapy",
            Field::RadioTherapy => "Radio Therapy",
        }
    }

    /// Key used in submitted forms and JSON bodies.
    pub fn key(self) -> &'static str {
        match self {
            Field::Age => "age",
            Field::TumorSize => "tumor_size",
            Field::Grade => "grade",
            Field::TumorStage => "tumor_stage",
            Field::ErStatus => "er_status",
            Field::PrStatus => "pr_status",
            Field::Her2Status => "her2_status",
            Field::HormoneTherapy => "hormone_therapy",
            Field::RadioTherapy => "radio_therapy",
        }
    }

    /// Option labels for single-choice controls, `None` for numeric entry.
    pub fn options(self) -> Option<Vec<&'static str>> {
        match self {
            Field::Age | Field::TumorSize => None,
            Field::Grade => Some(vec!["1", "2", "3"]),
            Field::TumorStage => Some(TumorStage::ALL.iter().map(|s| s.label()).collect()),
            Field::ErStatus | Field::PrStatus | Field::Her2Status => {
                Some(ReceptorStatus::ALL.iter().map(|s| s.label()).collect())
            }
            Field::HormoneTherapy | Field::RadioTherapy => {
                Some(Therapy::ALL.iter().map(|t| t.label()).collect())
            }
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// The nine values as the form controls produce them: numbers for numeric
/// entry and grade, literal option labels for everything else.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawInputs {
    pub age: i64,
    pub tumor_size: f64,
    pub grade: i64,
    pub tumor_stage: String,
    pub er_status: String,
    pub pr_status: String,
    pub her2_status: String,
    pub hormone_therapy: String,
    pub radio_therapy: String,
}

impl Default for RawInputs {
    /// Initial state of the controls: lower numeric bounds and the first
    /// option of every selection.
    fn default() -> Self {
        Self {
            age: *AGE_RANGE.start(),
            tumor_size: *TUMOR_SIZE_RANGE.start(),
            grade: GRADES[0],
            tumor_stage: TumorStage::StageI.label().to_string(),
            er_status: ReceptorStatus::Positive.label().to_string(),
            pr_status: ReceptorStatus::Positive.label().to_string(),
            her2_status: ReceptorStatus::Positive.label().to_string(),
            hormone_therapy: Therapy::Yes.label().to_string(),
            radio_therapy: Therapy::Yes.label().to_string(),
        }
    }
}

/// Form values exactly as a browser submits them, before number parsing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextInputs {
    pub age: String,
    pub tumor_size: String,
    pub grade: String,
    pub tumor_stage: String,
    pub er_status: String,
    pub pr_status: String,
    pub her2_status: String,
    pub hormone_therapy: String,
    pub radio_therapy: String,
}

impl TextInputs {
    pub fn get(&self, field: Field) -> &str {
        match field {
            Field::Age => &self.age,
            Field::TumorSize => &self.tumor_size,
            Field::Grade => &self.grade,
            Field::TumorStage => &self.tumor_stage,
            Field::ErStatus => &self.er_status,
            Field::PrStatus => &self.pr_status,
            Field::Her2Status => &self.her2_status,
            Field::HormoneTherapy => &self.hormone_therapy,
            Field::RadioTherapy => &self.radio_therapy,
        }
    }

    /// Parse the numeric controls. Range and option checks happen when the
    /// feature vector is built.
    pub fn parse(&self) -> Result<RawInputs, FormError> {
        Ok(RawInputs {
            age: parse_number(Field::Age, &self.age)?,
            tumor_size: parse_number(Field::TumorSize, &self.tumor_size)?,
            grade: parse_number(Field::Grade, &self.grade)?,
            tumor_stage: self.tumor_stage.clone(),
            er_status: self.er_status.clone(),
            pr_status: self.pr_status.clone(),
            her2_status: self.her2_status.clone(),
            hormone_therapy: self.hormone_therapy.clone(),
            radio_therapy: self.radio_therapy.clone(),
        })
    }
}

impl From<&RawInputs> for TextInputs {
    fn from(raw: &RawInputs) -> Self {
        Self {
            age: raw.age.to_string(),
            tumor_size: format!("{:.2}", raw.tumor_size),
            grade: raw.grade.to_string(),
            tumor_stage: raw.tumor_stage.clone(),
            er_status: raw.er_status.clone(),
            pr_status: raw.pr_status.clone(),
            her2_status: raw.her2_status.clone(),
            hormone_therapy: raw.hormone_therapy.clone(),
            radio_therapy: raw.radio_therapy.clone(),
        }
    }
}

impl Default for TextInputs {
    fn default() -> Self {
        Self::from(&RawInputs::default())
    }
}

fn parse_number<T: std::str::FromStr>(field: Field, text: &str) -> Result<T, FormError> {
    text.trim().parse().map_err(|_| FormError::InvalidNumber {
        field,
        value: text.to_string(),
    })
}
