//! Literal option sets of the form's single-choice controls.
//!
//! Each option type matches labels exactly; anything else is rejected
//! instead of being coerced to a default.

use std::fmt;

use crate::error::FormError;
use crate::input::Field;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TumorStage {
    StageI,
    StageII,
    StageIII,
    StageIV,
}

impl TumorStage {
    pub const ALL: [TumorStage; 4] = [
        TumorStage::StageI,
        TumorStage::StageII,
        TumorStage::StageIII,
        TumorStage::StageIV,
    ];

    pub fn from_label(label: &str) -> Option<Self> {
        match label {
            "Stage I" => Some(TumorStage::StageI),
            "Stage II" => Some(TumorStage::StageII),
            "Stage III" => Some(TumorStage::StageIII),
            "Stage IV" => Some(TumorStage::StageIV),
            _ => None,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            TumorStage::StageI => "Stage I",
            TumorStage::StageII => "Stage II",
            TumorStage::StageIII => "Stage III",
            TumorStage::StageIV => "Stage IV",
        }
    }

    /// Ordinal stage number used as the model feature.
    pub fn code(self) -> u8 {
        match self {
            TumorStage::StageI => 1,
            TumorStage::StageII => 2,
            TumorStage::StageIII => 3,
            TumorStage::StageIV => 4,
        }
    }
}

/// Hormone receptor / HER2 status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ReceptorStatus {
    Positive,
    Negative,
}

impl ReceptorStatus {
    pub const ALL: [ReceptorStatus; 2] = [ReceptorStatus::Positive, ReceptorStatus::Negative];

    pub fn from_label(label: &str) -> Option<Self> {
        match label {
            "Positive" => Some(ReceptorStatus::Positive),
            "Negative" => Some(ReceptorStatus::Negative),
            _ => None,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            ReceptorStatus::Positive => "Positive",
            ReceptorStatus::Negative => "Negative",
        }
    }

    pub fn indicator(self) -> u8 {
        match self {
            ReceptorStatus::Positive => 1,
            ReceptorStatus::Negative => 0,
        }
    }
}

/// Whether a therapy was given.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Therapy {
    Yes,
    No,
}

impl Therapy {
    pub const ALL: [Therapy; 2] = [Therapy::Yes, Therapy::No];

    pub fn from_label(label: &str) -> Option<Self> {
        match label {
            "Yes" => Some(Therapy::Yes),
            "No" => Some(Therapy::No),
            _ => None,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Therapy::Yes => "Yes",
            Therapy::No => "No",
        }
    }

    pub fn indicator(self) -> u8 {
        match self {
            Therapy::Yes => 1,
            Therapy::No => 0,
        }
    }
}

macro_rules! impl_display_label {
    ($($ty:ty),*) => {
        $(impl fmt::Display for $ty {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.label())
            }
        })*
    };
}

impl_display_label!(TumorStage, ReceptorStatus, Therapy);

pub(crate) fn parse_option<T>(
    field: Field,
    value: &str,
    from_label: fn(&str) -> Option<T>,
) -> Result<T, FormError> {
    from_label(value).ok_or_else(|| FormError::UnknownOption {
        field,
        value: value.to_string(),
    })
}
