use crate::model::ShiftType;
use crate::request::{DateFormat, ValidationError, MAX_DATES};
use serde::Serialize;
use thiserror::Error;

/// Options du service
#[derive(Debug, Clone, Copy)]
pub struct ServiceOptions {
    pub date_format: DateFormat,
    /// Vérifie aussi les dates d'une même soumission entre elles.
    pub check_batch: bool,
    pub max_dates: usize,
}

impl Default for ServiceOptions {
    fn default() -> Self {
        Self {
            date_format: DateFormat::DayMonthYear,
            check_batch: false,
            max_dates: MAX_DATES,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PriceRange {
    pub min: f64,
    pub max: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OverlapCheck {
    pub has_overlap: bool,
}

#[derive(Error, Debug)]
pub enum ServiceError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error("overlapping shift exists for date {date} with type {shift_type}")]
    Overlap { date: String, shift_type: ShiftType },
    #[error("shift not found: {0}")]
    NotFound(String),
    #[error(transparent)]
    Storage(#[from] anyhow::Error),
}

impl ServiceError {
    /// Code HTTP équivalent.
    pub fn status(&self) -> u16 {
        match self {
            Self::Validation(_) => 400,
            Self::Overlap { .. } => 409,
            Self::NotFound(_) => 404,
            Self::Storage(_) => 500,
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            Self::Validation(_) => "validation",
            Self::Overlap { .. } => "conflict",
            Self::NotFound(_) => "not_found",
            Self::Storage(_) => "storage",
        }
    }
}
