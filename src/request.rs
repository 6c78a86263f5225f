//! Requêtes typées et leur validation, avant tout passage par le service.

use crate::model::{ShiftId, ShiftType};
use crate::overlap::Candidate;
use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

pub const MAX_TITLE_CHARS: usize = 100;
pub const MAX_DESCRIPTION_CHARS: usize = 500;
pub const MAX_DATES: usize = 10;

/// Format littéral des dates acceptées.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum DateFormat {
    /// `dd-mm-yyyy`
    #[default]
    #[value(name = "dmy")]
    DayMonthYear,
    /// `yyyy-mm-dd`
    #[value(name = "iso")]
    Iso,
}

impl DateFormat {
    fn shape(self) -> &'static str {
        match self {
            Self::DayMonthYear => "dd-dd-dddd",
            Self::Iso => "dddd-dd-dd",
        }
    }

    fn chrono_format(self) -> &'static str {
        match self {
            Self::DayMonthYear => "%d-%m-%Y",
            Self::Iso => "%Y-%m-%d",
        }
    }

    fn label(self) -> &'static str {
        match self {
            Self::DayMonthYear => "dd-mm-yyyy",
            Self::Iso => "yyyy-mm-dd",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldIssue {
    pub field: String,
    pub message: String,
}

impl fmt::Display for FieldIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("validation error: {}", join_issues(.issues))]
pub struct ValidationError {
    pub issues: Vec<FieldIssue>,
}

impl ValidationError {
    pub fn single(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            issues: vec![FieldIssue {
                field: field.into(),
                message: message.into(),
            }],
        }
    }

    pub fn has_field(&self, field: &str) -> bool {
        self.issues.iter().any(|i| i.field == field)
    }
}

fn join_issues(issues: &[FieldIssue]) -> String {
    issues
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

#[derive(Debug, Default)]
struct Issues(Vec<FieldIssue>);

impl Issues {
    fn push(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.0.push(FieldIssue {
            field: field.into(),
            message: message.into(),
        });
    }

    fn finish(self) -> Result<(), ValidationError> {
        if self.0.is_empty() {
            Ok(())
        } else {
            Err(ValidationError { issues: self.0 })
        }
    }

    fn check_date(&mut self, field: &str, value: &str, format: DateFormat) {
        if !has_shape(value, format.shape()) {
            self.push(field, format!("date must be in {} format", format.label()));
        } else if NaiveDate::parse_from_str(value, format.chrono_format()).is_err() {
            self.push(field, format!("{value} is not a calendar date"));
        }
    }

    /// Retourne `true` si l'heure est exploitable pour la comparaison start/end.
    fn check_time(&mut self, field: &str, value: &str) -> bool {
        if !has_shape(value, "dd:dd") {
            self.push(field, "time must be in hh:mm format");
            return false;
        }
        if NaiveTime::parse_from_str(value, "%H:%M").is_err() {
            self.push(field, format!("{value} is not a valid time of day"));
            return false;
        }
        true
    }

    fn check_range(&mut self, prefix: &str, start: &str, end: &str) {
        let start_ok = self.check_time(&format!("{prefix}startTime"), start);
        let end_ok = self.check_time(&format!("{prefix}endTime"), end);
        if start_ok && end_ok && start >= end {
            self.push(
                format!("{prefix}endTime"),
                "end time must be after start time",
            );
        }
    }

    fn check_price(&mut self, field: &str, value: f64) {
        if !value.is_finite() || value < 0.0 {
            self.push(field, "price must be a number >= 0");
        }
    }
}

/// `d` = chiffre ASCII, tout autre octet doit correspondre tel quel.
fn has_shape(value: &str, shape: &str) -> bool {
    value.len() == shape.len()
        && value
            .bytes()
            .zip(shape.bytes())
            .all(|(c, p)| if p == b'd' { c.is_ascii_digit() } else { c == p })
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShiftInput {
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    pub price: f64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShiftDateInput {
    pub date: String,
    pub start_time: String,
    pub end_time: String,
    #[serde(rename = "type")]
    pub shift_type: ShiftType,
}

impl ShiftDateInput {
    pub fn new(date: &str, start_time: &str, end_time: &str, shift_type: ShiftType) -> Self {
        Self {
            date: date.to_string(),
            start_time: start_time.to_string(),
            end_time: end_time.to_string(),
            shift_type,
        }
    }

    pub fn as_candidate(&self) -> Candidate<'_> {
        Candidate::new(&self.date, &self.start_time, &self.end_time, self.shift_type)
    }
}

/// Corps de création comme de mise à jour (remplacement complet des dates).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateShiftRequest {
    pub shift: ShiftInput,
    pub dates: Vec<ShiftDateInput>,
}

impl CreateShiftRequest {
    pub fn validate(&self, format: DateFormat, max_dates: usize) -> Result<(), ValidationError> {
        let mut issues = Issues::default();

        let title_len = self.shift.title.chars().count();
        if self.shift.title.trim().is_empty() {
            issues.push("shift.title", "title cannot be empty");
        } else if title_len > MAX_TITLE_CHARS {
            issues.push(
                "shift.title",
                format!("title must be at most {MAX_TITLE_CHARS} characters"),
            );
        }
        if let Some(desc) = &self.shift.description {
            if desc.chars().count() > MAX_DESCRIPTION_CHARS {
                issues.push(
                    "shift.description",
                    format!("description must be at most {MAX_DESCRIPTION_CHARS} characters"),
                );
            }
        }
        issues.check_price("shift.price", self.shift.price);

        if self.dates.is_empty() {
            issues.push("dates", "at least one date is required");
        } else if self.dates.len() > max_dates {
            issues.push("dates", format!("at most {max_dates} dates are allowed"));
        }
        for (idx, date) in self.dates.iter().enumerate() {
            let prefix = format!("dates[{idx}].");
            issues.check_date(&format!("{prefix}date"), &date.date, format);
            issues.check_range(&prefix, &date.start_time, &date.end_time);
        }

        issues.finish()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckOverlapRequest {
    pub date: String,
    pub start_time: String,
    pub end_time: String,
    #[serde(rename = "type")]
    pub shift_type: ShiftType,
    #[serde(default)]
    pub exclude_shift_id: Option<ShiftId>,
}

impl CheckOverlapRequest {
    pub fn validate(&self, format: DateFormat) -> Result<(), ValidationError> {
        let mut issues = Issues::default();
        issues.check_date("date", &self.date, format);
        issues.check_range("", &self.start_time, &self.end_time);
        issues.finish()
    }

    pub fn as_candidate(&self) -> Candidate<'_> {
        Candidate::new(&self.date, &self.start_time, &self.end_time, self.shift_type)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PriceFilter {
    #[serde(default)]
    pub min_price: f64,
    pub max_price: f64,
}

impl PriceFilter {
    pub fn validate(&self) -> Result<(), ValidationError> {
        let mut issues = Issues::default();
        issues.check_price("minPrice", self.min_price);
        issues.check_price("maxPrice", self.max_price);
        if issues.0.is_empty() && self.min_price > self.max_price {
            issues.push("maxPrice", "maxPrice must be >= minPrice");
        }
        issues.finish()
    }

    pub fn contains(&self, price: f64) -> bool {
        self.min_price <= price && price <= self.max_price
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypeFilter {
    #[serde(rename = "type")]
    pub shift_type: ShiftType,
}
