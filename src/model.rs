use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// Type de garde. Les chevauchements ne sont vérifiés qu'à type égal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ShiftType {
    Consultation,
    Telephone,
    Ambulance,
}

impl ShiftType {
    pub const ALL: [ShiftType; 3] = [Self::Consultation, Self::Telephone, Self::Ambulance];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Consultation => "Consultation",
            Self::Telephone => "Telephone",
            Self::Ambulance => "Ambulance",
        }
    }
}

impl fmt::Display for ShiftType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ShiftType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|t| t.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| {
                format!("unknown shift type {s:?} (expected Consultation, Telephone or Ambulance)")
            })
    }
}

/// Identifiant fort pour Shift
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ShiftId(String);

impl ShiftId {
    pub fn new<S: AsRef<str>>(s: S) -> Self {
        Self(s.as_ref().to_owned())
    }
    pub fn random() -> Self {
        Self(Uuid::new_v4().to_string())
    }
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Occurrence datée d'une garde : date + plage horaire + type.
///
/// `date` et les heures sont les chaînes littérales validées à l'entrée
/// (`dd-mm-yyyy` ou `yyyy-mm-dd`, `hh:mm`) ; la comparaison se fait par
/// égalité/ordre de chaînes, jamais par arithmétique calendaire.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShiftDateEntry {
    pub shift_id: ShiftId,
    pub date: String,
    pub start_time: String,
    pub end_time: String,
    #[serde(rename = "type")]
    pub shift_type: ShiftType,
}

/// Garde : conteneur nommé et tarifé d'une ou plusieurs occurrences.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Shift {
    pub id: ShiftId,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub price: f64,
    pub dates: Vec<ShiftDateEntry>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Shift {
    pub fn has_type(&self, shift_type: ShiftType) -> bool {
        self.dates.iter().any(|d| d.shift_type == shift_type)
    }
}

/// État persisté complet
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct Board {
    #[serde(default)]
    pub shifts: Vec<Shift>,
}

impl Board {
    pub fn find_shift<'a>(&'a self, id: &ShiftId) -> Option<&'a Shift> {
        self.shifts.iter().find(|s| &s.id == id)
    }
    pub fn position(&self, id: &ShiftId) -> Option<usize> {
        self.shifts.iter().position(|s| &s.id == id)
    }

    /// Toutes les occurrences stockées, toutes gardes confondues.
    pub fn entries(&self) -> impl Iterator<Item = &ShiftDateEntry> {
        self.shifts.iter().flat_map(|s| s.dates.iter())
    }

    /// Occurrences d'une date et d'un type donnés (pré-filtre côté stockage).
    pub fn entries_on<'a>(
        &'a self,
        date: &'a str,
        shift_type: ShiftType,
    ) -> impl Iterator<Item = &'a ShiftDateEntry> + 'a {
        self.entries()
            .filter(move |e| e.date == date && e.shift_type == shift_type)
    }
}
