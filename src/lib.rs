#![forbid(unsafe_code)]
//! Shiftboard — bibliothèque de gestion de gardes locale (sans BD).
//!
//! - Gardes tarifées, chacune avec 1 à 10 occurrences datées et typées.
//! - Détection de chevauchement par date et par type.
//! - Stockage fichier JSON atomique ; import/export CSV.
//! - Dates et heures conservées telles que saisies (`dd-mm-yyyy`/`yyyy-mm-dd`, `hh:mm`).

pub mod io;
pub mod model;
pub mod overlap;
pub mod request;
pub mod service;
pub mod storage;

pub use model::{Board, Shift, ShiftDateEntry, ShiftId, ShiftType};
pub use overlap::{batch_conflicts, has_overlap, Candidate};
pub use request::{
    CheckOverlapRequest, CreateShiftRequest, DateFormat, FieldIssue, PriceFilter, ShiftDateInput,
    ShiftInput, TypeFilter, ValidationError,
};
pub use service::{OverlapCheck, PriceRange, ServiceError, ServiceOptions, ShiftService};
pub use storage::{JsonStorage, MemoryStorage, Storage};
