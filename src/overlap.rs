//! Détection de chevauchement entre occurrences de même date et de même type.
//!
//! Les heures sont des chaînes `hh:mm` sur 24h : l'ordre lexicographique est
//! l'ordre chronologique dans une même journée. Aucune vérification de
//! `start < end` ici, c'est le rôle de la validation d'entrée.

use crate::model::{ShiftDateEntry, ShiftId, ShiftType};

/// Occurrence candidate (création, mise à jour ou simple vérification).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Candidate<'a> {
    pub date: &'a str,
    pub start_time: &'a str,
    pub end_time: &'a str,
    pub shift_type: ShiftType,
}

impl<'a> Candidate<'a> {
    pub fn new(date: &'a str, start_time: &'a str, end_time: &'a str, shift_type: ShiftType) -> Self {
        Self {
            date,
            start_time,
            end_time,
            shift_type,
        }
    }
}

/// Trois cas, bornes comprises telles quelles :
/// début dans `[other_start, other_end)`, fin dans `(other_start, other_end]`,
/// ou englobement de `[other_start, other_end]`.
pub fn overlaps(start: &str, end: &str, other_start: &str, other_end: &str) -> bool {
    (start >= other_start && start < other_end)
        || (end > other_start && end <= other_end)
        || (start <= other_start && end >= other_end)
}

/// Première occurrence existante en conflit avec `candidate`.
///
/// Le filtre date/type est refait ici même si l'appelant a déjà pré-filtré.
/// Avec `exclude_shift_id`, toutes les occurrences de cette garde sont ignorées
/// (mise à jour sur place).
pub fn first_overlap<'e, I>(
    candidate: &Candidate<'_>,
    existing: I,
    exclude_shift_id: Option<&ShiftId>,
) -> Option<&'e ShiftDateEntry>
where
    I: IntoIterator<Item = &'e ShiftDateEntry>,
{
    existing
        .into_iter()
        .filter(|e| e.date == candidate.date && e.shift_type == candidate.shift_type)
        .filter(|e| exclude_shift_id.map_or(true, |id| &e.shift_id != id))
        .find(|e| {
            overlaps(
                candidate.start_time,
                candidate.end_time,
                &e.start_time,
                &e.end_time,
            )
        })
}

pub fn has_overlap<'e, I>(
    candidate: &Candidate<'_>,
    existing: I,
    exclude_shift_id: Option<&ShiftId>,
) -> bool
where
    I: IntoIterator<Item = &'e ShiftDateEntry>,
{
    first_overlap(candidate, existing, exclude_shift_id).is_some()
}

/// Paires `(i, j)`, `i < j`, de candidats d'une même soumission qui se chevauchent.
pub fn batch_conflicts(candidates: &[Candidate<'_>]) -> Vec<(usize, usize)> {
    let mut out = Vec::new();
    for (i, a) in candidates.iter().enumerate() {
        for (j, b) in candidates.iter().enumerate().skip(i + 1) {
            if a.date != b.date || a.shift_type != b.shift_type {
                continue;
            }
            if overlaps(a.start_time, a.end_time, b.start_time, b.end_time) {
                out.push((i, j));
            }
        }
    }
    out
}
