use super::ServiceError;
use crate::model::{Board, ShiftDateEntry, ShiftId};
use crate::overlap::{self, Candidate};
use crate::request::ShiftDateInput;
use tracing::{debug, warn};

/// Chaque date est confrontée à l'état persisté seul ; les dates sœurs ne le
/// sont entre elles que si `check_batch` est actif.
pub(super) fn ensure_no_overlap(
    board: &Board,
    dates: &[ShiftDateInput],
    exclude: Option<&ShiftId>,
    check_batch: bool,
) -> Result<(), ServiceError> {
    for input in dates {
        let candidate = input.as_candidate();
        debug!(
            date = %input.date,
            start = %input.start_time,
            end = %input.end_time,
            shift_type = %input.shift_type,
            "checking overlap"
        );
        let existing = board.entries_on(&input.date, input.shift_type);
        if let Some(hit) = overlap::first_overlap(&candidate, existing, exclude) {
            warn!(
                date = %input.date,
                shift_type = %input.shift_type,
                conflicting_shift = hit.shift_id.as_str(),
                "overlap with stored entry"
            );
            return Err(conflict(input));
        }
    }

    if check_batch {
        let candidates: Vec<Candidate<'_>> =
            dates.iter().map(ShiftDateInput::as_candidate).collect();
        if let Some(&(a, b)) = overlap::batch_conflicts(&candidates).first() {
            warn!(
                date = %dates[a].date,
                shift_type = %dates[a].shift_type,
                first = a,
                second = b,
                "overlap inside submitted dates"
            );
            return Err(conflict(&dates[a]));
        }
    }

    Ok(())
}

fn conflict(input: &ShiftDateInput) -> ServiceError {
    ServiceError::Overlap {
        date: input.date.clone(),
        shift_type: input.shift_type,
    }
}

pub(super) fn build_entries(shift_id: &ShiftId, dates: Vec<ShiftDateInput>) -> Vec<ShiftDateEntry> {
    dates
        .into_iter()
        .map(|d| ShiftDateEntry {
            shift_id: shift_id.clone(),
            date: d.date,
            start_time: d.start_time,
            end_time: d.end_time,
            shift_type: d.shift_type,
        })
        .collect()
}
