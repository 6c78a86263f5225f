use super::{OverlapCheck, PriceRange, ServiceError, ShiftService};
use crate::model::{Shift, ShiftId};
use crate::overlap;
use crate::request::{CheckOverlapRequest, PriceFilter, TypeFilter};
use tracing::debug;

pub(super) fn get<'a>(service: &'a ShiftService, id: &ShiftId) -> Result<&'a Shift, ServiceError> {
    service
        .board
        .find_shift(id)
        .ok_or_else(|| ServiceError::NotFound(id.as_str().to_string()))
}

pub(super) fn list(service: &ShiftService) -> Vec<&Shift> {
    let mut shifts: Vec<&Shift> = service.board.shifts.iter().collect();
    shifts.sort_by(|a, b| b.created_at.cmp(&a.created_at));
    shifts
}

pub(super) fn filter_by_price(
    service: &ShiftService,
    filter: PriceFilter,
) -> Result<Vec<&Shift>, ServiceError> {
    filter.validate()?;
    Ok(list(service)
        .into_iter()
        .filter(|s| filter.contains(s.price))
        .collect())
}

pub(super) fn filter_by_type(service: &ShiftService, filter: TypeFilter) -> Vec<&Shift> {
    list(service)
        .into_iter()
        .filter(|s| s.has_type(filter.shift_type))
        .collect()
}

pub(super) fn price_range(service: &ShiftService) -> PriceRange {
    let mut prices = service.board.shifts.iter().map(|s| s.price);
    let Some(first) = prices.next() else {
        return PriceRange { min: 0.0, max: 0.0 };
    };
    prices.fold(PriceRange { min: first, max: first }, |acc, p| PriceRange {
        min: acc.min.min(p),
        max: acc.max.max(p),
    })
}

pub(super) fn check_overlap(
    service: &ShiftService,
    request: &CheckOverlapRequest,
) -> Result<OverlapCheck, ServiceError> {
    request.validate(service.opts.date_format)?;
    let existing = service.board.entries_on(&request.date, request.shift_type);
    let has_overlap = overlap::has_overlap(
        &request.as_candidate(),
        existing,
        request.exclude_shift_id.as_ref(),
    );
    debug!(date = %request.date, shift_type = %request.shift_type, has_overlap, "overlap check");
    Ok(OverlapCheck { has_overlap })
}
