use super::{util, ServiceError, ShiftService};
use crate::model::{Shift, ShiftId};
use crate::request::CreateShiftRequest;
use chrono::Utc;
use tracing::info;

pub(super) fn create(
    service: &mut ShiftService,
    request: CreateShiftRequest,
) -> Result<Shift, ServiceError> {
    let opts = service.opts;
    request.validate(opts.date_format, opts.max_dates)?;
    util::ensure_no_overlap(&service.board, &request.dates, None, opts.check_batch)?;

    let now = Utc::now();
    let id = ShiftId::random();
    let CreateShiftRequest { shift, dates } = request;
    let created = Shift {
        id: id.clone(),
        title: shift.title,
        description: shift.description,
        price: shift.price,
        dates: util::build_entries(&id, dates),
        created_at: now,
        updated_at: now,
    };

    info!(shift_id = id.as_str(), dates = created.dates.len(), "shift created");
    service.board.shifts.push(created.clone());
    Ok(created)
}

pub(super) fn update(
    service: &mut ShiftService,
    id: &ShiftId,
    request: CreateShiftRequest,
) -> Result<Shift, ServiceError> {
    let opts = service.opts;
    request.validate(opts.date_format, opts.max_dates)?;
    let Some(pos) = service.board.position(id) else {
        return Err(ServiceError::NotFound(id.as_str().to_string()));
    };
    util::ensure_no_overlap(&service.board, &request.dates, Some(id), opts.check_batch)?;

    let CreateShiftRequest { shift, dates } = request;
    let target = &mut service.board.shifts[pos];
    target.title = shift.title;
    target.description = shift.description;
    target.price = shift.price;
    // remplacement complet : anciennes dates supprimées, nouvelles insérées
    target.dates = util::build_entries(id, dates);
    target.updated_at = Utc::now();

    info!(shift_id = id.as_str(), dates = target.dates.len(), "shift updated");
    Ok(target.clone())
}

pub(super) fn delete(service: &mut ShiftService, id: &ShiftId) -> Result<Shift, ServiceError> {
    let Some(pos) = service.board.position(id) else {
        return Err(ServiceError::NotFound(id.as_str().to_string()));
    };
    let removed = service.board.shifts.remove(pos);
    info!(shift_id = id.as_str(), dates = removed.dates.len(), "shift deleted");
    Ok(removed)
}
