mod mutate;
mod query;
mod types;
mod util;

pub use types::{OverlapCheck, PriceRange, ServiceError, ServiceOptions};

use crate::model::{Board, Shift, ShiftId};
use crate::request::{CheckOverlapRequest, CreateShiftRequest, PriceFilter, TypeFilter};
use crate::storage::Storage;

/// Service de gardes : encapsule le Board courant.
///
/// Chaque opération d'écriture valide tout avant de modifier le Board ; un
/// échec laisse l'état intact. La persistance se fait ensuite en une fois via
/// [`ShiftService::save`].
#[derive(Debug, Default)]
pub struct ShiftService {
    board: Board,
    opts: ServiceOptions,
}

impl ShiftService {
    pub fn new(opts: ServiceOptions) -> Self {
        Self::with_board(Board::default(), opts)
    }

    pub fn with_board(board: Board, opts: ServiceOptions) -> Self {
        Self { board, opts }
    }

    /// Charge le Board depuis un stockage.
    pub fn open<S: Storage + ?Sized>(storage: &S, opts: ServiceOptions) -> Result<Self, ServiceError> {
        Ok(Self::with_board(storage.load()?, opts))
    }

    pub fn save<S: Storage + ?Sized>(&self, storage: &S) -> Result<(), ServiceError> {
        storage.save(&self.board)?;
        Ok(())
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn create(&mut self, request: CreateShiftRequest) -> Result<Shift, ServiceError> {
        mutate::create(self, request)
    }

    pub fn update(&mut self, id: &ShiftId, request: CreateShiftRequest) -> Result<Shift, ServiceError> {
        mutate::update(self, id, request)
    }

    pub fn delete(&mut self, id: &ShiftId) -> Result<Shift, ServiceError> {
        mutate::delete(self, id)
    }

    pub fn get(&self, id: &ShiftId) -> Result<&Shift, ServiceError> {
        query::get(self, id)
    }

    /// Toutes les gardes, les plus récentes d'abord.
    pub fn list(&self) -> Vec<&Shift> {
        query::list(self)
    }

    pub fn filter_by_price(&self, filter: PriceFilter) -> Result<Vec<&Shift>, ServiceError> {
        query::filter_by_price(self, filter)
    }

    pub fn filter_by_type(&self, filter: TypeFilter) -> Vec<&Shift> {
        query::filter_by_type(self, filter)
    }

    pub fn price_range(&self) -> PriceRange {
        query::price_range(self)
    }

    pub fn check_overlap(&self, request: &CheckOverlapRequest) -> Result<OverlapCheck, ServiceError> {
        query::check_overlap(self, request)
    }
}
