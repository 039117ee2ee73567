use std::sync::Arc;

use chrono::NaiveDate;
use rust_decimal::Decimal;

use erpsuite_core::i18n::Message;
use erpsuite_core::{DomainError, DomainResult};

use crate::messages;
use crate::model::{StockLocation, StockMove, StockMoveStatus, Unit};
use crate::service::unit_conversion::UnitConversionService;

#[derive(Clone)]
pub struct StockMoveUpdateService {
    units: Arc<UnitConversionService>,
}

impl StockMoveUpdateService {
    pub fn new(units: Arc<UnitConversionService>) -> Self {
        Self { units }
    }

    fn status_error(mv: &StockMove, target: StockMoveStatus) -> DomainError {
        DomainError::inconsistency(
            Message::new(messages::STOCK_MOVE_STATUS_UNCHANGEABLE)
                .arg(&mv.reference)
                .arg(mv.status)
                .arg(target),
        )
    }

    /// Move a stock move to `target`.
    ///
    /// Draft moves can be planned, realized or canceled; planned moves can be
    /// realized or canceled. Any other transition is an inconsistency.
    pub fn update_status(
        &self,
        mv: &mut StockMove,
        target: StockMoveStatus,
        today: NaiveDate,
    ) -> DomainResult<()> {
        match (mv.status, target) {
            (StockMoveStatus::Draft, StockMoveStatus::Planned) => self.plan(mv, today),
            (StockMoveStatus::Draft, StockMoveStatus::Realized) => {
                self.plan(mv, today)?;
                self.realize(mv, today)
            }
            (StockMoveStatus::Planned, StockMoveStatus::Realized) => self.realize(mv, today),
            (StockMoveStatus::Draft | StockMoveStatus::Planned, StockMoveStatus::Canceled) => {
                self.cancel(mv)
            }
            _ => Err(Self::status_error(mv, target)),
        }
    }

    fn ensure_lines(mv: &StockMove) -> DomainResult<()> {
        if mv.lines.is_empty() {
            return Err(DomainError::inconsistency(
                Message::new(messages::STOCK_MOVE_NO_LINE).arg(&mv.reference),
            ));
        }
        Ok(())
    }

    fn plan(&self, mv: &mut StockMove, today: NaiveDate) -> DomainResult<()> {
        Self::ensure_lines(mv)?;
        if mv.to_location.is_none() {
            return Err(DomainError::missing_field(messages::STOCK_MOVE_NO_DESTINATION));
        }
        mv.estimated_date.get_or_insert(today);
        mv.status = StockMoveStatus::Planned;
        tracing::debug!(stock_move = %mv.reference, "stock move planned");
        Ok(())
    }

    fn realize(&self, mv: &mut StockMove, today: NaiveDate) -> DomainResult<()> {
        Self::ensure_lines(mv)?;
        mv.realized_date = Some(today);
        mv.status = StockMoveStatus::Realized;
        tracing::debug!(stock_move = %mv.reference, "stock move realized");
        Ok(())
    }

    fn cancel(&self, mv: &mut StockMove) -> DomainResult<()> {
        mv.status = StockMoveStatus::Canceled;
        tracing::debug!(stock_move = %mv.reference, "stock move canceled");
        Ok(())
    }

    /// Change the unit and/or moved quantity of a single-product move.
    ///
    /// Only the first line is updated: its quantity is first converted to the
    /// new unit, then overridden by `moved_qty` when given.
    pub fn update_stock_move_mobility(
        &self,
        mv: &mut StockMove,
        moved_qty: Option<Decimal>,
        unit: Option<Unit>,
    ) -> DomainResult<()> {
        let reference = mv.reference.clone();
        let line = mv.lines.first_mut().ok_or_else(|| {
            DomainError::inconsistency(Message::new(messages::STOCK_MOVE_NO_LINE).arg(&reference))
        })?;

        if let Some(unit) = unit {
            let converted = self
                .units
                .convert(&line.unit, &unit, line.qty, line.qty.scale())?;
            line.unit = unit;
            line.qty = converted;
            line.real_qty = converted;
        }
        if let Some(qty) = moved_qty {
            line.qty = qty;
            line.real_qty = qty;
        }
        Ok(())
    }

    pub fn update_stock_move_destination_location(
        &self,
        mv: &mut StockMove,
        to_location: Option<StockLocation>,
    ) -> DomainResult<()> {
        if mv.status.is_closed() {
            return Err(DomainError::inconsistency(
                Message::new(messages::STOCK_MOVE_LOCATION_UNCHANGEABLE)
                    .arg(&mv.reference)
                    .arg(mv.status),
            ));
        }
        let location =
            to_location.ok_or_else(|| DomainError::missing_field(messages::STOCK_MOVE_NO_DESTINATION))?;
        mv.to_address_str = Some(match &location.address {
            Some(address) => format!("{}\n{}", location.name, address),
            None => location.name.clone(),
        });
        mv.to_address = location.address.clone();
        mv.to_location = Some(location);
        Ok(())
    }
}
