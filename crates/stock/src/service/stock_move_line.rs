use rust_decimal::Decimal;

use erpsuite_core::{DomainError, DomainResult};

use crate::messages;
use crate::model::{Conformity, StockMoveLine};

#[derive(Debug, Clone, Copy, Default)]
pub struct StockMoveLineService;

impl StockMoveLineService {
    pub fn new() -> Self {
        Self
    }

    /// Set the received quantity and conformity of a line. Absent values are
    /// left unchanged.
    pub fn update_stock_move_line(
        &self,
        line: &mut StockMoveLine,
        real_qty: Option<Decimal>,
        conformity: Option<Conformity>,
    ) -> DomainResult<()> {
        if let Some(qty) = real_qty {
            if qty.is_sign_negative() {
                return Err(DomainError::inconsistency(messages::QTY_NEGATIVE));
            }
            line.real_qty = qty;
        }
        if let Some(conformity) = conformity {
            line.conformity = conformity;
        }
        tracing::debug!(line = %line.id, real_qty = %line.real_qty, conformity = ?line.conformity, "stock move line updated");
        Ok(())
    }
}
