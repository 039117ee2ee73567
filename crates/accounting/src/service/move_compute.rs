use rust_decimal::Decimal;

use erpsuite_core::record_context::{Values, to_json};

use crate::entry::Move;

#[derive(Debug, Default, Clone, Copy)]
pub struct MoveComputeService;

impl MoveComputeService {
    pub fn new() -> Self {
        Self
    }

    /// `(total debit, total credit)` of the move lines.
    pub fn totals(&self, mv: &Move) -> (Decimal, Decimal) {
        mv.lines.iter().fold((Decimal::ZERO, Decimal::ZERO), |(debit, credit), line| {
            (debit + line.debit, credit + line.credit)
        })
    }

    pub fn compute_totals(&self, mv: &Move) -> Values {
        let (debit, credit) = self.totals(mv);
        let mut values = Values::new();
        values.insert("$totalLines".into(), mv.lines.len().into());
        values.insert("$totalDebit".into(), to_json(&debit));
        values.insert("$totalCredit".into(), to_json(&credit));
        values.insert("$difference".into(), to_json(&(debit - credit)));
        values
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::service::fixtures::balanced_move;
    use serde_json::json;

    #[test]
    fn totals_of_balanced_move() {
        let mv = balanced_move(12050);
        let values = MoveComputeService::new().compute_totals(&mv);

        assert_eq!(values["$totalLines"], json!(2));
        assert_eq!(values["$totalDebit"], json!("120.50"));
        assert_eq!(values["$difference"], json!("0.00"));
    }
}
