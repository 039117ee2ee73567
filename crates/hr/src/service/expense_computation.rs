use rust_decimal::Decimal;

use crate::model::Expense;
use crate::service::ExpenseLineToolService;

#[derive(Debug, Default, Clone, Copy)]
pub struct ExpenseComputationService {
    tools: ExpenseLineToolService,
}

impl ExpenseComputationService {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn compute(&self, expense: &mut Expense) {
        let mut ex_tax = Decimal::ZERO;
        let mut tax = Decimal::ZERO;
        let mut in_tax = Decimal::ZERO;
        let mut kilometric = Decimal::ZERO;

        for line in &expense.lines {
            ex_tax += line.untaxed_amount;
            tax += line.total_tax;
            in_tax += line.total_amount;
            if self.tools.is_kilometric_expense_line(line) {
                kilometric += line.total_amount;
            }
        }

        expense.ex_tax_total = ex_tax;
        expense.tax_total = tax;
        expense.in_tax_total = in_tax;
        expense.kilometric_total = kilometric;
        tracing::debug!(expense = %expense.label(), total = %in_tax, "expense totals computed");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{ExpenseLine, KilometricAllowParam};

    #[test]
    fn totals_split_general_and_kilometric() {
        let mut meal = ExpenseLine::new("MEAL");
        meal.total_amount = Decimal::new(2400, 2);
        meal.total_tax = Decimal::new(400, 2);
        meal.untaxed_amount = Decimal::new(2000, 2);

        let mut trip = ExpenseLine::new("KILOMETRIC");
        trip.kilometric_allow_param = Some(KilometricAllowParam {
            code: "5CV".into(),
            rate: Decimal::new(636, 3),
        });
        trip.total_amount = Decimal::new(6360, 2);
        trip.untaxed_amount = Decimal::new(6360, 2);

        let mut expense = crate::model::Expense::new("EXP-0001");
        expense.lines = vec![meal, trip];
        ExpenseComputationService::new().compute(&mut expense);

        assert_eq!(expense.in_tax_total, Decimal::new(8760, 2));
        assert_eq!(expense.ex_tax_total, Decimal::new(8360, 2));
        assert_eq!(expense.tax_total, Decimal::new(400, 2));
        assert_eq!(expense.kilometric_total, Decimal::new(6360, 2));
    }
}
