use erpsuite_core::i18n::Message;
use erpsuite_core::{DomainError, DomainResult, RecordId};

use crate::messages;
use crate::model::{Expense, ExpenseLine, ExpenseLineUpdate};
use crate::service::{ExpenseComputationService, ExpenseLineToolService};

#[derive(Debug, Default, Clone, Copy)]
pub struct ExpenseLineUpdateService {
    tools: ExpenseLineToolService,
    computation: ExpenseComputationService,
}

impl ExpenseLineUpdateService {
    pub fn new() -> Self {
        Self::default()
    }

    /// Apply `update` to the line `line_id` of `expense`.
    ///
    /// When `new_expense` is given the line moves to it and both expenses are
    /// recomputed; otherwise `expense` is recomputed. Nothing is modified
    /// when an error is returned.
    pub fn update_expense_line(
        &self,
        expense: &mut Expense,
        line_id: RecordId,
        update: &ExpenseLineUpdate,
        new_expense: Option<&mut Expense>,
    ) -> DomainResult<ExpenseLine> {
        let index = expense.lines.iter().position(|l| l.id == line_id).ok_or_else(|| {
            DomainError::inconsistency(
                Message::new(messages::EXPENSE_LINE_NOT_IN_EXPENSE)
                    .arg(line_id)
                    .arg(expense.label()),
            )
        })?;

        let mut line = expense.lines[index].clone();
        if self.tools.is_kilometric_expense_line(&line) {
            self.update_kilometric_expense_line(expense, &mut line, update)?;
        } else {
            self.update_general_expense_line(expense, &mut line, update)?;
        }

        match new_expense {
            Some(new_expense) if new_expense.id != expense.id => {
                self.check_parents_status(expense, new_expense)?;
                expense.lines.remove(index);
                line.expense_id = Some(new_expense.id);
                new_expense.lines.push(line.clone());
                self.computation.compute(new_expense);
                tracing::debug!(
                    line = %line.id,
                    from = %expense.label(),
                    to = %new_expense.label(),
                    "expense line moved"
                );
            }
            _ => {
                expense.lines[index] = line.clone();
            }
        }
        self.computation.compute(expense);
        Ok(line)
    }

    pub fn update_general_expense_line(
        &self,
        expense: &Expense,
        line: &mut ExpenseLine,
        update: &ExpenseLineUpdate,
    ) -> DomainResult<()> {
        self.check_parent_status(expense)?;
        self.update_basic_expense_line(line, update);
        self.tools.set_general_expense_line_info(
            update.expense_product.as_deref(),
            update.total_amount,
            update.total_tax,
            update.justification_file.as_deref(),
            line,
        );
        Ok(())
    }

    pub fn update_kilometric_expense_line(
        &self,
        expense: &Expense,
        line: &mut ExpenseLine,
        update: &ExpenseLineUpdate,
    ) -> DomainResult<()> {
        self.check_parent_status(expense)?;
        self.update_basic_expense_line(line, update);

        if let Some(kind) = update.kilometric_type {
            line.kilometric_type = Some(kind);
        }
        if let Some(param) = update.kilometric_allow_param.as_ref() {
            line.kilometric_allow_param = Some(param.clone());
        }
        if let Some(city) = update.from_city.as_ref().filter(|c| !c.is_empty()) {
            line.from_city = Some(city.clone());
        }
        if let Some(city) = update.to_city.as_ref().filter(|c| !c.is_empty()) {
            line.to_city = Some(city.clone());
        }

        self.tools.compute_distance(update.distance, line)?;
        self.tools.compute_amount(line)
    }

    fn update_basic_expense_line(&self, line: &mut ExpenseLine, update: &ExpenseLineUpdate) {
        if let Some(project) = update.project.as_ref() {
            line.project = Some(project.clone());
        }
        if let Some(comments) = update.comments.as_ref() {
            line.comments = Some(comments.clone());
        }
        if let Some(employee) = update.employee.as_ref() {
            line.employee = Some(employee.clone());
        }
        if let Some(currency) = update.currency.as_ref() {
            line.currency = Some(currency.clone());
        }
        if let Some(date) = update.expense_date {
            line.expense_date = Some(date);
        }
        if let Some(product) = update.expense_product.as_ref() {
            line.expense_product = Some(product.clone());
        }
        if let Some(to_invoice) = update.to_invoice {
            line.to_invoice = to_invoice;
        }
    }

    fn check_parent_status(&self, expense: &Expense) -> DomainResult<()> {
        if !expense.is_draft() {
            return Err(DomainError::inconsistency(
                Message::new(messages::EXPENSE_NOT_DRAFT).arg(expense.label()),
            ));
        }
        Ok(())
    }

    fn check_parents_status(&self, old_expense: &Expense, new_expense: &Expense) -> DomainResult<()> {
        if !old_expense.is_draft() {
            return Err(DomainError::inconsistency(
                Message::new(messages::EXPENSE_LINE_PARENT_NOT_DRAFT).arg(old_expense.label()),
            ));
        }
        if !new_expense.is_draft() {
            return Err(DomainError::inconsistency(
                Message::new(messages::EXPENSE_LINE_NEW_EXPENSE_NOT_DRAFT).arg(new_expense.label()),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{ExpenseStatus, KilometricAllowParam, KilometricType};
    use crate::service::expense_line_tool::KILOMETRIC_PRODUCT;
    use rust_decimal::Decimal;

    fn meal_line(amount: i64) -> ExpenseLine {
        let mut line = ExpenseLine::new("MEAL");
        line.total_amount = Decimal::new(amount, 2);
        line.untaxed_amount = Decimal::new(amount, 2);
        line
    }

    fn expense_with(reference: &str, lines: Vec<ExpenseLine>) -> Expense {
        let mut expense = Expense::new(reference);
        expense.lines = lines
            .into_iter()
            .map(|mut l| {
                l.expense_id = Some(expense.id);
                l
            })
            .collect();
        ExpenseComputationService::new().compute(&mut expense);
        expense
    }

    #[test]
    fn general_line_only_overwrites_provided_fields() {
        let svc = ExpenseLineUpdateService::new();
        let mut line = meal_line(1500);
        line.comments = Some("lunch".into());
        let line_id = line.id;
        let mut expense = expense_with("EXP-1", vec![line]);

        let update = ExpenseLineUpdate {
            total_amount: Some(Decimal::new(1800, 2)),
            total_tax: Some(Decimal::new(300, 2)),
            ..ExpenseLineUpdate::default()
        };
        let updated = svc.update_expense_line(&mut expense, line_id, &update, None).unwrap();

        assert_eq!(updated.comments.as_deref(), Some("lunch"));
        assert_eq!(updated.untaxed_amount, Decimal::new(1500, 2));
        assert_eq!(expense.in_tax_total, Decimal::new(1800, 2));
    }

    #[test]
    fn kilometric_line_recomputes_amount() {
        let svc = ExpenseLineUpdateService::new();
        let mut line = ExpenseLine::new(KILOMETRIC_PRODUCT);
        line.kilometric_allow_param = Some(KilometricAllowParam {
            code: "5CV".into(),
            rate: Decimal::new(5, 1),
        });
        let line_id = line.id;
        let mut expense = expense_with("EXP-1", vec![line]);

        let update = ExpenseLineUpdate {
            kilometric_type: Some(KilometricType::RoundTrip),
            distance: Some(Decimal::new(42, 0)),
            from_city: Some("Lyon".into()),
            to_city: Some(String::new()),
            ..ExpenseLineUpdate::default()
        };
        let updated = svc.update_expense_line(&mut expense, line_id, &update, None).unwrap();

        assert_eq!(updated.distance, Decimal::new(84, 0));
        assert_eq!(updated.total_amount, Decimal::new(4200, 2));
        assert_eq!(updated.from_city.as_deref(), Some("Lyon"));
        assert!(updated.to_city.is_none());
        assert_eq!(expense.kilometric_total, Decimal::new(4200, 2));
    }

    #[test]
    fn non_draft_expense_is_rejected_without_changes() {
        let svc = ExpenseLineUpdateService::new();
        let line = meal_line(1500);
        let line_id = line.id;
        let mut expense = expense_with("EXP-1", vec![line]);
        expense.status = ExpenseStatus::Validated;
        let before = expense.clone();

        let update = ExpenseLineUpdate {
            total_amount: Some(Decimal::ONE),
            ..ExpenseLineUpdate::default()
        };
        match svc.update_expense_line(&mut expense, line_id, &update, None).unwrap_err() {
            DomainError::Inconsistency(msg) if msg.key() == messages::EXPENSE_NOT_DRAFT => {}
            other => panic!("unexpected error: {other:?}"),
        }
        assert_eq!(expense, before);
    }

    #[test]
    fn line_moves_to_new_expense() {
        let svc = ExpenseLineUpdateService::new();
        let moved = meal_line(1500);
        let kept = meal_line(700);
        let moved_id = moved.id;
        let mut old_expense = expense_with("EXP-1", vec![moved, kept]);
        let mut new_expense = expense_with("EXP-2", vec![]);

        let updated = svc
            .update_expense_line(
                &mut old_expense,
                moved_id,
                &ExpenseLineUpdate::default(),
                Some(&mut new_expense),
            )
            .unwrap();

        assert_eq!(updated.expense_id, Some(new_expense.id));
        assert_eq!(old_expense.lines.len(), 1);
        assert_eq!(old_expense.in_tax_total, Decimal::new(700, 2));
        assert_eq!(new_expense.in_tax_total, Decimal::new(1500, 2));
    }

    #[test]
    fn move_to_non_draft_expense_is_rejected() {
        let svc = ExpenseLineUpdateService::new();
        let line = meal_line(1500);
        let line_id = line.id;
        let mut old_expense = expense_with("EXP-1", vec![line]);
        let mut new_expense = expense_with("EXP-2", vec![]);
        new_expense.status = ExpenseStatus::Confirmed;

        let err = svc
            .update_expense_line(
                &mut old_expense,
                line_id,
                &ExpenseLineUpdate::default(),
                Some(&mut new_expense),
            )
            .unwrap_err();

        assert_eq!(err.message().key(), messages::EXPENSE_LINE_NEW_EXPENSE_NOT_DRAFT);
        assert_eq!(old_expense.lines.len(), 1);
    }

    #[test]
    fn unknown_line_is_an_inconsistency() {
        let svc = ExpenseLineUpdateService::new();
        let mut expense = expense_with("EXP-1", vec![]);
        let err = svc
            .update_expense_line(&mut expense, RecordId::new(), &ExpenseLineUpdate::default(), None)
            .unwrap_err();
        assert_eq!(err.message().key(), messages::EXPENSE_LINE_NOT_IN_EXPENSE);
    }
}
