use rust_decimal::Decimal;

use erpsuite_accounting::BudgetDistribution;
use erpsuite_core::i18n::Message;
use erpsuite_core::{DomainError, DomainResult, RecordId};

use crate::directory::BudgetDirectory;
use crate::messages;
use crate::model::BudgetControl;

/// Warnings for budgets exceeded by `distributions`.
///
/// Budgets under `block` control fail on the first exceed; budgets under
/// `warn` control contribute a message; the others are ignored.
pub(crate) fn budget_exceed_alerts<'a>(
    directory: &dyn BudgetDirectory,
    distributions: impl IntoIterator<Item = &'a BudgetDistribution>,
) -> DomainResult<Vec<Message>> {
    let mut per_budget: Vec<(RecordId, Decimal)> = Vec::new();
    for distribution in distributions {
        match per_budget.iter_mut().find(|(id, _)| *id == distribution.budget_id) {
            Some((_, amount)) => *amount += distribution.amount,
            None => per_budget.push((distribution.budget_id, distribution.amount)),
        }
    }

    let mut alerts = Vec::new();
    for (budget_id, distributed) in per_budget {
        let budget = directory.budget(budget_id).ok_or_else(|| {
            DomainError::configuration(Message::new(messages::BUDGET_NOT_FOUND).arg(budget_id))
        })?;
        let exceeded = budget.exceeded_by(distributed);
        if exceeded.is_zero() {
            continue;
        }

        let control = budget
            .global_budget_id
            .and_then(|id| directory.global_budget(id))
            .map(|g| g.control)
            .unwrap_or_default();
        let message = Message::new(messages::BUDGET_EXCEED).arg(&budget.code).arg(exceeded);
        match control {
            BudgetControl::Block => return Err(DomainError::inconsistency(message)),
            BudgetControl::Warn => {
                tracing::warn!(budget = %budget.code, %exceeded, "budget exceeded");
                alerts.push(message);
            }
            BudgetControl::None => {}
        }
    }
    Ok(alerts)
}
