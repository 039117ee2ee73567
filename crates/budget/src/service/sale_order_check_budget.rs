//! Budget check run before a sale order is finalized.

use std::sync::Arc;

use erpsuite_core::i18n::Message;
use erpsuite_core::DomainResult;

use crate::directory::BudgetDirectory;
use crate::messages;
use crate::model::SaleOrder;
use crate::service::exceed::budget_exceed_alerts;

#[derive(Clone)]
pub struct SaleOrderCheckBudgetService {
    directory: Arc<dyn BudgetDirectory>,
}

impl SaleOrderCheckBudgetService {
    pub fn new(directory: Arc<dyn BudgetDirectory>) -> Self {
        Self { directory }
    }

    pub fn is_budget_in_lines(&self, order: &SaleOrder) -> bool {
        order.lines.iter().any(|l| !l.budget_distributions.is_empty())
    }

    /// Confirmation to ask before finalizing, if any: budgets exceeded under
    /// `warn` control, or no distribution at all. `block` control fails.
    pub fn check_budget_before_finalize(&self, order: &SaleOrder) -> DomainResult<Option<Message>> {
        if order.lines.is_empty() {
            return Ok(None);
        }
        if !self.is_budget_in_lines(order) {
            return Ok(Some(Message::new(messages::BUDGET_MISSING)));
        }

        let alerts = budget_exceed_alerts(
            self.directory.as_ref(),
            order.lines.iter().flat_map(|l| l.budget_distributions.iter()),
        )?;
        if alerts.is_empty() {
            return Ok(None);
        }
        let joined = alerts.iter().map(ToString::to_string).collect::<Vec<_>>().join(" ");
        Ok(Some(Message::new(messages::BUDGET_EXCEED_CONFIRM).arg(joined)))
    }
}
