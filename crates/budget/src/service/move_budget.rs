//! Budget distribution of move lines.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use erpsuite_accounting::{BudgetDistribution, Move, MoveStatus};
use erpsuite_core::i18n::Message;
use erpsuite_core::record_context::to_json;
use erpsuite_core::{ActionContext, DomainResult, RecordContext};

use crate::directory::BudgetDirectory;
use crate::key::BudgetKey;
use crate::messages;
use crate::service::exceed::budget_exceed_alerts;

/// Budget application settings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BudgetAccess {
    pub enabled: bool,
    /// Roles allowed to compute distributions; empty means everyone.
    #[serde(default)]
    pub authorized_roles: Vec<String>,
}

impl BudgetAccess {
    pub fn check_budget_key_and_role(&self, ctx: &ActionContext) -> bool {
        self.authorized_roles.is_empty() || self.authorized_roles.iter().any(|r| ctx.has_role(r))
    }
}

#[derive(Clone)]
pub struct MoveBudgetService {
    directory: Arc<dyn BudgetDirectory>,
    access: BudgetAccess,
}

impl MoveBudgetService {
    pub fn new(directory: Arc<dyn BudgetDirectory>, access: BudgetAccess) -> Self {
        Self { directory, access }
    }

    pub fn access(&self) -> &BudgetAccess {
        &self.access
    }

    /// Distribute the full amount of every budget line that has no
    /// distribution yet onto the budget matching its key at the move date.
    ///
    /// Returns the comma-joined keys for which no budget was found, or an
    /// empty string.
    pub fn compute_budget_distribution(&self, mv: &mut Move) -> String {
        let (Some(company_code), Some(date)) = (mv.company.as_ref().map(|c| c.code.clone()), mv.date) else {
            return String::new();
        };

        let mut missing: Vec<String> = Vec::new();
        for line in &mut mv.lines {
            let Some(account) = line.account.as_ref().filter(|a| a.use_for_budget) else {
                continue;
            };
            if !line.budget_distributions.is_empty() {
                continue;
            }

            let key = BudgetKey::compute(&company_code, &account.code, &line.analytic_codes);
            match self.directory.budget_for_key(&key, date) {
                Some(budget) => line.budget_distributions.push(BudgetDistribution {
                    budget_id: budget.id,
                    budget_key: key.to_string(),
                    amount: line.debit.max(line.credit),
                }),
                None => {
                    let key = key.to_string();
                    if !missing.contains(&key) {
                        missing.push(key);
                    }
                }
            }
        }

        if !missing.is_empty() {
            tracing::debug!(move_id = %mv.id, missing = ?missing, "no budget for some move lines");
        }
        missing.join(", ")
    }

    pub fn is_budget_in_lines(&self, mv: &Move) -> bool {
        mv.lines.iter().any(|l| !l.budget_distributions.is_empty())
    }

    /// A posted move with budget lines but no distribution at all.
    pub fn check_missing_budget_distribution_on_accounted_move(&self, mv: &Move) -> bool {
        matches!(mv.status, MoveStatus::Accounted | MoveStatus::Daybook)
            && mv
                .lines
                .iter()
                .any(|l| l.account.as_ref().is_some_and(|a| a.use_for_budget))
            && !self.is_budget_in_lines(mv)
    }

    pub fn get_budget_exceed_alert(&self, mv: &Move) -> DomainResult<Vec<Message>> {
        budget_exceed_alerts(
            self.directory.as_ref(),
            mv.lines.iter().flat_map(|l| l.budget_distributions.iter()),
        )
    }

    /// Form action computing the distribution of a move.
    pub fn compute_budget_distribution_action(&self, mv: &mut Move, ctx: &ActionContext) -> RecordContext {
        let mut result = RecordContext::new();
        if !self.access.enabled || mv.company.is_none() {
            return result;
        }
        if !self.access.check_budget_key_and_role(ctx) && self.is_budget_in_lines(mv) {
            result.put_in_info(messages::BUDGET_ROLE_NOT_AUTHORIZED);
            return result;
        }

        let missing = self.compute_budget_distribution(mv);
        result.put_value("budgetDistributionGenerated", self.is_budget_in_lines(mv));
        result.put_value("lines", to_json(&mv.lines));
        if !missing.is_empty() {
            result.put_in_info(Message::new(messages::BUDGET_KEY_NOT_FOUND).arg(missing));
        }
        result
    }

    /// Alert shown before posting a move without distribution.
    pub fn check_budget_distribution_action(&self, mv: &Move) -> RecordContext {
        let mut result = RecordContext::new();
        if self.check_missing_budget_distribution_on_accounted_move(mv) {
            result.put_in_alert(messages::NO_BUDGET_DISTRIBUTION_GENERATED);
        }
        result
    }
}
