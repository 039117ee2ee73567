use std::sync::{Arc, RwLock};

use chrono::NaiveDate;

use erpsuite_core::RecordId;

use crate::key::BudgetKey;
use crate::model::{Budget, GlobalBudget};

pub trait BudgetDirectory: Send + Sync {
    /// The budget of `key` whose period covers `date`.
    fn budget_for_key(&self, key: &BudgetKey, date: NaiveDate) -> Option<Budget>;

    fn budget(&self, id: RecordId) -> Option<Budget>;

    fn global_budget(&self, id: RecordId) -> Option<GlobalBudget>;
}

impl<S> BudgetDirectory for Arc<S>
where
    S: BudgetDirectory + ?Sized,
{
    fn budget_for_key(&self, key: &BudgetKey, date: NaiveDate) -> Option<Budget> {
        (**self).budget_for_key(key, date)
    }

    fn budget(&self, id: RecordId) -> Option<Budget> {
        (**self).budget(id)
    }

    fn global_budget(&self, id: RecordId) -> Option<GlobalBudget> {
        (**self).global_budget(id)
    }
}

#[derive(Debug, Default)]
pub struct InMemoryBudgetDirectory {
    budgets: RwLock<Vec<Budget>>,
    global_budgets: RwLock<Vec<GlobalBudget>>,
}

impl InMemoryBudgetDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_global_budget(self, global: GlobalBudget) -> Self {
        self.upsert_global_budget(global);
        self
    }

    pub fn upsert_global_budget(&self, global: GlobalBudget) {
        if let Ok(mut globals) = self.global_budgets.write() {
            match globals.iter_mut().find(|g| g.id == global.id) {
                Some(existing) => *existing = global,
                None => globals.push(global),
            }
        }
    }

    pub fn with_budget(self, budget: Budget) -> Self {
        self.upsert_budget(budget);
        self
    }

    pub fn upsert_budget(&self, budget: Budget) {
        if let Ok(mut budgets) = self.budgets.write() {
            match budgets.iter_mut().find(|b| b.id == budget.id) {
                Some(existing) => *existing = budget,
                None => budgets.push(budget),
            }
        }
    }
}

impl BudgetDirectory for InMemoryBudgetDirectory {
    fn budget_for_key(&self, key: &BudgetKey, date: NaiveDate) -> Option<Budget> {
        self.budgets
            .read()
            .ok()?
            .iter()
            .find(|b| b.budget_key.as_ref() == Some(key) && b.covers(date))
            .cloned()
    }

    fn budget(&self, id: RecordId) -> Option<Budget> {
        self.budgets.read().ok()?.iter().find(|b| b.id == id).cloned()
    }

    fn global_budget(&self, id: RecordId) -> Option<GlobalBudget> {
        self.global_budgets.read().ok()?.iter().find(|g| g.id == id).cloned()
    }
}
