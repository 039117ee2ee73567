use std::sync::Arc;

use rust_decimal::Decimal;
use serde_json::{Map, Value};

use erpsuite_core::money::DEFAULT_NB_DECIMAL_DIGITS;
use erpsuite_core::{ActionContext, RecordId, RepositoryHooks};

use crate::directory::BudgetDirectory;
use crate::model::BudgetLevel;

#[derive(Clone)]
pub struct BudgetLevelHooks {
    directory: Arc<dyn BudgetDirectory>,
    budget_app_enabled: bool,
}

impl BudgetLevelHooks {
    pub fn new(directory: Arc<dyn BudgetDirectory>, budget_app_enabled: bool) -> Self {
        Self {
            directory,
            budget_app_enabled,
        }
    }

    fn currency_decimals(&self, global_budget_id: Option<RecordId>) -> u32 {
        global_budget_id
            .and_then(|id| self.directory.global_budget(id))
            .map(|g| g.currency.number_of_decimals)
            .unwrap_or(DEFAULT_NB_DECIMAL_DIGITS)
    }
}

impl RepositoryHooks<BudgetLevel> for BudgetLevelHooks {
    fn populate(&self, json: &mut Map<String, Value>, _context: &ActionContext) {
        let global_budget_id = json
            .get("globalBudgetId")
            .and_then(|v| serde_json::from_value::<RecordId>(v.clone()).ok());
        json.insert(
            "$currencyNumberOfDecimals".into(),
            self.currency_decimals(global_budget_id).into(),
        );
    }

    /// Copies of a budget level start with no consumption when the budget
    /// app is enabled.
    fn copy(&self, entity: &BudgetLevel, _deep: bool) -> BudgetLevel {
        let mut copy = entity.clone();
        if self.budget_app_enabled {
            copy.total_amount_expected = Decimal::ZERO;
            copy.total_amount_committed = Decimal::ZERO;
            copy.realized_with_po = Decimal::ZERO;
            copy.realized_with_no_po = Decimal::ZERO;
            copy.total_firm_gap = Decimal::ZERO;
        }
        copy
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::BudgetControl;
    use crate::service::fixtures::{directory, global_budget};
    use crate::InMemoryBudgetDirectory;
    use erpsuite_base::Currency;

    fn consumed_level() -> BudgetLevel {
        let mut level = BudgetLevel::new("IT");
        level.total_amount_expected = Decimal::new(5000, 0);
        level.realized_with_po = Decimal::new(1200, 0);
        level
    }

    #[test]
    fn copy_resets_amounts_when_app_enabled() {
        let (dir, _) = directory(BudgetControl::None);
        let copy = BudgetLevelHooks::new(dir, true).copy(&consumed_level(), false);
        assert_eq!(copy.total_amount_expected, Decimal::ZERO);
        assert_eq!(copy.realized_with_po, Decimal::ZERO);
        assert_eq!(copy.code, "IT");
    }

    #[test]
    fn copy_keeps_amounts_when_app_disabled() {
        let (dir, _) = directory(BudgetControl::None);
        let copy = BudgetLevelHooks::new(dir, false).copy(&consumed_level(), false);
        assert_eq!(copy.total_amount_expected, Decimal::new(5000, 0));
    }

    #[test]
    fn populate_adds_currency_decimals() {
        let mut global = global_budget(BudgetControl::None);
        global.currency = Currency::new("JPY", 0);
        let global_id = global.id;
        let hooks = BudgetLevelHooks::new(
            Arc::new(InMemoryBudgetDirectory::new().with_global_budget(global)),
            true,
        );

        let mut json = Map::new();
        json.insert("globalBudgetId".into(), serde_json::to_value(global_id).unwrap());
        hooks.populate(&mut json, &ActionContext::default());
        assert_eq!(json["$currencyNumberOfDecimals"], serde_json::json!(0));

        let mut orphan = Map::new();
        hooks.populate(&mut orphan, &ActionContext::default());
        assert_eq!(orphan["$currencyNumberOfDecimals"], serde_json::json!(2));
    }
}
