use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use erpsuite_accounting::BudgetDistribution;
use erpsuite_base::Currency;
use erpsuite_core::{AggregateRoot, Record, RecordId};

use crate::key::BudgetKey;

/// What happens when a budget is exceeded.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BudgetControl {
    #[default]
    None,
    Warn,
    Block,
}

/// Top of the budget hierarchy, owned by a company.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GlobalBudget {
    #[serde(default)]
    pub id: RecordId,
    pub code: String,
    pub company_code: String,
    pub currency: Currency,
    #[serde(default)]
    pub control: BudgetControl,
}

/// Intermediate grouping of budgets (section, group).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BudgetLevel {
    #[serde(default)]
    pub id: RecordId,
    #[serde(default)]
    pub version: u64,
    pub code: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub global_budget_id: Option<RecordId>,
    #[serde(default)]
    pub from_date: Option<NaiveDate>,
    #[serde(default)]
    pub to_date: Option<NaiveDate>,
    #[serde(default)]
    pub total_amount_expected: Decimal,
    #[serde(default)]
    pub total_amount_committed: Decimal,
    #[serde(default)]
    pub realized_with_po: Decimal,
    #[serde(default)]
    pub realized_with_no_po: Decimal,
    #[serde(default)]
    pub total_firm_gap: Decimal,
}

impl BudgetLevel {
    pub fn new(code: impl Into<String>) -> Self {
        let code = code.into();
        Self {
            id: RecordId::new(),
            version: 0,
            name: code.clone(),
            code,
            global_budget_id: None,
            from_date: None,
            to_date: None,
            total_amount_expected: Decimal::ZERO,
            total_amount_committed: Decimal::ZERO,
            realized_with_po: Decimal::ZERO,
            realized_with_no_po: Decimal::ZERO,
            total_firm_gap: Decimal::ZERO,
        }
    }
}

impl AggregateRoot for BudgetLevel {
    type Id = RecordId;

    fn id(&self) -> &Self::Id {
        &self.id
    }

    fn version(&self) -> u64 {
        self.version
    }
}

impl Record for BudgetLevel {
    fn set_id(&mut self, id: RecordId) {
        self.id = id;
    }

    fn set_version(&mut self, version: u64) {
        self.version = version;
    }
}

/// A budget line: an amount available for a key over a period.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Budget {
    #[serde(default)]
    pub id: RecordId,
    pub code: String,
    #[serde(default)]
    pub global_budget_id: Option<RecordId>,
    #[serde(default)]
    pub budget_key: Option<BudgetKey>,
    pub from_date: NaiveDate,
    pub to_date: NaiveDate,
    #[serde(default)]
    pub amount_budgeted: Decimal,
    #[serde(default)]
    pub realized_amount: Decimal,
    #[serde(default)]
    pub committed_amount: Decimal,
}

impl Budget {
    pub fn covers(&self, date: NaiveDate) -> bool {
        self.from_date <= date && date <= self.to_date
    }

    /// Amount over budget once `distributed` is added, or zero.
    pub fn exceeded_by(&self, distributed: Decimal) -> Decimal {
        let consumed = self.realized_amount + self.committed_amount + distributed;
        (consumed - self.amount_budgeted).max(Decimal::ZERO)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SaleOrderLine {
    pub product_name: String,
    #[serde(default)]
    pub ex_tax_total: Decimal,
    #[serde(default)]
    pub budget_distributions: Vec<BudgetDistribution>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SaleOrder {
    #[serde(default)]
    pub id: RecordId,
    #[serde(default)]
    pub reference: Option<String>,
    #[serde(default)]
    pub lines: Vec<SaleOrderLine>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    #[test]
    fn exceed_counts_realized_committed_and_distributed() {
        let budget = Budget {
            id: RecordId::new(),
            code: "IT-2024".into(),
            global_budget_id: None,
            budget_key: None,
            from_date: d(2024, 1, 1),
            to_date: d(2024, 12, 31),
            amount_budgeted: Decimal::new(1000, 0),
            realized_amount: Decimal::new(600, 0),
            committed_amount: Decimal::new(300, 0),
        };
        assert_eq!(budget.exceeded_by(Decimal::new(50, 0)), Decimal::ZERO);
        assert_eq!(budget.exceeded_by(Decimal::new(150, 0)), Decimal::new(50, 0));
        assert!(budget.covers(d(2024, 12, 31)));
        assert!(!budget.covers(d(2025, 1, 1)));
    }
}
