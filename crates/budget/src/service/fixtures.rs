use std::sync::Arc;

use chrono::NaiveDate;
use rust_decimal::Decimal;

use erpsuite_accounting::{Account, AccountKind, Company, Journal, JournalTechnicalType, Move, MoveLine};
use erpsuite_base::Currency;
use erpsuite_core::RecordId;

use crate::directory::InMemoryBudgetDirectory;
use crate::key::BudgetKey;
use crate::model::{Budget, BudgetControl, GlobalBudget};

pub(crate) fn d(y: i32, m: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, day).unwrap()
}

pub(crate) fn expense_account() -> Account {
    let mut account = Account::new("606100", "Supplies", AccountKind::Expense);
    account.use_for_budget = true;
    account
}

pub(crate) fn global_budget(control: BudgetControl) -> GlobalBudget {
    GlobalBudget {
        id: RecordId::new(),
        code: "GB-2024".into(),
        company_code: "ACME".into(),
        currency: Currency::new("EUR", 2),
        control,
    }
}

/// 1000.00 budgeted on `ACME:606100:IT` for 2024, 600.00 already realized.
pub(crate) fn it_budget(global: &GlobalBudget) -> Budget {
    Budget {
        id: RecordId::new(),
        code: "IT-SUPPLIES".into(),
        global_budget_id: Some(global.id),
        budget_key: Some(BudgetKey::compute("ACME", "606100", &["IT"])),
        from_date: d(2024, 1, 1),
        to_date: d(2024, 12, 31),
        amount_budgeted: Decimal::new(100_000, 2),
        realized_amount: Decimal::new(60_000, 2),
        committed_amount: Decimal::ZERO,
    }
}

pub(crate) fn directory(control: BudgetControl) -> (Arc<InMemoryBudgetDirectory>, Budget) {
    let global = global_budget(control);
    let budget = it_budget(&global);
    let directory = InMemoryBudgetDirectory::new()
        .with_global_budget(global)
        .with_budget(budget.clone());
    (Arc::new(directory), budget)
}

/// Purchase move: expense debit on the IT axis / supplier credit.
pub(crate) fn expense_move(amount: i64, analytic: &[&str]) -> Move {
    let amount = Decimal::new(amount, 2);
    let mut expense = MoveLine::new(expense_account(), amount, Decimal::ZERO);
    expense.analytic_codes = analytic.iter().map(|c| c.to_string()).collect();
    let supplier = MoveLine::new(
        Account::new("401000", "Suppliers", AccountKind::Payable),
        Decimal::ZERO,
        amount,
    );
    Move {
        company: Some(Company::new("ACME", "EUR")),
        journal: Some(Journal::new("HA", JournalTechnicalType::Expense)),
        date: Some(d(2024, 3, 15)),
        lines: vec![expense, supplier],
        ..Move::default()
    }
}
