//! Journal entries ("moves") and their lines.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use erpsuite_core::{AggregateRoot, Record, RecordId};

use crate::invoice::{BudgetDistribution, InvoiceTerm};
use crate::model::{Account, BankDetails, Company, Journal, Partner, PaymentCondition, PaymentMode, Period};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MoveStatus {
    #[default]
    New,
    Daybook,
    Accounted,
    Canceled,
    Simulated,
}

impl MoveStatus {
    /// Integer code of the status select.
    pub fn code(self) -> u8 {
        match self {
            MoveStatus::New => 1,
            MoveStatus::Daybook => 2,
            MoveStatus::Accounted => 3,
            MoveStatus::Canceled => 4,
            MoveStatus::Simulated => 5,
        }
    }

    /// Statuses on which the accounting control runs before save.
    pub fn requires_accounting_control(self) -> bool {
        matches!(
            self,
            MoveStatus::Accounted | MoveStatus::Simulated | MoveStatus::Daybook
        )
    }
}

/// How a move was created.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TechnicalOrigin {
    #[default]
    Entry,
    Automatic,
    Template,
    Import,
    MassEntry,
}

/// Business reason of a move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FunctionalOrigin {
    Opening,
    Closure,
    CutOff,
    Sale,
    Purchase,
    Payment,
    FixedAsset,
    DoubtfulCustomer,
    Irrecoverable,
}

impl FunctionalOrigin {
    pub fn code(self) -> u8 {
        match self {
            FunctionalOrigin::Opening => 1,
            FunctionalOrigin::Closure => 2,
            FunctionalOrigin::CutOff => 3,
            FunctionalOrigin::Sale => 4,
            FunctionalOrigin::Purchase => 5,
            FunctionalOrigin::Payment => 6,
            FunctionalOrigin::FixedAsset => 7,
            FunctionalOrigin::DoubtfulCustomer => 8,
            FunctionalOrigin::Irrecoverable => 9,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MoveLine {
    #[serde(default)]
    pub id: RecordId,
    #[serde(default)]
    pub counter: u32,
    #[serde(default)]
    pub account: Option<Account>,
    #[serde(default)]
    pub partner: Option<Partner>,
    #[serde(default)]
    pub date: Option<NaiveDate>,
    #[serde(default)]
    pub origin_date: Option<NaiveDate>,
    #[serde(default)]
    pub due_date: Option<NaiveDate>,
    #[serde(default)]
    pub origin: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub debit: Decimal,
    #[serde(default)]
    pub credit: Decimal,
    /// Signed amount in the move currency.
    #[serde(default)]
    pub currency_amount: Decimal,
    #[serde(default = "one")]
    pub currency_rate: Decimal,
    #[serde(default)]
    pub amount_remaining: Decimal,
    #[serde(default)]
    pub reconcile_group: Option<String>,
    #[serde(default)]
    pub cut_off_start_date: Option<NaiveDate>,
    #[serde(default)]
    pub cut_off_end_date: Option<NaiveDate>,
    #[serde(default)]
    pub analytic_codes: Vec<String>,
    #[serde(default)]
    pub budget_distributions: Vec<BudgetDistribution>,
    #[serde(default)]
    pub invoice_terms: Vec<InvoiceTerm>,
    /// Snapshot of the account code taken when the move enters the day-book.
    #[serde(default)]
    pub account_code: Option<String>,
    #[serde(default)]
    pub partner_full_name: Option<String>,
}

fn one() -> Decimal {
    Decimal::ONE
}

impl MoveLine {
    pub fn new(account: Account, debit: Decimal, credit: Decimal) -> Self {
        let amount = debit.max(credit);
        Self {
            id: RecordId::new(),
            counter: 0,
            account: Some(account),
            partner: None,
            date: None,
            origin_date: None,
            due_date: None,
            origin: None,
            description: None,
            debit,
            credit,
            currency_amount: debit - credit,
            currency_rate: Decimal::ONE,
            amount_remaining: amount,
            reconcile_group: None,
            cut_off_start_date: None,
            cut_off_end_date: None,
            analytic_codes: Vec::new(),
            budget_distributions: Vec::new(),
            invoice_terms: Vec::new(),
            account_code: None,
            partner_full_name: None,
        }
    }

    /// The line amount regardless of its side.
    pub fn amount(&self) -> Decimal {
        self.debit.max(self.credit)
    }

    pub fn has_invoice_term_account(&self) -> bool {
        self.account.as_ref().is_some_and(|a| a.has_invoice_term)
    }

    pub fn is_reconciled(&self) -> bool {
        self.reconcile_group.is_some()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Move {
    #[serde(default)]
    pub id: RecordId,
    #[serde(default)]
    pub version: u64,
    #[serde(default)]
    pub reference: Option<String>,
    #[serde(default)]
    pub company: Option<Company>,
    #[serde(default)]
    pub journal: Option<Journal>,
    #[serde(default)]
    pub period: Option<Period>,
    #[serde(default)]
    pub date: Option<NaiveDate>,
    #[serde(default)]
    pub origin: Option<String>,
    #[serde(default)]
    pub origin_date: Option<NaiveDate>,
    #[serde(default)]
    pub partner: Option<Partner>,
    #[serde(default)]
    pub currency: Option<String>,
    #[serde(default)]
    pub payment_mode: Option<PaymentMode>,
    #[serde(default)]
    pub payment_condition: Option<PaymentCondition>,
    #[serde(default)]
    pub partner_bank_details: Option<BankDetails>,
    #[serde(default)]
    pub company_bank_details: Option<BankDetails>,
    #[serde(default)]
    pub status: MoveStatus,
    #[serde(default)]
    pub technical_origin: TechnicalOrigin,
    #[serde(default)]
    pub functional_origin: Option<FunctionalOrigin>,
    #[serde(default)]
    pub lines: Vec<MoveLine>,
}

impl Default for Move {
    fn default() -> Self {
        Self {
            id: RecordId::new(),
            version: 0,
            reference: None,
            company: None,
            journal: None,
            period: None,
            date: None,
            origin: None,
            origin_date: None,
            partner: None,
            currency: None,
            payment_mode: None,
            payment_condition: None,
            partner_bank_details: None,
            company_bank_details: None,
            status: MoveStatus::New,
            technical_origin: TechnicalOrigin::Entry,
            functional_origin: None,
            lines: Vec::new(),
        }
    }
}

impl Move {
    /// Label used in user messages.
    pub fn label(&self) -> String {
        self.reference
            .clone()
            .unwrap_or_else(|| self.id.to_string())
    }

    pub fn company_currency(&self) -> Option<&str> {
        self.company.as_ref().map(|c| c.currency.as_str())
    }

    /// True when the move is expressed in a currency other than the company's.
    pub fn is_other_currency(&self) -> bool {
        match (self.currency.as_deref(), self.company_currency()) {
            (Some(currency), Some(company)) => currency != company,
            _ => false,
        }
    }

    pub fn all_invoice_terms(&self) -> impl Iterator<Item = &InvoiceTerm> {
        self.lines.iter().flat_map(|l| l.invoice_terms.iter())
    }
}

impl AggregateRoot for Move {
    type Id = RecordId;

    fn id(&self) -> &Self::Id {
        &self.id
    }

    fn version(&self) -> u64 {
        self.version
    }
}

impl Record for Move {
    fn set_id(&mut self, id: RecordId) {
        self.id = id;
    }

    fn set_version(&mut self, version: u64) {
        self.version = version;
    }
}
