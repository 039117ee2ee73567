//! Accounting reference data: companies, accounts, journals, periods,
//! partners and payment conditions.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use erpsuite_core::RecordId;

/// High-level account kind (determines normal balance side).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AccountKind {
    Asset,
    Liability,
    Equity,
    Revenue,
    Expense,
    Receivable,
    Payable,
    #[default]
    Other,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Account {
    #[serde(default)]
    pub id: RecordId,
    pub code: String, // e.g. "411000"
    pub name: String,
    #[serde(default)]
    pub kind: AccountKind,
    /// Lines on this account carry invoice terms (customer/supplier accounts).
    #[serde(default)]
    pub has_invoice_term: bool,
    #[serde(default)]
    pub use_for_budget: bool,
    #[serde(default)]
    pub analytic_distribution_required: bool,
    /// Lines on this account may be reconciled.
    #[serde(default)]
    pub reconcile_ok: bool,
}

impl Account {
    pub fn new(code: impl Into<String>, name: impl Into<String>, kind: AccountKind) -> Self {
        Self {
            id: RecordId::new(),
            code: code.into(),
            name: name.into(),
            kind,
            has_invoice_term: false,
            use_for_budget: false,
            analytic_distribution_required: false,
            reconcile_ok: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BankDetails {
    #[serde(default)]
    pub id: RecordId,
    pub iban: String,
    #[serde(default = "default_true")]
    pub active: bool,
    #[serde(default)]
    pub is_default: bool,
}

fn default_true() -> bool {
    true
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Company {
    #[serde(default)]
    pub id: RecordId,
    pub code: String,
    #[serde(default)]
    pub name: String,
    /// Accounting currency code.
    pub currency: String,
    #[serde(default)]
    pub default_bank_details: Option<BankDetails>,
    /// Journal proposed on manually created moves.
    #[serde(default)]
    pub manual_misc_journal: Option<Journal>,
    #[serde(default)]
    pub analytic_enabled: bool,
    /// Number of analytic axes configured (0 to 5).
    #[serde(default)]
    pub analytic_axes: u8,
}

impl Company {
    pub fn new(code: impl Into<String>, currency: impl Into<String>) -> Self {
        let code = code.into();
        Self {
            id: RecordId::new(),
            name: code.clone(),
            code,
            currency: currency.into(),
            default_bank_details: None,
            manual_misc_journal: None,
            analytic_enabled: false,
            analytic_axes: 0,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum JournalTechnicalType {
    Expense,
    Sale,
    Treasury,
    #[default]
    Other,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PartnerType {
    Customer,
    Supplier,
    Employee,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Journal {
    #[serde(default)]
    pub id: RecordId,
    pub code: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub technical_type: JournalTechnicalType,
    /// Empty means every functional origin is allowed.
    #[serde(default)]
    pub authorized_functional_origins: Vec<crate::entry::FunctionalOrigin>,
    /// Empty means every partner is allowed.
    #[serde(default)]
    pub compatible_partner_types: Vec<PartnerType>,
    #[serde(default)]
    pub has_duplicate_detection_on_origin: bool,
    #[serde(default)]
    pub has_required_origin: bool,
}

impl Journal {
    pub fn new(code: impl Into<String>, technical_type: JournalTechnicalType) -> Self {
        let code = code.into();
        Self {
            id: RecordId::new(),
            name: code.clone(),
            code,
            technical_type,
            authorized_functional_origins: Vec::new(),
            compatible_partner_types: Vec::new(),
            has_duplicate_detection_on_origin: false,
            has_required_origin: false,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PeriodStatus {
    #[default]
    Opened,
    TemporarilyClosed,
    Closed,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Period {
    #[serde(default)]
    pub id: RecordId,
    pub code: String,
    pub from_date: NaiveDate,
    pub to_date: NaiveDate,
    #[serde(default)]
    pub status: PeriodStatus,
    /// Roles still allowed to account on a temporarily closed period.
    #[serde(default)]
    pub authorized_roles: Vec<String>,
}

impl Period {
    pub fn contains(&self, date: NaiveDate) -> bool {
        self.from_date <= date && date <= self.to_date
    }

    pub fn is_closed(&self) -> bool {
        self.status != PeriodStatus::Opened
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InOut {
    #[default]
    In,
    Out,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentMode {
    #[serde(default)]
    pub id: RecordId,
    pub code: String,
    #[serde(default)]
    pub in_out: InOut,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Partner {
    #[serde(default)]
    pub id: RecordId,
    pub name: String,
    #[serde(default)]
    pub currency: Option<String>,
    #[serde(default)]
    pub is_customer: bool,
    #[serde(default)]
    pub is_supplier: bool,
    #[serde(default)]
    pub is_employee: bool,
    #[serde(default)]
    pub in_payment_mode: Option<PaymentMode>,
    #[serde(default)]
    pub out_payment_mode: Option<PaymentMode>,
    #[serde(default)]
    pub payment_condition: Option<PaymentCondition>,
    #[serde(default)]
    pub bank_details: Vec<BankDetails>,
}

impl Partner {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: RecordId::new(),
            name: name.into(),
            currency: None,
            is_customer: false,
            is_supplier: false,
            is_employee: false,
            in_payment_mode: None,
            out_payment_mode: None,
            payment_condition: None,
            bank_details: Vec::new(),
        }
    }

    pub fn has_type(&self, partner_type: PartnerType) -> bool {
        match partner_type {
            PartnerType::Customer => self.is_customer,
            PartnerType::Supplier => self.is_supplier,
            PartnerType::Employee => self.is_employee,
        }
    }

    /// Default active bank details, or the first active ones.
    pub fn default_bank_details(&self) -> Option<&BankDetails> {
        self.bank_details
            .iter()
            .filter(|b| b.active)
            .find(|b| b.is_default)
            .or_else(|| self.bank_details.iter().find(|b| b.active))
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DelayUnit {
    #[default]
    Days,
    Months,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentConditionLine {
    #[serde(default)]
    pub sequence: u32,
    pub payment_percentage: Decimal,
    #[serde(default)]
    pub payment_time: u32,
    #[serde(default)]
    pub delay_unit: DelayUnit,
    /// Move the due date to the last day of its month.
    #[serde(default)]
    pub end_of_month: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentCondition {
    #[serde(default)]
    pub id: RecordId,
    pub code: String,
    #[serde(default)]
    pub lines: Vec<PaymentConditionLine>,
}

impl PaymentCondition {
    /// A single line paying 100% after `days` days.
    pub fn net(code: impl Into<String>, days: u32) -> Self {
        Self {
            id: RecordId::new(),
            code: code.into(),
            lines: vec![PaymentConditionLine {
                sequence: 1,
                payment_percentage: Decimal::ONE_HUNDRED,
                payment_time: days,
                delay_unit: DelayUnit::Days,
                end_of_month: false,
            }],
        }
    }
}
