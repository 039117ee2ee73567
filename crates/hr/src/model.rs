//! Expense entities.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use erpsuite_core::{AggregateRoot, Record, RecordId};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExpenseStatus {
    #[default]
    Draft,
    Confirmed,
    Validated,
    Refused,
    Canceled,
}

impl ExpenseStatus {
    pub fn code(self) -> u8 {
        match self {
            ExpenseStatus::Draft => 1,
            ExpenseStatus::Confirmed => 2,
            ExpenseStatus::Validated => 3,
            ExpenseStatus::Refused => 4,
            ExpenseStatus::Canceled => 5,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum KilometricType {
    #[default]
    OneWay,
    RoundTrip,
}

/// Vehicle allowance scale: amount paid per kilometer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct KilometricAllowParam {
    pub code: String,
    pub rate: Decimal,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Employee {
    #[serde(default)]
    pub id: RecordId,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExpenseLine {
    #[serde(default)]
    pub id: RecordId,
    #[serde(default)]
    pub expense_id: Option<RecordId>,
    #[serde(default)]
    pub project: Option<String>,
    #[serde(default)]
    pub expense_product: Option<String>,
    #[serde(default)]
    pub expense_date: Option<NaiveDate>,
    #[serde(default)]
    pub employee: Option<Employee>,
    #[serde(default)]
    pub currency: Option<String>,
    #[serde(default)]
    pub comments: Option<String>,
    #[serde(default)]
    pub to_invoice: bool,
    #[serde(default)]
    pub justification_file: Option<String>,
    #[serde(default)]
    pub total_amount: Decimal,
    #[serde(default)]
    pub total_tax: Decimal,
    #[serde(default)]
    pub untaxed_amount: Decimal,
    #[serde(default)]
    pub kilometric_allow_param: Option<KilometricAllowParam>,
    #[serde(default)]
    pub kilometric_type: Option<KilometricType>,
    #[serde(default)]
    pub from_city: Option<String>,
    #[serde(default)]
    pub to_city: Option<String>,
    #[serde(default)]
    pub distance: Decimal,
}

impl ExpenseLine {
    pub fn new(expense_product: impl Into<String>) -> Self {
        Self {
            id: RecordId::new(),
            expense_id: None,
            project: None,
            expense_product: Some(expense_product.into()),
            expense_date: None,
            employee: None,
            currency: None,
            comments: None,
            to_invoice: false,
            justification_file: None,
            total_amount: Decimal::ZERO,
            total_tax: Decimal::ZERO,
            untaxed_amount: Decimal::ZERO,
            kilometric_allow_param: None,
            kilometric_type: None,
            from_city: None,
            to_city: None,
            distance: Decimal::ZERO,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Expense {
    #[serde(default)]
    pub id: RecordId,
    #[serde(default)]
    pub version: u64,
    #[serde(default)]
    pub reference: Option<String>,
    #[serde(default)]
    pub status: ExpenseStatus,
    #[serde(default)]
    pub employee: Option<Employee>,
    #[serde(default)]
    pub currency: Option<String>,
    #[serde(default)]
    pub lines: Vec<ExpenseLine>,
    #[serde(default)]
    pub ex_tax_total: Decimal,
    #[serde(default)]
    pub tax_total: Decimal,
    #[serde(default)]
    pub in_tax_total: Decimal,
    #[serde(default)]
    pub kilometric_total: Decimal,
}

impl Expense {
    pub fn new(reference: impl Into<String>) -> Self {
        Self {
            id: RecordId::new(),
            version: 0,
            reference: Some(reference.into()),
            status: ExpenseStatus::Draft,
            employee: None,
            currency: None,
            lines: Vec::new(),
            ex_tax_total: Decimal::ZERO,
            tax_total: Decimal::ZERO,
            in_tax_total: Decimal::ZERO,
            kilometric_total: Decimal::ZERO,
        }
    }

    pub fn label(&self) -> String {
        self.reference.clone().unwrap_or_else(|| self.id.to_string())
    }

    pub fn is_draft(&self) -> bool {
        self.status == ExpenseStatus::Draft
    }
}

impl AggregateRoot for Expense {
    type Id = RecordId;

    fn id(&self) -> &Self::Id {
        &self.id
    }

    fn version(&self) -> u64 {
        self.version
    }
}

impl Record for Expense {
    fn set_id(&mut self, id: RecordId) {
        self.id = id;
    }

    fn set_version(&mut self, version: u64) {
        self.version = version;
    }
}

/// Fields of an expense line update. Only the provided fields are applied.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ExpenseLineUpdate {
    pub project: Option<String>,
    pub expense_product: Option<String>,
    pub expense_date: Option<NaiveDate>,
    pub kilometric_allow_param: Option<KilometricAllowParam>,
    pub kilometric_type: Option<KilometricType>,
    pub distance: Option<Decimal>,
    pub from_city: Option<String>,
    pub to_city: Option<String>,
    pub total_amount: Option<Decimal>,
    pub total_tax: Option<Decimal>,
    pub justification_file: Option<String>,
    pub comments: Option<String>,
    pub employee: Option<Employee>,
    pub currency: Option<String>,
    pub to_invoice: Option<bool>,
}
