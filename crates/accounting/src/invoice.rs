//! Invoices, invoice terms (payment installments) and payments.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use erpsuite_core::{AggregateRoot, Record, RecordId};

use crate::model::{BankDetails, Company, Partner, PaymentMode};

/// Passed-for-payment status of a supplier invoice term.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PfpStatus {
    AwaitingValidation,
    Validated,
    Litigation,
    PartiallyValidated,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InvoiceTerm {
    #[serde(default)]
    pub id: RecordId,
    #[serde(default)]
    pub sequence: u32,
    #[serde(default)]
    pub percentage: Decimal,
    #[serde(default)]
    pub amount: Decimal,
    #[serde(default)]
    pub amount_remaining: Decimal,
    #[serde(default)]
    pub due_date: Option<NaiveDate>,
    #[serde(default)]
    pub is_paid: bool,
    #[serde(default)]
    pub is_customized: bool,
    /// Percentage of the payment condition line the term was generated from.
    #[serde(default)]
    pub payment_condition_percentage: Option<Decimal>,
    #[serde(default)]
    pub payment_session: Option<String>,
    #[serde(default)]
    pub pfp_status: Option<PfpStatus>,
    #[serde(default)]
    pub payment_mode: Option<PaymentMode>,
    #[serde(default)]
    pub bank_details: Option<BankDetails>,
}

impl InvoiceTerm {
    pub fn new(sequence: u32, percentage: Decimal, amount: Decimal, due_date: Option<NaiveDate>) -> Self {
        Self {
            id: RecordId::new(),
            sequence,
            percentage,
            amount,
            amount_remaining: amount,
            due_date,
            is_paid: false,
            is_customized: false,
            payment_condition_percentage: None,
            payment_session: None,
            pfp_status: None,
            payment_mode: None,
            bank_details: None,
        }
    }
}

/// Share of a move line allocated to a budget.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BudgetDistribution {
    pub budget_id: RecordId,
    pub budget_key: String,
    pub amount: Decimal,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DiscountBase {
    /// Discount computed on the tax-included total.
    #[default]
    VatIncluded,
    /// Discount computed on the tax-excluded total, plus the matching tax share.
    VatExcluded,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FinancialDiscount {
    #[serde(default)]
    pub id: RecordId,
    pub discount_rate: Decimal,
    #[serde(default)]
    pub discount_base: DiscountBase,
    #[serde(default)]
    pub discount_delay: u32,
    #[serde(default)]
    pub legal_notice: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Invoice {
    #[serde(default)]
    pub id: RecordId,
    #[serde(default)]
    pub version: u64,
    #[serde(default)]
    pub reference: Option<String>,
    #[serde(default)]
    pub company: Option<Company>,
    #[serde(default)]
    pub partner: Option<Partner>,
    pub currency: String,
    #[serde(default)]
    pub invoice_date: Option<NaiveDate>,
    #[serde(default)]
    pub due_date: Option<NaiveDate>,
    #[serde(default)]
    pub ex_tax_total: Decimal,
    #[serde(default)]
    pub tax_total: Decimal,
    #[serde(default)]
    pub in_tax_total: Decimal,
    #[serde(default)]
    pub amount_remaining: Decimal,
    #[serde(default)]
    pub invoice_terms: Vec<InvoiceTerm>,
    #[serde(default)]
    pub financial_discount: Option<FinancialDiscount>,
    #[serde(default)]
    pub financial_discount_rate: Decimal,
    #[serde(default)]
    pub financial_discount_total_amount: Decimal,
    #[serde(default)]
    pub remaining_amount_after_fin_discount: Decimal,
    #[serde(default)]
    pub financial_discount_deadline_date: Option<NaiveDate>,
    #[serde(default)]
    pub legal_notice: Option<String>,
}

impl Invoice {
    pub fn new(currency: impl Into<String>, in_tax_total: Decimal) -> Self {
        Self {
            id: RecordId::new(),
            version: 0,
            reference: None,
            company: None,
            partner: None,
            currency: currency.into(),
            invoice_date: None,
            due_date: None,
            ex_tax_total: in_tax_total,
            tax_total: Decimal::ZERO,
            in_tax_total,
            amount_remaining: in_tax_total,
            invoice_terms: Vec::new(),
            financial_discount: None,
            financial_discount_rate: Decimal::ZERO,
            financial_discount_total_amount: Decimal::ZERO,
            remaining_amount_after_fin_discount: Decimal::ZERO,
            financial_discount_deadline_date: None,
            legal_notice: None,
        }
    }
}

impl AggregateRoot for Invoice {
    type Id = RecordId;

    fn id(&self) -> &Self::Id {
        &self.id
    }

    fn version(&self) -> u64 {
        self.version
    }
}

impl Record for Invoice {
    fn set_id(&mut self, id: RecordId) {
        self.id = id;
    }

    fn set_version(&mut self, version: u64) {
        self.version = version;
    }
}

/// Invoice term selected in a payment voucher, in the voucher's order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PayVoucherElement {
    pub sequence: u32,
    pub invoice_term_id: RecordId,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InvoiceTermPayment {
    pub invoice_term_id: RecordId,
    pub paid_amount: Decimal,
    #[serde(default)]
    pub financial_discount_amount: Decimal,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InvoicePayment {
    #[serde(default)]
    pub id: RecordId,
    pub amount: Decimal,
    pub currency: String,
    #[serde(default)]
    pub payment_date: Option<NaiveDate>,
    #[serde(default)]
    pub apply_financial_discount: bool,
    #[serde(default)]
    pub financial_discount: Option<FinancialDiscount>,
    #[serde(default)]
    pub financial_discount_total_amount: Decimal,
    /// Voucher selection, when the payment comes from a payment voucher.
    #[serde(default)]
    pub pay_voucher_elements: Vec<PayVoucherElement>,
    #[serde(default)]
    pub invoice_term_payments: Vec<InvoiceTermPayment>,
}

impl InvoicePayment {
    pub fn new(amount: Decimal, currency: impl Into<String>) -> Self {
        Self {
            id: RecordId::new(),
            amount,
            currency: currency.into(),
            payment_date: None,
            apply_financial_discount: false,
            financial_discount: None,
            financial_discount_total_amount: Decimal::ZERO,
            pay_voucher_elements: Vec::new(),
            invoice_term_payments: Vec::new(),
        }
    }
}
