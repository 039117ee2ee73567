use chrono::{NaiveDate, NaiveDateTime};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use erpsuite_accounting::{Company, Invoice, InvoicePayment, Move};
use erpsuite_base::FieldType;
use erpsuite_budget::SaleOrder;
use erpsuite_core::record_context::RecordContextResponse;
use erpsuite_core::{ActionContext, BatchReport, RecordId};
use erpsuite_crm::{CrmBatch, CrmBatchData};
use erpsuite_hr::ExpenseLineUpdate;
use erpsuite_sale::MergeChoices;
use erpsuite_stock::{Conformity, StockLocation, StockMoveStatus, Unit};

// -------------------------
// Request DTOs
// -------------------------

/// A record plus the client-side context of the event.
#[derive(Debug, Deserialize)]
pub struct MoveActionRequest {
    pub record: Move,
    #[serde(default)]
    pub context: ActionContext,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterCompanyRequest {
    pub company: Company,
    #[serde(default)]
    pub fiscal_years: Vec<i32>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SaleOrderCheckBudgetRequest {
    pub sale_order: SaleOrder,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InvoicePaymentTermsRequest {
    pub payment: InvoicePayment,
    pub invoice: Invoice,
    /// Recompute the payment amount from the allocations.
    #[serde(default)]
    pub update_amount: bool,
    #[serde(default)]
    pub today: Option<NaiveDate>,
}

#[derive(Debug, Deserialize)]
pub struct FinancialDiscountRequest {
    pub invoice: Invoice,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateExpenseLineRequest {
    pub expense_id: RecordId,
    pub expense_line_id: RecordId,
    /// Expected version of the expense.
    #[serde(default)]
    pub version: Option<u64>,
    /// Draft expense the line moves to.
    #[serde(default)]
    pub new_expense_id: Option<RecordId>,
    #[serde(flatten)]
    pub update: ExpenseLineUpdate,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateStockMoveLineRequest {
    pub version: u64,
    #[serde(default)]
    pub real_qty: Option<Decimal>,
    #[serde(default)]
    pub conformity: Option<Conformity>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateStockMoveStatusRequest {
    #[serde(default)]
    pub version: Option<u64>,
    pub status: StockMoveStatus,
    #[serde(default)]
    pub today: Option<NaiveDate>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateStockMoveMobilityRequest {
    #[serde(default)]
    pub version: Option<u64>,
    #[serde(default)]
    pub moved_qty: Option<Decimal>,
    #[serde(default)]
    pub unit: Option<Unit>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateStockMoveDestinationRequest {
    #[serde(default)]
    pub version: Option<u64>,
    #[serde(default)]
    pub to_location: Option<StockLocation>,
}

#[derive(Debug, Default, Deserialize)]
pub struct CopyQuery {
    #[serde(default)]
    pub deep: bool,
}

#[derive(Debug, Deserialize)]
pub struct CrmBatchRequest {
    pub batch: CrmBatch,
    /// Events, configurations and targets the batch works on. Opportunities
    /// default to the tenant's stored ones when omitted.
    #[serde(default)]
    pub data: CrmBatchData,
    #[serde(default)]
    pub now: Option<NaiveDateTime>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SaleOrderMergeRequest {
    pub sale_orders: Vec<erpsuite_sale::SaleOrder>,
    /// Values picked for the differing contact, team or price list.
    #[serde(default)]
    pub choices: Option<MergeChoices>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AcquireLoyaltyPointsRequest {
    pub partner: String,
    pub company: String,
    #[serde(default)]
    pub now: Option<NaiveDateTime>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnonymizedField {
    pub name: String,
    #[serde(rename = "type")]
    pub field_type: FieldType,
    #[serde(default)]
    pub max_size: usize,
}

#[derive(Debug, Deserialize)]
pub struct AnonymizeRequest {
    pub object: Map<String, Value>,
    pub fields: Vec<AnonymizedField>,
}

// -------------------------
// Response DTOs
// -------------------------

/// Record-context patch plus the record it was computed on.
#[derive(Debug, Serialize)]
pub struct RecordActionResponse<T> {
    #[serde(flatten)]
    pub context: RecordContextResponse,
    pub record: T,
}

#[derive(Debug, Serialize)]
pub struct AcquireLoyaltyPointsResponse {
    pub acquired: Decimal,
    pub account: erpsuite_sale::LoyaltyAccount,
}

#[derive(Debug, Serialize)]
pub struct CrmBatchResponse {
    pub report: BatchReport,
    pub data: CrmBatchData,
}

/// Success envelope of the mobile (`/ws/aos`) endpoints.
#[derive(Debug, Serialize)]
pub struct AosResponse<T> {
    pub message: String,
    pub object: T,
}
