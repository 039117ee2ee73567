use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use erpsuite_core::{AggregateRoot, Record, RecordId};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SaleOrderStatus {
    #[default]
    Draft,
    Finalized,
    Confirmed,
    Completed,
    Canceled,
}

impl SaleOrderStatus {
    /// Drafts and finalized quotations can still be merged.
    pub fn is_quotation(self) -> bool {
        matches!(self, SaleOrderStatus::Draft | SaleOrderStatus::Finalized)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SaleOrderLine {
    pub product_name: String,
    #[serde(default)]
    pub qty: Decimal,
    #[serde(default)]
    pub ex_tax_total: Decimal,
    #[serde(default)]
    pub in_tax_total: Decimal,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SaleOrder {
    #[serde(default)]
    pub id: RecordId,
    #[serde(default)]
    pub sale_order_seq: Option<String>,
    #[serde(default)]
    pub status: SaleOrderStatus,
    #[serde(default)]
    pub company: Option<String>,
    #[serde(default)]
    pub currency: Option<String>,
    #[serde(default)]
    pub client_partner: Option<String>,
    #[serde(default)]
    pub contact_partner: Option<String>,
    #[serde(default)]
    pub tax_number: Option<String>,
    #[serde(default)]
    pub fiscal_position: Option<String>,
    #[serde(default)]
    pub team: Option<String>,
    #[serde(default)]
    pub price_list: Option<String>,
    #[serde(default)]
    pub confirmation_date_time: Option<NaiveDateTime>,
    #[serde(default)]
    pub lines: Vec<SaleOrderLine>,
    #[serde(default)]
    pub ex_tax_total: Decimal,
    #[serde(default)]
    pub in_tax_total: Decimal,
}

impl SaleOrder {
    pub fn new(client_partner: impl Into<String>, company: impl Into<String>, currency: impl Into<String>) -> Self {
        Self {
            id: RecordId::new(),
            sale_order_seq: None,
            status: SaleOrderStatus::Draft,
            company: Some(company.into()),
            currency: Some(currency.into()),
            client_partner: Some(client_partner.into()),
            contact_partner: None,
            tax_number: None,
            fiscal_position: None,
            team: None,
            price_list: None,
            confirmation_date_time: None,
            lines: Vec::new(),
            ex_tax_total: Decimal::ZERO,
            in_tax_total: Decimal::ZERO,
        }
    }

    pub fn label(&self) -> String {
        self.sale_order_seq.clone().unwrap_or_else(|| self.id.to_string())
    }
}

/// Values picked by the user for the fields that differ between merged orders.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct MergeChoices {
    pub contact_partner: Option<String>,
    pub price_list: Option<String>,
    pub team: Option<String>,
}

impl MergeChoices {
    pub fn is_empty(&self) -> bool {
        self.contact_partner.is_none() && self.price_list.is_none() && self.team.is_none()
    }
}

/// Points earned by one sale order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoyaltyHistoryLine {
    #[serde(default)]
    pub id: RecordId,
    pub sale_order_id: RecordId,
    /// Confirmation of the order the points come from.
    #[serde(default)]
    pub confirmation_date_time: Option<NaiveDateTime>,
    #[serde(default)]
    pub points_balance: Decimal,
    #[serde(default)]
    pub remaining_points: Decimal,
    #[serde(default)]
    pub points_acquired: bool,
    #[serde(default)]
    pub acquisition_date_time: Option<NaiveDateTime>,
}

impl LoyaltyHistoryLine {
    pub fn new(sale_order_id: RecordId, confirmation_date_time: NaiveDateTime, points: Decimal) -> Self {
        Self {
            id: RecordId::new(),
            sale_order_id,
            confirmation_date_time: Some(confirmation_date_time),
            points_balance: points,
            remaining_points: Decimal::ZERO,
            points_acquired: false,
            acquisition_date_time: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoyaltyAccount {
    #[serde(default)]
    pub id: RecordId,
    #[serde(default)]
    pub version: u64,
    pub partner: String,
    pub company: String,
    #[serde(default)]
    pub points_balance: Decimal,
    #[serde(default)]
    pub history_lines: Vec<LoyaltyHistoryLine>,
}

impl LoyaltyAccount {
    pub fn new(partner: impl Into<String>, company: impl Into<String>) -> Self {
        Self {
            id: RecordId::new(),
            version: 0,
            partner: partner.into(),
            company: company.into(),
            points_balance: Decimal::ZERO,
            history_lines: Vec::new(),
        }
    }
}

impl AggregateRoot for LoyaltyAccount {
    type Id = RecordId;

    fn id(&self) -> &Self::Id {
        &self.id
    }

    fn version(&self) -> u64 {
        self.version
    }
}

impl Record for LoyaltyAccount {
    fn set_id(&mut self, id: RecordId) {
        self.id = id;
    }

    fn set_version(&mut self, version: u64) {
        self.version = version;
    }
}
