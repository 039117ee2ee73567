use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use erpsuite_core::{AggregateRoot, Record, RecordId};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StockMoveStatus {
    Draft,
    Planned,
    Realized,
    Canceled,
}

impl StockMoveStatus {
    pub fn code(self) -> &'static str {
        match self {
            StockMoveStatus::Draft => "draft",
            StockMoveStatus::Planned => "planned",
            StockMoveStatus::Realized => "realized",
            StockMoveStatus::Canceled => "canceled",
        }
    }

    pub fn is_closed(self) -> bool {
        matches!(self, StockMoveStatus::Realized | StockMoveStatus::Canceled)
    }
}

impl core::fmt::Display for StockMoveStatus {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.code())
    }
}

/// Conformity of received goods.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Conformity {
    #[default]
    None,
    Compliant,
    NonCompliant,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Unit(pub String);

impl Unit {
    pub fn new(code: impl Into<String>) -> Self {
        Self(code.into())
    }

    pub fn code(&self) -> &str {
        &self.0
    }
}

impl core::fmt::Display for Unit {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StockLocation {
    #[serde(default)]
    pub id: RecordId,
    pub name: String,
    #[serde(default)]
    pub address: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StockMoveLine {
    #[serde(default)]
    pub id: RecordId,
    #[serde(default)]
    pub version: u64,
    pub product: String,
    pub unit: Unit,
    pub qty: Decimal,
    #[serde(default)]
    pub real_qty: Decimal,
    #[serde(default)]
    pub conformity: Conformity,
}

impl StockMoveLine {
    pub fn new(product: impl Into<String>, unit: Unit, qty: Decimal) -> Self {
        Self {
            id: RecordId::new(),
            version: 0,
            product: product.into(),
            unit,
            qty,
            real_qty: qty,
            conformity: Conformity::None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StockMove {
    #[serde(default)]
    pub id: RecordId,
    #[serde(default)]
    pub version: u64,
    pub reference: String,
    pub status: StockMoveStatus,
    #[serde(default)]
    pub from_location: Option<StockLocation>,
    #[serde(default)]
    pub to_location: Option<StockLocation>,
    #[serde(default)]
    pub to_address: Option<String>,
    /// Single-line rendering of the destination, shown on delivery documents.
    #[serde(default)]
    pub to_address_str: Option<String>,
    #[serde(default)]
    pub estimated_date: Option<NaiveDate>,
    #[serde(default)]
    pub realized_date: Option<NaiveDate>,
    #[serde(default)]
    pub lines: Vec<StockMoveLine>,
}

impl StockMove {
    pub fn new(reference: impl Into<String>) -> Self {
        Self {
            id: RecordId::new(),
            version: 0,
            reference: reference.into(),
            status: StockMoveStatus::Draft,
            from_location: None,
            to_location: None,
            to_address: None,
            to_address_str: None,
            estimated_date: None,
            realized_date: None,
            lines: Vec::new(),
        }
    }

    pub fn line(&self, line_id: RecordId) -> Option<&StockMoveLine> {
        self.lines.iter().find(|l| l.id == line_id)
    }

    pub fn line_mut(&mut self, line_id: RecordId) -> Option<&mut StockMoveLine> {
        self.lines.iter_mut().find(|l| l.id == line_id)
    }
}

impl AggregateRoot for StockMove {
    type Id = RecordId;

    fn id(&self) -> &Self::Id {
        &self.id
    }

    fn version(&self) -> u64 {
        self.version
    }
}

impl Record for StockMove {
    fn set_id(&mut self, id: RecordId) {
        self.id = id;
    }

    fn set_version(&mut self, version: u64) {
        self.version = version;
    }
}
