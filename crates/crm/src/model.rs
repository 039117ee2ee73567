//! CRM entities.

use chrono::{NaiveDate, NaiveDateTime};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use erpsuite_core::{AggregateRoot, Record, RecordId, UserId};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StatusTechnicalType {
    New,
    InProgress,
    ClosedWon,
    ClosedLost,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OpportunityStatus {
    pub name: String,
    pub sequence: u32,
    pub technical_type: StatusTechnicalType,
}

impl OpportunityStatus {
    pub fn is_closed(&self) -> bool {
        matches!(
            self.technical_type,
            StatusTechnicalType::ClosedWon | StatusTechnicalType::ClosedLost
        )
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Opportunity {
    #[serde(default)]
    pub id: RecordId,
    #[serde(default)]
    pub version: u64,
    pub name: String,
    #[serde(default)]
    pub opportunity_seq: Option<String>,
    #[serde(default)]
    pub status: Option<OpportunityStatus>,
    #[serde(default)]
    pub lost_reason: Option<String>,
    #[serde(default)]
    pub user_id: Option<UserId>,
    #[serde(default)]
    pub amount: Decimal,
    #[serde(default)]
    pub expected_close_date: Option<NaiveDate>,
    #[serde(default)]
    pub call_for_tenders_deadline: Option<NaiveDate>,
}

impl Opportunity {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: RecordId::new(),
            version: 0,
            name: name.into(),
            opportunity_seq: None,
            status: None,
            lost_reason: None,
            user_id: None,
            amount: Decimal::ZERO,
            expected_close_date: None,
            call_for_tenders_deadline: None,
        }
    }

    pub fn is_won(&self) -> bool {
        self.status
            .as_ref()
            .is_some_and(|s| s.technical_type == StatusTechnicalType::ClosedWon)
    }

    pub fn is_closed(&self) -> bool {
        self.status.as_ref().is_some_and(OpportunityStatus::is_closed)
    }
}

impl AggregateRoot for Opportunity {
    type Id = RecordId;

    fn id(&self) -> &Self::Id {
        &self.id
    }

    fn version(&self) -> u64 {
        self.version
    }
}

impl Record for Opportunity {
    fn set_id(&mut self, id: RecordId) {
        self.id = id;
    }

    fn set_version(&mut self, version: u64) {
        self.version = version;
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CrmEvent {
    #[serde(default)]
    pub id: RecordId,
    pub subject: String,
    #[serde(default)]
    pub start_date_time: Option<NaiveDateTime>,
    /// Minutes before the start at which the reminder is due.
    #[serde(default)]
    pub reminder_minutes: Option<u32>,
    #[serde(default)]
    pub is_reminded: bool,
}

/// Sales objective of a user over a period.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TargetConfiguration {
    #[serde(default)]
    pub id: RecordId,
    pub code: String,
    pub user_id: UserId,
    pub from_date: NaiveDate,
    pub to_date: NaiveDate,
    #[serde(default)]
    pub opportunity_amount_won_target: Decimal,
}

/// Achievement of a target configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Target {
    pub configuration_id: RecordId,
    pub user_id: UserId,
    pub from_date: NaiveDate,
    pub to_date: NaiveDate,
    pub opportunity_amount_won: Decimal,
    pub opportunity_amount_won_target: Decimal,
    pub opportunity_won_count: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Template {
    pub name: String,
    pub content: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CrmBatchAction {
    EventReminder,
    Target,
    CallForTendersReminder,
}

impl CrmBatchAction {
    pub fn code(self) -> u8 {
        match self {
            CrmBatchAction::EventReminder => 21,
            CrmBatchAction::Target => 22,
            CrmBatchAction::CallForTendersReminder => 23,
        }
    }

    pub fn from_code(code: u8) -> Option<Self> {
        match code {
            21 => Some(CrmBatchAction::EventReminder),
            22 => Some(CrmBatchAction::Target),
            23 => Some(CrmBatchAction::CallForTendersReminder),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CrmBatch {
    pub code: String,
    /// Integer code of the action select; see [`CrmBatchAction::from_code`].
    pub action_select: u8,
    #[serde(default)]
    pub month_limit_nbr: i32,
    #[serde(default)]
    pub template: Option<Template>,
    #[serde(default)]
    pub sender_email: Option<String>,
}
