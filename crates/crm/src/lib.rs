//! CRM module: opportunities and CRM batches.
//!
//! Pure domain logic only: no IO, no HTTP, no persistence concerns.

pub mod batch;
pub mod hooks;
pub mod messages;
pub mod model;

pub use batch::{CrmBatchData, CrmBatchService, ReminderEmail};
pub use hooks::{OPPORTUNITY_SEQUENCE, OpportunityHooks};
pub use model::{
    CrmBatch, CrmBatchAction, CrmEvent, Opportunity, OpportunityStatus, StatusTechnicalType, Target,
    TargetConfiguration, Template,
};
