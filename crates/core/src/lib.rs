//! `erpsuite-core` — domain foundation building blocks.
//!
//! This crate contains **pure domain** primitives shared by every business
//! module (no infrastructure concerns): identifiers, the categorized business
//! error, decimal helpers, the record-context accumulator used by lifecycle
//! coordinators, repository hooks and batch reporting.

pub mod aggregate;
pub mod batch;
pub mod error;
pub mod i18n;
pub mod id;
pub mod money;
pub mod record_context;
pub mod repository;
pub mod value_object;

pub use aggregate::{AggregateRoot, ExpectedVersion};
pub use batch::{BatchReport, run_batch};
pub use error::{DomainError, DomainResult, ErrorCategory};
pub use i18n::{Catalog, Locale, Message};
pub use id::{RecordId, TenantId, UserId};
pub use record_context::{ActionContext, RecordContext};
pub use repository::{NoHooks, Record, RepositoryHooks};
pub use value_object::ValueObject;
