//! Persistence extension points.
//!
//! Repositories call these hooks around CRUD operations so business modules
//! can inject derived fields (`populate`), reset state on duplication (`copy`)
//! and enforce invariants before writes (`before_save`, `before_remove`).

use serde_json::{Map, Value};

use crate::aggregate::AggregateRoot;
use crate::error::DomainResult;
use crate::id::{RecordId, TenantId};
use crate::record_context::ActionContext;

/// A record a repository can store.
pub trait Record: AggregateRoot<Id = RecordId> + Clone + Send + Sync + 'static {
    fn set_id(&mut self, id: RecordId);

    fn set_version(&mut self, version: u64);
}

/// Hooks run by repositories around persistence operations.
pub trait RepositoryHooks<E: Clone>: Send + Sync {
    /// Add computed, non-persistent fields to the JSON sent to the client.
    fn populate(&self, _json: &mut Map<String, Value>, _context: &ActionContext) {}

    /// Duplicate a record. The repository assigns a fresh id and version.
    fn copy(&self, entity: &E, _deep: bool) -> E {
        entity.clone()
    }

    /// Runs before every insert or update, inside the tenant the record belongs to.
    fn before_save(&self, _tenant_id: TenantId, _entity: &mut E) -> DomainResult<()> {
        Ok(())
    }

    fn before_remove(&self, _entity: &E) -> DomainResult<()> {
        Ok(())
    }
}

/// Hooks that do nothing.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoHooks;

impl<E: Clone> RepositoryHooks<E> for NoHooks {}
