//! Trace-back log of business errors.
//!
//! Every error surfaced to a user is recorded per tenant with its category
//! code and origin so support can find it later, and logged through `tracing`.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use erpsuite_core::{DomainError, ErrorCategory, RecordId, TenantId};

use crate::read_model::TenantStore;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TraceBack {
    pub id: RecordId,
    pub category: ErrorCategory,
    pub code: u16,
    pub message: String,
    /// Operation that raised the error, e.g. `move.on_save_before`.
    pub origin: String,
    pub date: DateTime<Utc>,
}

#[derive(Clone)]
pub struct TraceBackService {
    store: Arc<dyn TenantStore<RecordId, TraceBack>>,
}

impl TraceBackService {
    pub fn new(store: Arc<dyn TenantStore<RecordId, TraceBack>>) -> Self {
        Self { store }
    }

    pub fn trace(&self, tenant_id: TenantId, error: &DomainError, origin: &str) -> TraceBack {
        let category = error.category();
        let trace = TraceBack {
            id: RecordId::new(),
            category,
            code: category.code(),
            message: error.message().to_string(),
            origin: origin.to_string(),
            date: Utc::now(),
        };
        tracing::error!(
            %tenant_id,
            trace_id = %trace.id,
            code = trace.code,
            origin,
            error = %error,
            "business error traced"
        );
        self.store.upsert(tenant_id, trace.id, trace.clone());
        trace
    }

    /// Traces of a tenant, most recent first.
    pub fn list(&self, tenant_id: TenantId) -> Vec<TraceBack> {
        let mut traces = self.store.list(tenant_id);
        traces.sort_by(|a, b| b.date.cmp(&a.date));
        traces
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::read_model::InMemoryTenantStore;

    #[test]
    fn traces_are_recorded_per_tenant() {
        let service = TraceBackService::new(Arc::new(InMemoryTenantStore::new()));
        let acme = TenantId::new();

        let trace = service.trace(
            acme,
            &DomainError::configuration("Please configure the journal"),
            "move.on_new",
        );

        assert_eq!(trace.code, 4);
        assert_eq!(trace.category, ErrorCategory::ConfigurationError);
        assert_eq!(trace.message, "Please configure the journal");
        assert_eq!(service.list(acme), vec![trace]);
        assert!(service.list(TenantId::new()).is_empty());
    }
}
