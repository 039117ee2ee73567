//! Per-tenant sequence numbering (`EXP0001`, `OPP-000042`...).

use std::collections::HashMap;
use std::sync::Mutex;

use erpsuite_core::i18n::Message;
use erpsuite_core::{DomainError, DomainResult, TenantId};

use crate::messages;

#[derive(Debug, Clone)]
struct SequenceState {
    prefix: String,
    padding: usize,
    next: u64,
}

/// Thread-safe generator of `prefix + zero-padded counter` references.
#[derive(Debug, Default)]
pub struct SequenceGenerator {
    sequences: Mutex<HashMap<(TenantId, String), SequenceState>>,
}

impl SequenceGenerator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Declare (or reset) a sequence for a tenant. Numbering starts at 1.
    pub fn register(&self, tenant_id: TenantId, code: &str, prefix: &str, padding: usize) {
        if let Ok(mut map) = self.sequences.lock() {
            map.insert(
                (tenant_id, code.to_string()),
                SequenceState {
                    prefix: prefix.to_string(),
                    padding,
                    next: 1,
                },
            );
        }
    }

    /// Declare a sequence unless the tenant already has one under `code`.
    pub fn register_if_absent(&self, tenant_id: TenantId, code: &str, prefix: &str, padding: usize) {
        if let Ok(mut map) = self.sequences.lock() {
            map.entry((tenant_id, code.to_string())).or_insert_with(|| SequenceState {
                prefix: prefix.to_string(),
                padding,
                next: 1,
            });
        }
    }

    pub fn next(&self, tenant_id: TenantId, code: &str) -> DomainResult<String> {
        let mut map = self
            .sequences
            .lock()
            .map_err(|_| DomainError::inconsistency("sequence store poisoned"))?;
        let state = map
            .get_mut(&(tenant_id, code.to_string()))
            .ok_or_else(|| DomainError::configuration(Message::new(messages::SEQUENCE_MISSING).arg(code)))?;

        let value = format!("{}{:0width$}", state.prefix, state.next, width = state.padding);
        state.next += 1;
        tracing::debug!(%tenant_id, code, value = %value, "sequence value generated");
        Ok(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use erpsuite_core::ErrorCategory;

    #[test]
    fn sequences_are_scoped_per_tenant() {
        let generator = SequenceGenerator::new();
        let a = TenantId::new();
        let b = TenantId::new();
        generator.register(a, "opportunity", "OPP", 4);
        generator.register(b, "opportunity", "OPP", 4);

        assert_eq!(generator.next(a, "opportunity").unwrap(), "OPP0001");
        assert_eq!(generator.next(a, "opportunity").unwrap(), "OPP0002");
        assert_eq!(generator.next(b, "opportunity").unwrap(), "OPP0001");
    }

    #[test]
    fn unknown_sequence_is_a_configuration_error() {
        let generator = SequenceGenerator::new();
        let err = generator.next(TenantId::new(), "expense").unwrap_err();
        assert_eq!(err.category(), ErrorCategory::ConfigurationError);
    }

    #[test]
    fn register_if_absent_keeps_the_running_counter() {
        let generator = SequenceGenerator::new();
        let tenant = TenantId::new();
        generator.register_if_absent(tenant, "opportunity", "OPP", 4);
        assert_eq!(generator.next(tenant, "opportunity").unwrap(), "OPP0001");

        generator.register_if_absent(tenant, "opportunity", "OPP", 4);
        assert_eq!(generator.next(tenant, "opportunity").unwrap(), "OPP0002");
    }
}
