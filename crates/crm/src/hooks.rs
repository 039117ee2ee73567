use std::sync::Arc;

use erpsuite_base::SequenceGenerator;
use erpsuite_core::{DomainError, DomainResult, RepositoryHooks, TenantId};

use crate::messages;
use crate::model::{Opportunity, OpportunityStatus, StatusTechnicalType};

/// Sequence code used to number opportunities.
pub const OPPORTUNITY_SEQUENCE: &str = "opportunity";

#[derive(Clone)]
pub struct OpportunityHooks {
    sequences: Arc<SequenceGenerator>,
    statuses: Arc<Vec<OpportunityStatus>>,
}

impl OpportunityHooks {
    pub fn new(sequences: Arc<SequenceGenerator>, statuses: Vec<OpportunityStatus>) -> Self {
        Self {
            sequences,
            statuses: Arc::new(statuses),
        }
    }

    fn new_status(&self) -> Option<OpportunityStatus> {
        self.statuses
            .iter()
            .filter(|s| s.technical_type == StatusTechnicalType::New)
            .min_by_key(|s| s.sequence)
            .cloned()
    }
}

impl RepositoryHooks<Opportunity> for OpportunityHooks {
    fn copy(&self, entity: &Opportunity, _deep: bool) -> Opportunity {
        let mut copy = entity.clone();
        copy.status = self.new_status();
        copy.lost_reason = None;
        copy.opportunity_seq = None;
        copy
    }

    fn before_save(&self, tenant_id: TenantId, entity: &mut Opportunity) -> DomainResult<()> {
        if entity.opportunity_seq.is_none() {
            entity.opportunity_seq = Some(self.sequences.next(tenant_id, OPPORTUNITY_SEQUENCE)?);
        }
        if entity.status.is_none() {
            entity.status = self.new_status();
        }
        if entity.status.is_none() {
            return Err(DomainError::configuration(messages::NO_OPPORTUNITY_STATUS));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn status(name: &str, sequence: u32, technical_type: StatusTechnicalType) -> OpportunityStatus {
        OpportunityStatus {
            name: name.into(),
            sequence,
            technical_type,
        }
    }

    fn hooks(tenant_id: TenantId) -> OpportunityHooks {
        let sequences = Arc::new(SequenceGenerator::new());
        sequences.register(tenant_id, OPPORTUNITY_SEQUENCE, "OPP-", 4);
        OpportunityHooks::new(
            sequences,
            vec![
                status("Lost", 4, StatusTechnicalType::ClosedLost),
                status("Qualification", 2, StatusTechnicalType::New),
                status("New", 1, StatusTechnicalType::New),
            ],
        )
    }

    #[test]
    fn copy_resets_status_lost_reason_and_sequence() {
        let mut lost = Opportunity::new("Website redesign");
        lost.status = Some(status("Lost", 4, StatusTechnicalType::ClosedLost));
        lost.lost_reason = Some("Too expensive".into());
        lost.opportunity_seq = Some("OPP-0007".into());

        let copy = hooks(TenantId::new()).copy(&lost, false);

        assert_eq!(copy.status.map(|s| s.name), Some("New".to_string()));
        assert!(copy.lost_reason.is_none());
        assert!(copy.opportunity_seq.is_none());
        assert_eq!(copy.name, "Website redesign");
    }

    #[test]
    fn before_save_numbers_per_tenant() {
        let tenant = TenantId::new();
        let hooks = hooks(tenant);
        let mut first = Opportunity::new("A");
        first.status = hooks.new_status();
        let mut second = first.clone();
        second.opportunity_seq = None;

        hooks.before_save(tenant, &mut first).unwrap();
        hooks.before_save(tenant, &mut second).unwrap();
        assert_eq!(first.opportunity_seq.as_deref(), Some("OPP-0001"));
        assert_eq!(second.opportunity_seq.as_deref(), Some("OPP-0002"));

        // An existing sequence is kept.
        hooks.before_save(tenant, &mut first).unwrap();
        assert_eq!(first.opportunity_seq.as_deref(), Some("OPP-0001"));
    }

    #[test]
    fn before_save_defaults_to_first_new_status() {
        let tenant = TenantId::new();
        let mut opp = Opportunity::new("Fresh");
        hooks(tenant).before_save(tenant, &mut opp).unwrap();
        assert_eq!(opp.status.map(|s| s.name), Some("New".to_string()));
    }

    #[test]
    fn before_save_rejects_missing_status() {
        let tenant = TenantId::new();
        let sequences = Arc::new(SequenceGenerator::new());
        sequences.register(tenant, OPPORTUNITY_SEQUENCE, "OPP-", 4);
        let hooks = OpportunityHooks::new(sequences, vec![status("Lost", 4, StatusTechnicalType::ClosedLost)]);

        let mut opp = Opportunity::new("No status");
        match hooks.before_save(tenant, &mut opp).unwrap_err() {
            DomainError::Configuration(msg) if msg.key() == messages::NO_OPPORTUNITY_STATUS => {}
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn before_save_without_registered_sequence_fails() {
        let hooks = hooks(TenantId::new());
        let mut opp = Opportunity::new("Other tenant");
        opp.status = hooks.new_status();
        let err = hooks.before_save(TenantId::new(), &mut opp).unwrap_err();
        assert_eq!(err.category(), erpsuite_core::ErrorCategory::ConfigurationError);
    }
}
