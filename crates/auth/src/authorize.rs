use serde::{Deserialize, Serialize};
use thiserror::Error;

use erpsuite_core::{TenantId, UserId};

use crate::{Permission, Role};

/// A principal's membership in a tenant: which roles and permissions it
/// holds there.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TenantMembership {
    pub tenant_id: TenantId,
    pub roles: Vec<Role>,
    pub permissions: Vec<Permission>,
}

/// A fully resolved principal for authorization decisions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Principal {
    pub user_id: UserId,
    pub active_tenant_id: TenantId,
    pub membership: TenantMembership,
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AuthzError {
    #[error("tenant mismatch")]
    TenantMismatch,

    #[error("forbidden: missing permission '{0}'")]
    Forbidden(String),
}

/// Authorize a principal within its active tenant context.
///
/// - No IO
/// - No panics
pub fn authorize(principal: &Principal, required: &Permission) -> Result<(), AuthzError> {
    if principal.active_tenant_id != principal.membership.tenant_id {
        return Err(AuthzError::TenantMismatch);
    }

    let granted = principal
        .membership
        .permissions
        .iter()
        .any(|p| p.is_wildcard() || p == required);

    if granted {
        Ok(())
    } else {
        Err(AuthzError::Forbidden(required.as_str().to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::permissions_for_roles;

    fn principal(roles: &[&'static str]) -> Principal {
        let tenant_id = TenantId::new();
        let roles: Vec<Role> = roles.iter().map(|r| Role::new(*r)).collect();
        Principal {
            user_id: UserId::new(),
            active_tenant_id: tenant_id,
            membership: TenantMembership {
                tenant_id,
                permissions: permissions_for_roles(&roles),
                roles,
            },
        }
    }

    #[test]
    fn wildcard_grants_everything() {
        let admin = principal(&["admin"]);
        assert!(authorize(&admin, &Permission::GDPR_ANONYMIZE).is_ok());
    }

    #[test]
    fn missing_permission_is_forbidden() {
        let clerk = principal(&["warehouse"]);
        assert!(authorize(&clerk, &Permission::STOCK_WRITE).is_ok());
        assert_eq!(
            authorize(&clerk, &Permission::ACCOUNTING_WRITE),
            Err(AuthzError::Forbidden("accounting.write".into()))
        );
    }

    #[test]
    fn tenant_mismatch_is_rejected() {
        let mut admin = principal(&["admin"]);
        admin.active_tenant_id = TenantId::new();
        assert_eq!(
            authorize(&admin, &Permission::CRM_WRITE),
            Err(AuthzError::TenantMismatch)
        );
    }
}
