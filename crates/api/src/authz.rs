//! API-side authorization guard.
//!
//! Enforced at the handler boundary before any service runs, keeping the
//! business crates auth-agnostic.

use erpsuite_auth::{AuthzError, Permission, Principal, TenantMembership, authorize, permissions_for_roles};

use crate::context::{PrincipalContext, TenantContext};

/// Check that the caller holds `permission` in the current tenant.
pub fn require(
    tenant: &TenantContext,
    principal: &PrincipalContext,
    permission: &Permission,
) -> Result<(), AuthzError> {
    let membership = TenantMembership {
        tenant_id: tenant.tenant_id(),
        roles: principal.roles().to_vec(),
        permissions: permissions_for_roles(principal.roles()),
    };

    let principal = Principal {
        user_id: principal.user_id(),
        active_tenant_id: tenant.tenant_id(),
        membership,
    };

    authorize(&principal, permission)
}

#[cfg(test)]
mod tests {
    use super::*;
    use erpsuite_auth::Role;
    use erpsuite_core::{Locale, TenantId, UserId};

    fn principal(role: &'static str) -> PrincipalContext {
        PrincipalContext::new(UserId::new(), vec![Role::new(role)], Locale::En)
    }

    #[test]
    fn role_grants_its_module_permission_only() {
        let tenant = TenantContext::new(TenantId::new());
        let warehouse = principal("warehouse");

        assert!(require(&tenant, &warehouse, &Permission::STOCK_WRITE).is_ok());
        assert_eq!(
            require(&tenant, &warehouse, &Permission::ACCOUNTING_WRITE),
            Err(AuthzError::Forbidden("accounting.write".into()))
        );
    }

    #[test]
    fn admin_holds_every_permission() {
        let tenant = TenantContext::new(TenantId::new());
        assert!(require(&tenant, &principal("admin"), &Permission::GDPR_ANONYMIZE).is_ok());
    }
}
