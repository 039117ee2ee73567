use erpsuite_auth::Role;
use erpsuite_core::{ActionContext, Locale, TenantId, UserId};

/// Tenant context for a request.
///
/// This is immutable and must be present for all domain routes.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct TenantContext {
    tenant_id: TenantId,
}

impl TenantContext {
    pub fn new(tenant_id: TenantId) -> Self {
        Self { tenant_id }
    }

    pub fn tenant_id(&self) -> TenantId {
        self.tenant_id
    }
}

/// Principal context for a request (authenticated user, roles and language).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrincipalContext {
    user_id: UserId,
    roles: Vec<Role>,
    locale: Locale,
}

impl PrincipalContext {
    pub fn new(user_id: UserId, roles: Vec<Role>, locale: Locale) -> Self {
        Self {
            user_id,
            roles,
            locale,
        }
    }

    pub fn user_id(&self) -> UserId {
        self.user_id
    }

    pub fn roles(&self) -> &[Role] {
        &self.roles
    }

    pub fn locale(&self) -> Locale {
        self.locale
    }

    /// Action context seeded with the caller's identity on top of what the
    /// client sent.
    pub fn action_context(&self, mut context: ActionContext) -> ActionContext {
        context.user_id = Some(self.user_id);
        context.roles = self.roles.iter().map(|r| r.as_str().to_string()).collect();
        context.locale = self.locale;
        context
    }
}
