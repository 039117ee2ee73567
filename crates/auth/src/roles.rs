use std::borrow::Cow;

use serde::{Deserialize, Serialize};

use crate::Permission;

/// Role identifier used for RBAC.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Role(Cow<'static, str>);

impl Role {
    pub fn new(name: impl Into<Cow<'static, str>>) -> Self {
        Self(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl core::fmt::Display for Role {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(&self.0)
    }
}

fn role_permissions(role: &str) -> Vec<Permission> {
    match role {
        "admin" => vec![Permission::WILDCARD],
        "accountant" | "budget-manager" => {
            vec![Permission::ACCOUNTING_WRITE, Permission::BUDGET_WRITE]
        }
        "hr-manager" | "employee" => vec![Permission::HR_WRITE],
        "salesperson" => vec![Permission::CRM_WRITE, Permission::SALE_WRITE],
        "warehouse" => vec![Permission::STOCK_WRITE],
        "dpo" => vec![Permission::GDPR_ANONYMIZE],
        _ => Vec::new(),
    }
}

/// Permissions granted by a set of roles. Unknown roles grant nothing.
pub fn permissions_for_roles(roles: &[Role]) -> Vec<Permission> {
    let mut permissions: Vec<Permission> = roles
        .iter()
        .flat_map(|r| role_permissions(r.as_str()))
        .collect();
    permissions.sort_by(|a, b| a.as_str().cmp(b.as_str()));
    permissions.dedup();
    permissions
}
