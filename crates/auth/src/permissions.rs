use std::borrow::Cow;

use serde::{Deserialize, Serialize};

/// Permission identifier.
///
/// Permissions are opaque `module.action` strings (e.g. `accounting.write`).
/// The wildcard `"*"` grants every permission.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Permission(Cow<'static, str>);

impl Permission {
    pub const WILDCARD: Permission = Permission(Cow::Borrowed("*"));
    pub const ACCOUNTING_WRITE: Permission = Permission(Cow::Borrowed("accounting.write"));
    pub const BUDGET_WRITE: Permission = Permission(Cow::Borrowed("budget.write"));
    pub const HR_WRITE: Permission = Permission(Cow::Borrowed("hr.write"));
    pub const CRM_WRITE: Permission = Permission(Cow::Borrowed("crm.write"));
    pub const SALE_WRITE: Permission = Permission(Cow::Borrowed("sale.write"));
    pub const STOCK_WRITE: Permission = Permission(Cow::Borrowed("stock.write"));
    pub const GDPR_ANONYMIZE: Permission = Permission(Cow::Borrowed("gdpr.anonymize"));

    pub fn new(name: impl Into<Cow<'static, str>>) -> Self {
        Self(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_wildcard(&self) -> bool {
        self.as_str() == "*"
    }
}

impl core::fmt::Display for Permission {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(&self.0)
    }
}
