use std::fmt;

use serde::{Deserialize, Serialize};

use erpsuite_core::ValueObject;

/// Identifier derived from a company, an account and analytic codes.
///
/// Formatted as `COMPANY:ACCOUNT` followed by `:A-B-...` when analytic codes
/// are present. Analytic codes are sorted and deduplicated so the key does
/// not depend on the order they were entered in.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BudgetKey(String);

impl BudgetKey {
    pub fn compute<S: AsRef<str>>(company_code: &str, account_code: &str, analytic_codes: &[S]) -> Self {
        let mut codes: Vec<&str> = analytic_codes
            .iter()
            .map(|c| c.as_ref().trim())
            .filter(|c| !c.is_empty())
            .collect();
        codes.sort_unstable();
        codes.dedup();

        let mut key = format!("{company_code}:{account_code}");
        if !codes.is_empty() {
            key.push(':');
            key.push_str(&codes.join("-"));
        }
        Self(key)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for BudgetKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl ValueObject for BudgetKey {}
