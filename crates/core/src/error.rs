//! Domain error model.
//!
//! A single business error type is used across modules. Every variant belongs
//! to a category with a stable numeric code so clients and the trace-back log
//! can classify failures without parsing messages.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::i18n::Message;

/// Result type used across the domain layer.
pub type DomainResult<T> = Result<T, DomainError>;

/// Business error category.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCategory {
    MissingField,
    NoUniqueKey,
    NoValue,
    ConfigurationError,
    Inconsistency,
    NotFound,
    Conflict,
    Unauthorized,
    InvalidId,
}

impl ErrorCategory {
    /// Stable numeric code exposed to clients.
    pub fn code(self) -> u16 {
        match self {
            ErrorCategory::MissingField => 1,
            ErrorCategory::NoUniqueKey => 2,
            ErrorCategory::NoValue => 3,
            ErrorCategory::ConfigurationError => 4,
            ErrorCategory::Inconsistency => 5,
            ErrorCategory::NotFound => 6,
            ErrorCategory::Conflict => 7,
            ErrorCategory::Unauthorized => 8,
            ErrorCategory::InvalidId => 9,
        }
    }
}

/// Domain-level error.
///
/// Keep this focused on deterministic business failures (validation,
/// invariants, conflicts). Infrastructure concerns belong elsewhere.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// A required field is not filled in.
    #[error("missing field: {0}")]
    MissingField(Message),

    /// A lookup expected exactly one record and found several.
    #[error("no unique key: {0}")]
    NoUniqueKey(Message),

    /// A value needed for a computation could not be found (e.g. a currency rate).
    #[error("no value: {0}")]
    NoValue(Message),

    /// The company/application configuration is incomplete.
    #[error("configuration error: {0}")]
    Configuration(Message),

    /// A business invariant was violated.
    #[error("inconsistency: {0}")]
    Inconsistency(Message),

    /// An identifier was invalid (e.g. parse failure).
    #[error("invalid identifier: {0}")]
    InvalidId(String),

    /// A requested record was not found.
    #[error("not found")]
    NotFound,

    /// A conflict occurred (e.g. stale version / optimistic concurrency).
    #[error("conflict: {0}")]
    Conflict(String),

    /// Authorization failure at the domain boundary.
    #[error("unauthorized")]
    Unauthorized,
}

impl DomainError {
    pub fn missing_field(msg: impl Into<Message>) -> Self {
        Self::MissingField(msg.into())
    }

    pub fn no_unique_key(msg: impl Into<Message>) -> Self {
        Self::NoUniqueKey(msg.into())
    }

    pub fn no_value(msg: impl Into<Message>) -> Self {
        Self::NoValue(msg.into())
    }

    pub fn configuration(msg: impl Into<Message>) -> Self {
        Self::Configuration(msg.into())
    }

    pub fn inconsistency(msg: impl Into<Message>) -> Self {
        Self::Inconsistency(msg.into())
    }

    pub fn invalid_id(msg: impl Into<String>) -> Self {
        Self::InvalidId(msg.into())
    }

    pub fn conflict(msg: impl Into<String>) -> Self {
        Self::Conflict(msg.into())
    }

    pub fn not_found() -> Self {
        Self::NotFound
    }

    pub fn category(&self) -> ErrorCategory {
        match self {
            DomainError::MissingField(_) => ErrorCategory::MissingField,
            DomainError::NoUniqueKey(_) => ErrorCategory::NoUniqueKey,
            DomainError::NoValue(_) => ErrorCategory::NoValue,
            DomainError::Configuration(_) => ErrorCategory::ConfigurationError,
            DomainError::Inconsistency(_) => ErrorCategory::Inconsistency,
            DomainError::InvalidId(_) => ErrorCategory::InvalidId,
            DomainError::NotFound => ErrorCategory::NotFound,
            DomainError::Conflict(_) => ErrorCategory::Conflict,
            DomainError::Unauthorized => ErrorCategory::Unauthorized,
        }
    }

    /// The user-facing message, without the category prefix.
    pub fn message(&self) -> Message {
        match self {
            DomainError::MissingField(m)
            | DomainError::NoUniqueKey(m)
            | DomainError::NoValue(m)
            | DomainError::Configuration(m)
            | DomainError::Inconsistency(m) => m.clone(),
            DomainError::InvalidId(s) | DomainError::Conflict(s) => Message::new(s.clone()),
            DomainError::NotFound => Message::new("Record not found"),
            DomainError::Unauthorized => Message::new("Access denied"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn categories_carry_stable_codes() {
        assert_eq!(DomainError::missing_field("x").category().code(), 1);
        assert_eq!(DomainError::configuration("x").category().code(), 4);
        assert_eq!(DomainError::inconsistency("x").category().code(), 5);
        assert_eq!(DomainError::conflict("x").category(), ErrorCategory::Conflict);
    }

    #[test]
    fn message_strips_category_prefix() {
        let err = DomainError::inconsistency(Message::new("Expense {} is not draft").arg("EXP-1"));
        assert_eq!(err.to_string(), "inconsistency: Expense EXP-1 is not draft");
        assert_eq!(err.message().to_string(), "Expense EXP-1 is not draft");
    }
}
