//! The module contains the error the engine can throw.
//!
//! The errors are:
//!
//! - [`InvalidTransaction`] thrown when a payload breaks a shape rule.
//! - [`RuleViolation`] thrown when a well-formed payload breaks a business rule
//!   (status transition, immutable orders, creation status).
//! - [`KeyNotFound`] thrown when a transaction is not found.
//! - [`Conflict`] thrown when the store detects a concurrent write.
//!
//!  [`InvalidTransaction`]: EngineError::InvalidTransaction
//!  [`RuleViolation`]: EngineError::RuleViolation
//!  [`KeyNotFound`]: EngineError::KeyNotFound
//!  [`Conflict`]: EngineError::Conflict
use sea_orm::DbErr;
use thiserror::Error;

use crate::ENTITY_NAME;

/// Engine custom errors.
#[derive(Error, Debug)]
pub enum EngineError {
    #[error("{message}")]
    InvalidTransaction { key: &'static str, message: String },
    #[error("{message}")]
    RuleViolation {
        entity: &'static str,
        key: &'static str,
        message: String,
    },
    #[error("\"{0}\" key not found!")]
    KeyNotFound(String),
    #[error("Concurrent modification: {0}")]
    Conflict(String),
    #[error(transparent)]
    Database(#[from] DbErr),
}

impl EngineError {
    pub fn invalid_transaction(key: &'static str, message: impl Into<String>) -> Self {
        Self::InvalidTransaction {
            key,
            message: message.into(),
        }
    }

    pub fn rule_violation(key: &'static str, message: impl Into<String>) -> Self {
        Self::RuleViolation {
            entity: ENTITY_NAME,
            key,
            message: message.into(),
        }
    }

    /// Name of the entity the error refers to, when it is a domain error.
    pub fn entity_name(&self) -> Option<&'static str> {
        match self {
            Self::RuleViolation { entity, .. } => Some(*entity),
            Self::InvalidTransaction { .. } | Self::KeyNotFound(_) | Self::Conflict(_) => {
                Some(ENTITY_NAME)
            }
            Self::Database(_) => None,
        }
    }

    /// Stable machine-readable code (e.g. `error.transaction.update`).
    pub fn error_key(&self) -> Option<&'static str> {
        match self {
            Self::InvalidTransaction { key, .. } | Self::RuleViolation { key, .. } => Some(*key),
            Self::KeyNotFound(_) => Some("idnotfound"),
            Self::Conflict(_) => Some("error.concurrencyFailure"),
            Self::Database(_) => None,
        }
    }
}

impl PartialEq for EngineError {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (
                Self::InvalidTransaction { key: a, message: m },
                Self::InvalidTransaction { key: b, message: n },
            ) => a == b && m == n,
            (
                Self::RuleViolation {
                    entity: a,
                    key: k,
                    message: m,
                },
                Self::RuleViolation {
                    entity: b,
                    key: l,
                    message: n,
                },
            ) => a == b && k == l && m == n,
            (Self::KeyNotFound(a), Self::KeyNotFound(b)) => a == b,
            (Self::Conflict(a), Self::Conflict(b)) => a == b,
            (Self::Database(a), Self::Database(b)) => a.to_string() == b.to_string(),
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rule_violation_carries_entity_and_key() {
        let err = EngineError::rule_violation("error.transaction.update", "Orders must be immutable");
        assert_eq!(err.entity_name(), Some("transaction"));
        assert_eq!(err.error_key(), Some("error.transaction.update"));
        assert_eq!(err.to_string(), "Orders must be immutable");
    }

    #[test]
    fn database_errors_have_no_code() {
        let err = EngineError::from(DbErr::Custom("boom".to_string()));
        assert_eq!(err.error_key(), None);
        assert_eq!(err.entity_name(), None);
    }
}
