//! Domain-level error types.

use thiserror::Error;

use crate::ports::AuthError;

/// Domain errors - business logic failures.
#[derive(Debug, Error)]
pub enum DomainError {
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("{entity_type} not found: {key}")]
    NotFound {
        entity_type: &'static str,
        key: String,
    },

    #[error("Unauthenticated: {0}")]
    Unauthenticated(&'static str),

    #[error("Action not allowed")]
    Forbidden,

    #[error("Internal error: {0}")]
    Internal(String),
}

impl DomainError {
    pub fn not_found(entity_type: &'static str, key: impl ToString) -> Self {
        Self::NotFound {
            entity_type,
            key: key.to_string(),
        }
    }
}

/// Repository-level errors.
#[derive(Debug, Error)]
pub enum RepoError {
    #[error("Database connection failed: {0}")]
    Connection(String),

    #[error("Query execution failed: {0}")]
    Query(String),

    #[error("Entity not found")]
    NotFound,

    #[error("Constraint violation: {0}")]
    Constraint(String),
}

impl From<RepoError> for DomainError {
    fn from(err: RepoError) -> Self {
        match err {
            RepoError::Constraint(msg) => DomainError::Conflict(msg),
            // A mutation that matched no row; the record vanished mid-request.
            RepoError::NotFound => DomainError::Internal("Mutation affected no record".to_string()),
            RepoError::Connection(msg) | RepoError::Query(msg) => DomainError::Internal(msg),
        }
    }
}

impl From<AuthError> for DomainError {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::InvalidCredentials => DomainError::Unauthenticated("Invalid password"),
            AuthError::MissingAuth => DomainError::Unauthenticated("Authentication required"),
            AuthError::TokenExpired => DomainError::Unauthenticated("Token expired"),
            AuthError::InvalidToken(_) => DomainError::Unauthenticated("Invalid token"),
            AuthError::Signing(msg) | AuthError::Hashing(msg) => DomainError::Internal(msg),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_constraint_violation_is_conflict() {
        let err: DomainError = RepoError::Constraint("duplicate key".into()).into();
        assert!(matches!(err, DomainError::Conflict(_)));
    }

    #[test]
    fn test_missing_row_on_mutation_is_internal() {
        let err: DomainError = RepoError::NotFound.into();
        assert!(matches!(err, DomainError::Internal(_)));
    }

    #[test]
    fn test_not_found_message() {
        let err = DomainError::not_found("User", "alice");
        assert_eq!(err.to_string(), "User not found: alice");
    }
}
