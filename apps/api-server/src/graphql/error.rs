//! Mapping from domain failures to GraphQL errors.
//!
//! Every error carries a stable `extensions.code`; internal details are
//! logged and replaced by a generic message.

use async_graphql::ErrorExtensions;

use agora_core::DomainError;

pub fn error_code(err: &DomainError) -> &'static str {
    match err {
        DomainError::InvalidArgument(_) => "BAD_USER_INPUT",
        DomainError::Conflict(_) => "CONFLICT",
        DomainError::NotFound { .. } => "NOT_FOUND",
        DomainError::Unauthenticated(_) => "UNAUTHENTICATED",
        DomainError::Forbidden => "FORBIDDEN",
        DomainError::Internal(_) => "INTERNAL_SERVER_ERROR",
    }
}

pub fn to_graphql_error(err: DomainError) -> async_graphql::Error {
    let code = error_code(&err);
    let message = match &err {
        DomainError::Internal(detail) => {
            tracing::error!(%detail, "Internal error");
            "Internal server error".to_string()
        }
        other => other.to_string(),
    };

    async_graphql::Error::new(message).extend_with(|_, e| e.set("code", code))
}

/// `?`-friendly conversion for service results inside resolvers.
pub trait GraphQLResultExt<T> {
    fn into_gql(self) -> async_graphql::Result<T>;
}

impl<T> GraphQLResultExt<T> for Result<T, DomainError> {
    fn into_gql(self) -> async_graphql::Result<T> {
        self.map_err(to_graphql_error)
    }
}
