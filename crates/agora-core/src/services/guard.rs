//! Per-request identity and the guard every mutation passes through.

use uuid::Uuid;

use crate::error::DomainError;
use crate::ports::TokenClaims;

/// An already-verified caller identity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identity {
    pub user_id: Uuid,
    pub email: String,
    pub username: String,
}

impl From<TokenClaims> for Identity {
    fn from(claims: TokenClaims) -> Self {
        Self {
            user_id: claims.user_id,
            email: claims.email,
            username: claims.username,
        }
    }
}

/// Explicit per-request context handed to every service call.
///
/// The transport layer builds it once, after token verification; services
/// never look at headers themselves.
#[derive(Debug, Clone, Default)]
pub struct RequestContext {
    identity: Option<Identity>,
}

impl RequestContext {
    pub fn anonymous() -> Self {
        Self::default()
    }

    pub fn authenticated(identity: Identity) -> Self {
        Self {
            identity: Some(identity),
        }
    }

    pub fn identity(&self) -> Option<&Identity> {
        self.identity.as_ref()
    }
}

impl From<Option<Identity>> for RequestContext {
    fn from(identity: Option<Identity>) -> Self {
        Self { identity }
    }
}

impl From<Identity> for RequestContext {
    fn from(identity: Identity) -> Self {
        Self::authenticated(identity)
    }
}

/// Resolve the acting user for this request. Fails closed.
pub fn authenticate(ctx: &RequestContext) -> Result<Uuid, DomainError> {
    ctx.identity()
        .map(|identity| identity.user_id)
        .ok_or(DomainError::Unauthenticated("Authentication required"))
}
