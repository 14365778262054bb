//! Bearer-token extraction. Turns the `Authorization` header into the
//! explicit `RequestContext` the services consume.

use actix_web::{FromRequest, HttpMessage, HttpRequest, dev::Payload, http::header, web};
use std::future::{Ready, ready};
use std::sync::Arc;

use agora_core::ports::{AuthError, TokenService};
use agora_core::services::{Identity, RequestContext};
use agora_shared::ErrorResponse;

use crate::observability::RequestId;

/// Caller identity, if the request carried a bearer token.
///
/// A missing header yields an anonymous caller; a header that is present but
/// malformed, expired or forged rejects the whole request with 401.
#[derive(Debug, Clone)]
pub struct BearerIdentity(pub Option<Identity>);

impl From<BearerIdentity> for RequestContext {
    fn from(identity: BearerIdentity) -> Self {
        RequestContext::from(identity.0)
    }
}

/// Error type for authentication failures.
#[derive(Debug)]
pub struct AuthenticationError {
    error: AuthError,
    request_id: Option<String>,
}

impl std::fmt::Display for AuthenticationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.error)
    }
}

impl actix_web::ResponseError for AuthenticationError {
    fn status_code(&self) -> actix_web::http::StatusCode {
        match &self.error {
            AuthError::TokenExpired | AuthError::InvalidToken(_) | AuthError::MissingAuth => {
                actix_web::http::StatusCode::UNAUTHORIZED
            }
            _ => actix_web::http::StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> actix_web::HttpResponse {
        let error = match &self.error {
            AuthError::TokenExpired => ErrorResponse::unauthorized(
                "Your authentication token has expired. Please login again.",
            ),
            AuthError::InvalidToken(msg) => ErrorResponse::unauthorized(msg.clone()),
            AuthError::MissingAuth => ErrorResponse::unauthorized(
                "Please provide a valid Bearer token in the Authorization header.",
            ),
            _ => ErrorResponse::internal_error(),
        };
        let error = match &self.request_id {
            Some(id) => error.with_request_id(id.clone()),
            None => error,
        };

        actix_web::HttpResponse::build(self.status_code()).json(error)
    }
}

impl FromRequest for BearerIdentity {
    type Error = AuthenticationError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        ready(identity_from_header(req).map_err(|error| {
            tracing::debug!(%error, "Rejected bearer token");
            AuthenticationError {
                error,
                request_id: req.extensions().get::<RequestId>().map(|r| r.0.clone()),
            }
        }))
    }
}

fn identity_from_header(req: &HttpRequest) -> Result<BearerIdentity, AuthError> {
    let Some(auth_header) = req.headers().get(header::AUTHORIZATION) else {
        return Ok(BearerIdentity(None));
    };

    let token_service = req
        .app_data::<web::Data<Arc<dyn TokenService>>>()
        .ok_or_else(|| {
            tracing::error!("TokenService not found in app data");
            AuthError::Signing("Token service not configured".to_string())
        })?;

    let auth_str = auth_header
        .to_str()
        .map_err(|_| AuthError::InvalidToken("Invalid authorization header".to_string()))?;

    // The auth scheme is case-insensitive.
    let token = auth_str
        .split_once(' ')
        .filter(|(scheme, _)| scheme.eq_ignore_ascii_case("bearer"))
        .map(|(_, token)| token.trim())
        .filter(|t| !t.is_empty())
        .ok_or_else(|| AuthError::InvalidToken("Expected Bearer token".to_string()))?;

    let claims = token_service.validate(token)?;
    Ok(BearerIdentity(Some(Identity::from(claims))))
}

#[cfg(test)]
mod tests {
    use actix_web::{ResponseError, http::StatusCode, test::TestRequest};

    use agora_core::domain::User;
    use agora_infra::{JwtConfig, JwtTokenService};

    use super::*;

    fn token_service() -> Arc<dyn TokenService> {
        Arc::new(JwtTokenService::new(JwtConfig::new("middleware-secret")))
    }

    #[actix_web::test]
    async fn test_missing_header_is_anonymous() {
        let req = TestRequest::default()
            .app_data(web::Data::new(token_service()))
            .to_http_request();

        let identity = BearerIdentity::extract(&req).await.unwrap();

        assert!(identity.0.is_none());
    }

    #[actix_web::test]
    async fn test_valid_token_yields_identity() {
        let tokens = token_service();
        let user = User::new("alice".into(), "a@x.com".into(), "hash".into());
        let token = tokens.issue(&user).unwrap();

        let req = TestRequest::default()
            .insert_header((header::AUTHORIZATION, format!("Bearer {token}")))
            .app_data(web::Data::new(tokens))
            .to_http_request();

        let identity = BearerIdentity::extract(&req).await.unwrap().0.unwrap();

        assert_eq!(identity.user_id, user.id);
        assert_eq!(identity.username, "alice");
    }

    #[actix_web::test]
    async fn test_scheme_is_case_insensitive() {
        let tokens = token_service();
        let user = User::new("alice".into(), "a@x.com".into(), "hash".into());
        let token = tokens.issue(&user).unwrap();

        for scheme in ["bearer", "BEARER", "Bearer"] {
            let req = TestRequest::default()
                .insert_header((header::AUTHORIZATION, format!("{scheme} {token}")))
                .app_data(web::Data::new(tokens.clone()))
                .to_http_request();

            let identity = BearerIdentity::extract(&req).await.unwrap().0.unwrap();

            assert_eq!(identity.user_id, user.id);
        }
    }

    #[actix_web::test]
    async fn test_bad_tokens_are_rejected() {
        for value in ["Bearer not-a-jwt", "Basic abc", "Bearer ", "Bearertoken"] {
            let req = TestRequest::default()
                .insert_header((header::AUTHORIZATION, value))
                .app_data(web::Data::new(token_service()))
                .to_http_request();

            let err = BearerIdentity::extract(&req).await.unwrap_err();

            assert_eq!(err.status_code(), StatusCode::UNAUTHORIZED);
        }
    }
}
