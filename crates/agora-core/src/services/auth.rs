//! Account registration and login.

use std::sync::Arc;

use serde::Serialize;
use uuid::Uuid;

use crate::domain::{User, require_text};
use crate::error::DomainError;
use crate::ports::{
    AuthError, BaseRepository, DataStore, PasswordService, TokenService, UserRepository,
};

use super::guard::{RequestContext, authenticate};

/// Result of a successful register or login.
#[derive(Debug, Clone, Serialize)]
pub struct AuthPayload {
    pub token: String,
    pub user: User,
}

/// Registration and login flows over the user store.
pub struct AuthService {
    store: DataStore,
    passwords: Arc<dyn PasswordService>,
    tokens: Arc<dyn TokenService>,
}

impl AuthService {
    pub fn new(
        store: DataStore,
        passwords: Arc<dyn PasswordService>,
        tokens: Arc<dyn TokenService>,
    ) -> Self {
        Self {
            store,
            passwords,
            tokens,
        }
    }

    /// Create an account and sign the new user in.
    ///
    /// The existence check and the insert are separate store calls; a racing
    /// registration that slips between them is caught by the store's unique
    /// constraints and reported as a conflict as well.
    pub async fn register(
        &self,
        username: &str,
        email: &str,
        password: &str,
    ) -> Result<AuthPayload, DomainError> {
        require_text(username, "username")?;
        require_text(email, "email")?;
        require_text(password, "password")?;

        let users = &self.store.users;
        if users.exists_by_username(username).await? || users.exists_by_email(email).await? {
            tracing::debug!(username, "Registration rejected: account already exists");
            return Err(DomainError::Conflict(
                "Username is taken or email already exists".to_string(),
            ));
        }

        let password_hash = self.passwords.hash(password)?;
        let user = users
            .insert(User::new(
                username.to_string(),
                email.to_string(),
                password_hash,
            ))
            .await?;

        let token = self.tokens.issue(&user)?;
        tracing::info!(user_id = %user.id, username = %user.username, "User registered");

        Ok(AuthPayload { token, user })
    }

    /// Exchange a username and password for a fresh token.
    pub async fn login(&self, username: &str, password: &str) -> Result<AuthPayload, DomainError> {
        let user = self
            .store
            .users
            .find_by_username(username)
            .await?
            .ok_or_else(|| DomainError::not_found("User", username))?;

        if !self.passwords.verify(password, &user.password_hash)? {
            tracing::debug!(user_id = %user.id, "Login rejected: wrong password");
            return Err(AuthError::InvalidCredentials.into());
        }

        let token = self.tokens.issue(&user)?;
        tracing::info!(user_id = %user.id, "User logged in");

        Ok(AuthPayload { token, user })
    }

    /// Look up an account by id, e.g. the author of a post.
    pub async fn find_user(&self, user_id: Uuid) -> Result<Option<User>, DomainError> {
        Ok(self.store.users.find_by_id(user_id).await?)
    }

    /// The account behind the request's identity.
    pub async fn current_user(&self, ctx: &RequestContext) -> Result<User, DomainError> {
        let user_id = authenticate(ctx)?;

        self.store
            .users
            .find_by_id(user_id)
            .await?
            .ok_or_else(|| DomainError::not_found("User", user_id))
    }
}
