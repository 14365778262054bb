//! Application state - shared across all handlers.

use std::sync::Arc;

use agora_core::ports::{DataStore, TokenService};
use agora_core::services::{AuthService, PostService};
use agora_infra::{Argon2PasswordService, InMemoryStore, JwtConfig, JwtTokenService};

use crate::config::AppConfig;

/// Which persistence backend the process ended up on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StorageBackend {
    Postgres,
    InMemory,
}

impl StorageBackend {
    pub fn as_str(&self) -> &'static str {
        match self {
            StorageBackend::Postgres => "postgres",
            StorageBackend::InMemory => "memory",
        }
    }
}

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub auth: Arc<AuthService>,
    pub posts: Arc<PostService>,
    pub tokens: Arc<dyn TokenService>,
    pub storage: StorageBackend,
}

impl AppState {
    /// Build the application state, falling back to the in-memory store when
    /// no database is configured or reachable.
    pub async fn new(config: &AppConfig) -> Self {
        let (store, storage) = Self::init_store(config).await;
        let state = Self::with_store(store, storage, config.jwt.clone());

        tracing::info!(storage = storage.as_str(), "Application state initialized");
        state
    }

    /// Wire the services over an already-built store.
    pub fn with_store(store: DataStore, storage: StorageBackend, jwt: JwtConfig) -> Self {
        let tokens: Arc<dyn TokenService> = Arc::new(JwtTokenService::new(jwt));
        let auth = AuthService::new(
            store.clone(),
            Arc::new(Argon2PasswordService::new()),
            tokens.clone(),
        );

        Self {
            auth: Arc::new(auth),
            posts: Arc::new(PostService::new(store)),
            tokens,
            storage,
        }
    }

    #[cfg(feature = "postgres")]
    async fn init_store(config: &AppConfig) -> (DataStore, StorageBackend) {
        let Some(db_config) = config.database.as_ref() else {
            tracing::warn!("DATABASE_URL not set. Running without database (in-memory mode).");
            return (InMemoryStore::new().into_data_store(), StorageBackend::InMemory);
        };

        match agora_infra::database::connect(db_config).await {
            Ok(conn) => (agora_infra::postgres_store(conn), StorageBackend::Postgres),
            Err(e) => {
                tracing::error!(
                    "Failed to connect to database: {}. Using in-memory fallback.",
                    e
                );
                (InMemoryStore::new().into_data_store(), StorageBackend::InMemory)
            }
        }
    }

    #[cfg(not(feature = "postgres"))]
    async fn init_store(_config: &AppConfig) -> (DataStore, StorageBackend) {
        tracing::info!("Running without postgres feature - using in-memory store");
        (InMemoryStore::new().into_data_store(), StorageBackend::InMemory)
    }
}
