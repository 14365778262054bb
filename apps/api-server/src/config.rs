//! Application configuration loaded from environment variables.

use std::env;

use agora_infra::{DatabaseConfig, JwtConfig};

const DEV_SECRET: &str = "change-me-in-production";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("APP_SECRET must be set when RUST_ENV is production")]
    MissingSecret,
}

/// Application configuration.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub database: Option<DatabaseConfig>,
    /// Token signing settings. Read once here and never changed afterwards.
    pub jwt: JwtConfig,
}

impl AppConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build the configuration from any key/value source.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let database = lookup("DATABASE_URL").map(|url| DatabaseConfig {
            url,
            max_connections: lookup("DB_MAX_CONNECTIONS")
                .and_then(|s| s.parse().ok())
                .unwrap_or(100),
            min_connections: lookup("DB_MIN_CONNECTIONS")
                .and_then(|s| s.parse().ok())
                .unwrap_or(10),
        });

        let is_production = lookup("RUST_ENV")
            .map(|v| v == "production" || v == "prod")
            .unwrap_or(false);

        let secret = match lookup("APP_SECRET").filter(|s| !s.trim().is_empty()) {
            Some(secret) => secret,
            None if is_production => return Err(ConfigError::MissingSecret),
            None => {
                tracing::warn!("Using default token secret. Set APP_SECRET for production use.");
                DEV_SECRET.to_string()
            }
        };

        Ok(Self {
            host: lookup("HOST").unwrap_or_else(|| "127.0.0.1".to_string()),
            port: lookup("PORT")
                .and_then(|p| p.parse().ok())
                .unwrap_or(4000),
            database,
            jwt: JwtConfig::new(secret),
        })
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = AppConfig::from_lookup(lookup_from(&[])).unwrap();

        assert_eq!(config.host, "127.0.0.1");
        assert_eq!(config.port, 4000);
        assert!(config.database.is_none());
        assert_eq!(config.jwt.secret, DEV_SECRET);
    }

    #[test]
    fn test_database_and_secret() {
        let config = AppConfig::from_lookup(lookup_from(&[
            ("DATABASE_URL", "postgres://localhost/agora"),
            ("DB_MAX_CONNECTIONS", "20"),
            ("APP_SECRET", "s3cret"),
            ("PORT", "8080"),
        ]))
        .unwrap();

        let database = config.database.unwrap();
        assert_eq!(database.url, "postgres://localhost/agora");
        assert_eq!(database.max_connections, 20);
        assert_eq!(database.min_connections, 10);
        assert_eq!(config.jwt.secret, "s3cret");
        assert_eq!(config.port, 8080);
    }

    #[test]
    fn test_production_requires_secret() {
        let result = AppConfig::from_lookup(lookup_from(&[("RUST_ENV", "production")]));
        assert!(matches!(result, Err(ConfigError::MissingSecret)));

        let blank = AppConfig::from_lookup(lookup_from(&[
            ("RUST_ENV", "prod"),
            ("APP_SECRET", "  "),
        ]));
        assert!(matches!(blank, Err(ConfigError::MissingSecret)));
    }
}
