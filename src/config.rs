use std::env;

use thiserror::Error;
use url::Url;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required environment variable: {0}")]
    Missing(&'static str),

    #[error("invalid value for {name}: {reason}")]
    Invalid { name: &'static str, reason: String },
}

/// Process configuration, read once at startup and passed explicitly.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Postgres connection string.
    pub db_url: String,
    /// Base URL of the users service. Carried as a reference only; this
    /// service does not call it.
    pub users_ms_url: Url,
    pub port: u16,
    pub db_max_connections: u32,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        let db_url = env::var("DB_URL").map_err(|_| ConfigError::Missing("DB_URL"))?;

        let users_ms_url = env::var("USERS_MS_URL").map_err(|_| ConfigError::Missing("USERS_MS_URL"))?;
        let users_ms_url = Url::parse(&users_ms_url).map_err(|e| ConfigError::Invalid {
            name: "USERS_MS_URL",
            reason: e.to_string(),
        })?;

        let port = match env::var("PORT") {
            Ok(raw) => raw.parse::<u16>().map_err(|e| ConfigError::Invalid {
                name: "PORT",
                reason: e.to_string(),
            })?,
            Err(_) => 8000,
        };

        let db_max_connections = match env::var("DB_MAX_CONNECTIONS") {
            Ok(raw) => raw.parse::<u32>().map_err(|e| ConfigError::Invalid {
                name: "DB_MAX_CONNECTIONS",
                reason: e.to_string(),
            })?,
            Err(_) => 10,
        };

        Ok(Self {
            db_url,
            users_ms_url,
            port,
            db_max_connections,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // Single test: env vars are process-global and cargo runs tests in
    // parallel threads, so all mutations happen in one place.
    #[test]
    fn reads_environment_with_defaults_and_failures() {
        env::set_var("DB_URL", "postgres://localhost:5432/venues");
        env::set_var("USERS_MS_URL", "http://users.internal:8001");
        env::remove_var("PORT");
        env::remove_var("DB_MAX_CONNECTIONS");

        let config = AppConfig::from_env().unwrap();
        assert_eq!(config.port, 8000);
        assert_eq!(config.db_max_connections, 10);
        assert_eq!(config.users_ms_url.as_str(), "http://users.internal:8001/");

        env::set_var("PORT", "9000");
        let config = AppConfig::from_env().unwrap();
        assert_eq!(config.port, 9000);

        env::set_var("USERS_MS_URL", "not a url");
        assert!(matches!(
            AppConfig::from_env(),
            Err(ConfigError::Invalid { name: "USERS_MS_URL", .. })
        ));
        env::set_var("USERS_MS_URL", "http://users.internal:8001");

        env::remove_var("DB_URL");
        assert!(matches!(AppConfig::from_env(), Err(ConfigError::Missing("DB_URL"))));
    }
}
