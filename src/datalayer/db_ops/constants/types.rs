use std::str::FromStr;
use std::time::Duration;

use crate::datalayer::db_ops::constants::constants;
use crate::errors::errors::{ServiceError, ServiceResult};

/// Database configuration structure
#[derive(Debug, Clone)]
pub struct DbConfig {
    pub database_url: String,
    pub max_connections: u32,
    pub min_connections: u32,
    pub connection_timeout: Duration,
    pub idle_timeout: Duration,
    pub max_lifetime: Duration,
}

/*
Default configuration for the database connection pool.
- database_url: DATABASE_URL, falling back to the local development database
- max_connections: 10
- min_connections: 2
- connection_timeout: 30 seconds
- idle_timeout: 10 minutes
- max_lifetime: 30 minutes
*/
impl Default for DbConfig {
    fn default() -> Self {
        Self {
            database_url: std::env::var("DATABASE_URL")
                .unwrap_or_else(|_| constants::URL.to_string()),
            max_connections: 10,
            min_connections: 2,
            connection_timeout: Duration::from_secs(30),
            idle_timeout: Duration::from_secs(600),
            max_lifetime: Duration::from_secs(1800),
        }
    }
}

// Builder pattern for DbConfig: start from DbConfig::new() and override what differs
impl DbConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_env() -> ServiceResult<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Pool settings from `DATABASE_URL`, `DB_MAX_CONNECTIONS`,
    /// `DB_MIN_CONNECTIONS`, `DB_ACQUIRE_TIMEOUT_SECS`, `DB_IDLE_TIMEOUT_SECS`
    /// and `DB_MAX_LIFETIME_SECS`. Unset keys keep their defaults.
    pub fn from_lookup<F>(lookup: F) -> ServiceResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::new();

        if let Some(url) = lookup("DATABASE_URL") {
            config = config.set_database_url(url);
        }
        if let Some(max) = parse::<u32>(&lookup, "DB_MAX_CONNECTIONS")? {
            config = config.set_max_connections(max);
        }
        if let Some(min) = parse::<u32>(&lookup, "DB_MIN_CONNECTIONS")? {
            config = config.set_min_connections(min);
        }
        if let Some(secs) = parse::<u64>(&lookup, "DB_ACQUIRE_TIMEOUT_SECS")? {
            config = config.set_connection_timeout(Duration::from_secs(secs));
        }
        if let Some(secs) = parse::<u64>(&lookup, "DB_IDLE_TIMEOUT_SECS")? {
            config = config.set_idle_timeout(Duration::from_secs(secs));
        }
        if let Some(secs) = parse::<u64>(&lookup, "DB_MAX_LIFETIME_SECS")? {
            config = config.set_max_lifetime(Duration::from_secs(secs));
        }

        if config.min_connections > config.max_connections {
            return Err(ServiceError::ConfigurationError(format!(
                "DB_MIN_CONNECTIONS {} exceeds DB_MAX_CONNECTIONS {}",
                config.min_connections, config.max_connections
            )));
        }

        Ok(config)
    }

    pub fn set_database_url(mut self, database_url: String) -> Self {
        self.database_url = database_url;
        self
    }

    pub fn set_max_connections(mut self, max_connections: u32) -> Self {
        self.max_connections = max_connections;
        self
    }

    pub fn set_min_connections(mut self, min_connections: u32) -> Self {
        self.min_connections = min_connections;
        self
    }

    pub fn set_connection_timeout(mut self, connection_timeout: Duration) -> Self {
        self.connection_timeout = connection_timeout;
        self
    }

    pub fn set_idle_timeout(mut self, idle_timeout: Duration) -> Self {
        self.idle_timeout = idle_timeout;
        self
    }

    pub fn set_max_lifetime(mut self, max_lifetime: Duration) -> Self {
        self.max_lifetime = max_lifetime;
        self
    }
}

fn parse<T: FromStr>(lookup: &impl Fn(&str) -> Option<String>, key: &str) -> ServiceResult<Option<T>> {
    lookup(key)
        .map(|raw| {
            raw.trim().parse::<T>().map_err(|_| {
                ServiceError::ConfigurationError(format!("invalid {} '{}'", key, raw))
            })
        })
        .transpose()
}
