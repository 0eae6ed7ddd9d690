use std::fmt;
use std::str::FromStr;

use crate::controllayer::helper::forbidden::{ForbiddenIds, ForbiddenSet};
use crate::errors::errors::{ServiceError, ServiceResult};

/// Where entity rows are persisted
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DataBackend {
    Postgres,
    Memory,
}

impl FromStr for DataBackend {
    type Err = ServiceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "postgres" | "postgresql" => Ok(DataBackend::Postgres),
            "memory" | "in-memory" => Ok(DataBackend::Memory),
            other => Err(ServiceError::ConfigurationError(format!(
                "unknown DATA_BACKEND '{}', expected 'postgres' or 'memory'",
                other
            ))),
        }
    }
}

impl fmt::Display for DataBackend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DataBackend::Postgres => write!(f, "postgres"),
            DataBackend::Memory => write!(f, "memory"),
        }
    }
}

/// Server configuration, read from the environment after `.env` is loaded
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub port: u16,
    pub backend: DataBackend,
    pub run_migrations: bool,
    pub forbidden: ForbiddenIds,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: 3000,
            backend: DataBackend::Postgres,
            run_migrations: true,
            forbidden: ForbiddenIds::default(),
        }
    }
}

impl ServerConfig {
    pub fn from_env() -> ServiceResult<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build the configuration from any key lookup; unset keys keep their defaults.
    pub fn from_lookup<F>(lookup: F) -> ServiceResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(port) = lookup("PORT") {
            config.port = port.trim().parse().map_err(|_| {
                ServiceError::ConfigurationError(format!("invalid PORT '{}'", port))
            })?;
        }
        if let Some(backend) = lookup("DATA_BACKEND") {
            config.backend = backend.parse()?;
        }
        if let Some(flag) = lookup("RUN_MIGRATIONS") {
            config.run_migrations = flag.trim().parse().map_err(|_| {
                ServiceError::ConfigurationError(format!("invalid RUN_MIGRATIONS '{}'", flag))
            })?;
        }
        if let Some(ids) = lookup("FORBIDDEN_CAR_IDS") {
            config.forbidden.cars = ForbiddenSet::parse(&ids)?;
        }
        if let Some(ids) = lookup("FORBIDDEN_COUNTRY_IDS") {
            config.forbidden.countries = ForbiddenSet::parse(&ids)?;
        }
        if let Some(ids) = lookup("FORBIDDEN_UNIVERSITY_IDS") {
            config.forbidden.universities = ForbiddenSet::parse(&ids)?;
        }

        Ok(config)
    }

    pub fn address(&self) -> String {
        format!("0.0.0.0:{}", self.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults_when_nothing_is_set() {
        let config = ServerConfig::from_lookup(|_| None).unwrap();
        assert_eq!(config.port, 3000);
        assert_eq!(config.backend, DataBackend::Postgres);
        assert!(config.run_migrations);
        assert_eq!(config.forbidden, ForbiddenIds::default());
    }

    #[test]
    fn test_overrides_from_lookup() {
        let config = ServerConfig::from_lookup(lookup_from(&[
            ("PORT", "8080"),
            ("DATA_BACKEND", "memory"),
            ("RUN_MIGRATIONS", "false"),
            ("FORBIDDEN_CAR_IDS", "5,6"),
            ("FORBIDDEN_COUNTRY_IDS", ""),
        ]))
        .unwrap();

        assert_eq!(config.port, 8080);
        assert_eq!(config.backend, DataBackend::Memory);
        assert!(!config.run_migrations);
        assert_eq!(config.forbidden.cars, ForbiddenSet::new([5, 6]));
        assert!(config.forbidden.countries.is_empty());
        assert_eq!(config.address(), "0.0.0.0:8080");
    }

    #[test]
    fn test_invalid_values_are_configuration_errors() {
        for pairs in [
            [("PORT", "eighty")],
            [("DATA_BACKEND", "mongo")],
            [("RUN_MIGRATIONS", "maybe")],
            [("FORBIDDEN_UNIVERSITY_IDS", "1,x")],
        ] {
            let err = ServerConfig::from_lookup(lookup_from(&pairs)).unwrap_err();
            assert_eq!(err.error_code(), "CONFIGURATION_ERROR");
        }
    }
}
