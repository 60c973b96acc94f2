// Application configuration loaded from the environment

use std::net::SocketAddr;
use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("{0} must be set")]
    Missing(&'static str),

    #[error("{name} has an invalid value: {value}")]
    Invalid { name: &'static str, value: String },
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub database_url: String,
    pub jwt_secret: String,
    pub host: String,
    pub port: u16,
    pub database_max_connections: u32,
}

impl AppConfig {
    /// Read configuration from process environment variables
    ///
    /// `.env` loading is left to the binary entry point.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let required = |name: &'static str| {
            lookup(name)
                .filter(|v| !v.trim().is_empty())
                .ok_or(ConfigError::Missing(name))
        };

        let port = match lookup("PORT") {
            Some(value) => value
                .parse()
                .map_err(|_| ConfigError::Invalid { name: "PORT", value })?,
            None => 8080,
        };

        let database_max_connections = match lookup("DATABASE_MAX_CONNECTIONS") {
            Some(value) => match value.parse::<u32>() {
                Ok(n) if n > 0 => n,
                _ => {
                    return Err(ConfigError::Invalid {
                        name: "DATABASE_MAX_CONNECTIONS",
                        value,
                    })
                }
            },
            None => 5,
        };

        Ok(Self {
            database_url: required("DATABASE_URL")?,
            jwt_secret: required("JWT_SECRET")?,
            host: lookup("HOST").unwrap_or_else(|| "0.0.0.0".to_string()),
            port,
            database_max_connections,
        })
    }

    pub fn bind_addr(&self) -> Result<SocketAddr, ConfigError> {
        let raw = format!("{}:{}", self.host, self.port);
        raw.parse().map_err(|_| ConfigError::Invalid { name: "HOST", value: raw })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn load(vars: &[(&str, &str)]) -> Result<AppConfig, ConfigError> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        AppConfig::from_lookup(|name| map.get(name).cloned())
    }

    #[test]
    fn test_defaults_applied() {
        let config = load(&[("DATABASE_URL", "postgres://localhost/laundry"), ("JWT_SECRET", "s3cret")]).unwrap();
        assert_eq!(config.host, "0.0.0.0");
        assert_eq!(config.port, 8080);
        assert_eq!(config.database_max_connections, 5);
        assert_eq!(config.bind_addr().unwrap().port(), 8080);
    }

    #[test]
    fn test_missing_required_values() {
        assert_eq!(load(&[("JWT_SECRET", "s3cret")]).unwrap_err(), ConfigError::Missing("DATABASE_URL"));
        assert_eq!(
            load(&[("DATABASE_URL", "postgres://localhost/laundry"), ("JWT_SECRET", "  ")]).unwrap_err(),
            ConfigError::Missing("JWT_SECRET")
        );
    }

    #[test]
    fn test_invalid_numbers_rejected() {
        let base = [("DATABASE_URL", "postgres://localhost/laundry"), ("JWT_SECRET", "s3cret")];

        let mut with_port = base.to_vec();
        with_port.push(("PORT", "eighty"));
        assert!(matches!(load(&with_port), Err(ConfigError::Invalid { name: "PORT", .. })));

        let mut with_pool = base.to_vec();
        with_pool.push(("DATABASE_MAX_CONNECTIONS", "0"));
        assert!(matches!(
            load(&with_pool),
            Err(ConfigError::Invalid { name: "DATABASE_MAX_CONNECTIONS", .. })
        ));
    }

    #[test]
    fn test_overrides() {
        let config = load(&[
            ("DATABASE_URL", "postgres://db/laundry"),
            ("JWT_SECRET", "s3cret"),
            ("HOST", "127.0.0.1"),
            ("PORT", "3001"),
            ("DATABASE_MAX_CONNECTIONS", "20"),
        ])
        .unwrap();
        assert_eq!(config.bind_addr().unwrap().to_string(), "127.0.0.1:3001");
        assert_eq!(config.database_max_connections, 20);
    }
}
