//! Process configuration from environment (optionally seeded from a `.env` file).

use crate::error::ConfigError;
use regex::Regex;
use std::net::SocketAddr;
use std::sync::OnceLock;

pub const DEFAULT_DATABASE_URL: &str = "postgres://localhost/hospital";
pub const DEFAULT_SCHEMA: &str = "hospital";
pub const DEFAULT_BIND_ADDR: &str = "0.0.0.0:3000";
pub const DEFAULT_MAX_CONNECTIONS: u32 = 5;
pub const DEFAULT_BODY_LIMIT: usize = 1024 * 1024;

/// Which data source backs the routers.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StoreKind {
    Postgres,
    /// In-process tables; nothing survives a restart.
    Memory,
}

impl std::str::FromStr for StoreKind {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "postgres" | "postgresql" => Ok(StoreKind::Postgres),
            "memory" => Ok(StoreKind::Memory),
            _ => Err(ConfigError::Invalid {
                key: "HOSPITAL_STORE",
                message: format!("{} (expected postgres or memory)", s),
            }),
        }
    }
}

#[derive(Clone, Debug)]
pub struct AppConfig {
    pub database_url: String,
    /// PostgreSQL schema holding the six tables. Validated as a plain identifier.
    pub schema: String,
    pub bind_addr: SocketAddr,
    pub max_connections: u32,
    pub body_limit: usize,
    pub store: StoreKind,
}

impl AppConfig {
    /// Load `.env` if present, then read the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from any key lookup. Missing keys fall back to defaults; present but invalid keys are errors.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let database_url = lookup("DATABASE_URL").unwrap_or_else(|| DEFAULT_DATABASE_URL.into());
        let schema = lookup("HOSPITAL_SCHEMA").unwrap_or_else(|| DEFAULT_SCHEMA.into());
        validate_identifier("HOSPITAL_SCHEMA", &schema)?;

        let bind_addr = lookup("BIND_ADDR")
            .unwrap_or_else(|| DEFAULT_BIND_ADDR.into())
            .parse::<SocketAddr>()
            .map_err(|e| ConfigError::Invalid {
                key: "BIND_ADDR",
                message: e.to_string(),
            })?;

        let max_connections = match lookup("DB_MAX_CONNECTIONS") {
            Some(v) => parse_positive("DB_MAX_CONNECTIONS", &v)? as u32,
            None => DEFAULT_MAX_CONNECTIONS,
        };
        let body_limit = match lookup("REQUEST_BODY_LIMIT") {
            Some(v) => parse_positive("REQUEST_BODY_LIMIT", &v)? as usize,
            None => DEFAULT_BODY_LIMIT,
        };
        let store = match lookup("HOSPITAL_STORE") {
            Some(v) => v.parse()?,
            None => StoreKind::Postgres,
        };

        Ok(AppConfig {
            database_url,
            schema,
            bind_addr,
            max_connections,
            body_limit,
            store,
        })
    }
}

fn identifier_re() -> Result<&'static Regex, regex::Error> {
    static RE: OnceLock<Regex> = OnceLock::new();
    if let Some(re) = RE.get() {
        return Ok(re);
    }
    let re = Regex::new(r"^[A-Za-z_][A-Za-z0-9_]{0,62}$")?;
    Ok(RE.get_or_init(|| re))
}

fn validate_identifier(key: &'static str, value: &str) -> Result<(), ConfigError> {
    let re = identifier_re().map_err(|e| ConfigError::Invalid {
        key,
        message: e.to_string(),
    })?;
    if !re.is_match(value) {
        return Err(ConfigError::Invalid {
            key,
            message: format!("'{}' is not a valid identifier", value),
        });
    }
    Ok(())
}

fn parse_positive(key: &'static str, value: &str) -> Result<u64, ConfigError> {
    match value.trim().parse::<u64>() {
        Ok(n) if n > 0 => Ok(n),
        _ => Err(ConfigError::Invalid {
            key,
            message: format!("'{}' is not a positive integer", value),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn defaults_when_environment_is_empty() {
        let config = AppConfig::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config.database_url, DEFAULT_DATABASE_URL);
        assert_eq!(config.schema, "hospital");
        assert_eq!(config.bind_addr.port(), 3000);
        assert_eq!(config.max_connections, 5);
        assert_eq!(config.body_limit, DEFAULT_BODY_LIMIT);
        assert_eq!(config.store, StoreKind::Postgres);
    }

    #[test]
    fn reads_overrides() {
        let config = AppConfig::from_lookup(lookup(&[
            ("DATABASE_URL", "postgres://db:5432/clinic"),
            ("HOSPITAL_SCHEMA", "clinic"),
            ("BIND_ADDR", "127.0.0.1:8080"),
            ("DB_MAX_CONNECTIONS", "12"),
            ("HOSPITAL_STORE", "memory"),
        ]))
        .unwrap();
        assert_eq!(config.database_url, "postgres://db:5432/clinic");
        assert_eq!(config.schema, "clinic");
        assert_eq!(config.bind_addr.to_string(), "127.0.0.1:8080");
        assert_eq!(config.max_connections, 12);
        assert_eq!(config.store, StoreKind::Memory);
    }

    #[test]
    fn rejects_bad_schema_name() {
        let err = AppConfig::from_lookup(lookup(&[("HOSPITAL_SCHEMA", "drop table;")])).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { key: "HOSPITAL_SCHEMA", .. }));
    }

    #[test]
    fn rejects_zero_connections() {
        let err = AppConfig::from_lookup(lookup(&[("DB_MAX_CONNECTIONS", "0")])).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { key: "DB_MAX_CONNECTIONS", .. }));
    }

    #[test]
    fn identifier_pattern_is_compiled_once() {
        let a = identifier_re().unwrap();
        let b = identifier_re().unwrap();
        assert!(std::ptr::eq(a, b));
        assert!(validate_identifier("HOSPITAL_SCHEMA", "hospital_v2").is_ok());
    }
}
