use std::env;
use std::net::SocketAddr;

use crate::error::ConfigError;

const DEFAULT_DATABASE_URL: &str = "sqlite://courses.db?mode=rwc";
const DEFAULT_BIND_ADDR: &str = "127.0.0.1:3000";
const DEFAULT_MAX_CONNECTIONS: u32 = 5;

#[derive(Clone, Debug)]
pub struct Config {
    pub database_url: String,
    pub bind_addr: SocketAddr,
    pub max_connections: u32,
    /// Mount prefix for every course page, either empty or `/segment[/...]`.
    pub base_path: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            database_url: DEFAULT_DATABASE_URL.to_string(),
            bind_addr: SocketAddr::from(([127, 0, 0, 1], 3000)),
            max_connections: DEFAULT_MAX_CONNECTIONS,
            base_path: String::new(),
        }
    }
}

impl Config {
    pub fn new_from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let database_url =
            lookup("DATABASE_URL").unwrap_or_else(|| DEFAULT_DATABASE_URL.to_string());

        let bind_addr = lookup("BIND_ADDR")
            .unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string())
            .parse::<SocketAddr>()
            .map_err(|e| ConfigError::Invalid {
                key: "BIND_ADDR",
                message: e.to_string(),
            })?;

        let max_connections = match lookup("DATABASE_MAX_CONNECTIONS") {
            Some(raw) => match raw.parse::<u32>() {
                Ok(n) if n > 0 => n,
                _ => {
                    return Err(ConfigError::Invalid {
                        key: "DATABASE_MAX_CONNECTIONS",
                        message: format!("expected a positive integer, got {:?}", raw),
                    });
                }
            },
            None => DEFAULT_MAX_CONNECTIONS,
        };

        let base_path = normalize_base_path(lookup("COURSES_BASE_PATH").as_deref().unwrap_or(""))?;

        Ok(Self {
            database_url,
            bind_addr,
            max_connections,
            base_path,
        })
    }
}

/// `""`, `"/"` -> `""`; `"/courses/"` -> `"/courses"`.
fn normalize_base_path(raw: &str) -> Result<String, ConfigError> {
    let trimmed = raw.trim().trim_end_matches('/');
    if trimmed.is_empty() {
        return Ok(String::new());
    }
    if !trimmed.starts_with('/') {
        return Err(ConfigError::Invalid {
            key: "COURSES_BASE_PATH",
            message: format!("must start with '/', got {:?}", raw),
        });
    }
    if trimmed.contains(['{', '}', '*']) {
        return Err(ConfigError::Invalid {
            key: "COURSES_BASE_PATH",
            message: format!("must be a static path, got {:?}", raw),
        });
    }
    Ok(trimmed.to_string())
}
