use std::env;

use thiserror::Error;

pub const DEFAULT_HOST: &str = "0.0.0.0";
pub const DEFAULT_DATABASE: &str = "gobooks";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{0} must be set")]
    Missing(&'static str),

    #[error("invalid port: {0:?}")]
    InvalidPort(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub mongo_url: String,
    pub database: String,
}

impl Config {
    /// Reads the configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let required = |key: &'static str| {
            lookup(key)
                .filter(|v| !v.trim().is_empty())
                .ok_or(ConfigError::Missing(key))
        };

        let port = parse_port(&required("PORT")?)?;
        let mongo_url = required("MONGO_URL")?;

        Ok(Config {
            host: lookup("HOST").unwrap_or_else(|| DEFAULT_HOST.to_string()),
            port,
            mongo_url,
            database: lookup("MONGO_DATABASE").unwrap_or_else(|| DEFAULT_DATABASE.to_string()),
        })
    }

    pub fn bind_addr(&self) -> (String, u16) {
        (self.host.clone(), self.port)
    }
}

// Accepts both "8080" and ":8080".
fn parse_port(raw: &str) -> Result<u16, ConfigError> {
    let trimmed = raw.trim();
    trimmed
        .strip_prefix(':')
        .unwrap_or(trimmed)
        .parse()
        .map_err(|_| ConfigError::InvalidPort(raw.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn reads_required_values_and_defaults() {
        let config = Config::from_lookup(lookup(&[
            ("PORT", "8080"),
            ("MONGO_URL", "mongodb://localhost:27017"),
        ]))
        .unwrap();
        assert_eq!(config.port, 8080);
        assert_eq!(config.host, DEFAULT_HOST);
        assert_eq!(config.database, "gobooks");
        assert_eq!(config.mongo_url, "mongodb://localhost:27017");
    }

    #[test]
    fn accepts_colon_prefixed_port() {
        let config = Config::from_lookup(lookup(&[
            ("PORT", ":9000"),
            ("MONGO_URL", "mongodb://db"),
            ("MONGO_DATABASE", "library"),
        ]))
        .unwrap();
        assert_eq!(config.port, 9000);
        assert_eq!(config.database, "library");
    }

    #[test]
    fn missing_values_are_errors() {
        assert_eq!(
            Config::from_lookup(lookup(&[("MONGO_URL", "mongodb://db")])),
            Err(ConfigError::Missing("PORT"))
        );
        assert_eq!(
            Config::from_lookup(lookup(&[("PORT", "8080"), ("MONGO_URL", "  ")])),
            Err(ConfigError::Missing("MONGO_URL"))
        );
    }

    #[test]
    fn rejects_garbage_port() {
        assert_eq!(
            Config::from_lookup(lookup(&[("PORT", "http"), ("MONGO_URL", "mongodb://db")])),
            Err(ConfigError::InvalidPort("http".into()))
        );
    }
}
