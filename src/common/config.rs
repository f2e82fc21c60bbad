// src/common/config.rs
//! Process configuration loaded once from the environment at startup

use chrono::Duration;
use std::env;
use std::str::FromStr;
use thiserror::Error;

use crate::auth::HashCost;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{0} must be set")]
    Missing(&'static str),

    #[error("{key} has an invalid value: {value}")]
    Invalid { key: &'static str, value: String },
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub database_url: String,
    pub port: u16,
    pub jwt_secret: String,
    pub token_ttl: Duration,
    pub hash_cost: HashCost,
    /// `None` allows any origin.
    pub cors_origins: Option<Vec<String>>,
    pub reset_db: bool,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the config from an arbitrary key lookup so tests need not touch
    /// the process environment.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let jwt_secret = lookup("JWT_SECRET")
            .filter(|s| !s.trim().is_empty())
            .ok_or(ConfigError::Missing("JWT_SECRET"))?;

        let defaults = HashCost::default();
        let hash_cost = HashCost {
            memory_kib: parse_or(&lookup, "PASSWORD_HASH_MEMORY_KIB", defaults.memory_kib)?,
            iterations: parse_or(&lookup, "PASSWORD_HASH_ITERATIONS", defaults.iterations)?,
            parallelism: parse_or(&lookup, "PASSWORD_HASH_PARALLELISM", defaults.parallelism)?,
        };

        let ttl_secs: i64 = parse_or(&lookup, "JWT_TTL_SECONDS", 3600)?;
        let token_ttl = Duration::try_seconds(ttl_secs)
            .filter(|ttl| *ttl > Duration::zero())
            .ok_or_else(|| ConfigError::Invalid {
                key: "JWT_TTL_SECONDS",
                value: ttl_secs.to_string(),
            })?;

        let cors_origins = lookup("CORS_ORIGINS").and_then(|raw| {
            let origins: Vec<String> = raw
                .split(',')
                .map(|o| o.trim().to_string())
                .filter(|o| !o.is_empty())
                .collect();
            (!origins.is_empty()).then_some(origins)
        });

        Ok(Self {
            database_url: lookup("DATABASE_URL")
                .unwrap_or_else(|| "sqlite://feedback_api.db".to_string()),
            port: parse_or(&lookup, "PORT", 3000)?,
            jwt_secret,
            token_ttl,
            hash_cost,
            cors_origins,
            reset_db: lookup("RESET_DB")
                .map(|v| v.eq_ignore_ascii_case("true"))
                .unwrap_or(false),
        })
    }
}

fn parse_or<F, T>(lookup: &F, key: &'static str, default: T) -> Result<T, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
{
    match lookup(key) {
        None => Ok(default),
        Some(raw) => raw
            .trim()
            .parse()
            .map_err(|_| ConfigError::Invalid { key, value: raw }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config_from(pairs: &[(&str, &str)]) -> Result<AppConfig, ConfigError> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        AppConfig::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_defaults_applied() {
        let config = config_from(&[("JWT_SECRET", "s3cret")]).expect("config");

        assert_eq!(config.port, 3000);
        assert_eq!(config.token_ttl, Duration::hours(1));
        assert_eq!(config.database_url, "sqlite://feedback_api.db");
        assert!(config.cors_origins.is_none());
        assert!(!config.reset_db);
    }

    #[test]
    fn test_missing_secret_is_an_error() {
        let err = config_from(&[]).unwrap_err();
        assert!(matches!(err, ConfigError::Missing("JWT_SECRET")));

        let err = config_from(&[("JWT_SECRET", "   ")]).unwrap_err();
        assert!(matches!(err, ConfigError::Missing("JWT_SECRET")));
    }

    #[test]
    fn test_invalid_numbers_rejected() {
        let err = config_from(&[("JWT_SECRET", "s"), ("PORT", "http")]).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { key: "PORT", .. }));

        for ttl in ["0", "-5", "9223372036854775807"] {
            let err = config_from(&[("JWT_SECRET", "s"), ("JWT_TTL_SECONDS", ttl)]).unwrap_err();
            assert!(
                matches!(err, ConfigError::Invalid { key: "JWT_TTL_SECONDS", .. }),
                "ttl {}",
                ttl
            );
        }
    }

    #[test]
    fn test_cors_origins_parsed() {
        let config = config_from(&[
            ("JWT_SECRET", "s"),
            ("CORS_ORIGINS", "http://a.test, http://b.test,"),
            ("RESET_DB", "TRUE"),
        ])
        .expect("config");

        assert_eq!(
            config.cors_origins,
            Some(vec!["http://a.test".to_string(), "http://b.test".to_string()])
        );
        assert!(config.reset_db);
    }
}
