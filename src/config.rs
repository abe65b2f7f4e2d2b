//! Client configuration
//!
//! Backend URL and request timeout, resolved from environment variables
//! first and stored settings second.

use crate::db::{Database, SETTING_BACKEND_URL, SETTING_TIMEOUT_SECS};
use anyhow::{anyhow, Result};
use std::env;
use std::time::Duration;

// Environment variable names
const ENV_BACKEND_URL: &str = "PROFILECMD_BACKEND_URL";
const ENV_LEGACY_BACKEND_URL: &str = "REACT_APP_BACKEND_URL";
const ENV_TIMEOUT_SECS: &str = "PROFILECMD_TIMEOUT_SECS";

pub const DEFAULT_BACKEND_URL: &str = "http://localhost:8001";
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub backend_url: String,
    pub timeout_secs: u64,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            backend_url: DEFAULT_BACKEND_URL.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }
}

impl AppConfig {
    /// Load configuration from environment variables and database settings.
    /// Environment variables take precedence over database settings.
    pub fn load(db: &Database) -> Result<Self> {
        Self::resolve(db, |key| env::var(key).ok())
    }

    fn resolve(db: &Database, env_lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let non_empty = |v: String| if v.trim().is_empty() { None } else { Some(v) };

        let from_env = env_lookup(ENV_BACKEND_URL)
            .and_then(non_empty)
            .or_else(|| env_lookup(ENV_LEGACY_BACKEND_URL).and_then(non_empty));
        let backend_url = match from_env {
            Some(url) => url,
            None => db
                .get_setting(SETTING_BACKEND_URL)?
                .and_then(non_empty)
                .unwrap_or_else(|| DEFAULT_BACKEND_URL.to_string()),
        };

        let timeout_secs = match env_lookup(ENV_TIMEOUT_SECS).and_then(non_empty) {
            Some(v) => parse_timeout(&v)?,
            None => match db.get_setting(SETTING_TIMEOUT_SECS)? {
                Some(v) => parse_timeout(&v)?,
                None => DEFAULT_TIMEOUT_SECS,
            },
        };

        Ok(Self {
            backend_url: backend_url.trim().trim_end_matches('/').to_string(),
            timeout_secs,
        })
    }

    /// Persist settings given on the command line.
    pub fn save(db: &Database, backend_url: Option<&str>, timeout_secs: Option<u64>) -> Result<()> {
        if let Some(url) = backend_url {
            let url = url.trim().trim_end_matches('/');
            if !(url.starts_with("http://") || url.starts_with("https://")) {
                return Err(anyhow!("Backend URL must start with http:// or https://"));
            }
            db.set_setting(SETTING_BACKEND_URL, url)?;
        }
        if let Some(secs) = timeout_secs {
            if secs == 0 {
                return Err(anyhow!("Timeout must be at least 1 second"));
            }
            db.set_setting(SETTING_TIMEOUT_SECS, &secs.to_string())?;
        }
        Ok(())
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

fn parse_timeout(value: &str) -> Result<u64> {
    match value.trim().parse::<u64>() {
        Ok(secs) if secs > 0 => Ok(secs),
        _ => Err(anyhow!("Invalid timeout: {}", value)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn env_of(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let db = Database::open_memory().unwrap();
        let config = AppConfig::resolve(&db, env_of(&[])).unwrap();
        assert_eq!(config, AppConfig::default());
        assert_eq!(config.timeout(), Duration::from_secs(30));
    }

    #[test]
    fn test_env_takes_precedence_over_settings() {
        let db = Database::open_memory().unwrap();
        AppConfig::save(&db, Some("http://stored.test/"), Some(10)).unwrap();

        let config = AppConfig::resolve(
            &db,
            env_of(&[(ENV_BACKEND_URL, "https://env.test/"), (ENV_TIMEOUT_SECS, "5")]),
        )
        .unwrap();
        assert_eq!(config.backend_url, "https://env.test");
        assert_eq!(config.timeout_secs, 5);

        let config = AppConfig::resolve(&db, env_of(&[])).unwrap();
        assert_eq!(config.backend_url, "http://stored.test");
        assert_eq!(config.timeout_secs, 10);
    }

    #[test]
    fn test_legacy_env_var() {
        let db = Database::open_memory().unwrap();
        let config =
            AppConfig::resolve(&db, env_of(&[(ENV_LEGACY_BACKEND_URL, "http://legacy.test")])).unwrap();
        assert_eq!(config.backend_url, "http://legacy.test");
    }

    #[test]
    fn test_invalid_values_rejected() {
        let db = Database::open_memory().unwrap();
        assert!(AppConfig::save(&db, Some("localhost:8001"), None).is_err());
        assert!(AppConfig::save(&db, None, Some(0)).is_err());
        assert!(AppConfig::resolve(&db, env_of(&[(ENV_TIMEOUT_SECS, "soon")])).is_err());
    }

    #[test]
    fn test_env_values_skip_stored_settings() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("profilecmd.db");
        let db = Database::open_at(path.clone()).unwrap();
        rusqlite::Connection::open(&path)
            .unwrap()
            .execute_batch("DROP TABLE app_settings;")
            .unwrap();

        let config = AppConfig::resolve(
            &db,
            env_of(&[(ENV_LEGACY_BACKEND_URL, "http://legacy.test"), (ENV_TIMEOUT_SECS, "7")]),
        )
        .unwrap();
        assert_eq!(config.backend_url, "http://legacy.test");
        assert_eq!(config.timeout_secs, 7);

        // Without env values the broken table is read and fails
        assert!(AppConfig::resolve(&db, env_of(&[])).is_err());
    }
}
