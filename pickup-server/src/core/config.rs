use std::path::PathBuf;

use chrono_tz::Tz;

use crate::auth::JwtConfig;
use crate::core::{Result, ServerError};

/// Server configuration
///
/// # Environment variables
///
/// | Variable | Default | Meaning |
/// |----------|---------|---------|
/// | WORK_DIR | ./data | working directory (database, logs) |
/// | DATABASE_PATH | {WORK_DIR}/database/pickup.db | SQLite file |
/// | HTTP_PORT | 3000 | HTTP port |
/// | TIMEZONE | UTC | business timezone for pickup days |
/// | ENVIRONMENT | development | development / production |
/// | LOG_LEVEL | info | default log filter |
/// | LOG_DIR | (unset) | enable daily log files |
/// | JWT_SECRET | random in debug | HMAC secret, ≥ 32 chars |
/// | JWT_EXPIRATION_MINUTES | 1440 | token lifetime |
/// | JWT_ISSUER / JWT_AUDIENCE | pickup-server / pickup-clients | claims |
///
/// ```ignore
/// WORK_DIR=/srv/pickup TIMEZONE=Europe/Madrid cargo run
/// ```
#[derive(Debug, Clone)]
pub struct Config {
    pub work_dir: String,
    pub database_path: String,
    pub http_port: u16,
    /// Business timezone; "today" for pickup numbers and reservation windows
    pub timezone: Tz,
    pub environment: String,
    pub log_level: String,
    pub log_dir: Option<String>,
    pub jwt: JwtConfig,
}

impl Config {
    /// Load configuration from environment variables, falling back to defaults
    pub fn from_env() -> Result<Self> {
        let work_dir = std::env::var("WORK_DIR").unwrap_or_else(|_| "./data".into());
        let database_path = std::env::var("DATABASE_PATH").unwrap_or_else(|_| {
            PathBuf::from(&work_dir)
                .join("database")
                .join("pickup.db")
                .to_string_lossy()
                .into_owned()
        });

        let timezone = match std::env::var("TIMEZONE") {
            Ok(name) => name
                .parse::<Tz>()
                .map_err(|_| ServerError::Config(format!("Unknown TIMEZONE: {name}")))?,
            Err(_) => chrono_tz::UTC,
        };

        let jwt = JwtConfig::from_env().map_err(|e| ServerError::Config(e.to_string()))?;

        Ok(Self {
            work_dir,
            database_path,
            http_port: std::env::var("HTTP_PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(3000),
            timezone,
            environment: std::env::var("ENVIRONMENT").unwrap_or_else(|_| "development".into()),
            log_level: std::env::var("LOG_LEVEL").unwrap_or_else(|_| "info".into()),
            log_dir: std::env::var("LOG_DIR").ok(),
            jwt,
        })
    }

    /// Configuration rooted at `work_dir`, for tests and tooling
    pub fn for_work_dir(work_dir: impl Into<String>) -> Self {
        let work_dir = work_dir.into();
        let database_path = PathBuf::from(&work_dir)
            .join("pickup.db")
            .to_string_lossy()
            .into_owned();
        Self {
            work_dir,
            database_path,
            http_port: 0,
            timezone: chrono_tz::UTC,
            environment: "development".into(),
            log_level: "info".into(),
            log_dir: None,
            jwt: JwtConfig::development(),
        }
    }

    /// Create the database directory if needed
    pub fn ensure_dirs(&self) -> Result<()> {
        if let Some(parent) = PathBuf::from(&self.database_path).parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent)?;
        }
        Ok(())
    }

    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_for_work_dir() {
        let config = Config::for_work_dir("/tmp/pickup-test");
        assert!(config.database_path.ends_with("pickup.db"));
        assert_eq!(config.timezone, chrono_tz::UTC);
        assert_eq!(config.environment, "development");
        assert!(!config.is_production());
    }
}
