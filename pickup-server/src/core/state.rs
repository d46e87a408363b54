use std::sync::Arc;

use chrono_tz::Tz;
use sqlx::SqlitePool;

use crate::auth::JwtService;
use crate::core::{Config, Result};
use crate::db::DbService;

/// Server state, cheap to clone and shared by every handler
///
/// | Field | Meaning |
/// |-------|---------|
/// | config | immutable configuration |
/// | pool | SQLite connection pool |
/// | jwt_service | token validation |
#[derive(Clone, Debug)]
pub struct ServerState {
    pub config: Config,
    pub pool: SqlitePool,
    pub jwt_service: Arc<JwtService>,
}

impl ServerState {
    pub fn new(config: Config, pool: SqlitePool, jwt_service: Arc<JwtService>) -> Self {
        Self {
            config,
            pool,
            jwt_service,
        }
    }

    /// Open the database (running migrations) and build the services
    pub async fn initialize(config: &Config) -> Result<Self> {
        config.ensure_dirs()?;
        let db = DbService::new(&config.database_path).await?;
        let jwt_service = Arc::new(JwtService::with_config(config.jwt.clone()));
        tracing::info!(
            timezone = %config.timezone,
            environment = %config.environment,
            "Server state initialized"
        );
        Ok(Self::new(config.clone(), db.pool, jwt_service))
    }

    pub fn jwt_service(&self) -> &JwtService {
        &self.jwt_service
    }

    /// Business timezone
    pub fn tz(&self) -> Tz {
        self.config.timezone
    }
}
