//! Shared server state

use std::sync::Arc;

use shared::error::AppError;
use sqlx::SqlitePool;

use super::Config;
use crate::db::DbService;
use crate::orders::OrderService;

/// State handed to every handler
///
/// Cheap to clone: the pool and config are reference counted.
#[derive(Clone)]
pub struct ServerState {
    pub config: Arc<Config>,
    pub db: DbService,
    pub orders: OrderService,
}

impl ServerState {
    pub fn new(config: Config, db: DbService) -> Self {
        let orders = OrderService::new(db.pool.clone(), config.order_policy);
        Self {
            config: Arc::new(config),
            db,
            orders,
        }
    }

    /// Open the database from `config` and build the state
    pub async fn initialize(config: Config) -> Result<Self, AppError> {
        let db = DbService::new(&config).await?;
        Ok(Self::new(config, db))
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.db.pool
    }
}
