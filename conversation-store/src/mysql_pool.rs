//! MySQL connection pool lifecycle for the conversation store.

use std::sync::Arc;
use std::time::Duration;

use sqlx::mysql::{MySqlPool, MySqlPoolOptions};
use tokio::sync::RwLock;
use tracing::info;

use crate::config::DbConfig;

/// Owns at most one MySQL pool, created on first use and dropped by [`close_pool`].
///
/// Clones share the same slot, so a manager built at startup can be handed to every caller.
///
/// [`close_pool`]: PoolManager::close_pool
#[derive(Clone)]
pub struct PoolManager {
    config: Arc<DbConfig>,
    pool: Arc<RwLock<Option<MySqlPool>>>,
}

impl PoolManager {
    /// Creates a manager; no connection is attempted until [`get_pool`](Self::get_pool).
    pub fn new(config: DbConfig) -> Self {
        Self {
            config: Arc::new(config),
            pool: Arc::new(RwLock::new(None)),
        }
    }

    pub fn config(&self) -> &DbConfig {
        &self.config
    }

    /// Returns the shared pool, building it if none exists yet.
    ///
    /// Connections are opened lazily by the pool itself, so this never fails; connectivity
    /// problems show up on the first acquire.
    pub async fn get_pool(&self) -> MySqlPool {
        if let Some(pool) = self.pool.read().await.as_ref() {
            return pool.clone();
        }

        let mut slot = self.pool.write().await;
        if let Some(pool) = slot.as_ref() {
            return pool.clone();
        }

        let pool = MySqlPoolOptions::new()
            .max_connections(self.config.max_connections)
            .acquire_timeout(self.config.acquire_timeout)
            .test_before_acquire(true)
            .idle_timeout(None::<Duration>)
            .connect_lazy_with(self.config.connect_options());

        info!(
            host = %self.config.host,
            database = %self.config.database,
            max_connections = self.config.max_connections,
            "Conversation DB pool created"
        );

        *slot = Some(pool.clone());
        pool
    }

    /// Closes every pooled connection and forgets the pool; the next `get_pool` builds a new one.
    /// Acquisitions still in flight on the old pool fail with `PoolClosed`.
    pub async fn close_pool(&self) {
        let pool = self.pool.write().await.take();
        if let Some(pool) = pool {
            pool.close().await;
            info!("Conversation DB pool closed");
        }
    }

    pub async fn is_initialized(&self) -> bool {
        self.pool.read().await.is_some()
    }
}
