//! Persistence subsystem.
//!
//! # Data Flow
//! ```text
//! Controller action
//!     → RestaurantStore (trait object injected at startup)
//!         → memory.rs (DashMap, process-local)
//!         → sqlite.rs (sqlx pool)
//!     → Restaurant | StoreError
//! ```
//!
//! # Design Decisions
//! - One trait, injected as `Arc<dyn RestaurantStore>`; no global registry
//! - Ids are assigned by the store and never reused
//! - Lookups and mutations of absent ids return `StoreError::NotFound`

pub mod memory;
pub mod sqlite;

use std::sync::Arc;

use async_trait::async_trait;
use thiserror::Error;

use crate::config::{DatabaseConfig, StoreBackend};
use crate::restaurants::model::{Restaurant, RestaurantDraft};

pub use memory::MemoryStore;
pub use sqlite::SqliteStore;

#[derive(Debug, Error)]
pub enum StoreError {
    /// No restaurant with this id.
    #[error("Couldn't find Restaurant with 'id'={0}")]
    NotFound(i64),

    /// Underlying database failure.
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

pub type StoreResult<T> = Result<T, StoreError>;

/// Persistence operations the controller depends on.
#[async_trait]
pub trait RestaurantStore: Send + Sync + 'static {
    /// Persist a new restaurant and assign it an id.
    async fn create(&self, draft: RestaurantDraft) -> StoreResult<Restaurant>;

    async fn find(&self, id: i64) -> StoreResult<Restaurant>;

    /// Every restaurant, in ascending id order.
    async fn all(&self) -> StoreResult<Vec<Restaurant>>;

    /// Replace the attributes of an existing restaurant. The id is untouched.
    async fn update(&self, id: i64, draft: RestaurantDraft) -> StoreResult<Restaurant>;

    async fn delete(&self, id: i64) -> StoreResult<()>;
}

/// Build the store selected by configuration.
pub async fn connect(config: &DatabaseConfig) -> StoreResult<Arc<dyn RestaurantStore>> {
    match config.backend {
        StoreBackend::Memory => {
            tracing::info!("Using in-memory restaurant store");
            Ok(Arc::new(MemoryStore::new()))
        }
        StoreBackend::Sqlite => {
            let store = SqliteStore::connect(&config.url, config.max_connections).await?;
            Ok(Arc::new(store))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_display() {
        assert_eq!(
            StoreError::NotFound(42).to_string(),
            "Couldn't find Restaurant with 'id'=42"
        );
    }

    #[tokio::test]
    async fn test_connect_memory() {
        let config = DatabaseConfig {
            backend: StoreBackend::Memory,
            ..Default::default()
        };
        let store = connect(&config).await.unwrap();
        assert!(store.all().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_connect_sqlite_memory() {
        let config = DatabaseConfig {
            backend: StoreBackend::Sqlite,
            url: "sqlite::memory:".into(),
            max_connections: 4,
        };
        let store = connect(&config).await.unwrap();
        let created = store
            .create(RestaurantDraft::new("Tonys", "1 Main St", Some(4)))
            .await
            .unwrap();
        assert_eq!(store.find(created.id).await.unwrap(), created);
    }
}
