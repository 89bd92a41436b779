//! SQLite-backed restaurant store.
//!
//! # Database URLs
//! - File: `sqlite:restaurants.db` (created if missing)
//! - In-memory: `sqlite::memory:` (pinned to a single pooled connection,
//!   since every SQLite memory connection is a separate database)

use std::str::FromStr;

use async_trait::async_trait;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};

use crate::restaurants::model::{Restaurant, RestaurantDraft};
use crate::store::{RestaurantStore, StoreError, StoreResult};

// AUTOINCREMENT keeps SQLite from reissuing the id of a deleted max row
const CREATE_TABLE: &str = r#"
    CREATE TABLE IF NOT EXISTS restaurants (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        name TEXT NOT NULL DEFAULT '',
        address TEXT NOT NULL DEFAULT '',
        rating INTEGER
    )
"#;

const COLUMNS: &str = "id, name, address, rating";

#[derive(Debug, Clone)]
pub struct SqliteStore {
    pool: SqlitePool,
}

impl SqliteStore {
    /// Open a pool and make sure the `restaurants` table exists.
    pub async fn connect(url: &str, max_connections: u32) -> StoreResult<Self> {
        let options = SqliteConnectOptions::from_str(url)?.create_if_missing(true);

        let memory = is_memory_url(url);
        let max_connections = if memory { 1 } else { max_connections };
        let mut pool_options = SqlitePoolOptions::new().max_connections(max_connections);
        if memory {
            // Closing the only connection would drop the database with it
            pool_options = pool_options.idle_timeout(None).max_lifetime(None);
        }
        let pool = pool_options.connect_with(options).await?;

        let store = Self::from_pool(pool).await?;
        tracing::info!(url = %url, max_connections, "Connected to SQLite restaurant store");
        Ok(store)
    }

    /// Wrap an existing pool, creating the table if needed.
    pub async fn from_pool(pool: SqlitePool) -> StoreResult<Self> {
        sqlx::query(CREATE_TABLE).execute(&pool).await?;
        Ok(Self { pool })
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }
}

fn is_memory_url(url: &str) -> bool {
    url.contains(":memory:") || url.contains("mode=memory")
}

#[async_trait]
impl RestaurantStore for SqliteStore {
    async fn create(&self, draft: RestaurantDraft) -> StoreResult<Restaurant> {
        let sql = format!(
            "INSERT INTO restaurants (name, address, rating) VALUES (?, ?, ?) RETURNING {}",
            COLUMNS
        );
        let restaurant = sqlx::query_as::<_, Restaurant>(&sql)
            .bind(&draft.name)
            .bind(&draft.address)
            .bind(draft.rating)
            .fetch_one(&self.pool)
            .await?;

        tracing::debug!(restaurant_id = restaurant.id, "Inserted restaurant");
        Ok(restaurant)
    }

    async fn find(&self, id: i64) -> StoreResult<Restaurant> {
        let sql = format!("SELECT {} FROM restaurants WHERE id = ? LIMIT 1", COLUMNS);
        sqlx::query_as::<_, Restaurant>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or(StoreError::NotFound(id))
    }

    async fn all(&self) -> StoreResult<Vec<Restaurant>> {
        let sql = format!("SELECT {} FROM restaurants ORDER BY id", COLUMNS);
        let restaurants = sqlx::query_as::<_, Restaurant>(&sql)
            .fetch_all(&self.pool)
            .await?;
        Ok(restaurants)
    }

    async fn update(&self, id: i64, draft: RestaurantDraft) -> StoreResult<Restaurant> {
        let sql = format!(
            "UPDATE restaurants SET name = ?, address = ?, rating = ? WHERE id = ? RETURNING {}",
            COLUMNS
        );
        sqlx::query_as::<_, Restaurant>(&sql)
            .bind(&draft.name)
            .bind(&draft.address)
            .bind(draft.rating)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or(StoreError::NotFound(id))
    }

    async fn delete(&self, id: i64) -> StoreResult<()> {
        let result = sqlx::query("DELETE FROM restaurants WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(StoreError::NotFound(id));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn memory_store() -> SqliteStore {
        SqliteStore::connect("sqlite::memory:", 5).await.unwrap()
    }

    #[test]
    fn test_memory_url_detection() {
        assert!(is_memory_url("sqlite::memory:"));
        assert!(is_memory_url("sqlite:file:test?mode=memory&cache=shared"));
        assert!(!is_memory_url("sqlite:restaurants.db"));
    }

    #[tokio::test]
    async fn test_create_find_update_delete() {
        let store = memory_store().await;

        let created = store
            .create(RestaurantDraft::new("Tonys", "1 Main St", Some(4)))
            .await
            .unwrap();
        assert_eq!(store.find(created.id).await.unwrap(), created);

        let updated = store
            .update(created.id, RestaurantDraft::new("Tonys", "1 Main St", Some(5)))
            .await
            .unwrap();
        assert_eq!(updated.id, created.id);
        assert_eq!(updated.rating, Some(5));

        store.delete(created.id).await.unwrap();
        assert!(matches!(store.find(created.id).await, Err(StoreError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_null_rating_round_trips() {
        let store = memory_store().await;
        let created = store
            .create(RestaurantDraft::new("No stars", "", None))
            .await
            .unwrap();
        assert_eq!(store.find(created.id).await.unwrap().rating, None);
    }

    #[tokio::test]
    async fn test_missing_ids() {
        let store = memory_store().await;
        assert!(matches!(store.find(9).await, Err(StoreError::NotFound(9))));
        assert!(matches!(
            store.update(9, RestaurantDraft::default()).await,
            Err(StoreError::NotFound(9))
        ));
        assert!(matches!(store.delete(9).await, Err(StoreError::NotFound(9))));
        assert!(store.all().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_deleted_ids_not_reused() {
        let store = memory_store().await;
        let first = store.create(RestaurantDraft::default()).await.unwrap();
        store.delete(first.id).await.unwrap();
        let second = store.create(RestaurantDraft::default()).await.unwrap();
        assert!(second.id > first.id);
    }

    #[tokio::test]
    async fn test_schema_is_idempotent() {
        let store = memory_store().await;
        store.create(RestaurantDraft::new("kept", "", None)).await.unwrap();

        let reopened = SqliteStore::from_pool(store.pool().clone()).await.unwrap();
        assert_eq!(reopened.all().await.unwrap().len(), 1);
    }
}
