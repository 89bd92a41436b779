//! Process-local restaurant store.

use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use dashmap::DashMap;

use crate::restaurants::model::{Restaurant, RestaurantDraft};
use crate::store::{RestaurantStore, StoreError, StoreResult};

/// A thread-safe in-memory store.
///
/// Ids come from a monotonic counter, so a deleted id is never handed out again.
#[derive(Clone)]
pub struct MemoryStore {
    rows: Arc<DashMap<i64, Restaurant>>,
    next_id: Arc<AtomicI64>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self {
            rows: Arc::new(DashMap::new()),
            next_id: Arc::new(AtomicI64::new(1)),
        }
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl RestaurantStore for MemoryStore {
    async fn create(&self, draft: RestaurantDraft) -> StoreResult<Restaurant> {
        let id = self.next_id.fetch_add(1, Ordering::SeqCst);
        let restaurant = Restaurant {
            id,
            name: draft.name,
            address: draft.address,
            rating: draft.rating,
        };
        self.rows.insert(id, restaurant.clone());
        Ok(restaurant)
    }

    async fn find(&self, id: i64) -> StoreResult<Restaurant> {
        self.rows
            .get(&id)
            .map(|row| row.value().clone())
            .ok_or(StoreError::NotFound(id))
    }

    async fn all(&self) -> StoreResult<Vec<Restaurant>> {
        let mut restaurants: Vec<Restaurant> =
            self.rows.iter().map(|row| row.value().clone()).collect();
        restaurants.sort_by_key(|r| r.id);
        Ok(restaurants)
    }

    async fn update(&self, id: i64, draft: RestaurantDraft) -> StoreResult<Restaurant> {
        let mut row = self.rows.get_mut(&id).ok_or(StoreError::NotFound(id))?;
        row.name = draft.name;
        row.address = draft.address;
        row.rating = draft.rating;
        Ok(row.value().clone())
    }

    async fn delete(&self, id: i64) -> StoreResult<()> {
        self.rows
            .remove(&id)
            .map(|_| ())
            .ok_or(StoreError::NotFound(id))
    }
}
