pub mod memory;
pub mod redis_store;

pub use self::memory::MemoryTripStore;
pub use self::redis_store::RedisTripStore;

use async_trait::async_trait;

use crate::trip::{NewTrip, Trip};

/// Errors surfaced by a trip backend.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("redis: {0}")]
    Redis(#[from] redis::RedisError),

    #[error("corrupt trip data: {0}")]
    Corrupt(#[from] serde_json::Error),
}

/// Persistence seam for trip records.
#[async_trait]
pub trait TripStore: Send + Sync {
    /// Store a new trip and return it with its assigned id.
    async fn insert(&self, trip: NewTrip) -> Result<Trip, StoreError>;

    /// All trips, oldest first.
    async fn list(&self) -> Result<Vec<Trip>, StoreError>;

    async fn get(&self, id: &str) -> Result<Option<Trip>, StoreError>;
}
