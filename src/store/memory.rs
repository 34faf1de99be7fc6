use async_trait::async_trait;
use parking_lot::RwLock;

use super::{StoreError, TripStore};
use crate::trip::{NewTrip, Trip};

/// Process-local trip store. Used with `--in-memory` and in tests.
#[derive(Default)]
pub struct MemoryTripStore {
    trips: RwLock<Vec<Trip>>,
}

impl MemoryTripStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.trips.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.trips.read().is_empty()
    }
}

#[async_trait]
impl TripStore for MemoryTripStore {
    async fn insert(&self, new: NewTrip) -> Result<Trip, StoreError> {
        let trip = Trip::from_new(new);
        self.trips.write().push(trip.clone());
        Ok(trip)
    }

    async fn list(&self) -> Result<Vec<Trip>, StoreError> {
        Ok(self.trips.read().clone())
    }

    async fn get(&self, id: &str) -> Result<Option<Trip>, StoreError> {
        Ok(self.trips.read().iter().find(|t| t.id == id).cloned())
    }
}
