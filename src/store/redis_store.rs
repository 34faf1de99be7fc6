use async_trait::async_trait;
use redis::aio::ConnectionManager;
use redis::AsyncCommands;

use super::{StoreError, TripStore};
use crate::trip::{NewTrip, Trip};

/// List holding every trip id in insertion order.
const INDEX_KEY: &str = "trips";

fn trip_key(id: &str) -> String {
    format!("trip:{id}")
}

/// Redis-backed trip store.
///
/// Each trip is a JSON blob under `trip:{id}`; `trips` lists the ids.
/// `ConnectionManager` is cheaply cloneable and every clone shares one
/// multiplexed connection that reconnects on failure.
#[derive(Clone)]
pub struct RedisTripStore {
    conn: ConnectionManager,
}

impl RedisTripStore {
    pub async fn connect(url: &str) -> Result<Self, StoreError> {
        let client = redis::Client::open(url)?;
        let conn = ConnectionManager::new(client).await?;
        Ok(Self { conn })
    }
}

#[async_trait]
impl TripStore for RedisTripStore {
    async fn insert(&self, new: NewTrip) -> Result<Trip, StoreError> {
        let trip = Trip::from_new(new);
        let json = serde_json::to_string(&trip)?;

        let mut conn = self.conn.clone();
        let _: () = redis::pipe()
            .atomic()
            .set(trip_key(&trip.id), json)
            .ignore()
            .rpush(INDEX_KEY, &trip.id)
            .ignore()
            .query_async(&mut conn)
            .await?;

        Ok(trip)
    }

    async fn list(&self) -> Result<Vec<Trip>, StoreError> {
        let mut conn = self.conn.clone();
        let ids: Vec<String> = conn.lrange(INDEX_KEY, 0, -1).await?;
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        let keys: Vec<String> = ids.iter().map(|id| trip_key(id)).collect();
        let blobs: Vec<Option<String>> = redis::cmd("MGET")
            .arg(&keys)
            .query_async(&mut conn)
            .await?;

        // Ids whose blob has gone missing are skipped.
        blobs
            .into_iter()
            .flatten()
            .map(|json| serde_json::from_str(&json).map_err(StoreError::from))
            .collect()
    }

    async fn get(&self, id: &str) -> Result<Option<Trip>, StoreError> {
        let mut conn = self.conn.clone();
        let maybe_json: Option<String> = conn.get(trip_key(id)).await?;

        match maybe_json {
            Some(json) => Ok(Some(serde_json::from_str(&json)?)),
            None => Ok(None),
        }
    }
}
