//! Trip records API with request logging and Prometheus metrics.

use std::sync::Arc;

pub mod config;
pub mod error;
pub mod handlers;
pub mod logging;
pub mod metrics;
pub mod middleware;
pub mod seed;
pub mod server;
pub mod store;
pub mod trip;

pub use config::{Args, ServiceConfig};
pub use error::AppError;
pub use metrics::HttpMetrics;
pub use server::create_router;
pub use store::{MemoryTripStore, RedisTripStore, StoreError, TripStore};

/// Shared application state available to every handler via `State<Arc<AppState>>`.
pub struct AppState {
    /// Trip persistence (Redis or in-memory).
    pub store: Arc<dyn TripStore>,

    /// Request metrics: the middleware records, `/metrics` renders.
    pub metrics: Arc<HttpMetrics>,
}

impl AppState {
    pub fn new(store: Arc<dyn TripStore>, metrics: Arc<HttpMetrics>) -> Self {
        Self { store, metrics }
    }
}
