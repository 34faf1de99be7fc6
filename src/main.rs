use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use tracing::info;

use trip_service::{
    create_router, logging, seed, AppState, Args, HttpMetrics, MemoryTripStore,
    RedisTripStore, ServiceConfig, TripStore,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    let config = ServiceConfig::from(&args);

    // ── 1. Logging ───────────────────────────────────────────────
    let _log_guard = logging::init(&config.log_dir, &config.log_level)
        .context("failed to initialise logging")?;

    // ── 2. Trip store ────────────────────────────────────────────
    let store: Arc<dyn TripStore> = if config.in_memory {
        info!("using in-memory trip store");
        Arc::new(MemoryTripStore::new())
    } else {
        info!(url = %config.redis_url, "connecting to redis");
        let store = RedisTripStore::connect(&config.redis_url)
            .await
            .with_context(|| format!("cannot connect to redis at {}", config.redis_url))?;
        Arc::new(store)
    };

    // ── 3. Seed sample data ──────────────────────────────────────
    if config.seed_trips > 0 {
        seed::seed(store.as_ref(), config.seed_trips)
            .await
            .context("failed to seed sample trips")?;
    }

    // ── 4. Build shared state ────────────────────────────────────
    let metrics = Arc::new(HttpMetrics::new().context("failed to register metrics")?);
    let state = Arc::new(AppState::new(store, metrics));

    // ── 5. Build Axum router ─────────────────────────────────────
    let app = create_router(state);

    // ── 6. Bind & serve ──────────────────────────────────────────
    let listener = tokio::net::TcpListener::bind(&config.listen_addr)
        .await
        .with_context(|| format!("failed to bind {}", config.listen_addr))?;
    info!(listen = %config.listen_addr, "server started");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server exited with error")?;

    info!("server stopped");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(err) = tokio::signal::ctrl_c().await {
            tracing::error!(%err, "failed to listen for Ctrl+C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(err) => {
                tracing::error!(%err, "failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
    info!("signal received, starting graceful shutdown");
}
