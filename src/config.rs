//! Service configuration.

use std::path::PathBuf;

use clap::Parser;

/// Trip service command line arguments. Every flag falls back to an
/// environment variable.
#[derive(Debug, Parser)]
#[command(name = "trip-service")]
#[command(about = "Trip records API with request logging and Prometheus metrics")]
pub struct Args {
    /// Port to listen on.
    #[arg(short, long, env = "PORT", default_value_t = 3001)]
    pub port: u16,

    /// Interface to bind.
    #[arg(long, env = "HOST", default_value = "0.0.0.0")]
    pub host: String,

    /// Redis connection URL for the trip store.
    #[arg(long, env = "REDIS_URL", default_value = "redis://127.0.0.1:6379/")]
    pub redis_url: String,

    /// Keep trips in process memory instead of Redis.
    #[arg(long, env = "TRIP_STORE_IN_MEMORY")]
    pub in_memory: bool,

    /// Number of sample trips to insert at startup.
    #[arg(long, env = "SEED_TRIPS", default_value_t = 0)]
    pub seed_trips: usize,

    /// Directory receiving `combined.log`.
    #[arg(long, env = "LOG_DIR", default_value = "logs")]
    pub log_dir: PathBuf,

    /// Log filter used when `RUST_LOG` is unset.
    #[arg(long, env = "LOG_LEVEL", default_value = "info")]
    pub log_level: String,
}

/// Resolved service configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceConfig {
    /// `host:port` to bind.
    pub listen_addr: String,
    pub redis_url: String,
    pub in_memory: bool,
    pub seed_trips: usize,
    pub log_dir: PathBuf,
    pub log_level: String,
}

impl From<&Args> for ServiceConfig {
    fn from(args: &Args) -> Self {
        Self {
            listen_addr: format!("{}:{}", args.host, args.port),
            redis_url: args.redis_url.clone(),
            in_memory: args.in_memory,
            seed_trips: args.seed_trips,
            log_dir: args.log_dir.clone(),
            log_level: args.log_level.clone(),
        }
    }
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            listen_addr: "0.0.0.0:3001".to_string(),
            redis_url: "redis://127.0.0.1:6379/".to_string(),
            in_memory: false,
            seed_trips: 0,
            log_dir: PathBuf::from("logs"),
            log_level: "info".to_string(),
        }
    }
}
