use std::fmt::Write as _;
use std::time::{Duration, Instant};

use prometheus::core::Collector;
use prometheus::proto::{Metric, MetricFamily};
use prometheus::{Encoder, HistogramOpts, HistogramVec, IntCounterVec, Opts, Registry, TextEncoder};

use super::MetricsError;

// ─── Metric definitions ──────────────────────────────────────────

/// Name, help text and label names of one registered instrument.
#[derive(Debug, Clone, Copy)]
pub struct MetricDefinition {
    pub name: &'static str,
    pub help: &'static str,
    pub kind: &'static str,
    pub label_names: &'static [&'static str],
}

const LABEL_NAMES: &[&str] = &["method", "route", "status"];

pub const REQUEST_DURATION: MetricDefinition = MetricDefinition {
    name: "http_request_duration_seconds",
    help: "Duration of HTTP requests in seconds",
    kind: "histogram",
    label_names: LABEL_NAMES,
};

pub const REQUEST_COUNT: MetricDefinition = MetricDefinition {
    name: "http_request_count",
    help: "Total number of HTTP requests",
    kind: "counter",
    label_names: LABEL_NAMES,
};

/// Route label used when a request matched no declared route.
pub const UNMATCHED_ROUTE: &str = "unmatched";

/// Method label used for anything outside the standard verbs.
pub const OTHER_METHOD: &str = "other";

const STANDARD_METHODS: &[&str] = &[
    "GET", "POST", "PUT", "DELETE", "PATCH", "HEAD", "OPTIONS", "CONNECT", "TRACE",
];

/// Map a request method onto a closed set of label values.
pub fn method_label(method: &str) -> &'static str {
    STANDARD_METHODS
        .iter()
        .copied()
        .find(|m| *m == method)
        .unwrap_or(OTHER_METHOD)
}

// ─── Public types ────────────────────────────────────────────────

/// Process-scoped HTTP metrics.
///
/// Owns its own `Registry` (process metrics + the two request instruments)
/// and is shared through `AppState`. The prometheus vectors synchronize
/// internally, so `begin`, `complete` and `render` may run concurrently.
pub struct HttpMetrics {
    registry: Registry,
    duration: HistogramVec,
    requests: IntCounterVec,
}

/// Handle returned by [`HttpMetrics::begin`]. Consumed by
/// [`HttpMetrics::complete`]; dropping it records nothing.
#[derive(Debug)]
pub struct RequestTimer {
    method: &'static str,
    route: String,
    start: Instant,
}

impl RequestTimer {
    pub fn elapsed(&self) -> Duration {
        self.start.elapsed()
    }
}

// ─── HttpMetrics impl ────────────────────────────────────────────

impl HttpMetrics {
    pub fn new() -> Result<Self, MetricsError> {
        let registry = Registry::new();

        #[cfg(target_os = "linux")]
        registry
            .register(Box::new(
                prometheus::process_collector::ProcessCollector::for_self(),
            ))
            .map_err(MetricsError::Registration)?;

        let duration = HistogramVec::new(
            HistogramOpts::new(REQUEST_DURATION.name, REQUEST_DURATION.help),
            REQUEST_DURATION.label_names,
        )
        .map_err(MetricsError::Registration)?;

        let requests = IntCounterVec::new(
            Opts::new(REQUEST_COUNT.name, REQUEST_COUNT.help),
            REQUEST_COUNT.label_names,
        )
        .map_err(MetricsError::Registration)?;

        registry
            .register(Box::new(duration.clone()))
            .map_err(MetricsError::Registration)?;
        registry
            .register(Box::new(requests.clone()))
            .map_err(MetricsError::Registration)?;

        Ok(Self {
            registry,
            duration,
            requests,
        })
    }

    /// Start timing a request. `route` must be the declared route pattern,
    /// never the raw request path. Extension methods collapse to `other`.
    pub fn begin(&self, method: &str, route: impl Into<String>) -> RequestTimer {
        RequestTimer {
            method: method_label(method),
            route: route.into(),
            start: Instant::now(),
        }
    }

    /// Record one finished request under (method, route, status).
    pub fn complete(&self, timer: RequestTimer, status: u16) {
        let elapsed = timer.elapsed().as_secs_f64();
        let status = status.to_string();
        let labels = [timer.method, timer.route.as_str(), status.as_str()];

        self.duration.with_label_values(&labels).observe(elapsed);
        self.requests.with_label_values(&labels).inc();
    }

    /// Content type of [`render`](Self::render)'s output.
    pub fn content_type(&self) -> &'static str {
        prometheus::TEXT_FORMAT
    }

    /// Serialize the whole registry in the text exposition format.
    ///
    /// The registry drops families that have no series yet; those are
    /// still declared here with their HELP and TYPE lines so scrapers see
    /// every instrument from the first scrape.
    pub fn render(&self) -> Result<String, MetricsError> {
        let families = self.registry.gather();
        let mut buffer = Vec::new();
        TextEncoder::new()
            .encode(&families, &mut buffer)
            .map_err(MetricsError::Encode)?;
        let mut out = String::from_utf8(buffer)?;

        for def in [REQUEST_DURATION, REQUEST_COUNT] {
            if families.iter().any(|mf| mf.get_name() == def.name) {
                continue;
            }
            writeln!(out, "# HELP {} {}", def.name, def.help)?;
            writeln!(out, "# TYPE {} {}", def.name, def.kind)?;
        }

        Ok(out)
    }

    // ── Read side (no series are created) ───────────────────────

    /// Current counter value for one label set; 0 if the series is absent.
    pub fn request_count(&self, method: &str, route: &str, status: u16) -> u64 {
        let status = status.to_string();
        find_series(&self.requests.collect(), [method, route, &status])
            .map(|m| m.get_counter().get_value() as u64)
            .unwrap_or(0)
    }

    /// Number of duration observations for one label set.
    pub fn observation_count(&self, method: &str, route: &str, status: u16) -> u64 {
        let status = status.to_string();
        find_series(&self.duration.collect(), [method, route, &status])
            .map(|m| m.get_histogram().get_sample_count())
            .unwrap_or(0)
    }

    /// Counter total across every label set.
    pub fn total_requests(&self) -> u64 {
        self.requests
            .collect()
            .iter()
            .flat_map(|mf| mf.get_metric())
            .map(|m| m.get_counter().get_value() as u64)
            .sum()
    }
}

fn find_series<'a>(families: &'a [MetricFamily], wanted: [&str; 3]) -> Option<&'a Metric> {
    families.iter().flat_map(|mf| mf.get_metric()).find(|m| {
        LABEL_NAMES.iter().zip(wanted).all(|(name, value)| {
            m.get_label()
                .iter()
                .any(|pair| pair.get_name() == *name && pair.get_value() == value)
        })
    })
}
