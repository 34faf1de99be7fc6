pub mod collector;
pub mod exposition;

pub use collector::{
    method_label, HttpMetrics, MetricDefinition, RequestTimer, OTHER_METHOD, UNMATCHED_ROUTE,
};

/// Failures raised while registering or rendering metrics.
#[derive(Debug, thiserror::Error)]
pub enum MetricsError {
    #[error("metric registration failed: {0}")]
    Registration(#[source] prometheus::Error),

    #[error("metric encoding failed: {0}")]
    Encode(#[source] prometheus::Error),

    #[error("metric output is not valid UTF-8: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),

    #[error("metric output formatting failed")]
    Format(#[from] std::fmt::Error),
}
