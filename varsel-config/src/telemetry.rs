//! Observability and monitoring configuration.

use serde::{Deserialize, Serialize};
use validator::{self, Validate};

/// Metrics collection parameters.
#[derive(Debug, Serialize, Deserialize, Validate, Clone)]
pub struct MetricsConfig {
    /// Whether to log gathered Prometheus metrics on shutdown.
    #[serde(default = "default_true")]
    pub enabled: bool,
}

fn default_true() -> bool {
    true
}

impl Default for MetricsConfig {
    fn default() -> Self {
        Self {
            enabled: default_true(),
        }
    }
}

/// Tracing parameters.
#[derive(Debug, Serialize, Deserialize, Validate, Clone)]
pub struct TracingConfig {
    /// Default log filter, overridable with `RUST_LOG`.
    #[serde(default = "default_filter")]
    pub filter: String,
}

fn default_filter() -> String {
    "info".into()
}

impl Default for TracingConfig {
    fn default() -> Self {
        Self {
            filter: default_filter(),
        }
    }
}

/// Telemetry configuration.
#[derive(Default, Debug, Serialize, Deserialize, Validate, Clone)]
pub struct TelemetryConfig {
    /// Metrics collection parameters.
    #[validate(nested)]
    pub metrics: MetricsConfig,

    /// Tracing parameters.
    #[validate(nested)]
    pub tracing: TracingConfig,
}
