//! The outbound boundary: delivering status reports.
//!
//! The engine never assumes delivery is synchronous or reliable; a failed
//! send is logged and dropped, and the next heartbeat covers the gap.

use async_trait::async_trait;
use opentelemetry::KeyValue;
use thiserror::Error;
use tracing::{error, info, warn};

use varsel_core::status::{Severity, StatusReport};
use varsel_telemetry::EventLogger;

/// Report sink error conditions.
#[derive(Debug, Error)]
pub enum SinkError {
    #[error("Delivery failed: {0}")]
    Delivery(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Boundary contract for delivering status reports to the monitoring
/// endpoint. Implementations own their retry/backoff policy; the engine
/// does not retry.
#[async_trait]
pub trait ReportSink: Send + Sync {
    /// Delivers a single report.
    async fn send(&self, report: &StatusReport) -> Result<(), SinkError>;
}

/// Sink that emits reports into the structured log stream.
pub struct TracingSink;

#[async_trait]
impl ReportSink for TracingSink {
    async fn send(&self, report: &StatusReport) -> Result<(), SinkError> {
        match report.severity {
            Severity::Ok => info!("STATUS (OK) {}: {}", report.target, report.message),
            Severity::Unknown => warn!("STATUS (UNKNOWN) {}: {}", report.target, report.message),
            Severity::Warning => warn!("STATUS (WARNING) {}: {}", report.target, report.message),
            Severity::Critical => error!("STATUS (CRITICAL) {}: {}", report.target, report.message),
        }

        EventLogger::log_event(
            "status_report",
            vec![
                KeyValue::new("severity", report.severity.to_string()),
                KeyValue::new("target", report.target.clone()),
            ],
        )
        .await;

        Ok(())
    }
}
