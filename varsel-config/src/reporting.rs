//! Status reporting configuration.
//!
//! Defines the reporting cadence, severity escalation and auto-recovery
//! parameters. All values are fixed at startup for the life of the engine.

use serde::{Deserialize, Serialize};
use validator::{self, Validate};

use crate::validation;

/// Status reporting parameters.
#[derive(Debug, Serialize, Deserialize, Validate, Clone)]
pub struct ReportingConfig {
    /// Heartbeat interval between periodic status reports (seconds).
    #[validate(range(min = 1, max = 86400))]
    #[serde(default = "default_message_interval")]
    pub message_interval_secs: u64,

    /// Seconds without a new unhealthy event before the engine forces a
    /// return to healthy state.
    #[validate(range(min = 1, max = 604800))]
    #[serde(default = "default_auto_recovery")]
    pub auto_recovery_secs: u64,

    /// Whether error-level events escalate to critical instead of warning.
    #[serde(default = "default_true")]
    pub error_is_critical: bool,

    /// Severity reported when an interval passes without any event.
    #[validate(custom(function = validation::validate_severity))]
    #[serde(default = "default_no_event_severity")]
    pub no_event_severity: String,

    /// Optional override for the heartbeat message text. Alert reports
    /// always carry the triggering event's own message.
    #[serde(default)]
    pub status_message: Option<String>,

    /// Upper bound on a single report delivery attempt (seconds).
    #[validate(range(min = 1, max = 300))]
    #[serde(default = "default_sink_timeout")]
    pub sink_timeout_secs: u64,
}

fn default_message_interval() -> u64 {
    60
}
fn default_auto_recovery() -> u64 {
    3600
}
fn default_true() -> bool {
    true
}
fn default_no_event_severity() -> String {
    "ok".into()
}
fn default_sink_timeout() -> u64 {
    10
}

impl Default for ReportingConfig {
    fn default() -> Self {
        Self {
            message_interval_secs: default_message_interval(),
            auto_recovery_secs: default_auto_recovery(),
            error_is_critical: default_true(),
            no_event_severity: default_no_event_severity(),
            status_message: None,
            sink_timeout_secs: default_sink_timeout(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn valid_default_reporting_config() {
        let config = ReportingConfig::default();
        config.validate().expect("Default config should be valid");
    }

    #[test]
    fn zero_interval_is_rejected() {
        let mut config = ReportingConfig::default();
        config.message_interval_secs = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn zero_recovery_is_rejected() {
        let mut config = ReportingConfig::default();
        config.auto_recovery_secs = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn bad_severity_token_is_rejected() {
        let mut config = ReportingConfig::default();
        config.no_event_severity = "panic".into();
        assert!(config.validate().is_err());
    }
}
