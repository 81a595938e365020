//! Severity ordering and the status reduction function.
//!
//! `reduce` is the single decision point of the whole system: given the
//! already-purged alert history and the recent-OK flag, it produces the one
//! (severity, message) pair to report this cycle. It is deterministic and
//! side-effect-free; purging, flag resets and dispatch belong to the caller.

use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::EventError;
use crate::history::AlertHistory;

/// Report severity, ordered for worst-of comparison.
///
/// The variant order is the comparison rank: `Ok < Unknown < Warning <
/// Critical`. Monitoring endpoints receive the uppercase `Display` form.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default,
)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    #[default]
    Ok,
    Unknown,
    Warning,
    Critical,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Ok => write!(f, "OK"),
            Severity::Unknown => write!(f, "UNKNOWN"),
            Severity::Warning => write!(f, "WARNING"),
            Severity::Critical => write!(f, "CRITICAL"),
        }
    }
}

impl FromStr for Severity {
    type Err = EventError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "ok" => Ok(Severity::Ok),
            "unknown" => Ok(Severity::Unknown),
            "warning" => Ok(Severity::Warning),
            "critical" => Ok(Severity::Critical),
            other => Err(EventError::InvalidSeverity(other.to_string())),
        }
    }
}

/// Reducer output: what to report, without the target identity.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Status {
    pub severity: Severity,
    pub message: String,
}

/// Outbound report unit handed to the report sink.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StatusReport {
    pub severity: Severity,
    pub target: String,
    pub message: String,
}

/// Computes the status to report for the current cycle.
///
/// Priority order:
/// 1. Non-empty history: the worst active record wins (highest severity,
///    ties broken by latest expiration, i.e. most recently created).
/// 2. No OK-class event seen this interval: the configured no-event
///    severity with a no-activity message.
/// 3. Otherwise: OK with an activity message.
///
/// `override_message` replaces the built-in text of branches 2 and 3 only;
/// an active alert always reports its own message.
pub fn reduce(
    history: &AlertHistory,
    recent_ok_seen: bool,
    no_event_severity: Severity,
    interval: Duration,
    override_message: Option<&str>,
) -> Status {
    if let Some(worst) = history.worst() {
        return Status {
            severity: worst.severity,
            message: worst.message.clone(),
        };
    }

    let message = match override_message {
        Some(text) => text.to_string(),
        None if recent_ok_seen => {
            format!("log entries received in the last {} seconds", interval.as_secs())
        }
        None => {
            format!("no log entry received in the last {} seconds", interval.as_secs())
        }
    };

    if recent_ok_seen {
        Status { severity: Severity::Ok, message }
    } else {
        Status { severity: no_event_severity, message }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::history::AlertRecord;
    use tokio::time::Instant;

    const INTERVAL: Duration = Duration::from_secs(5);

    fn record(severity: Severity, offset_secs: u64, message: &str) -> AlertRecord {
        AlertRecord::new(
            Instant::now() + Duration::from_secs(offset_secs),
            severity,
            message.to_string(),
        )
    }

    #[test]
    fn severity_ordering_is_worst_of_rank() {
        assert!(Severity::Ok < Severity::Unknown);
        assert!(Severity::Unknown < Severity::Warning);
        assert!(Severity::Warning < Severity::Critical);
    }

    #[test]
    fn severity_round_trips_config_tokens() {
        for token in ["ok", "unknown", "warning", "critical"] {
            let severity: Severity = token.parse().unwrap();
            assert_eq!(severity.to_string(), token.to_uppercase());
        }
        assert!(matches!(
            "fatal".parse::<Severity>(),
            Err(EventError::InvalidSeverity(_))
        ));
    }

    #[test]
    fn active_alert_beats_everything() {
        let mut history = AlertHistory::new();
        history.record_push(record(Severity::Warning, 30, "disk 80%"));

        let status = reduce(&history, true, Severity::Unknown, INTERVAL, Some("override"));
        assert_eq!(status.severity, Severity::Warning);
        assert_eq!(status.message, "disk 80%");
    }

    #[test]
    fn worst_record_wins_over_newer_milder_one() {
        let mut history = AlertHistory::new();
        history.record_push(record(Severity::Critical, 10, "db down"));
        history.record_push(record(Severity::Warning, 20, "disk 80%"));

        let status = reduce(&history, false, Severity::Unknown, INTERVAL, None);
        assert_eq!(status.severity, Severity::Critical);
        assert_eq!(status.message, "db down");
    }

    #[test]
    fn severity_tie_breaks_to_most_recent() {
        let mut history = AlertHistory::new();
        history.record_push(record(Severity::Warning, 10, "older"));
        history.record_push(record(Severity::Warning, 20, "newer"));

        let status = reduce(&history, false, Severity::Unknown, INTERVAL, None);
        assert_eq!(status.message, "newer");
    }

    #[test]
    fn empty_history_without_ok_reports_no_event_severity() {
        let history = AlertHistory::new();
        let status = reduce(&history, false, Severity::Unknown, INTERVAL, None);
        assert_eq!(status.severity, Severity::Unknown);
        assert_eq!(status.message, "no log entry received in the last 5 seconds");
    }

    #[test]
    fn recent_ok_suppresses_no_event_report() {
        let history = AlertHistory::new();
        let status = reduce(&history, true, Severity::Unknown, INTERVAL, None);
        assert_eq!(status.severity, Severity::Ok);
        assert_eq!(status.message, "log entries received in the last 5 seconds");
    }

    #[test]
    fn override_replaces_heartbeat_text_only() {
        let history = AlertHistory::new();

        let quiet = reduce(&history, false, Severity::Warning, INTERVAL, Some("custom"));
        assert_eq!(quiet.severity, Severity::Warning);
        assert_eq!(quiet.message, "custom");

        let active = reduce(&history, true, Severity::Warning, INTERVAL, Some("custom"));
        assert_eq!(active.severity, Severity::Ok);
        assert_eq!(active.message, "custom");
    }
}
