//! Classified inbound events and the severity escalation table.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::error::EventError;
use crate::status::Severity;

/// Unhealthy-event level as produced by the upstream classifier.
///
/// This is the complete NOK input domain; anything else must be rejected
/// at the parsing boundary with [`EventError::InvalidLevel`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NokLevel {
    Warning,
    Error,
    Fatal,
}

impl NokLevel {
    /// Fixed escalation table from classifier level to report severity.
    ///
    /// Total over the NOK domain: Warning stays a warning, Fatal is always
    /// critical, Error escalates to critical only when the operator asked
    /// for it.
    pub fn severity(self, error_is_critical: bool) -> Severity {
        match self {
            NokLevel::Warning => Severity::Warning,
            NokLevel::Error if error_is_critical => Severity::Critical,
            NokLevel::Error => Severity::Warning,
            NokLevel::Fatal => Severity::Critical,
        }
    }
}

impl FromStr for NokLevel {
    type Err = EventError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "warning" => Ok(NokLevel::Warning),
            "error" => Ok(NokLevel::Error),
            "fatal" => Ok(NokLevel::Fatal),
            other => Err(EventError::InvalidLevel(other.to_string())),
        }
    }
}

/// Health class of one inbound event.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum EventClass {
    Ok,
    Nok(NokLevel),
}

/// One classified log/health event, produced once per inbound entry and
/// consumed exactly once by the engine.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ClassifiedEvent {
    /// Wall-clock time the entry was observed.
    pub timestamp: DateTime<Utc>,

    /// OK / NOK classification, with the NOK level attached.
    pub class: EventClass,

    /// Rendered message, carried verbatim into alert reports.
    pub message: String,
}

impl ClassifiedEvent {
    /// Creates a healthy event observed now.
    pub fn ok(message: impl Into<String>) -> Self {
        Self {
            timestamp: Utc::now(),
            class: EventClass::Ok,
            message: message.into(),
        }
    }

    /// Creates an unhealthy event observed now.
    pub fn nok(level: NokLevel, message: impl Into<String>) -> Self {
        Self {
            timestamp: Utc::now(),
            class: EventClass::Nok(level),
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn escalation_table_is_total() {
        assert_eq!(NokLevel::Warning.severity(false), Severity::Warning);
        assert_eq!(NokLevel::Warning.severity(true), Severity::Warning);
        assert_eq!(NokLevel::Error.severity(false), Severity::Warning);
        assert_eq!(NokLevel::Error.severity(true), Severity::Critical);
        assert_eq!(NokLevel::Fatal.severity(false), Severity::Critical);
        assert_eq!(NokLevel::Fatal.severity(true), Severity::Critical);
    }

    #[test]
    fn level_parsing_rejects_unknown_tokens() {
        assert_eq!("warning".parse::<NokLevel>().unwrap(), NokLevel::Warning);
        assert_eq!("ERROR".parse::<NokLevel>().unwrap(), NokLevel::Error);
        assert_eq!("Fatal".parse::<NokLevel>().unwrap(), NokLevel::Fatal);
        assert!(matches!(
            "verbose".parse::<NokLevel>(),
            Err(EventError::InvalidLevel(_))
        ));
    }

    #[test]
    fn constructors_tag_the_class() {
        let ok = ClassifiedEvent::ok("ping");
        assert_eq!(ok.class, EventClass::Ok);

        let nok = ClassifiedEvent::nok(NokLevel::Error, "boom");
        assert_eq!(nok.class, EventClass::Nok(NokLevel::Error));
        assert_eq!(nok.message, "boom");
    }
}
