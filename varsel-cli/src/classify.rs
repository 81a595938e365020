//! Minimal line classifier for the stdin event stream.
//!
//! Input format: `LEVEL MESSAGE...`, e.g. `error connection refused`.
//! debug/info/notice are healthy, warning/error/fatal are unhealthy, and
//! any other level token is an upstream contract breach that the caller
//! must surface loudly.

use varsel_core::error::EventError;
use varsel_core::events::{ClassifiedEvent, NokLevel};

pub fn classify_line(line: &str) -> Result<ClassifiedEvent, EventError> {
    let trimmed = line.trim();
    let (level, rest) = match trimmed.split_once(char::is_whitespace) {
        Some((level, rest)) => (level, rest.trim()),
        None => (trimmed, ""),
    };

    match level.to_ascii_lowercase().as_str() {
        "debug" | "info" | "notice" => Ok(ClassifiedEvent::ok(rest)),
        "warning" | "error" | "fatal" => {
            let level: NokLevel = level.parse()?;
            Ok(ClassifiedEvent::nok(level, rest))
        }
        other => Err(EventError::InvalidLevel(other.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use varsel_core::events::EventClass;

    #[test]
    fn healthy_levels_classify_ok() {
        for level in ["debug", "info", "notice", "INFO"] {
            let event = classify_line(&format!("{level} all good")).unwrap();
            assert_eq!(event.class, EventClass::Ok);
            assert_eq!(event.message, "all good");
        }
    }

    #[test]
    fn unhealthy_levels_carry_their_level() {
        let event = classify_line("error connection refused").unwrap();
        assert_eq!(event.class, EventClass::Nok(NokLevel::Error));
        assert_eq!(event.message, "connection refused");

        let event = classify_line("fatal out of memory").unwrap();
        assert_eq!(event.class, EventClass::Nok(NokLevel::Fatal));
    }

    #[test]
    fn unknown_level_is_rejected() {
        assert!(matches!(
            classify_line("blorp something happened"),
            Err(EventError::InvalidLevel(_))
        ));
    }

    #[test]
    fn bare_level_yields_empty_message() {
        let event = classify_line("warning").unwrap();
        assert_eq!(event.class, EventClass::Nok(NokLevel::Warning));
        assert_eq!(event.message, "");
    }
}
