//! Custom validation functions for configuration.
//!
//! Provides shared validation logic used across multiple configuration modules.

use validator::ValidationError;

/// Validate a report severity token.
///
/// Must stay in sync with the `Severity` parsing in varsel-core.
pub fn validate_severity(level: &str) -> Result<(), ValidationError> {
    let valid = ["ok", "unknown", "warning", "critical"].contains(&level.to_lowercase().as_str());
    if valid {
        Ok(())
    } else {
        Err(ValidationError::new("invalid_severity"))
    }
}

/// Validate a passive-check target identity (service or host name).
pub fn validate_identity(name: &str) -> Result<(), ValidationError> {
    let valid = !name.is_empty()
        && name.len() <= 128
        && name
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '-' | '.' | ' '));
    if valid {
        Ok(())
    } else {
        Err(ValidationError::new("invalid_identity"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn severity_tokens() {
        assert!(validate_severity("ok").is_ok());
        assert!(validate_severity("UNKNOWN").is_ok());
        assert!(validate_severity("fatal").is_err());
    }

    #[test]
    fn identity_charset() {
        assert!(validate_identity("web-01.example").is_ok());
        assert!(validate_identity("").is_err());
        assert!(validate_identity("bad\nname").is_err());
    }
}
