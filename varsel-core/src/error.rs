//! Error types for event classification and severity parsing.

use thiserror::Error;

/// Contract violations at the classifier boundary.
///
/// Both variants indicate that upstream handed us a token outside the
/// fixed input domain; callers are expected to surface them loudly
/// rather than drop the event silently.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum EventError {
    #[error("Unrecognized log level: {0:?}")]
    InvalidLevel(String),

    #[error("Unrecognized severity: {0:?}")]
    InvalidSeverity(String),
}
