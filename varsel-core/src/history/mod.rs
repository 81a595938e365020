//! Self-expiring collection of active alert records.
//!
//! Every NOK event becomes one immutable [`AlertRecord`] whose expiration
//! deadline is fixed at creation time. The history is insertion-ordered and
//! purged before every read, so a reader never observes an expired record.
//!
//! Expiration convention: a record is expired once `now >= expires_at`.
//! A heartbeat firing exactly at the deadline treats the alert as gone.

use tokio::time::Instant;

use crate::status::Severity;

/// One NOK occurrence with its fixed expiration deadline.
#[derive(Clone, Debug)]
pub struct AlertRecord {
    /// Absolute deadline after which the record no longer participates in
    /// reduction. Always `creation + auto_recovery_timeout`.
    pub expires_at: Instant,

    pub severity: Severity,

    pub message: String,
}

impl AlertRecord {
    pub fn new(expires_at: Instant, severity: Severity, message: String) -> Self {
        Self {
            expires_at,
            severity,
            message,
        }
    }
}

/// Insertion-ordered, self-expiring alert collection.
///
/// Invariant: callers purge before reading, so every member satisfies
/// `expires_at > now` at the instant of any read. Empty means healthy.
#[derive(Debug, Default)]
pub struct AlertHistory {
    records: Vec<AlertRecord>,
}

impl AlertHistory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a record. Records are never mutated after insertion.
    pub fn record_push(&mut self, record: AlertRecord) {
        self.records.push(record);
    }

    /// Drops every record whose deadline has been reached (`now >= expires_at`).
    pub fn purge_expired(&mut self, now: Instant) {
        self.records.retain(|record| record.expires_at > now);
    }

    /// The worst active record: highest severity, ties broken by latest
    /// expiration (the most recently created, since the expiry offset is
    /// fixed).
    pub fn worst(&self) -> Option<&AlertRecord> {
        self.records
            .iter()
            .max_by_key(|record| (record.severity, record.expires_at))
    }

    pub fn clear(&mut self) {
        self.records.clear();
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
