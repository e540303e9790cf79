//! Sliding time-to-live window for stored Top 100 progress.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Duration, Utc};

use crate::model::CompletionLedger;

/// Nine 30-day months in milliseconds. Not calendar-accurate.
pub const NINE_MONTHS_MS: i64 = 9 * 30 * 24 * 60 * 60 * 1000;

/// Absolute deadline in epoch milliseconds, persisted as a decimal string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ExpiryStamp(i64);

impl ExpiryStamp {
    #[must_use]
    pub fn from_millis(millis: i64) -> Self {
        Self(millis)
    }

    #[must_use]
    pub fn millis(&self) -> i64 {
        self.0
    }

    /// True once `now` has reached the deadline.
    #[must_use]
    pub fn is_reached(&self, now: DateTime<Utc>) -> bool {
        now.timestamp_millis() >= self.0
    }
}

impl fmt::Display for ExpiryStamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for ExpiryStamp {
    type Err = std::num::ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim().parse::<i64>().map(Self)
    }
}

/// TTL policy: every write pushes the deadline to `now + ttl`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExpiryWindow {
    ttl: Duration,
}

impl Default for ExpiryWindow {
    fn default() -> Self {
        Self::nine_months()
    }
}

impl ExpiryWindow {
    #[must_use]
    pub fn new(ttl: Duration) -> Self {
        Self { ttl }
    }

    #[must_use]
    pub fn nine_months() -> Self {
        Self::new(Duration::milliseconds(NINE_MONTHS_MS))
    }

    #[must_use]
    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    #[must_use]
    pub fn deadline_from(&self, now: DateTime<Utc>) -> ExpiryStamp {
        ExpiryStamp(now.timestamp_millis().saturating_add(self.ttl.num_milliseconds()))
    }

    /// Decide whether stored progress is still live at `now`.
    ///
    /// Returns the decoded ledger only when both values are present, both
    /// decode, and the deadline has not been reached. `None` means the caller
    /// must purge the stored ledger and start a fresh window.
    #[must_use]
    pub fn admit(
        &self,
        stored_ledger: Option<&str>,
        stored_expiry: Option<&str>,
        now: DateTime<Utc>,
    ) -> Option<CompletionLedger> {
        let expiry: ExpiryStamp = stored_expiry?.parse().ok()?;
        if expiry.is_reached(now) {
            return None;
        }
        CompletionLedger::from_json(stored_ledger?).ok()
    }
}
