//! Injected sources of time and posting ids

use chrono::{DateTime, NaiveDate, Utc};
use std::fmt;

use crate::models::PostingId;

/// Clock abstracts access to the current timestamp so postings stay
/// deterministic in tests.
pub trait Clock: fmt::Debug {
    /// Returns the current UTC timestamp.
    fn now(&self) -> DateTime<Utc>;

    /// Returns the current UTC date. Defaults to `now().date_naive()`.
    fn today(&self) -> NaiveDate {
        self.now().date_naive()
    }
}

/// Wall-clock time
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Always reports the same instant
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub DateTime<Utc>);

impl FixedClock {
    /// Midnight UTC on the given date; `None` for an invalid date
    pub fn on(year: i32, month: u32, day: u32) -> Option<Self> {
        NaiveDate::from_ymd_opt(year, month, day)
            .and_then(|d| d.and_hms_opt(0, 0, 0))
            .map(|dt| Self(dt.and_utc()))
    }
}

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.0
    }
}

/// Produces a fresh, unique id for every live posting
pub trait PostingIdGenerator: fmt::Debug {
    fn next_id(&mut self, now: DateTime<Utc>) -> PostingId;
}

/// Ids of the form `T20241120153012345-0`: the timestamp to the millisecond
/// plus a counter that disambiguates postings made in the same millisecond.
#[derive(Debug, Clone, Default)]
pub struct TimestampIds {
    last_stamp: Option<String>,
    sequence: u32,
}

impl PostingIdGenerator for TimestampIds {
    fn next_id(&mut self, now: DateTime<Utc>) -> PostingId {
        let stamp = now.format("%Y%m%d%H%M%S%3f").to_string();
        if self.last_stamp.as_deref() == Some(stamp.as_str()) {
            self.sequence += 1;
        } else {
            self.last_stamp = Some(stamp.clone());
            self.sequence = 0;
        }
        PostingId::new(format!("T{}-{}", stamp, self.sequence))
    }
}

/// Ids of the form `P0001`, `P0002`, ...
#[derive(Debug, Clone)]
pub struct SequentialIds {
    prefix: String,
    next: u64,
}

impl SequentialIds {
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            next: 1,
        }
    }
}

impl Default for SequentialIds {
    fn default() -> Self {
        Self::new("P")
    }
}

impl PostingIdGenerator for SequentialIds {
    fn next_id(&mut self, _now: DateTime<Utc>) -> PostingId {
        let id = PostingId::new(format!("{}{:04}", self.prefix, self.next));
        self.next += 1;
        id
    }
}
