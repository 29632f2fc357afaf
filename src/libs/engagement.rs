//! Engagement aggregation engine.
//!
//! Filters a collection of [`EngagementRecord`]s by user type and an inclusive
//! date range, then derives an [`EngagementSummary`] from whatever survived.
//! Everything here is a pure function of its input: nothing is cached, nothing
//! is mutated and no I/O happens, so calls may run concurrently on shared or
//! disjoint inputs.
//!
//! ## Summary formulas
//!
//! - **active users**: number of matching *records* (a user with three
//!   records counts three times)
//! - **engagement score**: `min(100, total actions)`
//! - **average session time**: half a minute per action, rendered as
//!   `"{minutes}m {seconds}s"`
//!
//! ## Usage
//!
//! ```rust
//! use engage::libs::engagement::{query_engagement, EngagementFilter};
//! use engage::libs::source::FixtureSource;
//!
//! let records = FixtureSource::sample().into_records();
//! let report = query_engagement(&records, &EngagementFilter::default().with_user_type("admin"));
//! assert_eq!(report.summary.engagement_score, 27);
//! assert_eq!(report.summary.avg_session_time.to_string(), "13m 30s");
//! ```

use crate::libs::record::EngagementRecord;
use chrono::NaiveDate;
use serde::{Serialize, Serializer};
use std::fmt::{Display, Formatter};

/// Upper bound of the engagement score.
pub const MAX_ENGAGEMENT_SCORE: u64 = 100;

/// Session time credited per action (half a minute).
pub const SECONDS_PER_ACTION: u64 = 30;

/// Optional criteria a record must satisfy to be retained.
///
/// Every bound that is `None` is ignored. Date bounds are inclusive.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EngagementFilter {
    pub user_type: Option<String>,
    pub from_date: Option<NaiveDate>,
    pub to_date: Option<NaiveDate>,
}

impl EngagementFilter {
    /// Builds a filter from boundary input, treating a blank user type as absent.
    pub fn new(user_type: Option<String>, from_date: Option<NaiveDate>, to_date: Option<NaiveDate>) -> Self {
        Self {
            user_type: user_type.filter(|t| !t.is_empty()),
            from_date,
            to_date,
        }
    }

    pub fn with_user_type(mut self, user_type: impl Into<String>) -> Self {
        self.user_type = Some(user_type.into());
        self
    }

    pub fn with_from_date(mut self, from_date: NaiveDate) -> Self {
        self.from_date = Some(from_date);
        self
    }

    pub fn with_to_date(mut self, to_date: NaiveDate) -> Self {
        self.to_date = Some(to_date);
        self
    }

    /// Returns `true` when the record passes every supplied criterion.
    pub fn matches(&self, record: &EngagementRecord) -> bool {
        if let Some(user_type) = &self.user_type {
            if record.user_type() != user_type {
                return false;
            }
        }
        if let Some(from) = self.from_date {
            if record.date() < from {
                return false;
            }
        }
        if let Some(to) = self.to_date {
            if record.date() > to {
                return false;
            }
        }
        true
    }
}

/// Average session time, always normalized so that `seconds < 60`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SessionTime {
    pub minutes: u64,
    pub seconds: u8,
}

impl SessionTime {
    /// Credits [`SECONDS_PER_ACTION`] for every action.
    ///
    /// Equivalent to `minutes = floor(total * 0.5)` and
    /// `seconds = floor((total * 0.5 mod 1) * 60)`, computed without floats.
    pub fn from_actions(total_actions: u64) -> Self {
        let total_seconds = total_actions.saturating_mul(SECONDS_PER_ACTION);
        Self {
            minutes: total_seconds / 60,
            seconds: (total_seconds % 60) as u8,
        }
    }
}

impl Display for SessionTime {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}m {}s", self.minutes, self.seconds)
    }
}

impl Serialize for SessionTime {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Statistics derived from a filtered record set. Never stored.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct EngagementSummary {
    /// Number of matching records, not distinct users.
    pub active_users: usize,
    pub engagement_score: u64,
    pub avg_session_time: SessionTime,
}

impl EngagementSummary {
    pub fn from_records<'a, I>(records: I) -> Self
    where
        I: IntoIterator<Item = &'a EngagementRecord>,
    {
        let (active_users, total_actions) = records
            .into_iter()
            .fold((0usize, 0u64), |(count, total), record| (count + 1, total + u64::from(record.actions())));

        Self {
            active_users,
            engagement_score: total_actions.min(MAX_ENGAGEMENT_SCORE),
            avg_session_time: SessionTime::from_actions(total_actions),
        }
    }
}

/// Result of a query: the summary plus the matching records in input order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct EngagementReport {
    pub summary: EngagementSummary,
    pub details: Vec<EngagementRecord>,
}

/// Filters `records` and summarizes the retained subset.
///
/// The filter is stable: `details` keeps the relative order of `records`.
/// An empty result yields a zeroed summary rather than an error.
pub fn query_engagement(records: &[EngagementRecord], filter: &EngagementFilter) -> EngagementReport {
    let details: Vec<EngagementRecord> = records.iter().filter(|record| filter.matches(record)).cloned().collect();
    let summary = EngagementSummary::from_records(&details);

    EngagementReport { summary, details }
}
