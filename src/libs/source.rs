//! Record suppliers for the aggregation engine.
//!
//! The engine never reaches for records itself; callers hand it whatever a
//! [`RecordSource`] produces. The SQLite store
//! ([`EngagementLogs`](crate::db::engagement_logs::EngagementLogs)) is one
//! implementation, [`FixtureSource`] is the in-memory one used for demos,
//! seeding and tests.

use crate::libs::engagement::{query_engagement, EngagementFilter, EngagementReport};
use crate::libs::record::EngagementRecord;
use anyhow::Result;
use chrono::NaiveDate;

/// Anything able to produce the full, ordered list of engagement records.
pub trait RecordSource {
    fn fetch_records(&mut self) -> Result<Vec<EngagementRecord>>;

    /// Fetches every record and runs the engine over them.
    fn query(&mut self, filter: &EngagementFilter) -> Result<EngagementReport> {
        let records = self.fetch_records()?;
        Ok(query_engagement(&records, filter))
    }
}

/// A fixed, in-memory list of records.
#[derive(Debug, Clone, Default)]
pub struct FixtureSource {
    records: Vec<EngagementRecord>,
}

impl FixtureSource {
    pub fn new(records: Vec<EngagementRecord>) -> Self {
        Self { records }
    }

    /// The three demo records the dashboard ships with.
    pub fn sample() -> Self {
        let rows: [(&str, &str, i64, (i32, u32, u32)); 3] = [
            ("Gez", "admin", 12, (2025, 7, 10)),
            ("Bob", "client", 8, (2025, 7, 14)),
            ("Eve", "admin", 15, (2025, 7, 12)),
        ];

        let records = rows
            .into_iter()
            .filter_map(|(user, user_type, actions, (y, m, d))| {
                let date = NaiveDate::from_ymd_opt(y, m, d)?;
                EngagementRecord::new(user, user_type, actions, date).ok()
            })
            .collect();

        Self { records }
    }

    pub fn records(&self) -> &[EngagementRecord] {
        &self.records
    }

    pub fn into_records(self) -> Vec<EngagementRecord> {
        self.records
    }
}

impl RecordSource for FixtureSource {
    fn fetch_records(&mut self) -> Result<Vec<EngagementRecord>> {
        Ok(self.records.clone())
    }
}
