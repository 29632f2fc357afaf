//! Engagement record model.
//!
//! An [`EngagementRecord`] is one logged user action event: who acted, in
//! which role, how many actions they performed and on which calendar day.
//! Records are validated once, at construction, and are immutable afterwards,
//! so every value that reaches the aggregation engine is well formed.
//!
//! ## Construction paths
//!
//! - [`EngagementRecord::new`] for typed input (CLI arguments, database rows)
//! - [`EngagementRecord::parse`] for text input (CSV cells)
//! - `serde` deserialization, which funnels through the same checks

use crate::libs::error::ValidationError;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// The only date format accepted on the wire, in CSV files and in query parameters.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Parses an ISO `YYYY-MM-DD` date.
pub fn parse_date(value: &str) -> Result<NaiveDate, ValidationError> {
    NaiveDate::parse_from_str(value.trim(), DATE_FORMAT).map_err(|_| ValidationError::InvalidDate(value.to_string()))
}

/// A single validated engagement log entry.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "RawRecord")]
pub struct EngagementRecord {
    user: String,
    user_type: String,
    actions: u32,
    date: NaiveDate,
}

impl EngagementRecord {
    /// Builds a record from typed values.
    ///
    /// Fails when `user` or `user_type` is blank, or when `actions` is negative
    /// or larger than the store can hold.
    pub fn new(user: impl Into<String>, user_type: impl Into<String>, actions: i64, date: NaiveDate) -> Result<Self, ValidationError> {
        let user = user.into();
        let user_type = user_type.into();

        if user.trim().is_empty() {
            return Err(ValidationError::MissingField("user"));
        }
        if user_type.trim().is_empty() {
            return Err(ValidationError::MissingField("user_type"));
        }
        if actions < 0 {
            return Err(ValidationError::NegativeActions(actions));
        }
        let actions = u32::try_from(actions).map_err(|_| ValidationError::ActionsOutOfRange(actions))?;

        Ok(Self {
            user,
            user_type,
            actions,
            date,
        })
    }

    /// Builds a record from raw text cells, as found in a CSV row.
    pub fn parse(user: &str, user_type: &str, actions: &str, date: &str) -> Result<Self, ValidationError> {
        let actions = actions.trim();
        let date = date.trim();

        if actions.is_empty() {
            return Err(ValidationError::MissingField("actions"));
        }
        if date.is_empty() {
            return Err(ValidationError::MissingField("date"));
        }

        let actions: i64 = actions.parse().map_err(|_| ValidationError::InvalidActions(actions.to_string()))?;
        let date = parse_date(date)?;

        Self::new(user, user_type, actions, date)
    }

    pub fn user(&self) -> &str {
        &self.user
    }

    pub fn user_type(&self) -> &str {
        &self.user_type
    }

    pub fn actions(&self) -> u32 {
        self.actions
    }

    pub fn date(&self) -> NaiveDate {
        self.date
    }
}

/// Unvalidated shape accepted by deserialization.
#[derive(Deserialize)]
struct RawRecord {
    user: Option<String>,
    user_type: Option<String>,
    actions: Option<i64>,
    date: Option<String>,
}

impl TryFrom<RawRecord> for EngagementRecord {
    type Error = ValidationError;

    fn try_from(raw: RawRecord) -> Result<Self, Self::Error> {
        let user = raw.user.ok_or(ValidationError::MissingField("user"))?;
        let user_type = raw.user_type.ok_or(ValidationError::MissingField("user_type"))?;
        let actions = raw.actions.ok_or(ValidationError::MissingField("actions"))?;
        let date = parse_date(&raw.date.ok_or(ValidationError::MissingField("date"))?)?;

        EngagementRecord::new(user, user_type, actions, date)
    }
}

/// A record as persisted by the store, together with its surrogate key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StoredRecord {
    pub id: i64,
    #[serde(flatten)]
    pub record: EngagementRecord,
}
