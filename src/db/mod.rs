//! Database layer for the engage application.
//!
//! A single SQLite file in the platform data directory holds the engagement
//! logs. Opening a connection applies any pending schema migrations first.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use engage::db::engagement_logs::EngagementLogs;
//! use engage::libs::record::{parse_date, EngagementRecord};
//!
//! let mut logs = EngagementLogs::new()?;
//! let record = EngagementRecord::new("Gez", "admin", 12, parse_date("2025-07-10")?)?;
//! logs.insert(&record)?;
//! # Ok::<(), anyhow::Error>(())
//! ```

/// Connection management and initialization.
pub mod db;

/// Versioned schema changes.
pub mod migrations;

/// Storage and retrieval of engagement log rows.
pub mod engagement_logs;
