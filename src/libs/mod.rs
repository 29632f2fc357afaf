//! Core library modules for the engage application.
//!
//! ## Features
//!
//! - **Aggregation**: filtering and summarizing engagement records
//! - **Records**: validated record model and record sources
//! - **CSV**: import with per-row error reporting, export
//! - **Infrastructure**: configuration, data storage, messaging, console views
//!
//! ## Usage
//!
//! ```rust
//! use engage::libs::engagement::EngagementFilter;
//! use engage::libs::source::{FixtureSource, RecordSource};
//!
//! let mut source = FixtureSource::sample();
//! let report = source.query(&EngagementFilter::default())?;
//! assert_eq!(report.summary.active_users, 3);
//! # Ok::<(), anyhow::Error>(())
//! ```

pub mod config;
pub mod csv_io;
pub mod data_storage;
pub mod engagement;
pub mod error;
pub mod logging;
pub mod messages;
pub mod record;
pub mod source;
pub mod view;
