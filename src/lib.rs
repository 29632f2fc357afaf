//! # Engage - engagement analytics over logged user actions
//!
//! A command-line utility and REST service that stores engagement logs,
//! filters them by user type and date range, and summarizes the result.
//!
//! ## Features
//!
//! - **Aggregation**: pure filter + summary engine over engagement records
//! - **Storage**: SQLite store with versioned migrations
//! - **CSV**: import with per-row error reporting, filtered export
//! - **REST**: `/engagement`, `/engagement/export`, `/engagement/import`
//!
//! ## Usage
//!
//! ```rust,no_run
//! use engage::commands::Cli;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     Cli::menu().await
//! }
//! ```

pub mod commands;
pub mod db;
pub mod libs;
pub mod server;
