//! CSV import command.
//!
//! Valid rows are committed in one transaction; invalid rows are listed with
//! their position and reason. A file whose header lacks a required column is
//! rejected before anything is written.

use crate::{
    db::engagement_logs::EngagementLogs,
    libs::{
        csv_io::{parse_import, ImportReport},
        messages::Message,
    },
    msg_error_anyhow, msg_success, msg_warning,
};
use anyhow::{Context, Result};
use clap::Args;
use std::fs::File;
use std::path::PathBuf;

#[derive(Debug, Args)]
pub struct ImportArgs {
    /// CSV file with at least the columns user,user_type,actions,date
    #[arg(required = true)]
    pub path: PathBuf,
}

pub fn cmd(args: ImportArgs) -> Result<()> {
    let report = run(&mut EngagementLogs::new()?, &args)?;

    msg_success!(Message::ImportCompleted(report.imported_count));
    if !report.skipped_rows.is_empty() {
        msg_warning!(Message::ImportSkippedRows(report.skipped_rows.len()));
        for row in &report.skipped_rows {
            msg_warning!(Message::ImportSkippedRow(row.row_index, row.reason.clone()));
        }
    }

    Ok(())
}

/// Imports the file named by `args` into `logs`.
///
/// A schema problem fails before anything is written.
pub fn run(logs: &mut EngagementLogs, args: &ImportArgs) -> Result<ImportReport> {
    let file = File::open(&args.path).with_context(|| Message::ImportFileReadFailed(args.path.display().to_string()).to_string())?;

    let parsed = parse_import(file).map_err(|e| msg_error_anyhow!(Message::ImportRejected(e.to_string())))?;
    logs.import(parsed)
}
