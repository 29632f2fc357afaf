//! CSV export command.
//!
//! Writes the records matching the given filters using the same layout the
//! REST export endpoint serves: a `user,user_type,actions,date` header and one
//! row per record. An empty match still produces the header.

use super::query::FilterArgs;
use crate::{
    db::engagement_logs::EngagementLogs,
    libs::{
        csv_io::{write_export, EXPORT_FILE_NAME},
        engagement::EngagementFilter,
        messages::Message,
        source::RecordSource,
    },
    msg_success,
};
use anyhow::Result;
use clap::Args;
use std::fs::File;
use std::io::{self, Write};
use std::path::PathBuf;

#[derive(Debug, Args)]
pub struct ExportArgs {
    #[command(flatten)]
    pub filter: FilterArgs,

    /// Output file; `-` writes to stdout
    #[arg(short, long, default_value = EXPORT_FILE_NAME)]
    pub output: PathBuf,
}

/// Where an export goes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExportTarget {
    Stdout,
    File(PathBuf),
}

impl ExportArgs {
    pub fn target(&self) -> ExportTarget {
        if self.output.as_os_str() == "-" {
            ExportTarget::Stdout
        } else {
            ExportTarget::File(self.output.clone())
        }
    }
}

pub fn cmd(args: ExportArgs) -> Result<()> {
    let mut logs = EngagementLogs::new()?;
    let filter = args.filter.filter();

    match args.target() {
        ExportTarget::Stdout => {
            run(&mut logs, &filter, io::stdout().lock())?;
        }
        ExportTarget::File(path) => {
            let rows = run(&mut logs, &filter, File::create(&path)?)?;
            msg_success!(Message::ExportWritten(rows, path.display().to_string()));
        }
    }

    Ok(())
}

/// Writes the records of `source` matching `filter` and returns the row count.
pub fn run<S, W>(source: &mut S, filter: &EngagementFilter, writer: W) -> Result<usize>
where
    S: RecordSource + ?Sized,
    W: Write,
{
    let report = source.query(filter)?;
    write_export(writer, &report.details)?;
    Ok(report.details.len())
}
