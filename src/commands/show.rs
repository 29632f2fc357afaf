use crate::{
    db::engagement_logs::EngagementLogs,
    libs::{error::NotFoundError, record::StoredRecord, view::View},
};
use anyhow::Result;
use clap::Args;
use std::io::{self, Write};

#[derive(Debug, Args)]
pub struct ShowArgs {
    /// Id of the stored log
    #[arg(required = true)]
    pub id: i64,
}

pub fn cmd(args: ShowArgs) -> Result<()> {
    run(&mut EngagementLogs::new()?, &args, &mut io::stdout().lock())?;
    Ok(())
}

/// Prints one stored log, failing with [`NotFoundError`] for an unknown id.
pub fn run<W: Write>(logs: &mut EngagementLogs, args: &ShowArgs, out: &mut W) -> Result<StoredRecord> {
    let stored = logs.get(args.id)?.ok_or(NotFoundError(args.id))?;
    View::stored(out, &stored)?;

    Ok(stored)
}
