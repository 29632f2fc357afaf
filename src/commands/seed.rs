use crate::{
    db::engagement_logs::EngagementLogs,
    libs::{messages::Message, source::FixtureSource},
    msg_info, msg_success,
};
use anyhow::Result;
use clap::Args;

#[derive(Debug, Args)]
pub struct SeedArgs {
    /// Remove all stored records before seeding
    #[arg(long)]
    pub clear: bool,
}

/// Rows removed and inserted by a seed run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SeedOutcome {
    pub cleared: Option<usize>,
    pub inserted: usize,
}

pub fn cmd(args: SeedArgs) -> Result<()> {
    let outcome = run(&mut EngagementLogs::new()?, &args)?;

    if let Some(removed) = outcome.cleared {
        msg_info!(Message::RecordsCleared(removed));
    }
    msg_success!(Message::RecordsSeeded(outcome.inserted));

    Ok(())
}

pub fn run(logs: &mut EngagementLogs, args: &SeedArgs) -> Result<SeedOutcome> {
    let cleared = if args.clear { Some(logs.clear()?) } else { None };
    let inserted = logs.insert_batch(FixtureSource::sample().records())?;

    Ok(SeedOutcome { cleared, inserted })
}
