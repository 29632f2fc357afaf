//! Engagement query command.
//!
//! Filters the stored records (or the built-in sample with `--fixture`) and
//! prints the summary followed by the matching records, either as tables or
//! as the same JSON document the REST service returns.

use crate::{
    db::engagement_logs::EngagementLogs,
    libs::{
        engagement::{EngagementFilter, EngagementReport},
        messages::Message,
        record::parse_date,
        source::{FixtureSource, RecordSource},
        view::View,
    },
    msg_info, msg_print,
};
use anyhow::Result;
use chrono::NaiveDate;
use clap::Args;
use std::io::{self, Write};

/// Filter flags shared by `query` and `export`.
#[derive(Debug, Clone, Default, Args)]
pub struct FilterArgs {
    /// Only keep records with exactly this user type (case-sensitive)
    #[arg(short, long)]
    pub user_type: Option<String>,

    /// Earliest date to keep, inclusive (YYYY-MM-DD)
    #[arg(short, long, value_parser = parse_date_arg)]
    pub from: Option<NaiveDate>,

    /// Latest date to keep, inclusive (YYYY-MM-DD)
    #[arg(short, long, value_parser = parse_date_arg)]
    pub to: Option<NaiveDate>,
}

impl FilterArgs {
    pub fn filter(&self) -> EngagementFilter {
        EngagementFilter::new(self.user_type.clone(), self.from, self.to)
    }
}

fn parse_date_arg(value: &str) -> Result<NaiveDate, String> {
    parse_date(value).map_err(|_| Message::InvalidDateArgument(value.to_string()).to_string())
}

/// Human-readable description of the active filters.
pub fn describe(filter: &EngagementFilter) -> String {
    let mut parts = Vec::new();
    if let Some(user_type) = &filter.user_type {
        parts.push(format!("user type {}", user_type));
    }
    match (filter.from_date, filter.to_date) {
        (Some(from), Some(to)) => parts.push(format!("{} to {}", from, to)),
        (Some(from), None) => parts.push(format!("from {}", from)),
        (None, Some(to)) => parts.push(format!("until {}", to)),
        (None, None) => {}
    }

    if parts.is_empty() {
        "all records".to_string()
    } else {
        parts.join(", ")
    }
}

#[derive(Debug, Args)]
pub struct QueryArgs {
    #[command(flatten)]
    pub filter: FilterArgs,

    /// Print the result as JSON
    #[arg(long)]
    pub json: bool,

    /// Query the built-in sample records instead of the database
    #[arg(long)]
    pub fixture: bool,
}

/// The record source a query reads: the sample records with `--fixture`,
/// the database otherwise.
pub fn source(args: &QueryArgs) -> Result<Box<dyn RecordSource>> {
    if args.fixture {
        return Ok(Box::new(FixtureSource::sample()));
    }
    Ok(Box::new(EngagementLogs::new()?))
}

pub fn cmd(args: QueryArgs) -> Result<()> {
    let mut source = source(&args)?;
    run(source.as_mut(), &args, &mut io::stdout().lock())?;
    Ok(())
}

/// Runs the query against `source` and renders the result to `out`.
pub fn run<S, W>(source: &mut S, args: &QueryArgs, out: &mut W) -> Result<EngagementReport>
where
    S: RecordSource + ?Sized,
    W: Write,
{
    let filter = args.filter.filter();
    let report = source.query(&filter)?;

    if args.json {
        serde_json::to_writer_pretty(&mut *out, &report)?;
        writeln!(out)?;
        return Ok(report);
    }

    msg_print!(Message::SummaryHeader(describe(&filter)), true);
    View::summary(out, &report.summary)?;

    if report.details.is_empty() {
        msg_info!(Message::NoRecordsMatched, true);
    } else {
        msg_print!(Message::DetailsHeader, true);
        View::details(out, &report)?;
    }

    Ok(report)
}
