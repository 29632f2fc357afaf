use super::engagement::{EngagementReport, EngagementSummary};
use super::record::{StoredRecord, DATE_FORMAT};
use prettytable::{row, Table};
use std::io::{Result, Write};

pub struct View {}

impl View {
    pub fn summary<W: Write>(out: &mut W, summary: &EngagementSummary) -> Result<()> {
        let mut table = Table::new();

        table.add_row(row!["ACTIVE USERS", "ENGAGEMENT SCORE", "AVG SESSION TIME"]);
        table.add_row(row![summary.active_users, summary.engagement_score, summary.avg_session_time]);
        table.print(out)?;
        Ok(())
    }

    pub fn details<W: Write>(out: &mut W, report: &EngagementReport) -> Result<()> {
        let mut table = Table::new();

        table.add_row(row!["USER", "USER TYPE", "ACTIONS", "DATE"]);
        for record in &report.details {
            table.add_row(row![record.user(), record.user_type(), record.actions(), record.date().format(DATE_FORMAT)]);
        }
        table.print(out)?;
        Ok(())
    }

    pub fn stored<W: Write>(out: &mut W, stored: &StoredRecord) -> Result<()> {
        let mut table = Table::new();

        table.add_row(row!["ID", "USER", "USER TYPE", "ACTIONS", "DATE"]);
        table.add_row(row![
            stored.id,
            stored.record.user(),
            stored.record.user_type(),
            stored.record.actions(),
            stored.record.date().format(DATE_FORMAT)
        ]);
        table.print(out)?;
        Ok(())
    }
}
