use super::db::Db;
use crate::libs::csv_io::{ImportReport, ParsedImport};
use crate::libs::error::ValidationError;
use crate::libs::record::{EngagementRecord, StoredRecord};
use crate::libs::source::RecordSource;
use anyhow::Result;
use chrono::NaiveDate;
use rusqlite::types::Type;
use rusqlite::{params, Connection, OptionalExtension, Row};

const INSERT_LOG: &str = "INSERT INTO engagement_logs (user, user_type, actions, date) VALUES (?1, ?2, ?3, ?4)";
const SELECT_LOGS: &str = "SELECT id, user, user_type, actions, date FROM engagement_logs ORDER BY id";
const SELECT_LOG_BY_ID: &str = "SELECT id, user, user_type, actions, date FROM engagement_logs WHERE id = ?1";
const COUNT_LOGS: &str = "SELECT COUNT(*) FROM engagement_logs";
const DELETE_ALL_LOGS: &str = "DELETE FROM engagement_logs";

/// SQLite-backed store of engagement logs.
///
/// Rows come back in insertion order, which is the order the engine preserves
/// in its `details` output.
pub struct EngagementLogs {
    conn: Connection,
}

impl EngagementLogs {
    /// Opens the store in the application data directory.
    pub fn new() -> Result<Self> {
        Ok(Self::from_db(Db::new()?))
    }

    pub fn from_db(db: Db) -> Self {
        Self { conn: db.conn }
    }

    pub fn insert(&mut self, record: &EngagementRecord) -> Result<i64> {
        self.conn.execute(
            INSERT_LOG,
            params![record.user(), record.user_type(), record.actions(), record.date()],
        )?;
        Ok(self.conn.last_insert_rowid())
    }

    /// Inserts all records in one transaction: either every row lands or none does.
    pub fn insert_batch(&mut self, records: &[EngagementRecord]) -> Result<usize> {
        let tx = self.conn.transaction()?;
        {
            let mut stmt = tx.prepare(INSERT_LOG)?;
            for record in records {
                stmt.execute(params![record.user(), record.user_type(), record.actions(), record.date()])?;
            }
        }
        tx.commit()?;
        Ok(records.len())
    }

    /// Commits the valid rows of a parsed import and reports the outcome.
    pub fn import(&mut self, parsed: ParsedImport) -> Result<ImportReport> {
        let imported_count = self.insert_batch(&parsed.records)?;
        tracing::info!(imported_count, skipped = parsed.skipped_rows.len(), "Import committed");

        Ok(ImportReport {
            imported_count,
            skipped_rows: parsed.skipped_rows,
        })
    }

    pub fn fetch_all(&mut self) -> Result<Vec<StoredRecord>> {
        let mut stmt = self.conn.prepare(SELECT_LOGS)?;
        let log_iter = stmt.query_map([], stored_record_from_row)?;

        let mut logs = Vec::new();
        for log in log_iter {
            logs.push(log?);
        }
        Ok(logs)
    }

    pub fn get(&mut self, id: i64) -> Result<Option<StoredRecord>> {
        self.conn
            .query_row(SELECT_LOG_BY_ID, params![id], stored_record_from_row)
            .optional()
            .map_err(Into::into)
    }

    pub fn count(&mut self) -> Result<usize> {
        let count: i64 = self.conn.query_row(COUNT_LOGS, [], |row| row.get(0))?;
        Ok(count as usize)
    }

    /// Deletes every log and returns how many were removed.
    pub fn clear(&mut self) -> Result<usize> {
        Ok(self.conn.execute(DELETE_ALL_LOGS, [])?)
    }
}

impl RecordSource for EngagementLogs {
    fn fetch_records(&mut self) -> Result<Vec<EngagementRecord>> {
        Ok(self.fetch_all()?.into_iter().map(|stored| stored.record).collect())
    }
}

/// Maps a row back through record validation, so a hand-edited database
/// cannot smuggle a malformed record into the engine.
fn stored_record_from_row(row: &Row) -> rusqlite::Result<StoredRecord> {
    let id: i64 = row.get(0)?;
    let user: String = row.get(1)?;
    let user_type: String = row.get(2)?;
    let actions: i64 = row.get(3)?;
    let date: NaiveDate = row.get(4)?;

    let record = EngagementRecord::new(user, user_type, actions, date).map_err(|e| {
        let (column, sql_type) = failed_column(&e);
        rusqlite::Error::FromSqlConversionFailure(column, sql_type, Box::new(e))
    })?;

    Ok(StoredRecord { id, record })
}

/// Position and storage type of the column a validation error refers to.
fn failed_column(err: &ValidationError) -> (usize, Type) {
    match err.field() {
        "user" => (1, Type::Text),
        "user_type" => (2, Type::Text),
        "date" => (4, Type::Text),
        _ => (3, Type::Integer),
    }
}
