//! CSV import and export of engagement records.
//!
//! Both directions use the same four-column layout:
//!
//! ```text
//! user,user_type,actions,date
//! Gez,admin,12,2025-07-10
//! ```
//!
//! ## Import rules
//!
//! - The header must contain every column in [`REQUIRED_COLUMNS`]; order is
//!   free and extra columns are ignored. A missing column rejects the whole
//!   document with [`ImportSchemaError`] before any row is looked at.
//! - Every data row is validated on its own. A bad row becomes a
//!   [`SkippedRow`] and the batch continues.

use crate::libs::error::ImportSchemaError;
use crate::libs::messages::Message;
use crate::libs::record::{EngagementRecord, DATE_FORMAT};
use anyhow::Result;
use csv::{ReaderBuilder, StringRecord, Writer};
use serde::Serialize;
use std::io::{Read, Write};

/// Columns every import must provide, and the exact export header.
pub const REQUIRED_COLUMNS: [&str; 4] = ["user", "user_type", "actions", "date"];

/// Suggested file name for exported documents.
pub const EXPORT_FILE_NAME: &str = "engagement_export.csv";

/// Content type used when serving exported documents.
pub const CSV_CONTENT_TYPE: &str = "text/csv";

/// A data row that was not imported.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SkippedRow {
    /// 1-based position of the row among the data rows (the header is not counted).
    pub row_index: usize,
    pub reason: String,
}

/// Outcome of parsing an import document, before anything is written.
#[derive(Debug, Clone, Default)]
pub struct ParsedImport {
    pub records: Vec<EngagementRecord>,
    pub skipped_rows: Vec<SkippedRow>,
}

/// Outcome of a committed import.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ImportReport {
    pub imported_count: usize,
    pub skipped_rows: Vec<SkippedRow>,
}

impl ImportReport {
    pub fn message(&self) -> String {
        Message::ImportCompleted(self.imported_count).to_string()
    }
}

/// Column positions of the required fields inside a header.
struct ColumnMap {
    user: usize,
    user_type: usize,
    actions: usize,
    date: usize,
}

impl ColumnMap {
    fn from_headers(headers: &StringRecord) -> Result<Self, ImportSchemaError> {
        let names: Vec<String> = headers
            .iter()
            .map(|h| h.trim_start_matches('\u{feff}').trim().to_string())
            .collect();
        let position = |column: &str| names.iter().position(|name| name == column);

        let missing: Vec<String> = REQUIRED_COLUMNS
            .iter()
            .filter(|column| position(column).is_none())
            .map(|column| column.to_string())
            .collect();

        match (position("user"), position("user_type"), position("actions"), position("date")) {
            (Some(user), Some(user_type), Some(actions), Some(date)) => Ok(Self {
                user,
                user_type,
                actions,
                date,
            }),
            _ => Err(ImportSchemaError::MissingColumns {
                required: REQUIRED_COLUMNS.iter().map(|c| c.to_string()).collect(),
                missing,
            }),
        }
    }

    fn record(&self, row: &StringRecord) -> std::result::Result<EngagementRecord, String> {
        let cell = |index: usize| row.get(index).unwrap_or("");
        EngagementRecord::parse(cell(self.user), cell(self.user_type), cell(self.actions), cell(self.date)).map_err(|e| e.to_string())
    }
}

/// Reads an import document into validated records and skipped rows.
///
/// Only a schema problem fails the call; row problems are collected.
pub fn parse_import<R: Read>(reader: R) -> Result<ParsedImport, ImportSchemaError> {
    let mut rdr = ReaderBuilder::new().flexible(true).from_reader(reader);

    let headers = rdr.headers().map_err(|e| ImportSchemaError::UnreadableHeader(e.to_string()))?.clone();
    let columns = ColumnMap::from_headers(&headers)?;

    let mut parsed = ParsedImport::default();
    for (index, row) in rdr.records().enumerate() {
        let row_index = index + 1;
        let outcome = row.map_err(|e| e.to_string()).and_then(|row| columns.record(&row));

        match outcome {
            Ok(record) => parsed.records.push(record),
            Err(reason) => {
                tracing::warn!(row_index, %reason, "Row skipped during import");
                parsed.skipped_rows.push(SkippedRow { row_index, reason });
            }
        }
    }

    Ok(parsed)
}

/// Writes the export header followed by one row per record.
pub fn write_export<W: Write>(writer: W, records: &[EngagementRecord]) -> Result<()> {
    let mut wtr = Writer::from_writer(writer);
    wtr.write_record(REQUIRED_COLUMNS)?;

    for record in records {
        wtr.write_record(&[
            record.user().to_string(),
            record.user_type().to_string(),
            record.actions().to_string(),
            record.date().format(DATE_FORMAT).to_string(),
        ])?;
    }

    wtr.flush()?;
    Ok(())
}

/// Renders an export document into memory.
pub fn export_to_string(records: &[EngagementRecord]) -> Result<String> {
    let mut buffer = Vec::new();
    write_export(&mut buffer, records)?;
    Ok(String::from_utf8(buffer)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn header_order_and_extra_columns_do_not_matter() {
        let csv = "date,extra,actions,user_type,user\n2025-07-10,x,12,admin,Gez\n";
        let parsed = parse_import(csv.as_bytes()).unwrap();
        assert_eq!(parsed.records.len(), 1);
        assert_eq!(parsed.records[0].user(), "Gez");
        assert_eq!(parsed.records[0].actions(), 12);
    }

    #[test]
    fn byte_order_mark_on_header_is_ignored() {
        let csv = "\u{feff}user,user_type,actions,date\nGez,admin,12,2025-07-10\n";
        let parsed = parse_import(csv.as_bytes()).unwrap();
        assert_eq!(parsed.records.len(), 1);
    }

    #[test]
    fn missing_columns_are_listed() {
        let err = parse_import("user,actions\nGez,1\n".as_bytes()).unwrap_err();
        match err {
            ImportSchemaError::MissingColumns { missing, .. } => {
                assert_eq!(missing, vec!["user_type".to_string(), "date".to_string()]);
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn non_utf8_header_is_unreadable() {
        let csv: &[u8] = b"user,user_type,actions,\xffdate\nGez,admin,12,2025-07-10\n";
        match parse_import(csv).unwrap_err() {
            ImportSchemaError::UnreadableHeader(reason) => assert!(reason.to_lowercase().contains("utf-8")),
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn short_rows_are_skipped_not_fatal() {
        let csv = "user,user_type,actions,date\nGez,admin\nEve,admin,15,2025-07-12\n";
        let parsed = parse_import(csv.as_bytes()).unwrap();
        assert_eq!(parsed.records.len(), 1);
        assert_eq!(parsed.skipped_rows.len(), 1);
        assert_eq!(parsed.skipped_rows[0].row_index, 1);
    }

    #[test]
    fn export_of_nothing_is_just_the_header() {
        assert_eq!(export_to_string(&[]).unwrap(), "user,user_type,actions,date\n");
    }
}
