//! Display implementation for engage application messages.
//!
//! All user-facing text lives here, in one match, so wording stays consistent
//! between the CLI, the server logs and error payloads.

use super::types::Message;
use std::fmt::{Display, Formatter, Result};

impl Display for Message {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        let text = match self {
            // === CONFIGURATION MESSAGES ===
            Message::ConfigSaved => "Configuration saved successfully".to_string(),
            Message::ConfigDeleted => "Configuration removed".to_string(),
            Message::ConfigModuleServer => "Server settings".to_string(),
            Message::ConfigModuleImport => "Import settings".to_string(),
            Message::InvalidListenAddress(host, port) => format!("Cannot listen on {}:{}", host, port),

            // === PROMPTS ===
            Message::PromptSelectModules => "Select modules to configure".to_string(),
            Message::PromptServerHost => "Host to bind".to_string(),
            Message::PromptServerPort => "Port to listen on".to_string(),
            Message::PromptAllowAnyOrigin => "Allow requests from any origin (CORS)?".to_string(),
            Message::PromptMaxUploadBytes => "Maximum CSV upload size in bytes".to_string(),

            // === ENGAGEMENT MESSAGES ===
            Message::SummaryHeader(filter) => format!("Engagement summary ({})", filter),
            Message::DetailsHeader => "Matching records".to_string(),
            Message::NoRecordsMatched => "No records match the given filters".to_string(),
            Message::RecordsSeeded(count) => format!("Seeded {} sample records", count),
            Message::RecordsCleared(count) => format!("Removed {} existing records", count),
            Message::InvalidDateArgument(value) => format!("Invalid date '{}', expected YYYY-MM-DD", value),

            // === IMPORT / EXPORT MESSAGES ===
            Message::ImportCompleted(count) => format!("Successfully imported {} rows.", count),
            Message::ImportSkippedRows(count) => format!("{} rows skipped", count),
            Message::ImportSkippedRow(index, reason) => format!("Row {} skipped: {}", index, reason),
            Message::ImportRejected(reason) => format!("Import rejected: {}", reason),
            Message::ImportFileReadFailed(path) => format!("Failed to read import file {}", path),
            Message::ExportWritten(count, path) => format!("Exported {} rows to {}", count, path),

            // === SERVER MESSAGES ===
            Message::ServerStarting(addr) => format!("Listening on http://{}", addr),
            Message::ServerStopped => "Server stopped".to_string(),
            Message::ServerCorsAnyOrigin => "CORS: allowing all origins".to_string(),
            Message::ServerError(error) => format!("Server error: {}", error),

            // === MIGRATION MESSAGES ===
            Message::MigrationsFound(count) => format!("Found {} pending database migrations", count),
            Message::RunningMigration(version, name) => format!("Running migration v{}: {}", version, name),
            Message::MigrationCompleted(version) => format!("Migration v{} completed", version),
            Message::MigrationFailed(version, error) => format!("Migration v{} failed: {}", version, error),
            Message::AllMigrationsCompleted => "All migrations completed".to_string(),
            Message::DatabaseUpToDate => "Database is up to date".to_string(),
        };
        write!(f, "{}", text)
    }
}
