#[derive(Debug, Clone)]
pub enum Message {
    // === CONFIGURATION MESSAGES ===
    ConfigSaved,
    ConfigDeleted,
    ConfigModuleServer,
    ConfigModuleImport,
    InvalidListenAddress(String, u16), // host, port

    // === PROMPTS ===
    PromptSelectModules,
    PromptServerHost,
    PromptServerPort,
    PromptAllowAnyOrigin,
    PromptMaxUploadBytes,

    // === ENGAGEMENT MESSAGES ===
    SummaryHeader(String), // filter description
    DetailsHeader,
    NoRecordsMatched,
    RecordsSeeded(usize),
    RecordsCleared(usize),
    InvalidDateArgument(String),

    // === IMPORT / EXPORT MESSAGES ===
    ImportCompleted(usize),
    ImportSkippedRows(usize),
    ImportSkippedRow(usize, String), // row index, reason
    ImportRejected(String),
    ImportFileReadFailed(String),
    ExportWritten(usize, String), // rows, path

    // === SERVER MESSAGES ===
    ServerStarting(String), // address
    ServerStopped,
    ServerCorsAnyOrigin,
    ServerError(String),

    // === MIGRATION MESSAGES ===
    MigrationsFound(usize),        // count
    RunningMigration(u32, String), // version, name
    MigrationCompleted(u32),       // version
    MigrationFailed(u32, String),  // version, error
    AllMigrationsCompleted,
    DatabaseUpToDate,
}
