#[derive(Debug, Clone)]
pub enum Message {
    // === TIMESHEET MESSAGES ===
    TimesheetCreatedAt(String, String), // name, store path
    TimesheetDeleted(String),
    TimesheetMerged(Vec<String>, String), // sources, target
    TimestampsAdded(String, String),      // timestamps, name
    NoTimesheetsFound(String),            // store path
    TimesheetsHeader(String),             // store path

    // === DAY LOG MESSAGES ===
    OddTimestampCount(String), // date

    // === OUTPUT MESSAGES ===
    JsonWritten(String),
    SummaryWritten(String, String), // aggregate, path

    // === CONFIRMATION MESSAGES ===
    ConfirmOverwrite(String),
    ConfirmDelete(String),
    OverwriteRefused(String),
    DeleteRefused(String),
    OperationCancelled,

    // === ERROR MESSAGES ===
    InvalidMergeSource(String),
    MergeNeedsSources,
    CommandFailed(String),
}
