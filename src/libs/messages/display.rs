//! Display text for every [`Message`] variant.
//!
//! All user-facing wording lives here so commands and the core only pick a
//! variant and pass its parameters.

use super::types::Message;
use std::fmt::{Display, Formatter, Result};

impl Display for Message {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        let text = match self {
            // === TIMESHEET MESSAGES ===
            Message::TimesheetCreatedAt(name, path) => format!("Created Timesheet instance named {:?} at {}", name, path),
            Message::TimesheetDeleted(name) => format!("Deleted timesheet {:?}", name),
            Message::TimesheetMerged(sources, target) => format!("Merged {} into {:?}", sources.join(", "), target),
            Message::TimestampsAdded(timestamps, name) => format!("Added {} to Timesheet {:?}", timestamps, name),
            Message::NoTimesheetsFound(path) => format!("No timesheets stored at {}", path),
            Message::TimesheetsHeader(path) => format!("Timesheets stored at {}:", path),

            // === DAY LOG MESSAGES ===
            Message::OddTimestampCount(date) => format!("Odd number of timestamps on {}; ignoring last", date),

            // === OUTPUT MESSAGES ===
            Message::JsonWritten(path) => format!("Wrote JSON to {}", path),
            Message::SummaryWritten(aggregate, path) => format!("Wrote {} summary to {}", aggregate, path),

            // === CONFIRMATION MESSAGES ===
            Message::ConfirmOverwrite(name) => format!("Saving will overwrite existing timesheet {:?}. Continue?", name),
            Message::ConfirmDelete(name) => format!("Delete timesheet {:?}?", name),
            Message::OverwriteRefused(name) => format!("Timesheet {:?} already exists; not overwritten", name),
            Message::DeleteRefused(name) => format!("Timesheet {:?} not deleted; confirm interactively or pass --force", name),
            Message::OperationCancelled => "Operation cancelled".to_string(),

            // === ERROR MESSAGES ===
            Message::InvalidMergeSource(raw) => format!("Merge source {:?} must be given as name=path", raw),
            Message::MergeNeedsSources => "At least one merge source is required".to_string(),
            Message::CommandFailed(error) => format!("{}", error),
        };
        write!(f, "{}", text)
    }
}
