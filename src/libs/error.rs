//! Error types shared by the timesheet core.
//!
//! Every fallible core operation returns [`Result`]. The variants mirror the
//! failure categories a caller has to react to differently: bad input
//! (`Validation`), a missing store entry or file (`NotFound`), file system
//! access (`Permission`) and CLI-level settings (`Configuration`). Storage and
//! serialization failures are wrapped so `?` works across the crate.

use std::io;
use std::path::Path;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, TimesheetError>;

#[derive(Debug, Error)]
pub enum TimesheetError {
    /// Unordered timestamps, non-ISO dates, conflicting merges and similar input problems.
    #[error("{0}")]
    Validation(String),

    /// Unknown storage name, missing store file or missing bucket key.
    #[error("{0}")]
    NotFound(String),

    /// Target directory or file cannot be read or written.
    #[error("{0}")]
    Permission(String),

    /// Unknown aggregate or output type name.
    #[error("{0}")]
    Configuration(String),

    #[error("Storage error: {0}")]
    Storage(#[from] rusqlite::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("I/O error on {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: io::Error,
    },
}

impl TimesheetError {
    pub fn validation(msg: impl Into<String>) -> Self {
        TimesheetError::Validation(msg.into())
    }

    pub fn not_found(msg: impl Into<String>) -> Self {
        TimesheetError::NotFound(msg.into())
    }

    /// Classifies an I/O failure on `path` into the matching error kind.
    pub fn from_io(path: &Path, source: io::Error) -> Self {
        let shown = path.display().to_string();
        match source.kind() {
            io::ErrorKind::NotFound => TimesheetError::NotFound(format!("{} does not exist", shown)),
            io::ErrorKind::PermissionDenied => TimesheetError::Permission(format!("You lack permission for {}", shown)),
            _ => TimesheetError::Io { path: shown, source },
        }
    }

    pub fn is_validation(&self) -> bool {
        matches!(self, TimesheetError::Validation(_))
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, TimesheetError::NotFound(_))
    }
}

/// Attaches the path to an `io::Result`, classifying the error kind.
pub trait IoContext<T> {
    fn at_path(self, path: &Path) -> Result<T>;
}

impl<T> IoContext<T> for io::Result<T> {
    fn at_path(self, path: &Path) -> Result<T> {
        self.map_err(|e| TimesheetError::from_io(path, e))
    }
}
