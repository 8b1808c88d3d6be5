//! Location of the timesheet store and helpers for output file paths.
//!
//! The default store lives at `$HOME/.timesheet/timesheets` unless the
//! `TIMESHEET_DIR` environment variable names another file. The path is
//! resolved once at the command-line boundary and handed to the core
//! explicitly.

use crate::libs::error::{IoContext, Result, TimesheetError};
use std::env::var;
use std::fs;
use std::path::{Path, PathBuf};

pub const STORAGE_ENV_VAR: &str = "TIMESHEET_DIR";
pub const APP_DIR: &str = ".timesheet";
pub const STORE_FILE_NAME: &str = "timesheets";

#[derive(Debug, Clone)]
pub struct DataStorage {
    store_path: PathBuf,
}

impl Default for DataStorage {
    fn default() -> Self {
        Self::new()
    }
}

impl DataStorage {
    pub fn new() -> Self {
        let store_path = match var(STORAGE_ENV_VAR) {
            Ok(path) if !path.is_empty() => PathBuf::from(path),
            _ => {
                let home = var("HOME").unwrap_or_else(|_| ".".into());
                Path::new(&home).join(APP_DIR).join(STORE_FILE_NAME)
            }
        };

        Self { store_path }
    }

    /// Explicit path wins over the environment default.
    pub fn resolve(explicit: Option<PathBuf>) -> PathBuf {
        explicit.unwrap_or_else(|| Self::new().store_path)
    }
}

/// Creates the directory that will contain `path` when it is missing.
pub fn ensure_parent_dir(path: &Path) -> Result<()> {
    match path.parent() {
        Some(dir) if !dir.as_os_str().is_empty() && !dir.exists() => fs::create_dir_all(dir).at_path(dir),
        _ => Ok(()),
    }
}

/// Fails with a permission error when `path` (or, if it does not exist yet,
/// its directory) cannot be written.
pub fn ensure_writable(path: &Path) -> Result<()> {
    let target = if path.exists() {
        path.to_path_buf()
    } else {
        match path.parent() {
            Some(dir) if !dir.as_os_str().is_empty() => dir.to_path_buf(),
            _ => PathBuf::from("."),
        }
    };

    if !target.exists() {
        return Ok(());
    }

    let metadata = fs::metadata(&target).at_path(&target)?;
    if metadata.permissions().readonly() {
        return Err(TimesheetError::Permission(format!(
            "You lack write permission for {}",
            target.display()
        )));
    }
    Ok(())
}

/// Highest number `n` among `names` of the form `<stem><n>[.<ext>]`, plus one.
pub fn next_number<S: AsRef<str>>(stem: &str, names: &[S]) -> u32 {
    names
        .iter()
        .filter_map(|name| {
            let rest = name.as_ref().strip_prefix(stem)?;
            let digits: String = rest.chars().take_while(char::is_ascii_digit).collect();
            let tail = &rest[digits.len()..];
            if digits.is_empty() || !(tail.is_empty() || tail.starts_with('.')) {
                return None;
            }
            digits.parse::<u32>().ok()
        })
        .max()
        .unwrap_or(0)
        + 1
}

/// `<dir>/<stem><n>.<extension>` with the first unused `n` among the files in `dir`.
pub fn numbered_path(dir: &Path, stem: &str, extension: &str) -> Result<PathBuf> {
    let names: Vec<String> = if dir.is_dir() {
        fs::read_dir(dir)
            .at_path(dir)?
            .filter_map(|entry| entry.ok())
            .map(|entry| entry.file_name().to_string_lossy().into_owned())
            .collect()
    } else {
        Vec::new()
    };

    Ok(dir.join(format!("{}{}.{}", stem, next_number(stem, &names), extension)))
}
