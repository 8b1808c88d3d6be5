//! SQLite persistence for timesheets.

/// Connection setup for the store file.
pub mod db;

/// Named timesheet entries: insert, replace, fetch, list and delete.
pub mod timesheets;
