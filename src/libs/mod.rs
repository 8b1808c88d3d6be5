//! Core library modules.
//!
//! - Time model: [`diff_time`], [`day_log`], [`timesheet`]
//! - Reporting: [`aggregate`], [`summary`], [`export`], [`view`]
//! - Infrastructure: [`data_storage`], [`error`], [`messages`], [`prompt`]

pub mod aggregate;
pub mod data_storage;
pub mod day_log;
pub mod diff_time;
pub mod error;
pub mod export;
pub mod messages;
pub mod prompt;
pub mod summary;
pub mod timesheet;
pub mod view;
