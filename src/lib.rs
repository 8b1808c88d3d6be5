//! # Timesheet
//!
//! A personal timesheet tool: clock timestamps are recorded per calendar day,
//! grouped into named timesheets kept in a local SQLite store, and summarized
//! as worked hours per day, week, month or year.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use timesheet::libs::{aggregate::TimeAggregate, summary::DateRange, timesheet::Timesheet};
//! use std::path::Path;
//!
//! let sheet = Timesheet::load("work", Path::new("timesheets.db"))?;
//! for (key, hours) in sheet.summarize(DateRange::default(), TimeAggregate::Week).iter() {
//!     println!("{key}: {hours:.2}");
//! }
//! # Ok::<(), timesheet::libs::error::TimesheetError>(())
//! ```

pub mod commands;
pub mod db;
pub mod libs;
