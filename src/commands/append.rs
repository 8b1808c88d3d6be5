use super::{parse_date_arg, parse_time_arg};
use crate::{
    libs::{
        data_storage::DataStorage, diff_time::DiffTime, error::TimesheetError, messages::Message,
        timesheet::Timesheet,
    },
    msg_success,
};
use anyhow::Result;
use chrono::{Local, NaiveDate};
use clap::Args;
use std::path::PathBuf;

#[derive(Debug, Args)]
pub struct AppendArgs {
    /// Name of the stored timesheet
    #[arg(long = "storage_name")]
    storage_name: String,

    #[arg(long = "storage_path")]
    storage_path: Option<PathBuf>,

    /// Times to append (HH:MM[:SS]); the current time when omitted
    #[arg(long, value_parser = parse_time_arg, value_delimiter = ',', num_args = 1..)]
    timestamps: Vec<DiffTime>,

    /// Day to append to (YYYY-MM-DD), today by default
    #[arg(long, value_parser = parse_date_arg)]
    date: Option<NaiveDate>,

    #[arg(short, long)]
    verbose: bool,
}

pub fn cmd(args: AppendArgs) -> Result<()> {
    let storage_path = DataStorage::resolve(args.storage_path);
    let mut timesheet = Timesheet::load(&args.storage_name, &storage_path)?;

    let date = append_timestamps(&mut timesheet, args.date, &args.timestamps)?;

    if args.verbose {
        let added = if args.timestamps.is_empty() {
            timesheet
                .get(date)
                .and_then(|day| day.timestamps().last())
                .map(ToString::to_string)
                .unwrap_or_default()
        } else {
            args.timestamps.iter().map(ToString::to_string).collect::<Vec<_>>().join(", ")
        };
        msg_success!(Message::TimestampsAdded(added, args.storage_name));
    }

    Ok(())
}

/// Appends to the day log of `date` (today by default) and saves; returns the day used.
///
/// An empty list appends the current time.
pub fn append_timestamps(
    timesheet: &mut Timesheet,
    date: Option<NaiveDate>,
    timestamps: &[DiffTime],
) -> Result<NaiveDate, TimesheetError> {
    let date = date.unwrap_or_else(|| Local::now().date_naive());
    let timestamps = (!timestamps.is_empty()).then_some(timestamps);
    timesheet.concat_timestamps(Some(date), timestamps)?;
    Ok(date)
}
