//! `summarize`: hours per bucket for a stored timesheet.
//!
//! The range is `--start_date`/`--end_date` (half-open) when either is given.
//! Otherwise `--date` selects the single bucket containing that day, and with
//! neither every recorded bucket is reported.
//!
//! Without `--output_path` the summary goes to the timesheet's stored output
//! path, and to stdout when none was recorded.

use super::parse_date_arg;
use crate::{
    libs::{
        aggregate::TimeAggregate,
        data_storage::DataStorage,
        export::{Exporter, OutputType},
        messages::Message,
        summary::DateRange,
        timesheet::Timesheet,
    },
    msg_success,
};
use anyhow::Result;
use chrono::NaiveDate;
use clap::Args;
use std::path::{Path, PathBuf};

#[derive(Debug, Args)]
pub struct SummarizeArgs {
    #[arg(long = "storage_name")]
    storage_name: String,

    #[arg(long = "storage_path")]
    storage_path: Option<PathBuf>,

    /// Summarize only the bucket containing this day (YYYY-MM-DD)
    #[arg(long, value_parser = parse_date_arg)]
    date: Option<NaiveDate>,

    #[arg(long, value_enum, default_value = "week")]
    aggregate: TimeAggregate,

    /// First bucket to include (YYYY-MM-DD)
    #[arg(long = "start_date", value_parser = parse_date_arg)]
    start_date: Option<NaiveDate>,

    /// First bucket to leave out (YYYY-MM-DD)
    #[arg(long = "end_date", value_parser = parse_date_arg)]
    end_date: Option<NaiveDate>,

    /// File to write; the stored output path, else stdout, when omitted
    #[arg(long = "output_path")]
    output_path: Option<PathBuf>,

    #[arg(long = "output_type", value_enum, default_value = "json")]
    output_type: OutputType,
}

pub fn cmd(args: SummarizeArgs) -> Result<()> {
    let storage_path = DataStorage::resolve(args.storage_path);
    let timesheet = Timesheet::load(&args.storage_name, &storage_path)?;

    let range = summary_range(args.start_date, args.end_date, args.date, args.aggregate);
    let summary = timesheet.summarize(range, args.aggregate);

    let destination = summary_destination(args.output_path, &timesheet);
    Exporter::new(args.output_type, destination.clone()).export(&summary)?;

    if let Some(path) = destination {
        msg_success!(Message::SummaryWritten(args.aggregate.to_string(), path.display().to_string()));
    }

    Ok(())
}

/// Explicit bounds win; a lone `date` narrows the range to its bucket.
pub fn summary_range(
    start_date: Option<NaiveDate>,
    end_date: Option<NaiveDate>,
    date: Option<NaiveDate>,
    aggregate: TimeAggregate,
) -> DateRange {
    match (start_date, end_date, date) {
        (None, None, Some(date)) => DateRange::bucket_of(date, aggregate),
        (start, end, _) => DateRange::new(start, end),
    }
}

pub fn summary_destination(explicit: Option<PathBuf>, timesheet: &Timesheet) -> Option<PathBuf> {
    explicit.or_else(|| timesheet.output_path().map(Path::to_path_buf))
}
