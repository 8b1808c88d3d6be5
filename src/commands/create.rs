//! `create`: store a new timesheet, empty or seeded from a JSON dump.

use crate::{
    libs::{
        data_storage::DataStorage,
        messages::Message,
        timesheet::{SaveOutcome, Timesheet},
    },
    msg_info, msg_success, msg_warning,
};
use anyhow::Result;
use clap::Args;
use std::path::PathBuf;

#[derive(Debug, Args)]
pub struct CreateArgs {
    /// Name to store the timesheet under (next free `timesheet<n>` if omitted)
    #[arg(long = "storage_name")]
    storage_name: Option<String>,

    /// Store file to use instead of the default location
    #[arg(long = "storage_path")]
    storage_path: Option<PathBuf>,

    /// JSON file with `{ "YYYY-MM-DD": ["HH:MM:SS", ...] }` data to load
    #[arg(long = "json_source")]
    json_source: Option<PathBuf>,

    /// Default location for later JSON dumps of this timesheet
    #[arg(long = "data_path")]
    data_path: Option<PathBuf>,

    /// Default file for `summarize` when it is run without `--output_path`
    #[arg(long = "output_path")]
    output_path: Option<PathBuf>,

    /// Report what was created
    #[arg(short, long)]
    verbose: bool,
}

pub fn cmd(args: CreateArgs) -> Result<()> {
    let storage_path = DataStorage::resolve(args.storage_path);

    let mut timesheet = match &args.json_source {
        Some(source) => Timesheet::from_json(source, storage_path.clone(), args.storage_name)?,
        None => Timesheet::new(None, storage_path.clone(), args.storage_name)?,
    };
    timesheet.set_data_path(args.data_path)?;
    timesheet.set_output_path(args.output_path)?;

    match timesheet.save(false)? {
        SaveOutcome::Saved => {
            if args.verbose {
                msg_success!(Message::TimesheetCreatedAt(
                    timesheet.storage_name().to_string(),
                    storage_path.display().to_string()
                ));
            }
        }
        SaveOutcome::Skipped => {
            msg_warning!(Message::OverwriteRefused(timesheet.storage_name().to_string()));
            if args.verbose {
                msg_info!(Message::OperationCancelled);
            }
        }
    }

    Ok(())
}
