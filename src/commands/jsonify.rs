use crate::{
    libs::{data_storage::DataStorage, messages::Message, timesheet::Timesheet},
    msg_success,
};
use anyhow::Result;
use clap::Args;
use std::path::PathBuf;

#[derive(Debug, Args)]
pub struct JsonifyArgs {
    #[arg(long = "storage_name")]
    storage_name: String,

    #[arg(long = "storage_path")]
    storage_path: Option<PathBuf>,

    /// JSON file to write; a numbered `<name><n>.json` next to the data path by default
    #[arg(long = "output_path")]
    output_path: Option<PathBuf>,
}

pub fn cmd(args: JsonifyArgs) -> Result<()> {
    let storage_path = DataStorage::resolve(args.storage_path);
    let timesheet = Timesheet::load(&args.storage_name, &storage_path)?;

    let written = timesheet.write_json(args.output_path.as_deref())?;
    msg_success!(Message::JsonWritten(written.display().to_string()));

    Ok(())
}
