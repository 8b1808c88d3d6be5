use crate::{
    libs::{data_storage::DataStorage, messages::Message, timesheet::Timesheet},
    msg_success, msg_warning,
};
use anyhow::Result;
use clap::Args;
use std::path::PathBuf;

#[derive(Debug, Args)]
pub struct DeleteArgs {
    #[arg(long = "storage_name")]
    storage_name: String,

    #[arg(long = "storage_path")]
    storage_path: Option<PathBuf>,

    /// Delete without asking for confirmation
    #[arg(short, long)]
    force: bool,
}

pub fn cmd(args: DeleteArgs) -> Result<()> {
    let storage_path = DataStorage::resolve(args.storage_path);

    if Timesheet::delete(&args.storage_name, &storage_path, !args.force)? {
        msg_success!(Message::TimesheetDeleted(args.storage_name));
    } else {
        msg_warning!(Message::DeleteRefused(args.storage_name));
    }

    Ok(())
}
