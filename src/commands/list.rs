use crate::{
    db::timesheets::Timesheets,
    libs::{data_storage::DataStorage, messages::Message, view::View},
    msg_info, msg_print,
};
use anyhow::Result;
use clap::Args;
use std::path::PathBuf;

#[derive(Debug, Args)]
pub struct ListArgs {
    #[arg(long = "storage_path")]
    storage_path: Option<PathBuf>,
}

pub fn cmd(args: ListArgs) -> Result<()> {
    let storage_path = DataStorage::resolve(args.storage_path);
    let shown = storage_path.display().to_string();

    if !storage_path.exists() {
        msg_info!(Message::NoTimesheetsFound(shown));
        return Ok(());
    }

    let timesheets = Timesheets::open(&storage_path)?.list()?;
    if timesheets.is_empty() {
        msg_info!(Message::NoTimesheetsFound(shown));
        return Ok(());
    }

    msg_print!(Message::TimesheetsHeader(shown));
    View::timesheets(&timesheets);

    Ok(())
}
