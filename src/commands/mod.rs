pub mod append;
pub mod create;
pub mod delete;
pub mod jsonify;
pub mod list;
pub mod merge;
pub mod summarize;

use crate::libs::day_log::parse_iso_date;
use crate::libs::diff_time::DiffTime;
use anyhow::Result;
use chrono::NaiveDate;
use clap::{Parser, Subcommand};

#[derive(Debug, Subcommand)]
enum Commands {
    #[command(about = "Create and store a new timesheet")]
    Create(create::CreateArgs),
    #[command(about = "Append timestamps to a stored timesheet")]
    Append(append::AppendArgs),
    #[command(about = "Summarize worked hours by day, week, month or year")]
    Summarize(summarize::SummarizeArgs),
    #[command(about = "Write a stored timesheet to a JSON file")]
    Jsonify(jsonify::JsonifyArgs),
    #[command(about = "Delete a stored timesheet")]
    Delete(delete::DeleteArgs),
    #[command(about = "Show stored timesheets")]
    List(list::ListArgs),
    #[command(about = "Merge stored timesheets into one", arg_required_else_help = true)]
    Merge(merge::MergeArgs),
}

#[derive(Debug, Parser)]
#[command(author, version, about, long_about = None)]
#[command(arg_required_else_help(true))]
pub struct Cli {
    #[command(subcommand)]
    command: Commands,
}

impl Cli {
    pub fn menu() -> Result<()> {
        let cli = Self::parse();
        match cli.command {
            Commands::Create(args) => create::cmd(args),
            Commands::Append(args) => append::cmd(args),
            Commands::Summarize(args) => summarize::cmd(args),
            Commands::Jsonify(args) => jsonify::cmd(args),
            Commands::Delete(args) => delete::cmd(args),
            Commands::List(args) => list::cmd(args),
            Commands::Merge(args) => merge::cmd(args),
        }
    }
}

/// `value_parser` for `YYYY-MM-DD` arguments.
pub(crate) fn parse_date_arg(raw: &str) -> std::result::Result<NaiveDate, String> {
    parse_iso_date(raw).map_err(|e| e.to_string())
}

/// `value_parser` for `HH:MM[:SS[.ffffff]]` arguments.
pub(crate) fn parse_time_arg(raw: &str) -> std::result::Result<DiffTime, String> {
    raw.parse::<DiffTime>().map_err(|e| e.to_string())
}
