//! `merge`: combine stored timesheets, possibly from different stores.
//!
//! Sources are given as `name=path`. They are merged left to right and the
//! result is saved under `--storage_name` (default: the first source's name)
//! in the store at `--storage_path`. Nothing is written if any merge fails.

use crate::{
    libs::{
        data_storage::DataStorage,
        error::TimesheetError,
        messages::Message,
        timesheet::{SaveOutcome, Timesheet},
    },
    msg_success, msg_warning,
};
use anyhow::Result;
use clap::Args;
use std::path::PathBuf;
use std::str::FromStr;

#[derive(Debug, Args)]
pub struct MergeArgs {
    /// Timesheets to merge, as `name=path`
    #[arg(required = true, num_args = 1.., value_parser = parse_merge_source)]
    sources: Vec<MergeSource>,

    /// Name for the merged timesheet
    #[arg(long = "storage_name")]
    storage_name: Option<String>,

    /// Store receiving the merged timesheet
    #[arg(long = "storage_path")]
    storage_path: Option<PathBuf>,

    /// Overwrite an existing entry without asking
    #[arg(short, long)]
    force: bool,
}

/// One `name=path` merge operand.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MergeSource {
    pub name: String,
    pub path: PathBuf,
}

impl FromStr for MergeSource {
    type Err = TimesheetError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        match raw.split_once('=') {
            Some((name, path)) if !name.trim().is_empty() && !path.trim().is_empty() => Ok(MergeSource {
                name: name.trim().to_string(),
                path: PathBuf::from(path.trim()),
            }),
            _ => Err(TimesheetError::validation(Message::InvalidMergeSource(raw.to_string()).to_string())),
        }
    }
}

fn parse_merge_source(raw: &str) -> Result<MergeSource, String> {
    raw.parse().map_err(|e: TimesheetError| e.to_string())
}

pub fn cmd(args: MergeArgs) -> Result<()> {
    let merged = merge_sources(&args.sources)?;
    let Some(mut merged) = merged else {
        return Err(TimesheetError::validation(Message::MergeNeedsSources.to_string()).into());
    };

    if let Some(name) = args.storage_name {
        merged.set_storage_name(name);
    }
    merged.set_storage_path(DataStorage::resolve(args.storage_path))?;

    let labels: Vec<String> = args.sources.iter().map(|s| format!("{}={}", s.name, s.path.display())).collect();
    match merged.save(args.force)? {
        SaveOutcome::Saved => msg_success!(Message::TimesheetMerged(labels, merged.storage_name().to_string())),
        SaveOutcome::Skipped => msg_warning!(Message::OverwriteRefused(merged.storage_name().to_string())),
    }

    Ok(())
}

/// Loads and folds the sources; `None` when there are none.
pub fn merge_sources(sources: &[MergeSource]) -> Result<Option<Timesheet>, TimesheetError> {
    for (i, source) in sources.iter().enumerate() {
        if sources[..i].contains(source) {
            return Err(TimesheetError::validation(format!(
                "Cannot merge timesheet {:?} with itself",
                source.name
            )));
        }
    }

    let mut merged: Option<Timesheet> = None;
    for source in sources {
        let next = Timesheet::load(&source.name, &source.path)?;
        merged = Some(match merged {
            Some(acc) => acc.merge(&next)?,
            None => next,
        });
    }
    Ok(merged)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_merge_source() {
        let source: MergeSource = "work=/tmp/store".parse().unwrap();
        assert_eq!(source.name, "work");
        assert_eq!(source.path, PathBuf::from("/tmp/store"));
    }

    #[test]
    fn test_parse_merge_source_rejects_missing_parts() {
        for raw in ["work", "=path", "work=", ""] {
            let err = raw.parse::<MergeSource>().unwrap_err();
            assert!(err.is_validation(), "{raw:?} should be rejected");
        }
    }

    #[test]
    fn test_duplicate_source_is_self_merge() {
        let source: MergeSource = "work=/nonexistent/store".parse().unwrap();
        let err = merge_sources(&[source.clone(), source]).unwrap_err();
        assert!(err.is_validation());
    }

    #[test]
    fn test_no_sources() {
        assert!(merge_sources(&[]).unwrap().is_none());
    }
}
