//! Named collections of day logs.
//!
//! A [`Timesheet`] maps calendar dates to [`DayLog`]s and carries the identity
//! it is stored under (`storage_name` inside the store at `storage_path`).
//! It can be merged with another timesheet, extended with new timestamps,
//! dumped to and rebuilt from JSON, and summarized through the aggregation
//! engine in [`crate::libs::summary`].
//!
//! ## JSON layout
//!
//! ```text
//! { "2022-06-27": ["02:00:00", "03:00:00"], "2022-06-29": ["00:10:00", "01:00:00"] }
//! ```

use crate::db::timesheets::Timesheets;
use crate::libs::aggregate::TimeAggregate;
use crate::libs::data_storage::{ensure_parent_dir, ensure_writable, numbered_path};
use crate::libs::day_log::{parse_iso_date, DayLog};
use crate::libs::diff_time::DiffTime;
use crate::libs::error::{IoContext, Result, TimesheetError};
use crate::libs::export::{Exporter, OutputType};
use crate::libs::messages::Message;
use crate::libs::prompt;
use crate::libs::summary::{sum_day_logs, DateRange, Summary};
use chrono::{Local, NaiveDate, NaiveDateTime};
use std::collections::{btree_map::Entry, BTreeMap, BTreeSet};
use std::fmt;
use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

/// Prefix of generated storage names (`timesheet1`, `timesheet2`, ...).
pub const DEFAULT_NAME_STEM: &str = "timesheet";

pub type Record = BTreeMap<NaiveDate, DayLog>;

/// Serialized form of a record: ISO date to ISO times.
pub type RawRecord = BTreeMap<String, Vec<String>>;

/// What happened to a save request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SaveOutcome {
    Saved,
    /// An entry with the same name exists and overwriting was not confirmed.
    Skipped,
}

#[derive(Debug, Clone)]
pub struct Timesheet {
    record: Record,
    storage_name: String,
    storage_path: PathBuf,
    data_path: Option<PathBuf>,
    output_path: Option<PathBuf>,
    creation_time: NaiveDateTime,
    last_save: Option<NaiveDateTime>,
}

impl Timesheet {
    /// Creates a timesheet stored at `storage_path`.
    ///
    /// Without an initial record it holds one empty day log dated today.
    /// Without a name it takes the next free `timesheet<n>` of the store.
    pub fn new(record: Option<Record>, storage_path: impl Into<PathBuf>, storage_name: Option<String>) -> Result<Self> {
        let record = record.unwrap_or_else(|| {
            let today = DayLog::empty(Local::now().date_naive());
            BTreeMap::from([(today.date(), today)])
        });
        Self::assemble(record, storage_path.into(), storage_name)
    }

    /// Builds a record keyed by the date of each day log.
    pub fn from_days(days: Vec<DayLog>, storage_path: impl Into<PathBuf>, storage_name: Option<String>) -> Result<Self> {
        let mut record = Record::new();
        for day in days {
            match record.entry(day.date()) {
                Entry::Vacant(slot) => {
                    slot.insert(day);
                }
                Entry::Occupied(slot) => {
                    return Err(TimesheetError::validation(format!("More than one DayLog given for {}", slot.key())));
                }
            }
        }
        Self::assemble(record, storage_path.into(), storage_name)
    }

    /// Builds a timesheet from string date keys, which must all be ISO dates.
    pub fn from_iso_record(
        record: BTreeMap<String, DayLog>,
        storage_path: impl Into<PathBuf>,
        storage_name: Option<String>,
    ) -> Result<Self> {
        let mut parsed = Record::new();
        for (key, day) in record {
            insert_once(&mut parsed, parse_iso_date(&key)?, day)?;
        }
        Self::assemble(parsed, storage_path.into(), storage_name)
    }

    pub fn from_raw_record(raw: RawRecord, storage_path: impl Into<PathBuf>, storage_name: Option<String>) -> Result<Self> {
        Self::assemble(record_from_raw(raw)?, storage_path.into(), storage_name)
    }

    /// Loads a record previously written by [`Timesheet::write_json`].
    pub fn from_json(json_path: &Path, storage_path: impl Into<PathBuf>, storage_name: Option<String>) -> Result<Self> {
        let file = File::open(json_path).at_path(json_path)?;
        let raw: RawRecord = serde_json::from_reader(BufReader::new(file))?;
        Self::from_raw_record(raw, storage_path, storage_name)
    }

    fn assemble(record: Record, storage_path: PathBuf, storage_name: Option<String>) -> Result<Self> {
        if let Some((date, day)) = record.iter().find(|(date, day)| **date != day.date()) {
            return Err(TimesheetError::validation(format!(
                "DayLog dated {} cannot be stored under {}",
                day.date(),
                date
            )));
        }

        let storage_name = match storage_name {
            Some(name) => name,
            None if storage_path.exists() => Timesheets::open(&storage_path)?.default_name()?,
            None => format!("{}1", DEFAULT_NAME_STEM),
        };

        Ok(Self {
            record,
            storage_name,
            storage_path,
            data_path: None,
            output_path: None,
            creation_time: Local::now().naive_local(),
            last_save: None,
        })
    }

    pub(crate) fn restore_metadata(
        &mut self,
        data_path: Option<PathBuf>,
        output_path: Option<PathBuf>,
        creation_time: NaiveDateTime,
        last_save: Option<NaiveDateTime>,
    ) {
        self.data_path = data_path;
        self.output_path = output_path;
        self.creation_time = creation_time;
        self.last_save = last_save;
    }

    // === ACCESSORS ===

    pub fn record(&self) -> &Record {
        &self.record
    }

    pub fn get(&self, date: NaiveDate) -> Option<&DayLog> {
        self.record.get(&date)
    }

    pub fn dates(&self) -> impl Iterator<Item = NaiveDate> + '_ {
        self.record.keys().copied()
    }

    pub fn len(&self) -> usize {
        self.record.len()
    }

    pub fn is_empty(&self) -> bool {
        self.record.is_empty()
    }

    pub fn storage_name(&self) -> &str {
        &self.storage_name
    }

    pub fn set_storage_name(&mut self, storage_name: impl Into<String>) {
        self.storage_name = storage_name.into();
    }

    pub fn storage_path(&self) -> &Path {
        &self.storage_path
    }

    pub fn set_storage_path(&mut self, storage_path: PathBuf) -> Result<()> {
        ensure_writable(&storage_path)?;
        self.storage_path = storage_path;
        Ok(())
    }

    pub fn data_path(&self) -> Option<&Path> {
        self.data_path.as_deref()
    }

    pub fn set_data_path(&mut self, data_path: Option<PathBuf>) -> Result<()> {
        if let Some(path) = &data_path {
            ensure_writable(path)?;
        }
        self.data_path = data_path;
        Ok(())
    }

    pub fn output_path(&self) -> Option<&Path> {
        self.output_path.as_deref()
    }

    pub fn set_output_path(&mut self, output_path: Option<PathBuf>) -> Result<()> {
        if let Some(path) = &output_path {
            ensure_writable(path)?;
        }
        self.output_path = output_path;
        Ok(())
    }

    pub fn creation_time(&self) -> NaiveDateTime {
        self.creation_time
    }

    pub fn last_save(&self) -> Option<NaiveDateTime> {
        self.last_save
    }

    /// Same date keys, and equal day logs under each key.
    pub fn equals(&self, other: &Timesheet) -> bool {
        self.record.len() == other.record.len()
            && self
                .record
                .iter()
                .all(|(date, day)| other.record.get(date).is_some_and(|theirs| day.equals(theirs)))
    }

    /// Copy of the data under a new storage name (generated when `None`).
    pub fn copy(&self, storage_name: Option<String>) -> Result<Timesheet> {
        let record = self.record.iter().map(|(date, day)| (*date, day.copy())).collect();
        let mut copy = Self::assemble(record, self.storage_path.clone(), storage_name)?;
        copy.data_path = self.data_path.clone();
        copy.output_path = self.output_path.clone();
        Ok(copy)
    }

    // === EDITING ===

    /// Appends timestamps to the day log of `date` (today when `None`) and saves.
    ///
    /// A missing day log is created; with `timestamps` omitted it starts with
    /// the current time. The stored entry is overwritten without asking.
    pub fn concat_timestamps(&mut self, date: Option<NaiveDate>, timestamps: Option<&[DiffTime]>) -> Result<&mut Self> {
        let date = date.unwrap_or_else(|| Local::now().date_naive());

        let previous = self.record.get(&date).cloned();
        let updated = match &previous {
            Some(day) => {
                let mut day = day.clone();
                day.concat_timestamps(timestamps)?;
                day
            }
            None => {
                let initial = match timestamps {
                    Some(list) => list.to_vec(),
                    None => vec![DiffTime::now()],
                };
                DayLog::new(date, initial)?
            }
        };
        self.record.insert(date, updated);

        // the in-memory record must not drift from the stored one
        if let Err(e) = self.save(true) {
            match previous {
                Some(day) => self.record.insert(date, day),
                None => self.record.remove(&date),
            };
            return Err(e);
        }
        Ok(self)
    }

    /// Combines this timesheet with another into a new one.
    ///
    /// Dates present on one side only are copied; shared dates are combined
    /// with [`DayLog::merge`]. The result keeps this timesheet's storage
    /// identity. Neither input is modified.
    pub fn merge(&self, other: &Timesheet) -> Result<Timesheet> {
        if std::ptr::eq(self, other) {
            return Err(TimesheetError::validation(format!(
                "Cannot merge timesheet {:?} with itself",
                self.storage_name
            )));
        }

        let own: BTreeSet<NaiveDate> = self.record.keys().copied().collect();
        let theirs: BTreeSet<NaiveDate> = other.record.keys().copied().collect();

        let mut merged = Record::new();
        for date in own.symmetric_difference(&theirs) {
            let day = self.record.get(date).or_else(|| other.record.get(date));
            if let Some(day) = day {
                merged.insert(*date, day.copy());
            }
        }
        for date in own.intersection(&theirs) {
            merged.insert(*date, self.record[date].merge(&other.record[date])?);
        }

        tracing::debug!(
            left = %self.storage_name,
            right = %other.storage_name,
            days = merged.len(),
            "merged timesheets"
        );

        let mut result = Self::assemble(merged, self.storage_path.clone(), Some(self.storage_name.clone()))?;
        result.data_path = self.data_path.clone();
        result.output_path = self.output_path.clone();
        Ok(result)
    }

    // === SUMMARIES ===

    pub fn summarize(&self, range: DateRange, aggregate: TimeAggregate) -> Summary {
        sum_day_logs(&self.record, range, aggregate)
    }

    pub fn write_json_summary(&self, output_path: &Path, range: DateRange, aggregate: TimeAggregate) -> Result<()> {
        Exporter::new(OutputType::Json, Some(output_path.to_path_buf())).export(&self.summarize(range, aggregate))
    }

    pub fn write_csv_summary(&self, output_path: &Path, range: DateRange, aggregate: TimeAggregate) -> Result<()> {
        Exporter::new(OutputType::Csv, Some(output_path.to_path_buf())).export(&self.summarize(range, aggregate))
    }

    // === JSON DUMP ===

    pub fn to_raw_record(&self) -> RawRecord {
        self.record
            .iter()
            .map(|(date, day)| {
                let times = day.timestamps().iter().map(ToString::to_string).collect();
                (date.format("%Y-%m-%d").to_string(), times)
            })
            .collect()
    }

    /// Writes the record as JSON and returns the path written.
    ///
    /// Without an explicit path the file goes next to `data_path` (or the
    /// store) as `<storage_name><n>.json`.
    pub fn write_json(&self, path: Option<&Path>) -> Result<PathBuf> {
        let path = match path {
            Some(path) => path.to_path_buf(),
            None => self.default_json_path()?,
        };

        ensure_parent_dir(&path)?;
        let file = File::create(&path).at_path(&path)?;
        let mut writer = BufWriter::new(file);
        serde_json::to_writer_pretty(&mut writer, &self.to_raw_record())?;
        writer.flush().at_path(&path)?;

        tracing::debug!(path = %path.display(), "wrote timesheet JSON");
        Ok(path)
    }

    fn default_json_path(&self) -> Result<PathBuf> {
        let anchor = self.data_path.as_deref().unwrap_or(&self.storage_path);
        let dir = if anchor.is_dir() {
            anchor.to_path_buf()
        } else {
            match anchor.parent() {
                Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
                _ => PathBuf::from("."),
            }
        };
        numbered_path(&dir, &self.storage_name, "json")
    }

    // === PERSISTENCE ===

    /// Stores this timesheet under its name.
    ///
    /// When the name is taken and `overwrite` is false, the user is asked on
    /// a terminal; without a terminal the save is skipped.
    pub fn save(&mut self, overwrite: bool) -> Result<SaveOutcome> {
        let mut store = Timesheets::open(&self.storage_path)?;

        if !overwrite && store.exists(&self.storage_name)? && !prompt::confirm(Message::ConfirmOverwrite(self.storage_name.clone()))? {
            tracing::debug!(name = %self.storage_name, "save skipped, entry exists");
            return Ok(SaveOutcome::Skipped);
        }

        let previous = self.last_save.replace(Local::now().naive_local());
        if let Err(e) = store.replace(self) {
            self.last_save = previous;
            return Err(e);
        }
        Ok(SaveOutcome::Saved)
    }

    pub fn load(storage_name: &str, storage_path: &Path) -> Result<Timesheet> {
        Timesheets::open_existing(storage_path)?.fetch(storage_name)
    }

    /// Removes a stored timesheet; returns whether it was deleted.
    ///
    /// With `confirm` set the user must agree on a terminal; without a
    /// terminal nothing is deleted.
    pub fn delete(storage_name: &str, storage_path: &Path, confirm: bool) -> Result<bool> {
        let mut store = Timesheets::open_existing(storage_path)?;
        if !store.exists(storage_name)? {
            return Err(TimesheetError::not_found(format!(
                "{:?} is not a valid key for {:?}",
                storage_name,
                storage_path.display().to_string()
            )));
        }

        if confirm && !prompt::confirm(Message::ConfirmDelete(storage_name.to_string()))? {
            return Ok(false);
        }

        store.delete(storage_name)?;
        Ok(true)
    }

    /// Names stored at `storage_path`; empty when the store does not exist.
    pub fn list(storage_path: &Path) -> Result<Vec<String>> {
        if !storage_path.exists() {
            return Ok(Vec::new());
        }
        Timesheets::open(storage_path)?.names()
    }
}

impl fmt::Display for Timesheet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "A Timesheet object named {:?} created {}",
            self.storage_name,
            self.creation_time.format("%Y-%m-%d %H:%M:%S")
        )?;
        for day in self.record.values() {
            write!(f, "{}", day)?;
        }
        Ok(())
    }
}

fn record_from_raw(raw: RawRecord) -> Result<Record> {
    let mut record = Record::new();
    for (key, times) in raw {
        let date = parse_iso_date(&key)?;
        let timestamps = times.iter().map(|t| t.parse::<DiffTime>()).collect::<Result<Vec<_>>>()?;
        insert_once(&mut record, date, DayLog::new(date, timestamps)?)?;
    }
    Ok(record)
}

/// Two keys spelled differently can name the same date; the second one is refused.
fn insert_once(record: &mut Record, date: NaiveDate, day: DayLog) -> Result<()> {
    match record.entry(date) {
        Entry::Vacant(slot) => {
            slot.insert(day);
            Ok(())
        }
        Entry::Occupied(slot) => Err(TimesheetError::validation(format!(
            "More than one DayLog given for {}",
            slot.key()
        ))),
    }
}
