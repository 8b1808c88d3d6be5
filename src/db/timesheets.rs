use crate::db::db::Db;
use crate::libs::data_storage::next_number;
use crate::libs::error::{Result, TimesheetError};
use crate::libs::timesheet::{RawRecord, Timesheet, DEFAULT_NAME_STEM};
use chrono::NaiveDateTime;
use rusqlite::{params, Connection, OptionalExtension};
use std::path::{Path, PathBuf};

const SCHEMA_TIMESHEETS: &str = "CREATE TABLE IF NOT EXISTS timesheets (
    name TEXT PRIMARY KEY,
    record TEXT NOT NULL,
    data_path TEXT,
    output_path TEXT,
    created_at TIMESTAMP NOT NULL,
    last_save TIMESTAMP
);";
const INSERT: &str = "INSERT INTO timesheets (name, record, data_path, output_path, created_at, last_save) VALUES (?1, ?2, ?3, ?4, ?5, ?6)";
const REPLACE: &str = "INSERT OR REPLACE INTO timesheets (name, record, data_path, output_path, created_at, last_save) VALUES (?1, ?2, ?3, ?4, ?5, ?6)";
const SELECT_BY_NAME: &str = "SELECT name, record, data_path, output_path, created_at, last_save FROM timesheets WHERE name = ?1";
const SELECT_ALL: &str = "SELECT name, record, data_path, output_path, created_at, last_save FROM timesheets ORDER BY name";
const SELECT_NAMES: &str = "SELECT name FROM timesheets ORDER BY name";
const EXISTS: &str = "SELECT 1 FROM timesheets WHERE name = ?1";
const DELETE_BY_NAME: &str = "DELETE FROM timesheets WHERE name = ?1";

const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S%.f";

/// A stored row before its record is validated.
struct TimesheetRow {
    name: String,
    record: String,
    data_path: Option<String>,
    output_path: Option<String>,
    created_at: String,
    last_save: Option<String>,
}

/// Named timesheets kept in one store file.
pub struct Timesheets {
    conn: Connection,
    path: PathBuf,
}

impl Timesheets {
    /// Opens the store at `path`, creating the file and table when missing.
    pub fn open(path: &Path) -> Result<Self> {
        let db = Db::open(path)?;
        db.conn.execute(SCHEMA_TIMESHEETS, [])?;
        Ok(Timesheets {
            conn: db.conn,
            path: path.to_path_buf(),
        })
    }

    /// Opens an existing store, failing with `NotFound` when the file is absent.
    pub fn open_existing(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(TimesheetError::not_found(format!("{:?} does not exist", path.display().to_string())));
        }
        Self::open(path)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn exists(&mut self, name: &str) -> Result<bool> {
        let found = self.conn.query_row(EXISTS, params![name], |_| Ok(())).optional()?;
        Ok(found.is_some())
    }

    /// Stores a new entry; fails if the name is taken.
    pub fn insert(&mut self, timesheet: &Timesheet) -> Result<()> {
        if self.exists(timesheet.storage_name())? {
            return Err(TimesheetError::validation(format!(
                "Timesheet {:?} already exists in {}",
                timesheet.storage_name(),
                self.path.display()
            )));
        }
        self.write(INSERT, timesheet)
    }

    /// Stores an entry, overwriting any existing one of the same name.
    pub fn replace(&mut self, timesheet: &Timesheet) -> Result<()> {
        self.write(REPLACE, timesheet)
    }

    pub fn fetch(&mut self, name: &str) -> Result<Timesheet> {
        let row = self
            .conn
            .query_row(SELECT_BY_NAME, params![name], Self::map_row)
            .optional()?
            .ok_or_else(|| TimesheetError::not_found(format!("{:?} is not a valid key for {:?}", name, self.path.display().to_string())))?;
        self.build(row)
    }

    pub fn names(&mut self) -> Result<Vec<String>> {
        let mut stmt = self.conn.prepare(SELECT_NAMES)?;
        let name_iter = stmt.query_map([], |row| row.get::<_, String>(0))?;

        let mut names = Vec::new();
        for name in name_iter {
            names.push(name?);
        }
        Ok(names)
    }

    pub fn list(&mut self) -> Result<Vec<Timesheet>> {
        let rows = {
            let mut stmt = self.conn.prepare(SELECT_ALL)?;
            let row_iter = stmt.query_map([], Self::map_row)?;
            let mut rows = Vec::new();
            for row in row_iter {
                rows.push(row?);
            }
            rows
        };
        rows.into_iter().map(|row| self.build(row)).collect()
    }

    pub fn delete(&mut self, name: &str) -> Result<()> {
        let affected = self.conn.execute(DELETE_BY_NAME, params![name])?;
        if affected == 0 {
            return Err(TimesheetError::not_found(format!(
                "{:?} is not a valid key for {:?}",
                name,
                self.path.display().to_string()
            )));
        }
        tracing::debug!(name, "deleted timesheet");
        Ok(())
    }

    /// `timesheet<n>` with the first `n` not used by a stored name.
    pub fn default_name(&mut self) -> Result<String> {
        let names = self.names()?;
        Ok(format!("{}{}", DEFAULT_NAME_STEM, next_number(DEFAULT_NAME_STEM, &names)))
    }

    fn write(&mut self, statement: &str, timesheet: &Timesheet) -> Result<()> {
        let record = serde_json::to_string(&timesheet.to_raw_record())?;
        self.conn.execute(
            statement,
            params![
                timesheet.storage_name(),
                record,
                timesheet.data_path().map(|p| p.display().to_string()),
                timesheet.output_path().map(|p| p.display().to_string()),
                timesheet.creation_time().format(TIMESTAMP_FORMAT).to_string(),
                timesheet.last_save().map(|t| t.format(TIMESTAMP_FORMAT).to_string()),
            ],
        )?;
        tracing::debug!(name = timesheet.storage_name(), days = timesheet.len(), "stored timesheet");
        Ok(())
    }

    fn map_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<TimesheetRow> {
        Ok(TimesheetRow {
            name: row.get(0)?,
            record: row.get(1)?,
            data_path: row.get(2)?,
            output_path: row.get(3)?,
            created_at: row.get(4)?,
            last_save: row.get(5)?,
        })
    }

    fn build(&self, row: TimesheetRow) -> Result<Timesheet> {
        let raw: RawRecord = serde_json::from_str(&row.record)?;
        let mut timesheet = Timesheet::from_raw_record(raw, &self.path, Some(row.name))?;
        timesheet.restore_metadata(
            row.data_path.map(PathBuf::from),
            row.output_path.map(PathBuf::from),
            parse_timestamp(&row.created_at)?,
            row.last_save.as_deref().map(parse_timestamp).transpose()?,
        );
        Ok(timesheet)
    }
}

fn parse_timestamp(raw: &str) -> Result<NaiveDateTime> {
    NaiveDateTime::parse_from_str(raw, TIMESTAMP_FORMAT)
        .map_err(|_| TimesheetError::validation(format!("Stored timestamp {:?} is malformed", raw)))
}
