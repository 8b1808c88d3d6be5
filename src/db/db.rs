use crate::libs::data_storage::ensure_parent_dir;
use crate::libs::error::Result;
use rusqlite::Connection;
use std::path::Path;

pub struct Db {
    pub conn: Connection,
}

impl Db {
    /// Opens (creating if needed) the SQLite file at `path`.
    pub fn open(path: &Path) -> Result<Db> {
        ensure_parent_dir(path)?;
        let conn: Connection = Connection::open(path)?;
        tracing::debug!(path = %path.display(), "opened timesheet store");

        Ok(Db { conn })
    }
}
