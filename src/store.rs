use crate::{
    Result,
    entry::{ClipEntry, EntryId, is_blank, now_timestamp},
    error::Error,
};
use rusqlite::{Connection, params};
use std::path::Path;

const SCHEMA: &str = "
    CREATE TABLE IF NOT EXISTS clips (
        id INTEGER PRIMARY KEY,
        content TEXT,
        timestamp TEXT
    )
";

/// Append-only log of clipboard entries backed by a single SQLite table.
///
/// Every write commits on its own; there are no transactions spanning
/// several operations. The connection is closed when the store is dropped.
pub struct Store {
    conn: Connection,
}

impl Store {
    /// Opens (or creates) the database file and makes sure the table exists.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if let Some(dir) = path.parent().filter(|dir| !dir.as_os_str().is_empty()) {
            if let Err(err) = std::fs::create_dir_all(dir) {
                log::warn!("failed to create {dir:?}: {err:?}");
            }
        }
        Self::init(Connection::open(path)?)
    }

    pub fn open_in_memory() -> Result<Self> {
        Self::init(Connection::open_in_memory()?)
    }

    fn init(conn: Connection) -> Result<Self> {
        conn.execute_batch(SCHEMA)?;
        Ok(Self { conn })
    }

    pub fn append(&self, content: &str) -> Result<EntryId> {
        if is_blank(content) {
            return Err(Error::InvalidInput);
        }

        self.conn.execute(
            "INSERT INTO clips (content, timestamp) VALUES (?1, ?2)",
            params![content, now_timestamp()],
        )?;
        Ok(self.conn.last_insert_rowid())
    }

    /// Up to `limit` entries, most recent (highest id) first.
    pub fn recent(&self, limit: usize) -> Result<Vec<ClipEntry>> {
        let limit = i64::try_from(limit).unwrap_or(i64::MAX);
        let mut stmt = self
            .conn
            .prepare_cached("SELECT id, content, timestamp FROM clips ORDER BY id DESC LIMIT ?1")?;

        let rows = stmt.query_map(params![limit], |row| {
            Ok(ClipEntry {
                id: row.get(0)?,
                content: row.get::<_, Option<String>>(1)?.unwrap_or_default(),
                timestamp: row.get::<_, Option<String>>(2)?.unwrap_or_default(),
            })
        })?;

        let mut entries = Vec::new();
        for entry in rows {
            entries.push(entry?);
        }
        Ok(entries)
    }

    pub fn clear(&self) -> Result<()> {
        self.conn.execute("DELETE FROM clips", [])?;
        Ok(())
    }

    pub fn close(self) -> Result<()> {
        self.conn.close().map_err(|(_, err)| Error::Storage(err))
    }

    /// Makes every write fail while reads keep working.
    #[cfg(test)]
    pub(crate) fn set_query_only(&self, on: bool) {
        self.conn.pragma_update(None, "query_only", on).unwrap();
    }

    /// Makes reads and writes fail.
    #[cfg(test)]
    pub(crate) fn drop_table(&self) {
        self.conn.execute_batch("DROP TABLE clips").unwrap();
    }
}
