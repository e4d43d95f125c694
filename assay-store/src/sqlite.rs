//! SQLite-backed implementation of the [`RawStore`] contract.

use crate::error::{StorageError, StorageResult};
use crate::RawStore;
use assay_model::{EntityKind, RawRecord};
use assay_types::EntityId;
use rusqlite::{params, Connection, OptionalExtension};
use std::path::Path;
use std::sync::{Arc, Mutex};
use tracing::debug;

/// Raw record store backed by a single SQLite database.
///
/// The connection sits behind a mutex; a separate write gate serializes
/// whole transactions so two writers cannot interleave statements inside
/// one `BEGIN`/`COMMIT` window. Clones share the same connection.
#[derive(Clone)]
pub struct SqliteStore {
    conn: Arc<Mutex<Connection>>,
    write_gate: Arc<Mutex<()>>,
}

impl SqliteStore {
    /// Opens (or creates) a store at the given path.
    pub fn open(path: &Path) -> StorageResult<Self> {
        let conn = Connection::open(path)
            .map_err(|e| StorageError::Unavailable(format!("failed to open store: {e}")))?;
        Self::from_connection(conn)
    }

    /// Opens an in-memory store (for testing).
    pub fn open_in_memory() -> StorageResult<Self> {
        let conn = Connection::open_in_memory()
            .map_err(|e| StorageError::Unavailable(format!("failed to open in-memory store: {e}")))?;
        Self::from_connection(conn)
    }

    fn from_connection(conn: Connection) -> StorageResult<Self> {
        let store = Self {
            conn: Arc::new(Mutex::new(conn)),
            write_gate: Arc::new(Mutex::new(())),
        };
        store.init_schema()?;
        Ok(store)
    }

    fn init_schema(&self) -> StorageResult<()> {
        let conn = self.conn.lock().unwrap();
        conn.execute_batch(
            "
            CREATE TABLE IF NOT EXISTS records (
                family TEXT NOT NULL,
                id TEXT NOT NULL,
                type_spec TEXT,
                data TEXT NOT NULL,
                PRIMARY KEY (family, id)
            );
            ",
        )?;
        Ok(())
    }

    fn row_to_record(
        id: String,
        type_spec: Option<String>,
        data: String,
    ) -> StorageResult<RawRecord> {
        let id = EntityId::parse(&id)
            .map_err(|e| StorageError::InvalidData(format!("bad stored id `{id}`: {e}")))?;
        let data: serde_json::Value = serde_json::from_str(&data)?;
        Ok(RawRecord { id, type_spec, data })
    }
}

impl RawStore for SqliteStore {
    fn fetch_raw(&self, kind: EntityKind, id: EntityId) -> StorageResult<Option<RawRecord>> {
        let conn = self.conn.lock().unwrap();
        let row = conn
            .query_row(
                "SELECT id, type_spec, data FROM records WHERE family = ?1 AND id = ?2",
                params![kind.family(), id.to_string()],
                |row| {
                    Ok((
                        row.get::<_, String>(0)?,
                        row.get::<_, Option<String>>(1)?,
                        row.get::<_, String>(2)?,
                    ))
                },
            )
            .optional()?;
        row.map(|(id, type_spec, data)| Self::row_to_record(id, type_spec, data))
            .transpose()
    }

    fn fetch_all_raw(&self, kind: EntityKind) -> StorageResult<Vec<RawRecord>> {
        let conn = self.conn.lock().unwrap();
        let mut stmt = conn.prepare(
            "SELECT id, type_spec, data FROM records WHERE family = ?1 ORDER BY id",
        )?;
        let rows = stmt.query_map(params![kind.family()], |row| {
            Ok((
                row.get::<_, String>(0)?,
                row.get::<_, Option<String>>(1)?,
                row.get::<_, String>(2)?,
            ))
        })?;
        let mut records = Vec::new();
        for row in rows {
            let (id, type_spec, data) = row?;
            records.push(Self::row_to_record(id, type_spec, data)?);
        }
        Ok(records)
    }

    fn fetch_raw_page(
        &self,
        kind: EntityKind,
        offset: u64,
        limit: u64,
    ) -> StorageResult<Vec<RawRecord>> {
        let conn = self.conn.lock().unwrap();
        let mut stmt = conn.prepare(
            "SELECT id, type_spec, data FROM records WHERE family = ?1 ORDER BY id LIMIT ?2 OFFSET ?3",
        )?;
        let rows = stmt.query_map(
            params![kind.family(), limit as i64, offset as i64],
            |row| {
                Ok((
                    row.get::<_, String>(0)?,
                    row.get::<_, Option<String>>(1)?,
                    row.get::<_, String>(2)?,
                ))
            },
        )?;
        let mut records = Vec::new();
        for row in rows {
            let (id, type_spec, data) = row?;
            records.push(Self::row_to_record(id, type_spec, data)?);
        }
        Ok(records)
    }

    fn put_raw(&self, kind: EntityKind, record: &RawRecord) -> StorageResult<()> {
        let data = serde_json::to_string(&record.data)?;
        let conn = self.conn.lock().unwrap();
        conn.execute(
            "INSERT OR REPLACE INTO records (family, id, type_spec, data) VALUES (?1, ?2, ?3, ?4)",
            params![
                kind.family(),
                record.id.to_string(),
                record.type_spec,
                data
            ],
        )?;
        Ok(())
    }

    fn delete_raw(&self, kind: EntityKind, id: EntityId) -> StorageResult<bool> {
        let conn = self.conn.lock().unwrap();
        let deleted = conn.execute(
            "DELETE FROM records WHERE family = ?1 AND id = ?2",
            params![kind.family(), id.to_string()],
        )?;
        Ok(deleted > 0)
    }

    fn transaction<T, E>(&self, f: impl FnOnce(&Self) -> Result<T, E>) -> Result<T, E>
    where
        E: From<StorageError>,
    {
        let _gate = self.write_gate.lock().unwrap();
        {
            let conn = self.conn.lock().unwrap();
            conn.execute_batch("BEGIN IMMEDIATE")
                .map_err(StorageError::from)?;
        }
        debug!("transaction started");

        match f(self) {
            Ok(value) => {
                let conn = self.conn.lock().unwrap();
                conn.execute_batch("COMMIT").map_err(StorageError::from)?;
                debug!("transaction committed");
                Ok(value)
            }
            Err(err) => {
                let conn = self.conn.lock().unwrap();
                // Roll back on every error path; if rollback itself fails the
                // original error still wins.
                let _ = conn.execute_batch("ROLLBACK");
                debug!("transaction rolled back");
                Err(err)
            }
        }
    }
}
