//! Slot repository contract and SQLite implementation.
//!
//! # Responsibility
//! - Provide flat key-value slot access over the `slots` table.
//! - Keep SQL details inside the core persistence boundary.
//!
//! # Invariants
//! - Writers must overwrite the full slot value in one statement.
//! - Construction must reject connections without applied migrations.

use crate::db::migrations::latest_version;
use crate::db::DbError;
use rusqlite::{Connection, OptionalExtension};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::sync::{Arc, Mutex, MutexGuard};

pub type RepoResult<T> = Result<T, RepoError>;

/// Error for slot persistence operations and repository bootstrap.
#[derive(Debug)]
pub enum RepoError {
    Db(DbError),
    /// The connection has not been opened through [`crate::db::open_db`].
    UninitializedConnection {
        expected_version: u32,
        actual_version: u32,
    },
    MissingRequiredTable(&'static str),
    /// The shared connection lock was poisoned by a panicking holder.
    LockPoisoned,
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Db(err) => write!(f, "{err}"),
            Self::UninitializedConnection {
                expected_version,
                actual_version,
            } => write!(
                f,
                "connection schema version {actual_version} is behind expected {expected_version}; open it via db::open_db"
            ),
            Self::MissingRequiredTable(table) => {
                write!(f, "required table `{table}` is missing")
            }
            Self::LockPoisoned => write!(f, "slot store connection lock is poisoned"),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Db(err) => Some(err),
            _ => None,
        }
    }
}

impl From<DbError> for RepoError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// Fixed persistence key owned by one collection.
///
/// The literal key strings are part of the stored format and must not
/// change between writer and reader.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SlotKey {
    Tasks,
    Logs,
}

impl SlotKey {
    /// Returns the literal key under which the slot is stored.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Tasks => "tasks",
            Self::Logs => "logs",
        }
    }
}

impl Display for SlotKey {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Repository interface for whole-slot reads and writes.
pub trait SlotRepository {
    /// Reads the raw payload stored at `key`, or `None` when the slot has
    /// never been written.
    fn read_slot(&self, key: SlotKey) -> RepoResult<Option<String>>;

    /// Stores `payload` at `key`, replacing any prior value.
    fn write_slot(&self, key: SlotKey, payload: &str) -> RepoResult<()>;
}

/// SQLite-backed slot repository.
///
/// Cloning yields another handle to the same shared connection, so both
/// collections of one session observe one database.
#[derive(Clone)]
pub struct SqliteSlotRepository {
    conn: Arc<Mutex<Connection>>,
}

impl SqliteSlotRepository {
    /// Wraps a shared connection after verifying it is ready for slot use.
    ///
    /// # Errors
    /// - `UninitializedConnection` when migrations have not been applied.
    /// - `Db(SchemaTooNew)` when the database is from a newer build.
    /// - `MissingRequiredTable` when the `slots` table is absent.
    pub fn try_new(conn: Arc<Mutex<Connection>>) -> RepoResult<Self> {
        {
            let guard = lock_conn(&conn)?;
            ensure_ready(&guard)?;
        }
        Ok(Self { conn })
    }

    fn lock(&self) -> RepoResult<MutexGuard<'_, Connection>> {
        lock_conn(&self.conn)
    }
}

impl SlotRepository for SqliteSlotRepository {
    fn read_slot(&self, key: SlotKey) -> RepoResult<Option<String>> {
        let conn = self.lock()?;
        let value = conn
            .query_row(
                "SELECT value FROM slots WHERE key = ?1;",
                [key.as_str()],
                |row| row.get::<_, String>(0),
            )
            .optional()?;
        Ok(value)
    }

    fn write_slot(&self, key: SlotKey, payload: &str) -> RepoResult<()> {
        let conn = self.lock()?;
        conn.execute(
            "INSERT INTO slots (key, value) VALUES (?1, ?2)
             ON CONFLICT(key) DO UPDATE SET value = excluded.value;",
            [key.as_str(), payload],
        )?;
        Ok(())
    }
}

fn lock_conn(conn: &Arc<Mutex<Connection>>) -> RepoResult<MutexGuard<'_, Connection>> {
    conn.lock().map_err(|_| RepoError::LockPoisoned)
}

fn ensure_ready(conn: &Connection) -> RepoResult<()> {
    let expected = latest_version();
    let actual = conn.query_row("PRAGMA user_version;", [], |row| row.get::<_, u32>(0))?;

    if actual > expected {
        return Err(RepoError::Db(DbError::SchemaTooNew {
            db_version: actual,
            supported: expected,
        }));
    }
    if actual < expected {
        return Err(RepoError::UninitializedConnection {
            expected_version: expected,
            actual_version: actual,
        });
    }

    let slots_exists: i64 = conn.query_row(
        "SELECT EXISTS(
            SELECT 1 FROM sqlite_master WHERE type = 'table' AND name = 'slots'
         );",
        [],
        |row| row.get(0),
    )?;
    if slots_exists == 0 {
        return Err(RepoError::MissingRequiredTable("slots"));
    }

    Ok(())
}
