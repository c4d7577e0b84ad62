//! Session assembly.
//!
//! One call opens the slot database, loads both collections, wires the
//! controller reactions and renders the persisted state. Front ends
//! hold the returned [`Controller`] and feed it gestures; nothing else
//! in the crate reaches for storage on its own.

use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::Path;
use std::sync::{Arc, Mutex};

use log::info;

use crate::collection::{ListError, LogList, TaskList};
use crate::db::{open_db, open_db_in_memory, DbError};
use crate::repo::slot_repo::{RepoError, SqliteSlotRepository};
use crate::ui::{Controller, Surface};

pub type SessionResult<T> = Result<T, SessionError>;

/// Error for session bootstrap failures.
#[derive(Debug)]
pub enum SessionError {
    Db(DbError),
    Repo(RepoError),
    List(ListError),
}

impl Display for SessionError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Db(err) => write!(f, "database bootstrap failed: {err}"),
            Self::Repo(err) => write!(f, "slot store bootstrap failed: {err}"),
            Self::List(err) => write!(f, "collection load failed: {err}"),
        }
    }
}

impl Error for SessionError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Db(err) => Some(err),
            Self::Repo(err) => Some(err),
            Self::List(err) => Some(err),
        }
    }
}

impl From<DbError> for SessionError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<RepoError> for SessionError {
    fn from(value: RepoError) -> Self {
        Self::Repo(value)
    }
}

impl From<ListError> for SessionError {
    fn from(value: ListError) -> Self {
        Self::List(value)
    }
}

/// Opens a session against the database file at `db_path`.
///
/// Tasks render before activity entries, exactly as persisted; the
/// startup render fires no broadcasts and writes no activity entries.
pub fn open_session<S>(
    db_path: impl AsRef<Path>,
    surface: S,
) -> SessionResult<Controller<SqliteSlotRepository, S>>
where
    S: Surface + 'static,
{
    assemble(open_db(db_path)?, surface)
}

/// Opens a session against a throwaway in-memory database.
pub fn open_session_in_memory<S>(surface: S) -> SessionResult<Controller<SqliteSlotRepository, S>>
where
    S: Surface + 'static,
{
    assemble(open_db_in_memory()?, surface)
}

fn assemble<S>(
    conn: rusqlite::Connection,
    surface: S,
) -> SessionResult<Controller<SqliteSlotRepository, S>>
where
    S: Surface + 'static,
{
    let repo = SqliteSlotRepository::try_new(Arc::new(Mutex::new(conn)))?;
    let tasks = TaskList::load(repo.clone())?;
    let logs = LogList::load(repo)?;

    let controller = Controller::new(tasks, logs, surface);
    controller.render_existing();
    info!(
        "event=session_open module=session status=ok tasks={} logs={}",
        controller.task_items().len(),
        controller.log_items().len()
    );
    Ok(controller)
}
