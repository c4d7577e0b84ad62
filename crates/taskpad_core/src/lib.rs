//! Core domain logic for Taskpad.
//! This crate is the single source of truth for task, activity and
//! rendering invariants; front ends only implement [`Surface`].

pub mod collection;
pub mod db;
pub mod logging;
pub mod notify;
pub mod repo;
pub mod session;
pub mod ui;

pub use collection::{ListError, LogList, TaskList};
pub use logging::{default_log_level, init_logging, logging_status};
pub use notify::Notifier;
pub use repo::slot_repo::{
    RepoError, RepoResult, SlotKey, SlotRepository, SqliteSlotRepository,
};
pub use session::{open_session, open_session_in_memory, SessionError, SessionResult};
pub use ui::{Controller, ListLane, RowId, Surface, UiError, EMPTY_INPUT_WARNING};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
