//! Persistent string collections.
//!
//! # Responsibility
//! - Keep each collection's in-memory sequence and its persisted slot
//!   byte-for-byte consistent after every mutation.
//! - Expose the task-side mutation notifiers the controller reacts to.
//!
//! # Invariants
//! - Insertion order is display order; no sorting, no de-duplication.
//! - Removal is a value filter: every equal element goes in one call.
//! - The log collection never broadcasts.

pub mod log_list;
pub mod payload;
pub mod persisted_list;
pub mod task_list;

pub use log_list::LogList;
pub use persisted_list::{ListError, ListResult, PersistedList};
pub use task_list::TaskList;
