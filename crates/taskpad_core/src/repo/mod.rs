//! Slot storage contracts and persistence implementations.
//!
//! # Responsibility
//! - Define the key-value slot access contract used by the collections.
//! - Isolate SQLite details from collection and controller code.
//!
//! # Invariants
//! - Implementations must be safe to clone and share within one session.
//! - An absent slot is a normal outcome (`None`), never an error.

pub mod slot_repo;
