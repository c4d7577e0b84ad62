//! Activity log collection.
//!
//! Same persistence behavior as the task collection but bound to the
//! `logs` slot and deliberately without notifiers: log mutations are a
//! consequence of task mutations, never a trigger for further reactions.

use crate::collection::persisted_list::{ListResult, PersistedList};
use crate::repo::slot_repo::{SlotKey, SlotRepository};

/// The activity log: an append-mostly [`PersistedList`] bound to the
/// `logs` slot.
pub struct LogList<R: SlotRepository> {
    list: PersistedList<R>,
}

impl<R: SlotRepository> LogList<R> {
    /// Loads the persisted log entries; absent or corrupt slots yield an
    /// empty collection per [`PersistedList::load`].
    pub fn load(repo: R) -> ListResult<Self> {
        Ok(Self {
            list: PersistedList::load(SlotKey::Logs, repo)?,
        })
    }

    /// Appends `entry` and persists.
    pub fn add(&mut self, entry: &str) -> ListResult<()> {
        self.list.add(entry)
    }

    /// Removes every stored entry equal to `entry` and persists.
    ///
    /// Returns the removed-entry count. Removing a log entry never
    /// touches the task collection.
    pub fn remove(&mut self, entry: &str) -> ListResult<usize> {
        self.list.remove(entry)
    }

    /// Current log entries in insertion order.
    pub fn items(&self) -> &[String] {
        self.list.items()
    }

    pub fn len(&self) -> usize {
        self.list.len()
    }

    pub fn is_empty(&self) -> bool {
        self.list.is_empty()
    }
}
