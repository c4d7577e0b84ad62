//! Task collection with mutation notifiers.
//!
//! # Responsibility
//! - Persist the ordered task sequence under the `tasks` slot.
//! - Broadcast every mutation on the `added` / `removed` notifiers after
//!   the slot write has completed.
//!
//! # Invariants
//! - Exactly one `added` broadcast per `add` call.
//! - Exactly one `removed` broadcast per `remove` call, even when no
//!   stored element matched (the source behaves this way; preserving it
//!   keeps the duplicate-removal log trail observable).

use crate::collection::persisted_list::{ListResult, PersistedList};
use crate::notify::Notifier;
use crate::repo::slot_repo::{SlotKey, SlotRepository};

/// The task collection: a [`PersistedList`] bound to the `tasks` slot
/// plus the two mutation notifiers the presentation layer reacts to.
pub struct TaskList<R: SlotRepository> {
    list: PersistedList<R>,
    added: Notifier<str>,
    removed: Notifier<str>,
}

impl<R: SlotRepository> TaskList<R> {
    /// Loads the persisted tasks; absent or corrupt slots yield an empty
    /// collection per [`PersistedList::load`].
    pub fn load(repo: R) -> ListResult<Self> {
        Ok(Self {
            list: PersistedList::load(SlotKey::Tasks, repo)?,
            added: Notifier::new(),
            removed: Notifier::new(),
        })
    }

    /// Subscribes to task-added broadcasts.
    pub fn on_added(&mut self, subscriber: impl Fn(&str) + 'static) {
        self.added.subscribe(subscriber);
    }

    /// Subscribes to task-removed broadcasts.
    pub fn on_removed(&mut self, subscriber: impl Fn(&str) + 'static) {
        self.removed.subscribe(subscriber);
    }

    /// Appends `task`, persists, then broadcasts it on `added`.
    ///
    /// Subscribers observe the collection after the mutation: the slot
    /// write has already happened when they run.
    pub fn add(&mut self, task: &str) -> ListResult<()> {
        self.list.add(task)?;
        self.added.notify(task);
        Ok(())
    }

    /// Removes every stored element equal to `task`, persists, then
    /// broadcasts it on `removed` unconditionally.
    ///
    /// Returns the removed-element count (possibly zero).
    pub fn remove(&mut self, task: &str) -> ListResult<usize> {
        let removed = self.list.remove(task)?;
        self.removed.notify(task);
        Ok(removed)
    }

    /// Current tasks in insertion order.
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
