//! Generic persistent collection bound to one slot key.
//!
//! # Responsibility
//! - Own one ordered in-memory sequence of strings.
//! - Mirror the sequence to its slot on every mutation, unconditionally
//!   and synchronously.
//!
//! # Invariants
//! - After `add`/`remove` return, the persisted payload decodes to
//!   exactly the in-memory sequence.
//! - An absent slot loads as an empty collection, silently.
//! - A corrupt slot loads as an empty collection; the corrupt value is
//!   overwritten so the next load is clean.

use crate::collection::payload;
use crate::repo::slot_repo::{RepoError, SlotKey, SlotRepository};
use log::warn;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type ListResult<T> = Result<T, ListError>;

/// Error for collection load and persist operations.
#[derive(Debug)]
pub enum ListError {
    Repo(RepoError),
    Encode {
        slot: SlotKey,
        source: serde_json::Error,
    },
}

impl Display for ListError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Repo(err) => write!(f, "{err}"),
            Self::Encode { slot, source } => {
                write!(f, "failed to encode slot `{slot}` payload: {source}")
            }
        }
    }
}

impl Error for ListError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Repo(err) => Some(err),
            Self::Encode { source, .. } => Some(source),
        }
    }
}

impl From<RepoError> for ListError {
    fn from(value: RepoError) -> Self {
        Self::Repo(value)
    }
}

/// Ordered sequence of strings mirrored to one key-value slot.
///
/// This is the generic half of both concrete collections; it knows
/// nothing about notifiers or display concerns.
pub struct PersistedList<R: SlotRepository> {
    key: SlotKey,
    items: Vec<String>,
    repo: R,
}

impl<R: SlotRepository> PersistedList<R> {
    /// Loads the collection bound to `key` from the slot store.
    ///
    /// Performed once per session at construction; there is no later
    /// re-read path, the in-memory sequence is authoritative afterwards.
    pub fn load(key: SlotKey, repo: R) -> ListResult<Self> {
        let raw = repo.read_slot(key)?;
        let mut list = Self {
            key,
            items: Vec::new(),
            repo,
        };

        match raw {
            None => {}
            Some(payload) => match payload::decode_items(&payload) {
                Ok(items) => list.items = items,
                Err(err) => {
                    warn!(
                        "event=slot_decode_failed module=collection status=degraded slot={key} payload_bytes={} error={err}",
                        payload.len()
                    );
                    // The next load must not see this payload again.
                    list.persist()?;
                }
            },
        }

        Ok(list)
    }

    /// Appends `item` and persists the whole sequence.
    ///
    /// No content validation happens here; the presentation layer is the
    /// gatekeeper for blank input.
    pub fn add(&mut self, item: &str) -> ListResult<()> {
        self.items.push(item.to_string());
        self.persist()
    }

    /// Removes every element equal to `item`, then persists.
    ///
    /// Returns how many elements were removed; zero is a legal outcome
    /// and still rewrites the slot.
    pub fn remove(&mut self, item: &str) -> ListResult<usize> {
        let before = self.items.len();
        self.items.retain(|existing| existing != item);
        let removed = before - self.items.len();
        self.persist()?;
        Ok(removed)
    }

    /// Current items in insertion order.
    pub fn items(&self) -> &[String] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// The slot key this collection is bound to.
    pub fn key(&self) -> SlotKey {
        self.key
    }

    fn persist(&self) -> ListResult<()> {
        let payload = payload::encode_items(&self.items).map_err(|source| ListError::Encode {
            slot: self.key,
            source,
        })?;
        self.repo.write_slot(self.key, &payload)?;
        Ok(())
    }
}
