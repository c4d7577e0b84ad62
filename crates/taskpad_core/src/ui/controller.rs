//! Presentation controller: gestures in, rendering and persistence out.
//!
//! # Responsibility
//! - Own the task collection and react to its broadcasts: each added
//!   task gets a task row plus a `Task added: "<task>"` activity entry,
//!   each removal gets a `Task removed: "<task>"` entry.
//! - Validate the entry field on submit (trim, reject empty input with
//!   a warning) and keep the field in sync.
//! - Resolve row deletions through a session-local ledger of row
//!   handles, so front ends never carry list state of their own.
//!
//! # Removal semantics
//! Task removal is by value and drops every stored element equal to the
//! deleted row's text, while only the clicked row leaves the display.
//! Surviving duplicate rows stay visible; deleting one of them later
//! removes nothing from storage but still produces a fresh
//! `Task removed` entry, because the collection broadcasts every
//! removal call. Activity rows delete independently and never touch the
//! task collection.
//!
//! # Locking
//! The log collection, the surface and the row ledger sit behind
//! mutexes shared with the reaction closures. A session runs on one
//! thread, so the only hazard is re-entry: no guard may be held across
//! a call into [`TaskList::add`] or [`TaskList::remove`], because the
//! reactions take the same locks again.

use std::collections::HashMap;
use std::fmt;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use log::{debug, error, info, warn};

use crate::collection::{ListError, LogList, TaskList};
use crate::repo::slot_repo::SlotRepository;
use crate::ui::surface::{ListLane, RowId, Surface};

/// Warning shown when submit finds nothing but whitespace.
pub const EMPTY_INPUT_WARNING: &str = "please enter a task";

/// Errors surfaced by controller gestures.
#[derive(Debug)]
pub enum UiError {
    /// A collection mutation failed to persist.
    List(ListError),
    /// The handle does not name a currently rendered row.
    UnknownRow(RowId),
}

impl fmt::Display for UiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UiError::List(err) => write!(f, "list operation failed: {err}"),
            UiError::UnknownRow(id) => write!(f, "no rendered row with id {id}"),
        }
    }
}

impl std::error::Error for UiError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            UiError::List(err) => Some(err),
            UiError::UnknownRow(_) => None,
        }
    }
}

impl From<ListError> for UiError {
    fn from(err: ListError) -> Self {
        UiError::List(err)
    }
}

fn added_message(task: &str) -> String {
    format!("Task added: \"{task}\"")
}

fn removed_message(task: &str) -> String {
    format!("Task removed: \"{task}\"")
}

/// Session-local map from row handles to what they render.
///
/// Handles count up from 1 and are never reused, so a stale handle
/// from an already-deleted row can only miss, never alias.
struct RowLedger {
    next_id: u64,
    bindings: HashMap<RowId, (ListLane, String)>,
}

impl RowLedger {
    fn new() -> Self {
        Self {
            next_id: 1,
            bindings: HashMap::new(),
        }
    }

    fn bind(&mut self, lane: ListLane, text: &str) -> RowId {
        let id = RowId(self.next_id);
        self.next_id += 1;
        self.bindings.insert(id, (lane, text.to_owned()));
        id
    }

    fn unbind(&mut self, id: RowId) -> Option<(ListLane, String)> {
        self.bindings.remove(&id)
    }

    fn len(&self) -> usize {
        self.bindings.len()
    }
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    // Poison can only come from a panic on this same thread, past
    // which the guarded state is still coherent.
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Appends one activity entry to the log collection and renders it.
///
/// Runs inside reaction closures, which cannot propagate errors; a
/// failed slot write is logged and the entry still renders, keeping
/// the display aligned with the in-memory collection.
fn record_activity<R: SlotRepository, S: Surface>(
    logs: &Mutex<LogList<R>>,
    surface: &Mutex<S>,
    rows: &Mutex<RowLedger>,
    entry: &str,
) {
    if let Err(err) = lock(logs).add(entry) {
        error!("event=log_append module=ui status=error error={err}");
    }
    let id = lock(rows).bind(ListLane::Logs, entry);
    lock(surface).append_row(ListLane::Logs, id, entry);
}

/// Wires the collections to a [`Surface`] and drives both from user
/// gestures.
pub struct Controller<R: SlotRepository, S: Surface> {
    tasks: TaskList<R>,
    logs: Arc<Mutex<LogList<R>>>,
    surface: Arc<Mutex<S>>,
    rows: Arc<Mutex<RowLedger>>,
}

impl<R, S> Controller<R, S>
where
    R: SlotRepository + 'static,
    S: Surface + 'static,
{
    /// Builds the controller and registers both task reactions.
    ///
    /// Nothing renders yet; call [`Controller::render_existing`] once
    /// to bring previously persisted state onto the surface.
    pub fn new(mut tasks: TaskList<R>, logs: LogList<R>, surface: S) -> Self {
        let logs = Arc::new(Mutex::new(logs));
        let surface = Arc::new(Mutex::new(surface));
        let rows = Arc::new(Mutex::new(RowLedger::new()));

        {
            let logs = Arc::clone(&logs);
            let surface = Arc::clone(&surface);
            let rows = Arc::clone(&rows);
            tasks.on_added(move |task| {
                let id = lock(&rows).bind(ListLane::Tasks, task);
                lock(&surface).append_row(ListLane::Tasks, id, task);
                record_activity(&logs, &surface, &rows, &added_message(task));
            });
        }
        {
            let logs = Arc::clone(&logs);
            let surface = Arc::clone(&surface);
            let rows = Arc::clone(&rows);
            tasks.on_removed(move |task| {
                record_activity(&logs, &surface, &rows, &removed_message(task));
            });
        }

        Self {
            tasks,
            logs,
            surface,
            rows,
        }
    }

    /// Renders the collections as loaded from storage, tasks first,
    /// then activity entries.
    ///
    /// Rendering goes straight to the surface: no broadcasts fire and
    /// no activity entries are written, so a reopened session shows
    /// exactly what was persisted.
    pub fn render_existing(&self) {
        for task in self.tasks.items() {
            let id = lock(&self.rows).bind(ListLane::Tasks, task);
            lock(&self.surface).append_row(ListLane::Tasks, id, task);
        }
        let logs = lock(&self.logs);
        for entry in logs.items() {
            let id = lock(&self.rows).bind(ListLane::Logs, entry);
            lock(&self.surface).append_row(ListLane::Logs, id, entry);
        }
        info!(
            "event=render_existing module=ui status=ok tasks={} logs={}",
            self.tasks.len(),
            logs.len()
        );
    }

    /// Handles the submit gesture against the current entry field.
    ///
    /// Trims the field first. Whitespace-only input triggers the
    /// [`EMPTY_INPUT_WARNING`] and leaves the field untouched; anything
    /// else is added to the task collection (which renders the row and
    /// the activity entry through the reactions) and the field is
    /// cleared.
    pub fn submit(&mut self) -> Result<(), UiError> {
        let raw = lock(&self.surface).entry_text();
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            debug!("event=task_submit module=ui status=rejected reason=empty_input");
            lock(&self.surface).show_warning(EMPTY_INPUT_WARNING);
            return Ok(());
        }
        self.tasks.add(trimmed)?;
        lock(&self.surface).clear_entry();
        debug!(
            "event=task_submit module=ui status=ok task_chars={}",
            trimmed.chars().count()
        );
        Ok(())
    }

    /// Handles the delete gesture on a rendered row.
    ///
    /// The clicked row leaves the ledger and the surface, then the
    /// matching collection drops every element equal to the row's text.
    /// For a task row the removal broadcast appends a fresh activity
    /// entry; for an activity row nothing else happens.
    pub fn delete_row(&mut self, id: RowId) -> Result<(), UiError> {
        let Some((lane, text)) = lock(&self.rows).unbind(id) else {
            warn!("event=row_delete module=ui status=unknown_row row_id={id}");
            return Err(UiError::UnknownRow(id));
        };
        lock(&self.surface).remove_row(lane, id);
        let removed = match lane {
            ListLane::Tasks => self.tasks.remove(&text)?,
            ListLane::Logs => lock(&self.logs).remove(&text)?,
        };
        debug!("event=row_delete module=ui status=ok lane={lane} removed={removed}");
        Ok(())
    }

    /// Tasks currently held in memory, in insertion order.
    pub fn task_items(&self) -> Vec<String> {
        self.tasks.items().to_vec()
    }

    /// Activity entries currently held in memory, in insertion order.
    pub fn log_items(&self) -> Vec<String> {
        lock(&self.logs).items().to_vec()
    }

    /// Number of rows currently bound, across both lanes.
    pub fn rendered_rows(&self) -> usize {
        lock(&self.rows).len()
    }

    /// Shared handle to the surface, for front ends that feed the
    /// entry field or flush their own drawing state.
    pub fn surface_handle(&self) -> Arc<Mutex<S>> {
        Arc::clone(&self.surface)
    }
}
