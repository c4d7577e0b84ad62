//! Display abstraction the controller renders through.
//!
//! The core never talks to a concrete screen. Front ends implement
//! [`Surface`] over whatever they draw on (terminal lines, a widget
//! tree) and the controller drives it through row handles it mints
//! itself. Surface operations are infallible by contract: a front end
//! that cannot draw has nothing useful to return to the caller, so it
//! deals with the failure locally.

use std::fmt;

/// Which of the two visible lists a row belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ListLane {
    Tasks,
    Logs,
}

impl ListLane {
    pub fn as_str(&self) -> &'static str {
        match self {
            ListLane::Tasks => "tasks",
            ListLane::Logs => "logs",
        }
    }
}

impl fmt::Display for ListLane {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Opaque handle for one rendered row.
///
/// Minted by the controller, unique for the lifetime of a session and
/// never reused. Front ends treat it as an identity token; the numeric
/// value carries no meaning beyond display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RowId(pub(crate) u64);

impl RowId {
    /// Raw session-local value, for prompts like `:del 3`.
    pub fn value(&self) -> u64 {
        self.0
    }

    /// Rebuilds a handle from a value previously shown to the user.
    ///
    /// Values that were never handed out simply resolve to no row.
    pub fn from_value(value: u64) -> Self {
        Self(value)
    }
}

impl fmt::Display for RowId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// What a front end must provide for the controller to render on.
///
/// One entry field, one warning channel and two row lanes. Methods are
/// called from the same thread that drives the controller.
pub trait Surface {
    /// Current contents of the entry field, untrimmed.
    fn entry_text(&self) -> String;

    /// Clears the entry field after a successful submit.
    fn clear_entry(&mut self);

    /// Shows a blocking or prominent warning, e.g. for empty input.
    fn show_warning(&mut self, message: &str);

    /// Appends a row with the given handle and text to a lane.
    fn append_row(&mut self, lane: ListLane, id: RowId, text: &str);

    /// Removes the row previously appended under `id`.
    ///
    /// Called at most once per handle. Removing one row never implies
    /// anything about other rows showing equal text.
    fn remove_row(&mut self, lane: ListLane, id: RowId);
}
