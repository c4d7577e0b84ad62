//! Presentation layer: the [`Surface`] seam front ends implement and
//! the [`Controller`] that drives it.

pub mod controller;
pub mod surface;

pub use controller::{Controller, UiError, EMPTY_INPUT_WARNING};
pub use surface::{ListLane, RowId, Surface};
