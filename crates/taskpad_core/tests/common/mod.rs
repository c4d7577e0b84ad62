use std::sync::{Arc, Mutex};

use taskpad_core::{ListLane, RowId, Surface};

/// One rendering call observed by the recording surface.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SurfaceEvent {
    Appended {
        lane: ListLane,
        id: RowId,
        text: String,
    },
    Removed {
        lane: ListLane,
        id: RowId,
    },
    Warned(String),
    EntryCleared,
}

/// Surface double that records every call for later assertions.
#[derive(Default)]
pub struct RecordingSurface {
    pub entry: String,
    pub events: Vec<SurfaceEvent>,
}

impl RecordingSurface {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Surface for RecordingSurface {
    fn entry_text(&self) -> String {
        self.entry.clone()
    }

    fn clear_entry(&mut self) {
        self.entry.clear();
        self.events.push(SurfaceEvent::EntryCleared);
    }

    fn show_warning(&mut self, message: &str) {
        self.events.push(SurfaceEvent::Warned(message.to_owned()));
    }

    fn append_row(&mut self, lane: ListLane, id: RowId, text: &str) {
        self.events.push(SurfaceEvent::Appended {
            lane,
            id,
            text: text.to_owned(),
        });
    }

    fn remove_row(&mut self, lane: ListLane, id: RowId) {
        self.events.push(SurfaceEvent::Removed { lane, id });
    }
}

/// Rows appended to `lane`, in event order.
pub fn appended(events: &[SurfaceEvent], lane: ListLane) -> Vec<(RowId, String)> {
    events
        .iter()
        .filter_map(|event| match event {
            SurfaceEvent::Appended {
                lane: event_lane,
                id,
                text,
            } if *event_lane == lane => Some((*id, text.clone())),
            _ => None,
        })
        .collect()
}

pub fn set_entry(surface: &Arc<Mutex<RecordingSurface>>, text: &str) {
    surface.lock().unwrap().entry = text.to_owned();
}

pub fn drain_events(surface: &Arc<Mutex<RecordingSurface>>) -> Vec<SurfaceEvent> {
    std::mem::take(&mut surface.lock().unwrap().events)
}
