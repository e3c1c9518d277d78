//! The atomic input value for one render.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::{DocketError, DocketResult};
use crate::record::{CalendarEntry, EventRecord, TaskRecord};

/// Events and tasks as fetched at one point in time. A snapshot is passed
/// whole and never modified while a view is derived from it.
///
/// Records that do not deserialize are dropped one by one; the rest of the
/// snapshot is kept.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "RawSnapshot")]
pub struct Snapshot {
    #[serde(default)]
    pub events: Vec<EventRecord>,
    #[serde(default)]
    pub tasks: Vec<TaskRecord>,
}

#[derive(Deserialize)]
struct RawSnapshot {
    #[serde(default)]
    events: Vec<serde_json::Value>,
    #[serde(default)]
    tasks: Vec<serde_json::Value>,
}

impl From<RawSnapshot> for Snapshot {
    fn from(raw: RawSnapshot) -> Self {
        Snapshot {
            events: keep_valid(raw.events, "event"),
            tasks: keep_valid(raw.tasks, "task"),
        }
    }
}

fn keep_valid<T: DeserializeOwned>(values: Vec<serde_json::Value>, what: &str) -> Vec<T> {
    values
        .into_iter()
        .enumerate()
        .filter_map(|(i, value)| match serde_json::from_value(value) {
            Ok(record) => Some(record),
            Err(e) => {
                log::warn!("Skipping malformed {} at index {}: {}", what, i, e);
                None
            }
        })
        .collect()
}

impl Snapshot {
    pub fn new(events: Vec<EventRecord>, tasks: Vec<TaskRecord>) -> Self {
        Snapshot { events, tasks }
    }

    pub fn from_json(json: &str) -> DocketResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn load(path: &Path) -> DocketResult<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            DocketError::Snapshot(format!("Could not read {}: {}", path.display(), e))
        })?;

        Self::from_json(&content)
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty() && self.tasks.is_empty()
    }

    /// All records as calendar entries, events first.
    pub fn entries(&self) -> impl Iterator<Item = CalendarEntry> + '_ {
        self.events
            .iter()
            .cloned()
            .map(CalendarEntry::Event)
            .chain(self.tasks.iter().cloned().map(CalendarEntry::Task))
    }
}
