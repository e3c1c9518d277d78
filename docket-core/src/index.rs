//! Date buckets for one snapshot, shared by every view derived from it.

use crate::date_key::{Buckets, DateKey, bucket_by_date_key, to_date_key};
use crate::record::{CalendarEntry, EventRecord, TaskRecord};
use crate::snapshot::Snapshot;
use crate::zone::ViewerZone;

/// Events keyed by local start date and tasks keyed by due date.
///
/// Build one index per snapshot and hand it to as many Day and Month
/// builds as the current render needs.
#[derive(Debug, Clone)]
pub struct EntryIndex<'a> {
    snapshot: &'a Snapshot,
    zone: ViewerZone,
    pub events: Buckets<&'a EventRecord>,
    pub tasks: Buckets<&'a TaskRecord>,
}

impl<'a> EntryIndex<'a> {
    pub fn build(snapshot: &'a Snapshot, zone: &ViewerZone) -> Self {
        let events = bucket_by_date_key(snapshot.events.iter(), |event| {
            event.start().map(|start| to_date_key(&start, zone))
        });
        let tasks = bucket_by_date_key(snapshot.tasks.iter(), |task| {
            task.due().map(|due| to_date_key(&due, zone))
        });

        for event in &events.undated {
            log::debug!("Event '{}' has no usable start; leaving it unscheduled", event.id);
        }
        for task in &tasks.undated {
            if task.due_date.is_some() {
                log::debug!("Task '{}' has an unparsable due date", task.id);
            }
        }

        EntryIndex {
            snapshot,
            zone: *zone,
            events,
            tasks,
        }
    }

    pub fn snapshot(&self) -> &'a Snapshot {
        self.snapshot
    }

    pub fn zone(&self) -> &ViewerZone {
        &self.zone
    }

    pub fn events_on(&self, key: &DateKey) -> &[&'a EventRecord] {
        self.events.get(key)
    }

    pub fn tasks_on(&self, key: &DateKey) -> &[&'a TaskRecord] {
        self.tasks.get(key)
    }

    /// Entries that cannot be placed on any grid: events without a
    /// parsable start and tasks without a parsable due date.
    pub fn unscheduled(&self) -> Vec<CalendarEntry> {
        self.events
            .undated
            .iter()
            .map(|e| CalendarEntry::Event((*e).clone()))
            .chain(
                self.tasks
                    .undated
                    .iter()
                    .map(|t| CalendarEntry::Task((*t).clone())),
            )
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono_tz::Tz;

    fn event(id: &str, start: Option<&str>) -> EventRecord {
        EventRecord {
            id: id.into(),
            start_instant: start.map(String::from),
            ..Default::default()
        }
    }

    fn task(id: &str, due: Option<&str>) -> TaskRecord {
        TaskRecord {
            id: id.into(),
            due_date: due.map(String::from),
            ..Default::default()
        }
    }

    #[test]
    fn every_entry_lands_in_exactly_one_place() {
        let snapshot = Snapshot::new(
            vec![
                event("e1", Some("2024-03-15T09:00:00Z")),
                event("e2", Some("not a date")),
                event("e3", None),
                event("e4", Some("2024-03-16")),
            ],
            vec![
                task("t1", Some("2024-03-15")),
                task("t2", None),
                task("t3", Some("15 March")),
            ],
        );
        let index = EntryIndex::build(&snapshot, &ViewerZone::Named(Tz::UTC));

        assert_eq!(index.events.dated_len() + index.events.undated.len(), 4);
        assert_eq!(index.tasks.dated_len() + index.tasks.undated.len(), 3);

        let unscheduled: Vec<String> = index
            .unscheduled()
            .iter()
            .map(|e| e.id().to_string())
            .collect();
        assert_eq!(unscheduled, vec!["e2", "e3", "t2", "t3"]);

        let key: DateKey = "2024-03-15".parse().unwrap();
        assert_eq!(index.events_on(&key).len(), 1);
        assert_eq!(index.tasks_on(&key)[0].id, "t1");
    }
}
