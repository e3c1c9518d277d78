//! "My Day" agenda: today's events and the tasks that need attention.

use chrono::{NaiveDate, NaiveTime};
use serde::Serialize;

use crate::date_key::{DateKey, to_date_key};
use crate::index::EntryIndex;
use crate::record::{EventRecord, TaskRecord};

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AgendaEvent {
    pub event: EventRecord,
    /// Local start time, `None` for all-day events
    pub starts_at: Option<NaiveTime>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AgendaTask {
    pub task: TaskRecord,
    pub due: NaiveDate,
    pub overdue: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Agenda {
    pub date: NaiveDate,
    pub events: Vec<AgendaEvent>,
    pub tasks: Vec<AgendaTask>,
}

impl Agenda {
    /// Events on `today` (all-day first, then by start time) and open
    /// tasks due today or earlier (oldest first).
    pub fn build(index: &EntryIndex<'_>, today: NaiveDate) -> Self {
        let zone = index.zone();
        let key = DateKey::from_date(today);

        let mut events: Vec<AgendaEvent> = index
            .events_on(&key)
            .iter()
            .map(|event| AgendaEvent {
                event: (*event).clone(),
                starts_at: if event.all_day() {
                    None
                } else {
                    event.start().map(|start| zone.local(&start).time())
                },
            })
            .collect();
        events.sort_by_key(|e| e.starts_at);

        let mut tasks: Vec<AgendaTask> = index
            .snapshot()
            .tasks
            .iter()
            .filter(|task| !task.is_done())
            .filter_map(|task| {
                let due = to_date_key(&task.due()?, zone).date();
                (due <= today).then(|| AgendaTask {
                    task: task.clone(),
                    due,
                    overdue: due < today,
                })
            })
            .collect();
        tasks.sort_by_key(|t| t.due);

        Agenda {
            date: today,
            events,
            tasks,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty() && self.tasks.is_empty()
    }

    pub fn overdue_count(&self) -> usize {
        self.tasks.iter().filter(|t| t.overdue).count()
    }
}
