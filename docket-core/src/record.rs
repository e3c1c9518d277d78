//! Calendar records as they arrive from the record store.
//!
//! Records are externally owned snapshots. The engine never mutates them;
//! views hold clones of the records they place.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

use crate::entry_time::EntryTime;

/// Category of a calendar event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum EventType {
    #[serde(rename = "Court Hearing")]
    CourtHearing,
    #[serde(rename = "Client Meeting")]
    ClientMeeting,
    Deposition,
    #[serde(rename = "Filing Deadline")]
    FilingDeadline,
    #[default]
    #[serde(other)]
    Misc,
}

impl EventType {
    pub fn label(&self) -> &'static str {
        match self {
            EventType::CourtHearing => "Court Hearing",
            EventType::ClientMeeting => "Client Meeting",
            EventType::Deposition => "Deposition",
            EventType::FilingDeadline => "Filing Deadline",
            EventType::Misc => "Misc",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Priority {
    High,
    Medium,
    Low,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TaskStatus {
    #[serde(rename = "To-Do")]
    ToDo,
    #[serde(rename = "In-Progress")]
    InProgress,
    Done,
}

/// A scheduled event (hearing, meeting, deadline...)
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventRecord {
    pub id: String,
    #[serde(default)]
    pub subject: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_instant: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_instant: Option<String>,
    #[serde(default, deserialize_with = "null_as_false")]
    pub is_all_day: bool,
    #[serde(default, rename = "type")]
    pub event_type: EventType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub matter_label: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
}

impl EventRecord {
    pub fn start(&self) -> Option<EntryTime> {
        self.start_instant.as_deref().and_then(EntryTime::parse)
    }

    pub fn end(&self) -> Option<EntryTime> {
        self.end_instant.as_deref().and_then(EntryTime::parse)
    }

    /// Whether the event belongs in the all-day strip. A date-only start
    /// counts as all-day even when the flag is unset.
    pub fn all_day(&self) -> bool {
        self.is_all_day || self.start().is_some_and(|s| s.is_date_only())
    }
}

/// A task with an optional date-only due date
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskRecord {
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub due_date: Option<String>,
    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub priority: Option<Priority>,
    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub status: Option<TaskStatus>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub matter_label: Option<String>,
}

impl TaskRecord {
    pub fn due(&self) -> Option<EntryTime> {
        self.due_date.as_deref().and_then(EntryTime::parse)
    }

    pub fn is_done(&self) -> bool {
        self.status == Some(TaskStatus::Done)
    }
}

/// Unknown or mistyped values read as absent instead of failing the record.
fn lenient<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(value.and_then(|v| serde_json::from_value(v).ok()))
}

fn null_as_false<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    lenient::<D, bool>(deserializer).map(Option::unwrap_or_default)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum EntryKind {
    Event,
    Task,
}

/// Anything that can appear on the calendar.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum CalendarEntry {
    Event(EventRecord),
    Task(TaskRecord),
}

impl CalendarEntry {
    pub fn id(&self) -> &str {
        match self {
            CalendarEntry::Event(e) => &e.id,
            CalendarEntry::Task(t) => &t.id,
        }
    }

    pub fn title(&self) -> &str {
        match self {
            CalendarEntry::Event(e) => &e.subject,
            CalendarEntry::Task(t) => &t.name,
        }
    }

    pub fn kind(&self) -> EntryKind {
        match self {
            CalendarEntry::Event(_) => EntryKind::Event,
            CalendarEntry::Task(_) => EntryKind::Task,
        }
    }

    pub fn matter_label(&self) -> Option<&str> {
        match self {
            CalendarEntry::Event(e) => e.matter_label.as_deref(),
            CalendarEntry::Task(t) => t.matter_label.as_deref(),
        }
    }

    /// The instant the entry is dated by: event start or task due date.
    pub fn anchor_time(&self) -> Option<EntryTime> {
        match self {
            CalendarEntry::Event(e) => e.start(),
            CalendarEntry::Task(t) => t.due(),
        }
    }
}

impl From<EventRecord> for CalendarEntry {
    fn from(event: EventRecord) -> Self {
        CalendarEntry::Event(event)
    }
}

impl From<TaskRecord> for CalendarEntry {
    fn from(task: TaskRecord) -> Self {
        CalendarEntry::Task(task)
    }
}

impl fmt::Display for CalendarEntry {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.title())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn event_deserializes_from_camel_case() {
        let json = r#"{
            "id": "rec1",
            "subject": "Mention before Judge Otieno",
            "startInstant": "2024-03-15T09:00:00Z",
            "endInstant": "2024-03-15T10:00:00Z",
            "isAllDay": false,
            "type": "Court Hearing",
            "matterLabel": "Kamau v. Njoroge"
        }"#;

        let event: EventRecord = serde_json::from_str(json).unwrap();
        assert_eq!(event.event_type, EventType::CourtHearing);
        assert_eq!(event.matter_label.as_deref(), Some("Kamau v. Njoroge"));
        assert!(event.start().is_some());
        assert!(!event.all_day());
    }

    #[test]
    fn unknown_event_type_is_misc() {
        let json = r#"{"id": "rec2", "subject": "Lunch", "type": "Social"}"#;
        let event: EventRecord = serde_json::from_str(json).unwrap();
        assert_eq!(event.event_type, EventType::Misc);
        assert_eq!(event.start(), None);
    }

    #[test]
    fn date_only_start_counts_as_all_day() {
        let event = EventRecord {
            id: "rec3".into(),
            start_instant: Some("2024-03-15".into()),
            ..Default::default()
        };
        assert!(event.all_day());
    }

    #[test]
    fn task_status_and_priority_use_display_names() {
        let json = r#"{"id": "t1", "name": "File defence", "dueDate": "2024-03-15",
                       "priority": "High", "status": "In-Progress"}"#;
        let task: TaskRecord = serde_json::from_str(json).unwrap();
        assert_eq!(task.priority, Some(Priority::High));
        assert_eq!(task.status, Some(TaskStatus::InProgress));
        assert!(!task.is_done());
        assert!(task.due().unwrap().is_date_only());
    }

    #[test]
    fn unknown_priority_and_status_read_as_absent() {
        let json = r#"{"id": "t3", "name": "Chase client", "priority": "Urgent",
                       "status": 7}"#;
        let task: TaskRecord = serde_json::from_str(json).unwrap();
        assert_eq!(task.priority, None);
        assert_eq!(task.status, None);
        assert!(!task.is_done());
    }

    #[test]
    fn null_all_day_flag_is_false() {
        let json = r#"{"id": "rec4", "subject": "Call", "isAllDay": null,
                       "startInstant": "2024-03-15T09:00:00Z"}"#;
        let event: EventRecord = serde_json::from_str(json).unwrap();
        assert!(!event.is_all_day);
        assert!(!event.all_day());
    }

    #[test]
    fn entry_serializes_with_kind_tag() {
        let entry = CalendarEntry::from(TaskRecord {
            id: "t2".into(),
            name: "Draft submissions".into(),
            ..Default::default()
        });
        let value = serde_json::to_value(&entry).unwrap();
        assert_eq!(value["kind"], "task");
        assert_eq!(value["name"], "Draft submissions");
    }
}
