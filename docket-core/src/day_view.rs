//! Day view: the all-day strip plus the positioned timed grid for one date.

use chrono::NaiveDate;
use serde::Serialize;

use crate::date_key::DateKey;
use crate::index::EntryIndex;
use crate::overlap::{PositionedEntry, resolve_overlaps};
use crate::position::place_event;
use crate::record::{CalendarEntry, EventRecord, TaskRecord};
use crate::snapshot::Snapshot;
use crate::time_grid::TimeGrid;
use crate::zone::ViewerZone;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DayView {
    pub date: NaiveDate,
    pub date_key: DateKey,
    pub is_today: bool,
    /// All-day events in input order, then tasks due that day in input order
    pub all_day_strip: Vec<CalendarEntry>,
    /// Timed events with slot range and lane, in start order
    pub timed_grid: Vec<PositionedEntry>,
    pub grid_config: TimeGrid,
    pub hour_labels: Vec<String>,
}

impl DayView {
    /// Assemble the view for `date` from a prebuilt index.
    pub fn from_index(
        date: NaiveDate,
        index: &EntryIndex<'_>,
        grid: &TimeGrid,
        today: NaiveDate,
    ) -> Self {
        let key = DateKey::from_date(date);
        let zone = index.zone();

        let (all_day, timed): (Vec<&EventRecord>, Vec<&EventRecord>) = index
            .events_on(&key)
            .iter()
            .copied()
            .partition(|event| event.all_day());

        let all_day_strip = all_day
            .into_iter()
            .map(|event| CalendarEntry::Event(event.clone()))
            .chain(
                index
                    .tasks_on(&key)
                    .iter()
                    .map(|task| CalendarEntry::Task((*task).clone())),
            )
            .collect();

        let placed = timed
            .into_iter()
            .filter_map(|event| {
                place_event(grid, date, event, zone)
                    .map(|placement| (CalendarEntry::Event(event.clone()), placement))
            })
            .collect();

        DayView {
            date,
            date_key: key,
            is_today: date == today,
            all_day_strip,
            timed_grid: resolve_overlaps(placed),
            grid_config: *grid,
            hour_labels: grid.hour_labels(),
        }
    }

    /// Assemble the view for `date` straight from record collections.
    pub fn assemble(
        date: NaiveDate,
        events: &[EventRecord],
        tasks: &[TaskRecord],
        grid: &TimeGrid,
        zone: &ViewerZone,
        today: NaiveDate,
    ) -> Self {
        let snapshot = Snapshot::new(events.to_vec(), tasks.to_vec());
        let index = EntryIndex::build(&snapshot, zone);
        Self::from_index(date, &index, grid, today)
    }

    pub fn is_empty(&self) -> bool {
        self.all_day_strip.is_empty() && self.timed_grid.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono_tz::Tz;

    fn utc() -> ViewerZone {
        ViewerZone::Named(Tz::UTC)
    }

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, 15).unwrap()
    }

    fn timed(id: &str, start: &str, end: &str) -> EventRecord {
        EventRecord {
            id: id.into(),
            subject: id.into(),
            start_instant: Some(start.into()),
            end_instant: Some(end.into()),
            ..Default::default()
        }
    }

    fn all_day(id: &str, start: &str) -> EventRecord {
        EventRecord {
            id: id.into(),
            subject: id.into(),
            start_instant: Some(start.into()),
            is_all_day: true,
            ..Default::default()
        }
    }

    fn task(id: &str, due: &str) -> TaskRecord {
        TaskRecord {
            id: id.into(),
            name: id.into(),
            due_date: Some(due.into()),
            ..Default::default()
        }
    }

    fn ids(entries: &[CalendarEntry]) -> Vec<&str> {
        entries.iter().map(|e| e.id()).collect()
    }

    #[test]
    fn strip_lists_all_day_events_then_tasks() {
        let events = vec![
            all_day("holiday", "2024-03-15"),
            timed("hearing", "2024-03-15T09:00:00Z", "2024-03-15T10:00:00Z"),
            all_day("deadline", "2024-03-15T00:00:00Z"),
        ];
        let tasks = vec![task("serve", "2024-03-15"), task("other-day", "2024-03-16")];

        let view = DayView::assemble(date(), &events, &tasks, &TimeGrid::default(), &utc(), date());

        assert_eq!(ids(&view.all_day_strip), vec!["holiday", "deadline", "serve"]);
        assert_eq!(view.timed_grid.len(), 1);
        assert_eq!(view.timed_grid[0].entry.id(), "hearing");
        assert!(view.is_today);
    }

    #[test]
    fn tasks_never_enter_the_timed_grid() {
        let tasks = vec![task("file", "2024-03-15")];
        let view = DayView::assemble(date(), &[], &tasks, &TimeGrid::default(), &utc(), date());

        assert!(view.timed_grid.is_empty());
        assert_eq!(ids(&view.all_day_strip), vec!["file"]);
    }

    #[test]
    fn overlapping_events_get_side_by_side_lanes() {
        let events = vec![
            timed("a", "2024-03-15T09:00:00Z", "2024-03-15T10:00:00Z"),
            timed("b", "2024-03-15T09:30:00Z", "2024-03-15T10:30:00Z"),
        ];
        let view = DayView::assemble(date(), &events, &[], &TimeGrid::default(), &utc(), date());

        let lanes: Vec<(u32, u32)> = view
            .timed_grid
            .iter()
            .map(|pe| (pe.lane, pe.lane_count))
            .collect();
        assert_eq!(lanes, vec![(0, 2), (1, 2)]);
    }

    #[test]
    fn malformed_events_are_left_out() {
        let events = vec![
            timed("ok", "2024-03-15T12:00:00Z", "2024-03-15T13:00:00Z"),
            timed("bad", "half past noon", "2024-03-15T13:00:00Z"),
        ];
        let view = DayView::assemble(date(), &events, &[], &TimeGrid::default(), &utc(), date());

        assert_eq!(view.timed_grid.len(), 1);
        assert!(view.all_day_strip.is_empty());
    }

    #[test]
    fn events_key_on_local_date_not_utc_slice() {
        // 02:00 UTC on the 16th is 22:00 on the 15th in New York
        let events = vec![timed("late", "2024-03-16T02:00:00Z", "2024-03-16T03:00:00Z")];
        let ny = ViewerZone::named("America/New_York").unwrap();

        let view = DayView::assemble(date(), &events, &[], &TimeGrid::default(), &ny, date());
        assert_eq!(view.timed_grid.len(), 1);
        // 22:00 is after the 07:00-21:00 window, so it is pinned to the last slot
        assert_eq!(view.timed_grid[0].start_slot, 27);
    }

    #[test]
    fn empty_day() {
        let view = DayView::assemble(date(), &[], &[], &TimeGrid::default(), &utc(), date());
        assert!(view.is_empty());
        assert_eq!(view.hour_labels.len(), 14);
        assert_eq!(view.date_key.to_string(), "2024-03-15");
    }
}
