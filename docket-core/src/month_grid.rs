//! Month view: a Sunday-first grid of day cells with bucketed entries.

use chrono::{Datelike, Duration, NaiveDate};
use serde::Serialize;

use crate::constants::WEEKDAY_HEADER;
use crate::date_key::DateKey;
use crate::index::EntryIndex;
use crate::record::{CalendarEntry, EventRecord, TaskRecord};
use crate::snapshot::Snapshot;
use crate::zone::ViewerZone;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthCell {
    pub date: NaiveDate,
    pub date_key: DateKey,
    pub is_current_month: bool,
    pub is_today: bool,
    /// All-day events, then tasks due that day
    pub all_day_entries: Vec<CalendarEntry>,
    /// Timed events ordered by local start time
    pub timed_entries: Vec<CalendarEntry>,
}

/// Rows of seven cells. Leading cells before the first of the month are
/// `None`; the last row is not padded.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthGrid {
    pub year: i32,
    pub month: u32,
    pub leading_blanks: u32,
    pub days_in_month: u32,
    pub weeks: Vec<Vec<Option<MonthCell>>>,
}

impl MonthGrid {
    /// Build the grid for the month containing `anchor`.
    pub fn from_index(anchor: NaiveDate, index: &EntryIndex<'_>, today: NaiveDate) -> Self {
        let first = first_of_month(anchor);
        let leading_blanks = first.weekday().num_days_from_sunday();
        let days = days_in_month(anchor);
        let today_key = DateKey::from_date(today);
        let zone = index.zone();

        let mut cells: Vec<Option<MonthCell>> = Vec::with_capacity((leading_blanks + days) as usize);
        cells.extend((0..leading_blanks).map(|_| None));

        for date in first.iter_days().take(days as usize) {
            let key = DateKey::from_date(date);
            let (all_day, mut timed): (Vec<&EventRecord>, Vec<&EventRecord>) = index
                .events_on(&key)
                .iter()
                .copied()
                .partition(|event| event.all_day());

            timed.sort_by_key(|event| event.start().map(|start| zone.local(&start)));

            let all_day_entries = all_day
                .into_iter()
                .map(|event| CalendarEntry::Event(event.clone()))
                .chain(
                    index
                        .tasks_on(&key)
                        .iter()
                        .map(|task| CalendarEntry::Task((*task).clone())),
                )
                .collect();

            cells.push(Some(MonthCell {
                date,
                date_key: key,
                is_current_month: true,
                is_today: key == today_key,
                all_day_entries,
                timed_entries: timed
                    .into_iter()
                    .map(|event| CalendarEntry::Event(event.clone()))
                    .collect(),
            }));
        }

        MonthGrid {
            year: first.year(),
            month: first.month(),
            leading_blanks,
            days_in_month: days,
            weeks: cells.chunks(7).map(<[Option<MonthCell>]>::to_vec).collect(),
        }
    }

    /// Build the grid straight from record collections.
    pub fn build(
        anchor: NaiveDate,
        events: &[EventRecord],
        tasks: &[TaskRecord],
        zone: &ViewerZone,
        today: NaiveDate,
    ) -> Self {
        let snapshot = Snapshot::new(events.to_vec(), tasks.to_vec());
        let index = EntryIndex::build(&snapshot, zone);
        Self::from_index(anchor, &index, today)
    }

    pub fn weekday_header() -> [&'static str; 7] {
        WEEKDAY_HEADER
    }

    /// Number of cells including leading blanks.
    pub fn cell_count(&self) -> usize {
        self.weeks.iter().map(Vec::len).sum()
    }

    /// The day cells, skipping blanks.
    pub fn days(&self) -> impl Iterator<Item = &MonthCell> {
        self.weeks.iter().flatten().flatten()
    }

    pub fn cell(&self, date: NaiveDate) -> Option<&MonthCell> {
        self.days().find(|cell| cell.date == date)
    }

    /// "February 2024"
    pub fn title(&self) -> String {
        self.days()
            .next()
            .map(|cell| cell.date.format("%B %Y").to_string())
            .unwrap_or_default()
    }
}

pub fn first_of_month(date: NaiveDate) -> NaiveDate {
    date - Duration::days(date.day0() as i64)
}

pub fn days_in_month(date: NaiveDate) -> u32 {
    let first = first_of_month(date);
    first
        .iter_days()
        .take_while(|d| d.month() == first.month())
        .count() as u32
}
