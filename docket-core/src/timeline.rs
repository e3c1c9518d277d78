//! Relative-date grouping for list-style views.

use chrono::{Datelike, Duration, NaiveDate};
use serde::Serialize;
use std::cmp::Reverse;
use std::collections::BTreeMap;

use crate::constants::NO_DATE_LABEL;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TimelineGroup<T> {
    pub label: String,
    pub entries: Vec<T>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
enum GroupKey {
    Today,
    Yesterday,
    LastWeek,
    /// First day of the month, newest month first
    Month(Reverse<NaiveDate>),
    NoDate,
}

impl GroupKey {
    fn for_date(date: NaiveDate, today: NaiveDate) -> Self {
        match (today - date).num_days() {
            0 => GroupKey::Today,
            1 => GroupKey::Yesterday,
            2..=7 => GroupKey::LastWeek,
            _ => GroupKey::Month(Reverse(date - Duration::days(date.day0() as i64))),
        }
    }

    fn label(&self) -> String {
        match self {
            GroupKey::Today => "Today".to_string(),
            GroupKey::Yesterday => "Yesterday".to_string(),
            GroupKey::LastWeek => "Last 7 Days".to_string(),
            GroupKey::Month(Reverse(first)) => first.format("%B %Y").to_string(),
            GroupKey::NoDate => NO_DATE_LABEL.to_string(),
        }
    }
}

/// Group entries under "Today", "Yesterday", "Last 7 Days", one group per
/// month (newest first) and a trailing "No Date" group. Entries inside a
/// group are newest first; ties and undated entries keep input order.
pub fn group_timeline<T, I, F>(entries: I, mut date_fn: F, today: NaiveDate) -> Vec<TimelineGroup<T>>
where
    I: IntoIterator<Item = T>,
    F: FnMut(&T) -> Option<NaiveDate>,
{
    let mut dated: Vec<(Option<NaiveDate>, T)> = entries
        .into_iter()
        .map(|entry| (date_fn(&entry), entry))
        .collect();
    dated.sort_by_key(|(date, _)| Reverse(*date));

    let mut groups: BTreeMap<GroupKey, Vec<T>> = BTreeMap::new();
    for (date, entry) in dated {
        let key = match date {
            Some(date) => GroupKey::for_date(date, today),
            None => GroupKey::NoDate,
        };
        groups.entry(key).or_default().push(entry);
    }

    groups
        .into_iter()
        .map(|(key, entries)| TimelineGroup {
            label: key.label(),
            entries,
        })
        .collect()
}
