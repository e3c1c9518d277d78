//! Canonical local-date keys and date bucketing.

use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use crate::entry_time::EntryTime;
use crate::error::DocketError;
use crate::zone::ViewerZone;

/// A calendar day on the viewer's clock, written `YYYY-MM-DD`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct DateKey(NaiveDate);

impl DateKey {
    pub fn from_date(date: NaiveDate) -> Self {
        DateKey(date)
    }

    pub fn date(&self) -> NaiveDate {
        self.0
    }
}

impl From<NaiveDate> for DateKey {
    fn from(date: NaiveDate) -> Self {
        DateKey(date)
    }
}

impl fmt::Display for DateKey {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.0.format("%Y-%m-%d"))
    }
}

impl FromStr for DateKey {
    type Err = DocketError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d")
            .map(DateKey)
            .map_err(|_| DocketError::InvalidDate(s.to_string()))
    }
}

impl Serialize for DateKey {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for DateKey {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

/// The local calendar date of `time`, as the viewer's device would show it.
pub fn to_date_key(time: &EntryTime, zone: &ViewerZone) -> DateKey {
    DateKey(zone.local(time).date())
}

/// Entries grouped by date. `undated` holds the entries the key function
/// could not date; grid views ignore it.
#[derive(Debug, Clone, PartialEq)]
pub struct Buckets<T> {
    pub by_key: HashMap<DateKey, Vec<T>>,
    pub undated: Vec<T>,
}

impl<T> Buckets<T> {
    /// Entries on `key`, in input order.
    pub fn get(&self, key: &DateKey) -> &[T] {
        self.by_key.get(key).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn dated_len(&self) -> usize {
        self.by_key.values().map(Vec::len).sum()
    }

    /// Bucket keys in date order.
    pub fn keys_sorted(&self) -> Vec<DateKey> {
        let mut keys: Vec<DateKey> = self.by_key.keys().copied().collect();
        keys.sort();
        keys
    }
}

impl<T> Default for Buckets<T> {
    fn default() -> Self {
        Buckets {
            by_key: HashMap::new(),
            undated: Vec::new(),
        }
    }
}

/// Group entries by date key in one pass, keeping input order inside each
/// bucket.
pub fn bucket_by_date_key<T, I, F>(entries: I, mut key_fn: F) -> Buckets<T>
where
    I: IntoIterator<Item = T>,
    F: FnMut(&T) -> Option<DateKey>,
{
    let mut buckets = Buckets::default();

    for entry in entries {
        match key_fn(&entry) {
            Some(key) => buckets.by_key.entry(key).or_insert_with(Vec::new).push(entry),
            None => buckets.undated.push(entry),
        }
    }

    buckets
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use chrono_tz::Tz;

    fn key(s: &str) -> DateKey {
        s.parse().unwrap()
    }

    #[test]
    fn displays_as_iso_date() {
        let k = DateKey::from_date(NaiveDate::from_ymd_opt(2024, 2, 9).unwrap());
        assert_eq!(k.to_string(), "2024-02-09");
        assert_eq!(key("2024-02-09"), k);
    }

    #[test]
    fn rejects_malformed_key() {
        assert!(matches!(
            "15/03/2024".parse::<DateKey>(),
            Err(DocketError::InvalidDate(_))
        ));
    }

    #[test]
    fn serializes_as_string() {
        let json = serde_json::to_string(&key("2024-03-15")).unwrap();
        assert_eq!(json, "\"2024-03-15\"");
        let back: DateKey = serde_json::from_str(&json).unwrap();
        assert_eq!(back, key("2024-03-15"));
    }

    #[test]
    fn late_evening_utc_instant_keys_to_local_day() {
        // 22:30 UTC is already 01:30 on the next day in Nairobi (UTC+3)
        let nairobi = ViewerZone::named("Africa/Nairobi").unwrap();
        let early = EntryTime::Utc(Utc.with_ymd_and_hms(2024, 3, 14, 22, 30, 0).unwrap());

        assert_eq!(to_date_key(&early, &nairobi), key("2024-03-15"));
        assert_eq!(
            to_date_key(&early, &ViewerZone::Named(Tz::UTC)),
            key("2024-03-14")
        );
    }

    #[test]
    fn bucketing_partitions_and_keeps_order() {
        let items = vec![
            ("a", Some("2024-03-15")),
            ("b", None),
            ("c", Some("2024-03-16")),
            ("d", Some("2024-03-15")),
            ("e", Some("garbage")),
        ];

        let buckets = bucket_by_date_key(items.iter(), |(_, date)| {
            date.and_then(|d| d.parse::<DateKey>().ok())
        });

        let names = |k: DateKey| {
            buckets
                .get(&k)
                .iter()
                .map(|(name, _)| *name)
                .collect::<Vec<_>>()
        };
        assert_eq!(names(key("2024-03-15")), vec!["a", "d"]);
        assert_eq!(names(key("2024-03-16")), vec!["c"]);
        assert_eq!(buckets.undated.len(), 2);
        assert_eq!(buckets.dated_len() + buckets.undated.len(), items.len());
        assert_eq!(buckets.keys_sorted(), vec![key("2024-03-15"), key("2024-03-16")]);
    }

    #[test]
    fn empty_input_gives_empty_buckets() {
        let buckets = bucket_by_date_key(Vec::<u32>::new(), |_| None);
        assert!(buckets.by_key.is_empty());
        assert!(buckets.undated.is_empty());
        assert!(buckets.get(&key("2024-01-01")).is_empty());
    }
}
