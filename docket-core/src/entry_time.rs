//! Parsed instants of calendar records.
//!
//! Records carry their instants as raw ISO-8601 strings. Parsing happens
//! lazily so that one bad value only removes that record from placement.

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// ISO-8601 forms with an offset that RFC 3339 rejects: missing seconds,
/// `+0300` or `+03` offsets, or a space separator.
const OFFSET_FORMATS: [&str; 4] = [
    "%Y-%m-%dT%H:%M:%S%.f%#z",
    "%Y-%m-%dT%H:%M%#z",
    "%Y-%m-%d %H:%M:%S%.f%#z",
    "%Y-%m-%d %H:%M%#z",
];

/// Offset-less datetime forms accepted as wall-clock times.
const FLOATING_FORMATS: [&str; 4] = [
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EntryTime {
    /// Absolute instant (the string carried an offset or `Z`)
    Utc(DateTime<Utc>),
    /// Wall-clock time with no offset, read in the viewer's zone
    Floating(NaiveDateTime),
    /// Date-only value
    Date(NaiveDate),
}

impl EntryTime {
    /// Parse an ISO-8601 string. Returns `None` for anything unparsable,
    /// including empty strings.
    pub fn parse(input: &str) -> Option<Self> {
        let s = input.trim();
        if s.is_empty() {
            return None;
        }

        if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
            return Some(EntryTime::Utc(dt.with_timezone(&Utc)));
        }

        for format in OFFSET_FORMATS {
            if let Ok(dt) = DateTime::parse_from_str(s, format) {
                return Some(EntryTime::Utc(dt.with_timezone(&Utc)));
            }
        }

        for format in FLOATING_FORMATS {
            if let Ok(dt) = NaiveDateTime::parse_from_str(s, format) {
                return Some(EntryTime::Floating(dt));
            }
        }

        NaiveDate::parse_from_str(s, "%Y-%m-%d")
            .ok()
            .map(EntryTime::Date)
    }

    pub fn is_date_only(&self) -> bool {
        matches!(self, EntryTime::Date(_))
    }
}

impl fmt::Display for EntryTime {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            EntryTime::Utc(dt) => write!(f, "{}", dt.to_rfc3339()),
            EntryTime::Floating(dt) => write!(f, "{}", dt.format("%Y-%m-%dT%H:%M")),
            EntryTime::Date(d) => write!(f, "{}", d.format("%Y-%m-%d")),
        }
    }
}
