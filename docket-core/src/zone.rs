//! The viewer's timezone.
//!
//! Every calendar date and time-of-day the engine derives is read on the
//! viewer's wall clock. This is the only place instants become local.

use chrono::{DateTime, Local, NaiveDate, NaiveDateTime, NaiveTime, Utc};
use chrono_tz::Tz;

use crate::entry_time::EntryTime;
use crate::error::{DocketError, DocketResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ViewerZone {
    /// Whatever zone the device clock is set to
    #[default]
    System,
    /// An explicit IANA zone
    Named(Tz),
}

impl ViewerZone {
    pub fn named(name: &str) -> DocketResult<Self> {
        name.parse::<Tz>()
            .map(ViewerZone::Named)
            .map_err(|_| DocketError::InvalidTimezone(name.to_string()))
    }

    /// Resolve the system zone to an IANA name when the platform reports one.
    pub fn detect() -> Self {
        match iana_time_zone::get_timezone() {
            Ok(name) => match name.parse::<Tz>() {
                Ok(tz) => ViewerZone::Named(tz),
                Err(_) => {
                    log::debug!("System timezone '{}' is not a known IANA zone", name);
                    ViewerZone::System
                }
            },
            Err(e) => {
                log::debug!("Could not detect system timezone: {}", e);
                ViewerZone::System
            }
        }
    }

    /// Wall-clock datetime of an entry time. Date-only values map to local
    /// midnight of that same date, never to a shifted UTC day.
    pub fn local(&self, time: &EntryTime) -> NaiveDateTime {
        match time {
            EntryTime::Utc(dt) => self.local_from_utc(dt),
            EntryTime::Floating(dt) => *dt,
            EntryTime::Date(d) => d.and_time(NaiveTime::MIN),
        }
    }

    pub fn local_from_utc(&self, dt: &DateTime<Utc>) -> NaiveDateTime {
        match self {
            ViewerZone::System => dt.with_timezone(&Local).naive_local(),
            ViewerZone::Named(tz) => dt.with_timezone(tz).naive_local(),
        }
    }

    /// The calendar date the viewer sees at `now`.
    pub fn today(&self, now: DateTime<Utc>) -> NaiveDate {
        self.local_from_utc(&now).date()
    }
}
