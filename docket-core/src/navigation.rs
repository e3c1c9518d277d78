//! Navigation state: which date is anchored and which view is showing.

use chrono::{DateTime, Datelike, Duration, Months, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::DocketError;
use crate::zone::ViewerZone;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ViewMode {
    #[default]
    Day,
    Month,
}

impl FromStr for ViewMode {
    type Err = DocketError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "day" => Ok(ViewMode::Day),
            "month" => Ok(ViewMode::Month),
            _ => Err(DocketError::InvalidViewMode(s.to_string())),
        }
    }
}

impl fmt::Display for ViewMode {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            ViewMode::Day => write!(f, "day"),
            ViewMode::Month => write!(f, "month"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Navigation {
    pub anchor_date: NaiveDate,
    pub view_mode: ViewMode,
}

impl Navigation {
    pub fn new(anchor_date: NaiveDate, view_mode: ViewMode) -> Self {
        Navigation {
            anchor_date,
            view_mode,
        }
    }

    /// Anchor on the viewer's current date.
    pub fn today(view_mode: ViewMode, now: DateTime<Utc>, zone: &ViewerZone) -> Self {
        Navigation::new(zone.today(now), view_mode)
    }

    /// One day forward in Day mode, one month forward in Month mode.
    pub fn next(&self) -> Self {
        self.step(1)
    }

    pub fn previous(&self) -> Self {
        self.step(-1)
    }

    pub fn with_mode(&self, view_mode: ViewMode) -> Self {
        Navigation::new(self.anchor_date, view_mode)
    }

    fn step(&self, direction: i32) -> Self {
        let anchor = match self.view_mode {
            ViewMode::Day => self
                .anchor_date
                .checked_add_signed(Duration::days(direction as i64)),
            // chrono clamps the day to the target month's length
            ViewMode::Month if direction >= 0 => self.anchor_date.checked_add_months(Months::new(1)),
            ViewMode::Month => self.anchor_date.checked_sub_months(Months::new(1)),
        };

        Navigation::new(anchor.unwrap_or(self.anchor_date), self.view_mode)
    }
}

/// The Sunday-first week containing `anchor`.
pub fn week_days(anchor: NaiveDate) -> [NaiveDate; 7] {
    let sunday = anchor - Duration::days(anchor.weekday().num_days_from_sunday() as i64);
    std::array::from_fn(|i| sunday + Duration::days(i as i64))
}
