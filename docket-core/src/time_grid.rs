//! The visible hour window of the day view and its slot subdivision.

use chrono::{Duration, NaiveDate, NaiveDateTime, NaiveTime, Timelike};
use serde::Serialize;

use crate::constants::{DEFAULT_SLOT_MINUTES, DEFAULT_START_HOUR, DEFAULT_TOTAL_HOURS};
use crate::error::{DocketError, DocketResult};

/// Window `[start_hour, start_hour + total_hours)` split into fixed slots.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TimeGrid {
    start_hour: u32,
    slot_minutes: u32,
    total_hours: u32,
}

impl Default for TimeGrid {
    fn default() -> Self {
        TimeGrid {
            start_hour: DEFAULT_START_HOUR,
            slot_minutes: DEFAULT_SLOT_MINUTES,
            total_hours: DEFAULT_TOTAL_HOURS,
        }
    }
}

impl TimeGrid {
    pub fn new(start_hour: u32, slot_minutes: u32, total_hours: u32) -> DocketResult<Self> {
        if slot_minutes == 0 || 60 % slot_minutes != 0 {
            return Err(DocketError::InvalidGrid(format!(
                "slot length must divide an hour evenly, got {} minutes",
                slot_minutes
            )));
        }
        if total_hours == 0 {
            return Err(DocketError::InvalidGrid(
                "grid must show at least one hour".into(),
            ));
        }
        if start_hour.checked_add(total_hours).is_none_or(|end| end > 24) {
            return Err(DocketError::InvalidGrid(format!(
                "window {}:00 + {}h runs past midnight",
                start_hour, total_hours
            )));
        }

        Ok(TimeGrid {
            start_hour,
            slot_minutes,
            total_hours,
        })
    }

    pub fn start_hour(&self) -> u32 {
        self.start_hour
    }

    pub fn slot_minutes(&self) -> u32 {
        self.slot_minutes
    }

    pub fn total_hours(&self) -> u32 {
        self.total_hours
    }

    pub fn slot_count(&self) -> u32 {
        self.total_hours * 60 / self.slot_minutes
    }

    pub fn slots_per_hour(&self) -> u32 {
        60 / self.slot_minutes
    }

    /// One label per visible hour: "7 AM", "8 AM", ... "12 PM", "1 PM".
    pub fn hour_labels(&self) -> Vec<String> {
        (self.start_hour..self.start_hour + self.total_hours)
            .map(hour_label)
            .collect()
    }

    /// Unclamped slot position of a time of day. Negative before the
    /// window, `>= slot_count` after it.
    pub fn instant_to_slot_fraction(&self, time: NaiveTime) -> f64 {
        let seconds = time.num_seconds_from_midnight() as i64 - self.window_start_seconds();
        seconds as f64 / self.slot_seconds() as f64
    }

    /// Slot position of a local datetime relative to the window on `day`.
    /// Times on other days land outside `[0, slot_count]` rather than
    /// wrapping around midnight.
    pub fn slot_fraction_on(&self, day: NaiveDate, at: NaiveDateTime) -> f64 {
        self.seconds_into_window(day, at) as f64 / self.slot_seconds() as f64
    }

    /// Wall time at which `slot` begins. Slots past the end are capped at
    /// the window end.
    pub fn slot_start_time(&self, slot: u32) -> NaiveTime {
        let slot = slot.min(self.slot_count());
        let minutes = self.start_hour * 60 + slot * self.slot_minutes;
        NaiveTime::MIN + Duration::minutes(minutes as i64)
    }

    pub(crate) fn slot_seconds(&self) -> i64 {
        self.slot_minutes as i64 * 60
    }

    pub(crate) fn seconds_into_window(&self, day: NaiveDate, at: NaiveDateTime) -> i64 {
        let window_start = day.and_time(NaiveTime::MIN) + Duration::hours(self.start_hour as i64);
        (at - window_start).num_seconds()
    }

    fn window_start_seconds(&self) -> i64 {
        self.start_hour as i64 * 3600
    }
}

/// 12-hour clock label for an hour of the day.
pub fn hour_label(hour: u32) -> String {
    match hour % 24 {
        0 => "12 AM".to_string(),
        h @ 1..=11 => format!("{} AM", h),
        12 => "12 PM".to_string(),
        h => format!("{} PM", h - 12),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn time(h: u32, m: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(h, m, 0).unwrap()
    }

    #[test]
    fn default_grid_matches_office_hours() {
        let grid = TimeGrid::default();
        assert_eq!(grid.slot_count(), 28);
        assert_eq!(
            grid.hour_labels(),
            vec![
                "7 AM", "8 AM", "9 AM", "10 AM", "11 AM", "12 PM", "1 PM", "2 PM", "3 PM",
                "4 PM", "5 PM", "6 PM", "7 PM", "8 PM"
            ]
        );
    }

    #[test]
    fn slot_count_follows_granularity() {
        assert_eq!(TimeGrid::new(8, 15, 10).unwrap().slot_count(), 40);
        assert_eq!(TimeGrid::new(0, 60, 24).unwrap().slot_count(), 24);
    }

    #[test]
    fn rejects_bad_configuration() {
        assert!(matches!(TimeGrid::new(7, 0, 14), Err(DocketError::InvalidGrid(_))));
        assert!(matches!(TimeGrid::new(7, 25, 14), Err(DocketError::InvalidGrid(_))));
        assert!(matches!(TimeGrid::new(7, 30, 0), Err(DocketError::InvalidGrid(_))));
        assert!(matches!(TimeGrid::new(20, 30, 6), Err(DocketError::InvalidGrid(_))));
        assert!(matches!(TimeGrid::new(u32::MAX, 30, 2), Err(DocketError::InvalidGrid(_))));
        assert!(matches!(TimeGrid::new(2, 30, u32::MAX), Err(DocketError::InvalidGrid(_))));
    }

    #[test]
    fn slot_fraction_is_unclamped() {
        let grid = TimeGrid::default();
        assert_eq!(grid.instant_to_slot_fraction(time(7, 0)), 0.0);
        assert_eq!(grid.instant_to_slot_fraction(time(9, 45)), 5.5);
        assert_eq!(grid.instant_to_slot_fraction(time(6, 0)), -2.0);
        assert_eq!(grid.instant_to_slot_fraction(time(22, 0)), 30.0);
    }

    #[test]
    fn slot_fraction_on_counts_across_midnight() {
        let grid = TimeGrid::default();
        let day = NaiveDate::from_ymd_opt(2024, 3, 15).unwrap();
        let next_morning = day.succ_opt().unwrap().and_hms_opt(1, 0, 0).unwrap();

        // 18 hours after the 07:00 window start
        assert_eq!(grid.slot_fraction_on(day, next_morning), 36.0);
    }

    #[test]
    fn slot_start_times() {
        let grid = TimeGrid::default();
        assert_eq!(grid.slot_start_time(0), time(7, 0));
        assert_eq!(grid.slot_start_time(3), time(8, 30));
        assert_eq!(grid.slot_start_time(99), time(21, 0));
    }

    #[test]
    fn hour_labels_cover_midnight_and_noon() {
        assert_eq!(hour_label(0), "12 AM");
        assert_eq!(hour_label(11), "11 AM");
        assert_eq!(hour_label(12), "12 PM");
        assert_eq!(hour_label(23), "11 PM");
    }
}
