//! Maps one timed entry onto a clamped slot range of the day grid.

use chrono::{NaiveDate, NaiveDateTime};
use serde::Serialize;

use crate::record::EventRecord;
use crate::time_grid::TimeGrid;
use crate::zone::ViewerZone;

/// Slot range `[start_slot, end_slot)` of one entry, always inside the grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Placement {
    pub start_slot: u32,
    pub end_slot: u32,
    /// Entry begins before the window (or entirely after it)
    pub clipped_start: bool,
    /// Entry runs past the end of the window
    pub clipped_end: bool,
}

impl Placement {
    pub fn duration(&self) -> u32 {
        self.end_slot - self.start_slot
    }

    pub fn overlaps(&self, other: &Placement) -> bool {
        self.start_slot < other.end_slot && other.start_slot < self.end_slot
    }
}

/// Place a local time range on `day`'s grid.
///
/// A missing end defaults to one slot after the start. The result always
/// satisfies `0 <= start_slot < end_slot <= slot_count`, so entries outside
/// the window are pinned to its nearest edge instead of disappearing.
pub fn place(
    grid: &TimeGrid,
    day: NaiveDate,
    start: NaiveDateTime,
    end: Option<NaiveDateTime>,
) -> Placement {
    let slot = grid.slot_seconds();
    let slot_count = grid.slot_count() as i64;

    let start_offset = grid.seconds_into_window(day, start);
    let end_offset = match end {
        Some(end) => grid.seconds_into_window(day, end),
        None => start_offset + slot,
    };

    let raw_start = start_offset.div_euclid(slot);
    let raw_end = ceil_div(end_offset, slot);

    let start_slot = raw_start.clamp(0, slot_count - 1);
    let end_slot = raw_end.clamp(0, slot_count).max(start_slot + 1);

    Placement {
        start_slot: start_slot as u32,
        end_slot: end_slot as u32,
        clipped_start: raw_start != start_slot,
        clipped_end: raw_end > slot_count,
    }
}

/// Place a timed event on `day`. Returns `None` when the start cannot be
/// parsed; an unparsable end is treated as absent.
pub fn place_event(
    grid: &TimeGrid,
    day: NaiveDate,
    event: &EventRecord,
    zone: &ViewerZone,
) -> Option<Placement> {
    let start = zone.local(&event.start()?);

    if event.end_instant.is_some() && event.end().is_none() {
        log::debug!(
            "Event '{}' has an unparsable end; using the one-slot default",
            event.id
        );
    }
    let end = event.end().map(|end| zone.local(&end));

    let placement = place(grid, day, start, end);
    if placement.clipped_start || placement.clipped_end {
        log::debug!(
            "Event '{}' clipped to slots {}..{}",
            event.id,
            placement.start_slot,
            placement.end_slot
        );
    }

    Some(placement)
}

fn ceil_div(value: i64, divisor: i64) -> i64 {
    -((-value).div_euclid(divisor))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, 15).unwrap()
    }

    fn at(h: u32, m: u32) -> NaiveDateTime {
        day().and_hms_opt(h, m, 0).unwrap()
    }

    fn slots(p: Placement) -> (u32, u32) {
        (p.start_slot, p.end_slot)
    }

    #[test]
    fn aligned_event() {
        let p = place(&TimeGrid::default(), day(), at(9, 0), Some(at(10, 0)));
        assert_eq!(slots(p), (4, 6));
        assert!(!p.clipped_start && !p.clipped_end);
    }

    #[test]
    fn unaligned_event_rounds_outward() {
        let p = place(&TimeGrid::default(), day(), at(9, 10), Some(at(9, 40)));
        assert_eq!(slots(p), (4, 6));
    }

    #[test]
    fn missing_end_defaults_to_one_slot() {
        let p = place(&TimeGrid::default(), day(), at(13, 0), None);
        assert_eq!(slots(p), (12, 13));
    }

    #[test]
    fn end_before_start_still_spans_one_slot() {
        let p = place(&TimeGrid::default(), day(), at(10, 0), Some(at(9, 0)));
        assert_eq!(slots(p), (6, 7));

        let zero = place(&TimeGrid::default(), day(), at(10, 0), Some(at(10, 0)));
        assert_eq!(slots(zero), (6, 7));
    }

    #[test]
    fn early_start_is_clamped_to_window() {
        let p = place(&TimeGrid::default(), day(), at(6, 0), Some(at(7, 30)));
        assert_eq!(slots(p), (0, 1));
        assert!(p.clipped_start);
    }

    #[test]
    fn late_end_is_clamped_to_window() {
        let p = place(&TimeGrid::default(), day(), at(20, 0), Some(at(23, 0)));
        assert_eq!(slots(p), (26, 28));
        assert!(p.clipped_end);
    }

    #[test]
    fn entry_entirely_before_window_is_pinned_to_first_slot() {
        let p = place(&TimeGrid::default(), day(), at(5, 0), Some(at(6, 0)));
        assert_eq!(slots(p), (0, 1));
    }

    #[test]
    fn entry_entirely_after_window_is_pinned_to_last_slot() {
        let p = place(&TimeGrid::default(), day(), at(22, 0), Some(at(23, 0)));
        assert_eq!(slots(p), (27, 28));
        assert!(p.clipped_start);
    }

    #[test]
    fn end_on_next_day_clamps_instead_of_wrapping() {
        let next = day().succ_opt().unwrap().and_hms_opt(1, 0, 0).unwrap();
        let p = place(&TimeGrid::default(), day(), at(19, 0), Some(next));
        assert_eq!(slots(p), (24, 28));
        assert!(p.clipped_end);
    }

    #[test]
    fn bounds_hold_for_every_half_hour_pair() {
        let grid = TimeGrid::default();
        for start in 0..48 {
            for len in 0..10 {
                let s = day().and_hms_opt(0, 0, 0).unwrap() + chrono::Duration::minutes(start * 30);
                let e = s + chrono::Duration::minutes(len * 25);
                let p = place(&grid, day(), s, Some(e));
                assert!(p.start_slot < p.end_slot);
                assert!(p.end_slot <= grid.slot_count());
            }
        }
    }

    #[test]
    fn unparsable_start_is_not_placed() {
        let event = EventRecord {
            id: "e1".into(),
            start_instant: Some("soon".into()),
            ..Default::default()
        };
        let zone = ViewerZone::Named(chrono_tz::Tz::UTC);
        assert_eq!(place_event(&TimeGrid::default(), day(), &event, &zone), None);
    }

    #[test]
    fn unparsable_end_falls_back_to_default_length() {
        let event = EventRecord {
            id: "e2".into(),
            start_instant: Some("2024-03-15T11:00".into()),
            end_instant: Some("later".into()),
            ..Default::default()
        };
        let zone = ViewerZone::Named(chrono_tz::Tz::UTC);
        let p = place_event(&TimeGrid::default(), day(), &event, &zone).unwrap();
        assert_eq!(slots(p), (8, 9));
    }
}
