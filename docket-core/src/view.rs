//! Facade that turns a snapshot and navigation state into a view.

use chrono::{DateTime, NaiveDate, Utc};
use serde::Serialize;

use crate::config::DocketConfig;
use crate::day_view::DayView;
use crate::error::DocketResult;
use crate::index::EntryIndex;
use crate::month_grid::MonthGrid;
use crate::navigation::{Navigation, ViewMode, week_days};
use crate::snapshot::Snapshot;
use crate::time_grid::TimeGrid;
use crate::zone::ViewerZone;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "mode", rename_all = "lowercase")]
pub enum CalendarView {
    Day(DayView),
    Month(MonthGrid),
}

/// Stateless calendar engine: grid configuration plus the viewer's zone.
///
/// Every call derives a fresh view from the snapshot it is given; nothing
/// is cached between calls, so it is safe to call from several threads.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct CalendarEngine {
    grid: TimeGrid,
    zone: ViewerZone,
}

impl CalendarEngine {
    pub fn new(grid: TimeGrid, zone: ViewerZone) -> Self {
        CalendarEngine { grid, zone }
    }

    pub fn from_config(config: &DocketConfig) -> DocketResult<Self> {
        Ok(CalendarEngine::new(config.time_grid()?, config.viewer_zone()?))
    }

    pub fn grid(&self) -> &TimeGrid {
        &self.grid
    }

    pub fn zone(&self) -> &ViewerZone {
        &self.zone
    }

    /// Bucket a snapshot once so several views can share it.
    pub fn index<'a>(&self, snapshot: &'a Snapshot) -> EntryIndex<'a> {
        EntryIndex::build(snapshot, &self.zone)
    }

    pub fn render(&self, snapshot: &Snapshot, nav: &Navigation, now: DateTime<Utc>) -> CalendarView {
        self.render_indexed(&self.index(snapshot), nav, now)
    }

    pub fn render_indexed(
        &self,
        index: &EntryIndex<'_>,
        nav: &Navigation,
        now: DateTime<Utc>,
    ) -> CalendarView {
        match nav.view_mode {
            ViewMode::Day => CalendarView::Day(self.day(index, nav.anchor_date, now)),
            ViewMode::Month => CalendarView::Month(self.month(index, nav.anchor_date, now)),
        }
    }

    pub fn day(&self, index: &EntryIndex<'_>, date: NaiveDate, now: DateTime<Utc>) -> DayView {
        DayView::from_index(date, index, &self.grid, self.zone.today(now))
    }

    pub fn month(&self, index: &EntryIndex<'_>, anchor: NaiveDate, now: DateTime<Utc>) -> MonthGrid {
        MonthGrid::from_index(anchor, index, self.zone.today(now))
    }

    /// Day views for the Sunday-first week containing `anchor`.
    pub fn week(&self, index: &EntryIndex<'_>, anchor: NaiveDate, now: DateTime<Utc>) -> Vec<DayView> {
        week_days(anchor)
            .into_iter()
            .map(|date| self.day(index, date, now))
            .collect()
    }
}
