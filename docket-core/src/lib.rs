//! Calendar layout engine for docket.
//!
//! Turns snapshots of events and tasks into positioned structures for the
//! Day and Month views:
//! - `date_key` buckets entries by the viewer's local date
//! - `time_grid`, `position` and `overlap` place timed entries on the day grid
//! - `day_view` and `month_grid` assemble the two views
//! - `view` is the facade that picks one from navigation state
//!
//! Everything here is a pure function of its inputs. Fetching and mutating
//! records happens elsewhere.

pub mod agenda;
pub mod config;
pub mod constants;
pub mod date_key;
pub mod day_view;
pub mod entry_time;
pub mod error;
pub mod index;
pub mod month_grid;
pub mod navigation;
pub mod overlap;
pub mod position;
pub mod record;
pub mod snapshot;
pub mod time_grid;
pub mod timeline;
pub mod view;
pub mod zone;

pub use agenda::Agenda;
pub use config::DocketConfig;
pub use date_key::{DateKey, bucket_by_date_key, to_date_key};
pub use day_view::DayView;
pub use entry_time::EntryTime;
pub use error::{DocketError, DocketResult};
pub use index::EntryIndex;
pub use month_grid::{MonthCell, MonthGrid};
pub use navigation::{Navigation, ViewMode, week_days};
pub use overlap::PositionedEntry;
pub use record::{CalendarEntry, EventRecord, EventType, Priority, TaskRecord, TaskStatus};
pub use snapshot::Snapshot;
pub use time_grid::TimeGrid;
pub use view::{CalendarEngine, CalendarView};
pub use zone::ViewerZone;
