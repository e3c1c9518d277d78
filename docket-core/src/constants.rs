/// First hour shown in the day grid (7 AM).
pub const DEFAULT_START_HOUR: u32 = 7;

/// Number of hours in the day grid (7 AM through the 8 PM row).
pub const DEFAULT_TOTAL_HOURS: u32 = 14;

/// Slot granularity of the day grid, in minutes.
pub const DEFAULT_SLOT_MINUTES: u32 = 30;

/// Column headers for the month grid, Sunday first.
pub const WEEKDAY_HEADER: [&str; 7] = ["Sun", "Mon", "Tue", "Wed", "Thu", "Fri", "Sat"];

/// Group label used by list-style views for entries without a date.
pub const NO_DATE_LABEL: &str = "No Date";
