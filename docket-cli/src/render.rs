//! Terminal rendering for docket views.
//!
//! Extension traits that turn docket-core view models into colored text
//! using owo_colors.

use chrono::{Datelike, NaiveTime};
use docket_core::agenda::{AgendaEvent, AgendaTask};
use docket_core::{CalendarEntry, DayView, EventType, MonthCell, MonthGrid, PositionedEntry, Priority};
use owo_colors::OwoColorize;

/// Width of one lane column in the day grid.
const LANE_WIDTH: usize = 24;

/// Width of one day column in the month grid.
const CELL_WIDTH: usize = 9;

/// Extension trait for TUI rendering with colors.
pub trait Render {
    fn render(&self) -> String;
}

fn colorize_event_type(event_type: EventType, text: &str) -> String {
    match event_type {
        EventType::CourtHearing => text.red().to_string(),
        EventType::ClientMeeting => text.blue().to_string(),
        EventType::Deposition => text.magenta().to_string(),
        EventType::FilingDeadline => text.yellow().to_string(),
        EventType::Misc => text.dimmed().to_string(),
    }
}

fn colorize_priority(priority: Option<Priority>, text: &str) -> String {
    match priority {
        Some(Priority::High) => text.red().to_string(),
        Some(Priority::Medium) => text.yellow().to_string(),
        Some(Priority::Low) => text.green().to_string(),
        None => text.to_string(),
    }
}

/// Colorize arbitrary text the way its entry would be drawn.
fn colorize_entry(entry: &CalendarEntry, text: &str) -> String {
    match entry {
        CalendarEntry::Event(e) => colorize_event_type(e.event_type, text),
        CalendarEntry::Task(t) => colorize_priority(t.priority, text),
    }
}

impl Render for CalendarEntry {
    fn render(&self) -> String {
        let (marker, tag) = match self {
            CalendarEntry::Event(e) => ("●", e.event_type.label()),
            CalendarEntry::Task(_) => ("☐", "Task"),
        };
        let mut line = format!("{} {}", colorize_entry(self, marker), self.title());
        line.push_str(&format!(" {}", format!("[{}]", tag).dimmed()));
        if let Some(matter) = self.matter_label() {
            line.push_str(&format!(" {}", matter.dimmed()));
        }
        line
    }
}

impl Render for AgendaEvent {
    fn render(&self) -> String {
        let time = match self.starts_at {
            Some(t) => t.format("%H:%M").to_string(),
            None => "all day".to_string(),
        };
        let mut line = format!(
            "{} {}",
            format!("{:>7}", time).dimmed(),
            colorize_event_type(self.event.event_type, &self.event.subject)
        );
        if let Some(location) = &self.event.location {
            line.push_str(&format!(" {}", format!("@ {}", location).dimmed()));
        }
        line
    }
}

impl Render for AgendaTask {
    fn render(&self) -> String {
        let due = if self.overdue {
            format!("due {}", self.due.format("%b %-d")).red().to_string()
        } else {
            "due today".dimmed().to_string()
        };
        format!(
            "{} {} {}",
            "☐".dimmed(),
            colorize_priority(self.task.priority, &self.task.name),
            due
        )
    }
}

impl Render for DayView {
    fn render(&self) -> String {
        let mut lines = Vec::new();

        let heading = self.date.format("%A, %B %-d, %Y").to_string();
        if self.is_today {
            lines.push(format!("{} {}", heading.bold(), "(today)".green()));
        } else {
            lines.push(heading.bold().to_string());
        }

        if !self.all_day_strip.is_empty() {
            lines.push(String::new());
            lines.push("All day".dimmed().to_string());
            for entry in &self.all_day_strip {
                lines.push(format!("  {}", entry.render()));
            }
        }

        lines.push(String::new());
        lines.extend(render_slots(self));
        lines.join("\n")
    }
}

/// One line per slot. Each overlapping entry gets its own lane column;
/// the title is printed on its first slot and a bar marks the rest.
fn render_slots(view: &DayView) -> Vec<String> {
    let grid = &view.grid_config;
    let lanes = view
        .timed_grid
        .iter()
        .map(|p| p.lane + 1)
        .max()
        .unwrap_or(1) as usize;

    (0..grid.slot_count())
        .map(|slot| {
            let time = grid.slot_start_time(slot);
            let mut columns = vec![String::new(); lanes];
            for positioned in covering(&view.timed_grid, slot) {
                columns[positioned.lane as usize] = lane_cell(positioned, slot);
            }
            let body: Vec<String> = columns
                .iter()
                .map(|c| pad_visible(c, LANE_WIDTH))
                .collect();
            format!("{} │ {}", slot_label(time), body.join(" ")).trim_end().to_string()
        })
        .collect()
}

fn covering(entries: &[PositionedEntry], slot: u32) -> impl Iterator<Item = &PositionedEntry> {
    entries
        .iter()
        .filter(move |p| p.start_slot <= slot && slot < p.end_slot)
}

fn lane_cell(positioned: &PositionedEntry, slot: u32) -> String {
    if slot == positioned.start_slot {
        let prefix = if positioned.clipped_start { "↑ " } else { "" };
        let title = truncate(
            &format!("{}{}", prefix, positioned.entry.title()),
            LANE_WIDTH - 2,
        );
        format!("{} {}", colorize_entry(&positioned.entry, "┃"), title)
    } else if slot + 1 == positioned.end_slot && positioned.clipped_end {
        colorize_entry(&positioned.entry, "┃ ↓")
    } else {
        colorize_entry(&positioned.entry, "┃")
    }
}

/// Hour rows get a label, half-hour and finer rows stay blank.
fn slot_label(time: NaiveTime) -> String {
    use chrono::Timelike;
    if time.minute() == 0 {
        format!("{:>5}", docket_core::time_grid::hour_label(time.hour()))
            .dimmed()
            .to_string()
    } else {
        " ".repeat(5)
    }
}

impl Render for MonthGrid {
    fn render(&self) -> String {
        let mut lines = Vec::new();
        lines.push(self.title().bold().to_string());
        lines.push(String::new());

        let header: Vec<String> = MonthGrid::weekday_header()
            .iter()
            .map(|d| format!("{:<width$}", d, width = CELL_WIDTH))
            .collect();
        lines.push(header.join("").dimmed().to_string().trim_end().to_string());

        for week in &self.weeks {
            let row: Vec<String> = week
                .iter()
                .map(|cell| match cell {
                    Some(cell) => pad_visible(&month_cell(cell), CELL_WIDTH),
                    None => " ".repeat(CELL_WIDTH),
                })
                .collect();
            lines.push(row.join("").trim_end().to_string());
        }

        let busy: Vec<&MonthCell> = self
            .days()
            .filter(|c| !c.all_day_entries.is_empty() || !c.timed_entries.is_empty())
            .collect();
        for cell in busy {
            lines.push(String::new());
            let heading = cell.date.format("%a %-d").to_string();
            if cell.is_today {
                lines.push(heading.green().bold().to_string());
            } else {
                lines.push(heading.bold().to_string());
            }
            for entry in cell.all_day_entries.iter().chain(&cell.timed_entries) {
                lines.push(format!("  {}", entry.render()));
            }
        }

        lines.join("\n")
    }
}

/// Day number plus an entry count, e.g. `14 (3)`.
fn month_cell(cell: &MonthCell) -> String {
    let day = format!("{:>2}", cell.date.day());
    let day = if cell.is_today {
        day.green().bold().to_string()
    } else {
        day
    };
    let count = cell.all_day_entries.len() + cell.timed_entries.len();
    if count == 0 {
        day
    } else {
        format!("{} {}", day, format!("({})", count).dimmed())
    }
}

/// Pad `s` to `width` columns, ignoring ANSI escape sequences.
pub fn pad_visible(s: &str, width: usize) -> String {
    let visible = visible_width(s);
    if visible >= width {
        s.to_string()
    } else {
        format!("{}{}", s, " ".repeat(width - visible))
    }
}

fn visible_width(s: &str) -> usize {
    let mut width = 0;
    let mut in_escape = false;
    for c in s.chars() {
        match (in_escape, c) {
            (false, '\x1b') => in_escape = true,
            (true, 'm') => in_escape = false,
            (true, _) => {}
            (false, _) => width += 1,
        }
    }
    width
}

/// Shorten `s` to at most `max` characters, ending with an ellipsis when cut.
pub fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        return s.to_string();
    }
    let kept: String = s.chars().take(max.saturating_sub(1)).collect();
    format!("{}…", kept)
}
