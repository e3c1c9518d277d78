use anyhow::Result;
use owo_colors::OwoColorize;

use crate::Session;
use crate::commands::print_json;
use crate::render::Render;

pub fn run(session: &Session) -> Result<()> {
    let index = session.engine.index(&session.snapshot);
    let days = session.engine.week(&index, session.date, session.now);

    if session.json {
        return print_json(&days);
    }

    for (i, day) in days.iter().enumerate() {
        if i > 0 {
            println!();
        }
        let heading = day.date.format("%a %b %-d").to_string();
        if day.is_today {
            println!("{}", heading.green().bold());
        } else {
            println!("{}", heading.bold());
        }

        if day.is_empty() {
            println!("  {}", "-".dimmed());
            continue;
        }
        for entry in &day.all_day_strip {
            println!("  {} {}", "all day".dimmed(), entry.render());
        }
        for positioned in &day.timed_grid {
            let time = day.grid_config.slot_start_time(positioned.start_slot);
            println!(
                "  {} {}",
                format!("{:>7}", time.format("%H:%M")).dimmed(),
                positioned.entry.render()
            );
        }
    }
    Ok(())
}
