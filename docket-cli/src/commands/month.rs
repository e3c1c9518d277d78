use anyhow::Result;
use owo_colors::OwoColorize;

use crate::Session;
use crate::commands::print_json;
use crate::render::Render;

pub fn run(session: &Session) -> Result<()> {
    let index = session.engine.index(&session.snapshot);
    let grid = session.engine.month(&index, session.date, session.now);

    if session.json {
        return print_json(&grid);
    }

    println!("{}", grid.render());

    let unscheduled = index.unscheduled();
    if !unscheduled.is_empty() {
        println!(
            "\n{}",
            format!("{} without a date", unscheduled.len()).dimmed()
        );
    }
    Ok(())
}
