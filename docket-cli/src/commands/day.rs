use anyhow::Result;
use owo_colors::OwoColorize;

use crate::Session;
use crate::commands::print_json;
use crate::render::Render;

pub fn run(session: &Session) -> Result<()> {
    let index = session.engine.index(&session.snapshot);
    let view = session.engine.day(&index, session.date, session.now);

    if session.json {
        return print_json(&view);
    }

    println!("{}", view.render());
    if view.is_empty() {
        println!("\n{}", "Nothing scheduled".dimmed());
    }
    Ok(())
}
