use anyhow::Result;
use docket_core::timeline::group_timeline;
use docket_core::to_date_key;
use owo_colors::OwoColorize;

use crate::Session;
use crate::commands::print_json;
use crate::render::Render;

pub fn run(session: &Session) -> Result<()> {
    let zone = *session.engine.zone();
    let groups = group_timeline(
        session.snapshot.entries(),
        |entry| entry.anchor_time().map(|t| to_date_key(&t, &zone).date()),
        session.date,
    );

    if session.json {
        return print_json(&groups);
    }

    if groups.is_empty() {
        println!("{}", "No entries".dimmed());
        return Ok(());
    }

    for (i, group) in groups.iter().enumerate() {
        if i > 0 {
            println!();
        }
        println!("{} {}", group.label.bold(), format!("({})", group.entries.len()).dimmed());
        for entry in &group.entries {
            println!("  {}", entry.render());
        }
    }
    Ok(())
}
