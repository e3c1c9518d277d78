use anyhow::Result;
use docket_core::Agenda;
use owo_colors::OwoColorize;

use crate::Session;
use crate::commands::print_json;
use crate::render::Render;

pub fn run(session: &Session) -> Result<()> {
    let index = session.engine.index(&session.snapshot);
    let agenda = Agenda::build(&index, session.date);

    if session.json {
        return print_json(&agenda);
    }

    println!("{}", agenda.date.format("%A, %B %-d").to_string().bold());

    if agenda.is_empty() {
        println!("\n{}", "Nothing on the agenda".dimmed());
        return Ok(());
    }

    if !agenda.events.is_empty() {
        println!("\n{}", "Schedule".bold());
        for event in &agenda.events {
            println!("  {}", event.render());
        }
    }

    if !agenda.tasks.is_empty() {
        let overdue = agenda.overdue_count();
        if overdue > 0 {
            println!(
                "\n{} {}",
                "Tasks".bold(),
                format!("({} overdue)", overdue).red()
            );
        } else {
            println!("\n{}", "Tasks".bold());
        }
        for task in &agenda.tasks {
            println!("  {}", task.render());
        }
    }
    Ok(())
}
