pub mod agenda;
pub mod config;
pub mod day;
pub mod month;
pub mod timeline;
pub mod week;

use anyhow::Result;
use serde_json::to_string_pretty;

/// Print any serializable view as pretty JSON.
pub fn print_json<T: serde::Serialize>(value: &T) -> Result<()> {
    println!("{}", to_string_pretty(value)?);
    Ok(())
}
