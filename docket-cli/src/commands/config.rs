use std::path::Path;

use anyhow::{Result, bail};
use docket_core::DocketConfig;
use owo_colors::OwoColorize;

pub fn run(path: &Path, force: bool) -> Result<()> {
    if path.exists() && !force {
        bail!(
            "Config already exists at {}\n\nUse --force to overwrite it.",
            path.display()
        );
    }

    DocketConfig::create_default_config(path)?;

    println!("{}", "Config".bold());
    println!("  Written:  {}", path.display());
    Ok(())
}
