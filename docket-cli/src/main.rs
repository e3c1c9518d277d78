mod commands;
mod render;

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::{DateTime, NaiveDate, Utc};
use clap::{Args, Parser, Subcommand};
use docket_core::{CalendarEngine, DateKey, DocketConfig, Snapshot, ViewerZone};
use flexi_logger::{Logger, LoggerHandle};

#[derive(Parser)]
#[command(name = "docket")]
#[command(about = "Show matter events and tasks as day, week and month calendars")]
struct Cli {
    /// Config file (defaults to ~/.config/docket/config.toml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Timezone to read dates in (IANA name), overriding the config
    #[arg(long, global = true)]
    timezone: Option<String>,

    /// Log entries the engine skips or clips
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// All-day strip and time grid for one day
    Day(ViewArgs),
    /// Month grid
    Month(ViewArgs),
    /// Seven day columns, Sunday first
    Week(ViewArgs),
    /// Today's events plus open tasks that are due or overdue
    Agenda(ViewArgs),
    /// Entries grouped as Today / Yesterday / Last 7 Days / by month
    Timeline(ViewArgs),
    /// Write a commented default config file
    ConfigInit {
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}

#[derive(Args)]
struct ViewArgs {
    /// JSON snapshot with "events" and "tasks" arrays
    #[arg(short, long)]
    snapshot: PathBuf,

    /// Date to show (YYYY-MM-DD), today when omitted
    #[arg(short, long)]
    date: Option<String>,

    /// Print the view as JSON instead of drawing it
    #[arg(long)]
    json: bool,
}

/// Everything a view command needs, resolved from arguments and config.
pub struct Session {
    pub engine: CalendarEngine,
    pub snapshot: Snapshot,
    pub date: NaiveDate,
    pub now: DateTime<Utc>,
    pub json: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let _logger = init_logging(cli.verbose)?;

    let config_path = match &cli.config {
        Some(path) => path.clone(),
        None => DocketConfig::config_path()?,
    };

    let timezone = cli.timezone.as_deref();
    match cli.command {
        Commands::ConfigInit { force } => commands::config::run(&config_path, force),
        Commands::Day(args) => commands::day::run(&session(&config_path, timezone, args)?),
        Commands::Month(args) => commands::month::run(&session(&config_path, timezone, args)?),
        Commands::Week(args) => commands::week::run(&session(&config_path, timezone, args)?),
        Commands::Agenda(args) => commands::agenda::run(&session(&config_path, timezone, args)?),
        Commands::Timeline(args) => {
            commands::timeline::run(&session(&config_path, timezone, args)?)
        }
    }
}

fn init_logging(verbose: bool) -> Result<LoggerHandle> {
    let level = if verbose { "debug" } else { "warn" };
    let handle = Logger::try_with_env_or_str(level)
        .context("Invalid log level")?
        .log_to_stderr()
        .start()
        .context("Could not start logger")?;
    Ok(handle)
}

fn session(config_path: &Path, timezone: Option<&str>, args: ViewArgs) -> Result<Session> {
    let config = DocketConfig::load_from(config_path)
        .with_context(|| format!("Could not load config from {}", config_path.display()))?;

    let grid = config.time_grid()?;
    let zone = match timezone {
        Some(name) => ViewerZone::named(name)?,
        None => config.viewer_zone()?,
    };
    let engine = CalendarEngine::new(grid, zone);

    let snapshot = Snapshot::load(&args.snapshot)
        .with_context(|| format!("Could not load snapshot {}", args.snapshot.display()))?;
    log::debug!(
        "Loaded {} events and {} tasks from {}",
        snapshot.events.len(),
        snapshot.tasks.len(),
        args.snapshot.display()
    );

    let now = Utc::now();
    let date = match args.date.as_deref() {
        Some(s) => s.parse::<DateKey>()?.date(),
        None => zone.today(now),
    };

    Ok(Session {
        engine,
        snapshot,
        date,
        now,
        json: args.json,
    })
}
