//! Viewer configuration at ~/.config/docket/config.toml

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::constants::{DEFAULT_SLOT_MINUTES, DEFAULT_START_HOUR, DEFAULT_TOTAL_HOURS};
use crate::error::{DocketError, DocketResult};
use crate::time_grid::TimeGrid;
use crate::zone::ViewerZone;

fn default_start_hour() -> u32 {
    DEFAULT_START_HOUR
}

fn default_total_hours() -> u32 {
    DEFAULT_TOTAL_HOURS
}

fn default_slot() -> String {
    format!("{}m", DEFAULT_SLOT_MINUTES)
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct DocketConfig {
    /// First hour of the day grid
    #[serde(default = "default_start_hour")]
    pub start_hour: u32,

    /// Number of hours the day grid shows
    #[serde(default = "default_total_hours")]
    pub total_hours: u32,

    /// Slot length, e.g. "30m" or "15 minutes"
    #[serde(default = "default_slot")]
    pub slot: String,

    /// IANA zone to read dates in; the system zone when unset
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timezone: Option<String>,
}

impl Default for DocketConfig {
    fn default() -> Self {
        DocketConfig {
            start_hour: default_start_hour(),
            total_hours: default_total_hours(),
            slot: default_slot(),
            timezone: None,
        }
    }
}

impl DocketConfig {
    pub fn config_path() -> DocketResult<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| DocketError::Config("Could not determine config directory".into()))?
            .join("docket");

        Ok(config_dir.join("config.toml"))
    }

    /// Load the config from its default location, falling back to defaults
    /// when no file exists.
    pub fn load() -> DocketResult<Self> {
        Self::load_from(&Self::config_path()?)
    }

    pub fn load_from(path: &Path) -> DocketResult<Self> {
        if !path.exists() {
            log::debug!("No config at {}, using defaults", path.display());
            return Ok(DocketConfig::default());
        }

        let content = std::fs::read_to_string(path)
            .map_err(|e| DocketError::Config(format!("Could not read config file: {e}")))?;

        Self::from_toml(&content)
    }

    pub fn from_toml(content: &str) -> DocketResult<Self> {
        toml::from_str(content).map_err(|e| DocketError::Config(e.to_string()))
    }

    pub fn slot_minutes(&self) -> DocketResult<u32> {
        let duration = humantime::parse_duration(&self.slot)
            .map_err(|e| DocketError::Config(format!("Invalid slot length '{}': {}", self.slot, e)))?;

        whole_minutes(duration).ok_or_else(|| {
            DocketError::Config(format!(
                "Slot length '{}' must be a whole number of minutes",
                self.slot
            ))
        })
    }

    pub fn time_grid(&self) -> DocketResult<TimeGrid> {
        TimeGrid::new(self.start_hour, self.slot_minutes()?, self.total_hours)
    }

    pub fn viewer_zone(&self) -> DocketResult<ViewerZone> {
        match &self.timezone {
            Some(name) => ViewerZone::named(name),
            None => Ok(ViewerZone::detect()),
        }
    }

    /// Create a default config file with all options commented out.
    pub fn create_default_config(path: &Path) -> DocketResult<()> {
        let contents = format!(
            "\
# docket configuration

# First hour shown in the day view:
# start_hour = {}

# Hours shown in the day view:
# total_hours = {}

# Length of one grid slot:
# slot = \"{}\"

# Timezone to read dates in (defaults to the system zone):
# timezone = \"Africa/Nairobi\"
",
            DEFAULT_START_HOUR,
            DEFAULT_TOTAL_HOURS,
            default_slot()
        );

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| {
                DocketError::Config(format!("Could not create config directory: {e}"))
            })?;
        }

        std::fs::write(path, contents)
            .map_err(|e| DocketError::Config(format!("Could not write config file: {e}")))?;

        Ok(())
    }
}

fn whole_minutes(duration: Duration) -> Option<u32> {
    let secs = duration.as_secs();
    if duration.subsec_nanos() != 0 || secs % 60 != 0 {
        return None;
    }
    u32::try_from(secs / 60).ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono_tz::Tz;

    #[test]
    fn empty_file_gives_defaults() {
        let config = DocketConfig::from_toml("").unwrap();
        assert_eq!(config, DocketConfig::default());
        assert_eq!(config.time_grid().unwrap(), TimeGrid::default());
    }

    #[test]
    fn reads_grid_and_timezone() {
        let config = DocketConfig::from_toml(
            r#"
start_hour = 8
total_hours = 10
slot = "15m"
timezone = "Africa/Nairobi"
"#,
        )
        .unwrap();

        let grid = config.time_grid().unwrap();
        assert_eq!(grid.start_hour(), 8);
        assert_eq!(grid.slot_minutes(), 15);
        assert_eq!(grid.slot_count(), 40);
        assert_eq!(
            config.viewer_zone().unwrap(),
            ViewerZone::Named(Tz::Africa__Nairobi)
        );
    }

    #[test]
    fn rejects_fractional_slot() {
        let config = DocketConfig {
            slot: "90s".into(),
            ..Default::default()
        };
        assert!(matches!(config.slot_minutes(), Err(DocketError::Config(_))));
    }

    #[test]
    fn rejects_unknown_timezone() {
        let config = DocketConfig {
            timezone: Some("Nowhere/Special".into()),
            ..Default::default()
        };
        assert!(matches!(
            config.viewer_zone(),
            Err(DocketError::InvalidTimezone(_))
        ));
    }

    #[test]
    fn invalid_toml_is_a_config_error() {
        assert!(matches!(
            DocketConfig::from_toml("start_hour = \"seven\""),
            Err(DocketError::Config(_))
        ));
    }

    #[test]
    fn missing_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = DocketConfig::load_from(&dir.path().join("config.toml")).unwrap();
        assert_eq!(config, DocketConfig::default());
    }

    #[test]
    fn default_config_template_parses_to_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("docket").join("config.toml");

        DocketConfig::create_default_config(&path).unwrap();
        let config = DocketConfig::load_from(&path).unwrap();
        assert_eq!(config, DocketConfig::default());
    }
}
