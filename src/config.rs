//! Configuration loading for snaprotate.
//!
//! Settings come from three layers, later layers winning: built-in
//! defaults, a `snaprotate.toml` file, and `SNAPROTATE__`-prefixed
//! environment variables (`__`-separated, e.g.
//! `SNAPROTATE__RETENTION__HOURLY=24`).
//!
//! A malformed or unreadable configuration is never fatal: the process
//! logs a warning and falls back to the built-in defaults, since those
//! are well-defined.

use std::path::Path;

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use tracing::warn;

/// Default configuration file name, looked up in the working directory.
pub const DEFAULT_CONFIG_FILE: &str = "snaprotate.toml";

/// Environment variable prefix for configuration overrides.
pub const ENV_PREFIX: &str = "SNAPROTATE__";

/// Top-level configuration.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct Config {
    /// How many periods of history each tier keeps, plus the safety floor.
    #[serde(default)]
    pub retention: RetentionSection,

    /// Calendar anchors for the rotation boundary tests.
    #[serde(default)]
    pub rotation: RotationSection,
}

/// Tier counts and the minimum-retained safety floor.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct RetentionSection {
    /// Hours of hourly history to keep.
    ///
    /// Env: SNAPROTATE__RETENTION__HOURLY
    #[serde(default = "default_hourly")]
    pub hourly: u32,

    /// Days of daily history to keep.
    ///
    /// Env: SNAPROTATE__RETENTION__DAILY
    #[serde(default = "default_daily")]
    pub daily: u32,

    /// Weeks of weekly history to keep.
    ///
    /// Env: SNAPROTATE__RETENTION__WEEKLY
    #[serde(default = "default_weekly")]
    pub weekly: u32,

    /// Months (4-week approximation) of monthly history to keep.
    ///
    /// Env: SNAPROTATE__RETENTION__MONTHLY
    #[serde(default = "default_monthly")]
    pub monthly: u32,

    /// Never delete if fewer than this many snapshots would remain.
    ///
    /// Env: SNAPROTATE__RETENTION__MINIMUM
    #[serde(default = "default_minimum")]
    pub minimum: usize,
}

fn default_hourly() -> u32 {
    12
}

fn default_daily() -> u32 {
    7
}

fn default_weekly() -> u32 {
    4
}

fn default_monthly() -> u32 {
    3
}

fn default_minimum() -> usize {
    10
}

impl Default for RetentionSection {
    fn default() -> Self {
        Self {
            hourly: default_hourly(),
            daily: default_daily(),
            weekly: default_weekly(),
            monthly: default_monthly(),
            minimum: default_minimum(),
        }
    }
}

/// Rotation anchors: when a snapshot aging out of a tier counts as the
/// canonical sample for the next coarser tier.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct RotationSection {
    /// Hour of day (0-23) for daily promotion.
    ///
    /// Env: SNAPROTATE__ROTATION__DAILY
    #[serde(default = "default_rotation_daily")]
    pub daily: u32,

    /// Weekday name for weekly/monthly promotion. Parsed by
    /// [`crate::policy::RetentionPolicy::from_config`]; full or
    /// abbreviated English names are accepted, case-insensitively.
    ///
    /// Env: SNAPROTATE__ROTATION__WEEKLY
    #[serde(default = "default_rotation_weekly")]
    pub weekly: String,
}

fn default_rotation_daily() -> u32 {
    23
}

fn default_rotation_weekly() -> String {
    "Sunday".to_string()
}

impl Default for RotationSection {
    fn default() -> Self {
        Self {
            daily: default_rotation_daily(),
            weekly: default_rotation_weekly(),
        }
    }
}

impl Config {
    /// Load configuration from `snaprotate.toml` (if present) and the
    /// environment, layered over the defaults.
    pub fn load() -> Result<Self, Box<figment::Error>> {
        Self::from_figment(Toml::file(DEFAULT_CONFIG_FILE))
    }

    /// Load configuration from an explicit file path plus the environment.
    pub fn load_from_path(path: &Path) -> Result<Self, Box<figment::Error>> {
        Self::from_figment(Toml::file_exact(path))
    }

    fn from_figment(
        file: figment::providers::Data<figment::providers::Toml>,
    ) -> Result<Self, Box<figment::Error>> {
        Figment::from(Serialized::defaults(Config::default()))
            .merge(file)
            .merge(Env::prefixed(ENV_PREFIX).split("__"))
            .extract()
            .map_err(Box::new)
    }
}

/// Load configuration, falling back to built-in defaults on any error.
pub fn load_or_default(path: Option<&Path>) -> Config {
    let loaded = match path {
        Some(path) => Config::load_from_path(path),
        None => Config::load(),
    };

    match loaded {
        Ok(config) => config,
        Err(e) => {
            warn!(error = %e, "failed to load configuration, using built-in defaults");
            Config::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.retention.hourly, 12);
        assert_eq!(config.retention.daily, 7);
        assert_eq!(config.retention.weekly, 4);
        assert_eq!(config.retention.monthly, 3);
        assert_eq!(config.retention.minimum, 10);
        assert_eq!(config.rotation.daily, 23);
        assert_eq!(config.rotation.weekly, "Sunday");
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[retention]\nhourly = 24\nminimum = 5").unwrap();

        let config = Config::load_from_path(file.path()).unwrap();
        assert_eq!(config.retention.hourly, 24);
        assert_eq!(config.retention.minimum, 5);
        // untouched keys keep their defaults
        assert_eq!(config.retention.daily, 7);
        assert_eq!(config.rotation.daily, 23);
    }

    #[test]
    fn test_rotation_section_from_toml() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[rotation]\ndaily = 4\nweekly = \"Monday\"").unwrap();

        let config = Config::load_from_path(file.path()).unwrap();
        assert_eq!(config.rotation.daily, 4);
        assert_eq!(config.rotation.weekly, "Monday");
    }

    #[test]
    fn test_malformed_file_falls_back_to_defaults() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "retention = \"not a table\"").unwrap();

        let config = load_or_default(Some(file.path()));
        assert_eq!(config.retention.hourly, 12);
        assert_eq!(config.retention.minimum, 10);
    }
}
