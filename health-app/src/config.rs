// SPDX-License-Identifier: GPL-3.0-only

//! User configuration, read from `~/.config/drive-health/config.toml`.
//! A missing file means defaults; a malformed file falls back to defaults
//! with a warning.

use health_panel::{DisplayOptions, TemperatureUnit};
use serde::Deserialize;

#[derive(Deserialize, Debug, PartialEq)]
pub struct Config {
    #[serde(default)]
    pub temperature_unit: TemperatureUnit,

    #[serde(default = "default_time_format")]
    pub time_format: String,

    /// Ask the drive for fresh SMART data before `show`
    #[serde(default)]
    pub refresh_on_show: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            temperature_unit: TemperatureUnit::default(),
            time_format: default_time_format(),
            refresh_on_show: false,
        }
    }
}

fn default_time_format() -> String {
    "%Y-%m-%d %H:%M".to_string()
}

impl Config {
    pub fn load() -> Self {
        let conf_path = dirs::config_dir()
            .unwrap_or_else(|| std::path::PathBuf::from("."))
            .join("drive-health")
            .join("config.toml");

        match std::fs::read_to_string(&conf_path) {
            Ok(config_str) => toml::from_str(&config_str).unwrap_or_else(|e| {
                tracing::warn!("Failed to parse config file {:?}: {}", conf_path, e);
                Config::default()
            }),
            Err(_) => Config::default(),
        }
    }

    pub fn display_options(&self) -> DisplayOptions {
        DisplayOptions {
            temperature_unit: self.temperature_unit,
            time_format: self.time_format.clone(),
        }
    }
}
