// SPDX-License-Identifier: GPL-3.0-only

//! Shared display formatting: temperature, pluralised counts, timestamps.

use chrono::{Local, TimeZone};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TemperatureUnit {
    Celsius,
    Fahrenheit,
    #[default]
    Both,
}

/// Presentation settings the panel threads through to the formatters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisplayOptions {
    pub temperature_unit: TemperatureUnit,
    /// strftime format for the last-update row
    pub time_format: String,
}

impl Default for DisplayOptions {
    fn default() -> Self {
        Self {
            temperature_unit: TemperatureUnit::default(),
            time_format: "%Y-%m-%d %H:%M".to_string(),
        }
    }
}

/// Format a Kelvin reading for display. Callers check availability first
/// (readings of 0 or below mean the sensor reported nothing).
pub fn format_temperature(kelvin: f64, unit: TemperatureUnit) -> String {
    let celsius = kelvin - 273.15;
    let fahrenheit = celsius * 9.0 / 5.0 + 32.0;
    match unit {
        TemperatureUnit::Celsius => format!("{celsius:.1}° C"),
        TemperatureUnit::Fahrenheit => format!("{fahrenheit:.1}° F"),
        TemperatureUnit::Both => format!("{celsius:.1}° C / {fahrenheit:.1}° F"),
    }
}

/// "1 sector", "2 sectors": plural form only when the count exceeds one.
pub fn count_with_unit(count: i64, singular: &str, plural: &str) -> String {
    if count > 1 {
        format!("{count} {plural}")
    } else {
        format!("{count} {singular}")
    }
}

/// Epoch seconds as local time. An epoch chrono cannot represent yields an
/// empty string rather than a panic.
pub fn format_timestamp(epoch_seconds: u64, fmt: &str) -> String {
    let Ok(seconds) = i64::try_from(epoch_seconds) else {
        return String::new();
    };
    match Local.timestamp_opt(seconds, 0).single() {
        Some(dt) => dt.format(fmt).to_string(),
        None => String::new(),
    }
}
