// SPDX-License-Identifier: GPL-3.0-only

//! Drive health records
//!
//! A [`HealthRecord`] is replaced wholesale each time the device service
//! publishes fresh SMART data; consumers treat it as read-only and never
//! cache one beyond the current render.

use serde::{Deserialize, Serialize};

use crate::smart::{CriticalWarnings, SelfTestStatus};

/// The two storage media categories, each exposing a different subset of
/// health fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DeviceClass {
    Rotational,
    SolidState,
}

/// Class-specific health fields, discriminated by [`DeviceClass`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "class", rename_all = "kebab-case")]
pub enum ClassDetail {
    Rotational {
        /// Total power-on time in seconds (`SmartPowerOnSeconds`)
        power_on_seconds: u64,

        /// Overall SMART assessment (`SmartFailing`)
        failing: bool,

        /// Number of bad sectors (`SmartNumBadSectors`)
        bad_sectors: i64,

        /// Number of attributes past their failure threshold
        /// (`SmartNumAttributesFailing`)
        attributes_failing: i32,
    },
    SolidState {
        /// Total power-on time in hours (`SmartPowerOnHours`)
        power_on_hours: u64,

        /// Active controller warnings; empty means healthy
        critical_warnings: CriticalWarnings,
    },
}

/// SMART health snapshot for a single drive
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HealthRecord {
    /// Status of the most recent self-test
    pub selftest_status: SelfTestStatus,

    /// Percent of the running self-test still remaining; -1 when not
    /// applicable. Only meaningful while `selftest_status` is `InProgress`.
    pub selftest_percent_remaining: i32,

    /// Seconds since epoch (UTC) when SMART data was last updated
    pub updated: u64,

    /// Temperature in Kelvin; 0 or negative means unavailable
    pub temperature_kelvin: f64,

    /// Class-specific fields
    pub detail: ClassDetail,
}

impl HealthRecord {
    pub fn class(&self) -> DeviceClass {
        match self.detail {
            ClassDetail::Rotational { .. } => DeviceClass::Rotational,
            ClassDetail::SolidState { .. } => DeviceClass::SolidState,
        }
    }

    /// Power-on hours regardless of class: rotational drives report seconds,
    /// which are rounded to the nearest hour; solid-state drives report hours
    /// directly.
    pub fn power_on_hours(&self) -> u64 {
        match self.detail {
            ClassDetail::Rotational {
                power_on_seconds, ..
            } => ((power_on_seconds as f64) / 3600.0).round() as u64,
            ClassDetail::SolidState { power_on_hours, .. } => power_on_hours,
        }
    }

    /// Overall assessment: rotational drives are failing when SMART says so,
    /// solid-state drives when any critical warning is set.
    pub fn is_failing(&self) -> bool {
        match &self.detail {
            ClassDetail::Rotational { failing, .. } => *failing,
            ClassDetail::SolidState {
                critical_warnings, ..
            } => !critical_warnings.is_empty(),
        }
    }

    /// Whether a self-test is currently running
    pub fn selftest_running(&self) -> bool {
        self.selftest_status.running()
    }

    /// Whether the temperature reading is usable for display
    pub fn temperature_available(&self) -> bool {
        self.temperature_kelvin > 0.0
    }
}

/// Discovery result: one drive known to the device service
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DriveSummary {
    /// Device path (e.g. "/dev/sda")
    pub device: String,

    /// UDisks2 drive object path
    pub drive_path: String,

    /// Drive model name
    pub model: String,

    /// Serial number
    pub serial: String,

    /// Media class; None when the drive exposes no SMART-capable interface
    pub class: Option<DeviceClass>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::smart::CriticalWarning;

    fn rotational_record() -> HealthRecord {
        HealthRecord {
            selftest_status: SelfTestStatus::Success,
            selftest_percent_remaining: -1,
            updated: 1_700_000_000,
            temperature_kelvin: 310.0,
            detail: ClassDetail::Rotational {
                power_on_seconds: 7260,
                failing: false,
                bad_sectors: 0,
                attributes_failing: 0,
            },
        }
    }

    #[test]
    fn rotational_hours_are_rounded_from_seconds() {
        let record = rotational_record();
        // round(7260 / 3600) = round(2.02) = 2
        assert_eq!(record.power_on_hours(), 2);
    }

    #[test]
    fn rotational_rounding_goes_up_past_the_half_hour() {
        let mut record = rotational_record();
        record.detail = ClassDetail::Rotational {
            power_on_seconds: 9000, // 2.5 h
            failing: false,
            bad_sectors: 0,
            attributes_failing: 0,
        };
        assert_eq!(record.power_on_hours(), 3);
    }

    #[test]
    fn solid_state_hours_pass_through() {
        let record = HealthRecord {
            selftest_status: SelfTestStatus::Success,
            selftest_percent_remaining: -1,
            updated: 0,
            temperature_kelvin: 0.0,
            detail: ClassDetail::SolidState {
                power_on_hours: 1234,
                critical_warnings: CriticalWarnings::empty(),
            },
        };
        assert_eq!(record.power_on_hours(), 1234);
        assert_eq!(record.class(), DeviceClass::SolidState);
    }

    #[test]
    fn empty_warnings_means_healthy() {
        let mut record = rotational_record();
        record.detail = ClassDetail::SolidState {
            power_on_hours: 1,
            critical_warnings: CriticalWarnings::empty(),
        };
        assert!(!record.is_failing());

        record.detail = ClassDetail::SolidState {
            power_on_hours: 1,
            critical_warnings: CriticalWarning::Temperature | CriticalWarning::Degraded,
        };
        assert!(record.is_failing());
    }

    #[test]
    fn smart_failing_flag_drives_rotational_assessment() {
        let mut record = rotational_record();
        assert!(!record.is_failing());
        record.detail = ClassDetail::Rotational {
            power_on_seconds: 7260,
            failing: true,
            bad_sectors: 12,
            attributes_failing: 1,
        };
        assert!(record.is_failing());
    }

    #[test]
    fn record_serialization_round_trips() {
        let record = rotational_record();
        let json = serde_json::to_string(&record).unwrap();
        let deserialized: HealthRecord = serde_json::from_str(&json).unwrap();
        assert_eq!(record, deserialized);
    }

    #[test]
    fn summary_serialization_round_trips() {
        let summary = DriveSummary {
            device: "/dev/nvme0n1".to_string(),
            drive_path: "/org/freedesktop/UDisks2/drives/Samsung_SSD_970_EVO_S1234567890"
                .to_string(),
            model: "Samsung SSD 970 EVO".to_string(),
            serial: "S1234567890".to_string(),
            class: Some(DeviceClass::SolidState),
        };
        let json = serde_json::to_string(&summary).unwrap();
        let deserialized: DriveSummary = serde_json::from_str(&json).unwrap();
        assert_eq!(summary, deserialized);
    }
}
