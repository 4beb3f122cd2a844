// SPDX-License-Identifier: GPL-3.0-only

//! SMART self-test and critical-warning vocabulary
//!
//! String codes follow the UDisks2 `Drive.Ata` and `NVMe.Controller`
//! interfaces; parsing is total so an unfamiliar code coming off the bus
//! never aborts a render.

use enumflags2::{BitFlags, bitflags};
use serde::{Deserialize, Serialize};

/// Kind of SMART self-test to run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SelfTestKind {
    /// Short self-test (usually a few minutes)
    Short,
    /// Extended self-test (can take hours for large drives)
    Extended,
    /// Conveyance self-test (ATA only, checks for transport damage)
    Conveyance,
}

impl SelfTestKind {
    /// Convert to UDisks2 string representation
    pub fn as_udisks_str(self) -> &'static str {
        match self {
            Self::Short => "short",
            Self::Extended => "extended",
            Self::Conveyance => "conveyance",
        }
    }

    /// Parse from string
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "short" => Some(Self::Short),
            "extended" | "long" => Some(Self::Extended),
            "conveyance" => Some(Self::Conveyance),
            _ => None,
        }
    }
}

/// Status of the most recent SMART self-test, as reported by UDisks2
/// via `SmartSelftestStatus`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SelfTestStatus {
    // Shared values
    Success,
    Aborted,
    InProgress,

    // ATA special values
    Interrupted,
    Fatal,
    ErrorUnknown,
    ErrorElectrical,
    ErrorServo,
    ErrorRead,
    ErrorHandling,

    // NVMe special values
    CtrlReset,
    NsRemoved,
    AbortedFormat,
    FatalError,
    UnknownSegFail,
    KnownSegFail,
    AbortedUnknown,
    AbortedSanitize,

    /// A code this version does not recognise. Renders as an empty label.
    Unknown,
}

impl SelfTestStatus {
    /// Parse the UDisks2 status code. Total: unrecognised input maps to
    /// [`SelfTestStatus::Unknown`] instead of failing.
    pub fn from_udisks_str(s: &str) -> Self {
        match s {
            "success" => Self::Success,
            "aborted" => Self::Aborted,
            "inprogress" => Self::InProgress,
            "interrupted" => Self::Interrupted,
            "fatal" => Self::Fatal,
            "error_unknown" => Self::ErrorUnknown,
            "error_electrical" => Self::ErrorElectrical,
            "error_servo" => Self::ErrorServo,
            "error_read" => Self::ErrorRead,
            "error_handling" => Self::ErrorHandling,
            "ctrl_reset" => Self::CtrlReset,
            "ns_removed" => Self::NsRemoved,
            "aborted_format" => Self::AbortedFormat,
            "fatal_error" => Self::FatalError,
            "unknown_seg_fail" => Self::UnknownSegFail,
            "known_seg_fail" => Self::KnownSegFail,
            "aborted_unknown" => Self::AbortedUnknown,
            "aborted_sanitize" => Self::AbortedSanitize,
            _ => Self::Unknown,
        }
    }

    /// Whether a self-test is currently running
    pub fn running(self) -> bool {
        self == Self::InProgress
    }
}

/// NVMe critical warning flags from `SmartCriticalWarning`.
/// An empty set means the controller considers the device healthy.
#[bitflags]
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CriticalWarning {
    Spare,
    Temperature,
    Degraded,
    Readonly,
    VolatileMem,
    PmrReadonly,
}

pub type CriticalWarnings = BitFlags<CriticalWarning>;

impl CriticalWarning {
    /// Parse a single UDisks2 warning tag
    pub fn from_udisks_str(s: &str) -> Option<Self> {
        match s {
            "spare" => Some(Self::Spare),
            "temperature" => Some(Self::Temperature),
            "degraded" => Some(Self::Degraded),
            "readonly" => Some(Self::Readonly),
            "volatile_mem" => Some(Self::VolatileMem),
            "pmr_readonly" => Some(Self::PmrReadonly),
            _ => None,
        }
    }

    /// Build a warning set from the UDisks2 string array, skipping tags this
    /// version does not recognise.
    pub fn parse_set<S: AsRef<str>>(tags: &[S]) -> CriticalWarnings {
        tags.iter()
            .filter_map(|t| Self::from_udisks_str(t.as_ref()))
            .fold(CriticalWarnings::empty(), |acc, w| acc | w)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn selftest_status_parses_every_known_code() {
        let cases = [
            ("success", SelfTestStatus::Success),
            ("aborted", SelfTestStatus::Aborted),
            ("inprogress", SelfTestStatus::InProgress),
            ("interrupted", SelfTestStatus::Interrupted),
            ("fatal", SelfTestStatus::Fatal),
            ("error_unknown", SelfTestStatus::ErrorUnknown),
            ("error_electrical", SelfTestStatus::ErrorElectrical),
            ("error_servo", SelfTestStatus::ErrorServo),
            ("error_read", SelfTestStatus::ErrorRead),
            ("error_handling", SelfTestStatus::ErrorHandling),
            ("ctrl_reset", SelfTestStatus::CtrlReset),
            ("ns_removed", SelfTestStatus::NsRemoved),
            ("aborted_format", SelfTestStatus::AbortedFormat),
            ("fatal_error", SelfTestStatus::FatalError),
            ("unknown_seg_fail", SelfTestStatus::UnknownSegFail),
            ("known_seg_fail", SelfTestStatus::KnownSegFail),
            ("aborted_unknown", SelfTestStatus::AbortedUnknown),
            ("aborted_sanitize", SelfTestStatus::AbortedSanitize),
        ];
        for (code, expected) in cases {
            assert_eq!(SelfTestStatus::from_udisks_str(code), expected);
        }
    }

    #[test]
    fn selftest_status_is_total() {
        assert_eq!(
            SelfTestStatus::from_udisks_str("some_future_code"),
            SelfTestStatus::Unknown
        );
        assert_eq!(SelfTestStatus::from_udisks_str(""), SelfTestStatus::Unknown);
    }

    #[test]
    fn only_inprogress_counts_as_running() {
        assert!(SelfTestStatus::InProgress.running());
        assert!(!SelfTestStatus::Success.running());
        assert!(!SelfTestStatus::Unknown.running());
    }

    #[test]
    fn selftest_kind_round_trips() {
        for kind in [
            SelfTestKind::Short,
            SelfTestKind::Extended,
            SelfTestKind::Conveyance,
        ] {
            assert_eq!(SelfTestKind::from_str(kind.as_udisks_str()), Some(kind));
        }
        assert_eq!(SelfTestKind::from_str("long"), Some(SelfTestKind::Extended));
        assert_eq!(SelfTestKind::from_str("bogus"), None);
    }

    #[test]
    fn warning_set_skips_unknown_tags() {
        let set = CriticalWarning::parse_set(&["temperature", "degraded", "not_a_warning"]);
        assert_eq!(set, CriticalWarning::Temperature | CriticalWarning::Degraded);
    }

    #[test]
    fn warning_set_empty_means_healthy() {
        let set = CriticalWarning::parse_set::<&str>(&[]);
        assert!(set.is_empty());
    }
}
