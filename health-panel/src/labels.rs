// SPDX-License-Identifier: GPL-3.0-only

//! Human-readable labels for the enumerated status codes.
//!
//! Both lookups are total: a status this version does not recognise gets an
//! empty label so the row renders blank instead of erroring.

use health_types::{CriticalWarning, CriticalWarnings, SelfTestStatus};

/// Label for a self-test status code.
pub fn selftest_status_label(status: SelfTestStatus) -> &'static str {
    match status {
        // Shared values
        SelfTestStatus::Success => "Successful",
        SelfTestStatus::Aborted => "Aborted",
        SelfTestStatus::InProgress => "In progress",

        // ATA special values
        SelfTestStatus::Interrupted => "Interrupted",
        SelfTestStatus::Fatal => "Did not complete",
        SelfTestStatus::ErrorUnknown => "Failed (Unknown)",
        SelfTestStatus::ErrorElectrical => "Failed (Electrical)",
        SelfTestStatus::ErrorServo => "Failed (Servo)",
        SelfTestStatus::ErrorRead => "Failed (Read)",
        SelfTestStatus::ErrorHandling => "Failed (Damaged)",

        // NVMe special values
        SelfTestStatus::CtrlReset => "Aborted by a controller level reset",
        SelfTestStatus::NsRemoved => {
            "Aborted due to a removal of a namespace from the namespace inventory"
        }
        SelfTestStatus::AbortedFormat => {
            "Aborted due to the processing of a Format NVM command"
        }
        SelfTestStatus::FatalError => {
            "A fatal error or unknown test error occurred while the controller was \
             executing the device self-test operation and the operation did not complete"
        }
        SelfTestStatus::UnknownSegFail => {
            "Completed with a segment that failed and the segment that failed is not known"
        }
        SelfTestStatus::KnownSegFail => "Completed with one or more failed segments",
        SelfTestStatus::AbortedUnknown => "Aborted for unknown reason",
        SelfTestStatus::AbortedSanitize => "Aborted due to a sanitize operation",

        SelfTestStatus::Unknown => "",
    }
}

/// Label for a single NVMe critical warning flag.
pub fn critical_warning_label(warning: CriticalWarning) -> &'static str {
    match warning {
        CriticalWarning::Spare => "Spare capacity is below the threshold",
        CriticalWarning::Temperature => "Temperature outside of recommended thresholds",
        CriticalWarning::Degraded => "Degraded",
        CriticalWarning::Readonly => "All media is in read-only mode",
        CriticalWarning::VolatileMem => "Volatile memory backup failed",
        CriticalWarning::PmrReadonly => "Persistent memory has become read-only",
    }
}

/// All active warning labels joined with ", ", in flag declaration order.
pub fn warnings_text(warnings: CriticalWarnings) -> String {
    warnings
        .iter()
        .map(critical_warning_label)
        .collect::<Vec<_>>()
        .join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_status_has_an_empty_label() {
        assert_eq!(selftest_status_label(SelfTestStatus::Unknown), "");
        assert_eq!(
            selftest_status_label(SelfTestStatus::from_udisks_str("not_a_code")),
            ""
        );
    }

    #[test]
    fn known_statuses_have_labels() {
        assert_eq!(
            selftest_status_label(SelfTestStatus::Success),
            "Successful"
        );
        assert_eq!(
            selftest_status_label(SelfTestStatus::ErrorServo),
            "Failed (Servo)"
        );
    }

    #[test]
    fn warning_labels_join_in_declaration_order() {
        let set = CriticalWarning::Degraded | CriticalWarning::Temperature;
        assert_eq!(
            warnings_text(set),
            "Temperature outside of recommended thresholds, Degraded"
        );
    }

    #[test]
    fn empty_warning_set_renders_empty() {
        assert_eq!(warnings_text(CriticalWarnings::empty()), "");
    }
}
