// SPDX-License-Identifier: GPL-3.0-only

//! Status presenter: a pure mapping from a health record to labeled rows
//! plus the action menu model. No side effects; rendering the same record
//! twice yields identical output.

use health_types::{ClassDetail, DeviceClass, HealthRecord, SelfTestStatus};

use crate::format::{DisplayOptions, count_with_unit, format_temperature, format_timestamp};
use crate::labels::{selftest_status_label, warnings_text};
use crate::message::TestAction;
use crate::state::PanelState;

/// One labeled line of the two-column display list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Row {
    pub label: &'static str,
    pub text: String,
}

/// One entry of the self-test action menu.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MenuItem {
    pub action: TestAction,
    pub label: &'static str,
    pub enabled: bool,
}

/// The full display block handed to the embedding layer: title and action
/// menu header, labeled rows, pending notices.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PanelBlock {
    pub title: &'static str,
    pub menu: Vec<MenuItem>,
    pub rows: Vec<Row>,
    pub notices: Vec<String>,
}

/// Build the display rows for a record. Row order is fixed; class-foreign
/// rows are suppressed rather than rendered empty.
pub fn health_rows(record: &HealthRecord, options: &DisplayOptions) -> Vec<Row> {
    let mut rows = Vec::with_capacity(7);

    let mut assessment = if record.is_failing() {
        match &record.detail {
            ClassDetail::Rotational { .. } => "Disk is failing".to_string(),
            ClassDetail::SolidState {
                critical_warnings, ..
            } => format!("Disk is failing: {}", warnings_text(*critical_warnings)),
        }
    } else {
        "Disk is OK".to_string()
    };
    if record.temperature_available() {
        assessment.push_str(&format!(
            " ({})",
            format_temperature(record.temperature_kelvin, options.temperature_unit)
        ));
    }
    rows.push(Row {
        label: "Assessment",
        text: assessment,
    });

    rows.push(Row {
        label: "Power on hours",
        text: format!("{} hours", record.power_on_hours()),
    });

    rows.push(Row {
        label: "Selftest status",
        text: selftest_status_label(record.selftest_status).to_string(),
    });

    if record.selftest_status == SelfTestStatus::InProgress
        && (0..=100).contains(&record.selftest_percent_remaining)
    {
        rows.push(Row {
            label: "Progress",
            text: format!("{}%", 100 - record.selftest_percent_remaining),
        });
    }

    rows.push(Row {
        label: "Last update",
        text: format_timestamp(record.updated, &options.time_format),
    });

    if let ClassDetail::Rotational {
        bad_sectors,
        attributes_failing,
        ..
    } = record.detail
    {
        rows.push(Row {
            label: "Number of bad sectors",
            text: count_with_unit(bad_sectors, "sector", "sectors"),
        });
        rows.push(Row {
            label: "Attributes failing",
            text: count_with_unit(attributes_failing as i64, "attribute", "attributes"),
        });
    }

    rows
}

/// Build the action menu for the given status and class. Start items are
/// enabled exactly when no test is running; abort exactly when one is.
/// Conveyance only exists for rotational drives.
pub fn menu_items(status: SelfTestStatus, class: DeviceClass) -> Vec<MenuItem> {
    let running = status.running();
    let mut items = vec![
        MenuItem {
            action: TestAction::RunShort,
            label: "Run short test",
            enabled: !running,
        },
        MenuItem {
            action: TestAction::RunExtended,
            label: "Run extended test",
            enabled: !running,
        },
    ];
    if class == DeviceClass::Rotational {
        items.push(MenuItem {
            action: TestAction::RunConveyance,
            label: "Run conveyance test",
            enabled: !running,
        });
    }
    items.push(MenuItem {
        action: TestAction::Abort,
        label: "Abort test",
        enabled: running,
    });
    items
}

/// Assemble the display block from the current state. Without a record yet
/// there is nothing to show but the pending notices.
pub fn view(state: &PanelState, options: &DisplayOptions) -> PanelBlock {
    let (menu, rows) = match &state.record {
        Some(record) => (
            menu_items(record.selftest_status, record.class()),
            health_rows(record, options),
        ),
        None => (Vec::new(), Vec::new()),
    };

    PanelBlock {
        title: "Device health (SMART)",
        menu,
        rows,
        notices: state.notices.iter().map(|n| n.text.clone()).collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use health_types::{CriticalWarning, CriticalWarnings};

    fn options() -> DisplayOptions {
        DisplayOptions::default()
    }

    fn rotational(status: SelfTestStatus, percent_remaining: i32) -> HealthRecord {
        HealthRecord {
            selftest_status: status,
            selftest_percent_remaining: percent_remaining,
            updated: 1_700_000_000,
            temperature_kelvin: 0.0,
            detail: ClassDetail::Rotational {
                power_on_seconds: 7260,
                failing: false,
                bad_sectors: 1,
                attributes_failing: 0,
            },
        }
    }

    fn solid_state(warnings: CriticalWarnings) -> HealthRecord {
        HealthRecord {
            selftest_status: SelfTestStatus::Success,
            selftest_percent_remaining: -1,
            updated: 1_700_000_000,
            temperature_kelvin: 0.0,
            detail: ClassDetail::SolidState {
                power_on_hours: 500,
                critical_warnings: warnings,
            },
        }
    }

    fn row_text<'a>(rows: &'a [Row], label: &str) -> Option<&'a str> {
        rows.iter()
            .find(|r| r.label == label)
            .map(|r| r.text.as_str())
    }

    #[test]
    fn progress_row_absent_unless_in_progress() {
        for status in [
            SelfTestStatus::Success,
            SelfTestStatus::Aborted,
            SelfTestStatus::Fatal,
            SelfTestStatus::Unknown,
        ] {
            let rows = health_rows(&rotational(status, 40), &options());
            assert!(row_text(&rows, "Progress").is_none(), "{status:?}");
        }
    }

    #[test]
    fn progress_row_shows_completed_percentage() {
        let rows = health_rows(&rotational(SelfTestStatus::InProgress, 40), &options());
        assert_eq!(row_text(&rows, "Progress"), Some("60%"));
    }

    #[test]
    fn progress_row_suppressed_for_not_applicable_percent() {
        let rows = health_rows(&rotational(SelfTestStatus::InProgress, -1), &options());
        assert!(row_text(&rows, "Progress").is_none());
    }

    #[test]
    fn rotational_power_on_hours_are_rounded() {
        let rows = health_rows(&rotational(SelfTestStatus::Success, -1), &options());
        assert_eq!(row_text(&rows, "Power on hours"), Some("2 hours"));
    }

    #[test]
    fn healthy_solid_state_assessment() {
        let rows = health_rows(&solid_state(CriticalWarnings::empty()), &options());
        assert_eq!(row_text(&rows, "Assessment"), Some("Disk is OK"));
    }

    #[test]
    fn failing_solid_state_lists_reasons() {
        let record = solid_state(CriticalWarning::Temperature | CriticalWarning::Degraded);
        let rows = health_rows(&record, &options());
        assert_eq!(
            row_text(&rows, "Assessment"),
            Some(
                "Disk is failing: Temperature outside of recommended thresholds, Degraded"
            )
        );
    }

    #[test]
    fn failing_rotational_uses_fixed_message() {
        let mut record = rotational(SelfTestStatus::Success, -1);
        record.detail = ClassDetail::Rotational {
            power_on_seconds: 7260,
            failing: true,
            bad_sectors: 2,
            attributes_failing: 1,
        };
        let rows = health_rows(&record, &options());
        assert_eq!(row_text(&rows, "Assessment"), Some("Disk is failing"));
        assert_eq!(row_text(&rows, "Number of bad sectors"), Some("2 sectors"));
        assert_eq!(row_text(&rows, "Attributes failing"), Some("1 attribute"));
    }

    #[test]
    fn temperature_annotation_appended_when_available() {
        let mut record = solid_state(CriticalWarnings::empty());
        record.temperature_kelvin = 310.15;
        let rows = health_rows(&record, &options());
        assert_eq!(
            row_text(&rows, "Assessment"),
            Some("Disk is OK (37.0° C / 98.6° F)")
        );
    }

    #[test]
    fn bad_sector_count_pluralises() {
        let rows = health_rows(&rotational(SelfTestStatus::Success, -1), &options());
        assert_eq!(row_text(&rows, "Number of bad sectors"), Some("1 sector"));
    }

    #[test]
    fn rotational_only_rows_suppressed_for_solid_state() {
        let rows = health_rows(&solid_state(CriticalWarnings::empty()), &options());
        assert!(row_text(&rows, "Number of bad sectors").is_none());
        assert!(row_text(&rows, "Attributes failing").is_none());
    }

    #[test]
    fn unknown_status_renders_blank_row() {
        let record = rotational(SelfTestStatus::Unknown, -1);
        let rows = health_rows(&record, &options());
        assert_eq!(row_text(&rows, "Selftest status"), Some(""));
    }

    #[test]
    fn rendering_is_idempotent() {
        let record = rotational(SelfTestStatus::InProgress, 25);
        let first = health_rows(&record, &options());
        let second = health_rows(&record, &options());
        assert_eq!(first, second);
    }

    #[test]
    fn start_items_disabled_exactly_while_running() {
        let items = menu_items(SelfTestStatus::InProgress, DeviceClass::Rotational);
        for item in &items {
            match item.action {
                TestAction::Abort => assert!(item.enabled),
                _ => assert!(!item.enabled, "{:?}", item.action),
            }
        }

        let items = menu_items(SelfTestStatus::Success, DeviceClass::Rotational);
        for item in &items {
            match item.action {
                TestAction::Abort => assert!(!item.enabled),
                _ => assert!(item.enabled, "{:?}", item.action),
            }
        }
    }

    #[test]
    fn conveyance_item_is_rotational_only() {
        let rotational_items = menu_items(SelfTestStatus::Success, DeviceClass::Rotational);
        assert!(
            rotational_items
                .iter()
                .any(|i| i.action == TestAction::RunConveyance)
        );

        let ssd_items = menu_items(SelfTestStatus::Success, DeviceClass::SolidState);
        assert!(
            !ssd_items
                .iter()
                .any(|i| i.action == TestAction::RunConveyance)
        );
    }

    #[test]
    fn view_without_record_shows_only_notices() {
        let mut state = PanelState::new();
        state.notices.push(crate::state::Notice {
            text: "Short self-test failed: timed out".to_string(),
        });
        let block = view(&state, &options());
        assert!(block.rows.is_empty());
        assert!(block.menu.is_empty());
        assert_eq!(block.notices, vec!["Short self-test failed: timed out"]);
    }
}
