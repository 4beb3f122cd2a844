// SPDX-License-Identifier: GPL-3.0-only

use health_types::HealthRecord;

/// A user-facing message about a command that could not run or failed
/// remotely. Kept until explicitly dismissed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub text: String,
}

/// Panel state. The record is owned by the device service and replaced
/// wholesale on every update; `menu_open` and `notices` are the only local
/// state.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PanelState {
    pub record: Option<HealthRecord>,
    pub menu_open: bool,
    pub notices: Vec<Notice>,
}

impl PanelState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_record(record: HealthRecord) -> Self {
        Self {
            record: Some(record),
            ..Self::default()
        }
    }
}
