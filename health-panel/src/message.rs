// SPDX-License-Identifier: GPL-3.0-only

use health_types::HealthRecord;

use crate::update::TestCommand;

/// Entries of the self-test action menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TestAction {
    RunShort,
    RunExtended,
    RunConveyance,
    Abort,
}

#[derive(Debug, Clone, PartialEq)]
pub enum PanelMessage {
    /// Fresh record pushed by the device service; replaces the old one
    /// wholesale.
    RecordUpdated(HealthRecord),

    /// Action menu opened or closed.
    MenuToggled(bool),

    /// User picked a menu entry.
    ActionSelected(TestAction),

    /// The embedding layer finished executing a command; `error` carries the
    /// remote failure text, if any.
    CommandFinished {
        command: TestCommand,
        error: Option<String>,
    },

    /// Notice at the given index dismissed by the user.
    NoticeDismissed(usize),
}
