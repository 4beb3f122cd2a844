// SPDX-License-Identifier: GPL-3.0-only

//! Test controller: folds messages into the panel state and hands back the
//! remote command to run, if any.
//!
//! The device service owns the true test state. Selecting an action only
//! produces a command for the embedding layer to execute; the state change
//! arrives later as a fresh record. There is no optimistic update, no retry
//! and no serialization of overlapping commands.

use health_types::{DeviceClass, HealthRecord, SelfTestKind};
use tracing::{debug, error};

use crate::message::{PanelMessage, TestAction};
use crate::state::{Notice, PanelState};

/// A remote self-test command for the embedding layer to execute
/// asynchronously.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TestCommand {
    Start(SelfTestKind),
    Abort,
}

impl TestCommand {
    /// Short human-readable description, used in failure notices.
    pub fn describe(self) -> &'static str {
        match self {
            Self::Start(SelfTestKind::Short) => "Short self-test",
            Self::Start(SelfTestKind::Extended) => "Extended self-test",
            Self::Start(SelfTestKind::Conveyance) => "Conveyance self-test",
            Self::Abort => "Self-test abort",
        }
    }
}

fn command_for(action: TestAction) -> TestCommand {
    match action {
        TestAction::RunShort => TestCommand::Start(SelfTestKind::Short),
        TestAction::RunExtended => TestCommand::Start(SelfTestKind::Extended),
        TestAction::RunConveyance => TestCommand::Start(SelfTestKind::Conveyance),
        TestAction::Abort => TestCommand::Abort,
    }
}

/// Re-check the gate against the current record. Menus are built from the
/// same record, but the record may have changed between render and click, so
/// selection never trusts the menu's enablement.
fn gate(action: TestAction, record: &HealthRecord) -> Result<TestCommand, String> {
    let command = command_for(action);
    match command {
        TestCommand::Abort => {
            if record.selftest_running() {
                Ok(command)
            } else {
                Err("No self-test is running".to_string())
            }
        }
        TestCommand::Start(kind) => {
            if record.selftest_running() {
                Err("A self-test is already in progress".to_string())
            } else if kind == SelfTestKind::Conveyance
                && record.class() != DeviceClass::Rotational
            {
                Err("Conveyance tests are only available on rotational drives".to_string())
            } else {
                Ok(command)
            }
        }
    }
}

/// Fold one message into the state. Returns the command the embedding layer
/// should execute, if the message produced one.
pub fn update(state: &mut PanelState, message: PanelMessage) -> Option<TestCommand> {
    match message {
        PanelMessage::RecordUpdated(record) => {
            state.record = Some(record);
            None
        }
        PanelMessage::MenuToggled(open) => {
            state.menu_open = open;
            None
        }
        PanelMessage::ActionSelected(action) => {
            // The menu always closes, whether or not a command is produced.
            state.menu_open = false;

            let Some(record) = &state.record else {
                debug!(?action, "action selected before any health record arrived");
                state.notices.push(Notice {
                    text: "No health data available yet".to_string(),
                });
                return None;
            };

            match gate(action, record) {
                Ok(command) => Some(command),
                Err(reason) => {
                    debug!(?action, %reason, "action not available");
                    state.notices.push(Notice { text: reason });
                    None
                }
            }
        }
        PanelMessage::CommandFinished { command, error } => {
            if let Some(e) = error {
                error!(%e, command = command.describe(), "self-test command failed");
                state.notices.push(Notice {
                    text: format!("{} failed: {}", command.describe(), e),
                });
            }
            None
        }
        PanelMessage::NoticeDismissed(index) => {
            if index < state.notices.len() {
                state.notices.remove(index);
            }
            None
        }
    }
}
