// SPDX-License-Identifier: GPL-3.0-only

//! Drive health panel
//!
//! A toolkit-agnostic view layer for SMART data: the presenter maps a
//! [`health_types::HealthRecord`] to labeled display rows, and the controller
//! maps user actions to self-test commands gated by the current status. Rows,
//! menus and notices are plain data; the embedding layer decides how to draw
//! them and how to execute commands.

pub mod format;
pub mod labels;
mod message;
mod state;
mod update;
mod view;

pub use format::{DisplayOptions, TemperatureUnit};
pub use message::{PanelMessage, TestAction};
pub use state::{Notice, PanelState};
pub use update::{TestCommand, update};
pub use view::{MenuItem, PanelBlock, Row, health_rows, menu_items, view};
