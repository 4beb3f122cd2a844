// SPDX-License-Identifier: GPL-3.0-only

//! Shared data models for drive health monitoring.
//!
//! These types represent the canonical domain model for SMART health data.
//! All layers (health-udisks, health-panel, health-app) use these as the
//! single source of truth.

mod record;
mod smart;

pub use record::{ClassDetail, DeviceClass, DriveSummary, HealthRecord};
pub use smart::{CriticalWarning, CriticalWarnings, SelfTestKind, SelfTestStatus};
