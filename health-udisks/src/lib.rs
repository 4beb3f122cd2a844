// SPDX-License-Identifier: GPL-3.0-only

//! UDisks2 D-Bus client for drive health data.
//!
//! Talks to `org.freedesktop.UDisks2` on the system bus: reads SMART health
//! records from `Drive.Ata` / `NVMe.Controller`, starts and aborts
//! self-tests, resolves device paths to drive objects, discovers drives and
//! streams record updates driven by `PropertiesChanged` signals.

mod bytestring;
mod discovery;
mod error;
mod manager;
mod ops;
mod record;
mod resolve;
mod selftest;
mod watch;

pub use discovery::list_drives;
pub use error::HealthError;
pub use ops::{HealthOps, UDisks2HealthOps};
pub use record::{probe_device_class, read_health_record, refresh_smart};
pub use resolve::{block_object_path_for_device, drive_object_path_for_device};
pub use selftest::{abort_selftest, start_selftest};
pub use watch::{HealthEventStream, record_stream};
