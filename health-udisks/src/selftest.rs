// SPDX-License-Identifier: GPL-3.0-only

//! SMART self-test operations
//!
//! `SmartSelftestStart` / `SmartSelftestAbort` on whichever SMART-capable
//! interface the drive exposes. Both are fire-and-forget from the drive's
//! point of view: the call returns once the test is queued, and progress
//! arrives later through property updates.

use std::collections::HashMap;

use health_types::{DeviceClass, SelfTestKind};
use zbus::Connection;
use zbus::zvariant::{OwnedObjectPath, Value};

use crate::error::HealthError;
use crate::record::{ATA_IFACE, NVME_IFACE, probe_device_class};

async fn smart_call(
    connection: &Connection,
    drive_path: &OwnedObjectPath,
    method: &str,
    kind: Option<SelfTestKind>,
) -> Result<(), HealthError> {
    let interface = match probe_device_class(connection, drive_path).await? {
        DeviceClass::SolidState => NVME_IFACE,
        DeviceClass::Rotational => ATA_IFACE,
    };

    let proxy = zbus::Proxy::new(
        connection,
        "org.freedesktop.UDisks2",
        drive_path.as_str(),
        interface,
    )
    .await?;

    let options: HashMap<&str, Value<'_>> = HashMap::new();
    match kind {
        Some(kind) => {
            let _: () = proxy
                .call(method, &(kind.as_udisks_str(), options))
                .await?;
        }
        None => {
            let _: () = proxy.call(method, &(options)).await?;
        }
    }
    Ok(())
}

/// Start a SMART self-test on a drive
pub async fn start_selftest(
    connection: &Connection,
    drive_path: &OwnedObjectPath,
    kind: SelfTestKind,
) -> Result<(), HealthError> {
    smart_call(connection, drive_path, "SmartSelftestStart", Some(kind)).await
}

/// Abort a running SMART self-test on a drive
pub async fn abort_selftest(
    connection: &Connection,
    drive_path: &OwnedObjectPath,
) -> Result<(), HealthError> {
    smart_call(connection, drive_path, "SmartSelftestAbort", None).await
}
