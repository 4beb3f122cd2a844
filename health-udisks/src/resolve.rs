// SPDX-License-Identifier: GPL-3.0-only

//! Resolve device paths to UDisks2 object paths.
//! Drive-level operations (SMART reads, self-tests) address the drive object,
//! which is found through the block object for the device node.

use std::collections::HashMap;

use udisks2::block::BlockProxy;
use zbus::Connection;
use zbus::zvariant::OwnedObjectPath;

use crate::bytestring as bs;
use crate::error::HealthError;
use crate::manager::UDisks2ManagerProxy;

fn canonicalize_best_effort(p: &str) -> Option<String> {
    std::fs::canonicalize(p)
        .ok()
        .map(|c| c.to_string_lossy().to_string())
}

/// Resolve a device path (e.g. "/dev/sda") to the UDisks2 block object path.
/// Uses preferred_device or device from Block proxy; matches exact path or canonical path.
pub async fn block_object_path_for_device(
    connection: &Connection,
    device: &str,
) -> Result<OwnedObjectPath, HealthError> {
    let manager_proxy = UDisks2ManagerProxy::new(connection)
        .await
        .map_err(|e| HealthError::DBusError(e.to_string()))?;

    let block_paths = manager_proxy
        .get_block_devices(HashMap::new())
        .await
        .map_err(|e| HealthError::DBusError(e.to_string()))?;

    let device_canon = canonicalize_best_effort(device);

    for obj in &block_paths {
        let proxy = match BlockProxy::builder(connection).path(obj)?.build().await {
            Ok(p) => p,
            Err(_) => continue,
        };

        let preferred_device = bs::decode_c_string_bytes(
            &proxy
                .preferred_device()
                .await
                .map_err(|e| HealthError::DBusError(e.to_string()))?,
        );
        let block_device = if preferred_device.is_empty() {
            bs::decode_c_string_bytes(
                &proxy
                    .device()
                    .await
                    .map_err(|e| HealthError::DBusError(e.to_string()))?,
            )
        } else {
            preferred_device
        };

        if block_device.is_empty() {
            continue;
        }

        if block_device == device {
            return Ok(obj.clone());
        }
        if let Some(ref canon) = device_canon {
            if let Some(block_canon) = canonicalize_best_effort(&block_device) {
                if block_canon == *canon {
                    return Ok(obj.clone());
                }
            }
        }
    }

    Err(HealthError::DeviceNotFound(device.to_string()))
}

/// Resolve a block device path (e.g. "/dev/sda") to the UDisks2 drive object path.
pub async fn drive_object_path_for_device(
    connection: &Connection,
    device: &str,
) -> Result<OwnedObjectPath, HealthError> {
    let block_path = block_object_path_for_device(connection, device).await?;
    let block_proxy = BlockProxy::builder(connection)
        .path(&block_path)?
        .build()
        .await
        .map_err(|e| HealthError::DBusError(e.to_string()))?;

    let drive_path = block_proxy
        .drive()
        .await
        .map_err(|e| HealthError::DBusError(e.to_string()))?;

    if drive_path.as_str() == "/" {
        return Err(HealthError::DeviceNotFound(format!(
            "{} has no associated drive (e.g. loop device)",
            device
        )));
    }

    Ok(drive_path)
}
