// SPDX-License-Identifier: GPL-3.0-only

//! Drive discovery - builds health_types::DriveSummary directly from UDisks2.

use std::collections::{HashMap, HashSet};

use health_types::DriveSummary;
use udisks2::{block::BlockProxy, drive::DriveProxy};
use zbus::Connection;
use zbus::zvariant::OwnedObjectPath;

use crate::bytestring as bs;
use crate::error::HealthError;
use crate::manager::UDisks2ManagerProxy;
use crate::record::probe_device_class;

/// Enumerate drives known to UDisks2.
///
/// Partition block objects and drive-less blocks (loop devices) are skipped;
/// a block whose drive was already seen is deduplicated. Per-device failures
/// are logged and skipped so a single misbehaving device cannot hide the
/// rest.
pub async fn list_drives(connection: &Connection) -> Result<Vec<DriveSummary>, HealthError> {
    let manager_proxy = UDisks2ManagerProxy::new(connection)
        .await
        .map_err(|e| HealthError::DBusError(e.to_string()))?;

    let block_paths = manager_proxy
        .get_block_devices(HashMap::new())
        .await
        .map_err(|e| HealthError::DBusError(e.to_string()))?;

    let mut seen: HashSet<OwnedObjectPath> = HashSet::new();
    let mut drives = Vec::new();

    for block_path in block_paths {
        let block_proxy = match BlockProxy::builder(connection)
            .path(&block_path)?
            .build()
            .await
        {
            Ok(p) => p,
            Err(e) => {
                tracing::info!("Could not get block device: {}", e);
                continue;
            }
        };

        // Partitions point at the same drive as their parent block device.
        if let Ok(partition_proxy) = udisks2::partition::PartitionProxy::builder(connection)
            .path(&block_path)?
            .build()
            .await
            && partition_proxy.table().await.is_ok()
        {
            continue;
        }

        let drive_path = match block_proxy.drive().await {
            Ok(dp) if dp.as_str() != "/" => dp,
            _ => continue,
        };

        if !seen.insert(drive_path.clone()) {
            continue;
        }

        match summarize_drive(connection, &block_proxy, drive_path).await {
            Ok(summary) => drives.push(summary),
            Err(e) => {
                tracing::warn!("Skipping drive for {}: {}", block_path.as_str(), e);
            }
        }
    }

    Ok(drives)
}

async fn summarize_drive(
    connection: &Connection,
    block_proxy: &BlockProxy<'_>,
    drive_path: OwnedObjectPath,
) -> Result<DriveSummary, HealthError> {
    let preferred_device = bs::decode_c_string_bytes(
        &block_proxy
            .preferred_device()
            .await
            .map_err(|e| HealthError::DBusError(e.to_string()))?,
    );
    let device = if preferred_device.is_empty() {
        bs::decode_c_string_bytes(
            &block_proxy
                .device()
                .await
                .map_err(|e| HealthError::DBusError(e.to_string()))?,
        )
    } else {
        preferred_device
    };

    let drive_proxy = DriveProxy::builder(connection)
        .path(&drive_path)?
        .build()
        .await
        .map_err(|e| HealthError::DBusError(e.to_string()))?;

    let model = drive_proxy.model().await.unwrap_or_default();
    let serial = drive_proxy.serial().await.unwrap_or_default();

    let class = probe_device_class(connection, &drive_path).await.ok();

    Ok(DriveSummary {
        device,
        drive_path: drive_path.to_string(),
        model,
        serial,
        class,
    })
}
