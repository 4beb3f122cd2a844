// SPDX-License-Identifier: GPL-3.0-only

//! Health record retrieval
//!
//! Reads SMART properties from whichever of the two UDisks2 drive interfaces
//! the object exposes. NVMe is probed first, falling back to ATA; a drive
//! exposing neither yields [`HealthError::NotSupported`].

use std::collections::HashMap;

use health_types::{ClassDetail, CriticalWarning, DeviceClass, HealthRecord, SelfTestStatus};
use zbus::Connection;
use zbus::zvariant::{OwnedObjectPath, Value};

use crate::error::HealthError;

pub(crate) const ATA_IFACE: &str = "org.freedesktop.UDisks2.Drive.Ata";
pub(crate) const NVME_IFACE: &str = "org.freedesktop.UDisks2.NVMe.Controller";

async fn nvme_proxy<'a>(
    connection: &Connection,
    drive_path: &'a OwnedObjectPath,
) -> zbus::Result<zbus::Proxy<'a>> {
    zbus::Proxy::new(
        connection,
        "org.freedesktop.UDisks2",
        drive_path.as_str(),
        NVME_IFACE,
    )
    .await
}

async fn ata_proxy<'a>(
    connection: &Connection,
    drive_path: &'a OwnedObjectPath,
) -> zbus::Result<zbus::Proxy<'a>> {
    zbus::Proxy::new(
        connection,
        "org.freedesktop.UDisks2",
        drive_path.as_str(),
        ATA_IFACE,
    )
    .await
}

/// Determine which SMART-capable interface the drive object exposes.
///
/// Probes a cheap property on the NVMe controller interface first and falls
/// back to ATA; property access on an absent interface errors, which is the
/// signal to try the other one.
pub async fn probe_device_class(
    connection: &Connection,
    drive_path: &OwnedObjectPath,
) -> Result<DeviceClass, HealthError> {
    if let Ok(proxy) = nvme_proxy(connection, drive_path).await {
        if proxy.get_property::<String>("State").await.is_ok() {
            return Ok(DeviceClass::SolidState);
        }
    }

    if let Ok(proxy) = ata_proxy(connection, drive_path).await {
        if proxy.get_property::<bool>("SmartEnabled").await.is_ok() {
            return Ok(DeviceClass::Rotational);
        }
    }

    Err(HealthError::NotSupported(drive_path.to_string()))
}

/// Read the current health record for a drive.
pub async fn read_health_record(
    connection: &Connection,
    drive_path: &OwnedObjectPath,
) -> Result<HealthRecord, HealthError> {
    match probe_device_class(connection, drive_path).await? {
        DeviceClass::SolidState => read_nvme_record(connection, drive_path).await,
        DeviceClass::Rotational => read_ata_record(connection, drive_path).await,
    }
}

/// Ask the drive to refresh its SMART data (`SmartUpdate`).
pub async fn refresh_smart(
    connection: &Connection,
    drive_path: &OwnedObjectPath,
) -> Result<(), HealthError> {
    let options: HashMap<&str, Value<'_>> = HashMap::new();
    match probe_device_class(connection, drive_path).await? {
        DeviceClass::SolidState => {
            let proxy = nvme_proxy(connection, drive_path).await?;
            let _: () = proxy.call("SmartUpdate", &(options)).await?;
        }
        DeviceClass::Rotational => {
            let proxy = ata_proxy(connection, drive_path).await?;
            let _: () = proxy.call("SmartUpdate", &(options)).await?;
        }
    }
    Ok(())
}

async fn read_nvme_record(
    connection: &Connection,
    drive_path: &OwnedObjectPath,
) -> Result<HealthRecord, HealthError> {
    let proxy = nvme_proxy(connection, drive_path).await?;

    let power_on_hours: u64 = proxy.get_property("SmartPowerOnHours").await?;
    let warning_tags: Vec<String> = proxy.get_property("SmartCriticalWarning").await?;
    // NVMe reports temperature as an unsigned Kelvin value.
    let temperature_kelvin: u16 = proxy.get_property("SmartTemperature").await?;
    let updated: u64 = proxy.get_property("SmartUpdated").await?;
    let status: String = proxy.get_property("SmartSelftestStatus").await?;
    let percent_remaining: i32 = proxy.get_property("SmartSelftestPercentRemaining").await?;

    Ok(HealthRecord {
        selftest_status: SelfTestStatus::from_udisks_str(&status),
        selftest_percent_remaining: percent_remaining,
        updated,
        temperature_kelvin: temperature_kelvin as f64,
        detail: ClassDetail::SolidState {
            power_on_hours,
            critical_warnings: CriticalWarning::parse_set(&warning_tags),
        },
    })
}

async fn read_ata_record(
    connection: &Connection,
    drive_path: &OwnedObjectPath,
) -> Result<HealthRecord, HealthError> {
    let proxy = ata_proxy(connection, drive_path).await?;

    let power_on_seconds: u64 = proxy.get_property("SmartPowerOnSeconds").await?;
    let failing: bool = proxy.get_property("SmartFailing").await?;
    let bad_sectors: i64 = proxy.get_property("SmartNumBadSectors").await?;
    let attributes_failing: i32 = proxy.get_property("SmartNumAttributesFailing").await?;
    // ATA reports temperature as a double in Kelvin.
    let temperature_kelvin: f64 = proxy.get_property("SmartTemperature").await?;
    let updated: u64 = proxy.get_property("SmartUpdated").await?;
    let status: String = proxy.get_property("SmartSelftestStatus").await?;
    let percent_remaining: i32 = proxy.get_property("SmartSelftestPercentRemaining").await?;

    Ok(HealthRecord {
        selftest_status: SelfTestStatus::from_udisks_str(&status),
        selftest_percent_remaining: percent_remaining,
        updated,
        temperature_kelvin,
        detail: ClassDetail::Rotational {
            power_on_seconds,
            failing,
            bad_sectors,
            attributes_failing,
        },
    })
}
