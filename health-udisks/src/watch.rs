// SPDX-License-Identifier: GPL-3.0-only

//! Signal-driven health record updates
//!
//! UDisks2 emits `org.freedesktop.DBus.Properties::PropertiesChanged` on the
//! drive object whenever SMART data changes. Each matching signal triggers a
//! full re-read of the record, so consumers always see a wholesale
//! replacement rather than a patched copy.

use std::collections::HashMap;

use futures::StreamExt;
use futures::stream::Stream;
use futures::task::{Context, Poll};
use health_types::HealthRecord;
use tokio::sync::mpsc;
use tracing::warn;
use zbus::Connection;
use zbus::zvariant::{self, OwnedObjectPath};
use zbus_macros::proxy;

use crate::error::HealthError;
use crate::record::{ATA_IFACE, NVME_IFACE, read_health_record};

#[proxy(
    default_service = "org.freedesktop.UDisks2",
    interface = "org.freedesktop.DBus.Properties"
)]
trait DriveProperties {
    #[zbus(signal)]
    fn properties_changed(
        &self,
        interface_name: String,
        changed_properties: HashMap<String, zvariant::OwnedValue>,
        invalidated_properties: Vec<String>,
    ) -> zbus::Result<()>;
}

pub struct HealthEventStream {
    receiver: mpsc::Receiver<HealthRecord>,
}

/// A signal-based stream of health records for one drive.
///
/// Filters `PropertiesChanged` to the ATA / NVMe SMART interfaces and
/// forwards a freshly read record for each hit. Dropping the stream ends the
/// listening task.
pub async fn record_stream(
    connection: &Connection,
    drive_path: OwnedObjectPath,
) -> Result<HealthEventStream, HealthError> {
    let (sender, receiver) = mpsc::channel(8);

    let properties = DrivePropertiesProxy::builder(connection)
        .path(&drive_path)?
        .build()
        .await?;
    let mut changed_stream = properties.receive_properties_changed().await?;

    let connection = connection.clone();
    tokio::spawn(async move {
        while let Some(signal) = changed_stream.next().await {
            let args = match signal.args() {
                Ok(args) => args,
                Err(e) => {
                    warn!("Failed to parse PropertiesChanged signal args: {e}");
                    continue;
                }
            };

            if args.interface_name != ATA_IFACE && args.interface_name != NVME_IFACE {
                continue;
            }

            match read_health_record(&connection, &drive_path).await {
                Ok(record) => {
                    if let Err(e) = sender.send(record).await {
                        warn!("Health record receiver dropped: {e}");
                        break;
                    }
                }
                Err(e) => {
                    warn!("Failed to re-read health record after change: {e}");
                }
            }
        }
    });

    Ok(HealthEventStream { receiver })
}

impl Stream for HealthEventStream {
    type Item = HealthRecord;

    fn poll_next(
        mut self: std::pin::Pin<&mut Self>,
        cx: &mut Context<'_>,
    ) -> Poll<Option<Self::Item>> {
        self.receiver.poll_recv(cx)
    }
}
