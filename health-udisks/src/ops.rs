// SPDX-License-Identifier: GPL-3.0-only

//! Device-service operations behind a trait, so embedders and tests can
//! substitute the real bus.

use async_trait::async_trait;
use health_types::{HealthRecord, SelfTestKind};
use zbus::Connection;

use crate::error::HealthError;
use crate::record;
use crate::resolve;
use crate::selftest;

#[async_trait]
pub trait HealthOps: Send + Sync {
    async fn read_record(&self, device: &str) -> Result<HealthRecord, HealthError>;

    async fn refresh(&self, device: &str) -> Result<(), HealthError>;

    async fn start_selftest(&self, device: &str, kind: SelfTestKind)
    -> Result<(), HealthError>;

    async fn abort_selftest(&self, device: &str) -> Result<(), HealthError>;
}

/// [`HealthOps`] backed by UDisks2 on the system bus.
pub struct UDisks2HealthOps {
    connection: Connection,
}

impl UDisks2HealthOps {
    pub async fn new() -> Result<Self, HealthError> {
        let connection = Connection::system()
            .await
            .map_err(|e| HealthError::ConnectionFailed(e.to_string()))?;
        Ok(Self { connection })
    }

    pub fn with_connection(connection: Connection) -> Self {
        Self { connection }
    }
}

#[async_trait]
impl HealthOps for UDisks2HealthOps {
    async fn read_record(&self, device: &str) -> Result<HealthRecord, HealthError> {
        let drive_path = resolve::drive_object_path_for_device(&self.connection, device).await?;
        record::read_health_record(&self.connection, &drive_path).await
    }

    async fn refresh(&self, device: &str) -> Result<(), HealthError> {
        let drive_path = resolve::drive_object_path_for_device(&self.connection, device).await?;
        record::refresh_smart(&self.connection, &drive_path).await
    }

    async fn start_selftest(
        &self,
        device: &str,
        kind: SelfTestKind,
    ) -> Result<(), HealthError> {
        let drive_path = resolve::drive_object_path_for_device(&self.connection, device).await?;
        selftest::start_selftest(&self.connection, &drive_path, kind).await
    }

    async fn abort_selftest(&self, device: &str) -> Result<(), HealthError> {
        let drive_path = resolve::drive_object_path_for_device(&self.connection, device).await?;
        selftest::abort_selftest(&self.connection, &drive_path).await
    }
}
