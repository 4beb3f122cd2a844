//! Error types for health-udisks operations

use thiserror::Error;

#[derive(Error, Debug)]
pub enum HealthError {
    #[error("Connection failed: {0}")]
    ConnectionFailed(String),

    #[error("Device not found: {0}")]
    DeviceNotFound(String),

    #[error("SMART is not supported: {0}")]
    NotSupported(String),

    #[error("D-Bus error: {0}")]
    DBusError(String),

    #[error("Zbus Error")]
    ZbusError(#[from] zbus::Error),
}
