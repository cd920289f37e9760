//! # Printer Transport Layer
//!
//! Everything that touches a physical device lives here; composition never
//! does.
//!
//! - [`DeviceTransport`]: open a device, write one composed buffer, close it
//! - [`serial`]: the serial/RFCOMM/COM-port implementation
//! - [`DeviceLocks`]: one async mutex per device identifier, so concurrent
//!   jobs for the same printer are written one after the other
//! - [`discovery`]: enumerate candidate printer ports
//!
//! The device is always named explicitly by the caller. There is no
//! process-wide "selected printer".

pub mod discovery;
pub mod serial;

pub use discovery::{DeviceDescriptor, PortDiscovery, SerialPortDiscovery};
pub use serial::SerialTransport;

use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::{Mutex, OwnedMutexGuard};

use crate::error::Result;

/// Writes composed jobs to printer devices.
///
/// Implementations report [`CleanlinkError::OpenFailed`] when the device
/// cannot be opened and [`CleanlinkError::WriteFailed`] when the transfer
/// fails. Neither is retried.
///
/// [`CleanlinkError::OpenFailed`]: crate::error::CleanlinkError::OpenFailed
/// [`CleanlinkError::WriteFailed`]: crate::error::CleanlinkError::WriteFailed
pub trait DeviceTransport: Send + Sync {
    /// Open `device`, write all of `data` in one transfer, close it.
    fn send(&self, device: &str, data: &[u8]) -> Result<()>;

    /// Open and immediately close `device` to check that it is reachable.
    fn probe(&self, device: &str) -> Result<()>;
}

/// Per-device write locks.
///
/// Locks are created on first use and live as long as the registry.
#[derive(Debug, Default)]
pub struct DeviceLocks {
    locks: Mutex<HashMap<String, Arc<Mutex<()>>>>,
}

impl DeviceLocks {
    pub fn new() -> Self {
        Self::default()
    }

    /// Wait for exclusive access to `device`.
    ///
    /// The returned guard is `'static` so it can move into a blocking task
    /// together with the write.
    pub async fn acquire(&self, device: &str) -> OwnedMutexGuard<()> {
        let lock = {
            let mut locks = self.locks.lock().await;
            locks
                .entry(device.to_string())
                .or_insert_with(|| Arc::new(Mutex::new(())))
                .clone()
        };
        lock.lock_owned().await
    }

    /// Number of devices that have been locked at least once.
    pub async fn len(&self) -> usize {
        self.locks.lock().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}
