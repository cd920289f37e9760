//! # Printer Port Discovery
//!
//! Finds candidate printer devices in two passes:
//!
//! 1. Ports the OS reports through `serialport::available_ports()`, named
//!    from their USB or Bluetooth metadata where available.
//! 2. Well-known identifiers that are not always enumerated (Bluetooth COM
//!    ports on Windows, RFCOMM bindings on Linux), kept if they can be opened.
//!
//! Results are de-duplicated by identifier, OS-reported ports first.

use serde::Serialize;
use serialport::{SerialPortInfo, SerialPortType};
use tracing::debug;

use super::DeviceTransport;
use crate::error::{CleanlinkError, Result};

/// A device a printer may be attached to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DeviceDescriptor {
    /// Human-readable name for pickers.
    pub name: String,
    /// Identifier to pass to a [`DeviceTransport`].
    pub id: String,
}

/// Capability to list candidate printer devices.
pub trait PortDiscovery: Send + Sync {
    fn discover(&self) -> Result<Vec<DeviceDescriptor>>;
}

/// Identifiers probed when the OS does not list them.
#[cfg(windows)]
pub fn fallback_candidates() -> Vec<String> {
    (1..=16).map(|n| format!("COM{n}")).collect()
}

/// Identifiers probed when the OS does not list them.
#[cfg(not(windows))]
pub fn fallback_candidates() -> Vec<String> {
    (0..4)
        .map(|n| format!("/dev/rfcomm{n}"))
        .chain((0..4).map(|n| format!("/dev/ttyUSB{n}")))
        .collect()
}

/// Discovery over serial ports.
#[derive(Debug, Clone)]
pub struct SerialPortDiscovery<T> {
    prober: T,
    candidates: Vec<String>,
}

impl<T: DeviceTransport> SerialPortDiscovery<T> {
    /// `prober` is used to check fallback candidates.
    pub fn new(prober: T) -> Self {
        Self {
            prober,
            candidates: fallback_candidates(),
        }
    }

    pub fn with_candidates(mut self, candidates: Vec<String>) -> Self {
        self.candidates = candidates;
        self
    }

    /// Merge OS-reported ports with reachable fallback candidates.
    fn merge(&self, listed: Vec<DeviceDescriptor>) -> Result<Vec<DeviceDescriptor>> {
        let mut devices = listed;

        for id in &self.candidates {
            if devices.iter().any(|d| d.id.eq_ignore_ascii_case(id)) {
                continue;
            }
            if self.prober.probe(id).is_ok() {
                debug!(device = %id, "found accessible fallback port");
                devices.push(DeviceDescriptor {
                    name: format!("Serial printer on {id}"),
                    id: id.clone(),
                });
            }
        }

        if devices.is_empty() {
            return Err(CleanlinkError::Discovery(
                "no printers found; check that the printer is paired or plugged in".into(),
            ));
        }
        Ok(devices)
    }
}

impl<T: DeviceTransport> PortDiscovery for SerialPortDiscovery<T> {
    fn discover(&self) -> Result<Vec<DeviceDescriptor>> {
        let listed = match serialport::available_ports() {
            Ok(ports) => ports.iter().map(describe).collect(),
            Err(e) => {
                debug!(error = %e, "serial port enumeration failed, probing fallbacks only");
                Vec::new()
            }
        };
        debug!(count = listed.len(), "serial ports enumerated");
        self.merge(dedup(listed))
    }
}

/// Name a port from whatever metadata the OS gave us.
fn describe(info: &SerialPortInfo) -> DeviceDescriptor {
    let name = match &info.port_type {
        SerialPortType::UsbPort(usb) => match (&usb.manufacturer, &usb.product) {
            (_, Some(product)) => format!("USB: {product}"),
            (Some(manufacturer), None) => format!("USB: {manufacturer}"),
            (None, None) => format!("USB serial on {}", info.port_name),
        },
        SerialPortType::BluetoothPort => format!("Bluetooth printer on {}", info.port_name),
        SerialPortType::PciPort | SerialPortType::Unknown => {
            format!("Serial port {}", info.port_name)
        }
    };
    DeviceDescriptor {
        name,
        id: info.port_name.clone(),
    }
}

fn dedup(devices: Vec<DeviceDescriptor>) -> Vec<DeviceDescriptor> {
    let mut out: Vec<DeviceDescriptor> = Vec::with_capacity(devices.len());
    for device in devices {
        if !out.iter().any(|d| d.id == device.id) {
            out.push(device);
        }
    }
    out
}
