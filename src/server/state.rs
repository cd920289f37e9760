//! Server state and configuration.

use std::sync::Arc;

use crate::composer::{ReceiptComposer, ReceiptText};
use crate::mode::{ModeResolver, UnknownModePolicy};
use crate::protocol::barcode::qr::QrProfile;
use crate::transport::{DeviceLocks, DeviceTransport, PortDiscovery, SerialPortDiscovery, SerialTransport};

/// Server configuration.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Printer device jobs are written to (e.g., "/dev/rfcomm0", "COM10")
    pub device: String,
    /// Address to listen on (e.g., "0.0.0.0:3491")
    pub listen_addr: String,
    /// Shared secret expected in every print request. `None` disables the check.
    pub token: Option<String>,
    pub unknown_modes: UnknownModePolicy,
    pub qr: QrProfile,
    /// Captions printed by the layouts.
    pub text: ReceiptText,
}

/// Application state shared across handlers.
pub struct AppState {
    pub config: ServerConfig,
    pub composer: ReceiptComposer,
    pub resolver: ModeResolver,
    pub transport: Arc<dyn DeviceTransport>,
    pub discovery: Arc<dyn PortDiscovery>,
    pub locks: DeviceLocks,
}

impl AppState {
    pub fn new(
        config: ServerConfig,
        transport: Arc<dyn DeviceTransport>,
        discovery: Arc<dyn PortDiscovery>,
    ) -> Self {
        Self {
            composer: ReceiptComposer::new(config.qr).with_text(config.text.clone()),
            resolver: ModeResolver::new(config.unknown_modes),
            config,
            transport,
            discovery,
            locks: DeviceLocks::new(),
        }
    }

    /// State backed by the serial transport and serial port discovery.
    pub fn serial(config: ServerConfig) -> Self {
        Self::new(
            config,
            Arc::new(SerialTransport::new()),
            Arc::new(SerialPortDiscovery::new(SerialTransport::new())),
        )
    }

    /// Whether `token` is accepted for print requests.
    pub fn authorized(&self, token: &str) -> bool {
        match &self.config.token {
            Some(expected) => expected == token,
            None => true,
        }
    }
}
