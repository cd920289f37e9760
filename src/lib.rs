//! # Cleanlink - Laundry Receipt and Label Printing
//!
//! Cleanlink composes ESC/POS print jobs for 57mm thermal printers and
//! delivers them over serial, RFCOMM or COM-port links. It provides:
//!
//! - **Protocol implementation**: ESC/POS and QR command builders
//! - **Composition**: customer receipts, staff barcode labels and separators
//! - **Transport**: serial device writes with per-device locking
//! - **HTTP agent**: the local endpoint the laundry web app prints through
//!
//! ## Quick Start
//!
//! ```no_run
//! use cleanlink::{
//!     ModeResolver, PrintRequest, ReceiptComposer,
//!     transport::{DeviceTransport, SerialTransport},
//! };
//!
//! let request: PrintRequest = serde_json::from_str(
//!     r#"{"title":"Laundry Co","order_id":"123","body":"2kg wash\n","print_mode":"receipt-only"}"#,
//! )?;
//!
//! let mode = ModeResolver::default().resolve(&request)?;
//! let data = ReceiptComposer::default().compose_bytes(&request, mode);
//!
//! SerialTransport::new().send("/dev/rfcomm0", &data)?;
//!
//! # Ok::<(), cleanlink::error::CleanlinkError>(())
//! ```
//!
//! ## Module Overview
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`protocol`] | ESC/POS command builders |
//! | [`ir`] | Print ops and byte generation |
//! | [`request`] | Print request wire types |
//! | [`mode`] | Layout modes and mode resolution |
//! | [`composer`] | Request to program composition |
//! | [`transport`] | Device writes, locking and discovery |
//! | [`server`] | HTTP agent |
//! | [`error`] | Error types |

pub mod composer;
pub mod error;
pub mod ir;
pub mod mode;
pub mod protocol;
pub mod request;
pub mod server;
pub mod transport;

// Re-exports for convenience
pub use composer::ReceiptComposer;
pub use error::CleanlinkError;
pub use mode::{Mode, ModeResolver, UnknownModePolicy};
pub use request::{BarcodeEntry, PrintRequest};
