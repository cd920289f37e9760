//! # ESC/POS Protocol Implementation
//!
//! Low-level command builders for the ESC/POS command set understood by the
//! 57mm Bluetooth and USB thermal printers this agent drives.
//!
//! ## Module Structure
//!
//! - [`commands`]: Printer control (initialize, cut)
//! - [`text`]: Text styling (alignment, bold, double height, underline, font size)
//! - [`barcode`]: QR code store-and-print command groups
//!
//! Every builder is a pure function returning the exact byte sequence for one
//! directive. Nothing here validates or escapes content.
//!
//! ## Usage Example
//!
//! ```
//! use cleanlink::protocol::{barcode::qr, commands, text};
//!
//! let mut data = Vec::new();
//! data.extend(commands::init());
//! data.extend(text::align_center());
//! data.extend(text::bold(true));
//! data.extend(b"RECEIPT\n");
//! data.extend(text::bold(false));
//! data.extend(qr::generate(b"https://example.com", &qr::QrProfile::default()));
//! data.extend(commands::cut());
//!
//! assert_eq!(&data[..2], &[0x1B, 0x40]);
//! assert!(data.ends_with(&[0x1D, 0x56, 0x00]));
//! ```

pub mod barcode;
pub mod commands;
pub mod text;
