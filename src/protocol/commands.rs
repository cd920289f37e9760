//! # ESC/POS Printer Control Commands
//!
//! Initialization and paper cutting, plus the byte constants shared by the
//! other protocol modules.
//!
//! ## Escape Sequence Structure
//!
//! - Two bytes: `ESC @`
//! - Three bytes: `ESC E n`, `GS V m`
//! - Function groups: `GS ( k pL pH cn fn ...` (see [`super::barcode`])
//!
//! ## Byte Order
//!
//! Multi-byte integers use **little-endian** encoding:
//! - value 0x1234 is sent as bytes `[0x34, 0x12]`

// ============================================================================
// ESCAPE SEQUENCE CONSTANTS
// ============================================================================

/// ESC (Escape) - Command prefix byte
pub const ESC: u8 = 0x1B;

/// GS (Group Separator) - Extended command prefix
///
/// Used for cutting (`GS V`) and 2D symbol functions (`GS ( k`).
pub const GS: u8 = 0x1D;

/// LF (Line Feed) - Print and advance one line
pub const LF: u8 = 0x0A;

// ============================================================================
// INITIALIZATION
// ============================================================================

/// # Initialize Printer (ESC @)
///
/// Clears the print buffer and resets formatting to the power-on defaults.
/// Every composed job starts with it.
///
/// | Format  | Bytes |
/// |---------|-------|
/// | ASCII   | ESC @ |
/// | Hex     | 1B 40 |
///
/// ```
/// use cleanlink::protocol::commands;
///
/// assert_eq!(commands::init(), vec![0x1B, 0x40]);
/// ```
#[inline]
pub fn init() -> Vec<u8> {
    vec![ESC, b'@']
}

// ============================================================================
// CUTTER CONTROL
// ============================================================================

/// # Full Cut (GS V 0)
///
/// Cuts the paper at the current position. Composed jobs end with exactly
/// one of these, preceded by blank lines so the last printed line clears the
/// blade.
///
/// | Format  | Bytes    |
/// |---------|----------|
/// | ASCII   | GS V 0   |
/// | Hex     | 1D 56 00 |
#[inline]
pub fn cut() -> Vec<u8> {
    vec![GS, b'V', 0]
}

/// Line feeds, `n` of them.
#[inline]
pub fn feed_lines(n: usize) -> Vec<u8> {
    vec![LF; n]
}

// ============================================================================
// HELPER FUNCTIONS
// ============================================================================

/// Encode a length as the two-byte little-endian `[low, high]` pair used by
/// ESC/POS function groups.
///
/// Values wider than 16 bits keep their low 16 bits; the field is two bytes
/// on the wire and nothing upstream bounds payload sizes.
///
/// ```
/// use cleanlink::protocol::commands::u16_le;
///
/// assert_eq!(u16_le(0x1234), [0x34, 0x12]);
/// assert_eq!(u16_le(258), [0x02, 0x01]);
/// ```
#[inline]
pub const fn u16_le(value: usize) -> [u8; 2] {
    [value as u8, (value >> 8) as u8]
}
