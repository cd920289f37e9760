//! Layout modes and mode resolution.
//!
//! A request names its layout with a free-text token. Resolution happens once
//! per request, before composition:
//!
//! 1. A recognized token selects its mode.
//! 2. An empty token selects [`Mode::All`] when the request carries barcode
//!    entries or a legacy barcode value.
//! 3. Any other empty token selects [`Mode::ReceiptOnly`].
//!
//! Non-empty unrecognized tokens are governed by [`UnknownModePolicy`].

use std::fmt;
use std::str::FromStr;

use crate::error::{CleanlinkError, Result};
use crate::request::PrintRequest;

/// Layout policy for one composition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Mode {
    ReceiptOnly,
    BarcodeOnly,
    All,
    Label,
    Separator,
}

impl Mode {
    pub const ALL_MODES: [Mode; 5] = [
        Mode::ReceiptOnly,
        Mode::BarcodeOnly,
        Mode::All,
        Mode::Label,
        Mode::Separator,
    ];

    /// Canonical wire token.
    pub fn as_str(&self) -> &'static str {
        match self {
            Mode::ReceiptOnly => "receipt-only",
            Mode::BarcodeOnly => "qr-only",
            Mode::All => "all",
            Mode::Label => "label",
            Mode::Separator => "separator",
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Mode {
    type Err = CleanlinkError;

    /// Exact, case-sensitive match against the recognized tokens.
    fn from_str(s: &str) -> Result<Self> {
        match s {
            "receipt-only" => Ok(Mode::ReceiptOnly),
            "qr-only" | "barcode-only" => Ok(Mode::BarcodeOnly),
            "all" => Ok(Mode::All),
            "label" => Ok(Mode::Label),
            "separator" => Ok(Mode::Separator),
            other => Err(CleanlinkError::UnknownMode(other.to_string())),
        }
    }
}

/// What to do with a non-empty token that names no mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum UnknownModePolicy {
    /// Fail with [`CleanlinkError::UnknownMode`].
    #[default]
    Reject,
    /// Print everything, as the first agents did.
    FallBackToAll,
}

/// Maps a request's mode token to a [`Mode`].
#[derive(Debug, Clone, Copy, Default)]
pub struct ModeResolver {
    pub unknown: UnknownModePolicy,
}

impl ModeResolver {
    pub fn new(unknown: UnknownModePolicy) -> Self {
        Self { unknown }
    }

    /// Resolve from the raw token and the two presence flags.
    ///
    /// Only fails for a non-empty unrecognized token under
    /// [`UnknownModePolicy::Reject`].
    pub fn resolve_token(&self, token: &str, has_entries: bool, has_legacy: bool) -> Result<Mode> {
        if token.is_empty() {
            return Ok(if has_entries || has_legacy {
                Mode::All
            } else {
                Mode::ReceiptOnly
            });
        }

        match token.parse::<Mode>() {
            Ok(mode) => Ok(mode),
            Err(err) => match self.unknown {
                UnknownModePolicy::Reject => Err(err),
                UnknownModePolicy::FallBackToAll => {
                    tracing::debug!(token, "unknown print mode, falling back to all");
                    Ok(Mode::All)
                }
            },
        }
    }

    pub fn resolve(&self, request: &PrintRequest) -> Result<Mode> {
        self.resolve_token(
            &request.mode,
            request.has_barcode_entries(),
            request.has_legacy_barcode(),
        )
    }
}
