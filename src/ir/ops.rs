//! # IR Opcodes
//!
//! Each op is one printer directive or one run of literal text.

use crate::protocol::barcode::qr::QrProfile;
use crate::protocol::text::{Alignment, FontSize};

/// IR opcodes.
#[derive(Debug, Clone, PartialEq)]
pub enum Op {
    // ========== Printer Control ==========
    /// Initialize printer (ESC @).
    Init,

    /// Full paper cut (GS V 0).
    Cut,

    /// `n` line feeds.
    Feed(usize),

    // ========== Style Changes ==========
    SetAlign(Alignment),
    SetBold(bool),
    SetDoubleHeight(bool),
    SetUnderline(bool),
    SetFontSize(FontSize),

    // ========== Content ==========
    /// Literal text, emitted as its UTF-8 bytes with no escaping.
    /// Embedded newlines and control bytes pass through.
    Text(String),

    // ========== Barcodes ==========
    /// QR store-and-print group.
    QrCode { data: String, profile: QrProfile },
}

/// An ordered list of ops ready for codegen.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Program {
    pub ops: Vec<Op>,
}

impl Program {
    /// Create an empty program.
    pub fn new() -> Self {
        Self { ops: Vec::new() }
    }

    /// Create a program with an initial Init op.
    pub fn with_init() -> Self {
        Self {
            ops: vec![Op::Init],
        }
    }

    pub fn push(&mut self, op: Op) {
        self.ops.push(op);
    }

    pub fn len(&self) -> usize {
        self.ops.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ops.is_empty()
    }

    /// Number of `Cut` ops in the program.
    pub fn cut_count(&self) -> usize {
        self.ops.iter().filter(|op| matches!(op, Op::Cut)).count()
    }

    /// QR payloads in emission order.
    pub fn qr_payloads(&self) -> Vec<&str> {
        self.ops
            .iter()
            .filter_map(|op| match op {
                Op::QrCode { data, .. } => Some(data.as_str()),
                _ => None,
            })
            .collect()
    }
}

impl FromIterator<Op> for Program {
    fn from_iter<T: IntoIterator<Item = Op>>(iter: T) -> Self {
        Self {
            ops: iter.into_iter().collect(),
        }
    }
}
