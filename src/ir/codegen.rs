//! # Code Generation
//!
//! Converts IR programs to ESC/POS bytes.

use super::ops::{Op, Program};
use crate::protocol::{barcode::qr, commands, text};

impl Op {
    /// The byte segment for this op.
    pub fn to_bytes(&self) -> Vec<u8> {
        match self {
            Op::Init => commands::init(),
            Op::Cut => commands::cut(),
            Op::Feed(lines) => commands::feed_lines(*lines),

            Op::SetAlign(alignment) => text::align(*alignment),
            Op::SetBold(enabled) => text::bold(*enabled),
            Op::SetDoubleHeight(enabled) => text::double_height(*enabled),
            Op::SetUnderline(enabled) => text::underline(*enabled),
            Op::SetFontSize(size) => text::font_size(*size),

            Op::Text(s) => s.as_bytes().to_vec(),

            Op::QrCode { data, profile } => qr::generate(data.as_bytes(), profile),
        }
    }
}

impl Program {
    /// Compile the program to ESC/POS bytes by concatenating every op's segment.
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut out = Vec::new();
        for op in &self.ops {
            out.extend(op.to_bytes());
        }
        out
    }
}
