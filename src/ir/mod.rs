//! # Intermediate Representation (IR)
//!
//! The composer does not write bytes directly. It emits a [`Program`], an
//! ordered list of [`Op`]s, and codegen turns each op into exactly one byte
//! segment:
//!
//! ```text
//! ┌──────────┐     ┌─────────────┐     ┌──────────┐
//! │ Composer │ ──► │     IR      │ ──► │ Codegen  │ ──► bytes
//! │          │     │  (Vec<Op>)  │     │ (ESC/POS)│
//! └──────────┘     └─────────────┘     └──────────┘
//! ```
//!
//! There is no optimizer pass. Printers in the field were set up against the
//! exact command stream, redundant alignment commands included, so codegen
//! output must stay byte-for-byte stable.
//!
//! ## Example
//!
//! ```
//! use cleanlink::ir::{Op, Program};
//! use cleanlink::protocol::text::Alignment;
//!
//! let mut program = Program::with_init();
//! program.push(Op::SetAlign(Alignment::Center));
//! program.push(Op::SetBold(true));
//! program.push(Op::Text("HELLO\n".into()));
//! program.push(Op::SetBold(false));
//! program.push(Op::Cut);
//!
//! let bytes = program.to_bytes();
//! assert!(bytes.ends_with(&[0x1D, 0x56, 0x00]));
//! ```

mod codegen;
mod ops;

pub use ops::*;
