//! # Receipt Composer
//!
//! Turns a [`PrintRequest`] and its resolved [`Mode`] into a [`Program`].
//!
//! Composition is a pure function of the request and the composer's fixed
//! configuration: no clock, no I/O, no state carried between calls. One
//! composer can serve any number of threads.
//!
//! ## Layouts
//!
//! | Mode | Content |
//! |------|---------|
//! | `ReceiptOnly` | receipt block, cut |
//! | `BarcodeOnly` | one barcode block per entry, cut after the last |
//! | `All` | receipt block, staff banner, barcode blocks, single cut |
//! | `Label` | one label block per entry, cut after the last |
//! | `Separator` | staff banner, cut |
//!
//! Entries after the first are preceded by a two-line spacer. When the
//! request has no entries but a legacy barcode value, a single block is built
//! from the top-level title, order id and body.
//!
//! A barcode or label job with nothing to print composes to an empty
//! program, which callers treat as "do not touch the device".

use serde::Deserialize;

use crate::ir::{Op, Program};
use crate::mode::Mode;
use crate::protocol::barcode::qr::QrProfile;
use crate::protocol::text::Alignment;
use crate::request::{BarcodeEntry, PrintRequest};

/// Columns on 57mm paper with the default font.
pub const LINE_WIDTH: usize = 32;

/// Blank lines between consecutive barcode blocks and before the cut.
pub const SPACER_LINES: usize = 2;

/// Fixed captions printed by the layouts.
///
/// Defaults are the strings printers in the field already produce. A
/// captions file may override any subset of them:
///
/// ```json
/// { "thank_you": "Thank you", "staff_banner": "--- Staff copy ---" }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ReceiptText {
    pub thank_you: String,
    pub thank_you_detail: String,
    pub staff_banner: String,
    pub scan_caption: String,
    pub label_scan_caption: String,
    pub order_prefix: String,
}

impl Default for ReceiptText {
    fn default() -> Self {
        Self {
            thank_you: "Terima kasih".into(),
            thank_you_detail: "Atas kepercayaan Anda".into(),
            staff_banner: "--- Untuk Staff ---".into(),
            scan_caption: "Scan untuk update status".into(),
            label_scan_caption: "Scan Barcode".into(),
            order_prefix: "ORDER: ".into(),
        }
    }
}

/// Builds print programs for every layout mode.
#[derive(Debug, Clone, Default)]
pub struct ReceiptComposer {
    qr: QrProfile,
    text: ReceiptText,
}

impl ReceiptComposer {
    pub fn new(qr: QrProfile) -> Self {
        Self {
            qr,
            text: ReceiptText::default(),
        }
    }

    pub fn with_text(mut self, text: ReceiptText) -> Self {
        self.text = text;
        self
    }

    pub fn qr_profile(&self) -> &QrProfile {
        &self.qr
    }

    /// Compose the program for `request` laid out as `mode`.
    pub fn compose(&self, request: &PrintRequest, mode: Mode) -> Program {
        let mut w = Writer::default();

        match mode {
            Mode::ReceiptOnly => {
                w.op(Op::Init);
                self.receipt_block(&mut w, request);
                w.finish();
            }
            Mode::BarcodeOnly => {
                let entries = request.effective_entries();
                if entries.is_empty() {
                    return Program::new();
                }
                w.op(Op::Init);
                self.barcode_blocks(&mut w, &entries);
                w.finish();
            }
            Mode::All => {
                w.op(Op::Init);
                self.receipt_block(&mut w, request);
                self.staff_banner(&mut w);
                self.barcode_blocks(&mut w, &request.effective_entries());
                w.finish();
            }
            Mode::Label => {
                let entries = request.effective_entries();
                if entries.is_empty() {
                    return Program::new();
                }
                w.op(Op::Init);
                for (i, entry) in entries.iter().enumerate() {
                    if i > 0 {
                        w.feed(SPACER_LINES);
                    }
                    self.label_block(&mut w, &request.title, entry);
                }
                w.finish();
            }
            Mode::Separator => {
                w.op(Op::Init);
                self.staff_banner(&mut w);
                w.cut();
            }
        }

        w.program
    }

    /// Compose straight to bytes.
    pub fn compose_bytes(&self, request: &PrintRequest, mode: Mode) -> Vec<u8> {
        self.compose(request, mode).to_bytes()
    }

    /// Customer receipt, without feed or cut.
    fn receipt_block(&self, w: &mut Writer, request: &PrintRequest) {
        w.feed(1);
        w.heading(&request.title);
        w.rule('=');
        self.order_line(w, &request.order_id);
        w.rule('-');

        w.align(Alignment::Left);
        w.text(&request.body);

        w.align(Alignment::Center);
        w.text(&format!("\n{}\n", rule('=')));
        w.bold_line(&self.text.thank_you);
        w.line(&self.text.thank_you_detail);
    }

    /// Divider between the customer receipt and the staff labels.
    fn staff_banner(&self, w: &mut Writer) {
        w.feed(SPACER_LINES);
        w.rule('-');
        w.align(Alignment::Center);
        w.bold_line(&self.text.staff_banner);
        w.rule('-');
        w.feed(SPACER_LINES);
    }

    fn barcode_blocks(&self, w: &mut Writer, entries: &[BarcodeEntry]) {
        for (i, entry) in entries.iter().enumerate() {
            if i > 0 {
                w.feed(SPACER_LINES);
            }
            self.barcode_block(w, entry);
        }
    }

    /// Service header, order, body, then the QR and its caption.
    fn barcode_block(&self, w: &mut Writer, entry: &BarcodeEntry) {
        w.heading(&entry.service_name);
        w.rule('=');
        self.order_line(w, &entry.order_id);
        w.rule('-');

        w.align(Alignment::Left);
        w.text(&entry.body);

        w.align(Alignment::Center);
        w.text(&format!("\n{}\n", rule('-')));

        w.feed(1);
        w.align(Alignment::Center);
        w.qr(&entry.barcode_value, self.qr);

        w.feed(2);
        w.align(Alignment::Center);
        w.bold_line(&self.text.scan_caption);
    }

    /// Branch title, entry body, then the scan caption above the QR.
    fn label_block(&self, w: &mut Writer, title: &str, entry: &BarcodeEntry) {
        w.heading(title);
        w.rule('-');

        w.align(Alignment::Left);
        w.text(&entry.body);
        w.rule('-');

        w.feed(1);
        w.align(Alignment::Center);
        w.line(&self.text.label_scan_caption);

        w.feed(1);
        w.qr(&entry.barcode_value, self.qr);
        w.feed(1);
    }

    fn order_line(&self, w: &mut Writer, order_id: &str) {
        w.align(Alignment::Center);
        w.bold_line(&format!("{}{}", self.text.order_prefix, order_id));
    }
}

fn rule(ch: char) -> String {
    std::iter::repeat_n(ch, LINE_WIDTH).collect()
}

/// Op sink with the small text idioms every block shares.
#[derive(Default)]
struct Writer {
    program: Program,
}

impl Writer {
    fn op(&mut self, op: Op) {
        self.program.push(op);
    }

    fn text(&mut self, s: &str) {
        self.op(Op::Text(s.to_string()));
    }

    fn line(&mut self, s: &str) {
        self.op(Op::Text(format!("{s}\n")));
    }

    fn feed(&mut self, lines: usize) {
        self.op(Op::Feed(lines));
    }

    fn align(&mut self, alignment: Alignment) {
        self.op(Op::SetAlign(alignment));
    }

    fn bold_line(&mut self, s: &str) {
        self.op(Op::SetBold(true));
        self.line(s);
        self.op(Op::SetBold(false));
    }

    /// Centered, bold, double-height line.
    fn heading(&mut self, s: &str) {
        self.align(Alignment::Center);
        self.op(Op::SetBold(true));
        self.op(Op::SetDoubleHeight(true));
        self.line(s);
        self.op(Op::SetDoubleHeight(false));
        self.op(Op::SetBold(false));
    }

    /// Centered 32-column rule.
    fn rule(&mut self, ch: char) {
        self.align(Alignment::Center);
        self.line(&rule(ch));
    }

    fn qr(&mut self, data: &str, profile: QrProfile) {
        self.op(Op::QrCode {
            data: data.to_string(),
            profile,
        });
    }

    fn cut(&mut self) {
        self.op(Op::Cut);
    }

    /// Trailing feed then the single terminal cut.
    fn finish(&mut self) {
        self.feed(SPACER_LINES);
        self.cut();
    }
}
