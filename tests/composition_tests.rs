//! # Composition Tests
//!
//! End-to-end checks from JSON request to printer bytes: mode resolution,
//! composition and byte generation together, as the HTTP agent runs them.

use cleanlink::protocol::barcode::qr;
use cleanlink::{BarcodeEntry, Mode, ModeResolver, PrintRequest, ReceiptComposer};
use pretty_assertions::assert_eq;

const INIT: [u8; 2] = [0x1B, 0x40];
const CUT: [u8; 3] = [0x1D, 0x56, 0x00];
const STORE_HEADER: [u8; 3] = [0x1D, 0x28, 0x6B];

// ============================================================================
// HELPER FUNCTIONS
// ============================================================================

fn compose(request: &PrintRequest) -> Vec<u8> {
    let mode = ModeResolver::default()
        .resolve(request)
        .expect("mode should resolve");
    ReceiptComposer::default().compose_bytes(request, mode)
}

fn compose_as(request: &PrintRequest, mode: Mode) -> Vec<u8> {
    ReceiptComposer::default().compose_bytes(request, mode)
}

fn count(haystack: &[u8], needle: &[u8]) -> usize {
    haystack.windows(needle.len()).filter(|w| *w == needle).count()
}

fn find(haystack: &[u8], needle: &[u8]) -> Option<usize> {
    haystack.windows(needle.len()).position(|w| w == needle)
}

/// Store-data commands: (offset, decoded length field, payload).
fn store_commands(data: &[u8]) -> Vec<(usize, usize, Vec<u8>)> {
    let mut found = Vec::new();
    let mut i = 0;
    while i + 8 <= data.len() {
        if data[i..i + 3] == STORE_HEADER && data[i + 5..i + 8] == qr::STORE_FUNCTION {
            let len = data[i + 3] as usize + 256 * data[i + 4] as usize;
            let start = i + 8;
            let end = start + len - qr::STORE_OVERHEAD;
            found.push((i, len, data[start..end].to_vec()));
            i = end;
        } else {
            i += 1;
        }
    }
    found
}

fn entry(name: &str, id: &str, value: &str) -> BarcodeEntry {
    BarcodeEntry {
        service_name: name.into(),
        order_id: id.into(),
        body: format!("{name} details\n"),
        barcode_value: value.into(),
    }
}

fn two_entries() -> PrintRequest {
    PrintRequest {
        title: "Cabang Utama".into(),
        order_id: "ORD-9".into(),
        body: "Cuci kering 3kg\n".into(),
        barcode_entries: vec![entry("Cuci", "ORD-9-1", "A-VALUE"), entry("Setrika", "ORD-9-2", "B-VALUE")],
        ..Default::default()
    }
}

// ============================================================================
// SCENARIOS
// ============================================================================

#[test]
fn test_receipt_only_scenario() {
    let request: PrintRequest = serde_json::from_str(
        r#"{"title":"Laundry Co","order_id":"123","body":"Thank you\n","print_mode":"receipt-only"}"#,
    )
    .unwrap();

    let data = compose(&request);

    assert!(data.starts_with(&INIT));
    assert!(find(&data, b"ORDER: 123\n").is_some());
    assert!(data.ends_with(&CUT));
}

#[test]
fn test_no_barcode_data_resolves_to_receipt_only() {
    let request: PrintRequest =
        serde_json::from_str(r#"{"title":"T","order_id":"1","body":"","print_mode":"","qr_codes":[]}"#)
            .unwrap();
    assert_eq!(ModeResolver::default().resolve(&request).unwrap(), Mode::ReceiptOnly);
}

#[test]
fn test_entries_without_mode_resolve_to_all() {
    let request: PrintRequest = serde_json::from_str(
        r#"{"print_mode":"","qr_codes":[{"service_name":"Cuci","order_id":"1","body":"","qr_value":"X"}]}"#,
    )
    .unwrap();
    assert_eq!(ModeResolver::default().resolve(&request).unwrap(), Mode::All);
}

// ============================================================================
// PROPERTIES
// ============================================================================

#[test]
fn test_store_length_field_is_payload_plus_three() {
    for n in [0usize, 1, 20, 252, 253, 255, 256, 1000, 4000] {
        let request = PrintRequest {
            barcode_entries: vec![BarcodeEntry {
                barcode_value: "x".repeat(n),
                ..Default::default()
            }],
            ..Default::default()
        };
        let data = compose_as(&request, Mode::BarcodeOnly);
        let stores = store_commands(&data);
        assert_eq!(stores.len(), 1, "payload length {n}");
        assert_eq!(stores[0].1, n + 3, "payload length {n}");
    }
}

#[test]
fn test_every_non_empty_mode_cuts_once_at_the_end() {
    let request = two_entries();
    for mode in Mode::ALL_MODES {
        let data = compose_as(&request, mode);
        assert!(!data.is_empty(), "{mode}");
        assert_eq!(count(&data, &CUT), 1, "{mode}");
        assert!(data.ends_with(&CUT), "{mode}");
        assert!(data.starts_with(&INIT), "{mode}");
    }
}

#[test]
fn test_receipt_only_never_stores_barcode_data() {
    let mut request = two_entries();
    request.legacy_barcode_value = "LEGACY".into();
    let data = compose_as(&request, Mode::ReceiptOnly);
    assert!(store_commands(&data).is_empty());
    assert!(find(&data, &[0x1D, 0x28, 0x6B]).is_none());
}

#[test]
fn test_two_entries_in_order_with_single_spacer() {
    let request = two_entries();
    // align center, bold on, double height on
    let heading_style: [u8; 9] = [0x1B, 0x61, 0x01, 0x1B, 0x45, 0x01, 0x1B, 0x21, 0x10];

    for mode in [Mode::BarcodeOnly, Mode::All, Mode::Label] {
        let data = compose_as(&request, mode);

        let stores = store_commands(&data);
        let payloads: Vec<&[u8]> = stores.iter().map(|(_, _, p)| p.as_slice()).collect();
        assert_eq!(payloads, vec![&b"A-VALUE"[..], &b"B-VALUE"[..]], "{mode}");
        assert_eq!(count(&data, &qr::set_model(qr::QrModel::Model2)), 2, "{mode}");
        assert_eq!(count(&data, &qr::print()), 2, "{mode}");

        let (first, second) = match mode {
            Mode::Label => (
                find_nth(&data, b"Cabang Utama\n", 0),
                find_nth(&data, b"Cabang Utama\n", 1),
            ),
            _ => (find(&data, b"Cuci\n"), find(&data, b"Setrika\n")),
        };
        let first = first.unwrap_or_else(|| panic!("{mode}: first block not found"));
        let second = second.unwrap_or_else(|| panic!("{mode}: second block not found"));
        assert!(first < stores[0].0 && stores[0].0 < second && second < stores[1].0, "{mode}");

        // B's heading is preceded by the two-line spacer.
        let b_start = second - heading_style.len();
        assert_eq!(&data[b_start..second], &heading_style[..], "{mode}");
        assert_eq!(&data[b_start - 2..b_start], &[0x0Au8, 0x0A][..], "{mode}");

        // A's heading directly follows the init (or the staff banner in All).
        let a_start = first - heading_style.len();
        assert_eq!(&data[a_start..first], &heading_style[..], "{mode}");
        if mode != Mode::All {
            assert_eq!(&data[..a_start], &INIT[..], "{mode}");
        }
    }
}

fn find_nth(haystack: &[u8], needle: &[u8], n: usize) -> Option<usize> {
    haystack
        .windows(needle.len())
        .enumerate()
        .filter(|(_, w)| *w == needle)
        .nth(n)
        .map(|(i, _)| i)
}

#[test]
fn test_legacy_value_builds_one_block_from_top_level_fields() {
    let request = PrintRequest {
        title: "Cabang Utama".into(),
        order_id: "LEG-1".into(),
        body: "Bed cover\n".into(),
        legacy_barcode_value: "X".into(),
        ..Default::default()
    };

    for mode in [Mode::BarcodeOnly, Mode::All, Mode::Label] {
        let data = compose_as(&request, mode);
        let stores = store_commands(&data);
        assert_eq!(stores.len(), 1, "{mode}");
        assert_eq!(stores[0].2, b"X".to_vec(), "{mode}");
        assert!(find(&data, b"Cabang Utama\n").is_some(), "{mode}");
        assert!(find(&data, b"Bed cover\n").is_some(), "{mode}");
    }

    let data = compose_as(&request, Mode::BarcodeOnly);
    assert!(find(&data, b"ORDER: LEG-1\n").is_some());
}

#[test]
fn test_composition_is_deterministic() {
    let request = two_entries();
    for mode in Mode::ALL_MODES {
        assert_eq!(compose_as(&request, mode), compose_as(&request, mode), "{mode}");
    }
}

#[test]
fn test_nothing_to_print_composes_empty() {
    let request = PrintRequest {
        title: "T".into(),
        ..Default::default()
    };
    assert!(compose_as(&request, Mode::BarcodeOnly).is_empty());
    assert!(compose_as(&request, Mode::Label).is_empty());

    let all = compose_as(&request, Mode::All);
    assert_eq!(count(&all, &CUT), 1);
    assert!(store_commands(&all).is_empty());
}

#[test]
fn test_separator_ignores_request_content() {
    let a = compose_as(&two_entries(), Mode::Separator);
    let b = compose_as(&PrintRequest::default(), Mode::Separator);
    assert_eq!(a, b);
    assert!(find(&a, b"--- Untuk Staff ---\n").is_some());
}

#[test]
fn test_all_orders_receipt_banner_barcodes() {
    let data = compose_as(&two_entries(), Mode::All);
    let receipt = find(&data, b"ORDER: ORD-9\n").unwrap();
    let thanks = find(&data, b"Terima kasih\n").unwrap();
    let banner = find(&data, b"--- Untuk Staff ---\n").unwrap();
    let first_store = store_commands(&data)[0].0;
    assert!(receipt < thanks && thanks < banner && banner < first_store);
}

#[test]
fn test_body_is_printed_verbatim() {
    let request = PrintRequest {
        title: "T".into(),
        order_id: "1".into(),
        body: "Kemeja  x2\r\n\tCelana x1\n\u{00e9}".into(),
        ..Default::default()
    };
    let data = compose_as(&request, Mode::ReceiptOnly);
    assert!(find(&data, "Kemeja  x2\r\n\tCelana x1\n\u{00e9}".as_bytes()).is_some());
}
