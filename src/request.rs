//! Print request data model.
//!
//! Field names follow the layout vocabulary (`legacy_barcode_value`,
//! `barcode_entries`); serde names follow the JSON the web client already
//! sends (`qr_value`, `qr_codes`, `print_mode`). Every field is optional on
//! the wire and defaults to empty.

use serde::{Deserialize, Deserializer, Serialize};

/// One barcode label to print.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BarcodeEntry {
    pub service_name: String,
    pub order_id: String,
    pub body: String,
    #[serde(rename = "qr_value", alias = "barcode_value")]
    pub barcode_value: String,
}

/// A structured print request from the web client.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PrintRequest {
    /// Shared secret checked by the HTTP adapter. Not used in composition.
    #[serde(skip_serializing_if = "String::is_empty")]
    pub token: String,
    pub title: String,
    pub order_id: String,
    /// Printed verbatim, including any newlines the client put in.
    pub body: String,
    /// Single-barcode field kept for older clients. Ignored when
    /// `barcode_entries` is non-empty.
    #[serde(rename = "qr_value", alias = "legacy_barcode_value")]
    pub legacy_barcode_value: String,
    #[serde(rename = "print_mode", alias = "mode")]
    pub mode: String,
    #[serde(
        rename = "qr_codes",
        alias = "barcode_entries",
        deserialize_with = "null_as_empty"
    )]
    pub barcode_entries: Vec<BarcodeEntry>,
}

impl PrintRequest {
    pub fn has_barcode_entries(&self) -> bool {
        !self.barcode_entries.is_empty()
    }

    pub fn has_legacy_barcode(&self) -> bool {
        !self.legacy_barcode_value.is_empty()
    }

    /// The entries to print as barcode blocks.
    ///
    /// Returns the explicit entries when present. Otherwise, if the legacy
    /// value is set, a single entry built from the top-level title, order id
    /// and body. Otherwise nothing.
    pub fn effective_entries(&self) -> Vec<BarcodeEntry> {
        if self.has_barcode_entries() {
            self.barcode_entries.clone()
        } else if self.has_legacy_barcode() {
            vec![BarcodeEntry {
                service_name: self.title.clone(),
                order_id: self.order_id.clone(),
                body: self.body.clone(),
                barcode_value: self.legacy_barcode_value.clone(),
            }]
        } else {
            Vec::new()
        }
    }

    /// The receipt-only page printed by the front ends' "Test Print" button.
    pub fn test_page() -> Self {
        Self {
            title: "Cleanlink Laundry".into(),
            order_id: "TEST-001".into(),
            body: "Printer test page\nIf you can read this,\nthe printer is ready.\n".into(),
            mode: "receipt-only".into(),
            ..Default::default()
        }
    }
}

/// Older clients send `"qr_codes": null` when there are no labels.
fn null_as_empty<'de, D>(deserializer: D) -> Result<Vec<BarcodeEntry>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Vec<BarcodeEntry>>::deserialize(deserializer)?.unwrap_or_default())
}
