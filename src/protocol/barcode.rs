//! # ESC/POS QR Code Commands
//!
//! QR codes are printed by the firmware itself: the host only stores the
//! payload in printer memory and asks for it to be drawn. No image is
//! rendered on this side.
//!
//! ## Command Group
//!
//! A complete QR job is five `GS ( k` function calls (symbol type `cn = 0x31`):
//!
//! | Step | Function | Bytes |
//! |------|----------|-------|
//! | 1 | Select model 2 | `1D 28 6B 04 00 31 41 32 00` |
//! | 2 | Module size | `1D 28 6B 03 00 31 43 n` |
//! | 3 | Error correction | `1D 28 6B 03 00 31 45 n` |
//! | 4 | Store data | `1D 28 6B pL pH 31 50 30 d1...dk` |
//! | 5 | Print stored data | `1D 28 6B 03 00 31 51 30` |
//!
//! In step 4, `pL pH` is `k + 3` little-endian: the three bytes `31 50 30`
//! count towards the length.
//!
//! ```
//! use cleanlink::protocol::barcode::qr::{self, QrErrorLevel, QrProfile};
//!
//! let profile = QrProfile::new(7, QrErrorLevel::M);
//! let cmd = qr::generate(b"ORDER-123", &profile);
//! assert_eq!(&cmd[..9], &[0x1D, 0x28, 0x6B, 0x04, 0x00, 0x31, 0x41, 0x32, 0x00]);
//! ```

use super::commands::GS;

/// QR Code command builders
pub mod qr {
    use super::GS;
    use crate::protocol::commands::u16_le;

    /// `GS ( k` prefix shared by every function in the group.
    const PREFIX: [u8; 3] = [GS, b'(', b'k'];

    /// Symbol type byte for QR codes.
    const CN: u8 = 0x31;

    /// Bytes counted by the store-data length field besides the payload
    /// (`cn`, `fn`, `m`).
    pub const STORE_OVERHEAD: usize = 3;

    /// Largest value the two-byte store length field can carry.
    pub const MAX_STORE_FIELD: usize = u16::MAX as usize;

    /// Header of the store-data function, without the length field.
    pub const STORE_FUNCTION: [u8; 3] = [CN, 0x50, 0x30];

    /// Smallest and largest module size accepted by the firmware.
    pub const MODULE_SIZE_RANGE: std::ops::RangeInclusive<u8> = 1..=16;

    /// QR Code model selection
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub enum QrModel {
        /// Original QR Code
        Model1 = 0x31,
        /// Enhanced QR Code with alignment patterns (recommended)
        #[default]
        Model2 = 0x32,
    }

    /// QR Code error correction level, in increasing order of redundancy.
    ///
    /// | Level | Recovery | n |
    /// |-------|----------|---|
    /// | L | ~7% | 0x30 |
    /// | M | ~15% | 0x31 |
    /// | Q | ~25% | 0x32 |
    /// | H | ~30% | 0x33 |
    #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default)]
    pub enum QrErrorLevel {
        L = 0x30,
        #[default]
        M = 0x31,
        Q = 0x32,
        H = 0x33,
    }

    impl std::str::FromStr for QrErrorLevel {
        type Err = String;

        fn from_str(s: &str) -> Result<Self, Self::Err> {
            match s.to_ascii_lowercase().as_str() {
                "l" | "low" => Ok(Self::L),
                "m" | "medium" => Ok(Self::M),
                "q" | "quartile" => Ok(Self::Q),
                "h" | "high" => Ok(Self::H),
                other => Err(format!(
                    "invalid error correction level '{other}' (expected l, m, q or h)"
                )),
            }
        }
    }

    /// Fixed module size and error correction chosen by the deployment.
    ///
    /// These are configuration, never request fields.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct QrProfile {
        module_size: u8,
        error_level: QrErrorLevel,
    }

    impl QrProfile {
        /// Module size tuned for 57mm paper. 6 prints smaller, 8 larger.
        pub const DEFAULT_MODULE_SIZE: u8 = 7;

        /// Build a profile. The module size is clamped to 1-16.
        pub fn new(module_size: u8, error_level: QrErrorLevel) -> Self {
            Self {
                module_size: module_size
                    .clamp(*MODULE_SIZE_RANGE.start(), *MODULE_SIZE_RANGE.end()),
                error_level,
            }
        }

        pub fn module_size(&self) -> u8 {
            self.module_size
        }

        pub fn error_level(&self) -> QrErrorLevel {
            self.error_level
        }
    }

    impl Default for QrProfile {
        fn default() -> Self {
            Self::new(Self::DEFAULT_MODULE_SIZE, QrErrorLevel::M)
        }
    }

    /// # Select Model (GS ( k 04 00 31 41 n1 n2)
    pub fn set_model(model: QrModel) -> Vec<u8> {
        let mut cmd = PREFIX.to_vec();
        cmd.extend([0x04, 0x00, CN, 0x41, model as u8, 0x00]);
        cmd
    }

    /// # Set Module Size (GS ( k 03 00 31 43 n)
    ///
    /// `size` is the edge of one module in dots, clamped to 1-16.
    pub fn set_module_size(size: u8) -> Vec<u8> {
        let size = size.clamp(*MODULE_SIZE_RANGE.start(), *MODULE_SIZE_RANGE.end());
        let mut cmd = PREFIX.to_vec();
        cmd.extend([0x03, 0x00, CN, 0x43, size]);
        cmd
    }

    /// # Set Error Correction (GS ( k 03 00 31 45 n)
    pub fn set_error_correction(level: QrErrorLevel) -> Vec<u8> {
        let mut cmd = PREFIX.to_vec();
        cmd.extend([0x03, 0x00, CN, 0x45, level as u8]);
        cmd
    }

    /// # Store Data (GS ( k pL pH 31 50 30 d1...dk)
    ///
    /// The payload is copied verbatim. There is no ceiling check: symbols
    /// too large for the firmware are rejected by the printer, not here.
    /// A length that overflows the 16-bit field is truncated and logged,
    /// since the printer will then read past the payload.
    pub fn store_data(data: &[u8]) -> Vec<u8> {
        let field = data.len() + STORE_OVERHEAD;
        if field > MAX_STORE_FIELD {
            tracing::warn!(
                payload = data.len(),
                max = MAX_STORE_FIELD - STORE_OVERHEAD,
                "QR payload overflows the store length field, printer output will desync"
            );
        }

        let mut cmd = Vec::with_capacity(PREFIX.len() + 2 + STORE_FUNCTION.len() + data.len());
        cmd.extend(PREFIX);
        cmd.extend(u16_le(field));
        cmd.extend(STORE_FUNCTION);
        cmd.extend_from_slice(data);
        cmd
    }

    /// # Print Stored Data (GS ( k 03 00 31 51 30)
    ///
    /// Printed at the current alignment.
    pub fn print() -> Vec<u8> {
        let mut cmd = PREFIX.to_vec();
        cmd.extend([0x03, 0x00, CN, 0x51, 0x30]);
        cmd
    }

    /// Generate the complete five-function QR sequence for `data`.
    pub fn generate(data: &[u8], profile: &QrProfile) -> Vec<u8> {
        let mut cmd = Vec::new();
        cmd.extend(set_model(QrModel::Model2));
        cmd.extend(set_module_size(profile.module_size));
        cmd.extend(set_error_correction(profile.error_level));
        cmd.extend(store_data(data));
        cmd.extend(print());
        cmd
    }
}

#[cfg(test)]
mod tests {
    use super::qr::*;

    #[test]
    fn test_set_model() {
        assert_eq!(
            set_model(QrModel::Model2),
            vec![0x1D, 0x28, 0x6B, 0x04, 0x00, 0x31, 0x41, 0x32, 0x00]
        );
        assert_eq!(
            set_model(QrModel::Model1),
            vec![0x1D, 0x28, 0x6B, 0x04, 0x00, 0x31, 0x41, 0x31, 0x00]
        );
    }

    #[test]
    fn test_set_module_size() {
        assert_eq!(
            set_module_size(7),
            vec![0x1D, 0x28, 0x6B, 0x03, 0x00, 0x31, 0x43, 0x07]
        );
        // Clamped
        assert_eq!(set_module_size(0)[7], 1);
        assert_eq!(set_module_size(40)[7], 16);
    }

    #[test]
    fn test_set_error_correction() {
        let levels = [
            (QrErrorLevel::L, 0x30),
            (QrErrorLevel::M, 0x31),
            (QrErrorLevel::Q, 0x32),
            (QrErrorLevel::H, 0x33),
        ];
        for (level, n) in levels {
            assert_eq!(
                set_error_correction(level),
                vec![0x1D, 0x28, 0x6B, 0x03, 0x00, 0x31, 0x45, n]
            );
        }
    }

    #[test]
    fn test_error_levels_are_ordered() {
        assert!(QrErrorLevel::L < QrErrorLevel::M);
        assert!(QrErrorLevel::M < QrErrorLevel::Q);
        assert!(QrErrorLevel::Q < QrErrorLevel::H);
    }

    #[test]
    fn test_store_data() {
        let cmd = store_data(b"Hello");
        assert_eq!(cmd[0..3], [0x1D, 0x28, 0x6B]);
        assert_eq!(cmd[3], 8); // 5 + 3
        assert_eq!(cmd[4], 0);
        assert_eq!(cmd[5..8], [0x31, 0x50, 0x30]);
        assert_eq!(&cmd[8..], b"Hello");
    }

    #[test]
    fn test_store_data_empty_payload() {
        assert_eq!(
            store_data(b""),
            vec![0x1D, 0x28, 0x6B, 0x03, 0x00, 0x31, 0x50, 0x30]
        );
    }

    #[test]
    fn test_store_data_length_crosses_one_byte() {
        // 253 + 3 = 256 -> low 0x00, high 0x01
        let payload = vec![b'A'; 253];
        let cmd = store_data(&payload);
        assert_eq!(cmd[3], 0x00);
        assert_eq!(cmd[4], 0x01);

        // 252 + 3 = 255 fits in the low byte
        let payload = vec![b'A'; 252];
        let cmd = store_data(&payload);
        assert_eq!(cmd[3], 0xFF);
        assert_eq!(cmd[4], 0x00);
    }

    #[test]
    fn test_store_length_field_decodes_to_len_plus_three() {
        for n in [0usize, 1, 100, 252, 253, 254, 500, 1000, 4000] {
            let payload = vec![b'x'; n];
            let cmd = store_data(&payload);
            let decoded = cmd[3] as usize + 256 * cmd[4] as usize;
            assert_eq!(decoded, n + 3, "payload length {n}");
        }
    }

    #[test]
    fn test_store_data_oversized_payload_keeps_low_bits() {
        let data = vec![b'x'; MAX_STORE_FIELD - STORE_OVERHEAD + 1];
        let cmd = store_data(&data);

        // 65536 does not fit: the field wraps to 0 and the payload is still written whole.
        assert_eq!((cmd[3], cmd[4]), (0x00, 0x00));
        assert_eq!(cmd.len(), 8 + data.len());

        let fits = store_data(&data[1..]);
        assert_eq!((fits[3], fits[4]), (0xFF, 0xFF));
    }

    #[test]
    fn test_print() {
        assert_eq!(
            print(),
            vec![0x1D, 0x28, 0x6B, 0x03, 0x00, 0x31, 0x51, 0x30]
        );
    }

    #[test]
    fn test_generate_default_profile() {
        let cmd = generate(b"Q1", &QrProfile::default());
        let expected: Vec<u8> = [
            &[0x1D, 0x28, 0x6B, 0x04, 0x00, 0x31, 0x41, 0x32, 0x00][..],
            &[0x1D, 0x28, 0x6B, 0x03, 0x00, 0x31, 0x43, 0x07],
            &[0x1D, 0x28, 0x6B, 0x03, 0x00, 0x31, 0x45, 0x31],
            &[0x1D, 0x28, 0x6B, 0x05, 0x00, 0x31, 0x50, 0x30, b'Q', b'1'],
            &[0x1D, 0x28, 0x6B, 0x03, 0x00, 0x31, 0x51, 0x30],
        ]
        .concat();
        assert_eq!(cmd, expected);
    }

    #[test]
    fn test_profile_clamps_module_size() {
        assert_eq!(QrProfile::new(0, QrErrorLevel::H).module_size(), 1);
        assert_eq!(QrProfile::new(99, QrErrorLevel::H).module_size(), 16);
        assert_eq!(QrProfile::default().module_size(), 7);
        assert_eq!(QrProfile::default().error_level(), QrErrorLevel::M);
    }

    #[test]
    fn test_error_level_from_str() {
        assert_eq!("m".parse::<QrErrorLevel>(), Ok(QrErrorLevel::M));
        assert_eq!("High".parse::<QrErrorLevel>(), Ok(QrErrorLevel::H));
        assert!("x".parse::<QrErrorLevel>().is_err());
    }
}
