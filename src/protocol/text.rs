//! # ESC/POS Text Styling Commands
//!
//! | Style | Command | On | Off |
//! |-------|---------|----|-----|
//! | Bold | ESC E n | `1B 45 01` | `1B 45 00` |
//! | Alignment | ESC a n | center `1B 61 01` | left `1B 61 00` |
//! | Double height | ESC ! n | `1B 21 10` | `1B 21 00` |
//! | Underline | ESC - n | `1B 2D 01` | `1B 2D 00` |
//! | Small font | ESC ! n | `1B 21 01` | normal `1B 21 00` |
//!
//! Double height and the font size both go through `ESC !` (print mode), so
//! turning either one off resets the whole print mode byte to zero.

use super::commands::ESC;

// ============================================================================
// TEXT ALIGNMENT
// ============================================================================

/// Text alignment options
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Alignment {
    #[default]
    Left = 0,
    Center = 1,
}

/// # Set Text Alignment (ESC a n)
///
/// Takes effect at the start of the next line.
///
/// ```
/// use cleanlink::protocol::text::{align, Alignment};
///
/// assert_eq!(align(Alignment::Center), vec![0x1B, 0x61, 0x01]);
/// ```
#[inline]
pub fn align(alignment: Alignment) -> Vec<u8> {
    vec![ESC, b'a', alignment as u8]
}

/// Left alignment (ESC a 0)
#[inline]
pub fn align_left() -> Vec<u8> {
    align(Alignment::Left)
}

/// Center alignment (ESC a 1)
#[inline]
pub fn align_center() -> Vec<u8> {
    align(Alignment::Center)
}

// ============================================================================
// EMPHASIS
// ============================================================================

/// # Bold (ESC E n)
#[inline]
pub fn bold(enabled: bool) -> Vec<u8> {
    vec![ESC, b'E', enabled as u8]
}

/// # Underline (ESC - n)
///
/// One-dot underline when enabled.
#[inline]
pub fn underline(enabled: bool) -> Vec<u8> {
    vec![ESC, b'-', enabled as u8]
}

// ============================================================================
// PRINT MODE (ESC !)
// ============================================================================

/// Print mode bit for double-height characters.
const MODE_DOUBLE_HEIGHT: u8 = 0x10;

/// Print mode bit selecting the small font (font B).
const MODE_SMALL_FONT: u8 = 0x01;

/// # Double Height (ESC ! n)
///
/// Used for title lines. Off writes a zero print mode.
#[inline]
pub fn double_height(enabled: bool) -> Vec<u8> {
    print_mode(if enabled { MODE_DOUBLE_HEIGHT } else { 0 })
}

/// Font size selection via print mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FontSize {
    #[default]
    Normal,
    Small,
}

/// # Font Size (ESC ! n)
///
/// ```
/// use cleanlink::protocol::text::{font_size, FontSize};
///
/// assert_eq!(font_size(FontSize::Small), vec![0x1B, 0x21, 0x01]);
/// assert_eq!(font_size(FontSize::Normal), vec![0x1B, 0x21, 0x00]);
/// ```
#[inline]
pub fn font_size(size: FontSize) -> Vec<u8> {
    match size {
        FontSize::Normal => print_mode(0),
        FontSize::Small => print_mode(MODE_SMALL_FONT),
    }
}

#[inline]
fn print_mode(n: u8) -> Vec<u8> {
    vec![ESC, b'!', n]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_alignment() {
        assert_eq!(align_left(), vec![0x1B, 0x61, 0x00]);
        assert_eq!(align_center(), vec![0x1B, 0x61, 0x01]);
    }

    #[test]
    fn test_bold() {
        assert_eq!(bold(true), vec![0x1B, 0x45, 0x01]);
        assert_eq!(bold(false), vec![0x1B, 0x45, 0x00]);
    }

    #[test]
    fn test_double_height() {
        assert_eq!(double_height(true), vec![0x1B, 0x21, 0x10]);
        assert_eq!(double_height(false), vec![0x1B, 0x21, 0x00]);
    }

    #[test]
    fn test_underline() {
        assert_eq!(underline(true), vec![0x1B, 0x2D, 0x01]);
        assert_eq!(underline(false), vec![0x1B, 0x2D, 0x00]);
    }

    #[test]
    fn test_font_size() {
        assert_eq!(font_size(FontSize::Small), vec![0x1B, 0x21, 0x01]);
        assert_eq!(font_size(FontSize::Normal), vec![0x1B, 0x21, 0x00]);
    }

    #[test]
    fn test_double_height_off_matches_normal_font() {
        // Both reset the shared print mode byte.
        assert_eq!(double_height(false), font_size(FontSize::Normal));
    }
}
