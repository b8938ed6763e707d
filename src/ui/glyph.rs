//! Bitmap glyphs

use super::primitive::Glyph;

/// Bluetooth rune struck through, shown while the phone link is down
pub static BLUETOOTH_DISCONNECTED: Glyph = Glyph {
    rows: &[
        0x8100, 0x4180, 0x2140, 0x1120, 0x1910, 0x0d20, 0x0740, 0x0380, //
        0x0180, 0x03c0, 0x0560, 0x0930, 0x1118, 0x0124, 0x0142, 0x0181,
    ],
};
