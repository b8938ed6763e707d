//! Face geometry and palette configuration

use embedded_graphics::pixelcolor::{Rgb565, RgbColor};

/// Display width of the PineTime LCD
pub const LCD_W: u16 = 240;
/// Display height of the PineTime LCD
pub const LCD_H: u16 = 240;

/// Radius of the outer orbital ring
pub const OUTER_RADIUS: u32 = 60;
/// Radius of the inner orbital ring
pub const INNER_RADIUS: u32 = 35;
/// Radius of the date and battery badges
pub const DATE_RADIUS: u32 = 15;
/// Inset of the corner badges from the surface edge
pub const BADGE_MARGIN: u32 = 5;

/// Stroke width of the orbital rings
pub const RING_STROKE: u32 = 5;
/// Stroke width of the corner badge outlines
pub const BADGE_STROKE: u32 = 2;

pub const HOUR_DOT_RADIUS: u32 = 5;
pub const MINUTE_DOT_RADIUS: u32 = 3;

/// Colors used by the face
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Palette {
    pub foreground: Rgb565,
    pub background: Rgb565,
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            foreground: Rgb565::WHITE,
            background: Rgb565::BLACK,
        }
    }
}

/// Runtime face configuration
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FaceConfig {
    pub palette: Palette,
    /// Offset of local time from UTC in seconds
    pub utc_offset_secs: i32,
}

impl Default for FaceConfig {
    fn default() -> Self {
        Self {
            palette: Palette::default(),
            utc_offset_secs: 0,
        }
    }
}
