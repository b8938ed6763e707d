//! UI definitions module
//! Based on: https://github.com/lupyuen/pinetime-watchface/blob/master/src/lib.rs

use embedded_graphics::{pixelcolor::Rgb565, primitives::Rectangle};

use crate::{
    clock::ClockSample,
    mode::DisplayMode,
    state::{BatteryState, ConnectivityState},
};

mod glyph;
mod helium_watchface;
mod primitive;

pub use glyph::BLUETOOTH_DISCONNECTED;
pub use helium_watchface::HeliumWatchface;
pub use primitive::{DrawPrimitive, FontSize, Frame, Glyph, Label, MAX_PRIMITIVES};

/// Color format of the PineTime LCD
pub type ColorMode = Rgb565;

pub trait WatchFace {
    /// Render the complete face for `state` on a surface of `bounds`
    fn render(&self, state: &WatchFaceState, bounds: Rectangle) -> Frame;
}

/// State for the watch face
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct WatchFaceState {
    pub sample: ClockSample,
    pub mode: DisplayMode,
    pub battery: BatteryState,
    pub connectivity: ConnectivityState,
}
