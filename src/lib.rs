//! Helium orbital watchface
//!
//! Turns a wall clock sample and a couple of display flags into the draw
//! primitives of one frame, and decides when a new frame is due. Hardware
//! glue for the PineTime lives in the firmware binary.

#![cfg_attr(not(test), no_std)]
#![allow(async_fn_in_trait)]

// This mod MUST go first, so that the others see its macros.
pub(crate) mod fmt;

pub mod clock;
pub mod config;
pub mod geometry;
pub mod mode;
pub mod settings;
pub mod state;
pub mod trigger;
pub mod ui;

pub use clock::{ClockSample, ClockSource};
pub use config::FaceConfig;
pub use mode::{resolve_rings, DisplayMode, RingAssignment};
pub use state::{BatteryState, ConnectivityState};
pub use trigger::{FaceContext, FaceEvent, Haptics, Reaction};
