//! Redraw trigger
//!
//! [`FaceContext`] owns the cached display mode, battery and connectivity
//! state. Every [`FaceEvent`] commits its new value first and then marks the
//! face dirty; the display task consumes the dirty flag and renders once, no
//! matter how many events arrived in between.
//!
//! Side effects are handed back as a [`Reaction`] for the dispatcher to
//! carry out, so the context itself never touches hardware.

use embedded_graphics::primitives::Rectangle;

use crate::{
    clock::{local_time, ClockSample, ClockSource},
    config::FaceConfig,
    mode::DisplayMode,
    settings::{SettingsError, SettingsMessage, StoredSettings},
    state::{BatteryState, ConnectivityState},
    ui::{Frame, WatchFace, WatchFaceState},
};

/// Inputs that can invalidate the face
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum FaceEvent {
    /// A new minute started
    TimeTick,
    BatteryChanged(BatteryState),
    ConnectivityChanged(ConnectivityState),
    SettingsChanged(DisplayMode),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum HapticAlert {
    /// Two short pulses
    DoublePulse,
}

/// Vibration motor
pub trait Haptics {
    /// Fire and forget two short pulses
    fn double_pulse(&mut self);
}

/// Side effects requested by an event
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Reaction {
    pub haptic: Option<HapticAlert>,
    /// Settings to write to the key/value store
    pub persist: Option<StoredSettings>,
}

impl Reaction {
    /// Run the requested haptic alert, if any
    pub fn alert<H: Haptics>(&self, haptics: &mut H) {
        if let Some(HapticAlert::DoublePulse) = self.haptic {
            haptics.double_pulse();
        }
    }
}

/// Cached face state and dirty flag
pub struct FaceContext<F: WatchFace> {
    face: F,
    utc_offset_secs: i32,
    mode: DisplayMode,
    battery: BatteryState,
    connectivity: ConnectivityState,
    dirty: bool,
}

impl<F: WatchFace> FaceContext<F> {
    /// Create the context from the persisted mode and the current platform
    /// state. The first frame is always due.
    pub fn new(
        face: F,
        config: &FaceConfig,
        mode: DisplayMode,
        battery: BatteryState,
        connectivity: ConnectivityState,
    ) -> Self {
        Self {
            face,
            utc_offset_secs: config.utc_offset_secs,
            mode,
            battery,
            connectivity,
            dirty: true,
        }
    }

    /// Commit an event and mark the face dirty
    pub fn handle(&mut self, event: FaceEvent) -> Reaction {
        let mut reaction = Reaction::default();

        match event {
            FaceEvent::TimeTick => {}
            FaceEvent::BatteryChanged(battery) => {
                self.battery = battery;
            }
            FaceEvent::ConnectivityChanged(connectivity) => {
                if self.connectivity.connected && !connectivity.connected {
                    info!("Phone disconnected");
                    reaction.haptic = Some(HapticAlert::DoublePulse);
                }
                self.connectivity = connectivity;
            }
            FaceEvent::SettingsChanged(mode) => {
                info!("Settings applied: {}", mode);
                self.mode = mode;
                reaction.persist = Some(StoredSettings::from(mode));
            }
        }

        self.dirty = true;
        reaction
    }

    /// Validate a raw settings message and apply it.
    ///
    /// An incomplete message leaves the current mode in place and requests
    /// no write.
    pub fn apply_settings(&mut self, message: &SettingsMessage) -> Result<Reaction, SettingsError> {
        match message.validate() {
            Ok(mode) => Ok(self.handle(FaceEvent::SettingsChanged(mode))),
            Err(err) => {
                warn!("Settings rejected: {}", err);
                Err(err)
            }
        }
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Consume the dirty flag, returning whether a redraw is due
    pub fn take_dirty(&mut self) -> bool {
        core::mem::replace(&mut self.dirty, false)
    }

    pub fn mode(&self) -> DisplayMode {
        self.mode
    }

    pub fn battery(&self) -> BatteryState {
        self.battery
    }

    pub fn connectivity(&self) -> ConnectivityState {
        self.connectivity
    }

    /// Render the face for `sample` from the cached state
    pub fn render(&self, sample: ClockSample, bounds: Rectangle) -> Frame {
        let state = WatchFaceState {
            sample,
            mode: self.mode,
            battery: self.battery,
            connectivity: self.connectivity,
        };
        self.face.render(&state, bounds)
    }

    /// Render a fresh frame if the face is dirty, sampling the clock once
    pub fn render_if_dirty<C: ClockSource>(&mut self, clock: &C, bounds: Rectangle) -> Option<Frame> {
        if !self.take_dirty() {
            return None;
        }
        let sample = ClockSample::from_datetime(local_time(clock.now(), self.utc_offset_secs));
        Some(self.render(sample, bounds))
    }
}
