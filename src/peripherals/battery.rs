//! Battery status check
//!
//! Implementation based upon https://github.com/dbrgn/pinetime-rtic/blob/master/pinetime-rtic/src/battery.rs
//! and https://wiki.pine64.org/wiki/PineTime.

use embassy_nrf::saadc::Saadc;
use helium::BatteryState;

/// Battery configuration
struct BatteryConfig<'a> {
    /// ADC instance for battery voltage measurement
    adc: Saadc<'a, 1>,
}

/// Battery API
pub struct Battery {
    /// Battery configuration
    config: BatteryConfig<'static>,
    /// Last reported state
    last: Option<BatteryState>,
}

impl Battery {
    /// Configure battery settings on boot
    pub fn init(adc: Saadc<'static, 1>) -> Self {
        Self {
            config: BatteryConfig { adc },
            last: None,
        }
    }

    /// Current battery state
    pub async fn state(&mut self) -> BatteryState {
        BatteryState::from_millivolts(self.get_voltage().await)
    }

    /// Sample the battery and return the new state if the charge changed
    /// since the last call.
    pub async fn update(&mut self) -> Option<BatteryState> {
        let state = self.state().await;
        if self.last == Some(state) {
            return None;
        }
        self.last = Some(state);
        Some(state)
    }

    /// Battery voltage in millivolts
    async fn get_voltage(&mut self) -> u16 {
        let mut buf = [0; 1];
        self.config.adc.sample(&mut buf).await;
        millivolts(buf[0])
    }
}

/// Convert a 12 bit ADC sample into the battery voltage.
///
/// For detailed explanation of formula check https://wiki.pine64.org/wiki/PineTime
fn millivolts(raw: i16) -> u16 {
    // Negative readings are noise around 0 V
    let raw = raw.clamp(0, 4095) as u32;
    // Use u32 during calculation to prevent overflow
    (raw * 2000 / 1241) as u16
}
