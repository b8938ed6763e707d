//! Cached platform state shown on the face

/// Last known battery charge
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct BatteryState {
    charge_percent: u8,
}

impl BatteryState {
    /// Create a battery state, clamping the charge to 100 %
    pub const fn new(charge_percent: u8) -> Self {
        Self {
            charge_percent: if charge_percent > 100 {
                100
            } else {
                charge_percent
            },
        }
    }

    /// Estimate the charge from the cell voltage in millivolts.
    ///
    /// Uses fixed data points and linear interpolation in between.
    pub fn from_millivolts(voltage: u16) -> Self {
        let percent = match voltage {
            0..=3449 => 0,
            3450..=3699 => (voltage - 3450) / 5,
            3700..=4199 => 50 + (voltage - 3700) / 10,
            _ => 100,
        };
        Self::new(percent as u8)
    }

    /// Battery capacity in percent
    pub fn percent(&self) -> u8 {
        self.charge_percent
    }
}

/// Bluetooth link state
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ConnectivityState {
    pub connected: bool,
}

impl ConnectivityState {
    pub const CONNECTED: Self = Self { connected: true };
    pub const DISCONNECTED: Self = Self { connected: false };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn percent_is_clamped() {
        assert_eq!(BatteryState::new(180).percent(), 100);
        assert_eq!(BatteryState::new(42).percent(), 42);
    }

    #[test]
    fn discharge_curve() {
        assert_eq!(BatteryState::from_millivolts(3000).percent(), 0);
        assert_eq!(BatteryState::from_millivolts(3450).percent(), 0);
        assert_eq!(BatteryState::from_millivolts(3600).percent(), 30);
        assert_eq!(BatteryState::from_millivolts(3700).percent(), 50);
        assert_eq!(BatteryState::from_millivolts(4150).percent(), 95);
        assert_eq!(BatteryState::from_millivolts(4300).percent(), 100);
    }
}
