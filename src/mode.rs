//! Display mode flags and ring assignment

use crate::config::{INNER_RADIUS, OUTER_RADIUS};

/// User selectable display flags
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct DisplayMode {
    /// Show the hour on the inner ring and the minute on the outer ring
    pub swap_hour_minute_rings: bool,
    /// Show the battery badge
    pub show_battery: bool,
}

impl Default for DisplayMode {
    fn default() -> Self {
        Self {
            swap_hour_minute_rings: false,
            show_battery: true,
        }
    }
}

/// Radii the hour and minute indicators travel on
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RingAssignment {
    pub hour_ring_radius: u32,
    pub minute_ring_radius: u32,
}

/// Pick the indicator radii for `mode`.
///
/// Only the indicators move between rings. The ring outlines are always
/// drawn at their fixed radii.
pub fn resolve_rings(mode: DisplayMode) -> RingAssignment {
    if mode.swap_hour_minute_rings {
        RingAssignment {
            hour_ring_radius: INNER_RADIUS,
            minute_ring_radius: OUTER_RADIUS,
        }
    } else {
        RingAssignment {
            hour_ring_radius: OUTER_RADIUS,
            minute_ring_radius: INNER_RADIUS,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_puts_hour_outside() {
        let rings = resolve_rings(DisplayMode::default());
        assert_eq!(rings.hour_ring_radius, OUTER_RADIUS);
        assert_eq!(rings.minute_ring_radius, INNER_RADIUS);
    }

    #[test]
    fn swap_inverts_assignment() {
        for show_battery in [false, true] {
            let rings = resolve_rings(DisplayMode {
                swap_hour_minute_rings: true,
                show_battery,
            });
            assert_eq!(rings.hour_ring_radius, INNER_RADIUS);
            assert_eq!(rings.minute_ring_radius, OUTER_RADIUS);
        }
    }
}
