//! Helium watchface
//!
//! Two orbital rings around a date badge. A dot on one ring marks the hour,
//! a smaller dot on the other marks the minute. Battery charge and a lost
//! phone link show up as badges in the corners.

use embedded_graphics::{geometry::Point, primitives::Rectangle};

use super::{
    glyph::BLUETOOTH_DISCONNECTED, ColorMode, DrawPrimitive, FontSize, Frame, Label, WatchFace,
    WatchFaceState,
};
use crate::{
    config::{
        Palette, BADGE_MARGIN, BADGE_STROKE, DATE_RADIUS, HOUR_DOT_RADIUS, INNER_RADIUS,
        MINUTE_DOT_RADIUS, OUTER_RADIUS, RING_STROKE,
    },
    geometry::map_to_circle,
    mode::resolve_rings,
};

/// Basic orbital watchface
pub struct HeliumWatchface {
    palette: Palette,
}

impl HeliumWatchface {
    pub fn new(palette: Palette) -> Self {
        Self { palette }
    }

    fn indicator(
        frame: &mut Frame,
        value: u8,
        period: i32,
        ring_radius: u32,
        dot_radius: u32,
        center: Point,
        color: ColorMode,
    ) {
        match map_to_circle(i32::from(value), period, ring_radius, center) {
            Some(position) => frame.push(DrawPrimitive::FilledCircle {
                center: position,
                radius: dot_radius,
                color,
            }),
            None => warn!("No indicator for {} of {}", value, period),
        }
    }
}

impl Default for HeliumWatchface {
    fn default() -> Self {
        Self::new(Palette::default())
    }
}

/// Center of the surface, rounded down
fn surface_center(bounds: &Rectangle) -> Point {
    bounds.top_left
        + Point::new(
            (bounds.size.width / 2) as i32,
            (bounds.size.height / 2) as i32,
        )
}

/// Center of a corner badge inset by the margin from the top left corner
fn top_left_badge(bounds: &Rectangle) -> Point {
    let inset = (BADGE_MARGIN + DATE_RADIUS) as i32;
    bounds.top_left + Point::new(inset, inset)
}

/// Center of a corner badge inset by the margin from the bottom right corner
fn bottom_right_badge(bounds: &Rectangle) -> Point {
    let inset = (BADGE_MARGIN + DATE_RADIUS + 1) as i32;
    bounds.top_left
        + Point::new(
            bounds.size.width as i32 - inset,
            bounds.size.height as i32 - inset,
        )
}

impl WatchFace for HeliumWatchface {
    fn render(&self, state: &WatchFaceState, bounds: Rectangle) -> Frame {
        let foreground = self.palette.foreground;
        let background = self.palette.background;
        let center = surface_center(&bounds);
        let rings = resolve_rings(state.mode);
        debug!("Rendering {}:{}", state.sample.hour, state.sample.minute);

        let mut frame = Frame::new(background);

        // Orbital rings stay put, only the indicators swap
        for radius in [OUTER_RADIUS, INNER_RADIUS] {
            frame.push(DrawPrimitive::StrokedCircle {
                center,
                radius,
                stroke_width: RING_STROKE,
                color: foreground,
            });
        }

        Self::indicator(
            &mut frame,
            state.sample.hour,
            12,
            rings.hour_ring_radius,
            HOUR_DOT_RADIUS,
            center,
            foreground,
        );
        Self::indicator(
            &mut frame,
            state.sample.minute,
            60,
            rings.minute_ring_radius,
            MINUTE_DOT_RADIUS,
            center,
            foreground,
        );

        // Date badge
        frame.push(DrawPrimitive::FilledCircle {
            center,
            radius: DATE_RADIUS,
            color: foreground,
        });
        frame.push(DrawPrimitive::Text {
            center,
            text: Label::format(format_args!("{:02}", state.sample.day)),
            font: FontSize::Large,
            color: background,
        });

        if state.mode.show_battery {
            let badge = bottom_right_badge(&bounds);
            frame.push(DrawPrimitive::StrokedCircle {
                center: badge,
                radius: DATE_RADIUS,
                stroke_width: BADGE_STROKE,
                color: foreground,
            });
            frame.push(DrawPrimitive::Text {
                center: badge,
                text: Label::format(format_args!("{}", state.battery.percent())),
                font: FontSize::Small,
                color: foreground,
            });
        }

        if !state.connectivity.connected {
            let badge = top_left_badge(&bounds);
            frame.push(DrawPrimitive::StrokedCircle {
                center: badge,
                radius: DATE_RADIUS,
                stroke_width: BADGE_STROKE,
                color: foreground,
            });
            frame.push(DrawPrimitive::Image {
                center: badge,
                glyph: &BLUETOOTH_DISCONNECTED,
                color: foreground,
            });
        }

        frame
    }
}

#[cfg(test)]
mod tests {
    use embedded_graphics::geometry::Size;

    use super::*;
    use crate::{
        clock::ClockSample,
        mode::DisplayMode,
        state::{BatteryState, ConnectivityState},
    };

    fn bounds() -> Rectangle {
        Rectangle::new(Point::zero(), Size::new(144, 168))
    }

    fn state(day: u8) -> WatchFaceState {
        WatchFaceState {
            sample: ClockSample::new(10, 10, day),
            mode: DisplayMode::default(),
            battery: BatteryState::new(80),
            connectivity: ConnectivityState::CONNECTED,
        }
    }

    #[test]
    fn badges_sit_inside_corners() {
        assert_eq!(surface_center(&bounds()), Point::new(72, 84));
        assert_eq!(top_left_badge(&bounds()), Point::new(20, 20));
        assert_eq!(bottom_right_badge(&bounds()), Point::new(123, 147));
    }

    #[test]
    fn day_is_zero_padded() {
        let frame = HeliumWatchface::default().render(&state(4), bounds());
        let day = frame.primitives().iter().find_map(|p| match p {
            DrawPrimitive::Text {
                text,
                font: FontSize::Large,
                ..
            } => Some(*text),
            _ => None,
        });
        assert_eq!(day.map(|t| t.as_str().len()), Some(2));
        assert_eq!(day.as_ref().map(Label::as_str), Some("04"));
    }

    #[test]
    fn date_text_is_inverted() {
        let frame = HeliumWatchface::default().render(&state(21), bounds());
        let colors: heapless::Vec<ColorMode, 2> = frame
            .primitives()
            .iter()
            .filter(|p| p.center() == Point::new(72, 84))
            .filter_map(|p| match p {
                DrawPrimitive::FilledCircle { color, .. } | DrawPrimitive::Text { color, .. } => {
                    Some(*color)
                }
                _ => None,
            })
            .collect();
        let palette = Palette::default();
        assert_eq!(colors.as_slice(), &[palette.foreground, palette.background]);
    }
}
