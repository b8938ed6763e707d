//! Rendering scenarios for the Helium watchface.

use embedded_graphics::{
    pixelcolor::{Rgb565, RgbColor},
    prelude::*,
    primitives::Rectangle,
};
use helium::{
    config::{DATE_RADIUS, INNER_RADIUS, OUTER_RADIUS},
    ui::{DrawPrimitive, FontSize, Frame, HeliumWatchface, WatchFace, WatchFaceState},
    BatteryState, ClockSample, ConnectivityState, DisplayMode,
};

const W: usize = 144;
const H: usize = 168;
const CENTER: Point = Point::new(72, 84);

fn bounds() -> Rectangle {
    Rectangle::new(Point::zero(), Size::new(W as u32, H as u32))
}

fn render(sample: ClockSample, mode: DisplayMode, connected: bool) -> Frame {
    let state = WatchFaceState {
        sample,
        mode,
        battery: BatteryState::new(87),
        connectivity: ConnectivityState { connected },
    };
    HeliumWatchface::default().render(&state, bounds())
}

fn mode(swap: bool, show_battery: bool) -> DisplayMode {
    DisplayMode {
        swap_hour_minute_rings: swap,
        show_battery,
    }
}

/// Filled circles away from the center, in draw order: hour then minute
fn indicators(frame: &Frame) -> Vec<(Point, u32)> {
    frame
        .primitives()
        .iter()
        .filter_map(|p| match *p {
            DrawPrimitive::FilledCircle { center, radius, .. } if center != CENTER => {
                Some((center, radius))
            }
            _ => None,
        })
        .collect()
}

fn ring_radii(frame: &Frame) -> Vec<u32> {
    frame
        .primitives()
        .iter()
        .filter_map(|p| match *p {
            DrawPrimitive::StrokedCircle { center, radius, .. } if center == CENTER => Some(radius),
            _ => None,
        })
        .collect()
}

#[test]
fn three_o_clock_default_mode() {
    let frame = render(ClockSample::new(3, 0, 14), mode(false, true), true);
    assert_eq!(
        indicators(&frame),
        vec![
            (Point::new(72 + OUTER_RADIUS as i32, 84), 5),
            (Point::new(72, 84 - INNER_RADIUS as i32), 3),
        ]
    );
}

#[test]
fn half_past_twelve_swapped() {
    let frame = render(ClockSample::new(12, 30, 14), mode(true, true), true);
    assert_eq!(
        indicators(&frame),
        vec![
            (Point::new(72, 84 - INNER_RADIUS as i32), 5),
            (Point::new(72, 84 + OUTER_RADIUS as i32), 3),
        ]
    );
}

#[test]
fn midnight_hour_sits_at_top() {
    let frame = render(ClockSample::new(0, 15, 1), mode(false, false), true);
    assert_eq!(
        indicators(&frame)[0],
        (Point::new(72, 84 - OUTER_RADIUS as i32), 5)
    );
}

#[test]
fn ring_outlines_ignore_swap() {
    for swap in [false, true] {
        let frame = render(ClockSample::new(7, 41, 30), mode(swap, true), true);
        assert_eq!(ring_radii(&frame), vec![OUTER_RADIUS, INNER_RADIUS]);
    }
}

#[test]
fn single_digit_days_are_padded() {
    for day in 1..=9 {
        let frame = render(ClockSample::new(4, 20, day), mode(false, false), true);
        let text = frame
            .primitives()
            .iter()
            .find_map(|p| match p {
                DrawPrimitive::Text {
                    text,
                    font: FontSize::Large,
                    ..
                } => Some(*text),
                _ => None,
            })
            .expect("date text");
        assert_eq!(text.as_str(), format!("0{day}"));
    }
}

#[test]
fn badges_follow_mode_and_link() {
    let battery_badge = |frame: &Frame| {
        frame.primitives().iter().any(|p| {
            matches!(p, DrawPrimitive::Text { font: FontSize::Small, text, .. } if text.as_str() == "87")
        })
    };
    let link_badge = |frame: &Frame| {
        frame
            .primitives()
            .iter()
            .any(|p| matches!(p, DrawPrimitive::Image { .. }))
    };

    let sample = ClockSample::new(9, 5, 12);
    for show_battery in [false, true] {
        for connected in [false, true] {
            let frame = render(sample, mode(false, show_battery), connected);
            assert_eq!(battery_badge(&frame), show_battery);
            assert_eq!(link_badge(&frame), !connected);
        }
    }
}

#[test]
fn out_of_range_minute_drops_only_its_dot() {
    let frame = render(ClockSample::new(3, 75, 9), DisplayMode::default(), false);

    assert_eq!(
        indicators(&frame),
        vec![(Point::new(72 + OUTER_RADIUS as i32, 84), 5)]
    );
    assert_eq!(ring_radii(&frame), vec![OUTER_RADIUS, INNER_RADIUS]);

    let texts: Vec<&str> = frame
        .primitives()
        .iter()
        .filter_map(|p| match p {
            DrawPrimitive::Text { text, .. } => Some(text.as_str()),
            _ => None,
        })
        .collect();
    assert_eq!(texts, vec!["09", "87"]);
    assert!(frame
        .primitives()
        .iter()
        .any(|p| matches!(p, DrawPrimitive::Image { .. })));
}

#[test]
fn primitives_follow_draw_order() {
    let frame = render(ClockSample::new(9, 5, 12), mode(false, true), false);
    let kinds: Vec<&str> = frame
        .primitives()
        .iter()
        .map(|p| match p {
            DrawPrimitive::StrokedCircle { .. } => "stroke",
            DrawPrimitive::FilledCircle { .. } => "fill",
            DrawPrimitive::Image { .. } => "image",
            DrawPrimitive::Text { .. } => "text",
        })
        .collect();
    assert_eq!(
        kinds,
        vec![
            "stroke", "stroke", "fill", "fill", "fill", "text", "stroke", "text", "stroke",
            "image"
        ]
    );
}

#[test]
fn render_is_repeatable() {
    let sample = ClockSample::new(5, 55, 28);
    assert_eq!(
        render(sample, mode(true, true), false),
        render(sample, mode(true, true), false)
    );
}

struct Canvas {
    pixels: Vec<Rgb565>,
}

impl Canvas {
    fn new() -> Self {
        Self {
            pixels: vec![Rgb565::RED; W * H],
        }
    }

    fn pixel(&self, x: i32, y: i32) -> Rgb565 {
        self.pixels[y as usize * W + x as usize]
    }
}

impl OriginDimensions for Canvas {
    fn size(&self) -> Size {
        Size::new(W as u32, H as u32)
    }
}

impl DrawTarget for Canvas {
    type Color = Rgb565;
    type Error = core::convert::Infallible;

    fn draw_iter<I>(&mut self, pixels: I) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = Pixel<Self::Color>>,
    {
        for Pixel(point, color) in pixels {
            if (0..W as i32).contains(&point.x) && (0..H as i32).contains(&point.y) {
                self.pixels[point.y as usize * W + point.x as usize] = color;
            }
        }
        Ok(())
    }
}

#[test]
fn frame_draws_onto_surface() {
    let frame = render(ClockSample::new(3, 0, 14), mode(false, true), false);
    let mut canvas = Canvas::new();
    frame.draw(&mut canvas).unwrap();

    // Background cleared
    assert_eq!(canvas.pixel(0, H as i32 - 1), Rgb565::BLACK);
    // Hour dot on the outer ring at 3 o'clock
    assert_eq!(canvas.pixel(132, 84), Rgb565::WHITE);
    // Edge of the date badge, clear of the day digits
    assert_eq!(canvas.pixel(72, 84 + DATE_RADIUS as i32 - 1), Rgb565::WHITE);
    // Ring outline
    assert_eq!(canvas.pixel(72 - OUTER_RADIUS as i32, 84), Rgb565::WHITE);
    // Between the rings
    assert_eq!(canvas.pixel(72 - 48, 84), Rgb565::BLACK);
}
