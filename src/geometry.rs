//! Time unit to dial position mapping

use core::f32::consts::PI;

use embedded_graphics::geometry::Point;

/// Map `value` out of `period` onto the circle of `radius` around `center`.
///
/// Zero points straight up and the angle grows clockwise, so a quarter of
/// the period lands at 3 o'clock. Returns `None` when `value` lies outside
/// `0..=period` (or the period is not positive); callers draw no indicator
/// in that case.
pub fn map_to_circle(value: i32, period: i32, radius: u32, center: Point) -> Option<Point> {
    if period <= 0 || value < 0 || value > period {
        return None;
    }

    // Keep sub-pixel precision until the very end to avoid jitter between
    // neighbouring minutes
    let angle = 2.0 * PI * value as f32 / period as f32;
    let radius = radius as f32;
    let x = center.x as f32 + radius * libm::sinf(angle);
    let y = center.y as f32 - radius * libm::cosf(angle);

    Some(Point::new(libm::roundf(x) as i32, libm::roundf(y) as i32))
}

#[cfg(test)]
mod tests {
    use super::*;

    const CENTER: Point = Point::new(72, 84);

    #[test]
    fn quarter_turns_land_on_cardinal_points() {
        assert_eq!(map_to_circle(0, 12, 60, CENTER), Some(Point::new(72, 24)));
        assert_eq!(map_to_circle(3, 12, 60, CENTER), Some(Point::new(132, 84)));
        assert_eq!(map_to_circle(30, 60, 35, CENTER), Some(Point::new(72, 119)));
        assert_eq!(map_to_circle(45, 60, 35, CENTER), Some(Point::new(37, 84)));
    }

    #[test]
    fn full_period_wraps_to_top() {
        assert_eq!(
            map_to_circle(12, 12, 60, CENTER),
            map_to_circle(0, 12, 60, CENTER)
        );
    }

    #[test]
    fn out_of_range_has_no_position() {
        assert_eq!(map_to_circle(-1, 12, 60, CENTER), None);
        assert_eq!(map_to_circle(61, 60, 35, CENTER), None);
        assert_eq!(map_to_circle(0, 0, 35, CENTER), None);
    }
}
