//! Draw primitives emitted by a watch face

use core::fmt;

use embedded_graphics::{
    geometry::{Point, Size},
    mono_font::{ascii::FONT_6X10, MonoFont, MonoTextStyle},
    prelude::*,
    primitives::{Circle, PrimitiveStyle},
    text::{Alignment, Baseline, Text, TextStyleBuilder},
    Pixel,
};
use profont::PROFONT_12_POINT;

use super::ColorMode;

const BUF_LEN: usize = 8;

/// Most primitives a single frame can hold
pub const MAX_PRIMITIVES: usize = 12;

/// Short text held inline, without allocation
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct Label {
    str_buf: [u8; BUF_LEN],
    len: usize,
}

impl Label {
    /// Format a label. Text that does not fit leaves the label empty.
    pub fn format(args: fmt::Arguments) -> Self {
        let mut str_buf = [0; BUF_LEN];
        let len = format_no_std::show(&mut str_buf, args)
            .map(str::len)
            .unwrap_or(0);
        Self { str_buf, len }
    }

    pub fn as_str(&self) -> &str {
        core::str::from_utf8(&self.str_buf[..self.len]).unwrap_or("")
    }
}

impl fmt::Debug for Label {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self.as_str(), f)
    }
}

/// Fonts available to text primitives
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FontSize {
    Small,
    Large,
}

impl FontSize {
    fn font(self) -> &'static MonoFont<'static> {
        match self {
            FontSize::Small => &FONT_6X10,
            FontSize::Large => &PROFONT_12_POINT,
        }
    }
}

/// One bit per pixel image, 16 pixels wide, most significant bit leftmost
#[derive(Debug, PartialEq, Eq)]
pub struct Glyph {
    pub rows: &'static [u16],
}

impl Glyph {
    pub fn size(&self) -> Size {
        Size::new(16, self.rows.len() as u32)
    }

    /// Set pixels of the glyph, relative to its top left corner
    fn pixels(&self) -> impl Iterator<Item = Point> + '_ {
        self.rows.iter().enumerate().flat_map(|(y, row)| {
            (0..16i32)
                .filter(move |&x| row & (0x8000_u16 >> x) != 0)
                .map(move |x| Point::new(x, y as i32))
        })
    }
}

/// A single shape of a rendered frame
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DrawPrimitive {
    StrokedCircle {
        center: Point,
        radius: u32,
        stroke_width: u32,
        color: ColorMode,
    },
    FilledCircle {
        center: Point,
        radius: u32,
        color: ColorMode,
    },
    Image {
        center: Point,
        glyph: &'static Glyph,
        color: ColorMode,
    },
    Text {
        center: Point,
        text: Label,
        font: FontSize,
        color: ColorMode,
    },
}

impl DrawPrimitive {
    pub fn center(&self) -> Point {
        match self {
            Self::StrokedCircle { center, .. }
            | Self::FilledCircle { center, .. }
            | Self::Image { center, .. }
            | Self::Text { center, .. } => *center,
        }
    }
}

fn circle(center: Point, radius: u32) -> Circle {
    Circle::with_center(center, radius * 2 + 1)
}

impl Drawable for DrawPrimitive {
    type Color = ColorMode;
    type Output = ();

    fn draw<D>(&self, target: &mut D) -> Result<(), D::Error>
    where
        D: DrawTarget<Color = ColorMode>,
    {
        match *self {
            Self::StrokedCircle {
                center,
                radius,
                stroke_width,
                color,
            } => circle(center, radius)
                .into_styled(PrimitiveStyle::with_stroke(color, stroke_width))
                .draw(target),
            Self::FilledCircle {
                center,
                radius,
                color,
            } => circle(center, radius)
                .into_styled(PrimitiveStyle::with_fill(color))
                .draw(target),
            Self::Image {
                center,
                glyph,
                color,
            } => {
                let top_left = center - glyph.size() / 2;
                target.draw_iter(
                    glyph
                        .pixels()
                        .map(|point| Pixel(top_left + point, color)),
                )
            }
            Self::Text {
                center,
                ref text,
                font,
                color,
            } => {
                let character_style = MonoTextStyle::new(font.font(), color);
                let text_style = TextStyleBuilder::new()
                    .alignment(Alignment::Center)
                    .baseline(Baseline::Middle)
                    .build();
                Text::with_text_style(text.as_str(), center, character_style, text_style)
                    .draw(target)
                    .map(|_| ())
            }
        }
    }
}

/// Ordered primitives of one render pass
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Frame {
    background: ColorMode,
    primitives: heapless::Vec<DrawPrimitive, MAX_PRIMITIVES>,
}

impl Frame {
    pub fn new(background: ColorMode) -> Self {
        Self {
            background,
            primitives: heapless::Vec::new(),
        }
    }

    /// Append a primitive on top of the ones already in the frame
    pub fn push(&mut self, primitive: DrawPrimitive) {
        if self.primitives.push(primitive).is_err() {
            warn!("Frame full, dropping primitive");
        }
    }

    pub fn background(&self) -> ColorMode {
        self.background
    }

    pub fn primitives(&self) -> &[DrawPrimitive] {
        &self.primitives
    }
}

impl Drawable for Frame {
    type Color = ColorMode;
    type Output = ();

    /// Clear to the background and draw all primitives in order
    fn draw<D>(&self, target: &mut D) -> Result<(), D::Error>
    where
        D: DrawTarget<Color = ColorMode>,
    {
        target.clear(self.background)?;
        for primitive in &self.primitives {
            primitive.draw(target)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn label_formats_inline() {
        assert_eq!(Label::format(format_args!("{:02}", 7)).as_str(), "07");
        assert_eq!(Label::format(format_args!("{}", 100)).as_str(), "100");
    }

    #[test]
    fn label_overflow_is_empty() {
        assert_eq!(Label::format(format_args!("{}", "far too long")).as_str(), "");
    }

    #[test]
    fn glyph_pixels_follow_bits() {
        static DIAGONAL: Glyph = Glyph {
            rows: &[0x8000, 0x4000],
        };
        let pixels: heapless::Vec<Point, 4> = DIAGONAL.pixels().collect();
        assert_eq!(pixels.as_slice(), &[Point::new(0, 0), Point::new(1, 1)]);
    }
}
