//! Display control module for PineTime

use embassy_nrf::{
    gpio::Output,
    peripherals::{P0_14, P0_18, P0_22, P0_23, P0_25, P0_26},
    spim::{self, Spim},
};

use display_interface_spi::SPIInterface;
use embassy_time::Delay;
use embedded_graphics::{
    geometry::{Point, Size},
    primitives::Rectangle,
    Drawable,
};
use helium::{
    config::{LCD_H, LCD_W},
    ui::Frame,
};
use mipidsi::{models::ST7789, Builder, Orientation};

pub struct BacklightPins<'a> {
    low: Output<'a, P0_14>,
    mid: Output<'a, P0_22>,
    high: Output<'a, P0_23>,
}

impl BacklightPins<'_> {
    /// Configure backlight pins on boot
    pub fn init(
        low: Output<'static, P0_14>,
        mid: Output<'static, P0_22>,
        high: Output<'static, P0_23>,
    ) -> BacklightPins<'static> {
        BacklightPins { low, mid, high }
    }

    /// Backlight pins are active low. Only the mid level is used.
    fn on(&mut self) {
        self.low.set_high();
        self.mid.set_low();
        self.high.set_high();
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, defmt::Format)]
pub enum Error {
    /// Controller did not come up
    Init,
    /// SPI transfer failed while drawing
    Draw,
}

struct DisplayConfig<'a, SPI>
where
    SPI: spim::Instance,
{
    /// Display instance
    display: mipidsi::Display<
        SPIInterface<Spim<'a, SPI>, Output<'a, P0_18>, Output<'a, P0_25>>,
        ST7789,
        Output<'a, P0_26>,
    >,
    // Backlight pins
    pins_backlight: BacklightPins<'a>,
}

pub struct Display<SPI>
where
    SPI: spim::Instance,
{
    /// Display configuration
    config: DisplayConfig<'static, SPI>,
}

impl<SPI> Display<SPI>
where
    SPI: spim::Instance,
{
    /// Configure display settings on boot
    pub fn init(
        spim: Spim<'static, SPI>,
        cs_pin: Output<'static, P0_25>,
        dc_pin: Output<'static, P0_18>,
        rst_pin: Output<'static, P0_26>,
        backlight: BacklightPins<'static>,
    ) -> Result<Self, Error> {
        let display = Builder::st7789(SPIInterface::new(spim, dc_pin, cs_pin))
            .with_display_size(LCD_W, LCD_H)
            .with_orientation(Orientation::Portrait(false))
            .init(&mut Delay, Some(rst_pin))
            .map_err(|_| Error::Init)?;

        let mut pins_backlight = backlight;
        pins_backlight.on();

        Ok(Self {
            config: DisplayConfig {
                display,
                pins_backlight,
            },
        })
    }

    /// Drawable area of the panel
    pub fn bounds(&self) -> Rectangle {
        Rectangle::new(Point::zero(), Size::new(LCD_W as u32, LCD_H as u32))
    }

    /// Replace the panel contents with `frame`
    pub fn draw_frame(&mut self, frame: &Frame) -> Result<(), Error> {
        frame
            .draw(&mut self.config.display)
            .map_err(|_| Error::Draw)
    }
}
