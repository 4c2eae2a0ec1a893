//! SH1106 128x64 OLED (I2C)
//!
//! Drawing goes into a RAM framebuffer through `embedded-graphics`;
//! [`Sh1106::flush`] pushes the whole buffer to the panel page by page.
//!
//! # Memory Layout
//!
//! The panel is split into 8 pages of 8 pixel rows. Each byte covers one
//! column of a page, LSB at the top. The SH1106 has 132 columns of RAM
//! for a 128 column glass, so every page write starts at column 2.

use embedded_graphics::mono_font::ascii::FONT_5X8;
use embedded_graphics::mono_font::MonoTextStyle;
use embedded_graphics::pixelcolor::BinaryColor;
use embedded_graphics::prelude::*;
use embedded_graphics::text::{Baseline, Text};
use embedded_hal_async::i2c::I2c;
use stride_display::{DisplayBackend, DisplayError, SCREEN_COLS, SCREEN_ROWS};

/// Panel width in pixels
pub const WIDTH: usize = 128;
/// Panel height in pixels
pub const HEIGHT: usize = 64;
/// Number of 8-row pages
pub const PAGES: usize = HEIGHT / 8;

/// Default I2C address
pub const DEFAULT_ADDRESS: u8 = 0x3C;

/// Character cell size for FONT_5X8
const CHAR_WIDTH: i32 = 5;
const CHAR_HEIGHT: i32 = 8;

/// Control byte: command stream follows
const CONTROL_COMMAND: u8 = 0x00;
/// Control byte: display data follows
const CONTROL_DATA: u8 = 0x40;

/// First visible RAM column
const COLUMN_OFFSET: u8 = 2;

/// SH1106 commands
pub mod cmd {
    pub const DISPLAY_OFF: u8 = 0xAE;
    pub const DISPLAY_ON: u8 = 0xAF;
    pub const SET_CLOCK_DIV: u8 = 0xD5;
    pub const SET_MULTIPLEX: u8 = 0xA8;
    pub const SET_DISPLAY_OFFSET: u8 = 0xD3;
    pub const SET_START_LINE: u8 = 0x40;
    pub const SEGMENT_REMAP: u8 = 0xA1;
    pub const COM_SCAN_DEC: u8 = 0xC8;
    pub const SET_COM_PINS: u8 = 0xDA;
    pub const SET_CONTRAST: u8 = 0x81;
    pub const SET_PRECHARGE: u8 = 0xD9;
    pub const SET_VCOM_DESELECT: u8 = 0xDB;
    pub const NORMAL_DISPLAY: u8 = 0xA6;
    pub const PAGE_ADDRESS: u8 = 0xB0;
    pub const COLUMN_LOW: u8 = 0x00;
    pub const COLUMN_HIGH: u8 = 0x10;
}

/// Power-on command sequence (display stays off until the end)
const INIT_SEQUENCE: &[u8] = &[
    cmd::DISPLAY_OFF,
    cmd::SET_CLOCK_DIV,
    0x80,
    cmd::SET_MULTIPLEX,
    0x3F,
    cmd::SET_DISPLAY_OFFSET,
    0x00,
    cmd::SET_START_LINE,
    cmd::SEGMENT_REMAP,
    cmd::COM_SCAN_DEC,
    cmd::SET_COM_PINS,
    0x12,
    cmd::SET_CONTRAST,
    0x80,
    cmd::SET_PRECHARGE,
    0x22,
    cmd::SET_VCOM_DESELECT,
    0x35,
    cmd::NORMAL_DISPLAY,
    cmd::DISPLAY_ON,
];

/// SH1106 driver with a local framebuffer
pub struct Sh1106<I2C> {
    i2c: I2C,
    address: u8,
    buffer: [u8; WIDTH * PAGES],
    initialized: bool,
}

impl<I2C: I2c> Sh1106<I2C> {
    pub fn new(i2c: I2C) -> Self {
        Self::with_address(i2c, DEFAULT_ADDRESS)
    }

    pub fn with_address(i2c: I2C, address: u8) -> Self {
        Self {
            i2c,
            address,
            buffer: [0; WIDTH * PAGES],
            initialized: false,
        }
    }

    /// Send the init sequence and switch the panel on
    pub async fn init(&mut self) -> Result<(), DisplayError> {
        let mut frame = [0u8; INIT_SEQUENCE.len() + 1];
        frame[0] = CONTROL_COMMAND;
        frame[1..].copy_from_slice(INIT_SEQUENCE);
        self.i2c
            .write(self.address, &frame)
            .await
            .map_err(|_| DisplayError::Communication)?;
        self.initialized = true;
        Ok(())
    }

    /// Push the framebuffer to the panel
    pub async fn flush(&mut self) -> Result<(), DisplayError> {
        if !self.initialized {
            return Err(DisplayError::NotInitialized);
        }

        let mut data = [0u8; WIDTH + 1];
        data[0] = CONTROL_DATA;
        for page in 0..PAGES {
            let select = [
                CONTROL_COMMAND,
                cmd::PAGE_ADDRESS | page as u8,
                cmd::COLUMN_LOW | (COLUMN_OFFSET & 0x0F),
                cmd::COLUMN_HIGH | (COLUMN_OFFSET >> 4),
            ];
            self.i2c
                .write(self.address, &select)
                .await
                .map_err(|_| DisplayError::Communication)?;

            data[1..].copy_from_slice(&self.buffer[page * WIDTH..(page + 1) * WIDTH]);
            self.i2c
                .write(self.address, &data)
                .await
                .map_err(|_| DisplayError::Communication)?;
        }
        Ok(())
    }

    /// Check a pixel in the framebuffer
    pub fn pixel(&self, x: usize, y: usize) -> bool {
        if x >= WIDTH || y >= HEIGHT {
            return false;
        }
        self.buffer[(y / 8) * WIDTH + x] & (1 << (y % 8)) != 0
    }

    fn set_pixel(&mut self, x: usize, y: usize, on: bool) {
        if x >= WIDTH || y >= HEIGHT {
            return;
        }
        let byte = &mut self.buffer[(y / 8) * WIDTH + x];
        let mask = 1 << (y % 8);
        if on {
            *byte |= mask;
        } else {
            *byte &= !mask;
        }
    }

    /// Release the bus
    pub fn release(self) -> I2C {
        self.i2c
    }
}

impl<I2C> OriginDimensions for Sh1106<I2C> {
    fn size(&self) -> Size {
        Size::new(WIDTH as u32, HEIGHT as u32)
    }
}

impl<I2C: I2c> DrawTarget for Sh1106<I2C> {
    type Color = BinaryColor;
    type Error = core::convert::Infallible;

    fn draw_iter<I>(&mut self, pixels: I) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = Pixel<Self::Color>>,
    {
        for Pixel(point, color) in pixels {
            if point.x >= 0 && point.y >= 0 {
                self.set_pixel(point.x as usize, point.y as usize, color.is_on());
            }
        }
        Ok(())
    }

    fn clear(&mut self, color: Self::Color) -> Result<(), Self::Error> {
        let fill = if color.is_on() { 0xFF } else { 0x00 };
        self.buffer.fill(fill);
        Ok(())
    }
}

impl<I2C: I2c> DisplayBackend for Sh1106<I2C> {
    fn clear(&mut self) -> Result<(), DisplayError> {
        self.buffer.fill(0);
        Ok(())
    }

    fn draw_text(&mut self, row: u8, col: u8, text: &str) -> Result<(), DisplayError> {
        if row as usize >= SCREEN_ROWS || col as usize >= SCREEN_COLS {
            return Err(DisplayError::InvalidCoordinates);
        }
        let style = MonoTextStyle::new(&FONT_5X8, BinaryColor::On);
        let origin = Point::new(col as i32 * CHAR_WIDTH, row as i32 * CHAR_HEIGHT);
        let _ = Text::with_baseline(text, origin, style, Baseline::Top).draw(self);
        Ok(())
    }

    fn dimensions(&self) -> (u8, u8) {
        (SCREEN_COLS as u8, SCREEN_ROWS as u8)
    }

    fn is_ready(&self) -> bool {
        self.initialized
    }
}
