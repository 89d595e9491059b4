/*
 *  InkBuddy EPD 2.13" V4 Driver
 *
 *  SPI driver for the Waveshare 2.13in V4 e-paper panel as fitted to
 *  the Touch e-Paper HAT.
 *
 *  This program is free software: you can redistribute it and/or modify
 *  it under the terms of the GNU General Public License as published by
 *  the Free Software Foundation, either version 3 of the License, or
 *  (at your option) any later version.
 */

//! # InkBuddy 2.13" V4 e-paper driver
//!
//! 122x250 monochrome panel, SSD-series controller, SPI bus plus
//! DC/RST/BUSY lines.
//!
//! ## Features
//!
//! - Full refresh (slow, flash-free image)
//! - Partial refresh (fast, for animation loops)
//! - Base-image upload so later partial refreshes diff cleanly
//! - Deep sleep on shutdown
//!
//! The driver is generic over `embedded-hal` 1.0 traits so it runs on
//! anything that can hand it an `SpiDevice`, two output pins, an input
//! pin and a delay source. On a Pi that is `linux-embedded-hal`.

mod frame;

pub use frame::Frame;

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::{InputPin, OutputPin};
use embedded_hal::spi::SpiDevice;
use log::{debug, trace};
use std::error::Error;
use std::fmt;

/// Visible panel width in pixels.
pub const EPD_WIDTH: u32 = 122;
/// Panel height in pixels.
pub const EPD_HEIGHT: u32 = 250;
/// Bytes per framebuffer row. Controller RAM rows are byte aligned, so
/// 122 columns pad out to 16 bytes.
pub const ROW_BYTES: usize = ((EPD_WIDTH as usize) + 7) / 8;
/// Total framebuffer size in bytes.
pub const FRAME_BYTES: usize = ROW_BYTES * EPD_HEIGHT as usize;

// Controller command set (the subset this driver uses).
const CMD_DRIVER_OUTPUT_CONTROL: u8 = 0x01;
const CMD_DEEP_SLEEP: u8 = 0x10;
const CMD_DATA_ENTRY_MODE: u8 = 0x11;
const CMD_SW_RESET: u8 = 0x12;
const CMD_TEMP_SENSOR_CONTROL: u8 = 0x18;
const CMD_MASTER_ACTIVATION: u8 = 0x20;
const CMD_DISPLAY_UPDATE_CONTROL_1: u8 = 0x21;
const CMD_DISPLAY_UPDATE_CONTROL_2: u8 = 0x22;
const CMD_WRITE_RAM_BW: u8 = 0x24;
const CMD_WRITE_RAM_RED: u8 = 0x26;
const CMD_BORDER_WAVEFORM: u8 = 0x3C;
const CMD_SET_RAM_X_RANGE: u8 = 0x44;
const CMD_SET_RAM_Y_RANGE: u8 = 0x45;
const CMD_SET_RAM_X_COUNTER: u8 = 0x4E;
const CMD_SET_RAM_Y_COUNTER: u8 = 0x4F;

// BUSY is held high for ~4s during a full waveform; leave headroom.
const BUSY_TIMEOUT_MS: u32 = 15_000;
const BUSY_POLL_MS: u32 = 10;

/// Refresh mode the panel is initialized for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Refresh {
    /// Full waveform. Slow (seconds) but leaves no ghosting.
    Full,
    /// Partial waveform. Fast enough for animation, accumulates ghosting.
    Partial,
}

/// Error type for panel operations.
#[derive(Debug)]
pub enum EpdError {
    /// SPI transfer failed
    Spi(String),

    /// DC/RST/BUSY pin operation failed
    Pin(String),

    /// BUSY line never released within the timeout
    BusyTimeout,

    /// Caller handed us a buffer of the wrong size
    BufferSize { expected: usize, actual: usize },
}

impl fmt::Display for EpdError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EpdError::Spi(msg) => write!(f, "SPI transfer error: {}", msg),
            EpdError::Pin(msg) => write!(f, "GPIO pin error: {}", msg),
            EpdError::BusyTimeout => {
                write!(f, "panel BUSY line stuck for more than {}ms", BUSY_TIMEOUT_MS)
            }
            EpdError::BufferSize { expected, actual } => {
                write!(f, "buffer size mismatch: expected {} bytes, got {}", expected, actual)
            }
        }
    }
}

impl Error for EpdError {}

/// Driver for the 2.13" V4 panel.
pub struct Epd2in13<SPI, DC, RST, BUSY, D> {
    spi: SPI,
    dc: DC,
    rst: RST,
    busy: BUSY,
    delay: D,
    mode: Option<Refresh>,
}

impl<SPI, DC, RST, BUSY, D> Epd2in13<SPI, DC, RST, BUSY, D>
where
    SPI: SpiDevice,
    DC: OutputPin,
    RST: OutputPin,
    BUSY: InputPin,
    D: DelayNs,
{
    pub fn new(spi: SPI, dc: DC, rst: RST, busy: BUSY, delay: D) -> Self {
        Self { spi, dc, rst, busy, delay, mode: None }
    }

    /// Returns the panel dimensions as (width, height).
    pub fn dimensions(&self) -> (u32, u32) {
        (EPD_WIDTH, EPD_HEIGHT)
    }

    /// Current refresh mode, if the panel has been initialized.
    pub fn mode(&self) -> Option<Refresh> {
        self.mode
    }

    /// Hardware reset pulse. Wakes the controller from deep sleep.
    pub fn reset(&mut self) -> Result<(), EpdError> {
        self.rst.set_high().map_err(pin_err)?;
        self.delay.delay_ms(20);
        self.rst.set_low().map_err(pin_err)?;
        self.delay.delay_ms(2);
        self.rst.set_high().map_err(pin_err)?;
        self.delay.delay_ms(20);
        Ok(())
    }

    /// Initialize the controller for the requested refresh mode.
    pub fn init(&mut self, refresh: Refresh) -> Result<(), EpdError> {
        debug!("EPD init ({:?})", refresh);
        self.reset()?;
        self.wait_idle()?;

        match refresh {
            Refresh::Full => {
                self.command(CMD_SW_RESET)?;
                self.wait_idle()?;

                // Gate lines = panel height - 1, scan order default
                self.command_data(
                    CMD_DRIVER_OUTPUT_CONTROL,
                    &[((EPD_HEIGHT - 1) & 0xFF) as u8, ((EPD_HEIGHT - 1) >> 8) as u8, 0x00],
                )?;
                // X increment, Y increment
                self.command_data(CMD_DATA_ENTRY_MODE, &[0x03])?;
                self.set_window(0, 0, EPD_WIDTH - 1, EPD_HEIGHT - 1)?;
                self.set_cursor(0, 0)?;

                self.command_data(CMD_BORDER_WAVEFORM, &[0x05])?;
                self.command_data(CMD_DISPLAY_UPDATE_CONTROL_1, &[0x00, 0x80])?;
                // Internal temperature sensor
                self.command_data(CMD_TEMP_SENSOR_CONTROL, &[0x80])?;
                self.wait_idle()?;
            }
            Refresh::Partial => {
                // Partial mode keeps the last full-init LUT; only the
                // border and the RAM window need reprogramming.
                self.command_data(CMD_BORDER_WAVEFORM, &[0x80])?;
                self.command_data(CMD_DATA_ENTRY_MODE, &[0x03])?;
                self.set_window(0, 0, EPD_WIDTH - 1, EPD_HEIGHT - 1)?;
                self.set_cursor(0, 0)?;
            }
        }

        self.mode = Some(refresh);
        Ok(())
    }

    /// Fill the whole panel with one byte pattern (0xFF = white) and
    /// run a full refresh.
    pub fn clear(&mut self, fill: u8) -> Result<(), EpdError> {
        let buf = vec![fill; FRAME_BYTES];
        self.write_ram(CMD_WRITE_RAM_BW, &buf)?;
        self.turn_on_full()
    }

    /// Push a frame with the full waveform.
    pub fn update(&mut self, frame: &Frame) -> Result<(), EpdError> {
        self.write_ram(CMD_WRITE_RAM_BW, frame.data())?;
        self.turn_on_full()
    }

    /// Push a frame with the fast partial waveform. Call `init(Partial)`
    /// and `update_base` first.
    pub fn update_partial(&mut self, frame: &Frame) -> Result<(), EpdError> {
        self.set_cursor(0, 0)?;
        self.write_ram(CMD_WRITE_RAM_BW, frame.data())?;
        self.turn_on_partial()
    }

    /// Upload a frame to both RAM planes and refresh fully. Subsequent
    /// partial refreshes diff against this image.
    pub fn update_base(&mut self, frame: &Frame) -> Result<(), EpdError> {
        self.write_ram(CMD_WRITE_RAM_BW, frame.data())?;
        self.write_ram(CMD_WRITE_RAM_RED, frame.data())?;
        self.turn_on_full()
    }

    /// Put the controller into deep sleep. Requires a reset pulse to wake.
    pub fn sleep(&mut self) -> Result<(), EpdError> {
        debug!("EPD entering deep sleep");
        self.command_data(CMD_DEEP_SLEEP, &[0x01])?;
        self.delay.delay_ms(100);
        self.mode = None;
        Ok(())
    }

    fn turn_on_full(&mut self) -> Result<(), EpdError> {
        self.command_data(CMD_DISPLAY_UPDATE_CONTROL_2, &[0xF7])?;
        self.command(CMD_MASTER_ACTIVATION)?;
        self.wait_idle()
    }

    fn turn_on_partial(&mut self) -> Result<(), EpdError> {
        self.command_data(CMD_DISPLAY_UPDATE_CONTROL_2, &[0xFF])?;
        self.command(CMD_MASTER_ACTIVATION)?;
        self.wait_idle()
    }

    fn write_ram(&mut self, ram_cmd: u8, buf: &[u8]) -> Result<(), EpdError> {
        if buf.len() != FRAME_BYTES {
            return Err(EpdError::BufferSize { expected: FRAME_BYTES, actual: buf.len() });
        }
        self.command(ram_cmd)?;
        self.data(buf)
    }

    fn set_window(&mut self, x0: u32, y0: u32, x1: u32, y1: u32) -> Result<(), EpdError> {
        // X range is in bytes (8 columns per address)
        self.command_data(CMD_SET_RAM_X_RANGE, &[(x0 >> 3) as u8, (x1 >> 3) as u8])?;
        self.command_data(
            CMD_SET_RAM_Y_RANGE,
            &[(y0 & 0xFF) as u8, (y0 >> 8) as u8, (y1 & 0xFF) as u8, (y1 >> 8) as u8],
        )
    }

    fn set_cursor(&mut self, x: u32, y: u32) -> Result<(), EpdError> {
        self.command_data(CMD_SET_RAM_X_COUNTER, &[(x >> 3) as u8])?;
        self.command_data(CMD_SET_RAM_Y_COUNTER, &[(y & 0xFF) as u8, (y >> 8) as u8])
    }

    /// Block until the BUSY line drops, or error out after the timeout.
    fn wait_idle(&mut self) -> Result<(), EpdError> {
        let mut waited: u32 = 0;
        while self.busy.is_high().map_err(pin_err)? {
            if waited >= BUSY_TIMEOUT_MS {
                return Err(EpdError::BusyTimeout);
            }
            self.delay.delay_ms(BUSY_POLL_MS);
            waited += BUSY_POLL_MS;
        }
        trace!("EPD idle after ~{}ms", waited);
        Ok(())
    }

    fn command(&mut self, cmd: u8) -> Result<(), EpdError> {
        self.dc.set_low().map_err(pin_err)?;
        self.spi.write(&[cmd]).map_err(|e| EpdError::Spi(format!("{:?}", e)))
    }

    fn data(&mut self, data: &[u8]) -> Result<(), EpdError> {
        self.dc.set_high().map_err(pin_err)?;
        self.spi.write(data).map_err(|e| EpdError::Spi(format!("{:?}", e)))
    }

    fn command_data(&mut self, cmd: u8, data: &[u8]) -> Result<(), EpdError> {
        self.command(cmd)?;
        self.data(data)
    }
}

fn pin_err<E: fmt::Debug>(e: E) -> EpdError {
    EpdError::Pin(format!("{:?}", e))
}
