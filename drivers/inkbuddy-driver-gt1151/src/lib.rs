/*
 *  InkBuddy GT1151 Driver
 *
 *  I2C driver for the Goodix GT1151 capacitive touch controller on the
 *  Waveshare Touch e-Paper HAT.
 *
 *  This program is free software: you can redistribute it and/or modify
 *  it under the terms of the GNU General Public License as published by
 *  the Free Software Foundation, either version 3 of the License, or
 *  (at your option) any later version.
 */

//! # InkBuddy GT1151 touch driver
//!
//! The controller speaks I2C with 16-bit register addresses. A scan
//! reads the status register, decodes up to five 8-byte touch-point
//! reports and re-arms the controller by clearing the status byte.
//! The INT line is active low while a finger is down; the application
//! samples it from a background thread to know when a scan is worth
//! doing.

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::OutputPin;
use embedded_hal::i2c::I2c;
use log::{debug, warn};
use std::error::Error;
use std::fmt;

/// Default 7-bit bus address of the GT1151.
pub const GT1151_ADDR: u8 = 0x14;

const REG_PRODUCT_ID: u16 = 0x8140;
const REG_STATUS: u16 = 0x814E;
const REG_POINT_DATA: u16 = 0x814F;

/// Status-register bit set when a coordinate frame is ready.
const STATUS_READY: u8 = 0x80;
/// Low nibble of the status register carries the touch-point count.
const STATUS_COUNT_MASK: u8 = 0x0F;

/// Bytes per touch-point report.
const REPORT_LEN: usize = 8;
/// The controller tracks at most five fingers.
const MAX_POINTS: usize = 5;

/// One decoded touch point.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TouchPoint {
    /// Controller-assigned track id, stable while the finger stays down.
    pub id: u8,
    pub x: u16,
    pub y: u16,
    /// Contact patch size, roughly pressure.
    pub size: u16,
}

/// Error type for touch-controller operations.
#[derive(Debug)]
pub enum TouchError {
    /// I2C transfer failed
    I2c(String),

    /// RST pin operation failed
    Pin(String),

    /// Status register reported a nonsense point count
    BadPointCount(u8),
}

impl fmt::Display for TouchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TouchError::I2c(msg) => write!(f, "I2C transfer error: {}", msg),
            TouchError::Pin(msg) => write!(f, "GPIO pin error: {}", msg),
            TouchError::BadPointCount(n) => {
                write!(f, "controller reported {} touch points (max {})", n, MAX_POINTS)
            }
        }
    }
}

impl Error for TouchError {}

/// Driver for the GT1151. Owns the bus handle and the reset line; the
/// INT line stays with the caller so a poll thread can watch it.
pub struct Gt1151<I2C, RST, D> {
    i2c: I2C,
    rst: RST,
    delay: D,
    addr: u8,
}

impl<I2C, RST, D> Gt1151<I2C, RST, D>
where
    I2C: I2c,
    RST: OutputPin,
    D: DelayNs,
{
    pub fn new(i2c: I2C, rst: RST, delay: D) -> Self {
        Self { i2c, rst, delay, addr: GT1151_ADDR }
    }

    pub fn with_address(mut self, addr: u8) -> Self {
        self.addr = addr;
        self
    }

    /// Reset pulse on the TP_RST line.
    pub fn reset(&mut self) -> Result<(), TouchError> {
        self.rst.set_high().map_err(pin_err)?;
        self.delay.delay_ms(100);
        self.rst.set_low().map_err(pin_err)?;
        self.delay.delay_ms(100);
        self.rst.set_high().map_err(pin_err)?;
        self.delay.delay_ms(100);
        Ok(())
    }

    /// Reset the controller and probe its product id. Returns the id
    /// string bytes (expected to read "1151").
    pub fn init(&mut self) -> Result<[u8; 4], TouchError> {
        self.reset()?;
        let mut id = [0u8; 4];
        self.read_reg(REG_PRODUCT_ID, &mut id)?;
        debug!("GT1151 product id: {}", String::from_utf8_lossy(&id));
        Ok(id)
    }

    /// Poll the controller once. Returns the first touch point of a
    /// fresh coordinate frame, `None` when nothing new is pending.
    pub fn scan(&mut self) -> Result<Option<TouchPoint>, TouchError> {
        let mut status = [0u8; 1];
        self.read_reg(REG_STATUS, &mut status)?;

        if status[0] & STATUS_READY == 0 {
            // Coordinate frame not ready; nothing to re-arm either.
            return Ok(None);
        }

        let count = (status[0] & STATUS_COUNT_MASK) as usize;
        if count == 0 {
            // Finger lift: frame ready with zero points. Re-arm and move on.
            self.write_reg(REG_STATUS, &[0x00])?;
            return Ok(None);
        }
        if count > MAX_POINTS {
            // Garbage frame; clear it so the controller doesn't wedge.
            self.write_reg(REG_STATUS, &[0x00])?;
            return Err(TouchError::BadPointCount(count as u8));
        }

        let mut reports = [0u8; REPORT_LEN * MAX_POINTS];
        self.read_reg(REG_POINT_DATA, &mut reports[..REPORT_LEN * count])?;
        self.write_reg(REG_STATUS, &[0x00])?;

        if count > 1 {
            warn!("{} touch points reported, using the first", count);
        }
        Ok(Some(decode_report(&reports[..REPORT_LEN])))
    }

    fn read_reg(&mut self, reg: u16, buf: &mut [u8]) -> Result<(), TouchError> {
        let addr_bytes = [(reg >> 8) as u8, (reg & 0xFF) as u8];
        self.i2c
            .write_read(self.addr, &addr_bytes, buf)
            .map_err(|e| TouchError::I2c(format!("{:?}", e)))
    }

    fn write_reg(&mut self, reg: u16, data: &[u8]) -> Result<(), TouchError> {
        let mut out = Vec::with_capacity(2 + data.len());
        out.push((reg >> 8) as u8);
        out.push((reg & 0xFF) as u8);
        out.extend_from_slice(data);
        self.i2c.write(self.addr, &out).map_err(|e| TouchError::I2c(format!("{:?}", e)))
    }
}

fn pin_err<E: fmt::Debug>(e: E) -> TouchError {
    TouchError::Pin(format!("{:?}", e))
}

/// Decode one 8-byte point report:
/// track id, x lo, x hi, y lo, y hi, size lo, size hi, reserved.
pub fn decode_report(report: &[u8]) -> TouchPoint {
    TouchPoint {
        id: report[0],
        x: report[1] as u16 | ((report[2] as u16) << 8),
        y: report[3] as u16 | ((report[4] as u16) << 8),
        size: report[5] as u16 | ((report[6] as u16) << 8),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decode_simple_report() {
        let report = [0x00, 0x3A, 0x00, 0x9C, 0x00, 0x14, 0x00, 0x00];
        let pt = decode_report(&report);
        assert_eq!(pt.id, 0);
        assert_eq!(pt.x, 0x3A);
        assert_eq!(pt.y, 0x9C);
        assert_eq!(pt.size, 0x14);
    }

    #[test]
    fn decode_wide_coordinates() {
        // y = 0x00F5 = 245, near the bottom of a 250-row panel
        let report = [0x02, 0x70, 0x00, 0xF5, 0x00, 0x30, 0x01, 0x00];
        let pt = decode_report(&report);
        assert_eq!(pt.id, 2);
        assert_eq!(pt.x, 112);
        assert_eq!(pt.y, 245);
        assert_eq!(pt.size, 0x0130);
    }
}
