/*
 *  hw.rs
 *
 *  InkBuddy - poems you can hold
 *
 *  Wires the generic drivers to the Pi's buses via linux-embedded-hal:
 *  spidev for the panel, i2cdev for the touch controller, gpiocdev for
 *  the control lines.
 *
 *  This program is free software: you can redistribute it and/or modify
 *  it under the terms of the GNU General Public License as published by
 *  the Free Software Foundation, either version 3 of the License, or
 *  (at your option) any later version.
 */

use linux_embedded_hal::gpio_cdev::{Chip, LineRequestFlags};
use linux_embedded_hal::spidev::{SpiModeFlags, SpidevOptions};
use linux_embedded_hal::{CdevPin, Delay, I2cdev, SpidevDevice};
use log::info;

use inkbuddy_driver_epd2in13::Epd2in13;
use inkbuddy_driver_gt1151::Gt1151;

use crate::config::{DisplayConfig, TouchConfig};
use crate::error::AppError;

/// Concrete panel driver on Linux.
pub type Panel = Epd2in13<SpidevDevice, CdevPin, CdevPin, CdevPin, Delay>;
/// Concrete touch driver on Linux.
pub type Touch = Gt1151<I2cdev, CdevPin, Delay>;

const CONSUMER: &str = "inkbuddy";

fn output_pin(chip_path: &str, offset: u32) -> Result<CdevPin, AppError> {
    let mut chip = Chip::new(chip_path).map_err(|e| AppError::Gpio(e.to_string()))?;
    let handle = chip
        .get_line(offset)
        .and_then(|line| line.request(LineRequestFlags::OUTPUT, 0, CONSUMER))
        .map_err(|e| AppError::Gpio(format!("line {}: {}", offset, e)))?;
    CdevPin::new(handle).map_err(|e| AppError::Gpio(e.to_string()))
}

fn input_pin(chip_path: &str, offset: u32) -> Result<CdevPin, AppError> {
    let mut chip = Chip::new(chip_path).map_err(|e| AppError::Gpio(e.to_string()))?;
    let handle = chip
        .get_line(offset)
        .and_then(|line| line.request(LineRequestFlags::INPUT, 0, CONSUMER))
        .map_err(|e| AppError::Gpio(format!("line {}: {}", offset, e)))?;
    CdevPin::new(handle).map_err(|e| AppError::Gpio(e.to_string()))
}

/// Open the SPI bus and control lines and build the panel driver.
pub fn open_panel(cfg: &DisplayConfig) -> Result<Panel, AppError> {
    info!(
        "Opening panel: {} dc={} rst={} busy={}",
        cfg.spi(),
        cfg.dc_pin(),
        cfg.rst_pin(),
        cfg.busy_pin()
    );

    let mut spi = SpidevDevice::open(cfg.spi()).map_err(|e| AppError::Spi(e.to_string()))?;
    let options = SpidevOptions::new()
        .bits_per_word(8)
        .max_speed_hz(cfg.spi_hz())
        .mode(SpiModeFlags::SPI_MODE_0)
        .build();
    spi.0.configure(&options).map_err(|e| AppError::Spi(e.to_string()))?;

    let dc = output_pin(cfg.gpio_chip(), cfg.dc_pin())?;
    let rst = output_pin(cfg.gpio_chip(), cfg.rst_pin())?;
    let busy = input_pin(cfg.gpio_chip(), cfg.busy_pin())?;

    Ok(Epd2in13::new(spi, dc, rst, busy, Delay))
}

/// Open the I2C bus and control lines. Returns the touch driver and the
/// INT pin separately; the INT pin goes to the watcher thread.
pub fn open_touch(cfg: &TouchConfig) -> Result<(Touch, CdevPin), AppError> {
    info!(
        "Opening touch controller: {} addr=0x{:02X} int={} rst={}",
        cfg.bus(),
        cfg.address(),
        cfg.int_pin(),
        cfg.rst_pin()
    );

    let i2c = I2cdev::new(cfg.bus()).map_err(|e| AppError::I2c(e.to_string()))?;
    let rst = output_pin(cfg.gpio_chip(), cfg.rst_pin())?;
    let int = input_pin(cfg.gpio_chip(), cfg.int_pin())?;

    let touch = Gt1151::new(i2c, rst, Delay).with_address(cfg.address());
    Ok((touch, int))
}
