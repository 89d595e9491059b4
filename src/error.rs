//! Application error type. Driver crates carry their own error enums;
//! everything funnels into `AppError` at the app layer.

use std::convert::Infallible;

use inkbuddy_driver_epd2in13::EpdError;
use inkbuddy_driver_gt1151::TouchError;
use thiserror::Error;

use crate::config::ConfigError;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("display error: {0}")]
    Display(#[from] EpdError),

    #[error("touch controller error: {0}")]
    Touch(#[from] TouchError),

    #[error("SPI setup error: {0}")]
    Spi(String),

    #[error("I2C setup error: {0}")]
    I2c(String),

    #[error("GPIO setup error: {0}")]
    Gpio(String),
}

// In-memory frame drawing cannot fail; this lets `?` erase that branch.
impl From<Infallible> for AppError {
    fn from(e: Infallible) -> Self {
        match e {}
    }
}
