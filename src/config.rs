use dirs_next::home_dir;
use serde::{Deserialize, Serialize};
use std::{fs, path::{Path, PathBuf}};
use thiserror::Error;

/// Error type for config loading/validation.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("YAML parse error: {0}")]
    Yaml(#[from] serde_yaml::Error),
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Validation error: {0}")]
    Validation(String),
}

/// Top-level app configuration. All fields are Options so YAML, CLI and
/// defaults can layer cleanly.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    /// Seconds between haiku refreshes
    pub refresh_secs: Option<u64>,
    /// Body font for the haiku card ("4x6", "5x8", "6x10" or an alias)
    pub font: Option<String>,
    /// e-paper panel wiring
    pub display: Option<DisplayConfig>,
    /// touch controller wiring
    pub touch: Option<TouchConfig>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct DisplayConfig {
    pub spi: Option<String>,       // e.g. "/dev/spidev0.0"
    pub spi_hz: Option<u32>,
    pub gpio_chip: Option<String>, // e.g. "/dev/gpiochip0"
    pub dc_pin: Option<u32>,       // BCM numbering
    pub rst_pin: Option<u32>,
    pub busy_pin: Option<u32>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct TouchConfig {
    pub bus: Option<String>,       // e.g. "/dev/i2c-1"
    pub address: Option<u8>,       // 7-bit, default 0x14
    pub gpio_chip: Option<String>,
    pub int_pin: Option<u32>,
    pub rst_pin: Option<u32>,
}

// Wiring defaults match the Touch e-Paper HAT silkscreen.
impl DisplayConfig {
    pub fn spi(&self) -> &str { self.spi.as_deref().unwrap_or("/dev/spidev0.0") }
    pub fn spi_hz(&self) -> u32 { self.spi_hz.unwrap_or(10_000_000) }
    pub fn gpio_chip(&self) -> &str { self.gpio_chip.as_deref().unwrap_or("/dev/gpiochip0") }
    pub fn dc_pin(&self) -> u32 { self.dc_pin.unwrap_or(25) }
    pub fn rst_pin(&self) -> u32 { self.rst_pin.unwrap_or(17) }
    pub fn busy_pin(&self) -> u32 { self.busy_pin.unwrap_or(24) }
}

impl TouchConfig {
    pub fn bus(&self) -> &str { self.bus.as_deref().unwrap_or("/dev/i2c-1") }
    pub fn address(&self) -> u8 { self.address.unwrap_or(0x14) }
    pub fn gpio_chip(&self) -> &str { self.gpio_chip.as_deref().unwrap_or("/dev/gpiochip0") }
    pub fn int_pin(&self) -> u32 { self.int_pin.unwrap_or(27) }
    pub fn rst_pin(&self) -> u32 { self.rst_pin.unwrap_or(22) }
}

/// Load config: explicit path, or search, or defaults.
pub fn load(explicit: Option<&Path>) -> Result<Config, ConfigError> {
    let mut cfg = Config::default();

    if let Some(p) = explicit {
        if p.exists() {
            let y = read_yaml(p)?;
            merge(&mut cfg, y);
        } else {
            return Err(ConfigError::Validation(format!(
                "Config file not found: {}",
                p.display()
            )));
        }
    } else if let Some(p) = find_config_file() {
        let y = read_yaml(&p)?;
        merge(&mut cfg, y);
    }

    validate(&cfg)?;
    Ok(cfg)
}

/// Try common locations in order (first hit wins).
fn find_config_file() -> Option<PathBuf> {
    // XDG-style: ~/.config/inkbuddy/config.yaml
    if let Some(home) = home_dir() {
        let p = home.join(".config/inkbuddy/config.yaml");
        if p.exists() { return Some(p) }
        let p = home.join(".config/inkbuddy.yaml");
        if p.exists() { return Some(p) }
    }
    // project local
    for candidate in &["inkbuddy.yaml", "config.yaml"] {
        let p = PathBuf::from(candidate);
        if p.exists() { return Some(p) }
    }
    None
}

fn read_yaml(path: &Path) -> Result<Config, ConfigError> {
    let s = fs::read_to_string(path)?;
    let cfg: Config = serde_yaml::from_str(&s)?;
    Ok(cfg)
}

/// Shallow merge `src` into `dst`, Option-by-Option.
pub fn merge(dst: &mut Config, src: Config) {
    if src.refresh_secs.is_some() { dst.refresh_secs = src.refresh_secs; }
    if src.font.is_some()         { dst.font = src.font; }
    match (&mut dst.display, src.display) {
        (None, Some(c)) => dst.display = Some(c),
        (Some(d), Some(s)) => merge_display(d, s),
        _ => {}
    }
    match (&mut dst.touch, src.touch) {
        (None, Some(c)) => dst.touch = Some(c),
        (Some(d), Some(s)) => merge_touch(d, s),
        _ => {}
    }
}

fn merge_display(dst: &mut DisplayConfig, src: DisplayConfig) {
    if src.spi.is_some()       { dst.spi = src.spi; }
    if src.spi_hz.is_some()    { dst.spi_hz = src.spi_hz; }
    if src.gpio_chip.is_some() { dst.gpio_chip = src.gpio_chip; }
    if src.dc_pin.is_some()    { dst.dc_pin = src.dc_pin; }
    if src.rst_pin.is_some()   { dst.rst_pin = src.rst_pin; }
    if src.busy_pin.is_some()  { dst.busy_pin = src.busy_pin; }
}

fn merge_touch(dst: &mut TouchConfig, src: TouchConfig) {
    if src.bus.is_some()       { dst.bus = src.bus; }
    if src.address.is_some()   { dst.address = src.address; }
    if src.gpio_chip.is_some() { dst.gpio_chip = src.gpio_chip; }
    if src.int_pin.is_some()   { dst.int_pin = src.int_pin; }
    if src.rst_pin.is_some()   { dst.rst_pin = src.rst_pin; }
}

/// Put any invariants here (required fields, ranges, etc.)
pub fn validate(cfg: &Config) -> Result<(), ConfigError> {
    if let Some(secs) = cfg.refresh_secs {
        if secs == 0 {
            return Err(ConfigError::Validation("refresh_secs must be > 0".into()));
        }
    }
    if let Some(touch) = cfg.touch.as_ref() {
        if let Some(addr) = touch.address {
            if addr > 0x7F {
                return Err(ConfigError::Validation("touch address must be a 7-bit I2C address".into()));
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_resolve_to_hat_wiring() {
        let display = DisplayConfig::default();
        assert_eq!(display.spi(), "/dev/spidev0.0");
        assert_eq!(display.dc_pin(), 25);
        assert_eq!(display.rst_pin(), 17);
        assert_eq!(display.busy_pin(), 24);

        let touch = TouchConfig::default();
        assert_eq!(touch.bus(), "/dev/i2c-1");
        assert_eq!(touch.address(), 0x14);
        assert_eq!(touch.int_pin(), 27);
        assert_eq!(touch.rst_pin(), 22);
    }

    #[test]
    fn merge_prefers_incoming_options() {
        let mut dst = Config {
            refresh_secs: Some(300),
            ..Default::default()
        };
        let src = Config {
            refresh_secs: Some(60),
            display: Some(DisplayConfig { dc_pin: Some(5), ..Default::default() }),
            ..Default::default()
        };
        merge(&mut dst, src);
        assert_eq!(dst.refresh_secs, Some(60));
        assert_eq!(dst.display.as_ref().unwrap().dc_pin(), 5);
        // untouched fields keep their defaults
        assert_eq!(dst.display.as_ref().unwrap().rst_pin(), 17);
    }

    #[test]
    fn merge_keeps_existing_when_src_empty() {
        let mut dst = Config {
            font: Some("5x8".into()),
            ..Default::default()
        };
        merge(&mut dst, Config::default());
        assert_eq!(dst.font.as_deref(), Some("5x8"));
    }

    #[test]
    fn validate_rejects_zero_refresh() {
        let cfg = Config { refresh_secs: Some(0), ..Default::default() };
        assert!(validate(&cfg).is_err());
    }

    #[test]
    fn validate_rejects_wide_i2c_address() {
        let cfg = Config {
            touch: Some(TouchConfig { address: Some(0x80), ..Default::default() }),
            ..Default::default()
        };
        assert!(validate(&cfg).is_err());
    }

    #[test]
    fn yaml_round_trip() {
        let yaml = r#"
refresh_secs: 120
font: small
display:
  spi: /dev/spidev0.1
  dc_pin: 6
touch:
  address: 0x14
"#;
        let cfg: Config = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(cfg.refresh_secs, Some(120));
        assert_eq!(cfg.display.unwrap().spi(), "/dev/spidev0.1");
        assert_eq!(cfg.touch.unwrap().address(), 0x14);
    }
}
