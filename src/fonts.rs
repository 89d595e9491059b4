//! Named font lookup for the card renderer.
//!
//! Fonts come from `embedded-graphics`; the config names one by cell
//! size or alias. Unknown names warn and fall back to the default so a
//! typo in the config never stops the show.

use embedded_graphics::mono_font::ascii::{FONT_4X6, FONT_5X8, FONT_6X10, FONT_6X13_BOLD};
use embedded_graphics::mono_font::MonoFont;
use log::warn;

/// Default body font. 4x6 is the only cell narrow enough to fit a full
/// haiku line across 122 pixels without wrapping most of the time.
pub static DEFAULT_BODY: &MonoFont<'static> = &FONT_4X6;

/// Header font for card titles.
pub static HEADER: &MonoFont<'static> = &FONT_6X13_BOLD;

/// Look up a body font by name.
pub fn named(name: &str) -> Option<&'static MonoFont<'static>> {
    match name {
        "4x6" | "small" => Some(&FONT_4X6),
        "5x8" | "medium" => Some(&FONT_5X8),
        "6x10" | "large" => Some(&FONT_6X10),
        _ => None,
    }
}

/// Resolve a configured font name, warning and falling back to the
/// default when it is unknown.
pub fn body_font(name: &str) -> &'static MonoFont<'static> {
    match named(name) {
        Some(font) => font,
        None => {
            warn!("Unknown font {:?}, falling back to default", name);
            DEFAULT_BODY
        }
    }
}
