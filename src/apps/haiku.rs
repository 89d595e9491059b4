/*
 *  apps/haiku.rs
 *
 *  InkBuddy - poems you can hold
 *
 *  Full-refresh haiku loop: pick a poem, render the card, flush, sleep.
 *
 *  This program is free software: you can redistribute it and/or modify
 *  it under the terms of the GNU General Public License as published by
 *  the Free Software Foundation, either version 3 of the License, or
 *  (at your option) any later version.
 */

use std::time::Duration;

use embedded_graphics::mono_font::MonoFont;
use log::{error, info};

use inkbuddy_driver_epd2in13::{Frame, Refresh};

use crate::card;
use crate::error::AppError;
use crate::haiku::random_haiku;
use crate::hw::Panel;

/// How long the startup card stays on screen.
const SPLASH_SECS: u64 = 3;
/// Back-off before retrying after a render/flush failure.
const RETRY_SECS: u64 = 30;

pub struct HaikuApp {
    pub refresh_secs: u64,
    pub body_font: &'static MonoFont<'static>,
    pub splash: bool,
}

impl HaikuApp {
    pub async fn run(&self, panel: &mut Panel) -> Result<(), AppError> {
        panel.init(Refresh::Full)?;
        panel.clear(0xFF)?;

        if self.splash {
            let mut frame = Frame::new();
            card::draw_startup(&mut frame, self.refresh_secs)?;
            panel.update(&frame)?;
            tokio::time::sleep(Duration::from_secs(SPLASH_SECS)).await;
        }

        let mut rng = rand::rng();
        loop {
            match self.show_one(panel, &mut rng) {
                Ok(()) => {
                    tokio::time::sleep(Duration::from_secs(self.refresh_secs)).await;
                }
                Err(e) => {
                    error!("Haiku cycle failed: {}; retrying in {}s", e, RETRY_SECS);
                    tokio::time::sleep(Duration::from_secs(RETRY_SECS)).await;
                }
            }
        }
    }

    fn show_one<R: rand::Rng>(&self, panel: &mut Panel, rng: &mut R) -> Result<(), AppError> {
        let (set, poem) = random_haiku(rng);
        info!("Displaying haiku from theme '{}' ({})", set.theme, poem.season);

        let mut frame = Frame::new();
        card::draw_haiku(&mut frame, poem, self.body_font)?;
        panel.update(&frame)?;
        Ok(())
    }
}
