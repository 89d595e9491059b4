/*
 *  apps/pet.rs
 *
 *  InkBuddy - poems you can hold
 *
 *  Touch-pet loop shared by both renderers. A full refresh uploads the
 *  base image, then the loop ticks the animator, folds in touches and
 *  pushes partial refreshes on a pacer cadence.
 *
 *  This program is free software: you can redistribute it and/or modify
 *  it under the terms of the GNU General Public License as published by
 *  the Free Software Foundation, either version 3 of the License, or
 *  (at your option) any later version.
 */

use std::convert::Infallible;
use std::time::Duration;

use embedded_graphics::mono_font::{ascii::FONT_4X6, MonoTextStyle};
use embedded_graphics::pixelcolor::BinaryColor;
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::{Line, PrimitiveStyle};
use embedded_graphics::text::{Alignment, Text};
use log::{debug, info, warn};

use inkbuddy_driver_epd2in13::{Frame, Refresh, EPD_HEIGHT, EPD_WIDTH};

use crate::comic;
use crate::error::AppError;
use crate::frames;
use crate::hw::{Panel, Touch};
use crate::pet::{accept_touch, MoodDurations, PetAnimator, PetState};
use crate::pacer::Pacer;
use crate::sprite;
use crate::touch::TouchWatcher;

/// One pet renderer: its look, its tempo, its mood lengths.
pub trait Scene {
    fn durations(&self) -> MoodDurations;
    fn frame_divisor(&self) -> u32;
    /// Animation tick period.
    fn tick(&self) -> Duration;
    /// Minimum interval between partial refreshes.
    fn refresh(&self) -> Duration;
    fn draw(&self, frame: &mut Frame, pet: &PetAnimator) -> Result<(), Infallible>;
}

fn caption<D>(target: &mut D, state: PetState) -> Result<(), D::Error>
where
    D: DrawTarget<Color = BinaryColor>,
{
    let style = MonoTextStyle::new(&FONT_4X6, BinaryColor::On);
    let text = format!("State: {}", state.caption());
    Text::with_alignment(
        &text,
        Point::new(EPD_WIDTH as i32 / 2, EPD_HEIGHT as i32 - 6),
        style,
        Alignment::Center,
    )
    .draw(target)?;
    Ok(())
}

/// The original block-art pet.
pub struct BlockPet;

impl Scene for BlockPet {
    fn durations(&self) -> MoodDurations {
        MoodDurations { dancing: 50, happy: 30, sleeping: 40, surprised: 20 }
    }

    fn frame_divisor(&self) -> u32 {
        10
    }

    fn tick(&self) -> Duration {
        Duration::from_millis(50)
    }

    fn refresh(&self) -> Duration {
        // 20 ticks at 50ms
        Duration::from_millis(1000)
    }

    fn draw(&self, frame: &mut Frame, pet: &PetAnimator) -> Result<(), Infallible> {
        let art = frames::frame_for(pet.state(), pet.frame_index());
        frames::draw_frame(frame, art, EPD_WIDTH, EPD_HEIGHT - 20)?;
        caption(frame, pet.state())
    }
}

/// The vector-drawn pet with visible touch zones.
pub struct SketchPet;

impl SketchPet {
    fn zone_chrome(&self, frame: &mut Frame) -> Result<(), Infallible> {
        let h = EPD_HEIGHT as i32;
        let w = EPD_WIDTH as i32;
        let thin = PrimitiveStyle::with_stroke(BinaryColor::On, 1);
        Line::new(Point::new(0, h / 3), Point::new(w - 1, h / 3)).into_styled(thin).draw(frame)?;
        Line::new(Point::new(0, 2 * h / 3), Point::new(w - 1, 2 * h / 3))
            .into_styled(thin)
            .draw(frame)?;

        let style = MonoTextStyle::new(&FONT_4X6, BinaryColor::On);
        Text::new("dance", Point::new(3, 8), style).draw(frame)?;
        Text::new("pet me", Point::new(3, h / 3 + 8), style).draw(frame)?;
        Text::new("sleep", Point::new(3, 2 * h / 3 + 8), style).draw(frame)?;
        Ok(())
    }
}

impl Scene for SketchPet {
    fn durations(&self) -> MoodDurations {
        MoodDurations { dancing: 60, happy: 40, sleeping: 50, surprised: 30 }
    }

    fn frame_divisor(&self) -> u32 {
        8
    }

    fn tick(&self) -> Duration {
        Duration::from_millis(60)
    }

    fn refresh(&self) -> Duration {
        // 15 ticks at 60ms
        Duration::from_millis(900)
    }

    fn draw(&self, frame: &mut Frame, pet: &PetAnimator) -> Result<(), Infallible> {
        self.zone_chrome(frame)?;
        sprite::draw_pet(
            frame,
            pet.state(),
            pet.tick_count(),
            EPD_WIDTH as i32 / 2,
            EPD_HEIGHT as i32 / 2,
        )?;
        caption(frame, pet.state())
    }
}

/// The comic-strip pet with full-text hints and a slower beat.
pub struct ComicPet;

impl ComicPet {
    fn chrome(&self, frame: &mut Frame, state: PetState) -> Result<(), Infallible> {
        let h = EPD_HEIGHT as i32;
        let w = EPD_WIDTH as i32;
        let thin = PrimitiveStyle::with_stroke(BinaryColor::On, 1);
        Line::new(Point::new(0, h / 3), Point::new(w - 1, h / 3)).into_styled(thin).draw(frame)?;
        Line::new(Point::new(0, 2 * h / 3), Point::new(w - 1, 2 * h / 3))
            .into_styled(thin)
            .draw(frame)?;

        let style = MonoTextStyle::new(&FONT_4X6, BinaryColor::On);
        Text::new("Touch Top: Dance", Point::new(2, 8), style).draw(frame)?;
        Text::new("Touch Middle: Happy", Point::new(2, h / 2), style).draw(frame)?;
        Text::new("Touch Bottom: Sleep/Wake", Point::new(2, h - 24), style).draw(frame)?;

        let text = format!("State: {}", state.caption());
        Text::new(&text, Point::new(2, h - 8), style).draw(frame)?;
        Ok(())
    }
}

impl Scene for ComicPet {
    fn durations(&self) -> MoodDurations {
        MoodDurations { dancing: 80, happy: 50, sleeping: 60, surprised: 40 }
    }

    fn frame_divisor(&self) -> u32 {
        10
    }

    fn tick(&self) -> Duration {
        Duration::from_millis(80)
    }

    fn refresh(&self) -> Duration {
        // 12 ticks at 80ms
        Duration::from_millis(960)
    }

    fn draw(&self, frame: &mut Frame, pet: &PetAnimator) -> Result<(), Infallible> {
        self.chrome(frame, pet.state())?;
        comic::draw_pet(
            frame,
            pet.state(),
            pet.tick_count(),
            EPD_WIDTH as i32 / 2,
            EPD_HEIGHT as i32 / 2 - 20,
        )
    }
}

/// Run a pet scene until cancelled.
pub async fn run<S: Scene>(
    panel: &mut Panel,
    touch: &mut Touch,
    watcher: &TouchWatcher,
    scene: &S,
) -> Result<(), AppError> {
    panel.init(Refresh::Full)?;
    panel.clear(0xFF)?;

    let product = touch.init()?;
    info!(
        "Touch controller online: product id {:02X}{:02X}{:02X}{:02X}",
        product[0], product[1], product[2], product[3]
    );

    let mut pet = PetAnimator::new(scene.durations(), scene.frame_divisor());

    // Upload the opening scene to both RAM planes so partial refreshes
    // diff against it cleanly.
    let mut frame = Frame::new();
    scene.draw(&mut frame, &pet)?;
    panel.update_base(&frame)?;
    panel.init(Refresh::Partial)?;

    let mut pacer = Pacer::from_period(scene.refresh());
    let mut last_point: Option<(u32, u32)> = None;

    loop {
        pet.advance();

        if watcher.is_touched() {
            match touch.scan() {
                Ok(Some(point)) => {
                    let (x, y) = (point.x as u32, point.y as u32);
                    match accept_touch(x, y, last_point, EPD_WIDTH, EPD_HEIGHT) {
                        Some(region) => {
                            info!("Touch at ({}, {}) -> {:?}", x, y, region);
                            pet.touch(region);
                            last_point = Some((x, y));
                        }
                        None => debug!("Touch ignored: ({}, {})", x, y),
                    }
                }
                Ok(None) => {}
                // a flaky I2C read shouldn't kill the pet
                Err(e) => warn!("Touch scan failed: {}", e),
            }
        } else {
            last_point = None;
        }

        if pacer.should_flush() {
            frame.clear_white();
            scene.draw(&mut frame, &pet)?;
            panel.update_partial(&frame)?;
        }

        tokio::time::sleep(scene.tick()).await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn block_scene_draws_something() {
        let scene = BlockPet;
        let pet = PetAnimator::new(scene.durations(), scene.frame_divisor());
        let mut frame = Frame::new();
        scene.draw(&mut frame, &pet).unwrap();
        assert!(frame.black_pixels() > 100);
    }

    #[test]
    fn sketch_scene_draws_zone_dividers() {
        let scene = SketchPet;
        let pet = PetAnimator::new(scene.durations(), scene.frame_divisor());
        let mut frame = Frame::new();
        scene.draw(&mut frame, &pet).unwrap();
        // both dividers span the panel
        assert!(frame.is_black(0, 250 / 3));
        assert!(frame.is_black(121, 2 * 250 / 3));
        assert!(frame.black_pixels() > 300);
    }

    #[test]
    fn comic_scene_draws_hints_and_character() {
        let scene = ComicPet;
        let pet = PetAnimator::new(scene.durations(), scene.frame_divisor());
        let mut frame = Frame::new();
        scene.draw(&mut frame, &pet).unwrap();
        assert!(frame.is_black(0, 250 / 3));
        assert!(frame.is_black(121, 2 * 250 / 3));
        // hint text plus the character is a lot more ink than dividers alone
        assert!(frame.black_pixels() > 500);
    }

    #[test]
    fn scene_tempos_are_sane() {
        assert!(BlockPet.refresh() >= BlockPet.tick());
        assert!(SketchPet.refresh() >= SketchPet.tick());
        assert!(ComicPet.refresh() >= ComicPet.tick());
    }
}
