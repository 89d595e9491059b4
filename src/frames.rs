/*
 *  frames.rs
 *
 *  InkBuddy - poems you can hold
 *
 *  Block-art frame tables for the original pet renderer. Each frame is
 *  a small character grid; non-space cells rasterize as filled blocks.
 *
 *  This program is free software: you can redistribute it and/or modify
 *  it under the terms of the GNU General Public License as published by
 *  the Free Software Foundation, either version 3 of the License, or
 *  (at your option) any later version.
 */

use embedded_graphics::pixelcolor::BinaryColor;
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::{PrimitiveStyle, Rectangle};

use crate::pet::PetState;

/// Width of one block cell in pixels.
const CELL_W: u32 = 8;
/// Height of one block cell in pixels.
const CELL_H: u32 = 12;

const IDLE: &[&str] = &[
    "  ,___,\n [O.o]/\n /)__)\n-\"--\"-",
    "  ,___,\n [o.O]/\n /)__)\n-\"--\"-",
];

const DANCING: &[&str] = &[
    "  ,___,\n\\[O.o]\n /)__)  ~\n-\"--\"-",
    "  ,___,\n [O.o]/\n /)__)  ~\n-\"--\"-",
    "  ,___,\n\\[O.o]/\n /)__) ~\n-\"--\"-",
];

const SLEEPING: &[&str] = &[
    "  ,___,\n [-.-]z\n /)__)\n-\"--\"-",
    "  ,___,\n [-.-]Z\n /)__)\n-\"--\"-",
];

const HAPPY: &[&str] = &[
    "  ,___,\n [^_^]/\n /)__)\n-\"--\"-",
    "  ,___,\n [^_^]/\n /)__)  :)\n-\"--\"-",
];

const SURPRISED: &[&str] = &[
    "  ,___,\n [O_O]/\n /)__)\n-\"--\"-",
    "  ,___,\n [O_O]/\n /)__)  !!\n-\"--\"-",
];

/// Frame table for a state. Tables cycle, so any index is valid.
pub fn frames_for(state: PetState) -> &'static [&'static str] {
    match state {
        PetState::Idle => IDLE,
        PetState::Dancing => DANCING,
        PetState::Sleeping => SLEEPING,
        PetState::Happy => HAPPY,
        PetState::Surprised => SURPRISED,
    }
}

/// Pick the frame for an animation index, wrapping around the table.
pub fn frame_for(state: PetState, index: u32) -> &'static str {
    let table = frames_for(state);
    table[(index as usize) % table.len()]
}

/// Rasterize a frame centered in `area_w` x `area_h`, one filled block
/// per non-space character.
pub fn draw_frame<D>(target: &mut D, frame: &str, area_w: u32, area_h: u32) -> Result<(), D::Error>
where
    D: DrawTarget<Color = BinaryColor>,
{
    let lines: Vec<&str> = frame.lines().collect();
    let cols = lines.iter().map(|l| l.len()).max().unwrap_or(0) as u32;
    let rows = lines.len() as u32;

    let start_x = (area_w.saturating_sub(cols * CELL_W)) as i32 / 2;
    let start_y = (area_h.saturating_sub(rows * CELL_H)) as i32 / 2;

    let style = PrimitiveStyle::with_fill(BinaryColor::On);
    for (row, line) in lines.iter().enumerate() {
        for (col, ch) in line.chars().enumerate() {
            if ch == ' ' {
                continue;
            }
            let x = start_x + (col as u32 * CELL_W) as i32;
            let y = start_y + (row as u32 * CELL_H) as i32;
            Rectangle::new(Point::new(x, y), Size::new(CELL_W - 1, CELL_H - 1))
                .into_styled(style)
                .draw(target)?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_state_has_frames() {
        for state in [
            PetState::Idle,
            PetState::Dancing,
            PetState::Happy,
            PetState::Sleeping,
            PetState::Surprised,
        ] {
            assert!(!frames_for(state).is_empty());
        }
    }

    #[test]
    fn frame_index_wraps() {
        let first = frame_for(PetState::Dancing, 0);
        let wrapped = frame_for(PetState::Dancing, DANCING.len() as u32);
        assert_eq!(first, wrapped);
        // and a huge index still lands in the table
        let _ = frame_for(PetState::Idle, u32::MAX);
    }

    #[test]
    fn frames_fit_the_panel() {
        for state in [
            PetState::Idle,
            PetState::Dancing,
            PetState::Happy,
            PetState::Sleeping,
            PetState::Surprised,
        ] {
            for frame in frames_for(state) {
                let cols = frame.lines().map(|l| l.len()).max().unwrap_or(0) as u32;
                let rows = frame.lines().count() as u32;
                assert!(cols * CELL_W <= 122, "{:?} frame too wide", state);
                assert!(rows * CELL_H <= 250, "{:?} frame too tall", state);
            }
        }
    }
}
