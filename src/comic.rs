/*
 *  comic.rs
 *
 *  InkBuddy - poems you can hold
 *
 *  Comic-strip pet renderer: oval head, long snout, floppy ears and a
 *  collar. The most detailed of the three pet looks.
 *
 *  This program is free software: you can redistribute it and/or modify
 *  it under the terms of the GNU General Public License as published by
 *  the Free Software Foundation, either version 3 of the License, or
 *  (at your option) any later version.
 */

use embedded_graphics::mono_font::ascii::FONT_4X6;
use embedded_graphics::mono_font::MonoTextStyle;
use embedded_graphics::pixelcolor::BinaryColor;
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::{
    Arc, Ellipse, Line, PrimitiveStyle, PrimitiveStyleBuilder, Triangle,
};
use embedded_graphics::text::Text;

use crate::pet::PetState;

const HEAD_W: i32 = 18;
const HEAD_H: i32 = 16;
const BODY_W: i32 = 16;
const BODY_H: i32 = 22;

fn outline(width: u32) -> PrimitiveStyle<BinaryColor> {
    PrimitiveStyle::with_stroke(BinaryColor::On, width)
}

fn white_fill_outlined(width: u32) -> PrimitiveStyle<BinaryColor> {
    PrimitiveStyleBuilder::new()
        .fill_color(BinaryColor::Off)
        .stroke_color(BinaryColor::On)
        .stroke_width(width)
        .build()
}

fn black_fill() -> PrimitiveStyle<BinaryColor> {
    PrimitiveStyle::with_fill(BinaryColor::On)
}

fn ellipse(x0: i32, y0: i32, x1: i32, y1: i32) -> Ellipse {
    Ellipse::new(Point::new(x0, y0), Size::new((x1 - x0).max(1) as u32, (y1 - y0).max(1) as u32))
}

/// Draw the comic pet at `(cx, cy)` (head center). The tick drives the
/// dance bounce, arm swing and bubble pulse.
pub fn draw_pet<D>(target: &mut D, state: PetState, tick: u32, cx: i32, cy: i32) -> Result<(), D::Error>
where
    D: DrawTarget<Color = BinaryColor>,
{
    let t = tick as f32;
    let (mut x, mut y) = (cx, cy);
    if state == PetState::Dancing {
        x += ((t * 0.5).sin() * 2.0) as i32;
        y += ((t * 0.4).cos() * 1.0) as i32;
    }

    draw_body(target, x, y + 12, state, t)?;
    draw_head(target, x, y, state)?;

    if state == PetState::Sleeping {
        draw_sleep_bubbles(target, x, y, t)?;
    }
    match state {
        PetState::Happy => draw_speech_bubble(target, x, y, "Yay!")?,
        PetState::Surprised => draw_speech_bubble(target, x, y, "Oh!")?,
        PetState::Dancing => draw_speech_bubble(target, x, y, "~")?,
        _ => {}
    }
    Ok(())
}

fn draw_head<D>(target: &mut D, x: i32, y: i32, state: PetState) -> Result<(), D::Error>
where
    D: DrawTarget<Color = BinaryColor>,
{
    // oval head
    ellipse(x - HEAD_W / 2, y - HEAD_H / 2, x + HEAD_W / 2, y + HEAD_H / 2)
        .into_styled(white_fill_outlined(2))
        .draw(target)?;

    // long snout off the right side of the head
    let nose_x = x + HEAD_W / 2 - 2;
    ellipse(nose_x, y + 1, nose_x + 8, y + 4).into_styled(black_fill()).draw(target)?;

    // floppy ears hanging over both sides
    ellipse(x - HEAD_W / 2 - 3, y - HEAD_H / 2 - 2, x - HEAD_W / 2 + 3, y - HEAD_H / 2 + 6)
        .into_styled(white_fill_outlined(1))
        .draw(target)?;
    ellipse(x + HEAD_W / 2 - 3, y - HEAD_H / 2 - 2, x + HEAD_W / 2 + 3, y - HEAD_H / 2 + 6)
        .into_styled(white_fill_outlined(1))
        .draw(target)?;

    let eye_y = y - 2;
    match state {
        PetState::Sleeping => {
            Arc::new(Point::new(x - 8, eye_y - 2), 4, 0.0.deg(), 180.0.deg())
                .into_styled(outline(2))
                .draw(target)?;
            Arc::new(Point::new(x + 4, eye_y - 2), 4, 0.0.deg(), 180.0.deg())
                .into_styled(outline(2))
                .draw(target)?;
        }
        PetState::Surprised => {
            ellipse(x - 9, eye_y - 3, x - 5, eye_y + 1).into_styled(black_fill()).draw(target)?;
            ellipse(x + 5, eye_y - 3, x + 9, eye_y + 1).into_styled(black_fill()).draw(target)?;
        }
        PetState::Happy => {
            ellipse(x - 6, eye_y, x - 4, eye_y + 2).into_styled(black_fill()).draw(target)?;
            ellipse(x + 4, eye_y, x + 6, eye_y + 2).into_styled(black_fill()).draw(target)?;
            // raised eyebrows
            Arc::new(Point::new(x - 8, eye_y - 4), 6, 0.0.deg(), 180.0.deg())
                .into_styled(outline(1))
                .draw(target)?;
            Arc::new(Point::new(x + 2, eye_y - 4), 6, 0.0.deg(), 180.0.deg())
                .into_styled(outline(1))
                .draw(target)?;
        }
        _ => {
            ellipse(x - 6, eye_y, x - 4, eye_y + 2).into_styled(black_fill()).draw(target)?;
            ellipse(x + 4, eye_y, x + 6, eye_y + 2).into_styled(black_fill()).draw(target)?;
        }
    }

    // mouth
    let mouth_y = y + 4;
    match state {
        PetState::Happy => {
            Arc::new(Point::new(x - 4, mouth_y - 2), 8, 180.0.deg(), 180.0.deg())
                .into_styled(outline(2))
                .draw(target)?;
        }
        PetState::Surprised => {
            ellipse(x - 2, mouth_y, x + 2, mouth_y + 3).into_styled(black_fill()).draw(target)?;
        }
        PetState::Sleeping => {
            Arc::new(Point::new(x - 3, mouth_y - 1), 6, 180.0.deg(), 180.0.deg())
                .into_styled(outline(1))
                .draw(target)?;
        }
        _ => {}
    }
    Ok(())
}

fn draw_body<D>(target: &mut D, x: i32, y: i32, state: PetState, t: f32) -> Result<(), D::Error>
where
    D: DrawTarget<Color = BinaryColor>,
{
    ellipse(x - BODY_W / 2, y, x + BODY_W / 2, y + BODY_H)
        .into_styled(white_fill_outlined(2))
        .draw(target)?;

    // collar band just below the neck
    ellipse(x - BODY_W / 2 + 1, y + 3, x + BODY_W / 2 - 1, y + 7)
        .into_styled(black_fill())
        .draw(target)?;

    let arm_y = y + 8;
    match state {
        PetState::Dancing => {
            let swing = ((t * 0.4).sin() * 6.0) as i32;
            Line::new(
                Point::new(x - BODY_W / 2, arm_y),
                Point::new(x - BODY_W / 2 - 6, arm_y - 4 + swing),
            )
            .into_styled(outline(2))
            .draw(target)?;
            Line::new(
                Point::new(x + BODY_W / 2, arm_y),
                Point::new(x + BODY_W / 2 + 6, arm_y - 4 - swing),
            )
            .into_styled(outline(2))
            .draw(target)?;
        }
        PetState::Happy => {
            Line::new(
                Point::new(x - BODY_W / 2, arm_y),
                Point::new(x - BODY_W / 2 - 5, arm_y - 8),
            )
            .into_styled(outline(2))
            .draw(target)?;
            Line::new(
                Point::new(x + BODY_W / 2, arm_y),
                Point::new(x + BODY_W / 2 + 5, arm_y - 8),
            )
            .into_styled(outline(2))
            .draw(target)?;
        }
        _ => {
            Line::new(
                Point::new(x - BODY_W / 2, arm_y),
                Point::new(x - BODY_W / 2 - 4, arm_y + 6),
            )
            .into_styled(outline(2))
            .draw(target)?;
            Line::new(
                Point::new(x + BODY_W / 2, arm_y),
                Point::new(x + BODY_W / 2 + 4, arm_y + 6),
            )
            .into_styled(outline(2))
            .draw(target)?;
        }
    }

    // short stubby legs with round feet
    let leg_y = y + BODY_H;
    Line::new(Point::new(x - 4, leg_y), Point::new(x - 4, leg_y + 10))
        .into_styled(outline(3))
        .draw(target)?;
    Line::new(Point::new(x + 4, leg_y), Point::new(x + 4, leg_y + 10))
        .into_styled(outline(3))
        .draw(target)?;
    ellipse(x - 6, leg_y + 8, x - 2, leg_y + 12).into_styled(black_fill()).draw(target)?;
    ellipse(x + 2, leg_y + 8, x + 6, leg_y + 12).into_styled(black_fill()).draw(target)
}

fn draw_sleep_bubbles<D>(target: &mut D, x: i32, y: i32, t: f32) -> Result<(), D::Error>
where
    D: DrawTarget<Color = BinaryColor>,
{
    // a trail of four bubbles, shrinking as they rise
    let base = 4 + ((t * 0.3).sin() * 2.0) as i32;
    let bx = x + 15;
    let by = y - 8;
    for i in 0..4 {
        let size = base - i;
        if size > 1 {
            let ox = i * 6;
            let oy = -i * 3;
            ellipse(bx + ox, by + oy, bx + ox + size, by + oy + size)
                .into_styled(white_fill_outlined(1))
                .draw(target)?;
        }
    }
    Ok(())
}

fn draw_speech_bubble<D>(target: &mut D, x: i32, y: i32, text: &str) -> Result<(), D::Error>
where
    D: DrawTarget<Color = BinaryColor>,
{
    let w = text.len() as i32 * 5 + 8;
    let h = 16;
    let bx = x + 12;
    let by = y - 25;

    ellipse(bx, by, bx + w, by + h).into_styled(white_fill_outlined(2)).draw(target)?;
    Triangle::new(
        Point::new(bx + 3, by + h),
        Point::new(bx + 8, by + h + 4),
        Point::new(bx + 12, by + h),
    )
    .into_styled(white_fill_outlined(1))
    .draw(target)?;

    let style = MonoTextStyle::new(&FONT_4X6, BinaryColor::On);
    Text::new(text, Point::new(bx + 4, by + h / 2 + 2), style).draw(target)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use inkbuddy_driver_epd2in13::Frame;

    #[test]
    fn every_state_renders_something() {
        for state in [
            PetState::Idle,
            PetState::Dancing,
            PetState::Happy,
            PetState::Sleeping,
            PetState::Surprised,
        ] {
            let mut frame = Frame::new();
            draw_pet(&mut frame, state, 3, 61, 105).unwrap();
            assert!(frame.black_pixels() > 100, "{:?} drew almost nothing", state);
        }
    }

    #[test]
    fn dance_bounce_moves_the_character() {
        let mut a = Frame::new();
        let mut b = Frame::new();
        draw_pet(&mut a, PetState::Dancing, 3, 61, 105).unwrap();
        draw_pet(&mut b, PetState::Dancing, 7, 61, 105).unwrap();
        assert_ne!(a.data(), b.data());
    }
}
