/*
 *  sprite.rs
 *
 *  InkBuddy - poems you can hold
 *
 *  Vector pet renderer: the character drawn from primitives, which
 *  reads far better on e-paper than rasterized block art.
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
    Arc, Circle, Ellipse, Line, PrimitiveStyle, PrimitiveStyleBuilder, Triangle,
};
use embedded_graphics::text::Text;

use crate::pet::PetState;

const HEAD_RADIUS: i32 = 15;
const BODY_W: i32 = 20;
const BODY_H: i32 = 25;

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

/// Circle from a center point, the way the layout math thinks about it.
fn circle(cx: i32, cy: i32, r: i32) -> Circle {
    Circle::new(Point::new(cx - r, cy - r), (2 * r) as u32)
}

/// Draw the whole pet at `(cx, cy)` (head center). The tick drives the
/// dance wobble and bubble pulse.
pub fn draw_pet<D>(target: &mut D, state: PetState, tick: u32, cx: i32, cy: i32) -> Result<(), D::Error>
where
    D: DrawTarget<Color = BinaryColor>,
{
    let t = tick as f32;
    let (mut x, mut y) = (cx, cy);
    if state == PetState::Dancing {
        x += ((t * 0.4).sin() * 3.0) as i32;
        y += ((t * 0.3).cos() * 2.0) as i32;
    }

    draw_body(target, x, y + HEAD_RADIUS, state, t)?;
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
    circle(x, y, HEAD_RADIUS).into_styled(white_fill_outlined(2)).draw(target)?;

    // ears sit on the top corners of the head
    circle(x - HEAD_RADIUS, y - HEAD_RADIUS, 5).into_styled(white_fill_outlined(1)).draw(target)?;
    circle(x + HEAD_RADIUS, y - HEAD_RADIUS, 5).into_styled(white_fill_outlined(1)).draw(target)?;

    match state {
        PetState::Sleeping => {
            // closed eyes
            Line::new(Point::new(x - 8, y - 3), Point::new(x - 4, y - 3))
                .into_styled(outline(2))
                .draw(target)?;
            Line::new(Point::new(x + 4, y - 3), Point::new(x + 8, y - 3))
                .into_styled(outline(2))
                .draw(target)?;
        }
        PetState::Surprised => {
            // wide round eyes
            circle(x - 8, y - 3, 2).into_styled(black_fill()).draw(target)?;
            circle(x + 8, y - 3, 2).into_styled(black_fill()).draw(target)?;
        }
        PetState::Happy => {
            // upturned arcs
            Arc::new(Point::new(x - 10, y - 5), 5, 180.0.deg(), 180.0.deg())
                .into_styled(outline(2))
                .draw(target)?;
            Arc::new(Point::new(x + 6, y - 5), 5, 180.0.deg(), 180.0.deg())
                .into_styled(outline(2))
                .draw(target)?;
        }
        _ => {
            Ellipse::new(Point::new(x - 8, y - 4), Size::new(4, 4))
                .into_styled(black_fill())
                .draw(target)?;
            Ellipse::new(Point::new(x + 4, y - 4), Size::new(4, 4))
                .into_styled(black_fill())
                .draw(target)?;
        }
    }

    // nose
    Ellipse::new(Point::new(x - 2, y + 2), Size::new(4, 5)).into_styled(black_fill()).draw(target)
}

fn draw_body<D>(target: &mut D, x: i32, y: i32, state: PetState, t: f32) -> Result<(), D::Error>
where
    D: DrawTarget<Color = BinaryColor>,
{
    Ellipse::new(Point::new(x - BODY_W / 2, y), Size::new(BODY_W as u32, BODY_H as u32))
        .into_styled(white_fill_outlined(2))
        .draw(target)?;

    let shoulder_y = y + 5;
    match state {
        PetState::Dancing => {
            let swing = ((t * 0.3).sin() * 5.0) as i32;
            Line::new(
                Point::new(x - BODY_W / 2, shoulder_y),
                Point::new(x - BODY_W / 2 - 8, shoulder_y + swing),
            )
            .into_styled(outline(3))
            .draw(target)?;
            Line::new(
                Point::new(x + BODY_W / 2, shoulder_y),
                Point::new(x + BODY_W / 2 + 8, shoulder_y - swing),
            )
            .into_styled(outline(3))
            .draw(target)?;
        }
        PetState::Happy => {
            // arms up
            Line::new(
                Point::new(x - BODY_W / 2, shoulder_y),
                Point::new(x - BODY_W / 2 - 6, shoulder_y - 8),
            )
            .into_styled(outline(3))
            .draw(target)?;
            Line::new(
                Point::new(x + BODY_W / 2, shoulder_y),
                Point::new(x + BODY_W / 2 + 6, shoulder_y - 8),
            )
            .into_styled(outline(3))
            .draw(target)?;
        }
        _ => {
            Line::new(
                Point::new(x - BODY_W / 2, shoulder_y),
                Point::new(x - BODY_W / 2 - 6, shoulder_y + 6),
            )
            .into_styled(outline(3))
            .draw(target)?;
            Line::new(
                Point::new(x + BODY_W / 2, shoulder_y),
                Point::new(x + BODY_W / 2 + 6, shoulder_y + 6),
            )
            .into_styled(outline(3))
            .draw(target)?;
        }
    }

    // legs and feet
    let leg_y = y + BODY_H;
    Line::new(Point::new(x - 5, leg_y), Point::new(x - 5, leg_y + 12))
        .into_styled(outline(3))
        .draw(target)?;
    Line::new(Point::new(x + 5, leg_y), Point::new(x + 5, leg_y + 12))
        .into_styled(outline(3))
        .draw(target)?;
    Ellipse::new(Point::new(x - 8, leg_y + 10), Size::new(6, 6)).into_styled(black_fill()).draw(target)?;
    Ellipse::new(Point::new(x + 2, leg_y + 10), Size::new(6, 6)).into_styled(black_fill()).draw(target)
}

fn draw_sleep_bubbles<D>(target: &mut D, x: i32, y: i32, t: f32) -> Result<(), D::Error>
where
    D: DrawTarget<Color = BinaryColor>,
{
    // bubbles pulse gently and shrink as they rise
    let base = 5 + ((t * 0.2).sin() * 3.0) as i32;
    let bx = x + 20;
    let by = y - 10;
    for i in 0..3 {
        let size = base - i * 2;
        if size > 0 {
            let offset = i * 8;
            Ellipse::new(Point::new(bx + offset, by - offset), Size::new(size as u32, size as u32))
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
    let w = text.len() as i32 * 6 + 10;
    let h = 16;
    let bx = x + 12;
    let by = y - 30;

    Ellipse::new(Point::new(bx, by), Size::new(w as u32, h as u32))
        .into_styled(white_fill_outlined(2))
        .draw(target)?;
    Triangle::new(
        Point::new(bx + 5, by + h),
        Point::new(bx + 10, by + h + 5),
        Point::new(bx + 15, by + h),
    )
    .into_styled(white_fill_outlined(1))
    .draw(target)?;

    let style = MonoTextStyle::new(&FONT_4X6, BinaryColor::On);
    Text::new(text, Point::new(bx + 6, by + h / 2 + 2), style).draw(target)?;
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
            draw_pet(&mut frame, state, 7, 61, 110).unwrap();
            assert!(frame.black_pixels() > 100, "{:?} drew almost nothing", state);
        }
    }

    #[test]
    fn dance_wobble_moves_the_sprite() {
        let mut a = Frame::new();
        let mut b = Frame::new();
        draw_pet(&mut a, PetState::Dancing, 2, 61, 110).unwrap();
        draw_pet(&mut b, PetState::Dancing, 6, 61, 110).unwrap();
        assert_ne!(a.data(), b.data());
    }
}
