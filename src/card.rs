/*
 *  card.rs
 *
 *  InkBuddy - poems you can hold
 *
 *  Renders haiku cards and the startup card into a panel frame.
 *
 *  This program is free software: you can redistribute it and/or modify
 *  it under the terms of the GNU General Public License as published by
 *  the Free Software Foundation, either version 3 of the License, or
 *  (at your option) any later version.
 */

use chrono::Local;
use embedded_graphics::mono_font::{MonoFont, MonoTextStyle};
use embedded_graphics::pixelcolor::BinaryColor;
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::{PrimitiveStyle, Rectangle};
use embedded_graphics::text::{Alignment, Text};
use embedded_text::alignment::HorizontalAlignment;
use embedded_text::style::TextBoxStyleBuilder;
use embedded_text::TextBox;

use crate::fonts;
use crate::haiku::Haiku;

/// Vertical budget for one (possibly wrapped) haiku line.
const LINE_BLOCK_H: u32 = 16;

fn stroke(width: u32) -> PrimitiveStyle<BinaryColor> {
    PrimitiveStyle::with_stroke(BinaryColor::On, width)
}

fn fill() -> PrimitiveStyle<BinaryColor> {
    PrimitiveStyle::with_fill(BinaryColor::On)
}

/// Draw the double border that frames every card.
fn draw_border<D>(target: &mut D) -> Result<(), D::Error>
where
    D: DrawTarget<Color = BinaryColor> + OriginDimensions,
{
    let size = target.size();
    Rectangle::new(Point::new(3, 3), Size::new(size.width - 6, size.height - 6))
        .into_styled(stroke(2))
        .draw(target)?;
    Rectangle::new(Point::new(6, 6), Size::new(size.width - 12, size.height - 12))
        .into_styled(stroke(1))
        .draw(target)
}

fn center_dot<D>(target: &mut D, cx: i32, y: i32, r: u32) -> Result<(), D::Error>
where
    D: DrawTarget<Color = BinaryColor>,
{
    Rectangle::with_center(Point::new(cx, y), Size::new(r, r)).into_styled(fill()).draw(target)
}

/// Render a haiku card: header, decorative dots, the three lines, the
/// season footer, and a clock stamp at the bottom.
pub fn draw_haiku<D>(target: &mut D, haiku: &Haiku, body: &MonoFont<'static>) -> Result<(), D::Error>
where
    D: DrawTarget<Color = BinaryColor> + OriginDimensions,
{
    let size = target.size();
    let width = size.width as i32;
    let cx = width / 2;

    draw_border(target)?;

    let header_style = MonoTextStyle::new(fonts::HEADER, BinaryColor::On);
    Text::with_alignment("HAIKU", Point::new(cx, 28), header_style, Alignment::Center)
        .draw(target)?;
    center_dot(target, cx, 38, 4)?;

    let body_style = MonoTextStyle::new(body, BinaryColor::On);
    let box_style = TextBoxStyleBuilder::new().alignment(HorizontalAlignment::Center).build();

    let mut y = 50u32;
    for (i, line) in haiku.lines.iter().enumerate() {
        let bounds = Rectangle::new(Point::new(8, y as i32), Size::new(size.width - 16, LINE_BLOCK_H));
        TextBox::with_textbox_style(line, bounds, body_style, box_style).draw(target)?;
        y += LINE_BLOCK_H;
        if i < haiku.lines.len() - 1 {
            center_dot(target, cx, y as i32 - 3, 2)?;
            y += 6;
        }
    }

    let footer = format!("~ {} ~", haiku.season);
    Text::with_alignment(&footer, Point::new(cx, y as i32 + 14), body_style, Alignment::Center)
        .draw(target)?;

    let stamp = Local::now().format("%H:%M").to_string();
    Text::with_alignment(
        &stamp,
        Point::new(cx, size.height as i32 - 12),
        body_style,
        Alignment::Center,
    )
    .draw(target)?;

    Ok(())
}

/// Render the startup card shown for a few seconds at boot.
pub fn draw_startup<D>(target: &mut D, refresh_secs: u64) -> Result<(), D::Error>
where
    D: DrawTarget<Color = BinaryColor> + OriginDimensions,
{
    let size = target.size();
    let cx = size.width as i32 / 2;

    draw_border(target)?;

    let header_style = MonoTextStyle::new(fonts::HEADER, BinaryColor::On);
    Text::with_alignment("HAIKU", Point::new(cx, 30), header_style, Alignment::Center)
        .draw(target)?;
    Text::with_alignment("DISPLAY", Point::new(cx, 45), header_style, Alignment::Center)
        .draw(target)?;

    let mins = refresh_secs / 60;
    let cadence = if mins > 0 {
        format!("Fresh poems every\n{} minute{}", mins, if mins == 1 { "" } else { "s" })
    } else {
        format!("Fresh poems every\n{} seconds", refresh_secs)
    };
    let message = format!("Starting up...\n\n{}\n\nEnjoy the poetry!", cadence);

    let body_style = MonoTextStyle::new(fonts::DEFAULT_BODY, BinaryColor::On);
    let box_style = TextBoxStyleBuilder::new().alignment(HorizontalAlignment::Center).build();
    let bounds = Rectangle::new(Point::new(10, 70), Size::new(size.width - 20, size.height - 90));
    TextBox::with_textbox_style(&message, bounds, body_style, box_style).draw(target)?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::haiku::COLLECTION;
    use inkbuddy_driver_epd2in13::Frame;

    #[test]
    fn haiku_card_draws_border_and_text() {
        let mut frame = Frame::new();
        let haiku = &COLLECTION[0].poems[0];
        draw_haiku(&mut frame, haiku, fonts::DEFAULT_BODY).unwrap();
        // border corners
        assert!(frame.is_black(3, 3));
        assert!(frame.is_black(118, 246));
        // a card is mostly white but far from empty
        let black = frame.black_pixels();
        assert!(black > 500, "only {} black pixels", black);
        assert!(black < 122 * 250 / 2);
    }

    #[test]
    fn every_poem_renders() {
        for set in COLLECTION {
            for poem in set.poems {
                let mut frame = Frame::new();
                draw_haiku(&mut frame, poem, fonts::DEFAULT_BODY).unwrap();
                assert!(frame.black_pixels() > 400);
            }
        }
    }

    #[test]
    fn startup_card_renders() {
        let mut frame = Frame::new();
        draw_startup(&mut frame, 300).unwrap();
        assert!(frame.is_black(3, 3));
        assert!(frame.black_pixels() > 300);
    }
}
