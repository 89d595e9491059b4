/*
 *  InkBuddy EPD 2.13" V4 Driver
 *
 *  Packed monochrome framebuffer matching the panel RAM layout.
 */

use embedded_graphics::pixelcolor::BinaryColor;
use embedded_graphics::prelude::*;

use crate::{EPD_HEIGHT, EPD_WIDTH, FRAME_BYTES, ROW_BYTES};

/// In-memory framebuffer in the controller's native format: one bit per
/// pixel, MSB-first within a byte, rows padded to a byte boundary.
/// A set bit is white; `BinaryColor::On` draws black, matching how the
/// rest of the pack treats e-paper.
#[derive(Clone)]
pub struct Frame {
    buf: Vec<u8>,
}

impl Frame {
    /// A fresh all-white frame.
    pub fn new() -> Self {
        Self { buf: vec![0xFF; FRAME_BYTES] }
    }

    /// Reset the frame to white without reallocating.
    pub fn clear_white(&mut self) {
        self.buf.fill(0xFF);
    }

    /// Raw packed pixel data, ready for a RAM write.
    pub fn data(&self) -> &[u8] {
        &self.buf
    }

    /// Pixel state at (x, y); true = black. Out of bounds reads as white.
    pub fn is_black(&self, x: u32, y: u32) -> bool {
        if x >= EPD_WIDTH || y >= EPD_HEIGHT {
            return false;
        }
        let idx = y as usize * ROW_BYTES + (x as usize) / 8;
        self.buf[idx] & (0x80 >> (x % 8)) == 0
    }

    /// Count of black pixels. Handy for render assertions.
    pub fn black_pixels(&self) -> usize {
        let mut n = 0;
        for y in 0..EPD_HEIGHT {
            for x in 0..EPD_WIDTH {
                if self.is_black(x, y) {
                    n += 1;
                }
            }
        }
        n
    }

    fn set(&mut self, x: u32, y: u32, black: bool) {
        if x >= EPD_WIDTH || y >= EPD_HEIGHT {
            return;
        }
        let idx = y as usize * ROW_BYTES + (x as usize) / 8;
        let mask = 0x80 >> (x % 8);
        if black {
            self.buf[idx] &= !mask;
        } else {
            self.buf[idx] |= mask;
        }
    }
}

impl Default for Frame {
    fn default() -> Self {
        Self::new()
    }
}

impl OriginDimensions for Frame {
    fn size(&self) -> Size {
        Size::new(EPD_WIDTH, EPD_HEIGHT)
    }
}

impl DrawTarget for Frame {
    type Color = BinaryColor;
    type Error = core::convert::Infallible;

    fn draw_iter<I>(&mut self, pixels: I) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = Pixel<Self::Color>>,
    {
        for Pixel(point, color) in pixels {
            if point.x >= 0 && point.y >= 0 {
                self.set(point.x as u32, point.y as u32, color.is_on());
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use embedded_graphics::primitives::{PrimitiveStyle, Rectangle};

    #[test]
    fn fresh_frame_is_white() {
        let frame = Frame::new();
        assert_eq!(frame.data().len(), FRAME_BYTES);
        assert!(frame.data().iter().all(|&b| b == 0xFF));
        assert_eq!(frame.black_pixels(), 0);
    }

    #[test]
    fn pixel_packing_msb_first() {
        let mut frame = Frame::new();
        frame.set(0, 0, true);
        assert_eq!(frame.data()[0], 0x7F);
        frame.set(7, 0, true);
        assert_eq!(frame.data()[0], 0x7E);
        frame.set(8, 0, true);
        assert_eq!(frame.data()[1], 0x7F);
        // second row starts one padded row later
        frame.set(0, 1, true);
        assert_eq!(frame.data()[ROW_BYTES], 0x7F);
    }

    #[test]
    fn out_of_bounds_pixels_ignored() {
        let mut frame = Frame::new();
        frame.set(EPD_WIDTH, 0, true);
        frame.set(0, EPD_HEIGHT, true);
        frame.set(4000, 9000, true);
        assert_eq!(frame.black_pixels(), 0);
    }

    #[test]
    fn draw_target_rectangle() {
        let mut frame = Frame::new();
        Rectangle::new(Point::new(10, 10), Size::new(4, 4))
            .into_styled(PrimitiveStyle::with_fill(BinaryColor::On))
            .draw(&mut frame)
            .unwrap();
        assert_eq!(frame.black_pixels(), 16);
        assert!(frame.is_black(10, 10));
        assert!(frame.is_black(13, 13));
        assert!(!frame.is_black(14, 14));
    }

    #[test]
    fn clear_white_resets() {
        let mut frame = Frame::new();
        frame.set(50, 100, true);
        assert_eq!(frame.black_pixels(), 1);
        frame.clear_white();
        assert_eq!(frame.black_pixels(), 0);
    }
}
