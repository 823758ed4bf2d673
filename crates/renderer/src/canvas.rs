//! In-memory RGB raster with integer drawing primitives.
//!
//! All coordinates are signed pixels with the origin at the top-left.
//! Writes outside the buffer are dropped, so callers never need to clip.

use mrds_common::MrdsResult;

use crate::font::{advance, glyph, glyph_bit, GLYPH_HEIGHT, GLYPH_WIDTH};
use crate::png::{create_png_rgb, BYTES_PER_PIXEL};
use crate::style::Rgb;

/// A row-major RGB pixel buffer.
#[derive(Debug, Clone, PartialEq)]
pub struct Canvas {
    width: usize,
    height: usize,
    pixels: Vec<u8>,
}

impl Canvas {
    /// Create a canvas filled with `background`.
    pub fn new(width: usize, height: usize, background: Rgb) -> Self {
        let mut canvas = Self {
            width,
            height,
            pixels: vec![0; width * height * BYTES_PER_PIXEL],
        };
        canvas.fill(background);
        canvas
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Raw RGB bytes, row-major.
    pub fn pixels(&self) -> &[u8] {
        &self.pixels
    }

    pub fn into_pixels(self) -> Vec<u8> {
        self.pixels
    }

    /// Paint every pixel with `color`.
    pub fn fill(&mut self, color: Rgb) {
        let rgb = color.to_array();
        for px in self.pixels.chunks_exact_mut(BYTES_PER_PIXEL) {
            px.copy_from_slice(&rgb);
        }
    }

    #[inline]
    fn offset(&self, x: i32, y: i32) -> Option<usize> {
        if x < 0 || y < 0 {
            return None;
        }
        let (x, y) = (x as usize, y as usize);
        if x >= self.width || y >= self.height {
            return None;
        }
        Some((y * self.width + x) * BYTES_PER_PIXEL)
    }

    /// Color at (x, y), or `None` outside the buffer.
    pub fn get(&self, x: i32, y: i32) -> Option<Rgb> {
        let i = self.offset(x, y)?;
        Some(Rgb::new(self.pixels[i], self.pixels[i + 1], self.pixels[i + 2]))
    }

    /// Write one pixel; out-of-bounds coordinates are ignored.
    #[inline]
    pub fn set(&mut self, x: i32, y: i32, color: Rgb) {
        if let Some(i) = self.offset(x, y) {
            self.pixels[i..i + BYTES_PER_PIXEL].copy_from_slice(&color.to_array());
        }
    }

    /// Bresenham line from (x0, y0) to (x1, y1), both endpoints included.
    pub fn line(&mut self, x0: i32, y0: i32, x1: i32, y1: i32, color: Rgb) {
        // i64 keeps the error term from overflowing on far off-canvas endpoints
        let (mut x, mut y) = (x0 as i64, y0 as i64);
        let (x1, y1) = (x1 as i64, y1 as i64);
        let dx = (x1 - x).abs();
        let sx = if x < x1 { 1 } else { -1 };
        let dy = -(y1 - y).abs();
        let sy = if y < y1 { 1 } else { -1 };
        let mut err = dx + dy;

        loop {
            self.set_wide(x, y, color);
            if x == x1 && y == y1 {
                break;
            }
            let e2 = 2 * err;
            if e2 >= dy {
                err += dy;
                x += sx;
            }
            if e2 <= dx {
                err += dx;
                y += sy;
            }
        }
    }

    #[inline]
    fn set_wide(&mut self, x: i64, y: i64, color: Rgb) {
        if let (Ok(x), Ok(y)) = (i32::try_from(x), i32::try_from(y)) {
            self.set(x, y, color);
        }
    }

    /// Axis-aligned rectangle border through both corners.
    pub fn rect_outline(&mut self, x0: i32, y0: i32, x1: i32, y1: i32, color: Rgb) {
        self.line(x0, y0, x1, y0, color);
        self.line(x1, y0, x1, y1, color);
        self.line(x1, y1, x0, y1, color);
        self.line(x0, y1, x0, y0, color);
    }

    /// Midpoint circle outline of radius `r` centered on (cx, cy).
    pub fn circle(&mut self, cx: i32, cy: i32, r: i32, color: Rgb) {
        let mut x = r;
        let mut y = 0;
        let mut err = 1 - x;
        while x >= y {
            for (px, py) in [
                (x, y),
                (y, x),
                (-y, x),
                (-x, y),
                (-x, -y),
                (-y, -x),
                (y, -x),
                (x, -y),
            ] {
                self.set(cx + px, cy + py, color);
            }
            y += 1;
            if err < 0 {
                err += 2 * y + 1;
            } else {
                x -= 1;
                err += 2 * (y - x) + 1;
            }
        }
    }

    /// Draw one glyph with its top-left at (x, y), each font pixel
    /// expanded to a `scale`×`scale` block.
    pub fn draw_char(&mut self, x: i32, y: i32, ch: char, color: Rgb, scale: i32) {
        let g = glyph(ch);
        for gy in 0..GLYPH_HEIGHT {
            for gx in 0..GLYPH_WIDTH {
                if !glyph_bit(&g, gx, gy) {
                    continue;
                }
                for sy in 0..scale {
                    for sx in 0..scale {
                        self.set(x + gx * scale + sx, y + gy * scale + sy, color);
                    }
                }
            }
        }
    }

    /// Draw a string left to right starting at (x, y).
    pub fn draw_text(&mut self, x: i32, y: i32, text: &str, color: Rgb, scale: i32) {
        let mut cursor_x = x;
        for ch in text.chars() {
            self.draw_char(cursor_x, y, ch, color, scale);
            cursor_x += advance(scale);
        }
    }

    /// Encode the buffer as a PNG byte stream.
    pub fn encode_png(&self) -> MrdsResult<Vec<u8>> {
        create_png_rgb(&self.pixels, self.width, self.height)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const RED: Rgb = Rgb::new(255, 0, 0);

    fn painted(canvas: &Canvas, background: Rgb) -> Vec<(i32, i32)> {
        let mut out = Vec::new();
        for y in 0..canvas.height() as i32 {
            for x in 0..canvas.width() as i32 {
                if canvas.get(x, y) != Some(background) {
                    out.push((x, y));
                }
            }
        }
        out
    }

    #[test]
    fn test_new_fills_background() {
        let canvas = Canvas::new(3, 2, Rgb::new(1, 2, 3));
        assert_eq!(canvas.pixels().len(), 18);
        assert_eq!(canvas.get(2, 1), Some(Rgb::new(1, 2, 3)));
        assert_eq!(canvas.get(3, 1), None);
    }

    #[test]
    fn test_set_out_of_bounds_is_noop() {
        let mut canvas = Canvas::new(4, 4, Rgb::WHITE);
        let before = canvas.clone();
        canvas.set(-1, 0, RED);
        canvas.set(4, 0, RED);
        canvas.set(0, -1, RED);
        canvas.set(0, 4, RED);
        canvas.set(i32::MIN, i32::MAX, RED);
        assert_eq!(canvas, before);
    }

    #[test]
    fn test_line_single_point() {
        let mut canvas = Canvas::new(4, 4, Rgb::WHITE);
        canvas.line(2, 1, 2, 1, RED);
        assert_eq!(painted(&canvas, Rgb::WHITE), vec![(2, 1)]);
    }

    #[test]
    fn test_line_far_outside_terminates() {
        let mut canvas = Canvas::new(4, 4, Rgb::WHITE);
        canvas.line(-3, 2, 6, 2, RED);
        assert_eq!(painted(&canvas, Rgb::WHITE), vec![(0, 2), (1, 2), (2, 2), (3, 2)]);
    }

    #[test]
    fn test_circle_radius_zero() {
        let mut canvas = Canvas::new(3, 3, Rgb::WHITE);
        canvas.circle(1, 1, 0, RED);
        assert_eq!(painted(&canvas, Rgb::WHITE), vec![(1, 1)]);
    }

    #[test]
    fn test_draw_char_scaled() {
        let mut canvas = Canvas::new(12, 16, Rgb::WHITE);
        canvas.draw_char(0, 0, '-', RED, 2);
        // '-' is the full fourth row: 10x2 block at y = 6..8
        let expected: Vec<(i32, i32)> = (6..8).flat_map(|y| (0..10).map(move |x| (x, y))).collect();
        assert_eq!(painted(&canvas, Rgb::WHITE), expected);
    }

    #[test]
    fn test_draw_text_unsupported_is_blank() {
        let mut canvas = Canvas::new(20, 10, Rgb::WHITE);
        canvas.draw_text(0, 0, "a|/", RED, 1);
        assert!(painted(&canvas, Rgb::WHITE).is_empty());
    }

    #[test]
    fn test_draw_text_advance() {
        let mut canvas = Canvas::new(20, 10, Rgb::WHITE);
        canvas.draw_text(0, 0, "__", RED, 1);
        // '_' is the bottom row; second glyph starts at x = 6
        let expected: Vec<(i32, i32)> = (0..5).chain(6..11).map(|x| (x, 6)).collect();
        assert_eq!(painted(&canvas, Rgb::WHITE), expected);
    }
}
