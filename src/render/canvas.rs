/*
 *  render/canvas.rs
 *
 *  lifecal - life in little squares
 *  (c) 2020-26 Stuart Hunter
 *
 *  RGBA raster surface over a tiny-skia pixmap
 *
 *  This program is free software: you can redistribute it and/or modify
 *  it under the terms of the GNU General Public License as published by
 *  the Free Software Foundation, either version 3 of the License, or
 *  (at your option) any later version.
 *
 *  This program is distributed in the hope that it will be useful,
 *  but WITHOUT ANY WARRANTY; without even the implied warranty of
 *  MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
 *  GNU General Public License for more details.
 *
 *  See <http://www.gnu.org/licenses/> to get a copy of the GNU General
 *  Public License.
 *
 */

use core::convert::Infallible;

use embedded_graphics::geometry::{OriginDimensions, Size};
use embedded_graphics::pixelcolor::{Rgb888, RgbColor};
use embedded_graphics::prelude::*;
use tiny_skia::{ColorU8, FillRule, Mask, Paint, Path, PathBuilder, Pixmap, Rect, Transform};

use super::error::RenderError;
use crate::calendar::Rgb;

/// Cubic bezier handle length for a quarter circle.
const KAPPA: f32 = 0.552_284_8;

/// The raster image a calendar is drawn into.
#[derive(Debug, Clone)]
pub struct Canvas {
    pixmap: Pixmap,
}

impl Canvas {
    pub fn new(width: u32, height: u32) -> Result<Self, RenderError> {
        let pixmap = Pixmap::new(width, height)
            .ok_or(RenderError::Allocation { width, height })?;
        Ok(Self { pixmap })
    }

    pub fn width(&self) -> u32 {
        self.pixmap.width()
    }

    pub fn height(&self) -> u32 {
        self.pixmap.height()
    }

    pub fn fill(&mut self, color: Rgb) {
        self.pixmap.fill(color.to_skia());
    }

    /// Filled square with its top-left at (x, y). Degenerate sizes draw nothing.
    pub fn fill_rect(&mut self, x: f32, y: f32, side: f32, color: Rgb) {
        if let Some(rect) = Rect::from_xywh(x, y, side, side) {
            self.pixmap.fill_rect(rect, &paint(color), Transform::identity(), None);
        }
    }

    /// Filled square with rounded corners.
    pub fn fill_rounded_rect(&mut self, x: f32, y: f32, side: f32, radius: f32, color: Rgb) {
        if let Some(path) = rounded_square(x, y, side, radius) {
            self.pixmap.fill_path(
                &path,
                &paint(color),
                FillRule::Winding,
                Transform::identity(),
                None,
            );
        }
    }

    /// Blank coverage mask the size of the canvas, for glyph rasterising
    pub fn new_mask(&self) -> Result<Mask, RenderError> {
        Mask::new(self.width(), self.height()).ok_or(RenderError::Allocation {
            width: self.width(),
            height: self.height(),
        })
    }

    /// Paint `color` through a coverage mask
    pub fn fill_mask(&mut self, mask: &Mask, color: Rgb) {
        if let Some(rect) = Rect::from_xywh(0.0, 0.0, self.width() as f32, self.height() as f32) {
            self.pixmap.fill_rect(rect, &paint(color), Transform::identity(), Some(mask));
        }
    }

    /// Colour at a pixel, ignoring alpha (the canvas is always opaque).
    pub fn pixel(&self, x: u32, y: u32) -> Option<Rgb> {
        let p = self.pixmap.pixel(x, y)?.demultiply();
        Some(Rgb::new(p.red(), p.green(), p.blue()))
    }

    pub fn encode_png(&self) -> Result<Vec<u8>, RenderError> {
        self.pixmap
            .encode_png()
            .map_err(|e| RenderError::Encode(e.to_string()))
    }
}

fn paint(color: Rgb) -> Paint<'static> {
    let mut paint = Paint::default();
    paint.set_color(color.to_skia());
    paint.anti_alias = true;
    paint
}

fn rounded_square(x: f32, y: f32, side: f32, radius: f32) -> Option<Path> {
    if side <= 0.0 {
        return None;
    }
    let r = radius.clamp(0.0, side / 2.0);
    let k = r * KAPPA;
    let (x1, y1) = (x + side, y + side);

    let mut pb = PathBuilder::new();
    pb.move_to(x + r, y);
    pb.line_to(x1 - r, y);
    pb.cubic_to(x1 - r + k, y, x1, y + r - k, x1, y + r);
    pb.line_to(x1, y1 - r);
    pb.cubic_to(x1, y1 - r + k, x1 - r + k, y1, x1 - r, y1);
    pb.line_to(x + r, y1);
    pb.cubic_to(x + r - k, y1, x, y1 - r + k, x, y1 - r);
    pb.line_to(x, y + r);
    pb.cubic_to(x, y + r - k, x + r - k, y, x + r, y);
    pb.close();
    pb.finish()
}

impl OriginDimensions for Canvas {
    fn size(&self) -> Size {
        Size::new(self.width(), self.height())
    }
}

/// Lets embedded-graphics text (the bitmap fallback font) draw straight onto the pixmap.
impl DrawTarget for Canvas {
    type Color = Rgb888;
    type Error = Infallible;

    fn draw_iter<I>(&mut self, pixels: I) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = Pixel<Self::Color>>,
    {
        let (w, h) = (self.width() as i32, self.height() as i32);
        let data = self.pixmap.pixels_mut();
        for Pixel(p, c) in pixels {
            if p.x >= 0 && p.y >= 0 && p.x < w && p.y < h {
                let i = (p.y * w + p.x) as usize;
                data[i] = ColorU8::from_rgba(c.r(), c.g(), c.b(), 255).premultiply();
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const RED: Rgb = Rgb::new(255, 0, 0);
    const BG: Rgb = Rgb::new(0x1a, 0x1a, 0x1a);

    #[test]
    fn test_fill_and_pixel() {
        let mut c = Canvas::new(20, 10).unwrap();
        c.fill(BG);
        assert_eq!(c.pixel(0, 0), Some(BG));
        assert_eq!(c.pixel(19, 9), Some(BG));
        assert_eq!(c.pixel(20, 0), None);
    }

    #[test]
    fn test_fill_rect_covers_interior_only() {
        let mut c = Canvas::new(20, 20).unwrap();
        c.fill(BG);
        c.fill_rect(5.0, 5.0, 10.0, RED);
        assert_eq!(c.pixel(10, 10), Some(RED));
        assert_eq!(c.pixel(2, 2), Some(BG));
        assert_eq!(c.pixel(16, 16), Some(BG));
    }

    #[test]
    fn test_rounded_rect_leaves_corners() {
        let mut c = Canvas::new(40, 40).unwrap();
        c.fill(BG);
        c.fill_rounded_rect(0.0, 0.0, 40.0, 16.0, RED);
        assert_eq!(c.pixel(20, 20), Some(RED));
        assert_eq!(c.pixel(0, 0), Some(BG));
        assert_eq!(c.pixel(20, 1), Some(RED));
    }

    #[test]
    fn test_degenerate_shapes_are_skipped() {
        let mut c = Canvas::new(10, 10).unwrap();
        c.fill(BG);
        c.fill_rect(2.0, 2.0, 0.0, RED);
        c.fill_rounded_rect(2.0, 2.0, 0.0, 1.0, RED);
        assert_eq!(c.pixel(2, 2), Some(BG));
    }

    #[test]
    fn test_draw_target_clips() {
        let mut c = Canvas::new(4, 4).unwrap();
        c.fill(BG);
        let pixels = [
            Pixel(Point::new(1, 1), Rgb888::new(255, 0, 0)),
            Pixel(Point::new(-1, 0), Rgb888::new(255, 0, 0)),
            Pixel(Point::new(4, 4), Rgb888::new(255, 0, 0)),
        ];
        c.draw_iter(pixels).unwrap();
        assert_eq!(c.pixel(1, 1), Some(RED));
        assert_eq!(c.pixel(0, 0), Some(BG));
    }

    #[test]
    fn test_png_signature() {
        let mut c = Canvas::new(8, 8).unwrap();
        c.fill(BG);
        let png = c.encode_png().unwrap();
        assert_eq!(&png[..8], b"\x89PNG\r\n\x1a\n");
        let decoded = Pixmap::decode_png(&png).unwrap();
        assert_eq!((decoded.width(), decoded.height()), (8, 8));
    }

    #[test]
    fn test_zero_size_canvas_is_an_error() {
        assert!(matches!(
            Canvas::new(0, 10),
            Err(RenderError::Allocation { width: 0, height: 10 })
        ));
    }
}
