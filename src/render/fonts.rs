/*
 *  render/fonts.rs
 *
 *  lifecal - life in little squares
 *  (c) 2020-26 Stuart Hunter
 *
 *  Best-effort caption font: first loadable TrueType face, else a bitmap font
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

use std::fs;
use std::path::{Path, PathBuf};

use ab_glyph::{point, Font, FontArc, GlyphId, PxScale, ScaleFont};
use embedded_graphics::mono_font::{ascii::FONT_10X20, MonoFont, MonoTextStyle};
use embedded_graphics::pixelcolor::Rgb888;
use embedded_graphics::prelude::*;
use embedded_graphics::text::{Baseline, Text};
use log::{debug, warn};

use super::canvas::Canvas;
use super::error::RenderError;
use crate::calendar::Rgb;

/// Searched after any configured paths.
pub const SYSTEM_FONT_PATHS: &[&str] = &[
    "/usr/share/fonts/truetype/dejavu/DejaVuSans-Bold.ttf",
    "/usr/share/fonts/TTF/DejaVuSans-Bold.ttf",
    "/usr/share/fonts/dejavu/DejaVuSans-Bold.ttf",
    "/usr/share/fonts/truetype/liberation/LiberationSans-Bold.ttf",
    "/usr/share/fonts/liberation/LiberationSans-Bold.ttf",
    "/usr/share/fonts/noto/NotoSans-Bold.ttf",
    "/System/Library/Fonts/Supplemental/Arial Bold.ttf",
    "/Library/Fonts/Arial Bold.ttf",
    "C:\\Windows\\Fonts\\arialbd.ttf",
];

/// Pixel extent of a line of text.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TextExtent {
    pub width: f32,
    pub height: f32,
}

enum Face {
    Outline { font: FontArc, source: PathBuf },
    Bitmap,
}

fn bitmap_font() -> &'static MonoFont<'static> {
    &FONT_10X20
}

/// The one caption face shared by every render.
pub struct FontBook {
    face: Face,
}

impl FontBook {
    /// First candidate that reads and parses wins; otherwise the bitmap font.
    pub fn resolve<P: AsRef<Path>>(candidates: &[P]) -> Self {
        for path in candidates {
            let path = path.as_ref();
            match load_outline(path) {
                Some(font) => {
                    return Self { face: Face::Outline { font, source: path.to_path_buf() } };
                }
                None => debug!("font candidate {} unavailable", path.display()),
            }
        }
        warn!("No TrueType font found, captions use the built-in bitmap font");
        Self::builtin()
    }

    pub fn builtin() -> Self {
        Self { face: Face::Bitmap }
    }

    pub fn is_builtin(&self) -> bool {
        matches!(self.face, Face::Bitmap)
    }

    pub fn describe(&self) -> String {
        match &self.face {
            Face::Outline { source, .. } => source.display().to_string(),
            Face::Bitmap => "built-in 10x20 bitmap".to_string(),
        }
    }

    /// Size of `text` at `px`. The bitmap face has a single size and ignores `px`.
    pub fn measure(&self, text: &str, px: f32) -> TextExtent {
        match &self.face {
            Face::Outline { font, .. } => {
                let scaled = font.as_scaled(PxScale::from(px));
                let mut width = 0.0;
                let mut prev: Option<GlyphId> = None;
                for ch in text.chars() {
                    let id = scaled.glyph_id(ch);
                    if let Some(prev) = prev {
                        width += scaled.kern(prev, id);
                    }
                    width += scaled.h_advance(id);
                    prev = Some(id);
                }
                TextExtent { width, height: scaled.ascent() - scaled.descent() }
            }
            Face::Bitmap => {
                let font = bitmap_font();
                let style = MonoTextStyle::new(font, Rgb888::WHITE);
                let bounds = Text::with_baseline(text, Point::zero(), style, Baseline::Top)
                    .bounding_box();
                TextExtent {
                    width: bounds.size.width as f32,
                    height: font.character_size.height as f32,
                }
            }
        }
    }

    /// Largest size not above `px` at which `text` fits in `max_width`.
    pub fn fit_px(&self, text: &str, px: f32, min_px: f32, max_width: f32) -> f32 {
        let width = self.measure(text, px).width;
        if width <= max_width || width <= 0.0 {
            return px;
        }
        (px * max_width / width).max(min_px)
    }

    /// Draw `text` with the top of its line box at (x, y).
    pub fn draw(
        &self,
        canvas: &mut Canvas,
        text: &str,
        x: f32,
        y: f32,
        px: f32,
        color: Rgb,
    ) -> Result<(), RenderError> {
        match &self.face {
            Face::Outline { font, .. } => draw_outline(canvas, font, text, x, y, px, color),
            Face::Bitmap => {
                let style = MonoTextStyle::new(bitmap_font(), color.to_rgb888());
                let origin = Point::new(x.round() as i32, y.round() as i32);
                Text::with_baseline(text, origin, style, Baseline::Top)
                    .draw(canvas)
                    .ok();
                Ok(())
            }
        }
    }
}

fn load_outline(path: &Path) -> Option<FontArc> {
    let bytes = fs::read(path).ok()?;
    FontArc::try_from_vec(bytes).ok()
}

fn draw_outline(
    canvas: &mut Canvas,
    font: &FontArc,
    text: &str,
    x: f32,
    y: f32,
    px: f32,
    color: Rgb,
) -> Result<(), RenderError> {
    let scale = PxScale::from(px);
    let scaled = font.as_scaled(scale);
    let baseline = y + scaled.ascent();
    let (w, h) = (canvas.width() as i32, canvas.height() as i32);

    let mut mask = canvas.new_mask()?;
    let coverage = mask.data_mut();

    let mut caret = x;
    let mut prev: Option<GlyphId> = None;
    for ch in text.chars() {
        let id = scaled.glyph_id(ch);
        if let Some(prev) = prev {
            caret += scaled.kern(prev, id);
        }
        let glyph = id.with_scale_and_position(scale, point(caret, baseline));
        if let Some(outlined) = font.outline_glyph(glyph) {
            let bounds = outlined.px_bounds();
            outlined.draw(|gx, gy, c| {
                let px_x = bounds.min.x as i32 + gx as i32;
                let px_y = bounds.min.y as i32 + gy as i32;
                if px_x >= 0 && px_y >= 0 && px_x < w && px_y < h {
                    let i = (px_y * w + px_x) as usize;
                    let a = (c.clamp(0.0, 1.0) * 255.0).round() as u8;
                    coverage[i] = coverage[i].max(a);
                }
            });
        }
        caret += scaled.h_advance(id);
        prev = Some(id);
    }

    canvas.fill_mask(&mask, color);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_candidates_fall_back_to_bitmap() {
        let book = FontBook::resolve(&["/definitely/not/here.ttf", "/nor/here.otf"]);
        assert!(book.is_builtin());
        assert!(book.describe().contains("bitmap"));
    }

    #[test]
    fn test_non_font_file_is_skipped() {
        let path = std::env::temp_dir().join("lifecal-not-a-font.ttf");
        std::fs::write(&path, b"this is not a font").unwrap();
        let book = FontBook::resolve(&[&path]);
        assert!(book.is_builtin());
        let _ = std::fs::remove_file(&path);
    }

    #[test]
    fn test_bitmap_measure() {
        let book = FontBook::builtin();
        let e = book.measure("abcd", 40.0);
        assert_eq!(e.width, 40.0);
        assert_eq!(e.height, 20.0);
        assert_eq!(book.measure("", 40.0).width, 0.0);
    }

    #[test]
    fn test_fit_px_shrinks_wide_text() {
        let book = FontBook::builtin();
        // bitmap width is fixed, so the ratio is applied once
        assert_eq!(book.fit_px("abcd", 30.0, 8.0, 100.0), 30.0);
        assert_eq!(book.fit_px("abcd", 30.0, 8.0, 20.0), 15.0);
        assert_eq!(book.fit_px("abcd", 30.0, 8.0, 1.0), 8.0);
    }

    // Needs a system TrueType face; hosts without one skip.
    fn system_font() -> Option<FontBook> {
        let book = FontBook::resolve(SYSTEM_FONT_PATHS);
        (!book.is_builtin()).then_some(book)
    }

    #[test]
    fn test_outline_measure_scales_with_size() {
        let Some(book) = system_font() else { return };
        assert!(!book.describe().contains("bitmap"));
        let small = book.measure("2026", 12.0);
        let large = book.measure("2026", 48.0);
        assert!(small.width > 0.0);
        assert!(large.width > small.width * 3.0);
        assert!(large.height > small.height);
    }

    #[test]
    fn test_outline_fit_px_brings_long_names_inside() {
        let Some(book) = system_font() else { return };
        let name = "W".repeat(64);
        let fitted = book.fit_px(&name, 36.0, 8.0, 504.0);
        assert!(fitted < 36.0 && fitted >= 8.0);
        if fitted > 8.0 {
            assert!(book.measure(&name, fitted).width <= 504.5);
        }
    }

    #[test]
    fn test_outline_draw_marks_pixels() {
        let Some(book) = system_font() else { return };
        let bg = Rgb::new(0, 0, 0);
        let mut canvas = Canvas::new(200, 60).unwrap();
        canvas.fill(bg);
        book.draw(&mut canvas, "Goal", 10.0, 10.0, 32.0, Rgb::new(255, 255, 255)).unwrap();
        let lit = (0..200)
            .flat_map(|x| (0..60).map(move |y| (x, y)))
            .filter(|&(x, y)| canvas.pixel(x, y) != Some(bg))
            .count();
        assert!(lit > 50);
        // nothing above the line box
        assert!((0..200).all(|x| (0..5).all(|y| canvas.pixel(x, y) == Some(bg))));
    }

    #[test]
    fn test_bitmap_draw_marks_pixels() {
        let text_color = Rgb::new(255, 255, 255);
        let bg = Rgb::new(0, 0, 0);
        let mut canvas = Canvas::new(60, 30).unwrap();
        canvas.fill(bg);
        FontBook::builtin().draw(&mut canvas, "HH", 2.0, 2.0, 20.0, text_color).unwrap();
        let lit = (0..60)
            .flat_map(|x| (0..30).map(move |y| (x, y)))
            .filter(|&(x, y)| canvas.pixel(x, y) == Some(text_color))
            .count();
        assert!(lit > 0);
    }
}
