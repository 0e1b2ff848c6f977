/*
 *  render/renderer.rs
 *
 *  lifecal - life in little squares
 *  (c) 2020-26 Stuart Hunter
 *
 *  Grid calendar renderer: layout, cells, captions
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

use log::debug;

use super::canvas::Canvas;
use super::error::RenderError;
use super::fonts::FontBook;
use crate::calendar::{CalendarRequest, CalendarStyle, GridLayout, Region, Rgb};
use crate::constants::{
    CORNER_RADIUS_FRACTION, MIN_CAPTION_PX, STATUS_SCALE, TITLE_HEIGHT_FRACTION,
    TITLE_WIDTH_FRACTION,
};

/// Draw one calendar. Every unit cell is painted exactly once, then captions.
pub fn render(
    request: &CalendarRequest,
    style: &CalendarStyle,
    fonts: &FontBook,
) -> Result<Canvas, RenderError> {
    let layout = GridLayout::compute(request, style);
    debug!(
        "grid {}x{} cell {:.2}px dot {:.2}px for {} units ({} elapsed)",
        layout.columns,
        layout.rows,
        layout.cell_size,
        layout.dot_size,
        request.total_units(),
        request.elapsed_units()
    );

    let mut canvas = Canvas::new(request.canvas.width(), request.canvas.height())?;
    canvas.fill(style.palette.background);

    for cell in layout.cells(request) {
        let color = style.palette.cell(cell.color);
        if cell.rounded {
            let radius = cell.size * CORNER_RADIUS_FRACTION;
            canvas.fill_rounded_rect(cell.x, cell.y, cell.size, radius, color);
        } else {
            canvas.fill_rect(cell.x, cell.y, cell.size, color);
        }
    }

    let title_px = (request.canvas.height() as f32 * TITLE_HEIGHT_FRACTION)
        .min(request.canvas.width() as f32 * TITLE_WIDTH_FRACTION);

    if let (Some(title), Some(band)) = (request.caption.as_deref(), layout.title_band) {
        draw_centred(&mut canvas, fonts, title, band, title_px, style.palette.text)?;
    }
    if let (Some(status), Some(band)) = (request.sub_caption.as_deref(), layout.status_band) {
        let status_px = title_px * STATUS_SCALE;
        draw_centred(&mut canvas, fonts, status, band, status_px, style.palette.text)?;
    }

    Ok(canvas)
}

/// Render and encode in one step.
pub fn render_png(
    request: &CalendarRequest,
    style: &CalendarStyle,
    fonts: &FontBook,
) -> Result<Vec<u8>, RenderError> {
    render(request, style, fonts)?.encode_png()
}

fn draw_centred(
    canvas: &mut Canvas,
    fonts: &FontBook,
    text: &str,
    band: Region,
    px: f32,
    color: Rgb,
) -> Result<(), RenderError> {
    if text.trim().is_empty() {
        return Ok(());
    }
    let px = fonts.fit_px(text, px, MIN_CAPTION_PX, band.width);
    let extent = fonts.measure(text, px);
    let x = band.x + (band.width - extent.width) / 2.0;
    let y = band.y + (band.height - extent.height) / 2.0;
    fonts.draw(canvas, text, x, y, px, color)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calendar::{CanvasSize, CellColor};

    fn fonts() -> FontBook {
        FontBook::builtin()
    }

    #[test]
    fn test_cell_centres_carry_state_colours() {
        let request = CalendarRequest::new(90 * 52, 365, CanvasSize::clamped(1290, 2796));
        let style = CalendarStyle::LIFE;
        let canvas = render(&request, &style, &fonts()).unwrap();
        let layout = GridLayout::compute(&request, &style);

        let expectations = [
            (0, CellColor::Past),
            (364, CellColor::Past),
            (365, CellColor::Current),
            (366, CellColor::Future),
            (4679, CellColor::Future),
        ];
        for (index, expected) in expectations {
            let cell = layout.place(index, request.elapsed_units());
            let cx = (cell.x + cell.size / 2.0) as u32;
            let cy = (cell.y + cell.size / 2.0) as u32;
            assert_eq!(canvas.pixel(cx, cy), Some(style.palette.cell(expected)), "cell {index}");
        }
    }

    #[test]
    fn test_margins_keep_background() {
        let request = CalendarRequest::new(90 * 52, 0, CanvasSize::clamped(1290, 2796));
        let style = CalendarStyle::LIFE;
        let canvas = render(&request, &style, &fonts()).unwrap();
        assert_eq!(canvas.pixel(0, 0), Some(style.palette.background));
        assert_eq!(canvas.pixel(1289, 2795), Some(style.palette.background));
        assert_eq!(canvas.pixel(5, 1400), Some(style.palette.background));
    }

    #[test]
    fn test_render_is_idempotent() {
        let request = CalendarRequest::new(30, 9, CanvasSize::clamped(300, 600))
            .with_caption("Goal")
            .with_sub_caption("21 days left");
        let style = CalendarStyle::GOAL;
        let a = render_png(&request, &style, &fonts()).unwrap();
        let b = render_png(&request, &style, &fonts()).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_caption_is_drawn_in_title_band() {
        let style = CalendarStyle::YEAR;
        let plain = CalendarRequest::new(365, 100, CanvasSize::clamped(600, 1200));
        let captioned = plain.clone().with_caption("2026");
        let canvas = render(&captioned, &style, &fonts()).unwrap();
        let band = GridLayout::compute(&captioned, &style).title_band.unwrap();

        let lit = (band.x as u32..band.right() as u32)
            .flat_map(|x| (band.y as u32..band.bottom() as u32).map(move |y| (x, y)))
            .filter(|&(x, y)| canvas.pixel(x, y) == Some(style.palette.text))
            .count();
        assert!(lit > 0);
    }

    #[test]
    fn test_outline_captions_land_in_their_bands() {
        let fonts = FontBook::resolve(crate::render::SYSTEM_FONT_PATHS);
        if fonts.is_builtin() {
            return;
        }
        let style = CalendarStyle::YEAR;
        let request = CalendarRequest::new(365, 100, CanvasSize::clamped(600, 1200))
            .with_caption("2026")
            .with_sub_caption("265 days left");
        let canvas = render(&request, &style, &fonts).unwrap();
        let layout = GridLayout::compute(&request, &style);

        for band in [layout.title_band.unwrap(), layout.status_band.unwrap()] {
            let lit = (band.x as u32..band.right() as u32)
                .flat_map(|x| (band.y as u32..band.bottom() as u32).map(move |y| (x, y)))
                .filter(|&(x, y)| canvas.pixel(x, y) != Some(style.palette.background))
                .count();
            assert!(lit > 0, "{band:?}");
        }
    }

    #[test]
    fn test_small_canvas_renders() {
        let request = CalendarRequest::new(90 * 52, 10, CanvasSize::clamped(100, 100));
        let canvas = render(&request, &CalendarStyle::LIFE, &fonts()).unwrap();
        assert_eq!((canvas.width(), canvas.height()), (100, 100));
    }
}
