/*
 *  calendar/layout.rs
 *
 *  lifecal - life in little squares
 *  (c) 2020-26 Stuart Hunter
 *
 *  Grid geometry: shape, cell size, centring and per-cell placement
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

use super::palette::CellColor;
use super::request::CalendarRequest;
use super::style::{CalendarStyle, ShapeMode};
use crate::constants::{
    CAPTION_BAND_FRACTION, PADDING_X_FRACTION, PADDING_Y_FRACTION, ROUNDED_MIN_DOT,
};

/// Axis-aligned region of the canvas, in pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Region {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Region {
    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }
}

/// Derived grid geometry for one request. Immutable once computed.
#[derive(Debug, Clone, PartialEq)]
pub struct GridLayout {
    pub rows: u32,
    pub columns: u32,
    /// Pitch of one cell (square)
    pub cell_size: f32,
    pub gap: f32,
    /// Visible side of each cell, `cell_size - gap`, never negative
    pub dot_size: f32,
    /// Top-left of the realised grid
    pub offset_x: f32,
    pub offset_y: f32,
    /// Padded drawing area the grid is centred in
    pub area: Region,
    /// Caption band above the grid, present with captions
    pub title_band: Option<Region>,
    /// Status band below the grid, present with captions
    pub status_band: Option<Region>,
}

/// Where and how one unit cell is drawn.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CellPlacement {
    pub index: u32,
    pub row: u32,
    pub column: u32,
    pub x: f32,
    pub y: f32,
    pub size: f32,
    pub color: CellColor,
    pub rounded: bool,
}

impl GridLayout {
    pub fn compute(request: &CalendarRequest, style: &CalendarStyle) -> Self {
        let canvas_w = request.canvas.width() as f32;
        let canvas_h = request.canvas.height() as f32;

        let pad_x = canvas_w * PADDING_X_FRACTION;
        let pad_y = canvas_h * PADDING_Y_FRACTION;
        // same band top and bottom keeps the grid centred on the canvas
        let band = if request.has_captions() { canvas_h * CAPTION_BAND_FRACTION } else { 0.0 };

        let area = Region {
            x: pad_x,
            y: pad_y + band,
            width: (canvas_w - 2.0 * pad_x).max(0.0),
            height: (canvas_h - 2.0 * (pad_y + band)).max(0.0),
        };

        let (title_band, status_band) = if request.has_captions() {
            (
                Some(Region { x: pad_x, y: pad_y, width: area.width, height: band }),
                Some(Region { x: pad_x, y: area.bottom(), width: area.width, height: band }),
            )
        } else {
            (None, None)
        };

        let total = request.total_units();
        let columns = match style.shape {
            ShapeMode::FixedColumns(columns) => columns.max(1),
            ShapeMode::AutoSquare { min_columns } => auto_columns(total, &area, min_columns),
        };
        let rows = total.div_ceil(columns);

        let cell_size = (area.width / columns as f32)
            .min(area.height / rows as f32)
            .max(0.0);
        let gap = cell_size * style.gap_fraction;
        let dot_size = (cell_size - gap).max(0.0);

        let grid_w = columns as f32 * cell_size;
        let grid_h = rows as f32 * cell_size;

        GridLayout {
            rows,
            columns,
            cell_size,
            gap,
            dot_size,
            offset_x: area.x + (area.width - grid_w) / 2.0,
            offset_y: area.y + (area.height - grid_h) / 2.0,
            area,
            title_band,
            status_band,
        }
    }

    pub fn grid_width(&self) -> f32 {
        self.columns as f32 * self.cell_size
    }

    pub fn grid_height(&self) -> f32 {
        self.rows as f32 * self.cell_size
    }

    pub fn capacity(&self) -> u64 {
        self.rows as u64 * self.columns as u64
    }

    /// Whether cells are drawn with rounded corners
    pub fn rounded(&self) -> bool {
        self.dot_size >= ROUNDED_MIN_DOT
    }

    /// Placement of one unit; row-major, left to right.
    pub fn place(&self, index: u32, elapsed: u32) -> CellPlacement {
        let row = index / self.columns;
        let column = index % self.columns;
        let half_gap = self.gap / 2.0;
        CellPlacement {
            index,
            row,
            column,
            x: self.offset_x + column as f32 * self.cell_size + half_gap,
            y: self.offset_y + row as f32 * self.cell_size + half_gap,
            size: self.dot_size,
            color: CellColor::classify(index, elapsed),
            rounded: self.rounded(),
        }
    }

    /// Every unit `0..total` exactly once.
    pub fn cells<'a>(
        &'a self,
        request: &CalendarRequest,
    ) -> impl Iterator<Item = CellPlacement> + 'a {
        let elapsed = request.elapsed_units();
        (0..request.total_units()).map(move |i| self.place(i, elapsed))
    }
}

/// Column count giving roughly square cells for `total` units in `area`.
/// Never more columns than units, unless the minimum asks for it.
fn auto_columns(total: u32, area: &Region, min_columns: u32) -> u32 {
    let aspect = if area.height > 0.0 { area.width / area.height } else { 1.0 };
    let ideal = (total as f32 * aspect).sqrt().round() as u32;
    ideal.max(min_columns).min(total.max(min_columns)).max(1)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calendar::request::CanvasSize;

    fn life(total: i64, elapsed: i64, w: i64, h: i64) -> (CalendarRequest, GridLayout) {
        let req = CalendarRequest::new(total, elapsed, CanvasSize::clamped(w, h));
        let layout = GridLayout::compute(&req, &CalendarStyle::LIFE);
        (req, layout)
    }

    #[test]
    fn test_weeks_of_life_shape() {
        let (_, layout) = life(90 * 52, 365, 1290, 2796);
        assert_eq!(layout.columns, 52);
        assert_eq!(layout.rows, 90);
        assert!(layout.title_band.is_none());
        // width-bound: (1290 - 2*103.2) / 52
        assert!((layout.cell_size - 1083.6 / 52.0).abs() < 1e-3);
        assert!((layout.gap - layout.cell_size * 0.15).abs() < 1e-4);
    }

    #[test]
    fn test_capacity_covers_all_units() {
        let canvases = [(100, 100), (1179, 2556), (5000, 100), (100, 5000), (2000, 2000)];
        for style in [CalendarStyle::LIFE, CalendarStyle::YEAR, CalendarStyle::GOAL] {
            for total in [1_i64, 6, 7, 30, 365, 366, 1000, 4680, 6240, 20_000] {
                for (w, h) in canvases {
                    let req = CalendarRequest::new(total, 0, CanvasSize::clamped(w, h));
                    let layout = GridLayout::compute(&req, &style);
                    assert!(layout.capacity() >= total as u64, "{total} in {w}x{h}");
                    // closed-form rows never leave a fully empty trailing row
                    assert!((layout.rows as u64 - 1) * (layout.columns as u64) < total as u64);
                }
            }
        }
    }

    #[test]
    fn test_grid_is_centred() {
        for (w, h) in [(1290, 2796), (2796, 1290), (100, 100), (640, 480)] {
            for style in [CalendarStyle::LIFE, CalendarStyle::YEAR] {
                let req = CalendarRequest::new(4680, 10, CanvasSize::clamped(w, h))
                    .with_caption("2026")
                    .with_sub_caption("78 days left");
                let layout = GridLayout::compute(&req, &style);
                let right = w as f32 - layout.offset_x - layout.grid_width();
                let bottom = h as f32 - layout.offset_y - layout.grid_height();
                assert!((layout.offset_x - right).abs() < layout.cell_size.max(1e-3));
                assert!((layout.offset_y - bottom).abs() < layout.cell_size.max(1e-3));
            }
        }
    }

    #[test]
    fn test_grid_fits_inside_area() {
        let req = CalendarRequest::new(365, 0, CanvasSize::clamped(1179, 2556)).with_caption("x");
        let layout = GridLayout::compute(&req, &CalendarStyle::YEAR);
        assert!(layout.offset_x >= layout.area.x - 1e-3);
        assert!(layout.offset_y >= layout.area.y - 1e-3);
        assert!(layout.offset_x + layout.grid_width() <= layout.area.right() + 1e-3);
        assert!(layout.offset_y + layout.grid_height() <= layout.area.bottom() + 1e-3);
    }

    #[test]
    fn test_auto_columns_minimum() {
        let req = CalendarRequest::new(3, 0, CanvasSize::clamped(1000, 1000));
        let layout = GridLayout::compute(&req, &CalendarStyle::GOAL);
        assert_eq!(layout.columns, 7);
        assert_eq!(layout.rows, 1);
    }

    #[test]
    fn test_wide_strip_does_not_outgrow_its_units() {
        let req = CalendarRequest::new(30, 0, CanvasSize::clamped(5000, 100)).with_caption("x");
        let layout = GridLayout::compute(&req, &CalendarStyle::GOAL);
        assert_eq!(layout.columns, 30);
        assert_eq!(layout.rows, 1);

        // drawn cells, not just the reserved grid, sit in the middle
        let first = layout.place(0, 0);
        let last = layout.place(29, 0);
        let left = first.x;
        let right = 5000.0 - (last.x + last.size);
        assert!((left - right).abs() < 1.0, "left {left} right {right}");
    }

    #[test]
    fn test_auto_columns_follow_aspect() {
        let tall = CalendarRequest::new(365, 0, CanvasSize::clamped(1179, 2556));
        let wide = CalendarRequest::new(365, 0, CanvasSize::clamped(2556, 1179));
        let tall = GridLayout::compute(&tall, &CalendarStyle::YEAR);
        let wide = GridLayout::compute(&wide, &CalendarStyle::YEAR);
        assert!(tall.columns < tall.rows);
        assert!(wide.columns > wide.rows);
    }

    #[test]
    fn test_cells_are_unique_and_do_not_overlap() {
        let (req, layout) = life(52 * 50, 100, 800, 1600);
        let cells: Vec<_> = layout.cells(&req).collect();
        assert_eq!(cells.len(), 52 * 50);
        for (i, c) in cells.iter().enumerate() {
            assert_eq!(c.index as usize, i);
        }
        // neighbours are exactly one pitch apart and the dot is smaller than the pitch
        let a = layout.place(0, 0);
        let b = layout.place(1, 0);
        let below = layout.place(52, 0);
        assert!((b.x - a.x - layout.cell_size).abs() < 1e-3);
        assert!((below.y - a.y - layout.cell_size).abs() < 1e-3);
        assert!(a.size < layout.cell_size);
    }

    #[test]
    fn test_lived_weeks_colouring() {
        let (req, layout) = life(4680, 365, 1290, 2796);
        let cells: Vec<_> = layout.cells(&req).collect();
        assert!(cells[..365].iter().all(|c| c.color == CellColor::Past));
        assert_eq!(cells[365].color, CellColor::Current);
        assert!(cells[366..].iter().all(|c| c.color == CellColor::Future));
    }

    #[test]
    fn test_colour_counts() {
        for elapsed in [0_i64, 1, 29, 30] {
            let (req, layout) = life(30, elapsed, 500, 500);
            let cells: Vec<_> = layout.cells(&req).collect();
            let past = cells.iter().filter(|c| c.color == CellColor::Past).count();
            let current = cells.iter().filter(|c| c.color == CellColor::Current).count();
            assert_eq!(past as i64, elapsed);
            assert_eq!(current, if elapsed < 30 { 1 } else { 0 });
        }
    }

    #[test]
    fn test_small_canvas_uses_plain_squares() {
        let (req, layout) = life(4680, 10, 100, 100);
        assert!(layout.dot_size < ROUNDED_MIN_DOT);
        assert!(layout.dot_size >= 0.0);
        assert!(layout.cells(&req).all(|c| !c.rounded));
    }

    #[test]
    fn test_large_cells_are_rounded() {
        let (req, layout) = life(52 * 50, 0, 2000, 2000);
        assert!(layout.dot_size >= ROUNDED_MIN_DOT);
        assert!(layout.cells(&req).all(|c| c.rounded));
    }

    #[test]
    fn test_layout_is_deterministic() {
        let (req, a) = life(4680, 1234, 1179, 2556);
        let b = GridLayout::compute(&req, &CalendarStyle::LIFE);
        assert_eq!(a, b);
        assert!(a.cells(&req).eq(b.cells(&req)));
    }

    #[test]
    fn test_caption_bands_are_symmetric() {
        let req = CalendarRequest::new(30, 9, CanvasSize::clamped(1000, 2000))
            .with_caption("Ship it");
        let layout = GridLayout::compute(&req, &CalendarStyle::GOAL);
        let title = layout.title_band.unwrap();
        let status = layout.status_band.unwrap();
        assert!((title.height - status.height).abs() < 1e-4);
        assert!((title.y - (2000.0 - status.bottom())).abs() < 1e-3);
        assert!(title.bottom() <= layout.area.y + 1e-3);
    }
}
