/*
 *  calendar/request.rs
 *
 *  lifecal - life in little squares
 *  (c) 2020-26 Stuart Hunter
 *
 *  Normalised render input: unit counts, canvas and captions
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

use crate::constants::{
    DEFAULT_CANVAS_HEIGHT, DEFAULT_CANVAS_WIDTH, DEFAULT_TOTAL_UNITS, MAX_CANVAS_EDGE,
    MIN_CANVAS_EDGE,
};

/// Output image dimensions, always inside the accepted edge range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CanvasSize {
    width: u32,
    height: u32,
}

impl CanvasSize {
    /// Clamp both edges into `MIN_CANVAS_EDGE..=MAX_CANVAS_EDGE`.
    pub fn clamped(width: i64, height: i64) -> Self {
        let clamp = |v: i64| v.clamp(MIN_CANVAS_EDGE as i64, MAX_CANVAS_EDGE as i64) as u32;
        Self { width: clamp(width), height: clamp(height) }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }
}

impl Default for CanvasSize {
    fn default() -> Self {
        Self { width: DEFAULT_CANVAS_WIDTH, height: DEFAULT_CANVAS_HEIGHT }
    }
}

/// Everything the renderer needs for one image.
///
/// `total_units` is always positive and `elapsed_units` never exceeds it; the
/// constructor enforces both so layout code can rely on them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CalendarRequest {
    total_units: u32,
    elapsed_units: u32,
    pub canvas: CanvasSize,
    pub caption: Option<String>,
    pub sub_caption: Option<String>,
}

impl CalendarRequest {
    pub fn new(total_units: i64, elapsed_units: i64, canvas: CanvasSize) -> Self {
        let total_units = if total_units <= 0 {
            DEFAULT_TOTAL_UNITS
        } else {
            u32::try_from(total_units).unwrap_or(u32::MAX)
        };
        let elapsed_units = elapsed_units.clamp(0, total_units as i64) as u32;
        Self {
            total_units,
            elapsed_units,
            canvas,
            caption: None,
            sub_caption: None,
        }
    }

    pub fn with_caption(mut self, caption: impl Into<String>) -> Self {
        self.caption = Some(caption.into());
        self
    }

    pub fn with_sub_caption(mut self, sub_caption: impl Into<String>) -> Self {
        self.sub_caption = Some(sub_caption.into());
        self
    }

    pub fn total_units(&self) -> u32 {
        self.total_units
    }

    pub fn elapsed_units(&self) -> u32 {
        self.elapsed_units
    }

    pub fn remaining_units(&self) -> u32 {
        self.total_units - self.elapsed_units
    }

    pub fn has_captions(&self) -> bool {
        self.caption.is_some() || self.sub_caption.is_some()
    }
}
