/*
 *  calendar/palette.rs
 *
 *  lifecal - life in little squares
 *  (c) 2020-26 Stuart Hunter
 *
 *  Cell colouring and per-variant palettes
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

use std::fmt;
use std::str::FromStr;

use embedded_graphics::pixelcolor::Rgb888;
use thiserror::Error;

/// A fully opaque 8-bit RGB colour.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Convert for the tiny-skia raster surface
    pub fn to_skia(self) -> tiny_skia::Color {
        tiny_skia::Color::from_rgba8(self.r, self.g, self.b, 255)
    }

    /// Convert for embedded-graphics draw targets (bitmap font path)
    pub fn to_rgb888(self) -> Rgb888 {
        Rgb888::new(self.r, self.g, self.b)
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid colour '{0}', expected #rrggbb")]
pub struct ParseColorError(pub String);

impl FromStr for Rgb {
    type Err = ParseColorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let hex = s.trim().strip_prefix('#').unwrap_or(s.trim());
        if hex.len() != 6 || !hex.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(ParseColorError(s.to_string()));
        }
        let channel = |i: usize| {
            u8::from_str_radix(&hex[i..i + 2], 16).map_err(|_| ParseColorError(s.to_string()))
        };
        Ok(Rgb::new(channel(0)?, channel(2)?, channel(4)?))
    }
}

/// Which of the three states a unit cell is in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CellColor {
    Past,
    Current,
    Future,
}

impl CellColor {
    /// Pure function of the unit index against the elapsed count.
    pub fn classify(index: u32, elapsed: u32) -> Self {
        match index.cmp(&elapsed) {
            std::cmp::Ordering::Less => CellColor::Past,
            std::cmp::Ordering::Equal => CellColor::Current,
            std::cmp::Ordering::Greater => CellColor::Future,
        }
    }
}

/// Colours for one calendar variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    pub background: Rgb,
    pub past: Rgb,
    pub current: Rgb,
    pub future: Rgb,
    pub text: Rgb,
}

impl Palette {
    const BACKGROUND: Rgb = Rgb::new(0x1a, 0x1a, 0x1a);
    const LIVED: Rgb = Rgb::new(0xff, 0xff, 0xff);
    const AHEAD: Rgb = Rgb::new(0x33, 0x33, 0x33);
    const GREEN: Rgb = Rgb::new(0x4c, 0xaf, 0x50);
    const ORANGE: Rgb = Rgb::new(0xff, 0x95, 0x00);

    pub const LIFE: Palette = Palette {
        background: Self::BACKGROUND,
        past: Self::LIVED,
        current: Self::GREEN,
        future: Self::AHEAD,
        text: Self::LIVED,
    };

    pub const YEAR: Palette = Palette {
        current: Self::ORANGE,
        ..Self::LIFE
    };

    pub const GOAL: Palette = Self::LIFE;

    pub fn cell(&self, color: CellColor) -> Rgb {
        match color {
            CellColor::Past => self.past,
            CellColor::Current => self.current,
            CellColor::Future => self.future,
        }
    }
}

/// Operator-supplied replacements, applied on top of every variant's palette.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PaletteOverride {
    pub background: Option<Rgb>,
    pub past: Option<Rgb>,
    pub current: Option<Rgb>,
    pub future: Option<Rgb>,
    pub text: Option<Rgb>,
}

impl PaletteOverride {
    pub fn apply(&self, base: Palette) -> Palette {
        Palette {
            background: self.background.unwrap_or(base.background),
            past: self.past.unwrap_or(base.past),
            current: self.current.unwrap_or(base.current),
            future: self.future.unwrap_or(base.future),
            text: self.text.unwrap_or(base.text),
        }
    }
}
