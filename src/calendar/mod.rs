/*
 *  calendar/mod.rs
 *
 *  lifecal - life in little squares
 *  (c) 2020-26 Stuart Hunter
 *
 *  Calendar domain: variants, normalised requests and grid geometry
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

pub mod layout;
pub mod palette;
pub mod request;
pub mod style;
pub mod today;
pub mod variant;

pub use layout::{CellPlacement, GridLayout, Region};
pub use palette::{CellColor, ParseColorError, Palette, PaletteOverride, Rgb};
pub use request::{CalendarRequest, CanvasSize};
pub use style::{Cacheability, CalendarStyle, ShapeMode};
pub use today::{FixedToday, LocalToday, Today};
pub use variant::{CalendarError, CalendarKind, CalendarQuery};
