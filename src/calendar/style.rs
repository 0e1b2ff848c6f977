use super::palette::Palette;
use crate::constants::{
    CACHE_CONTROL_CACHEABLE, CACHE_CONTROL_NO_CACHE, MIN_AUTO_COLUMNS, WEEKS_PER_YEAR,
};

/// How the number of columns is chosen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShapeMode {
    /// Fixed column count; rows follow from the unit count (weeks-of-life view).
    FixedColumns(u32),
    /// Near-square cells filling the drawing area, never fewer than `min_columns`.
    AutoSquare { min_columns: u32 },
}

impl ShapeMode {
    pub const WEEKS_OF_LIFE: ShapeMode = ShapeMode::FixedColumns(WEEKS_PER_YEAR);
    pub const AUTO: ShapeMode = ShapeMode::AutoSquare { min_columns: MIN_AUTO_COLUMNS };
}

/// Whether a rendered image may be cached downstream.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cacheability {
    Cacheable,
    NoCache,
}

impl Cacheability {
    pub fn header_value(self) -> &'static str {
        match self {
            Cacheability::Cacheable => CACHE_CONTROL_CACHEABLE,
            Cacheability::NoCache => CACHE_CONTROL_NO_CACHE,
        }
    }
}

/// Per-variant rendering parameters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CalendarStyle {
    pub shape: ShapeMode,
    pub palette: Palette,
    /// Inter-cell gap as a fraction of the cell size
    pub gap_fraction: f32,
    pub cacheability: Cacheability,
}

impl CalendarStyle {
    pub const LIFE: CalendarStyle = CalendarStyle {
        shape: ShapeMode::WEEKS_OF_LIFE,
        palette: Palette::LIFE,
        gap_fraction: 0.15,
        cacheability: Cacheability::Cacheable,
    };

    pub const YEAR: CalendarStyle = CalendarStyle {
        shape: ShapeMode::AUTO,
        palette: Palette::YEAR,
        gap_fraction: 0.12,
        cacheability: Cacheability::NoCache,
    };

    pub const GOAL: CalendarStyle = CalendarStyle {
        shape: ShapeMode::AUTO,
        palette: Palette::GOAL,
        gap_fraction: 0.10,
        cacheability: Cacheability::NoCache,
    };
}
