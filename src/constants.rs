//! This module contains global constants used across the calendar, renderer and server.

/// Smallest canvas edge accepted from a request, in pixels.
pub const MIN_CANVAS_EDGE: u32 = 100;
/// Largest canvas edge accepted from a request, in pixels.
pub const MAX_CANVAS_EDGE: u32 = 5000;
/// Default canvas width (iPhone 15 Pro Max wallpaper).
pub const DEFAULT_CANVAS_WIDTH: u32 = 1290;
/// Default canvas height (iPhone 15 Pro Max wallpaper).
pub const DEFAULT_CANVAS_HEIGHT: u32 = 2796;

/// Lifespan bounds for the weeks-of-life view, in years.
pub const MIN_LIFESPAN_YEARS: u32 = 50;
pub const MAX_LIFESPAN_YEARS: u32 = 120;
pub const DEFAULT_LIFESPAN_YEARS: u32 = 90;

/// One row of the life grid.
pub const WEEKS_PER_YEAR: u32 = 52;
pub const DAYS_PER_WEEK: i64 = 7;

/// Substituted whenever a computed unit count is not positive.
pub const DEFAULT_TOTAL_UNITS: u32 = 30;
/// Auto-shaped grids never get narrower than a week.
pub const MIN_AUTO_COLUMNS: u32 = 7;

/// Horizontal margin, as a fraction of canvas width, on each side.
pub const PADDING_X_FRACTION: f32 = 0.08;
/// Vertical margin, as a fraction of canvas height, top and bottom.
pub const PADDING_Y_FRACTION: f32 = 0.06;
/// Caption band reserved above and below the grid, as a fraction of canvas height.
pub const CAPTION_BAND_FRACTION: f32 = 0.07;

/// Below this dot size a rounded corner is not worth drawing.
pub const ROUNDED_MIN_DOT: f32 = 4.0;
/// Corner radius as a fraction of the dot size.
pub const CORNER_RADIUS_FRACTION: f32 = 0.2;

/// Title glyph height as a fraction of canvas height / width (smaller wins).
pub const TITLE_HEIGHT_FRACTION: f32 = 0.03;
pub const TITLE_WIDTH_FRACTION: f32 = 0.07;
/// Status line size relative to the title.
pub const STATUS_SCALE: f32 = 0.6;
/// Captions are never shrunk below this pixel size to fit.
pub const MIN_CAPTION_PX: f32 = 8.0;

/// Longest goal span, in days, that will be laid out.
pub const MAX_GOAL_SPAN_DAYS: i64 = 100_000;

/// Goal names longer than this are truncated.
pub const MAX_GOAL_NAME_CHARS: usize = 64;
pub const DEFAULT_GOAL_NAME: &str = "My Goal";

/// Wire format for every date parameter.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

pub const CACHE_CONTROL_CACHEABLE: &str = "public, max-age=86400";
pub const CACHE_CONTROL_NO_CACHE: &str = "no-cache, no-store, must-revalidate";
