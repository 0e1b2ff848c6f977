/*
 *  calendar/variant.rs
 *
 *  lifecal - life in little squares
 *  (c) 2020-26 Stuart Hunter
 *
 *  Life, year and goal calendars: date arithmetic into unit counts
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

use chrono::{Datelike, NaiveDate};
use thiserror::Error;

use super::palette::PaletteOverride;
use super::request::{CalendarRequest, CanvasSize};
use super::style::CalendarStyle;
use crate::constants::{DATE_FORMAT, DAYS_PER_WEEK, MAX_GOAL_SPAN_DAYS, WEEKS_PER_YEAR};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CalendarError {
    #[error("goal spans {days} days, at most {max} are supported")]
    SpanTooLong { days: i64, max: i64 },
    #[error("year {0} is outside the supported calendar")]
    YearOutOfRange(i32),
}

/// Which calendar to draw, with the inputs it needs.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum CalendarKind {
    /// Weeks lived out of an expected lifespan
    Life { birth: NaiveDate, lifespan_years: u32 },
    /// Days of the current year
    Year,
    /// Days from `start` towards `deadline`
    Goal { name: String, start: NaiveDate, deadline: NaiveDate },
}

impl CalendarKind {
    pub fn name(&self) -> &'static str {
        match self {
            CalendarKind::Life { .. } => "life",
            CalendarKind::Year => "year",
            CalendarKind::Goal { .. } => "goal",
        }
    }

    pub fn style(&self) -> CalendarStyle {
        match self {
            CalendarKind::Life { .. } => CalendarStyle::LIFE,
            CalendarKind::Year => CalendarStyle::YEAR,
            CalendarKind::Goal { .. } => CalendarStyle::GOAL,
        }
    }

    /// Total and elapsed units relative to `today`, before normalisation.
    pub fn units(&self, today: NaiveDate) -> Result<(i64, i64), CalendarError> {
        match self {
            CalendarKind::Life { birth, lifespan_years } => {
                let lived_days = (today - *birth).num_days();
                let lived_weeks = lived_days.div_euclid(DAYS_PER_WEEK);
                Ok((*lifespan_years as i64 * WEEKS_PER_YEAR as i64, lived_weeks))
            }
            CalendarKind::Year => {
                let year = today.year();
                let total = days_in_year(year)?;
                Ok((total, today.ordinal0() as i64))
            }
            CalendarKind::Goal { start, deadline, .. } => {
                let total = (*deadline - *start).num_days();
                if total > MAX_GOAL_SPAN_DAYS {
                    return Err(CalendarError::SpanTooLong { days: total, max: MAX_GOAL_SPAN_DAYS });
                }
                Ok((total, (today - *start).num_days()))
            }
        }
    }

    /// Stem for the `Content-Disposition` file name.
    pub fn file_stem(&self, today: NaiveDate) -> String {
        match self {
            CalendarKind::Life { birth, .. } => {
                format!("life-calendar-{}", birth.format(DATE_FORMAT))
            }
            CalendarKind::Year => format!("year-calendar-{}", today.year()),
            CalendarKind::Goal { deadline, .. } => {
                format!("goal-calendar-{}", deadline.format(DATE_FORMAT))
            }
        }
    }
}

/// A validated calendar request as it arrives from the outside world.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CalendarQuery {
    pub kind: CalendarKind,
    pub canvas: CanvasSize,
}

impl CalendarQuery {
    pub fn new(kind: CalendarKind, canvas: CanvasSize) -> Self {
        Self { kind, canvas }
    }

    /// Resolve against `today` into the renderer's input.
    pub fn to_request(&self, today: NaiveDate) -> Result<CalendarRequest, CalendarError> {
        let (total, elapsed) = self.kind.units(today)?;
        let request = CalendarRequest::new(total, elapsed, self.canvas);
        let left = days_left(request.remaining_units());

        Ok(match &self.kind {
            CalendarKind::Life { .. } => request,
            CalendarKind::Year => request
                .with_caption(today.year().to_string())
                .with_sub_caption(left),
            CalendarKind::Goal { name, .. } => request
                .with_caption(name.clone())
                .with_sub_caption(left),
        })
    }

    pub fn style(&self, overrides: &PaletteOverride) -> CalendarStyle {
        let mut style = self.kind.style();
        style.palette = overrides.apply(style.palette);
        style
    }
}

fn days_in_year(year: i32) -> Result<i64, CalendarError> {
    let start = NaiveDate::from_ymd_opt(year, 1, 1).ok_or(CalendarError::YearOutOfRange(year))?;
    let end = NaiveDate::from_ymd_opt(year + 1, 1, 1).ok_or(CalendarError::YearOutOfRange(year))?;
    Ok((end - start).num_days())
}

fn days_left(n: u32) -> String {
    if n == 1 {
        "1 day left".to_string()
    } else {
        format!("{n} days left")
    }
}
