/*
 *  server/query.rs
 *
 *  lifecal - life in little squares
 *  (c) 2020-26 Stuart Hunter
 *
 *  Query-string parsing, defaults and range clamping
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

use chrono::NaiveDate;
use serde::Deserialize;

use super::error::ApiError;
use crate::calendar::{CalendarKind, CalendarQuery, CanvasSize};
use crate::constants::{
    DATE_FORMAT, DEFAULT_CANVAS_HEIGHT, DEFAULT_CANVAS_WIDTH, DEFAULT_GOAL_NAME,
    DEFAULT_LIFESPAN_YEARS, MAX_GOAL_NAME_CHARS, MAX_LIFESPAN_YEARS, MIN_LIFESPAN_YEARS,
};

/// Raw query parameters. Everything arrives as text so that parse failures
/// produce our own 400 message rather than the extractor's.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct GenerateParams {
    #[serde(rename = "type")]
    pub kind: Option<String>,
    pub birth: Option<String>,
    pub lifespan: Option<String>,
    pub goal: Option<String>,
    pub start: Option<String>,
    pub deadline: Option<String>,
    pub w: Option<String>,
    pub h: Option<String>,
}

impl GenerateParams {
    /// Validate into a calendar query. `type` defaults to `life`.
    pub fn into_query(self) -> Result<CalendarQuery, ApiError> {
        let canvas = CanvasSize::clamped(
            int_or(&self.w, "w", DEFAULT_CANVAS_WIDTH as i64)?,
            int_or(&self.h, "h", DEFAULT_CANVAS_HEIGHT as i64)?,
        );

        let kind = match present(&self.kind).unwrap_or("life") {
            "life" => CalendarKind::Life {
                birth: required_date(&self.birth, "birth")?,
                lifespan_years: int_or(&self.lifespan, "lifespan", DEFAULT_LIFESPAN_YEARS as i64)?
                    .clamp(MIN_LIFESPAN_YEARS as i64, MAX_LIFESPAN_YEARS as i64)
                    as u32,
            },
            "year" => CalendarKind::Year,
            "goal" => CalendarKind::Goal {
                name: goal_name(self.goal.as_deref()),
                start: required_date(&self.start, "start")?,
                deadline: required_date(&self.deadline, "deadline")?,
            },
            other => return Err(ApiError::invalid("type", other, "expected life, year or goal")),
        };

        Ok(CalendarQuery::new(kind, canvas))
    }

    /// Legacy `/generate` route: always the life calendar.
    pub fn into_life_query(mut self) -> Result<CalendarQuery, ApiError> {
        self.kind = Some("life".to_string());
        self.into_query()
    }
}

/// Treat empty strings like absent parameters (HTML forms send `?w=`).
fn present(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|s| !s.is_empty())
}

fn int_or(value: &Option<String>, name: &str, default: i64) -> Result<i64, ApiError> {
    match present(value) {
        None => Ok(default),
        Some(s) => s.parse::<i64>().map_err(|e| ApiError::invalid(name, s, e)),
    }
}

fn required_date(value: &Option<String>, name: &str) -> Result<NaiveDate, ApiError> {
    let s = present(value).ok_or_else(|| ApiError::missing(name))?;
    NaiveDate::parse_from_str(s, DATE_FORMAT).map_err(|e| ApiError::invalid(name, s, e))
}

fn goal_name(raw: Option<&str>) -> String {
    let name = raw.map(str::trim).filter(|s| !s.is_empty()).unwrap_or(DEFAULT_GOAL_NAME);
    name.chars().take(MAX_GOAL_NAME_CHARS).collect()
}
