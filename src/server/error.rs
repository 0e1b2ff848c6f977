/*
 *  server/error.rs
 *
 *  lifecal - life in little squares
 *  (c) 2020-26 Stuart Hunter
 *
 *  HTTP error responses
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

use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use log::{error, warn};
use thiserror::Error;

use crate::calendar::CalendarError;
use crate::render::RenderError;

/// What a request can fail with, as seen by the client.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Missing or malformed parameters
    #[error("{0}")]
    BadRequest(String),

    /// Anything else
    #[error("Error: {0}")]
    Internal(String),
}

impl ApiError {
    pub fn missing(name: &str) -> Self {
        ApiError::BadRequest(format!("Missing {name} parameter"))
    }

    pub fn invalid(name: &str, value: &str, reason: impl std::fmt::Display) -> Self {
        ApiError::BadRequest(format!("Invalid parameter: {name}={value:?} ({reason})"))
    }

    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<RenderError> for ApiError {
    fn from(err: RenderError) -> Self {
        ApiError::Internal(err.to_string())
    }
}

impl From<CalendarError> for ApiError {
    fn from(err: CalendarError) -> Self {
        ApiError::BadRequest(format!("Invalid parameter: {err}"))
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        match &self {
            ApiError::BadRequest(msg) => warn!("rejected request: {msg}"),
            ApiError::Internal(msg) => error!("request failed: {msg}"),
        }
        (
            status,
            [(header::CONTENT_TYPE, "text/plain; charset=utf-8")],
            self.to_string(),
        )
            .into_response()
    }
}
