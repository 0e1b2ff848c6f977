/*
 *  server/handlers.rs
 *
 *  lifecal - life in little squares
 *  (c) 2020-26 Stuart Hunter
 *
 *  Route handlers
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

use std::sync::Arc;
use std::time::Instant;

use axum::body::Bytes;
use axum::extract::{Query, State};
use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use log::debug;

use super::error::ApiError;
use super::query::GenerateParams;
use super::AppState;
use crate::calendar::{Cacheability, CalendarQuery};
use crate::render::render_png;

/// `GET /api/generate`
pub async fn generate(
    State(state): State<AppState>,
    Query(params): Query<GenerateParams>,
) -> Result<Response, ApiError> {
    let query = params.into_query()?;
    respond(&state, query).await
}

/// `GET /generate`, life calendar only.
pub async fn generate_legacy(
    State(state): State<AppState>,
    Query(params): Query<GenerateParams>,
) -> Result<Response, ApiError> {
    let query = params.into_life_query()?;
    respond(&state, query).await
}

pub async fn health() -> &'static str {
    "ok"
}

async fn respond(state: &AppState, query: CalendarQuery) -> Result<Response, ApiError> {
    let today = state.today.today();
    let style = query.style(&state.palette);
    let cacheability = style.cacheability;
    let filename = format!("{}.png", query.kind.file_stem(today));

    debug!(
        "{} calendar {}x{} for {}",
        query.kind.name(),
        query.canvas.width(),
        query.canvas.height(),
        today
    );

    let key = (query, today);
    if let Some(png) = state.cache.get(&key) {
        debug!("cache hit for {filename}");
        return Ok(png_response(png, &filename, cacheability));
    }

    let request = key.0.to_request(today)?;
    let fonts = Arc::clone(&state.fonts);
    let started = Instant::now();
    let png = tokio::task::spawn_blocking(move || render_png(&request, &style, &fonts))
        .await
        .map_err(|e| ApiError::Internal(format!("render task failed: {e}")))??;
    debug!("rendered {filename} ({} bytes) in {:?}", png.len(), started.elapsed());

    let png = Bytes::from(png);
    state.cache.insert(key, png.clone());
    Ok(png_response(png, &filename, cacheability))
}

fn png_response(png: Bytes, filename: &str, cacheability: Cacheability) -> Response {
    (
        StatusCode::OK,
        [
            (header::CONTENT_TYPE, "image/png".to_string()),
            (header::CONTENT_DISPOSITION, format!("inline; filename={filename}")),
            (header::CACHE_CONTROL, cacheability.header_value().to_string()),
        ],
        png,
    )
        .into_response()
}
