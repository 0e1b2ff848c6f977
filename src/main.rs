/*
 *  main.rs
 *
 *  lifecal - life in little squares
 *  (c) 2020-26 Stuart Hunter
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

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use env_logger::Env;
use log::info;
use tokio::net::TcpListener;

use lifecal::calendar::LocalToday;
use lifecal::config;
use lifecal::render::{FontBook, SYSTEM_FONT_PATHS};
use lifecal::server::{self, AppState, RenderCache};

include!(concat!(env!("OUT_DIR"), "/build_info.rs"));

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cfg = config::load().context("loading configuration")?;

    env_logger::Builder::from_env(Env::default().default_filter_or(cfg.log_level()))
        .format_timestamp_secs()
        .init();

    info!("{} - life in little squares", env!("CARGO_PKG_NAME"));
    info!("v.{} built {} ({})", env!("CARGO_PKG_VERSION"), BUILD_DATE, BUILD_PROFILE);

    let candidates: Vec<PathBuf> = cfg
        .render
        .font_paths
        .iter()
        .cloned()
        .chain(SYSTEM_FONT_PATHS.iter().map(PathBuf::from))
        .collect();
    let fonts = FontBook::resolve(candidates.as_slice());
    info!("Caption font: {}", fonts.describe());

    let cache = RenderCache::new(cfg.cache_capacity(), cfg.cache_ttl());
    if cache.is_enabled() {
        info!("Render cache: {} entries, ttl {:?}", cfg.cache_capacity(), cfg.cache_ttl());
    } else {
        info!("Render cache disabled");
    }

    let state = AppState::new(fonts, Arc::new(LocalToday))
        .with_palette(cfg.palette_override()?)
        .with_cache(cache);

    let addr = cfg.bind_address();
    let listener = TcpListener::bind(&addr)
        .await
        .with_context(|| format!("binding {addr}"))?;

    server::serve(listener, state).await.context("serving HTTP")?;
    info!("Shutdown complete");
    Ok(())
}
