/*
 *  server/mod.rs
 *
 *  lifecal - life in little squares
 *  (c) 2020-26 Stuart Hunter
 *
 *  HTTP surface: shared state, routing and graceful shutdown
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

pub mod cache;
pub mod error;
pub mod handlers;
pub mod query;

use std::sync::Arc;

use axum::routing::get;
use axum::Router;
use log::{error, info};
use tokio::net::TcpListener;

pub use cache::RenderCache;
pub use error::ApiError;
pub use query::GenerateParams;

use crate::calendar::{PaletteOverride, Today};
use crate::render::FontBook;

/// Everything a handler needs. Cheap to clone.
#[derive(Clone)]
pub struct AppState {
    pub fonts: Arc<FontBook>,
    pub today: Arc<dyn Today>,
    pub palette: PaletteOverride,
    pub cache: RenderCache,
}

impl AppState {
    pub fn new(fonts: FontBook, today: Arc<dyn Today>) -> Self {
        Self {
            fonts: Arc::new(fonts),
            today,
            palette: PaletteOverride::default(),
            cache: RenderCache::disabled(),
        }
    }

    pub fn with_palette(mut self, palette: PaletteOverride) -> Self {
        self.palette = palette;
        self
    }

    pub fn with_cache(mut self, cache: RenderCache) -> Self {
        self.cache = cache;
        self
    }
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/api/generate", get(handlers::generate))
        .route("/generate", get(handlers::generate_legacy))
        .route("/health", get(handlers::health))
        .with_state(state)
}

/// Serve until SIGINT or SIGTERM, then let in-flight requests finish.
pub async fn serve(listener: TcpListener, state: AppState) -> std::io::Result<()> {
    if let Ok(addr) = listener.local_addr() {
        info!("Listening on http://{addr}");
    }
    axum::serve(listener, router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await
}

#[cfg(unix)]
async fn shutdown_signal() {
    use tokio::signal::unix::{signal, SignalKind};

    let handlers = (signal(SignalKind::interrupt()), signal(SignalKind::terminate()));
    let (mut sigint, mut sigterm) = match handlers {
        (Ok(i), Ok(t)) => (i, t),
        (Err(e), _) | (_, Err(e)) => {
            error!("Unable to install signal handlers: {e}");
            return std::future::pending().await;
        }
    };

    tokio::select! {
        _ = sigint.recv() => {
            info!("SIGINT received. Initiating graceful shutdown.");
        }
        _ = sigterm.recv() => {
            info!("SIGTERM received. Initiating graceful shutdown.");
        }
    }
}

#[cfg(not(unix))]
async fn shutdown_signal() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => info!("Ctrl-C received. Initiating graceful shutdown."),
        Err(e) => {
            error!("Unable to listen for Ctrl-C: {e}");
            std::future::pending::<()>().await
        }
    }
}
