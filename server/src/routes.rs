//! Router assembly.
//!
//! SYSTEM CONTEXT
//! ==============
//! Binds `/api/*` (proxy or demo backend), the health check, the Leptos SSR
//! routes and the `/pkg` static assets under a single Axum router.

#[cfg(test)]
#[path = "routes_test.rs"]
mod routes_test;

use std::path::PathBuf;

use axum::Router;
use axum::http::StatusCode;
use axum::routing::{any, get};
use leptos::prelude::*;
use leptos_axum::{LeptosRoutes, generate_route_list};
use tower_http::compression::CompressionLayer;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

use crate::config::ServerConfig;
use crate::demo;
use crate::proxy::{self, ProxyError, Upstream};

/// `/api/*` plus `/healthz`, without the SSR frontend.
///
/// # Errors
///
/// Returns an error if the upstream HTTP client cannot be built.
pub fn api_routes(config: &ServerConfig) -> Result<Router, ProxyError> {
    let api = match &config.upstream {
        Some(base) => {
            let upstream = Upstream::new(base, config.proxy_timeout)?;
            Router::new().route("/api/{*path}", any(proxy::forward)).with_state(upstream)
        }
        None => demo::router(),
    };
    Ok(api.route("/healthz", get(healthz)))
}

/// API routes + Leptos SSR + static assets.
///
/// # Errors
///
/// Returns an error if the Leptos configuration cannot be loaded or the
/// upstream client cannot be built.
pub fn app(config: &ServerConfig) -> Result<Router, String> {
    let conf = get_configuration(None).map_err(|e| format!("leptos configuration: {e}"))?;
    let leptos_options = conf.leptos_options;
    let routes = generate_route_list(console::app::App);

    let leptos_router = Router::new()
        .leptos_routes(&leptos_options, routes, {
            let opts = leptos_options.clone();
            move || console::app::shell(opts.clone())
        })
        .with_state(leptos_options.clone());

    let site_root_path = PathBuf::from(leptos_options.site_root.as_ref());

    Ok(api_routes(config)
        .map_err(|e| e.to_string())?
        .merge(leptos_router)
        .nest_service("/pkg", ServeDir::new(site_root_path.join("pkg")))
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http()))
}

async fn healthz() -> StatusCode {
    StatusCode::OK
}
