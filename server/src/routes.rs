//! Router assembly.
//!
//! SYSTEM CONTEXT
//! ==============
//! The dev server answers health checks, forwards the API prefix to the
//! backend when a proxy target is configured, and serves the built site for
//! every other path with an `index.html` fallback for client-side routes.

use axum::Router;
use axum::http::StatusCode;
use axum::routing::{any, get};
use tower_http::services::{ServeDir, ServeFile};
use tower_http::trace::TraceLayer;

use crate::config::ServerConfig;
use crate::proxy::{self, Proxy};

pub fn app(config: &ServerConfig, proxy: Option<Proxy>) -> Router {
    let index = config.site_root.join("index.html");
    let site = ServeDir::new(&config.site_root)
        .append_index_html_on_directories(true)
        .fallback(ServeFile::new(index));

    let mut router = Router::new().route("/healthz", get(healthz));
    if let Some(proxy) = proxy {
        router = router.merge(proxy_routes(proxy));
    }

    router.fallback_service(site).layer(TraceLayer::new_for_http())
}

fn proxy_routes(proxy: Proxy) -> Router {
    let prefix = proxy.config().prefix.clone();
    Router::new()
        .route(&prefix, any(proxy::forward))
        .route(&format!("{prefix}/{{*rest}}"), any(proxy::forward))
        .with_state(proxy)
}

async fn healthz() -> StatusCode {
    StatusCode::OK
}

#[cfg(test)]
#[path = "routes_test.rs"]
mod tests;
