//! Proxy error type and its HTTP mapping.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

#[derive(Debug, thiserror::Error)]
pub enum ProxyError {
    #[error("failed to build upstream client: {0}")]
    Client(#[source] reqwest::Error),
    #[error("failed to build upstream tls config: {0}")]
    Tls(#[source] rustls::Error),
    #[error("upstream request failed: {0}")]
    Upstream(#[from] reqwest::Error),
    #[error("upstream websocket failed: {0}")]
    WebSocket(#[from] tokio_tungstenite::tungstenite::Error),
}

impl IntoResponse for ProxyError {
    fn into_response(self) -> Response {
        let status = match self {
            ProxyError::Client(_) | ProxyError::Tls(_) => StatusCode::INTERNAL_SERVER_ERROR,
            ProxyError::Upstream(_) | ProxyError::WebSocket(_) => StatusCode::BAD_GATEWAY,
        };
        (status, self.to_string()).into_response()
    }
}
