//! Reverse proxy for backend API traffic.
//!
//! DESIGN
//! ======
//! Requests under the configured prefix are forwarded with their full path
//! and query to the target origin. Bodies stream in both directions; only
//! hop-by-hop headers are dropped. WebSocket upgrades are bridged to an
//! upstream socket opened before the client upgrade completes, so a dead
//! backend answers `502` instead of an upgraded-then-closed socket.

use std::sync::Arc;

use axum::body::Body;
use axum::extract::ws::{CloseFrame, Message, WebSocket, WebSocketUpgrade};
use axum::extract::{FromRequestParts, Request, State};
use axum::http::header::{self, HeaderMap, HeaderName};
use axum::http::request::Parts;
use axum::response::{IntoResponse, Response};
use futures::{SinkExt, StreamExt};
use reqwest::Url;
use tokio::net::TcpStream;
use tokio_tungstenite::tungstenite::client::IntoClientRequest;
use tokio_tungstenite::tungstenite::protocol::{CloseFrame as UpstreamCloseFrame, Message as UpstreamMessage};
use tokio_tungstenite::{Connector, MaybeTlsStream, WebSocketStream};
use tracing::{debug, warn};

use crate::config::ProxyConfig;
use crate::error::ProxyError;
use crate::tls;

type UpstreamSocket = WebSocketStream<MaybeTlsStream<TcpStream>>;

/// Headers meaningful only for a single connection hop.
static HOP_BY_HOP: [HeaderName; 8] = [
    header::CONNECTION,
    HeaderName::from_static("keep-alive"),
    header::PROXY_AUTHENTICATE,
    header::PROXY_AUTHORIZATION,
    header::TE,
    header::TRAILER,
    header::TRANSFER_ENCODING,
    header::UPGRADE,
];

/// Headers copied onto the upstream WebSocket handshake.
static WS_FORWARDED: [HeaderName; 2] = [header::COOKIE, header::AUTHORIZATION];

/// Shared proxy handle; cheap to clone into handlers.
#[derive(Clone)]
pub struct Proxy {
    client: reqwest::Client,
    /// Set when upstream certificates are not verified; `None` uses webpki roots.
    ws_tls: Option<Arc<rustls::ClientConfig>>,
    config: Arc<ProxyConfig>,
}

impl Proxy {
    /// Build the upstream HTTP and WebSocket clients. Certificate checks are
    /// skipped for both unless `config.secure` is set.
    ///
    /// # Errors
    ///
    /// Returns `ProxyError::Client` or `ProxyError::Tls` if a TLS backend
    /// cannot be initialized.
    pub fn new(config: ProxyConfig) -> Result<Self, ProxyError> {
        let client = reqwest::Client::builder()
            .danger_accept_invalid_certs(!config.secure)
            .redirect(reqwest::redirect::Policy::none())
            .build()
            .map_err(ProxyError::Client)?;
        let ws_tls = if config.secure {
            None
        } else {
            Some(Arc::new(tls::accept_any_cert_config().map_err(ProxyError::Tls)?))
        };
        Ok(Self { client, ws_tls, config: Arc::new(config) })
    }

    pub fn config(&self) -> &ProxyConfig {
        &self.config
    }

    async fn forward_http(&self, parts: Parts, body: Body) -> Result<Response, ProxyError> {
        let url = upstream_url(&self.config.target, path_and_query(&parts));
        let mut headers = strip_hop_by_hop(&parts.headers);
        if self.config.change_origin {
            // reqwest fills Host from the target URL.
            headers.remove(header::HOST);
        }

        let upstream = self
            .client
            .request(parts.method, url)
            .headers(headers)
            .body(reqwest::Body::wrap_stream(body.into_data_stream()))
            .send()
            .await?;

        let status = upstream.status();
        let headers = strip_hop_by_hop(upstream.headers());
        let mut response = Response::new(Body::from_stream(upstream.bytes_stream()));
        *response.status_mut() = status;
        *response.headers_mut() = headers;
        Ok(response)
    }

    async fn connect_upstream_ws(&self, parts: &Parts) -> Result<UpstreamSocket, ProxyError> {
        let url = websocket_url(&self.config.target, path_and_query(parts));
        let mut request = url.into_client_request()?;
        for name in &WS_FORWARDED {
            if let Some(value) = parts.headers.get(name) {
                request.headers_mut().insert(name.clone(), value.clone());
            }
        }
        if !self.config.change_origin {
            if let Some(host) = parts.headers.get(header::HOST) {
                request.headers_mut().insert(header::HOST, host.clone());
            }
        }
        let connector = self.ws_tls.clone().map(Connector::Rustls);
        let (socket, _) = tokio_tungstenite::connect_async_tls_with_config(request, None, false, connector).await?;
        Ok(socket)
    }
}

/// Axum handler forwarding any method under the proxy prefix.
pub async fn forward(State(proxy): State<Proxy>, req: Request) -> Response {
    let (mut parts, body) = req.into_parts();

    if proxy.config.ws && is_websocket_upgrade(&parts.headers) {
        let upgrade = match WebSocketUpgrade::from_request_parts(&mut parts, &proxy).await {
            Ok(upgrade) => upgrade,
            Err(rejection) => return rejection.into_response(),
        };
        return match proxy.connect_upstream_ws(&parts).await {
            Ok(upstream) => {
                debug!(path = %parts.uri.path(), "proxy: websocket tunnel opened");
                upgrade.on_upgrade(move |socket| tunnel(socket, upstream))
            }
            Err(e) => {
                warn!(error = %e, path = %parts.uri.path(), "proxy: websocket upstream failed");
                e.into_response()
            }
        };
    }

    let method = parts.method.clone();
    let path = parts.uri.path().to_owned();
    match proxy.forward_http(parts, body).await {
        Ok(response) => {
            debug!(%method, %path, status = %response.status(), "proxy: forwarded");
            response
        }
        Err(e) => {
            warn!(error = %e, %method, %path, "proxy: upstream request failed");
            e.into_response()
        }
    }
}

async fn tunnel(mut client: WebSocket, upstream: UpstreamSocket) {
    let (mut upstream_tx, mut upstream_rx) = upstream.split();
    loop {
        tokio::select! {
            msg = client.recv() => {
                let Some(Ok(msg)) = msg else { break };
                let closing = matches!(msg, Message::Close(_));
                if upstream_tx.send(to_upstream(msg)).await.is_err() || closing {
                    break;
                }
            }
            msg = upstream_rx.next() => {
                let Some(Ok(msg)) = msg else { break };
                let Some(msg) = to_client(msg) else { continue };
                let closing = matches!(msg, Message::Close(_));
                if client.send(msg).await.is_err() || closing {
                    break;
                }
            }
        }
    }
    debug!("proxy: websocket tunnel closed");
}

fn to_upstream(msg: Message) -> UpstreamMessage {
    match msg {
        Message::Text(text) => UpstreamMessage::text(text.as_str().to_owned()),
        Message::Binary(bytes) => UpstreamMessage::Binary(bytes),
        Message::Ping(bytes) => UpstreamMessage::Ping(bytes),
        Message::Pong(bytes) => UpstreamMessage::Pong(bytes),
        Message::Close(frame) => UpstreamMessage::Close(frame.map(|f| UpstreamCloseFrame {
            code: f.code.into(),
            reason: f.reason.as_str().to_owned().into(),
        })),
    }
}

fn to_client(msg: UpstreamMessage) -> Option<Message> {
    let msg = match msg {
        UpstreamMessage::Text(text) => Message::Text(text.as_str().to_owned().into()),
        UpstreamMessage::Binary(bytes) => Message::Binary(bytes),
        UpstreamMessage::Ping(bytes) => Message::Ping(bytes),
        UpstreamMessage::Pong(bytes) => Message::Pong(bytes),
        UpstreamMessage::Close(frame) => Message::Close(frame.map(|f| CloseFrame {
            code: f.code.into(),
            reason: f.reason.as_str().to_owned().into(),
        })),
        UpstreamMessage::Frame(_) => return None,
    };
    Some(msg)
}

fn path_and_query(parts: &Parts) -> &str {
    parts.uri.path_and_query().map_or("/", |pq| pq.as_str())
}

/// Target origin (plus any base path) followed by the request's path and query.
pub(crate) fn upstream_url(target: &Url, path_and_query: &str) -> String {
    format!("{}{path_and_query}", target.as_str().trim_end_matches('/'))
}

/// Same as [`upstream_url`] with the scheme switched to `ws`/`wss`.
pub(crate) fn websocket_url(target: &Url, path_and_query: &str) -> String {
    let http = upstream_url(target, path_and_query);
    if let Some(rest) = http.strip_prefix("https://") {
        format!("wss://{rest}")
    } else if let Some(rest) = http.strip_prefix("http://") {
        format!("ws://{rest}")
    } else {
        http
    }
}

pub(crate) fn is_websocket_upgrade(headers: &HeaderMap) -> bool {
    let upgrade = headers
        .get(header::UPGRADE)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|v| v.eq_ignore_ascii_case("websocket"));
    let connection = headers
        .get(header::CONNECTION)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|v| v.split(',').any(|token| token.trim().eq_ignore_ascii_case("upgrade")));
    upgrade && connection
}

pub(crate) fn strip_hop_by_hop(headers: &HeaderMap) -> HeaderMap {
    let mut out = headers.clone();
    for name in &HOP_BY_HOP {
        out.remove(name);
    }
    out
}

#[cfg(test)]
#[path = "proxy_test.rs"]
mod tests;
