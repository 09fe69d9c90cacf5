mod config;
mod error;
mod proxy;
mod routes;
mod tls;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt::init();

    if let Err(e) = dotenvy::dotenv() {
        tracing::debug!(error = %e, "no .env file loaded");
    }

    tls::install_crypto_provider();

    let config = config::ServerConfig::from_env().expect("invalid server configuration");

    // Proxy is optional: without API_PROXY_TARGET the API is expected at API_BASE_URL.
    let proxy = match config.proxy.clone() {
        Some(proxy_config) => {
            tracing::info!(
                prefix = %proxy_config.prefix,
                target = %proxy_config.target,
                change_origin = proxy_config.change_origin,
                secure = proxy_config.secure,
                ws = proxy_config.ws,
                "api proxy enabled"
            );
            Some(proxy::Proxy::new(proxy_config).expect("proxy client init failed"))
        }
        None => {
            tracing::info!("api proxy disabled");
            None
        }
    };

    let app = routes::app(&config, proxy);
    let listener = tokio::net::TcpListener::bind(format!("0.0.0.0:{}", config.port))
        .await
        .expect("failed to bind");

    tracing::info!(port = config.port, site_root = %config.site_root.display(), "dev server listening");
    axum::serve(listener, app).await.expect("server failed");
}
