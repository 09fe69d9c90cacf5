//! Dev server configuration parsed from environment variables.

use std::path::PathBuf;

use reqwest::Url;

pub const DEFAULT_PORT: u16 = 3000;
pub const DEFAULT_SITE_ROOT: &str = "target/site";
pub const DEFAULT_PROXY_PREFIX: &str = "/api";

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("invalid PORT: {0}")]
    InvalidPort(String),
    #[error("invalid boolean for {var}: {value}")]
    InvalidBool { var: &'static str, value: String },
    #[error("invalid API_PROXY_TARGET '{value}': {reason}")]
    InvalidTarget { value: String, reason: String },
    #[error("API_PROXY_PREFIX must start with '/': {0}")]
    InvalidPrefix(String),
}

/// Reverse-proxy settings for forwarding API traffic to a backend origin.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProxyConfig {
    /// Path prefix forwarded verbatim, without trailing slash (e.g. `/api`).
    pub prefix: String,
    /// Backend origin requests are sent to.
    pub target: Url,
    /// Rewrite `Host` to the target's authority.
    pub change_origin: bool,
    /// Verify the target's TLS certificate.
    pub secure: bool,
    /// Forward WebSocket upgrades.
    pub ws: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub port: u16,
    /// Directory holding the built site (`index.html`, `pkg/`).
    pub site_root: PathBuf,
    /// `None` leaves `/api` unproxied.
    pub proxy: Option<ProxyConfig>,
}

impl ServerConfig {
    /// Build typed config from the process environment.
    ///
    /// Optional:
    /// - `PORT`: default 3000
    /// - `SITE_ROOT`: default `target/site`
    /// - `API_PROXY_TARGET`: backend origin; proxy disabled when absent
    /// - `API_PROXY_PREFIX`: default `/api`
    /// - `API_PROXY_CHANGE_ORIGIN`: default `true`
    /// - `API_PROXY_SECURE`: default `false`
    /// - `API_PROXY_WS`: default `true`
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` naming the first variable that fails to parse.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`Self::from_env`], reading variables through `lookup`.
    ///
    /// # Errors
    ///
    /// See [`Self::from_env`].
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let port = match non_empty(lookup("PORT")) {
            Some(raw) => raw.parse::<u16>().map_err(|_| ConfigError::InvalidPort(raw))?,
            None => DEFAULT_PORT,
        };
        let site_root = non_empty(lookup("SITE_ROOT")).map_or_else(|| PathBuf::from(DEFAULT_SITE_ROOT), PathBuf::from);

        let proxy = match non_empty(lookup("API_PROXY_TARGET")) {
            Some(raw) => Some(ProxyConfig {
                prefix: parse_prefix(non_empty(lookup("API_PROXY_PREFIX")))?,
                target: parse_target(&raw)?,
                change_origin: parse_bool("API_PROXY_CHANGE_ORIGIN", lookup("API_PROXY_CHANGE_ORIGIN"), true)?,
                secure: parse_bool("API_PROXY_SECURE", lookup("API_PROXY_SECURE"), false)?,
                ws: parse_bool("API_PROXY_WS", lookup("API_PROXY_WS"), true)?,
            }),
            None => None,
        };

        Ok(Self { port, site_root, proxy })
    }
}

fn non_empty(raw: Option<String>) -> Option<String> {
    raw.map(|v| v.trim().to_owned()).filter(|v| !v.is_empty())
}

fn parse_bool(var: &'static str, raw: Option<String>, default: bool) -> Result<bool, ConfigError> {
    let Some(value) = non_empty(raw) else {
        return Ok(default);
    };
    match value.to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(ConfigError::InvalidBool { var, value }),
    }
}

fn parse_target(raw: &str) -> Result<Url, ConfigError> {
    let invalid = |reason: String| ConfigError::InvalidTarget { value: raw.to_owned(), reason };
    let url = Url::parse(raw).map_err(|e| invalid(e.to_string()))?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(invalid(format!("unsupported scheme '{}'", url.scheme())));
    }
    if url.host_str().is_none() {
        return Err(invalid("missing host".to_owned()));
    }
    Ok(url)
}

fn parse_prefix(raw: Option<String>) -> Result<String, ConfigError> {
    let prefix = raw.unwrap_or_else(|| DEFAULT_PROXY_PREFIX.to_owned());
    if !prefix.starts_with('/') {
        return Err(ConfigError::InvalidPrefix(prefix));
    }
    let trimmed = prefix.trim_end_matches('/');
    if trimmed.is_empty() {
        return Err(ConfigError::InvalidPrefix(prefix));
    }
    Ok(trimmed.to_owned())
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
