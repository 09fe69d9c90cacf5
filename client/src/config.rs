//! Client configuration injected into components at construction time.
//!
//! The base URL is baked in at compile time from `API_BASE_URL`, the way the
//! bundler exposes build-time environment to browser code. An empty base
//! keeps requests same-origin so the dev server's `/api` proxy handles them.

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;

/// Runtime settings for talking to the job-portal backend.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ClientConfig {
    /// Origin (and optional path prefix) of the backend, without trailing slash.
    pub api_base_url: String,
}

impl ClientConfig {
    pub fn new(api_base_url: impl Into<String>) -> Self {
        let raw: String = api_base_url.into();
        Self { api_base_url: raw.trim().trim_end_matches('/').to_owned() }
    }

    /// Build from the `API_BASE_URL` value captured when the crate was compiled.
    pub fn from_build_env() -> Self {
        Self::new(option_env!("API_BASE_URL").unwrap_or_default())
    }

    /// Join the base URL with an absolute API path.
    pub fn url(&self, path: &str) -> String {
        let path = path.trim_start_matches('/');
        format!("{}/{path}", self.api_base_url)
    }
}
