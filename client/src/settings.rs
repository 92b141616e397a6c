//! Client configuration loaded via OrthoConfig.

use std::path::{Path, PathBuf};
use std::time::Duration;

use ortho_config::OrthoConfig;
use reqwest::Url;
use serde::Deserialize;

use crate::outbound::http::StitchApiOptions;

const DEFAULT_SERVER_URL: &str = "http://localhost:8080";

/// Configuration values for reaching the Stitch API and caching the session
/// user.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "STITCH")]
pub struct ClientSettings {
    /// Base URL of the Stitch server.
    pub server_url: Option<String>,
    /// Raw `name=value` session cookie sent with every request.
    pub session_cookie: Option<String>,
    /// Optional per-request timeout in seconds; zero disables it.
    pub request_timeout_secs: Option<u64>,
    /// Optional JSON file persisting the session user cache.
    pub cache_path: Option<PathBuf>,
}

impl ClientSettings {
    /// Return the configured server URL, falling back to the default.
    ///
    /// # Errors
    ///
    /// Returns an error when the configured value is not an absolute URL.
    pub fn server_url(&self) -> Result<Url, url::ParseError> {
        let raw = self
            .server_url
            .as_deref()
            .map(str::trim)
            .filter(|value| !value.is_empty())
            .unwrap_or(DEFAULT_SERVER_URL);
        Url::parse(raw)
    }

    /// Return the session cookie, ignoring blank values.
    pub fn session_cookie(&self) -> Option<&str> {
        self.session_cookie
            .as_deref()
            .map(str::trim)
            .filter(|value| !value.is_empty())
    }

    /// Return the request timeout, if one is configured.
    pub fn request_timeout(&self) -> Option<Duration> {
        self.request_timeout_secs
            .filter(|secs| *secs > 0)
            .map(Duration::from_secs)
    }

    /// Return the cache file path, if the file-backed cache is enabled.
    pub fn cache_path(&self) -> Option<&Path> {
        self.cache_path.as_deref()
    }

    /// Transport options for the HTTP adapters.
    pub fn api_options(&self) -> StitchApiOptions {
        StitchApiOptions {
            session_cookie: self.session_cookie().map(str::to_owned),
            timeout: self.request_timeout(),
        }
    }
}
