use thiserror::Error;
use url::Url;

use crate::config::FetchConfig;

/// Result of fetching an article page
#[derive(Debug, Clone)]
pub struct FetchResult {
    pub html: String,
    /// Final URL after redirects
    pub url: String,
    pub status: u16,
}

/// Error during fetch
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    #[error("Unsupported URL scheme: {0}")]
    UnsupportedScheme(String),

    #[error("Client error: {0}")]
    Client(reqwest::Error),

    #[error("Request failed: {0}")]
    Request(reqwest::Error),

    #[error("HTTP {status} for {url}")]
    Status { status: u16, url: String },

    #[error("Failed to read body: {0}")]
    Body(reqwest::Error),
}

/// True when `url_str` starts with `http://` or `https://`, in any letter case.
pub fn has_http_scheme(url_str: &str) -> bool {
    let lower = url_str.trim_start().to_ascii_lowercase();
    lower.starts_with("http://") || lower.starts_with("https://")
}

/// Prefix `https://` onto scheme-less input and validate it as an http(s) URL.
pub fn normalize_url(url_str: &str) -> Result<Url, FetchError> {
    let trimmed = url_str.trim();
    let url = if !has_http_scheme(trimmed) {
        format!("https://{}", trimmed)
    } else {
        trimmed.to_string()
    };

    let parsed = Url::parse(&url)?;
    match parsed.scheme() {
        "http" | "https" => Ok(parsed),
        other => Err(FetchError::UnsupportedScheme(other.to_string())),
    }
}

/// Fetch a URL and return the HTML content (blocking).
pub fn fetch_url(url_str: &str, config: &FetchConfig) -> Result<FetchResult, FetchError> {
    let parsed = normalize_url(url_str)?;

    let client = reqwest::blocking::Client::builder()
        .user_agent(config.user_agent.as_str())
        .timeout(config.timeout)
        .redirect(reqwest::redirect::Policy::limited(config.max_redirects))
        .build()
        .map_err(FetchError::Client)?;

    log::debug!("GET {}", parsed);
    let response = client
        .get(parsed.as_str())
        .header(
            "Accept",
            "text/html,application/xhtml+xml,application/xml;q=0.9,*/*;q=0.8",
        )
        .header("Accept-Language", "en-US,en;q=0.9")
        .send()
        .map_err(FetchError::Request)?;

    let status = response.status();
    let final_url = response.url().to_string();

    if !status.is_success() {
        return Err(FetchError::Status {
            status: status.as_u16(),
            url: final_url,
        });
    }

    // Lossy decode keeps pages with a wrong charset header readable
    let bytes = response.bytes().map_err(FetchError::Body)?;
    let html = String::from_utf8_lossy(&bytes).into_owned();

    Ok(FetchResult {
        html,
        url: final_url,
        status: status.as_u16(),
    })
}
