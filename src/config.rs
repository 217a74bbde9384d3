//! Runtime configuration.
//!
//! Plain structs with `Default` values matching the stock deployment:
//! viewer on the desktop, analysis service on `localhost:8000`.
//! The binary fills these in from command-line flags.

use std::net::SocketAddr;
use std::time::Duration;

/// Default analysis endpoint the viewer posts to.
pub const DEFAULT_ENDPOINT: &str = "http://localhost:8000/analyze";

/// Browser-like user agent sent with article fetches.
pub const DEFAULT_USER_AGENT: &str = concat!(
    "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) ",
    "AppleWebKit/537.36 (KHTML, like Gecko) Chrome/124.0 Safari/537.36"
);

/// Article fetch settings.
#[derive(Debug, Clone)]
pub struct FetchConfig {
    pub user_agent: String,
    pub timeout: Duration,
    pub max_redirects: usize,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            user_agent: DEFAULT_USER_AGENT.to_string(),
            timeout: Duration::from_secs(15),
            max_redirects: 10,
        }
    }
}

/// Keyword pipeline settings.
#[derive(Debug, Clone)]
pub struct AnalysisConfig {
    /// Number of keywords returned per article.
    pub top_k: usize,
    /// Articles with fewer words than this are rejected.
    pub min_words: usize,
    pub fetch: FetchConfig,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            top_k: 60,
            min_words: 50,
            fetch: FetchConfig::default(),
        }
    }
}

/// Analysis server settings.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub bind: SocketAddr,
    /// Origins allowed by CORS.
    pub allowed_origins: Vec<String>,
    pub analysis: AnalysisConfig,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: SocketAddr::from(([127, 0, 0, 1], 8000)),
            allowed_origins: vec![
                "http://localhost:5173".to_string(),
                "http://127.0.0.1:5173".to_string(),
            ],
            analysis: AnalysisConfig::default(),
        }
    }
}

/// Desktop viewer settings.
#[derive(Debug, Clone)]
pub struct ViewerConfig {
    pub endpoint: String,
    /// Run the pipeline in-process instead of calling `endpoint`.
    pub local: bool,
    /// Draw the starfield with the fixed default camera instead of following the orbit camera.
    pub static_background: bool,
    pub analysis: AnalysisConfig,
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            local: false,
            static_background: true,
            analysis: AnalysisConfig::default(),
        }
    }
}
