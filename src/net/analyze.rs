//! Client side of the `/analyze` protocol.
//!
//! The viewer only needs "URL in, keywords out"; [`Analyzer`] is that seam.
//! [`HttpAnalyzer`] talks to a remote service, the pipeline engine provides
//! an in-process implementation.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::keyword::Keyword;

/// Request body of `POST /analyze`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalyzeRequest {
    pub url: String,
}

/// Response body of `POST /analyze`.
///
/// Older services answer with `words` instead of `keywords`; both are read.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalyzeResponse {
    #[serde(alias = "words")]
    pub keywords: Vec<Keyword>,
}

#[derive(Debug, Error)]
pub enum AnalyzeError {
    /// Non-2xx answer; carries the HTTP status text.
    #[error("Failed to analyze: {status_text}")]
    Status { status: u16, status_text: String },

    #[error("{0}")]
    Request(#[from] reqwest::Error),

    #[error("Invalid response: {0}")]
    Decode(#[from] serde_json::Error),

    /// In-process pipeline failure, already phrased for display.
    #[error("{0}")]
    Pipeline(String),
}

/// Turns an article URL into a keyword list.
pub trait Analyzer: Send + Sync {
    fn analyze(&self, url: &str) -> Result<Vec<Keyword>, AnalyzeError>;
}

/// Blocking HTTP client for a remote analysis service.
pub struct HttpAnalyzer {
    endpoint: String,
    client: reqwest::blocking::Client,
}

impl HttpAnalyzer {
    /// Requests wait as long as the service takes; there is no total timeout.
    pub fn new(endpoint: impl Into<String>) -> Result<Self, AnalyzeError> {
        let client = reqwest::blocking::Client::builder().timeout(None).build()?;
        Ok(Self {
            endpoint: endpoint.into(),
            client,
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

impl Analyzer for HttpAnalyzer {
    fn analyze(&self, url: &str) -> Result<Vec<Keyword>, AnalyzeError> {
        log::info!("POST {} url={}", self.endpoint, url);

        let response = self
            .client
            .post(&self.endpoint)
            .json(&AnalyzeRequest {
                url: url.to_string(),
            })
            .send()?;

        let status = response.status();
        if !status.is_success() {
            log::warn!("analysis service answered {}", status);
            return Err(AnalyzeError::Status {
                status: status.as_u16(),
                status_text: status.canonical_reason().unwrap_or("").to_string(),
            });
        }

        let body = response.text()?;
        let parsed: AnalyzeResponse = serde_json::from_str(&body)?;
        log::debug!("received {} keywords", parsed.keywords.len());
        Ok(parsed.keywords)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use httpmock::prelude::*;
    use serde_json::json;

    #[test]
    fn posts_url_and_reads_keywords() {
        let server = MockServer::start();
        let mock = server.mock(|when, then| {
            when.method(POST)
                .path("/analyze")
                .json_body(json!({ "url": "https://example.com/a" }));
            then.status(200).json_body(json!({
                "keywords": [
                    { "word": "election", "weight": 1.0 },
                    { "word": "ballot", "weight": 0.4 }
                ]
            }));
        });

        let analyzer = HttpAnalyzer::new(server.url("/analyze")).unwrap();
        let words = analyzer.analyze("https://example.com/a").unwrap();
        mock.assert();
        assert_eq!(words.len(), 2);
        assert_eq!(words[0], Keyword::new("election", 1.0));
    }

    #[test]
    fn accepts_words_alias() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(POST).path("/analyze");
            then.status(200)
                .json_body(json!({ "words": [{ "word": "storm", "weight": 0.5 }] }));
        });

        let words = HttpAnalyzer::new(server.url("/analyze"))
            .unwrap()
            .analyze("https://example.com")
            .unwrap();
        assert_eq!(words, vec![Keyword::new("storm", 0.5)]);
    }

    #[test]
    fn non_success_surfaces_status_text() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(POST).path("/analyze");
            then.status(422).json_body(json!({ "detail": "Not enough article text extracted" }));
        });

        let err = HttpAnalyzer::new(server.url("/analyze"))
            .unwrap()
            .analyze("https://example.com")
            .unwrap_err();
        assert_eq!(err.to_string(), "Failed to analyze: Unprocessable Entity");
    }

    #[test]
    fn slow_service_is_waited_for() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(POST).path("/analyze");
            then.status(200)
                .delay(std::time::Duration::from_secs(32))
                .json_body(json!({ "keywords": [{ "word": "slow", "weight": 1.0 }] }));
        });

        let words = HttpAnalyzer::new(server.url("/analyze"))
            .unwrap()
            .analyze("https://example.com")
            .unwrap();
        assert_eq!(words, vec![Keyword::new("slow", 1.0)]);
    }

    #[test]
    fn connection_refused_is_a_request_error() {
        // Port 9 (discard) is closed on any sane test host.
        let err = HttpAnalyzer::new("http://127.0.0.1:9/analyze")
            .unwrap()
            .analyze("https://example.com")
            .unwrap_err();
        assert!(matches!(err, AnalyzeError::Request(_)));
        assert!(!err.to_string().is_empty());
    }
}
