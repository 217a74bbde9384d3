use serde::Serialize;
use thiserror::Error;

use crate::analysis::extract_keywords;
use crate::config::AnalysisConfig;
use crate::dom::parser::parse_html;
use crate::dom::readability::extract_article_text;
use crate::keyword::Keyword;
use crate::net::analyze::{AnalyzeError, Analyzer};
use crate::net::fetch::fetch_url;

/// Pipeline stage an error came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Fetch,
    Extract,
    Keywords,
}

impl Phase {
    pub fn as_str(self) -> &'static str {
        match self {
            Phase::Fetch => "fetch",
            Phase::Extract => "extract",
            Phase::Keywords => "keywords",
        }
    }

    /// HTTP status the analysis service answers with for this phase.
    pub fn http_status(self) -> u16 {
        match self {
            Phase::Fetch => 400,
            Phase::Extract => 422,
            Phase::Keywords => 500,
        }
    }
}

/// Error during article analysis
#[derive(Debug, Error)]
#[error("{message}")]
pub struct PipelineError {
    pub phase: Phase,
    pub message: String,
}

impl PipelineError {
    fn new(phase: Phase, message: impl Into<String>) -> Self {
        Self {
            phase,
            message: message.into(),
        }
    }
}

/// Result of analysing one article
#[derive(Debug, Clone, Serialize)]
pub struct AnalysisResult {
    pub url: String,
    pub title: String,
    pub word_count: usize,
    pub keywords: Vec<Keyword>,
}

/// The analysis pipeline: Fetch → Parse → Extract → Validate → Rank
pub struct AnalysisEngine {
    config: AnalysisConfig,
}

impl AnalysisEngine {
    pub fn new(config: AnalysisConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &AnalysisConfig {
        &self.config
    }

    /// Fetch a URL and run it through the full pipeline
    pub fn analyze_url(&self, url: &str) -> Result<AnalysisResult, PipelineError> {
        let fetched = fetch_url(url, &self.config.fetch)
            .map_err(|e| PipelineError::new(Phase::Fetch, format!("Fetch failed: {}", e)))?;
        log::debug!("fetched {} ({} bytes)", fetched.url, fetched.html.len());

        self.analyze_html(&fetched.html, &fetched.url)
    }

    /// Run already-fetched HTML through the pipeline
    pub fn analyze_html(&self, html: &str, url: &str) -> Result<AnalysisResult, PipelineError> {
        let dom = parse_html(html, url);

        let text = extract_article_text(&dom).unwrap_or_default();
        let word_count = text.split_whitespace().count();
        if word_count < self.config.min_words {
            log::info!("{}: only {} words extracted", url, word_count);
            return Err(PipelineError::new(
                Phase::Extract,
                "Not enough article text extracted",
            ));
        }

        let keywords = extract_keywords(&text, self.config.top_k).map_err(|e| {
            PipelineError::new(Phase::Keywords, format!("Keyword extraction failed: {}", e))
        })?;
        log::info!("{}: {} words -> {} keywords", url, word_count, keywords.len());

        Ok(AnalysisResult {
            url: url.to_string(),
            title: dom.title,
            word_count,
            keywords,
        })
    }
}

/// Runs the pipeline in-process behind the [`Analyzer`] seam.
pub struct LocalAnalyzer {
    engine: AnalysisEngine,
}

impl LocalAnalyzer {
    pub fn new(config: AnalysisConfig) -> Self {
        Self {
            engine: AnalysisEngine::new(config),
        }
    }
}

impl Analyzer for LocalAnalyzer {
    fn analyze(&self, url: &str) -> Result<Vec<Keyword>, AnalyzeError> {
        self.engine
            .analyze_url(url)
            .map(|r| r.keywords)
            .map_err(|e| AnalyzeError::Pipeline(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use httpmock::prelude::*;

    fn article_html() -> String {
        let para = "The central bank raised interest rates again to fight inflation, \
                    and markets reacted sharply as investors weighed inflation risks.";
        format!(
            "<html><head><title>Rates rise</title></head><body>\
             <nav><a href='/'>Home</a></nav>\
             <article><h1>Central bank raises rates</h1>\
             <p>{p}</p><p>{p}</p><p>{p}</p><p>Analysts expect inflation to cool by spring.</p>\
             </article></body></html>",
            p = para
        )
    }

    #[test]
    fn analyzes_article_html() {
        let engine = AnalysisEngine::new(AnalysisConfig::default());
        let result = engine.analyze_html(&article_html(), "https://news.test/rates").unwrap();

        assert_eq!(result.title, "Rates rise");
        assert!(result.word_count >= 50);
        assert!(!result.keywords.is_empty());
        assert!(result.keywords.len() <= 60);
        assert_eq!(result.keywords[0].word, "inflation");
    }

    #[test]
    fn short_page_fails_in_extract_phase() {
        let engine = AnalysisEngine::new(AnalysisConfig::default());
        let err = engine
            .analyze_html("<html><body><p>Too short to analyze.</p></body></html>", "u")
            .unwrap_err();
        assert_eq!(err.phase, Phase::Extract);
        assert_eq!(err.phase.http_status(), 422);
        assert_eq!(err.to_string(), "Not enough article text extracted");
    }

    #[test]
    fn stopword_only_article_fails_in_keyword_phase() {
        let config = AnalysisConfig {
            min_words: 5,
            ..AnalysisConfig::default()
        };
        let html = format!("<html><body><p>{}</p></body></html>", "the and of to in ".repeat(4));
        let err = AnalysisEngine::new(config).analyze_html(&html, "u").unwrap_err();
        assert_eq!(err.phase, Phase::Keywords);
        assert!(err.message.starts_with("Keyword extraction failed"));
    }

    #[test]
    fn unreachable_page_fails_in_fetch_phase() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(GET).path("/missing");
            then.status(500);
        });

        let err = AnalysisEngine::new(AnalysisConfig::default())
            .analyze_url(&server.url("/missing"))
            .unwrap_err();
        assert_eq!(err.phase, Phase::Fetch);
        assert_eq!(err.phase.http_status(), 400);
        assert!(err.message.starts_with("Fetch failed:"));
    }

    #[test]
    fn local_analyzer_fetches_and_ranks() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(GET).path("/rates");
            then.status(200)
                .header("content-type", "text/html")
                .body(article_html());
        });

        let analyzer = LocalAnalyzer::new(AnalysisConfig::default());
        let words = analyzer.analyze(&server.url("/rates")).unwrap();
        assert_eq!(words[0].word, "inflation");
    }
}
