//! Form state behind the control panel.
//!
//! One request at a time: `submit` is ignored while `loading` is set, the
//! request runs on a worker thread, and `poll` folds the outcome back in on
//! the UI thread. Every outcome leaves the session idle again.

use std::sync::{mpsc, Arc};

use crate::clipboard::ClipboardRead;
use crate::keyword::Keyword;
use crate::net::analyze::{AnalyzeError, Analyzer};

/// Entries of the sample-link dropdown: (label, url).
pub const SAMPLE_LINKS: &[(&str, &str)] = &[
    ("www.cbsnews.com", "https://www.cbsnews.com"),
    ("www.cnn.com", "https://www.cnn.com"),
    ("www.nytimes.com", "https://www.nytimes.com"),
];

pub const PASTE_ERROR: &str = "Failed to paste from clipboard";

type Outcome = Result<Vec<Keyword>, AnalyzeError>;

#[derive(Default)]
pub struct AnalysisSession {
    pub url_input: String,
    pub keywords: Vec<Keyword>,
    pub loading: bool,
    pub error: Option<String>,
    fetch_rx: Option<mpsc::Receiver<Outcome>>,
    /// Bumped whenever `keywords` is replaced
    revision: u64,
}

impl AnalysisSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Start analysing `url_input`. Returns false when a request is already in flight.
    ///
    /// `on_done` runs on the worker thread after the outcome is queued.
    pub fn submit<F>(&mut self, analyzer: Arc<dyn Analyzer>, on_done: F) -> bool
    where
        F: FnOnce() + Send + 'static,
    {
        if self.loading {
            return false;
        }
        self.loading = true;
        self.error = None;

        let (tx, rx) = mpsc::channel();
        self.fetch_rx = Some(rx);
        let url = self.url_input.trim().to_string();

        std::thread::spawn(move || {
            let result = analyzer.analyze(&url);
            let _ = tx.send(result);
            on_done();
        });
        true
    }

    /// Apply a finished request, if any. Returns true when keywords changed.
    pub fn poll(&mut self) -> bool {
        let Some(rx) = &self.fetch_rx else {
            return false;
        };

        let outcome = match rx.try_recv() {
            Ok(outcome) => outcome,
            Err(mpsc::TryRecvError::Empty) => return false,
            Err(mpsc::TryRecvError::Disconnected) => {
                Err(AnalyzeError::Pipeline("analysis worker stopped".into()))
            }
        };

        self.loading = false;
        self.fetch_rx = None;

        match outcome {
            Ok(keywords) => {
                log::info!("{} keywords for {}", keywords.len(), self.url_input);
                self.keywords = keywords;
                self.revision += 1;
                true
            }
            Err(e) => {
                log::warn!("analysis failed: {}", e);
                self.error = Some(e.to_string());
                false
            }
        }
    }

    /// Replace the URL field with clipboard text.
    pub fn paste(&mut self, clipboard: &mut dyn ClipboardRead) {
        match clipboard.read_text() {
            Ok(text) => self.url_input = text.trim().to_string(),
            Err(e) => {
                log::debug!("{}", e);
                self.error = Some(PASTE_ERROR.to_string());
            }
        }
    }
}
