pub mod tfidf;

pub use tfidf::{extract_keywords, KeywordError};
