//! TF-IDF keyword ranking over the paragraphs of a single article.
//!
//! Each paragraph is a document. Scores are the mean L2-normalised TF-IDF
//! value of a term across paragraphs, so words that are both frequent and
//! concentrated in a few paragraphs rise to the top.

use std::collections::{BTreeMap, HashMap, HashSet};
use std::sync::OnceLock;

use regex::Regex;
use thiserror::Error;

use crate::keyword::Keyword;

/// Paragraphs shorter than this many words are not treated as documents.
const MIN_DOC_WORDS: usize = 5;

const EPSILON: f64 = 1e-9;

const STOPWORDS: &str = "
the of and to in a is for that on with as by be are was were this it from at an or has have had
not but they you we their our his her its who which will would can could should may might into
about over under between more most other some any each per than also been being because during
new said one two three four five six seven eight nine ten after before month year years
";

#[derive(Debug, Error, PartialEq)]
pub enum KeywordError {
    #[error("empty vocabulary; perhaps the documents only contain stop words")]
    EmptyVocabulary,
}

fn stopwords() -> &'static HashSet<&'static str> {
    static SET: OnceLock<HashSet<&'static str>> = OnceLock::new();
    SET.get_or_init(|| STOPWORDS.split_whitespace().collect())
}

fn token_pattern() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    // Lowercase ASCII runs of 4+ letters; shorter words carry little topic signal.
    RE.get_or_init(|| Regex::new("[a-z]{4,}").expect("static token pattern"))
}

fn newline_runs() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\n+").expect("static newline pattern"))
}

/// Split article text into paragraph documents.
pub fn split_documents(text: &str) -> Vec<String> {
    let docs: Vec<String> = newline_runs()
        .split(text)
        .map(str::trim)
        .filter(|p| p.split_whitespace().count() >= MIN_DOC_WORDS)
        .map(str::to_string)
        .collect();

    if docs.is_empty() {
        vec![text.to_string()]
    } else {
        docs
    }
}

/// Lowercase, match tokens, drop stopwords.
pub fn tokenize(doc: &str) -> Vec<String> {
    let lowered = doc.to_lowercase();
    let stop = stopwords();
    token_pattern()
        .find_iter(&lowered)
        .map(|m| m.as_str())
        .filter(|t| !stop.contains(t))
        .map(str::to_string)
        .collect()
}

/// Mean TF-IDF score per term across `docs`, keyed alphabetically.
fn mean_tfidf(docs: &[Vec<String>]) -> BTreeMap<String, f64> {
    let n_docs = docs.len() as f64;

    let counts: Vec<HashMap<&str, f64>> = docs
        .iter()
        .map(|tokens| {
            let mut tf: HashMap<&str, f64> = HashMap::new();
            for t in tokens {
                *tf.entry(t.as_str()).or_insert(0.0) += 1.0;
            }
            tf
        })
        .collect();

    let mut df: HashMap<&str, f64> = HashMap::new();
    for tf in &counts {
        for term in tf.keys() {
            *df.entry(*term).or_insert(0.0) += 1.0;
        }
    }

    // Smoothed idf: as if one extra document contained every term once.
    let idf: HashMap<&str, f64> = df
        .iter()
        .map(|(term, d)| (*term, ((1.0 + n_docs) / (1.0 + d)).ln() + 1.0))
        .collect();

    let mut sums: BTreeMap<String, f64> = BTreeMap::new();
    for tf in &counts {
        let weighted: Vec<(&str, f64)> = tf.iter().map(|(t, c)| (*t, c * idf[t])).collect();
        let norm = weighted.iter().map(|(_, v)| v * v).sum::<f64>().sqrt();
        for (term, value) in weighted {
            let normalized = if norm > 0.0 { value / norm } else { 0.0 };
            *sums.entry(term.to_string()).or_insert(0.0) += normalized;
        }
    }

    for value in sums.values_mut() {
        *value /= n_docs;
    }
    sums
}

/// Rank the `top_k` keywords of an article, weights min-max scaled to `[0, 1]`.
pub fn extract_keywords(text: &str, top_k: usize) -> Result<Vec<Keyword>, KeywordError> {
    let docs: Vec<Vec<String>> = split_documents(text).iter().map(|d| tokenize(d)).collect();
    let scores = mean_tfidf(&docs);
    if scores.is_empty() {
        return Err(KeywordError::EmptyVocabulary);
    }

    // BTreeMap iteration is alphabetical, and the sort is stable, so ties stay alphabetical.
    let mut ranked: Vec<(String, f64)> = scores.into_iter().collect();
    ranked.sort_by(|a, b| b.1.total_cmp(&a.1));
    ranked.truncate(top_k);

    let max = ranked.iter().map(|(_, s)| *s).fold(f64::MIN, f64::max);
    let min = ranked.iter().map(|(_, s)| *s).fold(f64::MAX, f64::min);

    let keywords = ranked
        .into_iter()
        .map(|(word, score)| {
            let weight = if max > 0.0 {
                (score - min) / (max - min + EPSILON)
            } else {
                0.0
            };
            Keyword::new(word, round4(weight) as f32)
        })
        .collect();

    Ok(keywords)
}

fn round4(v: f64) -> f64 {
    (v * 10_000.0).round() / 10_000.0
}

#[cfg(test)]
mod tests {
    use super::*;

    const ARTICLE: &str = "\
Wildfire crews battled the wildfire through the night near the canyon.\n\
Evacuation orders expanded as the wildfire jumped the highway near homes.\n\
\n\
Officials said firefighters expect cooler weather to help crews tomorrow morning.\n\
Short line.\n\
Residents returned to check homes after the evacuation orders were lifted.";

    #[test]
    fn splits_on_newlines_and_drops_short_paragraphs() {
        let docs = split_documents(ARTICLE);
        assert_eq!(docs.len(), 4);
        assert!(docs.iter().all(|d| d != "Short line."));
    }

    #[test]
    fn short_text_becomes_single_document() {
        assert_eq!(split_documents("too short"), vec!["too short".to_string()]);
    }

    #[test]
    fn tokenizer_drops_stopwords_and_short_words() {
        let tokens = tokenize("The CROWD said they would cheer AFTER the big game, e-mail!");
        assert_eq!(tokens, vec!["crowd", "cheer", "game", "mail"]);
    }

    #[test]
    fn top_keyword_is_the_repeated_topic() {
        let words = extract_keywords(ARTICLE, 60).unwrap();
        assert_eq!(words[0].word, "wildfire");
        assert!((words[0].weight - 1.0).abs() < 1e-3);
        assert!(words.iter().all(|k| (0.0..=1.0).contains(&k.weight)));
        for pair in words.windows(2) {
            assert!(pair[0].weight >= pair[1].weight);
        }
    }

    #[test]
    fn respects_top_k() {
        let words = extract_keywords(ARTICLE, 3).unwrap();
        assert_eq!(words.len(), 3);
        assert_eq!(words.last().map(|k| k.weight), Some(0.0));
    }

    #[test]
    fn weights_are_rounded_to_four_places() {
        for k in extract_keywords(ARTICLE, 60).unwrap() {
            let scaled = k.weight as f64 * 10_000.0;
            assert!((scaled - scaled.round()).abs() < 0.05, "{} not rounded", k.weight);
        }
    }

    #[test]
    fn only_stopwords_is_an_error() {
        assert_eq!(
            extract_keywords("the and of to in a is", 10),
            Err(KeywordError::EmptyVocabulary)
        );
    }

    #[test]
    fn single_term_has_zero_weight() {
        // max == min, so the scaled weight is 0 / epsilon
        let words = extract_keywords("storm", 10).unwrap();
        assert_eq!(words, vec![Keyword::new("storm", 0.0)]);
    }
}
