//! Fuzzy search within single verses, scored 0.0 to 1.0.

use crate::config::FuzzyOptions;
use crate::corpus::{Corpus, TextForm, Verse};
use crate::error::Result;
use crate::fuzzy::Pattern;
use crate::normalize::normalize;
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FuzzyMatch {
    pub verse: Verse,
    pub start_word: usize,
    /// Exclusive.
    pub end_word: usize,
    pub similarity: f64,
    pub matched_text: String,
    pub query_text: String,
}

#[derive(Debug, Clone, PartialEq)]
struct WindowHit {
    start: usize,
    end: usize,
    similarity: f64,
}

/// Best word window of `words` for the query, earliest on ties.
///
/// Window lengths run from one word shorter to one word longer than the query.
fn best_window(pattern: &Pattern, query_words: usize, words: &[&str]) -> Option<WindowHit> {
    if words.is_empty() || query_words == 0 {
        return None;
    }
    let min_len = query_words.saturating_sub(1).max(1).min(words.len());
    let max_len = (query_words + 1).min(words.len());
    let mut best: Option<WindowHit> = None;
    for start in 0..words.len() {
        for len in min_len..=max_len {
            let end = start + len;
            if end > words.len() {
                break;
            }
            let similarity = pattern.ratio(&words[start..end].join(" ")) / 100.0;
            if best.as_ref().map_or(true, |b| similarity > b.similarity) {
                best = Some(WindowHit { start, end, similarity });
            }
        }
    }
    best
}

/// Score every verse against the query and keep those reaching the threshold.
pub fn fuzzy_search(corpus: &Corpus, query: &str, options: &FuzzyOptions) -> Result<Vec<FuzzyMatch>> {
    options.validate()?;
    let needle = match options.form {
        TextForm::Normalized => normalize(query),
        TextForm::Original => query.split_whitespace().collect::<Vec<_>>().join(" "),
    };
    if needle.is_empty() {
        return Ok(Vec::new());
    }
    let pattern = Pattern::new(&needle);
    let query_words = needle.split(' ').count();

    let mut matches: Vec<FuzzyMatch> = corpus
        .verses()
        .filter_map(|verse| {
            let words: Vec<&str> = verse.text_in(options.form).split_whitespace().collect();
            let hit = best_window(&pattern, query_words, &words)?;
            if hit.similarity < options.threshold || hit.similarity == 0.0 {
                return None;
            }
            Some(FuzzyMatch {
                verse: verse.clone(),
                start_word: hit.start,
                end_word: hit.end,
                similarity: hit.similarity,
                matched_text: words[hit.start..hit.end].join(" "),
                query_text: query.to_string(),
            })
        })
        .collect();

    matches.sort_by(|a, b| b.similarity.total_cmp(&a.similarity));
    if let Some(k) = options.max_results {
        matches.truncate(k);
    }
    tracing::debug!(matches = matches.len(), "verse fuzzy search finished");
    Ok(matches)
}
