//! Multi-verse alignment search over the flat corpus text.
//!
//! Instead of generating every window of consecutive verses, the engine asks
//! for the single best alignment of the query in the text that has not been
//! consumed yet, records it, moves the cursor past it and asks again. It stops
//! as soon as the best remaining alignment is below the threshold. Matches
//! therefore never overlap, and a qualifying match that sits before a better
//! one is not reported.

use crate::config::SearchOptions;
use crate::corpus::{TextForm, VerseKey};
use crate::error::Result;
use crate::fuzzy::Pattern;
use crate::index::{CorpusIndex, TextLayer, SEPARATOR};
use crate::normalize::normalize;
use serde::Serialize;
use std::collections::HashSet;
use std::fmt;
use std::ops::Range;

/// A word position inside a verse.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct Coordinate {
    pub chapter: u16,
    pub verse: u16,
    pub word: u16,
}

impl Coordinate {
    pub fn key(&self) -> VerseKey {
        VerseKey::new(self.chapter, self.verse)
    }
}

/// One located occurrence of a query, possibly spanning several verses.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MultiAyahMatch {
    /// Verses touched by the match, in corpus order.
    pub verses: Vec<VerseKey>,
    pub start: Coordinate,
    /// Exclusive: `word` is one past the last matched word.
    pub end: Coordinate,
    /// 0.0 to 100.0
    pub similarity: f64,
    pub matched_text: String,
    pub query_text: String,
    char_start: usize,
    char_end: usize,
}

impl MultiAyahMatch {
    /// Human readable span such as `55:1-4` or `93:6-94:1`.
    ///
    /// An opening formula followed by verse 1 of the same chapter is folded into
    /// verse 1, as printed copies number it.
    pub fn reference(&self) -> String {
        let first = self.start.key();
        let last = self.end.key();
        let mut start_verse = first.verse;
        if start_verse == 0 && self.verses.contains(&VerseKey::new(first.chapter, 1)) {
            start_verse = 1;
        }
        if first.chapter != last.chapter {
            format!("{}:{}-{}:{}", first.chapter, start_verse, last.chapter, last.verse)
        } else if start_verse == last.verse {
            format!("{}:{}", first.chapter, start_verse)
        } else {
            format!("{}:{}-{}", first.chapter, start_verse, last.verse)
        }
    }

    /// Absolute character range in the concatenated corpus text.
    pub fn char_range(&self) -> Range<usize> {
        self.char_start..self.char_end
    }

    pub fn verse_count(&self) -> usize {
        self.verses.len()
    }

    pub fn spans_chapters(&self) -> bool {
        self.start.chapter != self.end.chapter
    }

    fn coordinates(&self) -> (Coordinate, Coordinate) {
        (self.start, self.end)
    }
}

impl fmt::Display for MultiAyahMatch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({:.1}): {}", self.reference(), self.similarity, self.matched_text)
    }
}

/// Locate the query in the corpus, best matches first.
///
/// An empty query, an empty corpus or a corpus without any alignment at or above
/// the threshold all give an empty list. Only invalid options are an error.
pub fn search_multi_ayah(query: &str, options: &SearchOptions, index: &CorpusIndex) -> Result<Vec<MultiAyahMatch>> {
    options.validate()?;
    let needle = match options.form {
        TextForm::Normalized => normalize(query),
        TextForm::Original => query.split_whitespace().collect::<Vec<_>>().join(" "),
    };
    if needle.is_empty() {
        return Ok(Vec::new());
    }

    let layer = index.layer(options.form);
    let pattern = Pattern::new(&needle);
    let encoded = pattern.encode(layer.chars());

    let mut found = Vec::new();
    let mut pos = 0;
    let mut iterations = 0usize;
    while pos < encoded.len() {
        iterations += 1;
        let Some(hit) = pattern.align(&encoded[pos..], options.threshold) else {
            break;
        };
        let (start, end) = (pos + hit.start, pos + hit.end);
        pos = end;
        tracing::debug!(start, end, score = hit.score, "accepted alignment");
        if let Some(m) = resolve(index, layer, start..end, hit.score, query) {
            found.push(m);
        }
    }

    let mut matches = dedupe(found);
    matches.sort_by(|a, b| b.similarity.total_cmp(&a.similarity));
    if let Some(k) = options.max_results {
        matches.truncate(k);
    }
    tracing::debug!(matches = matches.len(), iterations, "multi-ayah search finished");
    Ok(matches)
}

/// Turn an absolute character range into verse coordinates.
fn resolve(
    index: &CorpusIndex,
    layer: &TextLayer,
    range: Range<usize>,
    score: f64,
    query: &str,
) -> Option<MultiAyahMatch> {
    let chars = layer.chars();
    let (mut start, mut end) = (range.start, range.end);
    while start < end && chars[start] == SEPARATOR {
        start += 1;
    }
    while end > start && chars[end - 1] == SEPARATOR {
        end -= 1;
    }
    if start == end {
        return None;
    }

    let first = layer.owner(layer.word_at(start)?);
    let last = layer.owner(layer.word_at(end - 1)?);
    let verses = index.verses()[first.verse_slot as usize..=last.verse_slot as usize].to_vec();
    Some(MultiAyahMatch {
        verses,
        start: Coordinate { chapter: first.key.chapter, verse: first.key.verse, word: first.word },
        end: Coordinate { chapter: last.key.chapter, verse: last.key.verse, word: last.word + 1 },
        similarity: score,
        matched_text: layer.slice(start..end),
        query_text: query.to_string(),
        char_start: start,
        char_end: end,
    })
}

/// Keep the first match for each (start, end) coordinate pair, order preserved.
pub fn dedupe(matches: Vec<MultiAyahMatch>) -> Vec<MultiAyahMatch> {
    let mut seen = HashSet::new();
    matches.into_iter().filter(|m| seen.insert(m.coordinates())).collect()
}
