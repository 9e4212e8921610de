//! Flat, precomputed view of the corpus used by the alignment search.
//!
//! Every verse's words are laid end to end, joined by a single space, so that a
//! character position in the concatenation maps back to a word by binary search
//! over `char_offsets` and from there to its verse through `word_owner`.

use crate::corpus::{Corpus, TextForm, Verse, VerseKey};
use crate::normalize::words;
use serde::Serialize;
use std::ops::Range;

/// Separator placed between consecutive words in the concatenated text.
pub const SEPARATOR: char = ' ';

/// Where a flat word lives.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct WordOwner {
    pub key: VerseKey,
    /// Position of the owning verse in `CorpusIndex::verses`.
    pub verse_slot: u32,
    pub word: u16,
}

#[derive(Debug, Clone, Default)]
pub struct TextLayer {
    text: Vec<char>,
    flat_words: Vec<String>,
    word_owner: Vec<WordOwner>,
    char_offsets: Vec<usize>,
}

impl TextLayer {
    fn push_verse<'a>(&mut self, slot: u32, key: VerseKey, verse_words: impl Iterator<Item = &'a str>) {
        for (word_idx, word) in verse_words.enumerate() {
            if !self.text.is_empty() {
                self.text.push(SEPARATOR);
            }
            self.char_offsets.push(self.text.len());
            self.text.extend(word.chars());
            self.flat_words.push(word.to_string());
            self.word_owner.push(WordOwner { key, verse_slot: slot, word: word_idx as u16 });
        }
    }

    fn check(&self) {
        assert_eq!(self.flat_words.len(), self.word_owner.len(), "word owner table out of step");
        assert_eq!(self.flat_words.len(), self.char_offsets.len(), "char offset table out of step");
        assert!(
            self.char_offsets.windows(2).all(|w| w[0] < w[1]),
            "char offsets must be strictly increasing"
        );
    }

    /// The concatenated text as characters.
    pub fn chars(&self) -> &[char] {
        &self.text
    }

    pub fn char_len(&self) -> usize {
        self.text.len()
    }

    pub fn flat_words(&self) -> &[String] {
        &self.flat_words
    }

    pub fn word_owners(&self) -> &[WordOwner] {
        &self.word_owner
    }

    pub fn char_offsets(&self) -> &[usize] {
        &self.char_offsets
    }

    pub fn word_count(&self) -> usize {
        self.flat_words.len()
    }

    /// Index of the word whose offset is the largest one not after `pos`.
    pub fn word_at(&self, pos: usize) -> Option<usize> {
        match self.char_offsets.partition_point(|&off| off <= pos) {
            0 => None,
            n => Some(n - 1),
        }
    }

    pub fn owner(&self, word: usize) -> WordOwner {
        self.word_owner[word]
    }

    pub fn slice(&self, range: Range<usize>) -> String {
        self.text[range].iter().collect()
    }
}

/// Immutable search index derived from a [`Corpus`]. Build once, share freely.
#[derive(Debug, Clone, Default)]
pub struct CorpusIndex {
    verses: Vec<VerseKey>,
    normalized: TextLayer,
    original: TextLayer,
}

impl CorpusIndex {
    pub fn build(corpus: &Corpus) -> Self {
        Self::from_verses(corpus.verses())
    }

    /// Build from verses already in corpus order.
    pub fn from_verses<'a>(verses: impl IntoIterator<Item = &'a Verse>) -> Self {
        let mut index = CorpusIndex::default();
        for verse in verses {
            let slot = index.verses.len() as u32;
            index.verses.push(verse.key);
            index.normalized.push_verse(slot, verse.key, words(&verse.text_normalized));
            index.original.push_verse(slot, verse.key, verse.text.split_whitespace());
        }
        index.normalized.check();
        index.original.check();
        tracing::info!(
            verses = index.verses.len(),
            words = index.normalized.word_count(),
            chars = index.normalized.char_len(),
            "built corpus index"
        );
        index
    }

    pub fn layer(&self, form: TextForm) -> &TextLayer {
        match form {
            TextForm::Normalized => &self.normalized,
            TextForm::Original => &self.original,
        }
    }

    /// Verse keys in corpus order.
    pub fn verses(&self) -> &[VerseKey] {
        &self.verses
    }

    pub fn is_empty(&self) -> bool {
        self.verses.is_empty()
    }
}
