//! In-memory verse corpus with constant-time chapter and verse lookup

use crate::error::{LookupError, Result};
use crate::normalize::{normalize, words};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use std::fmt;

/// Number of chapters in a complete corpus.
pub const CHAPTER_COUNT: u16 = 114;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct VerseKey {
    pub chapter: u16,
    /// 0 is the opening formula of a chapter, when the chapter has one.
    pub verse: u16,
}

impl VerseKey {
    pub fn new(chapter: u16, verse: u16) -> Self {
        Self { chapter, verse }
    }
}

impl fmt::Display for VerseKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.chapter, self.verse)
    }
}

/// Which rendition of the text a search runs over.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TextForm {
    #[default]
    Normalized,
    Original,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Verse {
    pub key: VerseKey,
    /// Original text with diacritics.
    pub text: String,
    pub text_normalized: String,
}

impl Verse {
    pub fn new(key: VerseKey, text: impl Into<String>) -> Self {
        let text = text.into();
        let text_normalized = normalize(&text);
        Self { key, text, text_normalized }
    }

    pub fn is_opening_formula(&self) -> bool {
        self.key.verse == 0
    }

    pub fn text_in(&self, form: TextForm) -> &str {
        match form {
            TextForm::Normalized => &self.text_normalized,
            TextForm::Original => &self.text,
        }
    }

    pub fn word_count(&self) -> usize {
        words(&self.text_normalized).count()
    }
}

#[derive(Debug, Clone)]
pub struct Chapter {
    number: u16,
    verses: Vec<Verse>, // sorted by verse number
    positions: HashMap<u16, usize>,
}

impl Chapter {
    fn from_sorted(number: u16, verses: Vec<Verse>) -> Self {
        let positions = verses.iter().enumerate().map(|(i, v)| (v.key.verse, i)).collect();
        Self { number, verses, positions }
    }

    pub fn number(&self) -> u16 {
        self.number
    }

    pub fn verse(&self, verse: u16) -> Option<&Verse> {
        self.positions.get(&verse).map(|&i| &self.verses[i])
    }

    pub fn verses(&self) -> &[Verse] {
        &self.verses
    }

    pub fn verse_count(&self) -> usize {
        self.verses.len()
    }

    pub fn has_opening_formula(&self) -> bool {
        self.positions.contains_key(&0)
    }
}

/// Ordered collection of chapters, read-only once built.
#[derive(Debug, Clone, Default)]
pub struct Corpus {
    chapters: Vec<Chapter>, // sorted by chapter number
    positions: HashMap<u16, usize>,
    verse_count: usize,
}

impl Corpus {
    /// Build a corpus from `(chapter, verse, original_text)` triples in any order.
    ///
    /// Normalized text is derived here. Chapter numbers outside `1..=114` and
    /// repeated verse keys are rejected.
    pub fn from_verses<I, S>(verses: I) -> Result<Self>
    where
        I: IntoIterator<Item = (u16, u16, S)>,
        S: Into<String>,
    {
        let mut grouped: BTreeMap<u16, BTreeMap<u16, Verse>> = BTreeMap::new();
        for (chapter, verse, text) in verses {
            let key = VerseKey::new(chapter, verse);
            if !(1..=CHAPTER_COUNT).contains(&chapter) {
                return Err(LookupError::InvalidVerse {
                    key,
                    reason: format!("chapter must be within 1..={CHAPTER_COUNT}"),
                });
            }
            let slot = grouped.entry(chapter).or_default();
            if slot.contains_key(&verse) {
                return Err(LookupError::DuplicateVerse(key));
            }
            slot.insert(verse, Verse::new(key, text));
        }

        let mut verse_count = 0;
        let chapters: Vec<Chapter> = grouped
            .into_iter()
            .map(|(number, verses)| {
                verse_count += verses.len();
                Chapter::from_sorted(number, verses.into_values().collect())
            })
            .collect();
        let positions = chapters.iter().enumerate().map(|(i, c)| (c.number, i)).collect();
        Ok(Self { chapters, positions, verse_count })
    }

    pub fn chapter(&self, number: u16) -> Result<&Chapter> {
        self.positions
            .get(&number)
            .map(|&i| &self.chapters[i])
            .ok_or(LookupError::ChapterNotFound(number))
    }

    pub fn verse(&self, chapter: u16, verse: u16) -> Result<&Verse> {
        self.chapter(chapter)?
            .verse(verse)
            .ok_or_else(|| LookupError::VerseNotFound(VerseKey::new(chapter, verse)))
    }

    pub fn chapter_verses(&self, number: u16) -> Result<&[Verse]> {
        Ok(self.chapter(number)?.verses())
    }

    pub fn chapters(&self) -> impl Iterator<Item = &Chapter> {
        self.chapters.iter()
    }

    /// Every verse, chapter by chapter, in ascending verse order.
    pub fn verses(&self) -> impl Iterator<Item = &Verse> {
        self.chapters.iter().flat_map(|c| c.verses.iter())
    }

    pub fn resolve(&self, keys: &[VerseKey]) -> Result<Vec<&Verse>> {
        keys.iter().map(|k| self.verse(k.chapter, k.verse)).collect()
    }

    pub fn verse_count(&self) -> usize {
        self.verse_count
    }

    pub fn chapter_count(&self) -> usize {
        self.chapters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.verse_count == 0
    }
}

/// Verses whose text contains `query` verbatim, in corpus order.
///
/// The query is normalized before searching normalized text; original text is
/// matched as given.
pub fn search_text<'a>(corpus: &'a Corpus, query: &str, form: TextForm) -> Vec<&'a Verse> {
    let needle = match form {
        TextForm::Normalized => normalize(query),
        TextForm::Original => query.trim().to_string(),
    };
    if needle.is_empty() {
        return Vec::new();
    }
    corpus.verses().filter(|v| v.text_in(form).contains(&needle)).collect()
}
