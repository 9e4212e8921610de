//! Owner of a corpus and its search index.

use crate::config::{FuzzyOptions, IndexConfig, SearchOptions, SmartOptions};
use crate::corpus::{search_text, Chapter, Corpus, TextForm, Verse};
use crate::error::Result;
use crate::index::CorpusIndex;
use crate::multi_ayah::{search_multi_ayah, MultiAyahMatch};
use crate::smart::{cascade, SearchOutcome};
use crate::verse_fuzzy::{fuzzy_search, FuzzyMatch};
use parking_lot::RwLock;
use serde::Serialize;
use std::sync::Arc;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CorpusStats {
    pub chapters: usize,
    pub verses: usize,
    pub words: usize,
}

/// Read-only lookup and search over one corpus.
///
/// With an eager [`IndexConfig`] the index exists once `new` returns. A lazy
/// lookup builds it on the first multi-verse search; concurrent callers either
/// wait for that build or see the finished index.
pub struct QuranLookup {
    corpus: Corpus,
    config: IndexConfig,
    index: RwLock<Option<Arc<CorpusIndex>>>,
}

impl QuranLookup {
    pub fn new(corpus: Corpus, config: IndexConfig) -> Self {
        let index = config.eager.then(|| Arc::new(CorpusIndex::build(&corpus)));
        tracing::info!(
            chapters = corpus.chapter_count(),
            verses = corpus.verse_count(),
            eager = config.eager,
            "corpus ready"
        );
        Self { corpus, config, index: RwLock::new(index) }
    }

    pub fn corpus(&self) -> &Corpus {
        &self.corpus
    }

    pub fn config(&self) -> IndexConfig {
        self.config
    }

    pub fn is_indexed(&self) -> bool {
        self.index.read().is_some()
    }

    /// The shared index, built now if this lookup is lazy and nobody asked yet.
    pub fn index(&self) -> Arc<CorpusIndex> {
        if let Some(index) = self.index.read().as_ref() {
            return Arc::clone(index);
        }
        let mut slot = self.index.write();
        if let Some(index) = slot.as_ref() {
            return Arc::clone(index);
        }
        tracing::info!("building corpus index on first use");
        let index = Arc::new(CorpusIndex::build(&self.corpus));
        *slot = Some(Arc::clone(&index));
        index
    }

    pub fn verse(&self, chapter: u16, verse: u16) -> Result<&Verse> {
        self.corpus.verse(chapter, verse)
    }

    pub fn chapter(&self, number: u16) -> Result<&Chapter> {
        self.corpus.chapter(number)
    }

    pub fn chapter_verses(&self, number: u16) -> Result<&[Verse]> {
        self.corpus.chapter_verses(number)
    }

    pub fn search_text(&self, query: &str, form: TextForm) -> Vec<&Verse> {
        search_text(&self.corpus, query, form)
    }

    pub fn fuzzy_search(&self, query: &str, options: &FuzzyOptions) -> Result<Vec<FuzzyMatch>> {
        fuzzy_search(&self.corpus, query, options)
    }

    pub fn search_multi_ayah(&self, query: &str, options: &SearchOptions) -> Result<Vec<MultiAyahMatch>> {
        options.validate()?;
        search_multi_ayah(query, options, &self.index())
    }

    pub fn smart_search(&self, query: &str, options: &SmartOptions) -> Result<SearchOutcome> {
        cascade(&self.corpus, query, options, |q| self.search_multi_ayah(q, &options.sliding()))
    }

    pub fn stats(&self) -> CorpusStats {
        CorpusStats {
            chapters: self.corpus.chapter_count(),
            verses: self.corpus.verse_count(),
            words: self.corpus.verses().map(Verse::word_count).sum(),
        }
    }
}
