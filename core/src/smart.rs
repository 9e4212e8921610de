//! Cascading search: exact, then single-verse fuzzy, then multi-verse alignment.

use crate::config::SmartOptions;
use crate::corpus::{search_text, Corpus, Verse};
use crate::error::Result;
use crate::index::CorpusIndex;
use crate::multi_ayah::{search_multi_ayah, MultiAyahMatch};
use crate::normalize::normalize;
use crate::verse_fuzzy::{fuzzy_search, FuzzyMatch};
use serde::Serialize;

/// Results of [`smart_search`], tagged by the strategy that produced them.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "method", content = "results", rename_all = "snake_case")]
pub enum SearchOutcome {
    Exact(Vec<Verse>),
    Fuzzy(Vec<FuzzyMatch>),
    #[serde(rename = "sliding_window")]
    MultiAyah(Vec<MultiAyahMatch>),
    None,
}

impl SearchOutcome {
    pub fn method(&self) -> &'static str {
        match self {
            SearchOutcome::Exact(_) => "exact",
            SearchOutcome::Fuzzy(_) => "fuzzy",
            SearchOutcome::MultiAyah(_) => "sliding_window",
            SearchOutcome::None => "none",
        }
    }

    pub fn len(&self) -> usize {
        match self {
            SearchOutcome::Exact(v) => v.len(),
            SearchOutcome::Fuzzy(v) => v.len(),
            SearchOutcome::MultiAyah(v) => v.len(),
            SearchOutcome::None => 0,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Run the cascade; `multi` performs the last stage so callers can defer
/// building the index until it is actually needed.
pub(crate) fn cascade<F>(corpus: &Corpus, query: &str, options: &SmartOptions, multi: F) -> Result<SearchOutcome>
where
    F: FnOnce(&str) -> Result<Vec<MultiAyahMatch>>,
{
    let fuzzy_options = options.fuzzy();
    fuzzy_options.validate()?;
    options.sliding().validate()?;
    if normalize(query).is_empty() {
        return Ok(SearchOutcome::None);
    }

    let mut exact = search_text(corpus, query, options.form);
    if !exact.is_empty() {
        if let Some(k) = options.max_results {
            exact.truncate(k);
        }
        return Ok(SearchOutcome::Exact(exact.into_iter().cloned().collect()));
    }

    let fuzzy = fuzzy_search(corpus, query, &fuzzy_options)?;
    if !fuzzy.is_empty() {
        return Ok(SearchOutcome::Fuzzy(fuzzy));
    }

    let sliding = multi(query)?;
    if !sliding.is_empty() {
        return Ok(SearchOutcome::MultiAyah(sliding));
    }
    Ok(SearchOutcome::None)
}

/// Try exact substring search, then single-verse fuzzy search, then the
/// multi-verse alignment search; the first strategy with results wins.
pub fn smart_search(
    corpus: &Corpus,
    index: &CorpusIndex,
    query: &str,
    options: &SmartOptions,
) -> Result<SearchOutcome> {
    cascade(corpus, query, options, |q| search_multi_ayah(q, &options.sliding(), index))
}
