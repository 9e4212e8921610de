//! Verse lookup and fuzzy multi-verse search over an Arabic verse corpus.
//!
//! The centre of the crate is [`search_multi_ayah`]: given a fragment that may
//! run across several consecutive verses, even across chapters, it locates the
//! best matching runs of verses in a prebuilt [`CorpusIndex`].

pub mod config;
pub mod corpus;
pub mod error;
pub mod fuzzy;
pub mod index;
pub mod lookup;
pub mod multi_ayah;
pub mod normalize;
pub mod smart;
pub mod verse_fuzzy;

pub use config::{FuzzyOptions, IndexConfig, SearchOptions, SmartOptions};
pub use corpus::{search_text, Chapter, Corpus, TextForm, Verse, VerseKey};
pub use error::{LookupError, Result};
pub use index::{CorpusIndex, WordOwner};
pub use lookup::{CorpusStats, QuranLookup};
pub use multi_ayah::{dedupe, search_multi_ayah, Coordinate, MultiAyahMatch};
pub use normalize::normalize;
pub use smart::{smart_search, SearchOutcome};
pub use verse_fuzzy::{fuzzy_search, FuzzyMatch};
