//! Error types for verse lookup and search

use crate::corpus::VerseKey;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum LookupError {
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    #[error("chapter {0} not found")]
    ChapterNotFound(u16),

    #[error("verse {0} not found")]
    VerseNotFound(VerseKey),

    #[error("invalid verse {key}: {reason}")]
    InvalidVerse { key: VerseKey, reason: String },

    #[error("duplicate verse {0}")]
    DuplicateVerse(VerseKey),
}

impl serde::Serialize for LookupError {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

pub type Result<T> = std::result::Result<T, LookupError>;
