//! Search and index configuration.

use crate::corpus::TextForm;
use crate::error::{LookupError, Result};
use serde::Deserialize;

pub const DEFAULT_THRESHOLD: f64 = 80.0;
pub const DEFAULT_FUZZY_THRESHOLD: f64 = 0.7;

/// Environment variable that turns eager index construction off.
pub const EAGER_INDEX_ENV: &str = "AYAH_EAGER_INDEX";

fn check_range(name: &str, value: f64, max: f64) -> Result<()> {
    if (0.0..=max).contains(&value) {
        Ok(())
    } else {
        Err(LookupError::InvalidArgument(format!("{name} must be within 0..={max}, got {value}")))
    }
}

/// Options for the multi-verse alignment search.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default)]
pub struct SearchOptions {
    /// Minimum similarity, 0.0 to 100.0.
    pub threshold: f64,
    pub max_results: Option<usize>,
    pub form: TextForm,
}

impl Default for SearchOptions {
    fn default() -> Self {
        Self { threshold: DEFAULT_THRESHOLD, max_results: None, form: TextForm::Normalized }
    }
}

impl SearchOptions {
    pub fn with_threshold(mut self, threshold: f64) -> Self {
        self.threshold = threshold;
        self
    }

    pub fn with_max_results(mut self, max_results: usize) -> Self {
        self.max_results = Some(max_results);
        self
    }

    pub fn with_form(mut self, form: TextForm) -> Self {
        self.form = form;
        self
    }

    pub fn validate(&self) -> Result<()> {
        check_range("threshold", self.threshold, 100.0)
    }
}

/// Options for the single-verse fuzzy search. Similarities are 0.0 to 1.0.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default)]
pub struct FuzzyOptions {
    pub threshold: f64,
    pub max_results: Option<usize>,
    pub form: TextForm,
}

impl Default for FuzzyOptions {
    fn default() -> Self {
        Self { threshold: DEFAULT_FUZZY_THRESHOLD, max_results: None, form: TextForm::Normalized }
    }
}

impl FuzzyOptions {
    pub fn with_threshold(mut self, threshold: f64) -> Self {
        self.threshold = threshold;
        self
    }

    pub fn with_max_results(mut self, max_results: usize) -> Self {
        self.max_results = Some(max_results);
        self
    }

    pub fn validate(&self) -> Result<()> {
        check_range("fuzzy threshold", self.threshold, 1.0)
    }
}

/// Options for the cascading exact, fuzzy, multi-verse search.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default)]
pub struct SmartOptions {
    pub fuzzy_threshold: f64,
    pub sliding_threshold: f64,
    pub max_results: Option<usize>,
    pub form: TextForm,
}

impl Default for SmartOptions {
    fn default() -> Self {
        Self {
            fuzzy_threshold: DEFAULT_FUZZY_THRESHOLD,
            sliding_threshold: DEFAULT_THRESHOLD,
            max_results: None,
            form: TextForm::Normalized,
        }
    }
}

impl SmartOptions {
    pub fn fuzzy(&self) -> FuzzyOptions {
        FuzzyOptions { threshold: self.fuzzy_threshold, max_results: self.max_results, form: self.form }
    }

    pub fn sliding(&self) -> SearchOptions {
        SearchOptions { threshold: self.sliding_threshold, max_results: self.max_results, form: self.form }
    }
}

/// How the corpus index is managed by [`crate::QuranLookup`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct IndexConfig {
    /// Build the index up front instead of on the first multi-verse search.
    pub eager: bool,
}

impl Default for IndexConfig {
    fn default() -> Self {
        Self { eager: true }
    }
}

impl IndexConfig {
    pub fn eager() -> Self {
        Self { eager: true }
    }

    pub fn lazy() -> Self {
        Self { eager: false }
    }

    /// Read `AYAH_EAGER_INDEX`; unset or unrecognised values keep the default.
    pub fn from_env() -> Self {
        match std::env::var(EAGER_INDEX_ENV) {
            Ok(val) => Self::from_flag(&val),
            Err(_) => Self::default(),
        }
    }

    fn from_flag(val: &str) -> Self {
        match val.trim().to_ascii_lowercase().as_str() {
            "0" | "false" | "no" | "off" => Self::lazy(),
            "1" | "true" | "yes" | "on" => Self::eager(),
            _ => Self::default(),
        }
    }
}
