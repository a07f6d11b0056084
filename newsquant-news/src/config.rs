//! Serializable configuration for cleaning, dictionary filtering and LDA.
//!
//! Every field has a default, so a TOML file only needs the keys it overrides:
//!
//! ```toml
//! [corpus]
//! no_below = 2
//!
//! [lda]
//! num_topics = 6
//! passes = 6
//!
//! [cleaning]
//! extra_stopwords = ["reuters"]
//! ```

use crate::error::NewsError;
use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

/// Errors from loading a configuration file.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("read config file {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("parse config TOML: {0}")]
    Parse(#[from] toml::de::Error),
}

/// Top-level configuration for the news side.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NewsConfig {
    pub corpus: CorpusConfig,
    pub lda: LdaConfig,
    pub cleaning: CleaningConfig,
}

impl NewsConfig {
    /// Load from a TOML file.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_toml(&content)
    }

    /// Parse from a TOML string.
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(content)?)
    }
}

/// Dictionary frequency filters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CorpusConfig {
    /// Minimum number of documents a token must appear in.
    pub no_below: usize,
    /// Maximum fraction of documents a token may appear in.
    pub no_above: f64,
    /// Maximum vocabulary size after filtering.
    pub keep_n: usize,
}

impl Default for CorpusConfig {
    fn default() -> Self {
        Self {
            no_below: 5,
            no_above: 0.5,
            keep_n: 10_000,
        }
    }
}

impl CorpusConfig {
    pub fn validate(&self) -> Result<(), NewsError> {
        if !(self.no_above > 0.0 && self.no_above <= 1.0) {
            return Err(NewsError::InvalidConfig(format!(
                "no_above must be in (0, 1], got {}",
                self.no_above
            )));
        }
        if self.keep_n == 0 {
            return Err(NewsError::InvalidConfig("keep_n must be >= 1".into()));
        }
        Ok(())
    }

    /// Highest document frequency a token may have in a corpus of `num_docs`.
    pub fn max_document_frequency(&self, num_docs: usize) -> usize {
        (self.no_above * num_docs as f64).floor() as usize
    }
}

/// LDA hyperparameters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LdaConfig {
    pub num_topics: usize,
    /// Full Gibbs sweeps over the corpus.
    pub passes: usize,
    /// Document-topic prior.
    pub alpha: f64,
    /// Topic-word prior.
    pub eta: f64,
    pub seed: u64,
    /// Terms listed per topic.
    pub top_n: usize,
}

impl Default for LdaConfig {
    fn default() -> Self {
        Self {
            num_topics: 6,
            passes: 6,
            alpha: 0.1,
            eta: 0.01,
            seed: 42,
            top_n: 10,
        }
    }
}

impl LdaConfig {
    pub fn validate(&self) -> Result<(), NewsError> {
        if self.num_topics == 0 {
            return Err(NewsError::InvalidConfig("num_topics must be >= 1".into()));
        }
        if self.passes == 0 {
            return Err(NewsError::InvalidConfig("passes must be >= 1".into()));
        }
        if !(self.alpha > 0.0) {
            return Err(NewsError::InvalidConfig(format!(
                "alpha must be positive, got {}",
                self.alpha
            )));
        }
        if !(self.eta > 0.0) {
            return Err(NewsError::InvalidConfig(format!(
                "eta must be positive, got {}",
                self.eta
            )));
        }
        if self.top_n == 0 {
            return Err(NewsError::InvalidConfig("top_n must be >= 1".into()));
        }
        Ok(())
    }
}

/// Token cleaning policy.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CleaningConfig {
    /// Tokens shorter than this (in chars) are dropped.
    pub min_token_len: usize,
    /// Drop tokens made only of digits.
    pub strip_digits: bool,
    pub lemmatize: bool,
    /// Added to the built-in English stopword list.
    pub extra_stopwords: Vec<String>,
}

impl Default for CleaningConfig {
    fn default() -> Self {
        Self {
            min_token_len: 3,
            strip_digits: true,
            lemmatize: false,
            extra_stopwords: Vec::new(),
        }
    }
}
