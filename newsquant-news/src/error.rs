//! Errors surfaced by [`crate::NewsCorpusProcessor`].

use thiserror::Error;

#[derive(Debug, Error)]
pub enum NewsError {
    #[error("headline corpus is empty")]
    EmptyCorpus,

    #[error(
        "no tokens survive filtering of {documents} documents \
         (no_below={no_below}, no_above={no_above})"
    )]
    EmptyVocabulary {
        documents: usize,
        no_below: usize,
        no_above: f64,
    },

    #[error("corpus and dictionary must be prepared before fitting topics")]
    NotPrepared,

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}
