//! NewsQuant News: headline cleaning, bag-of-words corpus and LDA topics.
//!
//! This crate holds the text side of the pipeline:
//! - Headline utilities (normalization, length stats, publisher domains)
//! - Token cleaning with a static stopword list and optional lemmatization
//! - Dictionary with document-frequency filtering, bag-of-words corpus
//! - Seeded collapsed-Gibbs LDA
//! - `NewsCorpusProcessor`, which enforces load → prepare → model ordering

pub mod config;
pub mod corpus;
pub mod error;
pub mod lda;
pub mod processor;
pub mod text;

pub use config::{CleaningConfig, ConfigError, CorpusConfig, LdaConfig, NewsConfig};
pub use corpus::{BowCorpus, BowDocument, CleanedCorpus, Dictionary};
pub use error::NewsError;
pub use lda::{LdaModel, Topic};
pub use processor::{CorpusPhase, NewsCorpusProcessor};
pub use text::{clean_text, headline_length, publisher_domain, HeadlineLength, TextCleaner};

#[cfg(test)]
mod tests {
    use super::*;

    /// Compile-time check: public types can move across threads.
    #[allow(dead_code)]
    fn assert_send_sync() {
        fn require_send<T: Send>() {}
        fn require_sync<T: Sync>() {}

        require_send::<NewsCorpusProcessor>();
        require_sync::<NewsCorpusProcessor>();
        require_send::<LdaModel>();
        require_sync::<LdaModel>();
        require_send::<Dictionary>();
        require_sync::<Dictionary>();
        require_send::<NewsError>();
        require_sync::<NewsError>();
    }
}
