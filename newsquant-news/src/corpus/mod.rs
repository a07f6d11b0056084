//! Corpus construction: cleaned token sequences, dictionary, bag-of-words.

pub mod bow;
pub mod dictionary;

pub use bow::{BowCorpus, BowDocument};
pub use dictionary::{Dictionary, FilterStats};

use crate::text::TextCleaner;

/// One token sequence per input headline, in input order.
///
/// Headlines that clean down to nothing stay as empty sequences, so the
/// corpus is always as long as the headline list.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CleanedCorpus {
    documents: Vec<Vec<String>>,
}

impl CleanedCorpus {
    pub fn from_headlines<S: AsRef<str>>(headlines: &[S], cleaner: &TextCleaner) -> Self {
        Self {
            documents: headlines
                .iter()
                .map(|h| cleaner.tokens(h.as_ref()))
                .collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.documents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }

    pub fn documents(&self) -> &[Vec<String>] {
        &self.documents
    }

    pub fn get(&self, index: usize) -> Option<&[String]> {
        self.documents.get(index).map(Vec::as_slice)
    }

    /// Documents with no tokens left after cleaning.
    pub fn empty_documents(&self) -> usize {
        self.documents.iter().filter(|d| d.is_empty()).count()
    }
}
