//! Token ↔ id mapping with document frequencies and extreme-frequency filtering.

use super::bow::BowDocument;
use crate::config::CorpusConfig;
use std::collections::{BTreeMap, HashMap};

/// Counts from one `filter_extremes` pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FilterStats {
    pub before: usize,
    pub too_rare: usize,
    pub too_common: usize,
    pub over_keep_n: usize,
    pub after: usize,
}

/// Vocabulary over a tokenized corpus.
///
/// Ids are dense (`0..len`) and assigned in alphabetical token order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Dictionary {
    tokens: Vec<String>,
    token2id: HashMap<String, u32>,
    dfs: Vec<usize>,
    num_docs: usize,
}

impl Dictionary {
    /// Unfiltered dictionary of every token in `documents`.
    pub fn from_documents<D: AsRef<[String]>>(documents: &[D]) -> Self {
        let mut dfs: BTreeMap<&str, usize> = BTreeMap::new();
        for doc in documents {
            let mut seen: Vec<&str> = doc.as_ref().iter().map(String::as_str).collect();
            seen.sort_unstable();
            seen.dedup();
            for token in seen {
                *dfs.entry(token).or_insert(0) += 1;
            }
        }

        let mut dictionary = Self {
            num_docs: documents.len(),
            ..Self::default()
        };
        dictionary.assign(dfs.into_iter().map(|(t, df)| (t.to_string(), df)).collect());
        dictionary
    }

    /// Drop tokens with `df < no_below` or `df > floor(no_above * num_docs)`,
    /// then keep the `keep_n` most frequent (ties alphabetical). Ids are reassigned.
    pub fn filter_extremes(&mut self, config: &CorpusConfig) -> FilterStats {
        let no_below = config.no_below.max(1);
        let max_df = config.max_document_frequency(self.num_docs);

        let mut stats = FilterStats {
            before: self.len(),
            ..FilterStats::default()
        };

        let mut kept: Vec<(String, usize)> = Vec::with_capacity(self.len());
        for (token, &df) in self.tokens.iter().zip(&self.dfs) {
            if df < no_below {
                stats.too_rare += 1;
            } else if df > max_df {
                stats.too_common += 1;
            } else {
                kept.push((token.clone(), df));
            }
        }

        if kept.len() > config.keep_n {
            kept.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
            stats.over_keep_n = kept.len() - config.keep_n;
            kept.truncate(config.keep_n);
            kept.sort_by(|a, b| a.0.cmp(&b.0));
        }

        self.assign(kept);
        stats.after = self.len();
        stats
    }

    /// Replace the vocabulary with `entries`, which must be sorted by token.
    fn assign(&mut self, entries: Vec<(String, usize)>) {
        self.tokens.clear();
        self.dfs.clear();
        self.token2id.clear();
        for (id, (token, df)) in entries.into_iter().enumerate() {
            self.token2id.insert(token.clone(), id as u32);
            self.tokens.push(token);
            self.dfs.push(df);
        }
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    /// Number of documents the frequencies were counted over.
    pub fn num_docs(&self) -> usize {
        self.num_docs
    }

    pub fn token_id(&self, token: &str) -> Option<u32> {
        self.token2id.get(token).copied()
    }

    pub fn token(&self, id: u32) -> Option<&str> {
        self.tokens.get(id as usize).map(String::as_str)
    }

    /// Number of documents containing the token with this id.
    pub fn document_frequency(&self, id: u32) -> Option<usize> {
        self.dfs.get(id as usize).copied()
    }

    /// Tokens in id order.
    pub fn tokens(&self) -> &[String] {
        &self.tokens
    }

    /// Bag-of-words for one tokenized document. Unknown tokens are dropped.
    pub fn doc2bow(&self, document: &[String]) -> BowDocument {
        let mut counts: BTreeMap<u32, u32> = BTreeMap::new();
        for id in document.iter().filter_map(|t| self.token_id(t)) {
            *counts.entry(id).or_insert(0) += 1;
        }
        BowDocument::new(counts.into_iter().collect())
    }
}
