//! Bag-of-words documents and corpus.

use super::dictionary::Dictionary;
use super::CleanedCorpus;

/// `(token_id, count)` pairs, sorted by id, counts >= 1.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BowDocument {
    terms: Vec<(u32, u32)>,
}

impl BowDocument {
    pub(crate) fn new(terms: Vec<(u32, u32)>) -> Self {
        Self { terms }
    }

    pub fn terms(&self) -> &[(u32, u32)] {
        &self.terms
    }

    /// Number of distinct tokens.
    pub fn len(&self) -> usize {
        self.terms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    /// Total token occurrences.
    pub fn total_count(&self) -> u32 {
        self.terms.iter().map(|&(_, c)| c).sum()
    }
}

/// One [`BowDocument`] per cleaned headline, in input order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BowCorpus {
    documents: Vec<BowDocument>,
}

impl BowCorpus {
    pub fn build(dictionary: &Dictionary, cleaned: &CleanedCorpus) -> Self {
        Self {
            documents: cleaned
                .documents()
                .iter()
                .map(|doc| dictionary.doc2bow(doc))
                .collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.documents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }

    pub fn documents(&self) -> &[BowDocument] {
        &self.documents
    }

    pub fn get(&self, index: usize) -> Option<&BowDocument> {
        self.documents.get(index)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, BowDocument> {
        self.documents.iter()
    }

    /// Total token occurrences across the corpus.
    pub fn num_tokens(&self) -> u64 {
        self.documents.iter().map(|d| d.total_count() as u64).sum()
    }
}

impl<'a> IntoIterator for &'a BowCorpus {
    type Item = &'a BowDocument;
    type IntoIter = std::slice::Iter<'a, BowDocument>;

    fn into_iter(self) -> Self::IntoIter {
        self.documents.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::text::TextCleaner;

    #[test]
    fn corpus_keeps_empty_documents() {
        let headlines = ["Oil prices climb", "", "Oil demand slides"];
        let cleaned = CleanedCorpus::from_headlines(&headlines, &TextCleaner::new());
        let dict = Dictionary::from_documents(cleaned.documents());
        let corpus = BowCorpus::build(&dict, &cleaned);

        assert_eq!(corpus.len(), 3);
        assert!(corpus.get(1).unwrap().is_empty());
        assert_eq!(corpus.num_tokens(), 6);

        let oil = dict.token_id("oil").unwrap();
        for doc in [0, 2] {
            assert!(corpus.get(doc).unwrap().terms().contains(&(oil, 1)));
        }
    }

    #[test]
    fn document_counts() {
        let doc = BowDocument::new(vec![(0, 2), (3, 1)]);
        assert_eq!(doc.len(), 2);
        assert_eq!(doc.total_count(), 3);
    }
}
