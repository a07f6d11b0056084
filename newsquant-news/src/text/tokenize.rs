//! Headline → token sequence.

use super::clean::clean_text;
use super::lemmatize::lemmatize;
use super::stopwords::is_stopword;
use crate::config::CleaningConfig;
use std::collections::HashSet;

/// Cleaning policy applied to every headline before dictionary building.
///
/// Pipeline: [`clean_text`], whitespace split, stopword removal, minimum
/// length, optional digit-only removal, optional lemmatization.
#[derive(Debug, Clone)]
pub struct TextCleaner {
    min_token_len: usize,
    strip_digits: bool,
    lemmatize: bool,
    extra_stopwords: HashSet<String>,
}

impl Default for TextCleaner {
    fn default() -> Self {
        Self::from_config(&CleaningConfig::default())
    }
}

impl TextCleaner {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_config(config: &CleaningConfig) -> Self {
        Self {
            min_token_len: config.min_token_len,
            strip_digits: config.strip_digits,
            lemmatize: config.lemmatize,
            extra_stopwords: config
                .extra_stopwords
                .iter()
                .map(|w| w.to_lowercase())
                .collect(),
        }
    }

    pub fn with_min_token_len(mut self, len: usize) -> Self {
        self.min_token_len = len;
        self
    }

    pub fn with_strip_digits(mut self, strip: bool) -> Self {
        self.strip_digits = strip;
        self
    }

    pub fn with_lemmatize(mut self, lemmatize: bool) -> Self {
        self.lemmatize = lemmatize;
        self
    }

    pub fn with_stopwords<I, S>(mut self, words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.extra_stopwords
            .extend(words.into_iter().map(|w| w.as_ref().to_lowercase()));
        self
    }

    /// Tokens of one headline. May be empty.
    pub fn tokens(&self, headline: &str) -> Vec<String> {
        clean_text(headline)
            .split_whitespace()
            .filter(|t| !self.is_stopword(t))
            .filter(|t| t.chars().count() >= self.min_token_len)
            .filter(|t| !(self.strip_digits && t.chars().all(|c| c.is_numeric())))
            .map(|t| if self.lemmatize { lemmatize(t) } else { t.to_string() })
            .collect()
    }

    fn is_stopword(&self, token: &str) -> bool {
        is_stopword(token) || self.extra_stopwords.contains(token)
    }
}
