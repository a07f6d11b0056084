//! Text preprocessing: normalization, stopwords, lemmatization, tokenization.

pub mod clean;
pub mod lemmatize;
pub mod stopwords;
pub mod tokenize;

pub use clean::{clean_text, headline_length, publisher_domain, HeadlineLength};
pub use lemmatize::lemmatize;
pub use stopwords::is_stopword;
pub use tokenize::TextCleaner;
