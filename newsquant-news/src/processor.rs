//! NewsCorpusProcessor: headlines in, topic model out.
//!
//! Call order is enforced through [`CorpusPhase`]:
//! `Loaded` → `prepare_corpus` → `Prepared` → `lda_topics` → `Modeled`.
//! Preparing again drops any fitted model and returns to `Prepared`.

use crate::config::{CorpusConfig, LdaConfig, NewsConfig};
use crate::corpus::{BowCorpus, CleanedCorpus, Dictionary};
use crate::error::NewsError;
use crate::lda::{LdaModel, Topic};
use crate::text::TextCleaner;

/// Where the processor is in its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CorpusPhase {
    /// Headlines stored, nothing derived yet.
    Loaded,
    /// Cleaned corpus, dictionary and BOW corpus are available.
    Prepared,
    /// A topic model has been fitted on the prepared corpus.
    Modeled,
}

#[derive(Debug, Clone)]
struct Prepared {
    cleaned: CleanedCorpus,
    dictionary: Dictionary,
    corpus: BowCorpus,
}

/// Owns a headline list and everything derived from it.
#[derive(Debug, Clone)]
pub struct NewsCorpusProcessor {
    headlines: Vec<String>,
    cleaner: TextCleaner,
    prepared: Option<Prepared>,
    model: Option<LdaModel>,
}

impl NewsCorpusProcessor {
    /// Store `headlines` in order. Fails with `EmptyCorpus` when there are none.
    pub fn new<I, S>(headlines: I) -> Result<Self, NewsError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let headlines: Vec<String> = headlines.into_iter().map(Into::into).collect();
        if headlines.is_empty() {
            return Err(NewsError::EmptyCorpus);
        }
        tracing::info!(headlines = headlines.len(), "loaded headlines");
        Ok(Self {
            headlines,
            cleaner: TextCleaner::default(),
            prepared: None,
            model: None,
        })
    }

    /// Replace the cleaning policy. Derived state is discarded.
    pub fn with_cleaner(mut self, cleaner: TextCleaner) -> Self {
        self.cleaner = cleaner;
        self.prepared = None;
        self.model = None;
        self
    }

    pub fn phase(&self) -> CorpusPhase {
        match (&self.prepared, &self.model) {
            (None, _) => CorpusPhase::Loaded,
            (Some(_), None) => CorpusPhase::Prepared,
            (Some(_), Some(_)) => CorpusPhase::Modeled,
        }
    }

    pub fn headlines(&self) -> &[String] {
        &self.headlines
    }

    pub fn cleaned(&self) -> Option<&CleanedCorpus> {
        self.prepared.as_ref().map(|p| &p.cleaned)
    }

    pub fn dictionary(&self) -> Option<&Dictionary> {
        self.prepared.as_ref().map(|p| &p.dictionary)
    }

    pub fn corpus(&self) -> Option<&BowCorpus> {
        self.prepared.as_ref().map(|p| &p.corpus)
    }

    pub fn model(&self) -> Option<&LdaModel> {
        self.model.as_ref()
    }

    /// Clean, build the filtered dictionary and the BOW corpus (`keep_n` 10 000).
    pub fn prepare_corpus(&mut self, no_below: usize, no_above: f64) -> Result<(), NewsError> {
        self.prepare_with(&CorpusConfig {
            no_below,
            no_above,
            ..CorpusConfig::default()
        })
    }

    /// [`prepare_corpus`](Self::prepare_corpus) with every filter configurable.
    pub fn prepare_with(&mut self, config: &CorpusConfig) -> Result<(), NewsError> {
        config.validate()?;

        let cleaned = CleanedCorpus::from_headlines(&self.headlines, &self.cleaner);
        let mut dictionary = Dictionary::from_documents(cleaned.documents());
        let stats = dictionary.filter_extremes(config);
        tracing::debug!(
            before = stats.before,
            too_rare = stats.too_rare,
            too_common = stats.too_common,
            over_keep_n = stats.over_keep_n,
            after = stats.after,
            "filtered dictionary"
        );

        if dictionary.is_empty() {
            return Err(NewsError::EmptyVocabulary {
                documents: cleaned.len(),
                no_below: config.no_below,
                no_above: config.no_above,
            });
        }

        let corpus = BowCorpus::build(&dictionary, &cleaned);
        tracing::info!(
            documents = corpus.len(),
            empty_documents = cleaned.empty_documents(),
            vocabulary = dictionary.len(),
            tokens = corpus.num_tokens(),
            "prepared corpus"
        );

        self.prepared = Some(Prepared {
            cleaned,
            dictionary,
            corpus,
        });
        self.model = None;
        Ok(())
    }

    /// Fit `num_topics` topics over `passes` sweeps with the default seed (42).
    pub fn lda_topics(
        &mut self,
        num_topics: usize,
        passes: usize,
    ) -> Result<(&LdaModel, Vec<Topic>), NewsError> {
        self.lda_topics_with(&LdaConfig {
            num_topics,
            passes,
            ..LdaConfig::default()
        })
    }

    /// Fit with full control over priors, seed and terms per topic.
    pub fn lda_topics_with(
        &mut self,
        config: &LdaConfig,
    ) -> Result<(&LdaModel, Vec<Topic>), NewsError> {
        let prepared = self.prepared.as_ref().ok_or(NewsError::NotPrepared)?;
        let model = LdaModel::fit(&prepared.corpus, &prepared.dictionary, config)?;
        let topics = model.topics(config.top_n);
        let model = self.model.insert(model);
        Ok((model, topics))
    }

    /// Build a processor and cleaner from a [`NewsConfig`].
    pub fn from_config<I, S>(headlines: I, config: &NewsConfig) -> Result<Self, NewsError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Ok(Self::new(headlines)?.with_cleaner(TextCleaner::from_config(&config.cleaning)))
    }
}
