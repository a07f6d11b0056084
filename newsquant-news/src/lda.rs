//! Latent Dirichlet Allocation fitted by collapsed Gibbs sampling.
//!
//! Every token occurrence carries a topic assignment. Each pass resamples every
//! assignment from its conditional given all the others:
//!
//! ```text
//! p(z = k) ∝ (n_dk + alpha) * (n_kw + eta) / (n_k + V * eta)
//! ```
//!
//! The RNG is a seeded `StdRng`, so the same corpus, dictionary and config
//! always produce the same model.

use crate::config::LdaConfig;
use crate::corpus::{BowCorpus, Dictionary};
use crate::error::NewsError;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::fmt;

/// Top-ranked terms of one topic.
#[derive(Debug, Clone, PartialEq)]
pub struct Topic {
    pub index: usize,
    pub terms: Vec<(String, f64)>,
}

impl fmt::Display for Topic {
    /// `Topic 0: 0.045*"stock" + 0.030*"price"`
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Topic {}: ", self.index)?;
        for (i, (term, weight)) in self.terms.iter().enumerate() {
            if i > 0 {
                f.write_str(" + ")?;
            }
            write!(f, "{weight:.3}*\"{term}\"")?;
        }
        Ok(())
    }
}

/// Fitted topic model over a fixed vocabulary.
#[derive(Debug, Clone, PartialEq)]
pub struct LdaModel {
    config: LdaConfig,
    vocabulary: Vec<String>,
    /// K x V assignment counts.
    topic_word: Vec<Vec<u32>>,
    topic_totals: Vec<u64>,
    /// D x K assignment counts.
    doc_topic: Vec<Vec<u32>>,
    doc_totals: Vec<u32>,
}

impl LdaModel {
    /// Fit `config.num_topics` topics with `config.passes` Gibbs sweeps.
    pub fn fit(
        corpus: &BowCorpus,
        dictionary: &Dictionary,
        config: &LdaConfig,
    ) -> Result<Self, NewsError> {
        config.validate()?;
        if dictionary.is_empty() {
            return Err(NewsError::InvalidConfig(
                "cannot fit topics over an empty vocabulary".into(),
            ));
        }

        let k = config.num_topics;
        let v = dictionary.len();
        let mut rng = StdRng::seed_from_u64(config.seed);

        // Expand bag-of-words counts into token occurrences
        let mut words: Vec<Vec<usize>> = Vec::with_capacity(corpus.len());
        for doc in corpus {
            let mut occurrences = Vec::with_capacity(doc.total_count() as usize);
            for &(id, count) in doc.terms() {
                let id = id as usize;
                if id >= v {
                    return Err(NewsError::InvalidConfig(format!(
                        "token id {id} is outside the dictionary ({v} tokens)"
                    )));
                }
                occurrences.extend(std::iter::repeat(id).take(count as usize));
            }
            words.push(occurrences);
        }

        let mut model = Self {
            config: *config,
            vocabulary: dictionary.tokens().to_vec(),
            topic_word: vec![vec![0; v]; k],
            topic_totals: vec![0; k],
            doc_topic: vec![vec![0; k]; words.len()],
            doc_totals: words.iter().map(|w| w.len() as u32).collect(),
        };

        let mut assignments: Vec<Vec<usize>> = Vec::with_capacity(words.len());
        for (d, doc) in words.iter().enumerate() {
            let mut doc_assignments = Vec::with_capacity(doc.len());
            for &w in doc {
                let topic = rng.gen_range(0..k);
                model.add(d, w, topic);
                doc_assignments.push(topic);
            }
            assignments.push(doc_assignments);
        }

        let eta_sum = config.eta * v as f64;
        let mut weights = vec![0.0; k];
        for pass in 0..config.passes {
            let mut changed = 0usize;
            for (d, doc) in words.iter().enumerate() {
                for (pos, &w) in doc.iter().enumerate() {
                    let old = assignments[d][pos];
                    model.remove(d, w, old);

                    let mut total = 0.0;
                    for (topic, weight) in weights.iter_mut().enumerate() {
                        *weight = (model.doc_topic[d][topic] as f64 + config.alpha)
                            * (model.topic_word[topic][w] as f64 + config.eta)
                            / (model.topic_totals[topic] as f64 + eta_sum);
                        total += *weight;
                    }
                    let new = sample(&weights, total, &mut rng);

                    model.add(d, w, new);
                    if new != old {
                        assignments[d][pos] = new;
                        changed += 1;
                    }
                }
            }
            tracing::debug!(pass, changed, "gibbs pass complete");
        }

        tracing::info!(
            topics = k,
            vocabulary = v,
            documents = words.len(),
            tokens = model.doc_totals.iter().map(|&n| n as u64).sum::<u64>(),
            passes = config.passes,
            seed = config.seed,
            "fitted LDA model"
        );
        Ok(model)
    }

    fn add(&mut self, doc: usize, word: usize, topic: usize) {
        self.topic_word[topic][word] += 1;
        self.topic_totals[topic] += 1;
        self.doc_topic[doc][topic] += 1;
    }

    fn remove(&mut self, doc: usize, word: usize, topic: usize) {
        self.topic_word[topic][word] -= 1;
        self.topic_totals[topic] -= 1;
        self.doc_topic[doc][topic] -= 1;
    }

    pub fn num_topics(&self) -> usize {
        self.topic_word.len()
    }

    pub fn vocabulary_size(&self) -> usize {
        self.vocabulary.len()
    }

    pub fn config(&self) -> &LdaConfig {
        &self.config
    }

    /// Smoothed word distribution of a topic, indexed by token id. Sums to 1.
    pub fn topic_word_weights(&self, topic: usize) -> Option<Vec<f64>> {
        let counts = self.topic_word.get(topic)?;
        let denom =
            self.topic_totals[topic] as f64 + self.config.eta * self.vocabulary.len() as f64;
        Some(
            counts
                .iter()
                .map(|&n| (n as f64 + self.config.eta) / denom)
                .collect(),
        )
    }

    /// The `n` heaviest terms of `topic`, by descending weight then ascending id.
    /// Empty when `topic` is out of range.
    pub fn top_terms(&self, topic: usize, n: usize) -> Vec<(String, f64)> {
        let Some(weights) = self.topic_word_weights(topic) else {
            return Vec::new();
        };
        let mut ranked: Vec<(usize, f64)> = weights.into_iter().enumerate().collect();
        ranked.sort_by(|a, b| b.1.total_cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
        ranked
            .into_iter()
            .take(n)
            .map(|(id, weight)| (self.vocabulary[id].clone(), weight))
            .collect()
    }

    /// Every topic in index order with its `n` top terms.
    pub fn topics(&self, n: usize) -> Vec<Topic> {
        (0..self.num_topics())
            .map(|index| Topic {
                index,
                terms: self.top_terms(index, n),
            })
            .collect()
    }

    /// Topic mixture of a training document: `(n_dk + alpha) / (n_d + K * alpha)`.
    pub fn document_topics(&self, doc: usize) -> Option<Vec<f64>> {
        let counts = self.doc_topic.get(doc)?;
        let k = self.num_topics() as f64;
        let denom = self.doc_totals[doc] as f64 + k * self.config.alpha;
        Some(
            counts
                .iter()
                .map(|&n| (n as f64 + self.config.alpha) / denom)
                .collect(),
        )
    }
}

/// Draw an index with probability proportional to `weights`.
fn sample(weights: &[f64], total: f64, rng: &mut StdRng) -> usize {
    let target = rng.gen::<f64>() * total;
    let mut cumulative = 0.0;
    for (i, w) in weights.iter().enumerate() {
        cumulative += w;
        if target < cumulative {
            return i;
        }
    }
    weights.len() - 1
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::corpus::CleanedCorpus;
    use crate::text::TextCleaner;

    fn fixture(headlines: &[&str]) -> (Dictionary, BowCorpus) {
        let cleaned = CleanedCorpus::from_headlines(headlines, &TextCleaner::new());
        let dict = Dictionary::from_documents(cleaned.documents());
        let corpus = BowCorpus::build(&dict, &cleaned);
        (dict, corpus)
    }

    fn two_themes() -> (Dictionary, BowCorpus) {
        fixture(&[
            "oil crude barrel opec oil",
            "crude oil barrel prices opec",
            "opec crude oil output barrel",
            "bank rates fed inflation bank",
            "fed rates inflation bank hike",
            "inflation fed bank rates hike",
        ])
    }

    fn config(num_topics: usize, passes: usize) -> LdaConfig {
        LdaConfig {
            num_topics,
            passes,
            ..Default::default()
        }
    }

    #[test]
    fn fit_shapes() {
        let (dict, corpus) = two_themes();
        let model = LdaModel::fit(&corpus, &dict, &config(2, 20)).unwrap();
        assert_eq!(model.num_topics(), 2);
        assert_eq!(model.vocabulary_size(), dict.len());

        let topics = model.topics(3);
        assert_eq!(topics.len(), 2);
        assert_eq!(topics[0].index, 0);
        assert_eq!(topics[1].index, 1);
        assert!(topics.iter().all(|t| t.terms.len() == 3));
    }

    #[test]
    fn topic_word_weights_sum_to_one() {
        let (dict, corpus) = two_themes();
        let model = LdaModel::fit(&corpus, &dict, &config(3, 10)).unwrap();
        for topic in 0..3 {
            let sum: f64 = model.topic_word_weights(topic).unwrap().iter().sum();
            assert!((sum - 1.0).abs() < 1e-9, "topic {topic} sums to {sum}");
        }
        assert!(model.topic_word_weights(3).is_none());
    }

    #[test]
    fn document_topics_sum_to_one() {
        let (dict, corpus) = two_themes();
        let model = LdaModel::fit(&corpus, &dict, &config(2, 10)).unwrap();
        for doc in 0..corpus.len() {
            let mix = model.document_topics(doc).unwrap();
            assert_eq!(mix.len(), 2);
            assert!((mix.iter().sum::<f64>() - 1.0).abs() < 1e-9);
        }
        assert!(model.document_topics(corpus.len()).is_none());
    }

    #[test]
    fn top_terms_ranked_and_capped() {
        let (dict, corpus) = two_themes();
        let model = LdaModel::fit(&corpus, &dict, &config(2, 10)).unwrap();
        let terms = model.top_terms(0, 100);
        assert_eq!(terms.len(), dict.len());
        assert!(terms.windows(2).all(|w| w[0].1 >= w[1].1));
        assert!(model.top_terms(5, 3).is_empty());
    }

    #[test]
    fn same_seed_same_model() {
        let (dict, corpus) = two_themes();
        let a = LdaModel::fit(&corpus, &dict, &config(2, 15)).unwrap();
        let b = LdaModel::fit(&corpus, &dict, &config(2, 15)).unwrap();
        assert_eq!(a, b);
        assert_eq!(a.topics(5), b.topics(5));
    }

    #[test]
    fn rejects_invalid_config_and_empty_vocabulary() {
        let (dict, corpus) = two_themes();
        assert!(matches!(
            LdaModel::fit(&corpus, &dict, &config(0, 5)),
            Err(NewsError::InvalidConfig(_))
        ));

        let empty = Dictionary::default();
        assert!(matches!(
            LdaModel::fit(&BowCorpus::default(), &empty, &config(2, 5)),
            Err(NewsError::InvalidConfig(_))
        ));
    }

    #[test]
    fn display_format() {
        let topic = Topic {
            index: 0,
            terms: vec![("stock".into(), 0.0451), ("price".into(), 0.03)],
        };
        assert_eq!(topic.to_string(), "Topic 0: 0.045*\"stock\" + 0.030*\"price\"");
    }
}
