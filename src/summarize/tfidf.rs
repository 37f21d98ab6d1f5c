//! TF-IDF sentence vectors.
//!
//! Each sentence becomes a sparse, L2-normalized vector over content lemmas
//! (stop words and punctuation are skipped). Inverse document frequency is
//! the smoothed form `ln((1 + N) / (1 + df)) + 1`, which keeps terms that
//! appear in every sentence from zeroing out.

use crate::types::Token;
use rustc_hash::FxHashMap;

/// A sparse L2-normalized sentence vector
#[derive(Debug, Clone, Default)]
pub struct SentenceVector {
    dims: FxHashMap<String, f64>,
}

impl SentenceVector {
    fn from_weights(mut dims: FxHashMap<String, f64>) -> Self {
        let norm = dims.values().map(|v| v * v).sum::<f64>().sqrt();
        if norm > 0.0 {
            for value in dims.values_mut() {
                *value /= norm;
            }
        }
        Self { dims }
    }

    /// Cosine similarity; since vectors are normalized this is the dot product
    pub fn cosine_similarity(&self, other: &SentenceVector) -> f64 {
        let (small, large) = if self.dims.len() <= other.dims.len() {
            (&self.dims, &other.dims)
        } else {
            (&other.dims, &self.dims)
        };
        small
            .iter()
            .filter_map(|(term, v)| large.get(term).map(|w| v * w))
            .sum()
    }

    /// Whether the vector has no non-zero dimensions
    pub fn is_empty(&self) -> bool {
        self.dims.is_empty()
    }

    /// Number of non-zero dimensions
    pub fn len(&self) -> usize {
        self.dims.len()
    }
}

/// TF-IDF vectorizer fitted over the sentences of one document
#[derive(Debug, Clone)]
pub struct TfIdfVectorizer {
    idf: FxHashMap<String, f64>,
}

fn is_content(token: &Token) -> bool {
    !token.is_punctuation() && !token.is_stopword
}

impl TfIdfVectorizer {
    /// Fit document frequencies over sentences
    pub fn fit(sentences: &[Vec<&Token>]) -> Self {
        let n = sentences.len();
        let mut df: FxHashMap<String, usize> = FxHashMap::default();
        for sentence in sentences {
            let mut seen: Vec<&str> = Vec::new();
            for token in sentence.iter().filter(|t| is_content(t)) {
                if !seen.contains(&token.lemma.as_str()) {
                    seen.push(&token.lemma);
                    *df.entry(token.lemma.clone()).or_insert(0) += 1;
                }
            }
        }

        let idf = df
            .into_iter()
            .map(|(term, count)| {
                let idf = ((1.0 + n as f64) / (1.0 + count as f64)).ln() + 1.0;
                (term, idf)
            })
            .collect();
        Self { idf }
    }

    /// Vectorize one sentence
    pub fn vectorize(&self, sentence: &[&Token]) -> SentenceVector {
        let mut tf: FxHashMap<String, f64> = FxHashMap::default();
        for token in sentence.iter().filter(|t| is_content(t)) {
            *tf.entry(token.lemma.clone()).or_insert(0.0) += 1.0;
        }
        for (term, value) in tf.iter_mut() {
            *value *= self.idf.get(term).copied().unwrap_or(0.0);
        }
        SentenceVector::from_weights(tf)
    }
}
