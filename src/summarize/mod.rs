//! Extractive summarization.
//!
//! Sentences are embedded as TF-IDF vectors, pairwise cosine similarities
//! become edge weights of a sentence graph, and PageRank over that graph
//! scores each sentence by structural importance. The top-K report uses
//! the same deterministic ordering rules as keyword ranking.

pub mod tfidf;

use crate::errors::{Result, SpanRankError};
use crate::graph::csr::CsrGraph;
use crate::nlp::Tokenizer;
use crate::pagerank::PageRank;
use crate::types::Token;
use log::debug;
use serde::{Deserialize, Serialize};
use tfidf::TfIdfVectorizer;

/// Similarities below this are treated as no edge
const MIN_SIMILARITY: f64 = 1e-12;

/// A scored sentence
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankedSentence {
    /// Sentence index in document order
    pub index: usize,
    /// PageRank score over the similarity graph
    pub score: f64,
    /// The sentence text
    pub text: String,
}

/// TF-IDF + PageRank extractive summarizer
#[derive(Debug, Clone)]
pub struct Summarizer {
    damping: f64,
    tolerance: f64,
    max_iterations: usize,
    top_k: usize,
}

impl Default for Summarizer {
    fn default() -> Self {
        Self {
            damping: 0.85,
            tolerance: 1e-8,
            max_iterations: 100,
            top_k: 5,
        }
    }
}

impl Summarizer {
    /// Create a summarizer with default parameters
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder method: set damping factor
    pub fn with_damping(mut self, damping: f64) -> Self {
        self.damping = damping;
        self
    }

    /// Builder method: set convergence tolerance
    pub fn with_tolerance(mut self, tolerance: f64) -> Self {
        self.tolerance = tolerance;
        self
    }

    /// Builder method: set iteration cap
    pub fn with_max_iterations(mut self, max_iterations: usize) -> Self {
        self.max_iterations = max_iterations;
        self
    }

    /// Builder method: set number of sentences to report
    pub fn with_top_k(mut self, top_k: usize) -> Self {
        self.top_k = top_k;
        self
    }

    /// Summarize raw text using the built-in tokenizer.
    ///
    /// Sentence text is sliced from the source, so surface forms and
    /// punctuation are preserved.
    pub fn summarize(&self, text: &str) -> Result<Vec<RankedSentence>> {
        let tokens = Tokenizer::new().tokenize(text);
        let scored = self.rank_sentences(&tokens)?;
        let sentences = group_sentences(&tokens);

        Ok(scored
            .into_iter()
            .map(|(index, score)| {
                let sent = &sentences[index];
                let start = sent.first().map(|t| t.start).unwrap_or(0);
                let end = sent.last().map(|t| t.end).unwrap_or(0);
                RankedSentence {
                    index,
                    score,
                    text: text[start..end].to_string(),
                }
            })
            .collect())
    }

    /// Rank the sentences of a pre-tagged token stream.
    ///
    /// Returns `(sentence_index, score)` pairs sorted by score descending,
    /// ties broken by document order, truncated to the configured top-K.
    pub fn rank_sentences(&self, tokens: &[Token]) -> Result<Vec<(usize, f64)>> {
        if tokens.is_empty() {
            return Err(SpanRankError::empty_input("no sentences to rank"));
        }

        let sentences = group_sentences(tokens);
        let vectorizer = TfIdfVectorizer::fit(&sentences);
        let vectors: Vec<_> = sentences.iter().map(|s| vectorizer.vectorize(s)).collect();

        let mut edges: Vec<(u32, u32, f64)> = Vec::new();
        for i in 0..vectors.len() {
            for j in (i + 1)..vectors.len() {
                let sim = vectors[i].cosine_similarity(&vectors[j]);
                if sim > MIN_SIMILARITY {
                    edges.push((i as u32, j as u32, sim));
                    edges.push((j as u32, i as u32, sim));
                }
            }
        }

        let labels = (0..sentences.len()).map(|i| i.to_string()).collect();
        let graph = CsrGraph::from_edges(labels, &edges);
        debug!(
            "sentence graph: {} nodes, {} edges",
            graph.num_nodes,
            graph.num_edges()
        );

        let result = PageRank::new()
            .with_damping(self.damping)
            .with_tolerance(self.tolerance)
            .with_max_iterations(self.max_iterations)
            .run(&graph);

        let mut scored: Vec<(usize, f64)> = result.scores.iter().copied().enumerate().collect();
        scored.sort_by(|a, b| b.1.total_cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
        if self.top_k > 0 {
            scored.truncate(self.top_k);
        }
        Ok(scored)
    }
}

/// Group a token stream into sentences by sentence index.
///
/// Indices are assumed nondecreasing, as both the built-in tokenizer and
/// well-formed external taggers produce them.
pub fn group_sentences(tokens: &[Token]) -> Vec<Vec<&Token>> {
    let mut sentences: Vec<Vec<&Token>> = Vec::new();
    let mut current_idx = None;
    for token in tokens {
        if current_idx != Some(token.sentence_idx) {
            sentences.push(Vec::new());
            current_idx = Some(token.sentence_idx);
        }
        if let Some(last) = sentences.last_mut() {
            last.push(token);
        }
    }
    sentences
}
