//! N-gram windowing and span retention filters.
//!
//! Windowing is a pure function: a token sequence of length L and an n-gram
//! size N yield exactly L-N+1 contiguous spans (the trailing partial windows
//! are dropped). Which spans become graph nodes is decided by a pluggable
//! [`SpanFilter`]; the part-of-speech and stop-word rules are configuration,
//! not algorithm.

use crate::types::{Span, Token};
use rustc_hash::FxHashSet;

/// Produce the ordered sequence of all contiguous n-gram spans.
///
/// Returns an empty vector when the text is shorter than `n`. `n` of zero is
/// treated as one.
pub fn spans(tokens: &[Token], n: usize) -> Vec<Span> {
    let n = n.max(1);
    if tokens.len() < n {
        return Vec::new();
    }
    tokens.windows(n).map(Span::from_tokens).collect()
}

/// Decides whether a token window becomes a graph node.
///
/// Implementations see the constituent tokens, not just the span text, so
/// they can inspect part-of-speech tags and stop-word flags. Every provided
/// filter rejects windows containing punctuation.
pub trait SpanFilter {
    /// Whether the given window of consecutive tokens should be retained
    fn retain(&self, window: &[Token]) -> bool;
}

fn no_punctuation(window: &[Token]) -> bool {
    window.iter().all(|t| !t.is_punctuation())
}

/// Unigram rule: a single noun that is not a stop word
#[derive(Debug, Clone, Copy, Default)]
pub struct NounFilter;

impl SpanFilter for NounFilter {
    fn retain(&self, window: &[Token]) -> bool {
        window.len() == 1
            && no_punctuation(window)
            && window[0].pos.is_noun()
            && !window[0].is_stopword
    }
}

/// Digram rule: adjective followed by noun, neither a stop word
#[derive(Debug, Clone, Copy, Default)]
pub struct AdjNounFilter;

impl SpanFilter for AdjNounFilter {
    fn retain(&self, window: &[Token]) -> bool {
        window.len() == 2
            && no_punctuation(window)
            && window[0].pos == crate::types::PosTag::Adjective
            && window[1].pos.is_noun()
            && !window[0].is_stopword
            && !window[1].is_stopword
    }
}

/// Trigram rule: last token not a stop word, at least one noun among the three
#[derive(Debug, Clone, Copy, Default)]
pub struct TrigramFilter;

impl SpanFilter for TrigramFilter {
    fn retain(&self, window: &[Token]) -> bool {
        window.len() == 3
            && no_punctuation(window)
            && !window[2].is_stopword
            && window.iter().any(|t| t.pos.is_noun())
    }
}

/// Closure-backed filter for caller-supplied rules
pub struct FnFilter<F>(pub F);

impl<F: Fn(&[Token]) -> bool> SpanFilter for FnFilter<F> {
    fn retain(&self, window: &[Token]) -> bool {
        (self.0)(window)
    }
}

/// Compute the deduplicated retained-span set for a text.
///
/// This set defines the graph's node universe: distinct spans with identical
/// lemma tuples collapse to one entry.
pub fn retained_spans(tokens: &[Token], n: usize, filter: &dyn SpanFilter) -> FxHashSet<Span> {
    let n = n.max(1);
    if tokens.len() < n {
        return FxHashSet::default();
    }
    tokens
        .windows(n)
        .filter(|w| filter.retain(w))
        .map(|w| Span::from_tokens(w))
        .collect()
}
