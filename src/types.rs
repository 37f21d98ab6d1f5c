//! Core value types: tokens, spans, and ranking configuration.
//!
//! Spans are keyed by their lemma tuple, an explicit immutable value type
//! with defined equality and hashing, so two occurrences of the same text
//! are the same graph node regardless of where they came from.

use crate::errors::{Result, SpanRankError};
use serde::{Deserialize, Serialize};

// ============================================================================
// Part-of-speech tags
// ============================================================================

/// Universal part-of-speech tags
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PosTag {
    Noun,
    ProperNoun,
    Verb,
    Adjective,
    Adverb,
    Pronoun,
    Determiner,
    Preposition,
    Conjunction,
    Numeral,
    Particle,
    Punctuation,
    Symbol,
    Other,
}

impl PosTag {
    /// Whether this tag represents a noun (common or proper)
    pub fn is_noun(&self) -> bool {
        matches!(self, PosTag::Noun | PosTag::ProperNoun)
    }

    /// Whether this tag represents punctuation or a symbol
    pub fn is_punctuation(&self) -> bool {
        matches!(self, PosTag::Punctuation | PosTag::Symbol)
    }

    /// Whether this tag is an open-class content word
    pub fn is_content_word(&self) -> bool {
        matches!(
            self,
            PosTag::Noun | PosTag::ProperNoun | PosTag::Verb | PosTag::Adjective
        )
    }

    /// Parse from a spaCy/UD-style tag string
    pub fn from_ud(tag: &str) -> Self {
        match tag.to_uppercase().as_str() {
            "NOUN" => PosTag::Noun,
            "PROPN" => PosTag::ProperNoun,
            "VERB" | "AUX" => PosTag::Verb,
            "ADJ" => PosTag::Adjective,
            "ADV" => PosTag::Adverb,
            "PRON" => PosTag::Pronoun,
            "DET" => PosTag::Determiner,
            "ADP" => PosTag::Preposition,
            "CCONJ" | "SCONJ" | "CONJ" => PosTag::Conjunction,
            "NUM" => PosTag::Numeral,
            "PART" => PosTag::Particle,
            "PUNCT" => PosTag::Punctuation,
            "SYM" => PosTag::Symbol,
            _ => PosTag::Other,
        }
    }

    /// The UD-style tag string for this variant
    pub fn as_str(&self) -> &'static str {
        match self {
            PosTag::Noun => "NOUN",
            PosTag::ProperNoun => "PROPN",
            PosTag::Verb => "VERB",
            PosTag::Adjective => "ADJ",
            PosTag::Adverb => "ADV",
            PosTag::Pronoun => "PRON",
            PosTag::Determiner => "DET",
            PosTag::Preposition => "ADP",
            PosTag::Conjunction => "CCONJ",
            PosTag::Numeral => "NUM",
            PosTag::Particle => "PART",
            PosTag::Punctuation => "PUNCT",
            PosTag::Symbol => "SYM",
            PosTag::Other => "X",
        }
    }
}

// ============================================================================
// Token
// ============================================================================

/// A tagged token from the input text.
///
/// Tokens are produced by the built-in [`crate::nlp::Tokenizer`] or supplied
/// directly by any external tagger that can fill these fields.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Token {
    /// Surface form
    pub text: String,
    /// Normalized form used as the graph node key
    pub lemma: String,
    /// Part-of-speech tag
    pub pos: PosTag,
    /// Start character offset in the source text
    pub start: usize,
    /// End character offset in the source text
    pub end: usize,
    /// Index of the sentence this token belongs to
    pub sentence_idx: usize,
    /// Position of this token in the document sequence
    pub token_idx: usize,
    /// Whether this token is a stop word
    pub is_stopword: bool,
}

impl Token {
    /// Create a new token
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        text: impl Into<String>,
        lemma: impl Into<String>,
        pos: PosTag,
        start: usize,
        end: usize,
        sentence_idx: usize,
        token_idx: usize,
    ) -> Self {
        Self {
            text: text.into(),
            lemma: lemma.into(),
            pos,
            start,
            end,
            sentence_idx,
            token_idx,
            is_stopword: false,
        }
    }

    /// Builder-style setter for the stop-word flag
    pub fn with_stopword(mut self, is_stopword: bool) -> Self {
        self.is_stopword = is_stopword;
        self
    }

    /// Whether this token is punctuation
    pub fn is_punctuation(&self) -> bool {
        self.pos.is_punctuation()
    }
}

// ============================================================================
// Span (n-gram)
// ============================================================================

/// A span of 1..=N consecutive tokens, identified by its lemma tuple.
///
/// Spans with identical lemma tuples are the same graph node, so the type
/// implements `Eq` and `Hash` over the tuple and nothing else.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Span {
    terms: Box<[String]>,
}

impl Span {
    /// Build a span from a window of consecutive tokens
    pub fn from_tokens(window: &[Token]) -> Self {
        Self {
            terms: window.iter().map(|t| t.lemma.clone()).collect(),
        }
    }

    /// Build a span from lemma strings
    pub fn from_terms<S: Into<String>>(terms: impl IntoIterator<Item = S>) -> Self {
        Self {
            terms: terms.into_iter().map(Into::into).collect(),
        }
    }

    /// Single-term span
    pub fn unigram(term: impl Into<String>) -> Self {
        Self {
            terms: vec![term.into()].into_boxed_slice(),
        }
    }

    /// Number of terms in the span
    pub fn arity(&self) -> usize {
        self.terms.len()
    }

    /// The lemma terms making up this span
    pub fn terms(&self) -> &[String] {
        &self.terms
    }

    /// The human-readable label: terms joined with a single space
    pub fn label(&self) -> String {
        self.terms.join(" ")
    }
}

impl std::fmt::Display for Span {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

// ============================================================================
// Configuration
// ============================================================================

/// Configuration for co-occurrence ranking.
///
/// The window size is a required constructor argument: there is no universal
/// value. The experiments this library descends from used 4 for unigrams and
/// trigrams but 14 for digrams, so callers must choose per n-gram arity.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RankConfig {
    /// Number of forward positions scanned for co-occurring spans
    pub window_size: usize,
    /// PageRank damping factor
    pub damping: f64,
    /// Convergence tolerance (L1 change between iterations)
    pub tolerance: f64,
    /// Iteration cap; reaching it reports non-convergence rather than looping
    pub max_iterations: usize,
    /// Number of top results to report
    pub top_k: usize,
}

impl RankConfig {
    /// Create a config with the given co-occurrence window and default
    /// ranking parameters (damping 0.85, tolerance 1e-8, top 5).
    pub fn new(window_size: usize) -> Self {
        Self {
            window_size,
            damping: 0.85,
            tolerance: 1e-8,
            max_iterations: 100,
            top_k: 5,
        }
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

    /// Builder method: set number of results to report
    pub fn with_top_k(mut self, top_k: usize) -> Self {
        self.top_k = top_k;
        self
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        if self.window_size == 0 {
            return Err(SpanRankError::invalid_config("window_size must be >= 1"));
        }
        if !(0.0..=1.0).contains(&self.damping) {
            return Err(SpanRankError::invalid_config(format!(
                "damping must be between 0 and 1, got {}",
                self.damping
            )));
        }
        if self.tolerance <= 0.0 {
            return Err(SpanRankError::invalid_config("tolerance must be > 0"));
        }
        if self.max_iterations == 0 {
            return Err(SpanRankError::invalid_config("max_iterations must be > 0"));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_span_identity_by_terms() {
        let a = Span::from_terms(["neural", "network"]);
        let b = Span::from_terms(["neural", "network"]);
        let c = Span::from_terms(["network", "neural"]);

        assert_eq!(a, b);
        assert_ne!(a, c); // order matters
    }

    #[test]
    fn test_span_from_tokens_uses_lemmas() {
        let tokens = vec![
            Token::new("Networks", "network", PosTag::Noun, 0, 8, 0, 0),
            Token::new("ran", "run", PosTag::Verb, 9, 12, 0, 1),
        ];
        let span = Span::from_tokens(&tokens);
        assert_eq!(span.terms(), &["network".to_string(), "run".to_string()]);
        assert_eq!(span.label(), "network run");
        assert_eq!(span.arity(), 2);
    }

    #[test]
    fn test_pos_tag_roundtrip() {
        for tag in [PosTag::Noun, PosTag::Adjective, PosTag::Punctuation] {
            assert_eq!(PosTag::from_ud(tag.as_str()), tag);
        }
        assert_eq!(PosTag::from_ud("propn"), PosTag::ProperNoun);
        assert_eq!(PosTag::from_ud("???"), PosTag::Other);
    }

    #[test]
    fn test_config_requires_valid_window() {
        assert!(RankConfig::new(4).validate().is_ok());
        assert!(RankConfig::new(0).validate().is_err());
    }

    #[test]
    fn test_config_validation_bounds() {
        assert!(RankConfig::new(4).with_damping(1.5).validate().is_err());
        assert!(RankConfig::new(4).with_tolerance(0.0).validate().is_err());
        assert!(RankConfig::new(4).with_max_iterations(0).validate().is_err());
    }

    #[test]
    fn test_config_serde_roundtrip() {
        let cfg = RankConfig::new(14).with_top_k(10);
        let json = serde_json::to_string(&cfg).unwrap();
        let back: RankConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(back.window_size, 14);
        assert_eq!(back.top_k, 10);
    }
}
