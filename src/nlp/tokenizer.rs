//! Built-in tokenizer and heuristic tagger.
//!
//! Splits text into words, punctuation, and sentences, and assigns
//! part-of-speech tags from closed-class word lists and suffix heuristics.
//! The tagging is deliberately lightweight, enough for the span retention
//! predicates. Callers with a real tagger (spaCy exports, UD pipelines) can
//! construct [`Token`]s themselves and skip this module entirely.

use super::stopwords::StopwordFilter;
use crate::types::{PosTag, Token};

const DETERMINERS: &[&str] = &[
    "the", "a", "an", "this", "that", "these", "those", "each", "every", "some", "any", "no",
];
const PREPOSITIONS: &[&str] = &[
    "of", "in", "on", "at", "by", "for", "with", "from", "to", "into", "over", "under", "about",
    "after", "before", "between", "through",
];
const PRONOUNS: &[&str] = &[
    "i", "you", "he", "she", "it", "we", "they", "me", "him", "her", "us", "them", "its", "his",
    "their", "our", "my", "your",
];
const CONJUNCTIONS: &[&str] = &["and", "or", "but", "nor", "so", "yet", "because", "although"];
const AUX_VERBS: &[&str] = &[
    "is", "are", "was", "were", "be", "been", "being", "am", "has", "have", "had", "do", "does",
    "did", "will", "would", "can", "could", "should", "may", "might", "must",
];
const ADJ_SUFFIXES: &[&str] = &["ous", "ful", "ive", "ic", "able", "ible", "less", "ish"];

/// Unicode-aware tokenizer with sentence splitting and heuristic tagging
#[derive(Debug, Clone, Default)]
pub struct Tokenizer {
    stopwords: StopwordFilter,
}

impl Tokenizer {
    /// Create a tokenizer with English stop words
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a tokenizer with a custom stop-word filter
    pub fn with_stopwords(stopwords: StopwordFilter) -> Self {
        Self { stopwords }
    }

    /// Tokenize a text into tagged tokens.
    ///
    /// Words keep apostrophes and internal hyphens; every punctuation
    /// character becomes its own token; `.`, `!`, and `?` advance the
    /// sentence index.
    pub fn tokenize(&self, text: &str) -> Vec<Token> {
        let mut tokens = Vec::new();
        let mut sentence_idx = 0usize;
        let mut sentence_start = true;

        let mut chars = text.char_indices().peekable();
        while let Some(&(start, ch)) = chars.peek() {
            if ch.is_whitespace() {
                chars.next();
                continue;
            }

            if ch.is_alphanumeric() {
                let mut end = start + ch.len_utf8();
                chars.next();
                while let Some(&(i, c)) = chars.peek() {
                    let word_char = c.is_alphanumeric()
                        || ((c == '\'' || c == '-') && end == i);
                    if !word_char {
                        break;
                    }
                    end = i + c.len_utf8();
                    chars.next();
                }
                // Trailing apostrophe/hyphen belongs to punctuation, not the word.
                let mut surface = &text[start..end];
                while surface.ends_with('\'') || surface.ends_with('-') {
                    surface = &surface[..surface.len() - 1];
                }
                let end = start + surface.len();

                let lemma = surface.to_lowercase();
                let is_stopword = self.stopwords.is_stopword(&lemma);
                let pos = self.guess_pos(surface, &lemma, sentence_start);
                tokens.push(
                    Token::new(surface, lemma, pos, start, end, sentence_idx, tokens.len())
                        .with_stopword(is_stopword),
                );
                sentence_start = false;
            } else {
                let end = start + ch.len_utf8();
                chars.next();
                let surface = &text[start..end];
                tokens.push(Token::new(
                    surface,
                    surface,
                    PosTag::Punctuation,
                    start,
                    end,
                    sentence_idx,
                    tokens.len(),
                ));
                if matches!(ch, '.' | '!' | '?') {
                    sentence_idx += 1;
                    sentence_start = true;
                }
            }
        }

        tokens
    }

    fn guess_pos(&self, surface: &str, lemma: &str, sentence_start: bool) -> PosTag {
        if lemma.chars().all(|c| c.is_ascii_digit()) {
            return PosTag::Numeral;
        }
        if DETERMINERS.contains(&lemma) {
            return PosTag::Determiner;
        }
        if PREPOSITIONS.contains(&lemma) {
            return PosTag::Preposition;
        }
        if PRONOUNS.contains(&lemma) {
            return PosTag::Pronoun;
        }
        if CONJUNCTIONS.contains(&lemma) {
            return PosTag::Conjunction;
        }
        if AUX_VERBS.contains(&lemma) {
            return PosTag::Verb;
        }
        if lemma.ends_with("ly") && lemma.len() > 3 {
            return PosTag::Adverb;
        }
        if ADJ_SUFFIXES.iter().any(|s| lemma.ends_with(s)) && lemma.len() > 4 {
            return PosTag::Adjective;
        }
        // Capitalized off sentence start reads as a proper noun.
        if !sentence_start && surface.chars().next().is_some_and(|c| c.is_uppercase()) {
            return PosTag::ProperNoun;
        }
        PosTag::Noun
    }
}
