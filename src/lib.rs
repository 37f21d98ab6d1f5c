//! Graph-based ranking of text spans, plus the supporting pieces: a
//! co-occurrence graph builder over n-gram windows, PageRank on a CSR
//! snapshot, TF-IDF sentence graphs for extractive summarization, and a
//! regularized regression toolkit for tabular experiments.
//!
//! # Keyword extraction
//!
//! ```no_run
//! use span_rank::{KeywordRanker, NounFilter, RankConfig, Tokenizer};
//!
//! let tokenizer = Tokenizer::new();
//! let tokens = tokenizer.tokenize("The quick brown fox jumps over the lazy dog.");
//! let ranker = KeywordRanker::new(RankConfig::new(4).with_top_k(10));
//! let keywords = ranker.rank(&tokens, 1, &NounFilter).unwrap();
//! for node in keywords {
//!     println!("{:.4}  {}", node.score, node.label);
//! }
//! ```
//!
//! # Summarization
//!
//! ```no_run
//! use span_rank::Summarizer;
//!
//! let summarizer = Summarizer::new().with_top_k(3);
//! let sentences = summarizer.summarize("Some long document ...").unwrap();
//! ```

pub mod errors;
pub mod graph;
pub mod keywords;
pub mod ngram;
pub mod nlp;
pub mod pagerank;
pub mod regress;
pub mod report;
pub mod summarize;
pub mod types;

pub use errors::{Result, SpanRankError};
pub use graph::builder::CooccurrenceBuilder;
pub use graph::csr::CsrGraph;
pub use keywords::KeywordRanker;
pub use ngram::{retained_spans, spans, AdjNounFilter, FnFilter, NounFilter, SpanFilter, TrigramFilter};
pub use nlp::{StopwordFilter, Tokenizer};
pub use pagerank::{PageRank, PageRankResult};
pub use regress::{alpha_sweep, fit_lasso, fit_ridge, AlphaPoint, Dataset, FitSummary};
pub use report::{top_k, RankedNode};
pub use summarize::{RankedSentence, Summarizer};
pub use types::{PosTag, RankConfig, Span, Token};

/// Crate version, for embedding in serialized reports
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
