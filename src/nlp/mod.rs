//! Natural language plumbing: tokenization and stop-word filtering.

pub mod stopwords;
pub mod tokenizer;

pub use stopwords::StopwordFilter;
pub use tokenizer::Tokenizer;
