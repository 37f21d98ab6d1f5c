//! Co-occurrence graph construction and storage.
//!
//! A mutable [`builder::CooccurrenceBuilder`] accumulates window counts;
//! the immutable [`csr::CsrGraph`] snapshot feeds the ranking engine.

pub mod builder;
pub mod csr;
