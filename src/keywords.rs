//! End-to-end keyword ranking.
//!
//! Ties the stages together: token stream → n-gram spans → retained-span set
//! → co-occurrence graph → PageRank → top-K report. Every intermediate is
//! passed explicitly; runs are independent and stateless.

use crate::errors::{Result, SpanRankError};
use crate::graph::builder::CooccurrenceBuilder;
use crate::graph::csr::CsrGraph;
use crate::ngram::{retained_spans, spans, SpanFilter};
use crate::pagerank::PageRank;
use crate::report::{top_k, RankedNode};
use crate::types::{RankConfig, Token};
use log::debug;

/// Keyword ranker over co-occurrence graphs of n-gram spans
#[derive(Debug, Clone)]
pub struct KeywordRanker {
    config: RankConfig,
}

impl KeywordRanker {
    /// Create a ranker with the given configuration
    pub fn new(config: RankConfig) -> Self {
        Self { config }
    }

    /// The active configuration
    pub fn config(&self) -> &RankConfig {
        &self.config
    }

    /// Rank n-gram spans of the given arity.
    ///
    /// Returns [`SpanRankError::EmptyInput`] when no span survives the
    /// filter, so the ranking engine is never handed an empty node universe.
    pub fn rank(
        &self,
        tokens: &[Token],
        n: usize,
        filter: &dyn SpanFilter,
    ) -> Result<Vec<RankedNode>> {
        self.config.validate()?;

        let sequence = spans(tokens, n);
        let retained = retained_spans(tokens, n, filter);
        if retained.is_empty() {
            return Err(SpanRankError::empty_input(format!(
                "no {}-gram span survived filtering ({} tokens in)",
                n.max(1),
                tokens.len()
            )));
        }

        let builder = CooccurrenceBuilder::from_sequence_parallel(
            &sequence,
            &retained,
            self.config.window_size,
        );
        let graph = CsrGraph::from_builder(&builder);
        debug!(
            "ranking {} spans over {} edges",
            graph.num_nodes,
            graph.num_edges()
        );

        let result = PageRank::new()
            .with_damping(self.config.damping)
            .with_tolerance(self.config.tolerance)
            .with_max_iterations(self.config.max_iterations)
            .run(&graph);

        Ok(top_k(&graph, &result, self.config.top_k))
    }
}
