//! Ranked-result reporting.
//!
//! Sorts node scores descending and returns the top-K. Ties are broken by
//! lexicographic label order so identical inputs always report identically.

use crate::graph::csr::CsrGraph;
use crate::pagerank::PageRankResult;
use serde::{Deserialize, Serialize};

/// A ranked node: its score and its label
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankedNode {
    /// Relative importance score
    pub score: f64,
    /// Node label (span text or sentence id)
    pub label: String,
}

/// Report the top `k` nodes by score, descending, ties by label.
///
/// `k` of zero reports all nodes.
pub fn top_k(graph: &CsrGraph, result: &PageRankResult, k: usize) -> Vec<RankedNode> {
    let mut ranked: Vec<RankedNode> = result
        .scores
        .iter()
        .enumerate()
        .map(|(i, &score)| RankedNode {
            score,
            label: graph.label(i as u32).to_string(),
        })
        .collect();

    ranked.sort_by(|a, b| {
        b.score
            .total_cmp(&a.score)
            .then_with(|| a.label.cmp(&b.label))
    });

    if k > 0 {
        ranked.truncate(k);
    }
    ranked
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fixture(labels: &[&str], scores: &[f64]) -> (CsrGraph, PageRankResult) {
        let graph = CsrGraph::from_edges(labels.iter().map(|s| s.to_string()).collect(), &[]);
        let result = PageRankResult {
            scores: scores.to_vec(),
            iterations: 1,
            delta: 0.0,
            converged: true,
        };
        (graph, result)
    }

    #[test]
    fn test_sorted_descending() {
        let (graph, result) = fixture(&["a", "b", "c"], &[0.2, 0.5, 0.3]);
        let top = top_k(&graph, &result, 3);
        assert_eq!(top[0].label, "b");
        assert_eq!(top[1].label, "c");
        assert_eq!(top[2].label, "a");
    }

    #[test]
    fn test_truncates_to_k() {
        let (graph, result) = fixture(&["a", "b", "c"], &[0.2, 0.5, 0.3]);
        assert_eq!(top_k(&graph, &result, 2).len(), 2);
    }

    #[test]
    fn test_k_zero_returns_all() {
        let (graph, result) = fixture(&["a", "b"], &[0.5, 0.5]);
        assert_eq!(top_k(&graph, &result, 0).len(), 2);
    }

    #[test]
    fn test_ties_broken_lexicographically() {
        let (graph, result) = fixture(&["zebra", "apple", "mango"], &[0.25, 0.25, 0.5]);
        let top = top_k(&graph, &result, 3);
        assert_eq!(top[0].label, "mango");
        assert_eq!(top[1].label, "apple");
        assert_eq!(top[2].label, "zebra");
    }

    #[test]
    fn test_empty() {
        let (graph, result) = fixture(&[], &[]);
        assert!(top_k(&graph, &result, 5).is_empty());
    }
}
