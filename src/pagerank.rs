//! PageRank over a weighted directed graph.
//!
//! Power iteration with damping and proper dangling-node handling: nodes
//! with no outgoing edges spread their mass uniformly, so isolated nodes
//! never cause a division by zero and still receive the restart mass.
//! The iteration is bounded; hitting the cap reports non-convergence and
//! returns the last iterate instead of looping.

use crate::graph::csr::CsrGraph;
use log::warn;

/// Result of a PageRank computation
#[derive(Debug, Clone)]
pub struct PageRankResult {
    /// Scores per node, indexed by node id; non-negative, summing to ~1
    pub scores: Vec<f64>,
    /// Number of iterations performed
    pub iterations: usize,
    /// Final L1 change between iterations
    pub delta: f64,
    /// Whether the tolerance was reached within the iteration cap
    pub converged: bool,
}

impl PageRankResult {
    /// Score for a node, zero if out of range
    pub fn score(&self, node: u32) -> f64 {
        self.scores.get(node as usize).copied().unwrap_or(0.0)
    }
}

/// Damped PageRank with an L1 convergence test
#[derive(Debug, Clone)]
pub struct PageRank {
    /// Damping factor (probability of following an edge)
    pub damping: f64,
    /// Convergence tolerance on the L1 change between iterations
    pub tolerance: f64,
    /// Iteration cap
    pub max_iterations: usize,
}

impl Default for PageRank {
    fn default() -> Self {
        Self {
            damping: 0.85,
            tolerance: 1e-8,
            max_iterations: 100,
        }
    }
}

impl PageRank {
    /// Create a ranker with default parameters
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

    /// Run power iteration on a graph.
    ///
    /// Always returns a result; `converged` is false when the cap was hit.
    pub fn run(&self, graph: &CsrGraph) -> PageRankResult {
        let n = graph.num_nodes;
        if n == 0 {
            return PageRankResult {
                scores: Vec::new(),
                iterations: 0,
                delta: 0.0,
                converged: true,
            };
        }

        let uniform = 1.0 / n as f64;
        let mut scores = vec![uniform; n];
        let mut new_scores = vec![0.0; n];

        let dangling = graph.dangling_nodes();
        let teleport = (1.0 - self.damping) / n as f64;

        let mut iterations = 0;
        let mut delta = f64::MAX;

        while iterations < self.max_iterations && delta > self.tolerance {
            iterations += 1;

            // Mass from nodes without outgoing edges spreads uniformly.
            let dangling_mass: f64 = dangling.iter().map(|&d| scores[d as usize]).sum();
            new_scores.fill(teleport + self.damping * dangling_mass / n as f64);

            for (node, &score) in scores.iter().enumerate() {
                let total = graph.node_total_weight(node as u32);
                if total > 0.0 {
                    for (neighbor, weight) in graph.neighbors(node as u32) {
                        new_scores[neighbor as usize] += self.damping * score * weight / total;
                    }
                }
            }

            delta = scores
                .iter()
                .zip(new_scores.iter())
                .map(|(old, new)| (old - new).abs())
                .sum();

            std::mem::swap(&mut scores, &mut new_scores);
        }

        let converged = delta <= self.tolerance;
        if !converged {
            warn!(
                "pagerank did not converge after {} iterations (delta {:.3e} > tolerance {:.3e}); returning last iterate",
                iterations, delta, self.tolerance
            );
        }

        // Guard against drift; scores already sum to ~1.
        let sum: f64 = scores.iter().sum();
        if sum > 0.0 {
            for score in &mut scores {
                *score /= sum;
            }
        }

        PageRankResult {
            scores,
            iterations,
            delta,
            converged,
        }
    }
}
