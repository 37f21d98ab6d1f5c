//! Compressed Sparse Row (CSR) snapshot of a built graph.
//!
//! CSR stores edges contiguously, which is what the ranking engine wants:
//! power iteration repeatedly walks every edge. The snapshot is immutable
//! once constructed.

use super::builder::CooccurrenceBuilder;

/// An immutable weighted directed graph in CSR form
#[derive(Debug, Clone)]
pub struct CsrGraph {
    /// Number of nodes
    pub num_nodes: usize,
    /// Row pointers: node i's edges live at indices row_ptr[i]..row_ptr[i+1]
    pub row_ptr: Vec<usize>,
    /// Column indices (edge targets)
    pub col_idx: Vec<u32>,
    /// Edge weights
    pub weights: Vec<f64>,
    /// Total outgoing weight per node
    pub total_weight: Vec<f64>,
    /// Human-readable label per node (span label, sentence id, ...)
    pub labels: Vec<String>,
}

impl CsrGraph {
    /// Snapshot a [`CooccurrenceBuilder`] into CSR form.
    ///
    /// Edges are sorted by target id per node so iteration order is stable.
    pub fn from_builder(builder: &CooccurrenceBuilder) -> Self {
        let num_nodes = builder.node_count();
        let mut row_ptr = Vec::with_capacity(num_nodes + 1);
        let mut col_idx = Vec::new();
        let mut weights = Vec::new();
        let mut total_weight = Vec::with_capacity(num_nodes);
        let mut labels = Vec::with_capacity(num_nodes);

        row_ptr.push(0);
        for (_, node) in builder.nodes() {
            labels.push(node.span.label());

            let mut edges: Vec<_> = node.edges.iter().map(|(&k, &v)| (k, v)).collect();
            edges.sort_by_key(|(k, _)| *k);

            total_weight.push(edges.iter().map(|(_, w)| w).sum());
            for (target, weight) in edges {
                col_idx.push(target);
                weights.push(weight);
            }
            row_ptr.push(col_idx.len());
        }

        Self {
            num_nodes,
            row_ptr,
            col_idx,
            weights,
            total_weight,
            labels,
        }
    }

    /// Build directly from a labeled edge list.
    ///
    /// Node ids are the indices into `labels`; edges referencing ids outside
    /// that range are dropped. Duplicate edges keep their separate entries.
    pub fn from_edges(labels: Vec<String>, edges: &[(u32, u32, f64)]) -> Self {
        let num_nodes = labels.len();
        let mut sorted: Vec<_> = edges
            .iter()
            .copied()
            .filter(|(f, t, _)| (*f as usize) < num_nodes && (*t as usize) < num_nodes)
            .collect();
        sorted.sort_by_key(|(f, t, _)| (*f, *t));

        let mut row_ptr = vec![0usize; num_nodes + 1];
        let mut col_idx = Vec::with_capacity(sorted.len());
        let mut weights = Vec::with_capacity(sorted.len());
        let mut total_weight = vec![0.0; num_nodes];

        let mut cursor = 0usize;
        for node in 0..num_nodes as u32 {
            while cursor < sorted.len() && sorted[cursor].0 == node {
                let (_, to, w) = sorted[cursor];
                col_idx.push(to);
                weights.push(w);
                total_weight[node as usize] += w;
                cursor += 1;
            }
            row_ptr[node as usize + 1] = col_idx.len();
        }

        Self {
            num_nodes,
            row_ptr,
            col_idx,
            weights,
            total_weight,
            labels,
        }
    }

    /// Iterate over the out-neighbors of a node
    pub fn neighbors(&self, node: u32) -> impl Iterator<Item = (u32, f64)> + '_ {
        let start = self.row_ptr[node as usize];
        let end = self.row_ptr[node as usize + 1];
        (start..end).map(move |i| (self.col_idx[i], self.weights[i]))
    }

    /// Total outgoing weight of a node
    pub fn node_total_weight(&self, node: u32) -> f64 {
        self.total_weight[node as usize]
    }

    /// Label of a node
    pub fn label(&self, node: u32) -> &str {
        &self.labels[node as usize]
    }

    /// Number of directed edges
    pub fn num_edges(&self) -> usize {
        self.col_idx.len()
    }

    /// Whether the graph has no nodes
    pub fn is_empty(&self) -> bool {
        self.num_nodes == 0
    }

    /// Nodes with no outgoing edges (isolated or sink nodes)
    pub fn dangling_nodes(&self) -> Vec<u32> {
        (0..self.num_nodes as u32)
            .filter(|&n| self.row_ptr[n as usize] == self.row_ptr[n as usize + 1])
            .collect()
    }
}

impl Default for CsrGraph {
    fn default() -> Self {
        Self {
            num_nodes: 0,
            row_ptr: vec![0],
            col_idx: Vec::new(),
            weights: Vec::new(),
            total_weight: Vec::new(),
            labels: Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Span;

    fn build_test_graph() -> CooccurrenceBuilder {
        let mut builder = CooccurrenceBuilder::new();
        let a = builder.get_or_create_node(&Span::unigram("a"));
        let b = builder.get_or_create_node(&Span::unigram("b"));
        let c = builder.get_or_create_node(&Span::unigram("c"));

        builder.add_edge(a, b, 1.0);
        builder.add_edge(a, c, 1.5);
        builder.add_edge(b, c, 2.0);
        builder
    }

    #[test]
    fn test_csr_conversion() {
        let csr = CsrGraph::from_builder(&build_test_graph());
        assert_eq!(csr.num_nodes, 3);
        assert_eq!(csr.labels, vec!["a", "b", "c"]);
        assert_eq!(csr.num_edges(), 3);
    }

    #[test]
    fn test_neighbor_iteration_sorted() {
        let csr = CsrGraph::from_builder(&build_test_graph());
        let neighbors: Vec<_> = csr.neighbors(0).collect();
        assert_eq!(neighbors, vec![(1, 1.0), (2, 1.5)]);
    }

    #[test]
    fn test_total_weight() {
        let csr = CsrGraph::from_builder(&build_test_graph());
        assert!((csr.node_total_weight(0) - 2.5).abs() < 1e-12);
        assert!((csr.node_total_weight(1) - 2.0).abs() < 1e-12);
    }

    #[test]
    fn test_dangling_nodes() {
        let csr = CsrGraph::from_builder(&build_test_graph());
        // "c" receives edges but sends none.
        assert_eq!(csr.dangling_nodes(), vec![2]);
    }

    #[test]
    fn test_empty_graph() {
        let csr = CsrGraph::default();
        assert!(csr.is_empty());
        assert_eq!(csr.num_edges(), 0);
        assert!(csr.dangling_nodes().is_empty());
    }

    #[test]
    fn test_from_edges() {
        let labels = vec!["s0".to_string(), "s1".to_string(), "s2".to_string()];
        let edges = [(0, 1, 0.5), (1, 0, 0.5), (2, 0, 0.25), (0, 2, 0.25)];
        let csr = CsrGraph::from_edges(labels, &edges);

        assert_eq!(csr.num_nodes, 3);
        assert_eq!(csr.num_edges(), 4);
        let n0: Vec<_> = csr.neighbors(0).collect();
        assert_eq!(n0, vec![(1, 0.5), (2, 0.25)]);
        assert!((csr.node_total_weight(0) - 0.75).abs() < 1e-12);
    }

    #[test]
    fn test_from_edges_drops_out_of_range() {
        let labels = vec!["s0".to_string()];
        let csr = CsrGraph::from_edges(labels, &[(0, 5, 1.0)]);
        assert_eq!(csr.num_edges(), 0);
    }
}
