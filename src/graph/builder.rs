//! Co-occurrence graph construction.
//!
//! The builder scans the *unfiltered* span sequence: a retained span at
//! position `i` gains a forward edge to every retained span found at
//! positions `i+1 ..= i+W` (clipped to the sequence end). Accumulation is
//! directional (the window only looks ahead) and is preserved rather than
//! symmetrized; the ranker normalizes outgoing weight per node.

use crate::types::Span;
use log::debug;
use rayon::prelude::*;
use rustc_hash::{FxHashMap, FxHashSet};

/// Threshold below which the parallel build falls back to the sequential path
const PARALLEL_MIN_POSITIONS: usize = 4096;

/// A node under construction
#[derive(Debug, Clone)]
pub struct BuilderNode {
    /// The span this node represents
    pub span: Span,
    /// Outgoing adjacency: target node id -> accumulated weight
    pub edges: FxHashMap<u32, f64>,
}

impl BuilderNode {
    fn new(span: Span) -> Self {
        Self {
            span,
            edges: FxHashMap::default(),
        }
    }
}

/// Mutable co-occurrence graph builder with O(1) edge lookups
#[derive(Debug, Default)]
pub struct CooccurrenceBuilder {
    span_to_id: FxHashMap<Span, u32>,
    nodes: Vec<BuilderNode>,
}

impl CooccurrenceBuilder {
    /// Create an empty builder
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a builder with pre-allocated node capacity
    pub fn with_capacity(node_capacity: usize) -> Self {
        Self {
            span_to_id: FxHashMap::with_capacity_and_hasher(node_capacity, Default::default()),
            nodes: Vec::with_capacity(node_capacity),
        }
    }

    /// Get or create the node for a span, returning its dense id
    pub fn get_or_create_node(&mut self, span: &Span) -> u32 {
        if let Some(&id) = self.span_to_id.get(span) {
            return id;
        }
        let id = self.nodes.len() as u32;
        self.span_to_id.insert(span.clone(), id);
        self.nodes.push(BuilderNode::new(span.clone()));
        id
    }

    /// Accumulate weight on the directed edge `from -> to`.
    ///
    /// Self-loops are ignored: a span repeating inside its own window adds
    /// nothing.
    pub fn add_edge(&mut self, from: u32, to: u32, weight: f64) {
        if from == to {
            return;
        }
        if let Some(node) = self.nodes.get_mut(from as usize) {
            *node.edges.entry(to).or_insert(0.0) += weight;
        }
    }

    /// Build the co-occurrence graph for a span sequence.
    ///
    /// `sequence` is the full, unfiltered span sequence over the whole text;
    /// `retained` is the node universe; `window` is the number of forward
    /// positions scanned. Node ids follow first retained occurrence order,
    /// so construction is deterministic.
    pub fn from_sequence(sequence: &[Span], retained: &FxHashSet<Span>, window: usize) -> Self {
        let mut builder = Self::with_capacity(retained.len());

        for (i, span) in sequence.iter().enumerate() {
            if !retained.contains(span) {
                continue;
            }
            let from = builder.get_or_create_node(span);

            let end = (i + window).min(sequence.len().saturating_sub(1));
            for neighbor in &sequence[i + 1..=end] {
                if retained.contains(neighbor) {
                    let to = builder.get_or_create_node(neighbor);
                    builder.add_edge(from, to, 1.0);
                }
            }
        }

        debug!(
            "co-occurrence graph: {} nodes, {} edges (window {})",
            builder.node_count(),
            builder.edge_count(),
            window
        );
        builder
    }

    /// Parallel variant of [`CooccurrenceBuilder::from_sequence`] for large
    /// documents.
    ///
    /// Node ids are pre-assigned from a sequential scan so the result is
    /// identical to the sequential build; only edge counting is chunked
    /// across threads. Edge weights are exact integer counts, so the merged
    /// sums do not depend on reduction order.
    pub fn from_sequence_parallel(
        sequence: &[Span],
        retained: &FxHashSet<Span>,
        window: usize,
    ) -> Self {
        if sequence.len() < PARALLEL_MIN_POSITIONS {
            return Self::from_sequence(sequence, retained, window);
        }

        // Assign ids in first-occurrence order up front.
        let mut builder = Self::with_capacity(retained.len());
        for span in sequence.iter().filter(|s| retained.contains(*s)) {
            builder.get_or_create_node(span);
        }

        let span_to_id = &builder.span_to_id;
        let partials: Vec<FxHashMap<(u32, u32), f64>> = (0..sequence.len())
            .into_par_iter()
            .chunks(1024)
            .map(|positions| {
                let mut edges: FxHashMap<(u32, u32), f64> = FxHashMap::default();
                for i in positions {
                    let Some(&from) = span_to_id.get(&sequence[i]) else {
                        continue;
                    };
                    let end = (i + window).min(sequence.len() - 1);
                    for neighbor in &sequence[i + 1..=end] {
                        if let Some(&to) = span_to_id.get(neighbor) {
                            if from != to {
                                *edges.entry((from, to)).or_insert(0.0) += 1.0;
                            }
                        }
                    }
                }
                edges
            })
            .collect();

        for partial in partials {
            for ((from, to), weight) in partial {
                builder.add_edge(from, to, weight);
            }
        }
        builder
    }

    /// Number of nodes
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Number of directed edges
    pub fn edge_count(&self) -> usize {
        self.nodes.iter().map(|n| n.edges.len()).sum()
    }

    /// Look up a node by id
    pub fn get_node(&self, id: u32) -> Option<&BuilderNode> {
        self.nodes.get(id as usize)
    }

    /// Look up a node id by span
    pub fn get_node_id(&self, span: &Span) -> Option<u32> {
        self.span_to_id.get(span).copied()
    }

    /// The accumulated weight on `from -> to`, zero if absent
    pub fn edge_weight(&self, from: u32, to: u32) -> f64 {
        self.get_node(from)
            .and_then(|n| n.edges.get(&to).copied())
            .unwrap_or(0.0)
    }

    /// Iterate over nodes in id order
    pub fn nodes(&self) -> impl Iterator<Item = (u32, &BuilderNode)> {
        self.nodes.iter().enumerate().map(|(i, n)| (i as u32, n))
    }

    /// Whether the graph has no nodes
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ngram::{retained_spans, spans, NounFilter};
    use crate::types::{PosTag, Token};

    fn tok(text: &str, pos: PosTag, idx: usize) -> Token {
        let stop = matches!(text, "The" | "the");
        Token::new(text, text.to_lowercase(), pos, 0, text.len(), 0, idx).with_stopword(stop)
    }

    /// "The cat sat. The dog ran." tagged token by token.
    fn cat_dog_tokens() -> Vec<Token> {
        vec![
            tok("The", PosTag::Determiner, 0),
            tok("cat", PosTag::Noun, 1),
            tok("sat", PosTag::Verb, 2),
            tok(".", PosTag::Punctuation, 3),
            tok("The", PosTag::Determiner, 4),
            tok("dog", PosTag::Noun, 5),
            tok("ran", PosTag::Verb, 6),
            tok(".", PosTag::Punctuation, 7),
        ]
    }

    #[test]
    fn test_worked_example_cat_dog_window_4() {
        let tokens = cat_dog_tokens();
        let sequence = spans(&tokens, 1);
        let retained = retained_spans(&tokens, 1, &NounFilter);
        assert_eq!(retained.len(), 2);

        let builder = CooccurrenceBuilder::from_sequence(&sequence, &retained, 4);
        assert_eq!(builder.node_count(), 2);

        // "cat" is at position 1, "dog" at position 5: the window 2..=5
        // (counted over the full sequence, punctuation included) reaches it.
        let cat = builder.get_node_id(&Span::unigram("cat")).unwrap();
        let dog = builder.get_node_id(&Span::unigram("dog")).unwrap();
        assert_eq!(builder.edge_weight(cat, dog), 1.0);
        // Forward-only accumulation: no reverse edge.
        assert_eq!(builder.edge_weight(dog, cat), 0.0);
    }

    #[test]
    fn test_window_3_misses_dog() {
        let tokens = cat_dog_tokens();
        let sequence = spans(&tokens, 1);
        let retained = retained_spans(&tokens, 1, &NounFilter);

        let builder = CooccurrenceBuilder::from_sequence(&sequence, &retained, 3);
        let cat = builder.get_node_id(&Span::unigram("cat")).unwrap();
        let dog = builder.get_node_id(&Span::unigram("dog")).unwrap();
        // Window 2..=4 stops one short of "dog" at position 5.
        assert_eq!(builder.edge_weight(cat, dog), 0.0);
    }

    #[test]
    fn test_weights_accumulate() {
        let seq = vec![
            Span::unigram("a"),
            Span::unigram("b"),
            Span::unigram("a"),
            Span::unigram("b"),
        ];
        let retained: FxHashSet<Span> = seq.iter().cloned().collect();
        let builder = CooccurrenceBuilder::from_sequence(&seq, &retained, 2);

        let a = builder.get_node_id(&Span::unigram("a")).unwrap();
        let b = builder.get_node_id(&Span::unigram("b")).unwrap();
        // a@0 sees b@1, a@2; a@2 sees b@3. Self-pairs add nothing.
        assert_eq!(builder.edge_weight(a, b), 2.0);
        assert_eq!(builder.edge_weight(b, a), 1.0);
    }

    #[test]
    fn test_no_self_loops() {
        let seq = vec![Span::unigram("a"), Span::unigram("a")];
        let retained: FxHashSet<Span> = seq.iter().cloned().collect();
        let builder = CooccurrenceBuilder::from_sequence(&seq, &retained, 4);
        assert_eq!(builder.node_count(), 1);
        assert_eq!(builder.edge_count(), 0);
    }

    #[test]
    fn test_window_clipped_at_end() {
        let seq = vec![Span::unigram("x"), Span::unigram("y")];
        let retained: FxHashSet<Span> = seq.iter().cloned().collect();
        // Window far larger than the sequence must not panic.
        let builder = CooccurrenceBuilder::from_sequence(&seq, &retained, 100);
        let x = builder.get_node_id(&Span::unigram("x")).unwrap();
        let y = builder.get_node_id(&Span::unigram("y")).unwrap();
        assert_eq!(builder.edge_weight(x, y), 1.0);
    }

    #[test]
    fn test_isolated_node_has_no_edges() {
        let seq = vec![
            Span::unigram("lonely"),
            Span::unigram("filler"),
            Span::unigram("far"),
        ];
        let retained: FxHashSet<Span> = [Span::unigram("lonely"), Span::unigram("far")]
            .into_iter()
            .collect();
        let builder = CooccurrenceBuilder::from_sequence(&seq, &retained, 1);
        // "filler" sits between them and is not retained; window 1 cannot
        // bridge the gap.
        assert_eq!(builder.node_count(), 2);
        assert_eq!(builder.edge_count(), 0);
    }

    #[test]
    fn test_unretained_spans_create_no_nodes() {
        let seq = vec![Span::unigram("a"), Span::unigram("b")];
        let retained: FxHashSet<Span> = [Span::unigram("a")].into_iter().collect();
        let builder = CooccurrenceBuilder::from_sequence(&seq, &retained, 4);
        assert_eq!(builder.node_count(), 1);
        assert!(builder.get_node_id(&Span::unigram("b")).is_none());
    }

    #[test]
    fn test_parallel_matches_sequential() {
        // Synthetic sequence long enough to exercise the parallel path.
        let vocab = ["alpha", "beta", "gamma", "delta", "epsilon"];
        let seq: Vec<Span> = (0..5000)
            .map(|i| Span::unigram(vocab[i % vocab.len()]))
            .collect();
        let retained: FxHashSet<Span> = vocab.iter().map(|v| Span::unigram(*v)).collect();

        let seq_build = CooccurrenceBuilder::from_sequence(&seq, &retained, 4);
        let par_build = CooccurrenceBuilder::from_sequence_parallel(&seq, &retained, 4);

        assert_eq!(seq_build.node_count(), par_build.node_count());
        for (_, node) in seq_build.nodes() {
            let par_id = par_build.get_node_id(&node.span).unwrap();
            let seq_id = seq_build.get_node_id(&node.span).unwrap();
            for (&to, &w) in &node.edges {
                let target = &seq_build.get_node(to).unwrap().span;
                let par_to = par_build.get_node_id(target).unwrap();
                assert_eq!(par_build.edge_weight(par_id, par_to), w);
            }
            let _ = seq_id;
        }
    }

    #[test]
    fn test_empty_sequence() {
        let builder = CooccurrenceBuilder::from_sequence(&[], &FxHashSet::default(), 4);
        assert!(builder.is_empty());
    }
}
