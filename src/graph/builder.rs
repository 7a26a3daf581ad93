//! Phrase graph builder
//!
//! Builds a complete undirected graph over distinct candidate keywords,
//! weighting every edge by the Levenshtein distance between its endpoints.
//! Uses FxHashMap for O(1) node and edge lookups during construction.

use crate::nlp::distance::levenshtein;
use rayon::prelude::*;
use rustc_hash::FxHashMap;

/// A node in the phrase graph
#[derive(Debug, Clone)]
pub struct BuilderNode {
    /// The candidate keyword for this node
    pub word: String,
    /// Adjacency list: target node ID -> edge weight
    pub edges: FxHashMap<u32, f64>,
}

impl BuilderNode {
    /// Create a new node
    pub fn new(word: impl Into<String>) -> Self {
        Self {
            word: word.into(),
            edges: FxHashMap::default(),
        }
    }
}

/// A mutable graph over candidate keywords
#[derive(Debug, Default)]
pub struct PhraseGraph {
    /// Maps word -> node ID
    word_to_id: FxHashMap<String, u32>,
    /// Node storage
    nodes: Vec<BuilderNode>,
}

impl PhraseGraph {
    /// Create a new empty graph
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a graph with pre-allocated capacity
    pub fn with_capacity(node_capacity: usize) -> Self {
        Self {
            word_to_id: FxHashMap::with_capacity_and_hasher(node_capacity, Default::default()),
            nodes: Vec::with_capacity(node_capacity),
        }
    }

    /// Get or create a node for the given word, returning its ID
    pub fn get_or_create_node(&mut self, word: &str) -> u32 {
        if let Some(&id) = self.word_to_id.get(word) {
            return id;
        }

        let id = self.nodes.len() as u32;
        self.word_to_id.insert(word.to_string(), id);
        self.nodes.push(BuilderNode::new(word));
        id
    }

    /// Set the weight of the edge between two nodes.
    ///
    /// Self-loops are ignored. An existing weight is replaced.
    pub fn set_edge(&mut self, from: u32, to: u32, weight: f64) {
        if from == to {
            return; // No self-loops
        }

        // Add edge in both directions (undirected graph)
        if let Some(node) = self.nodes.get_mut(from as usize) {
            node.edges.insert(to, weight);
        }
        if let Some(node) = self.nodes.get_mut(to as usize) {
            node.edges.insert(from, weight);
        }
    }

    /// Build the complete edit-distance graph over `candidates`.
    ///
    /// Repeated candidates collapse onto one node.
    pub fn from_candidates<S: AsRef<str>>(candidates: &[S]) -> Self {
        let mut graph = Self::with_nodes(candidates);
        graph.connect_all();
        graph
    }

    fn connect_all(&mut self) {
        let n = self.nodes.len() as u32;
        for a in 0..n {
            for b in (a + 1)..n {
                let weight = levenshtein(&self.nodes[a as usize].word, &self.nodes[b as usize].word);
                self.set_edge(a, b, weight as f64);
            }
        }
    }

    fn with_nodes<S: AsRef<str>>(candidates: &[S]) -> Self {
        let mut graph = Self::with_capacity(candidates.len());
        for candidate in candidates {
            graph.get_or_create_node(candidate.as_ref());
        }
        graph
    }

    /// Get the number of nodes in the graph
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Get the total number of edges (counting each undirected edge once)
    pub fn edge_count(&self) -> usize {
        self.nodes.iter().map(|n| n.edges.len()).sum::<usize>() / 2
    }

    /// Get a node by ID
    pub fn get_node(&self, id: u32) -> Option<&BuilderNode> {
        self.nodes.get(id as usize)
    }

    /// Get a node ID by word
    pub fn get_node_id(&self, word: &str) -> Option<u32> {
        self.word_to_id.get(word).copied()
    }

    /// Get the word for a node ID
    pub fn get_word(&self, id: u32) -> Option<&str> {
        self.nodes.get(id as usize).map(|n| n.word.as_str())
    }

    /// Get the weight of the edge between two words
    pub fn edge_weight(&self, a: &str, b: &str) -> Option<f64> {
        let a = self.get_node_id(a)?;
        let b = self.get_node_id(b)?;
        self.nodes.get(a as usize)?.edges.get(&b).copied()
    }

    /// Iterate over all nodes
    pub fn nodes(&self) -> impl Iterator<Item = (u32, &BuilderNode)> {
        self.nodes.iter().enumerate().map(|(i, n)| (i as u32, n))
    }

    /// Check if the graph is empty
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}

/// Build the complete edit-distance graph, computing pair distances in
/// parallel once the node count reaches `parallel_threshold`.
///
/// The result is identical to [`PhraseGraph::from_candidates`].
pub fn build_graph_parallel<S: AsRef<str> + Sync>(
    candidates: &[S],
    parallel_threshold: usize,
) -> PhraseGraph {
    let mut graph = PhraseGraph::with_nodes(candidates);
    let n = graph.nodes.len() as u32;

    // For small graphs, sequential is faster
    if (n as usize) < parallel_threshold {
        graph.connect_all();
        return graph;
    }

    let words: Vec<&str> = graph.nodes.iter().map(|node| node.word.as_str()).collect();
    let weighted_pairs: Vec<(u32, u32, f64)> = (0..n)
        .into_par_iter()
        .flat_map_iter(|a| {
            let words = &words;
            ((a + 1)..n).map(move |b| {
                (a, b, levenshtein(words[a as usize], words[b as usize]) as f64)
            })
        })
        .collect();

    for (a, b, weight) in weighted_pairs {
        graph.set_edge(a, b, weight);
    }

    graph
}
