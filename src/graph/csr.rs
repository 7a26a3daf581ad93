//! Compressed sparse row graph
//!
//! An immutable, deterministically ordered view of a [`PhraseGraph`]:
//! nodes are sorted lexicographically by word and every neighbour list is
//! sorted by node ID, so any reduction over the graph visits edges in the
//! same order on every run.

use super::builder::PhraseGraph;
use rustc_hash::FxHashMap;

/// Immutable weighted undirected graph in CSR layout
#[derive(Debug, Clone, Default)]
pub struct CsrGraph {
    /// Number of nodes
    pub num_nodes: usize,
    /// Node words, indexed by CSR node ID (sorted ascending)
    pub words: Vec<String>,
    /// `row_ptr[i]..row_ptr[i + 1]` indexes the neighbours of node `i`
    pub row_ptr: Vec<usize>,
    /// Neighbour node IDs
    pub col_idx: Vec<u32>,
    /// Edge weights, parallel to `col_idx`
    pub weights: Vec<f64>,
    /// Sum of edge weights per node
    pub out_weight: Vec<f64>,
    word_to_id: FxHashMap<String, u32>,
}

impl CsrGraph {
    /// Freeze a [`PhraseGraph`] into CSR form
    pub fn from_builder(builder: &PhraseGraph) -> Self {
        let mut order: Vec<(u32, &str)> = builder
            .nodes()
            .map(|(id, node)| (id, node.word.as_str()))
            .collect();
        order.sort_by(|a, b| a.1.cmp(b.1));

        // builder ID -> CSR ID
        let mut remap = vec![0u32; order.len()];
        for (csr_id, (builder_id, _)) in order.iter().enumerate() {
            remap[*builder_id as usize] = csr_id as u32;
        }

        let num_nodes = order.len();
        let mut words = Vec::with_capacity(num_nodes);
        let mut row_ptr = Vec::with_capacity(num_nodes + 1);
        let mut col_idx = Vec::with_capacity(builder.edge_count() * 2);
        let mut weights = Vec::with_capacity(builder.edge_count() * 2);
        let mut out_weight = Vec::with_capacity(num_nodes);
        let mut word_to_id =
            FxHashMap::with_capacity_and_hasher(num_nodes, Default::default());

        row_ptr.push(0);
        for (csr_id, (builder_id, word)) in order.iter().enumerate() {
            let mut neighbours: Vec<(u32, f64)> = builder
                .get_node(*builder_id)
                .map(|node| {
                    node.edges
                        .iter()
                        .map(|(&to, &w)| (remap[to as usize], w))
                        .collect()
                })
                .unwrap_or_default();
            neighbours.sort_by_key(|&(to, _)| to);

            let mut total = 0.0;
            for (to, w) in neighbours {
                col_idx.push(to);
                weights.push(w);
                total += w;
            }

            words.push(word.to_string());
            word_to_id.insert(word.to_string(), csr_id as u32);
            out_weight.push(total);
            row_ptr.push(col_idx.len());
        }

        Self {
            num_nodes,
            words,
            row_ptr,
            col_idx,
            weights,
            out_weight,
            word_to_id,
        }
    }

    /// Number of undirected edges
    pub fn num_edges(&self) -> usize {
        self.col_idx.len() / 2
    }

    /// Neighbours of `node` with their edge weights, in ascending ID order
    pub fn neighbours(&self, node: u32) -> impl Iterator<Item = (u32, f64)> + '_ {
        let start = self.row_ptr[node as usize];
        let end = self.row_ptr[node as usize + 1];
        self.col_idx[start..end]
            .iter()
            .copied()
            .zip(self.weights[start..end].iter().copied())
    }

    /// Word for a node ID
    pub fn word(&self, node: u32) -> Option<&str> {
        self.words.get(node as usize).map(String::as_str)
    }

    /// Node ID for a word
    pub fn get_node_by_word(&self, word: &str) -> Option<u32> {
        self.word_to_id.get(word).copied()
    }

    /// Check if the graph has no nodes
    pub fn is_empty(&self) -> bool {
        self.num_nodes == 0
    }
}
