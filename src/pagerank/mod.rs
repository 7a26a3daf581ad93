//! PageRank over keyword graphs

pub mod standard;

/// Result of a PageRank run
#[derive(Debug, Clone, PartialEq)]
pub struct PageRankResult {
    /// Per-node scores indexed by CSR node ID; sum to 1.0 for a non-empty graph
    pub scores: Vec<f64>,
    /// Whether the power iteration converged within the threshold
    pub converged: bool,
    /// Number of iterations actually performed
    pub iterations: usize,
    /// Final L1-norm delta between the last two iterates
    pub delta: f64,
}

impl PageRankResult {
    /// Result for a graph with no nodes
    pub fn empty() -> Self {
        Self {
            scores: Vec::new(),
            converged: true,
            iterations: 0,
            delta: 0.0,
        }
    }

    /// Score for a specific node (0.0 when out of range)
    #[inline]
    pub fn score(&self, node_id: u32) -> f64 {
        self.scores.get(node_id as usize).copied().unwrap_or(0.0)
    }

    /// Node IDs ordered by score descending; equal scores keep ascending ID
    /// order, which for a [`CsrGraph`](crate::graph::csr::CsrGraph) is
    /// lexicographic word order.
    pub fn ranked_nodes(&self) -> Vec<u32> {
        let mut ids: Vec<u32> = (0..self.scores.len() as u32).collect();
        ids.sort_by(|&a, &b| {
            self.score(b)
                .total_cmp(&self.score(a))
                .then_with(|| a.cmp(&b))
        });
        ids
    }
}
