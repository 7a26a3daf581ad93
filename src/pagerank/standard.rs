//! Weighted power-iteration PageRank
//!
//! Transition probabilities are edge weights normalised by the source node's
//! total weight. Nodes without any weight (dangling) spread their mass
//! uniformly, so a lone node ends with a score of exactly 1.0.
//!
//! Iteration stops once the L1 change between iterates drops below
//! `num_nodes * threshold`, or after `max_iterations`.

use super::PageRankResult;
use crate::graph::csr::CsrGraph;

/// Standard PageRank solver
#[derive(Debug, Clone)]
pub struct StandardPageRank {
    damping: f64,
    max_iterations: usize,
    threshold: f64,
}

impl Default for StandardPageRank {
    fn default() -> Self {
        Self::new()
    }
}

impl StandardPageRank {
    /// Create a solver with damping 0.85, 100 iterations, threshold 1e-6
    pub fn new() -> Self {
        Self {
            damping: 0.85,
            max_iterations: 100,
            threshold: 1e-6,
        }
    }

    /// Builder method: set damping factor
    pub fn with_damping(mut self, damping: f64) -> Self {
        self.damping = damping;
        self
    }

    /// Builder method: set max iterations
    pub fn with_max_iterations(mut self, max_iterations: usize) -> Self {
        self.max_iterations = max_iterations;
        self
    }

    /// Builder method: set per-node convergence threshold
    pub fn with_threshold(mut self, threshold: f64) -> Self {
        self.threshold = threshold;
        self
    }

    /// Run PageRank on `graph`.
    ///
    /// Never fails: when the iteration cap is hit the last iterate is
    /// returned with `converged == false`.
    pub fn run(&self, graph: &CsrGraph) -> PageRankResult {
        let n = graph.num_nodes;
        if n == 0 {
            return PageRankResult::empty();
        }

        let uniform = 1.0 / n as f64;
        let teleport = (1.0 - self.damping) * uniform;
        let tolerance = n as f64 * self.threshold;

        let mut scores = vec![uniform; n];
        let mut next = vec![0.0; n];
        let mut delta = f64::INFINITY;
        let mut iterations = 0;

        while iterations < self.max_iterations {
            iterations += 1;

            let dangling_mass: f64 = (0..n)
                .filter(|&u| graph.out_weight[u] == 0.0)
                .map(|u| scores[u])
                .sum();
            let base = teleport + self.damping * dangling_mass * uniform;

            for (v, slot) in next.iter_mut().enumerate() {
                let incoming: f64 = graph
                    .neighbours(v as u32)
                    .filter(|&(u, _)| graph.out_weight[u as usize] > 0.0)
                    .map(|(u, w)| scores[u as usize] * w / graph.out_weight[u as usize])
                    .sum();
                *slot = base + self.damping * incoming;
            }

            delta = next
                .iter()
                .zip(scores.iter())
                .map(|(a, b)| (a - b).abs())
                .sum();
            std::mem::swap(&mut scores, &mut next);

            if delta < tolerance {
                return PageRankResult {
                    scores,
                    converged: true,
                    iterations,
                    delta,
                };
            }
        }

        tracing::warn!(
            iterations,
            delta,
            nodes = n,
            "PageRank did not converge; using last iterate"
        );

        PageRankResult {
            scores,
            converged: false,
            iterations,
            delta,
        }
    }
}
