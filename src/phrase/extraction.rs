//! Keyword extraction
//!
//! Ranks candidate words with PageRank over the edit-distance graph, keeps
//! the top third, and rejoins selected words that sit next to each other in
//! the text into two-word phrases.

use crate::errors::Result;
use crate::graph::builder::build_graph_parallel;
use crate::graph::csr::CsrGraph;
use crate::nlp::normalizer::TokenNormalizer;
use crate::nlp::Tagger;
use crate::pagerank::standard::StandardPageRank;
use crate::pagerank::PageRankResult;
use crate::types::ClassifierConfig;
use rustc_hash::FxHashSet;
use std::collections::BTreeSet;

/// Number of top-ranked nodes kept out of `num_nodes`:
/// `num_nodes / divisor + 1`, capped at `num_nodes`.
pub fn selection_size(num_nodes: usize, divisor: usize) -> usize {
    if num_nodes == 0 {
        return 0;
    }
    (num_nodes / divisor.max(1) + 1).min(num_nodes)
}

/// Selects key phrases from a ranked graph and rebuilds adjacent pairs
#[derive(Debug, Clone)]
pub struct KeywordRanker {
    pagerank: StandardPageRank,
    selection_divisor: usize,
}

impl Default for KeywordRanker {
    fn default() -> Self {
        Self::with_config(&ClassifierConfig::default())
    }
}

impl KeywordRanker {
    /// Create a ranker from the PageRank and selection settings in `config`
    pub fn with_config(config: &ClassifierConfig) -> Self {
        Self {
            pagerank: StandardPageRank::new()
                .with_damping(config.damping)
                .with_max_iterations(config.max_iterations)
                .with_threshold(config.convergence_threshold),
            selection_divisor: config.selection_divisor,
        }
    }

    /// Run PageRank on the graph
    pub fn rank(&self, graph: &CsrGraph) -> PageRankResult {
        self.pagerank.run(graph)
    }

    /// Top-ranked words, best first. Equal scores are ordered by word.
    pub fn select_key_phrases(&self, graph: &CsrGraph, pagerank: &PageRankResult) -> Vec<String> {
        let keep = selection_size(graph.num_nodes, self.selection_divisor);
        pagerank
            .ranked_nodes()
            .into_iter()
            .take(keep)
            .filter_map(|id| graph.word(id).map(str::to_string))
            .collect()
    }

    /// Walk the full token sequence and emit key phrases.
    ///
    /// Two adjacent key phrases, neither already used in a pair, are joined
    /// as `"first second"`. Otherwise an unused key phrase in first position
    /// is emitted alone, as is an unused one in last position of the text.
    pub fn reconstruct_phrases<S: AsRef<str>>(
        &self,
        sequence: &[S],
        key_phrases: &[String],
    ) -> BTreeSet<String> {
        let keys: FxHashSet<&str> = key_phrases.iter().map(String::as_str).collect();
        let mut consumed: FxHashSet<&str> = FxHashSet::default();
        let mut phrases = BTreeSet::new();

        if let [only] = sequence {
            if keys.contains(only.as_ref()) {
                phrases.insert(only.as_ref().to_string());
            }
            return phrases;
        }

        for (i, pair) in sequence.windows(2).enumerate() {
            let first = pair[0].as_ref();
            let second = pair[1].as_ref();
            let is_last = i + 2 == sequence.len();

            if keys.contains(first)
                && keys.contains(second)
                && !consumed.contains(first)
                && !consumed.contains(second)
            {
                phrases.insert(format!("{first} {second}"));
                consumed.insert(first);
                consumed.insert(second);
                continue;
            }

            if keys.contains(first) && !consumed.contains(first) {
                phrases.insert(first.to_string());
            }
            // The last word has nothing left to pair with
            if is_last && keys.contains(second) && !consumed.contains(second) {
                phrases.insert(second.to_string());
            }
        }

        phrases
    }
}

/// Result of extracting keywords from one document
#[derive(Debug, Clone, Default)]
pub struct ExtractionResult {
    /// Selected graph nodes, best first
    pub key_phrases: Vec<String>,
    /// Reconstructed one- and two-word phrases
    pub phrases: BTreeSet<String>,
    /// Normalized single-word keywords (may repeat)
    pub keywords: Vec<String>,
    /// Whether PageRank converged
    pub converged: bool,
    /// PageRank iterations performed
    pub iterations: usize,
}

/// Full text -> keywords pipeline
#[derive(Debug, Clone)]
pub struct KeywordExtractor<T> {
    tagger: T,
    config: ClassifierConfig,
    ranker: KeywordRanker,
    normalizer: TokenNormalizer,
}

impl<T: Tagger> KeywordExtractor<T> {
    /// Create an extractor with default config
    pub fn new(tagger: T) -> Self {
        Self::with_config(tagger, ClassifierConfig::default())
    }

    /// Create with custom config
    pub fn with_config(tagger: T, config: ClassifierConfig) -> Self {
        Self {
            ranker: KeywordRanker::with_config(&config),
            tagger,
            config,
            normalizer: TokenNormalizer::new(),
        }
    }

    /// The config this extractor was built with
    pub fn config(&self) -> &ClassifierConfig {
        &self.config
    }

    /// Extract the normalized keyword list for `text`
    pub fn extract(&self, text: &str) -> Result<Vec<String>> {
        Ok(self.extract_with_info(text)?.keywords)
    }

    /// Extract keywords along with the intermediate phrases and PageRank
    /// convergence information
    pub fn extract_with_info(&self, text: &str) -> Result<ExtractionResult> {
        let tagged = self.tagger.tag(text)?;
        // Only candidates lose their dots; the sequence is matched verbatim,
        // so `U.S.` ranks as `US` but is never rebuilt into a phrase.
        let sequence: Vec<&str> = tagged.iter().map(|t| t.text.as_str()).collect();

        let candidates: Vec<String> = tagged
            .iter()
            .filter(|t| t.has_tag_in(&self.config.include_tags))
            .map(|t| t.text.replace('.', ""))
            .filter(|word| !word.is_empty())
            .collect();

        let builder = build_graph_parallel(&candidates, self.config.parallel_threshold);
        if builder.is_empty() {
            tracing::debug!(tokens = tagged.len(), "no keyword candidates");
            return Ok(ExtractionResult {
                converged: true,
                ..ExtractionResult::default()
            });
        }

        let graph = CsrGraph::from_builder(&builder);
        let pagerank = self.ranker.rank(&graph);
        let key_phrases = self.ranker.select_key_phrases(&graph, &pagerank);
        let phrases = self.ranker.reconstruct_phrases(&sequence, &key_phrases);
        let keywords = self.normalizer.normalize(&phrases);

        tracing::trace!(
            nodes = graph.num_nodes,
            edges = graph.num_edges(),
            selected = key_phrases.len(),
            keywords = keywords.len(),
            "extracted keywords"
        );

        Ok(ExtractionResult {
            key_phrases,
            phrases,
            keywords,
            converged: pagerank.converged,
            iterations: pagerank.iterations,
        })
    }
}
