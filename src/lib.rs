//! # news_keyrank
//!
//! A self-training news classifier built on graph-ranked keywords.
//!
//! Each article is tagged, its content words are joined into a complete graph
//! weighted by edit distance, and PageRank picks the top third as keywords.
//! Keywords learnt from labelled articles vote for a category; unlabelled
//! articles the classifier is unsure about are sent to a human labeller and
//! their answers are learnt too.
//!
//! ## Features
//!
//! - **Deterministic**: identical input gives identical keywords, labels and
//!   accuracy, with lexicographic tie-breaking throughout
//! - **Parallel**: keyword extraction and edge weighting run on rayon
//! - **Pluggable**: bring your own [`Tagger`] and [`HumanLabelProvider`]
//!
//! ## Example
//!
//! ```no_run
//! use news_keyrank::{Corpus, HeuristicTagger, SelfTrainingLoop, SimulatedLabelProvider};
//!
//! let corpus = Corpus::load("data")?;
//! let mut training = SelfTrainingLoop::new(HeuristicTagger::new(), SimulatedLabelProvider);
//! let report = training.run(&corpus)?;
//! println!("accuracy: {:.2}%", report.evaluation.accuracy);
//! # Ok::<(), news_keyrank::ClassifierError>(())
//! ```

pub mod classifier;
pub mod corpus;
pub mod errors;
pub mod graph;
pub mod nlp;
pub mod pagerank;
pub mod phrase;
pub mod types;

// Re-export commonly used types
pub use errors::{ClassifierError, Result};
pub use types::{ClassifierConfig, Label, Prediction, TaggedToken};

// Re-export main functionality
pub use classifier::{
    cache::{LabelCache, LabelSource},
    human::{
        parse_label_input, ConsoleLabelProvider, HumanLabelProvider, MapLabelProvider,
        SimulatedLabelProvider,
    },
    knowledge::KnowledgeBase,
    scorer::LabelScorer,
    training::{
        DocumentPrediction, EvaluationReport, IterationSummary, SelfTrainingLoop, TrainingPhase,
        TrainingReport,
    },
};
pub use corpus::{Corpus, CorpusLayout, Document};
pub use graph::{builder::PhraseGraph, csr::CsrGraph};
pub use nlp::{
    distance::levenshtein, normalizer::TokenNormalizer, tokenizer::HeuristicTagger, Tagger,
};
pub use pagerank::{standard::StandardPageRank, PageRankResult};
pub use phrase::extraction::{ExtractionResult, KeywordExtractor, KeywordRanker};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
