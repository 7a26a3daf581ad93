//! Self-training loop
//!
//! Runs the three phases in order, owning the knowledge base and label cache
//! for the whole run:
//!
//! 1. **Bootstrap**: learn keywords from the labelled documents.
//! 2. **Iterate**: classify the unlabelled documents a fixed number of times,
//!    asking the human labeller (through the cache) whenever the prediction
//!    falls below the probability threshold and learning from the answer.
//! 3. **Finalize**: classify the test documents and measure accuracy
//!    against their file-name categories.
//!
//! Keyword extraction is pure and runs in parallel before each phase; all
//! knowledge-base and cache updates happen sequentially in document order.

use super::cache::{LabelCache, LabelSource};
use super::human::HumanLabelProvider;
use super::knowledge::KnowledgeBase;
use super::scorer::LabelScorer;
use crate::corpus::{Corpus, Document};
use crate::errors::{ClassifierError, Result};
use crate::nlp::Tagger;
use crate::phrase::extraction::KeywordExtractor;
use crate::types::{ClassifierConfig, Label, Prediction};
use rayon::prelude::*;
use rustc_hash::FxHashMap;
use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet};

/// Where the loop currently is
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrainingPhase {
    BootstrapLabelled,
    /// Number of unlabelled passes completed so far
    IterateUnlabelled(usize),
    Finalize,
    Done,
}

impl std::fmt::Display for TrainingPhase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TrainingPhase::BootstrapLabelled => f.write_str("bootstrap_labelled"),
            TrainingPhase::IterateUnlabelled(k) => write!(f, "iterate_unlabelled({k})"),
            TrainingPhase::Finalize => f.write_str("finalize"),
            TrainingPhase::Done => f.write_str("done"),
        }
    }
}

/// Outcome of one pass over the unlabelled documents
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IterationSummary {
    /// 1-based pass number
    pub iteration: usize,
    /// Documents whose prediction fell below the threshold
    pub human_help: usize,
    /// Of those, how many went to the provider instead of the cache
    pub provider_requests: usize,
    /// Documents whose prediction was accepted as is
    pub accepted: usize,
    /// Working label per document ID
    pub labels: BTreeMap<String, Label>,
}

/// Prediction for one test document next to its true category
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DocumentPrediction {
    pub document: String,
    pub predicted: Label,
    pub probability: f64,
    pub actual: Label,
}

impl DocumentPrediction {
    /// Whether the prediction matches the true category
    pub fn is_correct(&self) -> bool {
        self.predicted == self.actual
    }
}

/// Accuracy over the test documents
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct EvaluationReport {
    pub total: usize,
    pub true_positives: usize,
    /// Percentage in `[0, 100]`
    pub accuracy: f64,
    pub predictions: Vec<DocumentPrediction>,
}

/// Everything a complete run produced
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TrainingReport {
    /// Labelled documents learnt from
    pub bootstrap_documents: usize,
    pub iterations: Vec<IterationSummary>,
    pub evaluation: EvaluationReport,
    /// Keywords known at the end (conflicted ones included)
    pub knowledge_size: usize,
    pub conflicted_keywords: usize,
}

/// Bootstrap / iterate / finalize state machine
pub struct SelfTrainingLoop<T, H> {
    extractor: KeywordExtractor<T>,
    scorer: LabelScorer,
    knowledge: KnowledgeBase,
    cache: LabelCache,
    provider: H,
    phase: TrainingPhase,
    /// Unlabelled keywords by document ID, extracted once per run
    unlabelled_keywords: FxHashMap<String, Vec<String>>,
    working_labels: BTreeMap<String, Label>,
    history: Vec<IterationSummary>,
}

impl<T: Tagger, H: HumanLabelProvider> SelfTrainingLoop<T, H> {
    /// Create a loop with default config
    pub fn new(tagger: T, provider: H) -> Self {
        Self::build(tagger, provider, ClassifierConfig::default())
    }

    /// Create a loop with a validated config
    pub fn with_config(tagger: T, provider: H, config: ClassifierConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self::build(tagger, provider, config))
    }

    fn build(tagger: T, provider: H, config: ClassifierConfig) -> Self {
        Self {
            scorer: LabelScorer::with_config(&config),
            extractor: KeywordExtractor::with_config(tagger, config),
            knowledge: KnowledgeBase::new(),
            cache: LabelCache::new(),
            provider,
            phase: TrainingPhase::BootstrapLabelled,
            unlabelled_keywords: FxHashMap::default(),
            working_labels: BTreeMap::new(),
            history: Vec::new(),
        }
    }

    pub fn phase(&self) -> TrainingPhase {
        self.phase
    }

    pub fn config(&self) -> &ClassifierConfig {
        self.extractor.config()
    }

    pub fn knowledge(&self) -> &KnowledgeBase {
        &self.knowledge
    }

    pub fn cache(&self) -> &LabelCache {
        &self.cache
    }

    pub fn provider(&self) -> &H {
        &self.provider
    }

    /// Working labels from the latest unlabelled pass
    pub fn working_labels(&self) -> &BTreeMap<String, Label> {
        &self.working_labels
    }

    /// Summaries of the passes completed so far
    pub fn history(&self) -> &[IterationSummary] {
        &self.history
    }

    /// Classify arbitrary text against the current knowledge base
    pub fn predict(&self, text: &str) -> Result<Prediction> {
        let keywords = self.extractor.extract(text)?;
        Ok(self.scorer.predict(&self.knowledge, &keywords))
    }

    /// Learn from labelled documents, visiting labels in
    /// [`Label::CONCRETE`] order. Returns the number of documents learnt.
    pub fn bootstrap(&mut self, labelled: &[(Label, Vec<Document>)]) -> Result<usize> {
        self.expect_phase(TrainingPhase::BootstrapLabelled)?;
        let _span = tracing::info_span!("training_phase", phase = "bootstrap").entered();

        if labelled.iter().any(|(label, docs)| !label.is_concrete() && !docs.is_empty()) {
            tracing::warn!("ignoring labelled documents without a concrete label");
        }

        let ordered: Vec<(Label, &Document)> = Label::CONCRETE
            .iter()
            .flat_map(|label| {
                labelled
                    .iter()
                    .filter(move |(l, _)| l == label)
                    .flat_map(move |(_, docs)| docs.iter().map(move |doc| (*label, doc)))
            })
            .collect();

        let documents: Vec<&Document> = ordered.iter().map(|(_, doc)| *doc).collect();
        let keywords = self.extract_all(&documents, "bootstrap")?;

        for ((label, doc), keywords) in ordered.iter().zip(keywords) {
            let unique: BTreeSet<String> = keywords.into_iter().collect();
            tracing::debug!(document = %doc.id, %label, keywords = unique.len(), "learnt labelled document");
            self.knowledge.add_to_knowledge(&unique, *label);
        }

        tracing::info!(
            documents = ordered.len(),
            keywords = self.knowledge.len(),
            conflicted = self.knowledge.conflicted_count(),
            "bootstrap complete"
        );

        self.phase = if self.config().max_training_iterations == 0 {
            TrainingPhase::Finalize
        } else {
            TrainingPhase::IterateUnlabelled(0)
        };
        Ok(ordered.len())
    }

    /// One pass over the unlabelled documents, in file-name order
    pub fn iterate(&mut self, unlabelled: &[Document]) -> Result<IterationSummary> {
        let completed = match self.phase {
            TrainingPhase::IterateUnlabelled(k) => k,
            actual => {
                return Err(ClassifierError::invalid_phase(
                    "iterate_unlabelled",
                    actual.to_string(),
                ))
            }
        };
        let iteration = completed + 1;
        let _span = tracing::info_span!("training_phase", phase = "iterate", iteration).entered();

        self.ensure_unlabelled_keywords(unlabelled)?;

        let mut order: Vec<&Document> = unlabelled.iter().collect();
        order.sort_by(|a, b| a.name.cmp(&b.name).then_with(|| a.id.cmp(&b.id)));

        let threshold = self.config().probability_threshold;
        let mut labels = BTreeMap::new();
        let mut human_help = 0;
        let mut provider_requests = 0;
        let mut accepted = 0;

        for doc in order {
            let keywords = self
                .unlabelled_keywords
                .get(&doc.id)
                .map(Vec::as_slice)
                .unwrap_or_default();
            let prediction = self.scorer.predict(&self.knowledge, keywords);

            let label = if prediction.probability >= threshold {
                accepted += 1;
                prediction.label
            } else {
                human_help += 1;
                let (label, source) = self
                    .cache
                    .resolve(doc, &mut self.provider)
                    .map_err(|e| e.in_document(&doc.id, "human_label"))?;
                if source == LabelSource::Provider {
                    provider_requests += 1;
                }
                self.knowledge.add_to_knowledge(keywords, label);
                label
            };

            tracing::debug!(
                document = %doc.id,
                predicted = %prediction.label,
                probability = prediction.probability,
                %label,
                "classified unlabelled document"
            );
            labels.insert(doc.id.clone(), label);
        }

        let stable = human_help == 0 && labels == self.working_labels;
        let summary = IterationSummary {
            iteration,
            human_help,
            provider_requests,
            accepted,
            labels: labels.clone(),
        };
        tracing::info!(
            iteration,
            human_help,
            provider_requests,
            accepted,
            keywords = self.knowledge.len(),
            "iteration complete"
        );

        self.working_labels = labels;
        self.history.push(summary.clone());

        let max_iterations = self.config().max_training_iterations;
        let stop_when_stable = self.config().stop_when_stable;
        self.phase = if iteration >= max_iterations {
            TrainingPhase::Finalize
        } else if stop_when_stable && stable {
            tracing::info!(iteration, "labels stable, stopping early");
            TrainingPhase::Finalize
        } else {
            TrainingPhase::IterateUnlabelled(iteration)
        };
        Ok(summary)
    }

    /// Iterate until the loop reaches the finalize phase
    pub fn run_iterations(&mut self, unlabelled: &[Document]) -> Result<Vec<IterationSummary>> {
        let mut summaries = Vec::new();
        while let TrainingPhase::IterateUnlabelled(_) = self.phase {
            summaries.push(self.iterate(unlabelled)?);
        }
        Ok(summaries)
    }

    /// Classify the test documents and compare with their file-name
    /// categories. A name without a known `<label>_` prefix is an
    /// [`UnknownDocumentCategory`](ClassifierError::UnknownDocumentCategory)
    /// error.
    pub fn evaluate(&mut self, test: &[Document]) -> Result<EvaluationReport> {
        self.expect_phase(TrainingPhase::Finalize)?;
        let _span = tracing::info_span!("training_phase", phase = "finalize").entered();

        let documents: Vec<&Document> = test.iter().collect();
        let keywords = self.extract_all(&documents, "evaluate")?;

        let mut report = EvaluationReport::default();
        for (doc, keywords) in test.iter().zip(keywords) {
            let actual = doc.true_label()?;
            let prediction = self.scorer.predict(&self.knowledge, &keywords);
            let record = DocumentPrediction {
                document: doc.id.clone(),
                predicted: prediction.label,
                probability: prediction.probability,
                actual,
            };
            tracing::debug!(
                document = %doc.id,
                predicted = %record.predicted,
                %actual,
                "classified test document"
            );
            if record.is_correct() {
                report.true_positives += 1;
            }
            report.predictions.push(record);
        }

        report.total = report.predictions.len();
        if report.total == 0 {
            tracing::warn!("no test documents, accuracy reported as 0");
        } else {
            report.accuracy = report.true_positives as f64 / report.total as f64 * 100.0;
        }
        tracing::info!(
            total = report.total,
            true_positives = report.true_positives,
            accuracy = report.accuracy,
            "evaluation complete"
        );

        self.phase = TrainingPhase::Done;
        Ok(report)
    }

    /// Run all three phases over a loaded corpus
    pub fn run(&mut self, corpus: &Corpus) -> Result<TrainingReport> {
        let bootstrap_documents = self.bootstrap(&corpus.labelled)?;
        let iterations = self.run_iterations(&corpus.unlabelled)?;
        let evaluation = self.evaluate(&corpus.test)?;
        Ok(TrainingReport {
            bootstrap_documents,
            iterations,
            evaluation,
            knowledge_size: self.knowledge.len(),
            conflicted_keywords: self.knowledge.conflicted_count(),
        })
    }

    fn expect_phase(&self, expected: TrainingPhase) -> Result<()> {
        if self.phase == expected {
            Ok(())
        } else {
            Err(ClassifierError::invalid_phase(
                expected.to_string(),
                self.phase.to_string(),
            ))
        }
    }

    /// Extract keywords for every document in parallel, in input order.
    /// The first failing document (in input order) is reported.
    fn extract_all(&self, documents: &[&Document], stage: &'static str) -> Result<Vec<Vec<String>>> {
        let extractor = &self.extractor;
        let results: Vec<Result<Vec<String>>> = documents
            .par_iter()
            .map(|doc| {
                extractor
                    .extract(&doc.text)
                    .map_err(|e| e.in_document(&doc.id, stage))
            })
            .collect();
        results.into_iter().collect()
    }

    fn ensure_unlabelled_keywords(&mut self, unlabelled: &[Document]) -> Result<()> {
        let missing: Vec<&Document> = unlabelled
            .iter()
            .filter(|doc| !self.unlabelled_keywords.contains_key(&doc.id))
            .collect();
        if missing.is_empty() {
            return Ok(());
        }

        let keywords = self.extract_all(&missing, "iterate")?;
        for (doc, keywords) in missing.iter().zip(keywords) {
            self.unlabelled_keywords.insert(doc.id.clone(), keywords);
        }
        Ok(())
    }
}
