//! Label scoring against the knowledge base

use super::knowledge::KnowledgeBase;
use crate::types::{ClassifierConfig, Label, Prediction};

/// Scores keyword sets against a [`KnowledgeBase`]
#[derive(Debug, Clone, Copy)]
pub struct LabelScorer {
    default_probability: f64,
}

impl Default for LabelScorer {
    fn default() -> Self {
        Self::new(0.2)
    }
}

impl LabelScorer {
    /// Create a scorer returning `default_probability` when nothing matches
    pub fn new(default_probability: f64) -> Self {
        Self {
            default_probability,
        }
    }

    /// Create a scorer from config
    pub fn with_config(config: &ClassifierConfig) -> Self {
        Self::new(config.default_probability)
    }

    /// Fraction of known keywords whose stored label is `candidate`.
    ///
    /// Keywords stored under any other label (conflicted ones included)
    /// count against. With no known keyword the default probability is
    /// returned. Repeated keywords count once per occurrence.
    pub fn score<S: AsRef<str>>(&self, base: &KnowledgeBase, keywords: &[S], candidate: Label) -> f64 {
        let mut in_count = 0usize;
        let mut out_count = 0usize;

        for keyword in keywords {
            match base.get(keyword.as_ref()) {
                Some(stored) if stored == candidate => in_count += 1,
                Some(_) => out_count += 1,
                None => {}
            }
        }

        if in_count == 0 && out_count == 0 {
            return self.default_probability;
        }
        in_count as f64 / (in_count + out_count) as f64
    }

    /// Best concrete label for `keywords`.
    ///
    /// Starts from `(NoLabel, 0.0)` and takes a label only when its score is
    /// strictly greater than the best so far, visiting labels in
    /// [`Label::CONCRETE`] order. So an unknown document gets the first
    /// label at the default probability, and a document whose known keywords
    /// are all conflicted gets `NoLabel`.
    pub fn predict<S: AsRef<str>>(&self, base: &KnowledgeBase, keywords: &[S]) -> Prediction {
        let mut best = Prediction::none();
        for label in Label::CONCRETE {
            let probability = self.score(base, keywords, label);
            if probability > best.probability {
                best = Prediction::new(label, probability);
            }
        }
        best
    }
}
