//! Text-level NLP helpers
//!
//! Tagging, edit distance and keyword normalization.

pub mod distance;
pub mod normalizer;
pub mod tokenizer;

use crate::errors::Result;
use crate::types::TaggedToken;

/// Tokenizer + POS tagger collaborator.
///
/// # Contract
///
/// - Tokens are returned in source order.
/// - Tags are Penn Treebank strings (`NN`, `NNP`, `JJ`, ...).
/// - A failure is reported as [`ClassifierError::MalformedInput`](crate::errors::ClassifierError::MalformedInput).
pub trait Tagger: Send + Sync {
    /// Tokenize and tag `text`.
    fn tag(&self, text: &str) -> Result<Vec<TaggedToken>>;
}

impl<T: Tagger + ?Sized> Tagger for &T {
    fn tag(&self, text: &str) -> Result<Vec<TaggedToken>> {
        (**self).tag(text)
    }
}

impl<T: Tagger + ?Sized> Tagger for Box<T> {
    fn tag(&self, text: &str) -> Result<Vec<TaggedToken>> {
        (**self).tag(text)
    }
}
