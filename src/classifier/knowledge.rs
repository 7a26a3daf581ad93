//! Keyword knowledge base
//!
//! Maps each keyword to the one label it has consistently been seen with.
//! A keyword seen with two different labels is marked [`Label::NoLabel`]
//! for good and no longer counts as evidence for any label.

use crate::types::Label;
use rustc_hash::FxHashMap;
use std::collections::BTreeMap;

/// Accumulated keyword -> label evidence
#[derive(Debug, Clone, Default, PartialEq)]
pub struct KnowledgeBase {
    entries: FxHashMap<String, Label>,
}

impl KnowledgeBase {
    /// Create an empty knowledge base
    pub fn new() -> Self {
        Self::default()
    }

    /// Record that `keywords` appeared in a document labelled `label`.
    ///
    /// New keywords take `label`; a keyword already stored with a different
    /// label becomes `NoLabel`. Nothing is ever removed.
    pub fn add_to_knowledge<I, S>(&mut self, keywords: I, label: Label)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        for keyword in keywords {
            let keyword = keyword.as_ref();
            match self.entries.get_mut(keyword) {
                Some(stored) => {
                    if *stored != label {
                        *stored = Label::NoLabel;
                    }
                }
                None => {
                    self.entries.insert(keyword.to_string(), label);
                }
            }
        }
    }

    /// Label stored for `keyword`
    pub fn get(&self, keyword: &str) -> Option<Label> {
        self.entries.get(keyword).copied()
    }

    /// Whether `keyword` has been marked conflicted
    pub fn is_conflicted(&self, keyword: &str) -> bool {
        self.get(keyword) == Some(Label::NoLabel)
    }

    /// Number of stored keywords (conflicted ones included)
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if nothing has been learnt yet
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of keywords currently marked conflicted
    pub fn conflicted_count(&self) -> usize {
        self.entries.values().filter(|l| **l == Label::NoLabel).count()
    }

    /// Sorted copy of the contents
    pub fn snapshot(&self) -> BTreeMap<String, Label> {
        self.entries
            .iter()
            .map(|(k, v)| (k.clone(), *v))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insert_new_keywords() {
        let mut kb = KnowledgeBase::new();
        kb.add_to_knowledge(["market"], Label::Business);
        kb.add_to_knowledge(["vote"], Label::Politics);

        assert_eq!(kb.get("market"), Some(Label::Business));
        assert_eq!(kb.get("vote"), Some(Label::Politics));
        assert_eq!(kb.get("goal"), None);
        assert_eq!(kb.len(), 2);
    }

    #[test]
    fn test_conflict_marks_no_label() {
        let mut kb = KnowledgeBase::new();
        kb.add_to_knowledge(["market"], Label::Business);
        kb.add_to_knowledge(["market"], Label::Politics);

        assert_eq!(kb.get("market"), Some(Label::NoLabel));
        assert!(kb.is_conflicted("market"));
        assert_eq!(kb.conflicted_count(), 1);
    }

    #[test]
    fn test_conflict_is_permanent() {
        let mut kb = KnowledgeBase::new();
        kb.add_to_knowledge(["market"], Label::Business);
        kb.add_to_knowledge(["market"], Label::Politics);
        for label in Label::CONCRETE {
            kb.add_to_knowledge(["market"], label);
            assert_eq!(kb.get("market"), Some(Label::NoLabel));
        }
        assert_eq!(kb.len(), 1);
    }

    #[test]
    fn test_same_label_is_idempotent() {
        let mut once = KnowledgeBase::new();
        once.add_to_knowledge(["goal", "match", "goal"], Label::Sport);

        let mut twice = KnowledgeBase::new();
        twice.add_to_knowledge(["goal", "match", "goal"], Label::Sport);
        twice.add_to_knowledge(["goal", "match", "goal"], Label::Sport);

        assert_eq!(once, twice);
        assert_eq!(twice.conflicted_count(), 0);
    }

    #[test]
    fn test_snapshot_sorted() {
        let mut kb = KnowledgeBase::new();
        kb.add_to_knowledge(["vote", "film", "market"], Label::Tech);
        let keys: Vec<String> = kb.snapshot().into_keys().collect();
        assert_eq!(keys, vec!["film", "market", "vote"]);
    }
}
