//! Keyword-evidence classifier and its self-training loop
//!
//! [`knowledge::KnowledgeBase`] holds what has been learnt,
//! [`scorer::LabelScorer`] turns it into predictions, and
//! [`training::SelfTrainingLoop`] drives bootstrap, iteration and evaluation,
//! asking a [`human::HumanLabelProvider`] (through [`cache::LabelCache`]) when
//! unsure.

pub mod cache;
pub mod human;
pub mod knowledge;
pub mod scorer;
pub mod training;
