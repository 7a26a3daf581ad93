//! Core types for news_keyrank
//!
//! This module defines the fundamental data structures used throughout the library,
//! including labels, tagged tokens, predictions, and configuration.

use crate::errors::{ClassifierError, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

// ============================================================================
// Label
// ============================================================================

/// Topical category of a news article.
///
/// `NoLabel` is a sentinel: as a prediction it means "no decision", inside the
/// knowledge base it marks a keyword whose evidence conflicted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Label {
    Business,
    Entertainment,
    Politics,
    Sport,
    Tech,
    NoLabel,
}

impl Label {
    /// The concrete labels, in the order used for tie-breaking in prediction.
    pub const CONCRETE: [Label; 5] = [
        Label::Business,
        Label::Entertainment,
        Label::Politics,
        Label::Sport,
        Label::Tech,
    ];

    /// Every label including the sentinel, in code order.
    pub const ALL: [Label; 6] = [
        Label::Business,
        Label::Entertainment,
        Label::Politics,
        Label::Sport,
        Label::Tech,
        Label::NoLabel,
    ];

    /// Lowercase name, as used in directory names and file-name prefixes
    pub fn as_str(&self) -> &'static str {
        match self {
            Label::Business => "business",
            Label::Entertainment => "entertainment",
            Label::Politics => "politics",
            Label::Sport => "sport",
            Label::Tech => "tech",
            Label::NoLabel => "no_label",
        }
    }

    /// Numeric code shown to a human labeller (`-1` for the sentinel)
    pub fn code(&self) -> i32 {
        match self {
            Label::Business => 0,
            Label::Entertainment => 1,
            Label::Politics => 2,
            Label::Sport => 3,
            Label::Tech => 4,
            Label::NoLabel => -1,
        }
    }

    /// Look up a label by its numeric code
    pub fn from_code(code: i32) -> Option<Self> {
        Self::ALL.into_iter().find(|label| label.code() == code)
    }

    /// Whether this is one of the five topical categories
    pub fn is_concrete(&self) -> bool {
        !matches!(self, Label::NoLabel)
    }

    /// Derive the ground-truth label from a `<label>_<rest>` file name.
    pub fn from_file_name(name: &str) -> Result<Self> {
        let (prefix, _) = name
            .split_once('_')
            .ok_or_else(|| ClassifierError::unknown_document_category(name))?;
        match prefix.parse::<Label>() {
            Ok(label) if label.is_concrete() => Ok(label),
            _ => Err(ClassifierError::unknown_document_category(name)),
        }
    }
}

impl std::fmt::Display for Label {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Label {
    type Err = ClassifierError;

    fn from_str(value: &str) -> std::result::Result<Self, Self::Err> {
        let wanted = value.trim().to_lowercase();
        Self::ALL
            .into_iter()
            .find(|label| label.as_str() == wanted)
            .ok_or_else(|| ClassifierError::unknown_label(value))
    }
}

// ============================================================================
// Tagged token
// ============================================================================

/// A token from the input text with its Penn Treebank POS tag
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaggedToken {
    /// The surface form
    pub text: String,
    /// Penn Treebank tag (`NN`, `NNP`, `JJ`, ...)
    pub tag: String,
}

impl TaggedToken {
    /// Create a new tagged token
    pub fn new(text: impl Into<String>, tag: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            tag: tag.into(),
        }
    }

    /// Check if this token's tag is in the given filter set
    pub fn has_tag_in(&self, tags: &[String]) -> bool {
        tags.iter().any(|t| *t == self.tag)
    }
}

// ============================================================================
// Prediction
// ============================================================================

/// A label decision with the fraction of keyword evidence supporting it
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Prediction {
    pub label: Label,
    pub probability: f64,
}

impl Prediction {
    /// Create a new prediction
    pub fn new(label: Label, probability: f64) -> Self {
        Self { label, probability }
    }

    /// The "no decision" prediction
    pub fn none() -> Self {
        Self::new(Label::NoLabel, 0.0)
    }
}

// ============================================================================
// Configuration
// ============================================================================

fn default_damping() -> f64 {
    0.85
}

fn default_max_iterations() -> usize {
    100
}

fn default_convergence_threshold() -> f64 {
    1e-6
}

fn default_include_tags() -> Vec<String> {
    vec!["NN".to_string(), "JJ".to_string(), "NNP".to_string()]
}

fn default_selection_divisor() -> usize {
    3
}

fn default_parallel_threshold() -> usize {
    64
}

fn default_default_probability() -> f64 {
    0.2
}

fn default_probability_threshold() -> f64 {
    0.65
}

fn default_max_training_iterations() -> usize {
    2
}

/// Configuration for keyword extraction and self-training
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassifierConfig {
    /// Damping factor for PageRank (typically 0.85)
    #[serde(default = "default_damping")]
    pub damping: f64,
    /// Maximum iterations for PageRank convergence
    #[serde(default = "default_max_iterations")]
    pub max_iterations: usize,
    /// Per-node convergence tolerance (stop when L1 delta < nodes * threshold)
    #[serde(default = "default_convergence_threshold")]
    pub convergence_threshold: f64,
    /// POS tags whose tokens become graph candidates
    #[serde(default = "default_include_tags")]
    pub include_tags: Vec<String>,
    /// Keep `nodes / selection_divisor + 1` top-ranked tokens
    #[serde(default = "default_selection_divisor")]
    pub selection_divisor: usize,
    /// Node count at which edge weights are computed in parallel
    #[serde(default = "default_parallel_threshold")]
    pub parallel_threshold: usize,
    /// Score returned when no keyword is known to the knowledge base
    #[serde(default = "default_default_probability")]
    pub default_probability: f64,
    /// Predictions below this probability are sent to a human labeller
    #[serde(default = "default_probability_threshold")]
    pub probability_threshold: f64,
    /// Number of passes over the unlabelled documents
    #[serde(default = "default_max_training_iterations")]
    pub max_training_iterations: usize,
    /// Stop iterating early once a pass changes nothing
    #[serde(default)]
    pub stop_when_stable: bool,
}

impl Default for ClassifierConfig {
    fn default() -> Self {
        Self {
            damping: default_damping(),
            max_iterations: default_max_iterations(),
            convergence_threshold: default_convergence_threshold(),
            include_tags: default_include_tags(),
            selection_divisor: default_selection_divisor(),
            parallel_threshold: default_parallel_threshold(),
            default_probability: default_default_probability(),
            probability_threshold: default_probability_threshold(),
            max_training_iterations: default_max_training_iterations(),
            stop_when_stable: false,
        }
    }
}

impl ClassifierConfig {
    /// Create a new config with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse and validate a config from JSON. Missing fields take defaults.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a JSON config file
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)
            .map_err(|e| ClassifierError::io(path.display().to_string(), &e))?;
        Self::from_json_str(&json)
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        if !(0.0..=1.0).contains(&self.damping) {
            return Err(ClassifierError::invalid_config(format!(
                "damping must be between 0 and 1, got {}",
                self.damping
            )));
        }

        if self.max_iterations == 0 {
            return Err(ClassifierError::invalid_config("max_iterations must be > 0"));
        }

        if self.convergence_threshold <= 0.0 {
            return Err(ClassifierError::invalid_config(
                "convergence_threshold must be > 0",
            ));
        }

        if self.include_tags.is_empty() {
            return Err(ClassifierError::invalid_config(
                "include_tags must name at least one tag",
            ));
        }

        if self.selection_divisor == 0 {
            return Err(ClassifierError::invalid_config(
                "selection_divisor must be > 0",
            ));
        }

        if !(0.0..=1.0).contains(&self.default_probability) {
            return Err(ClassifierError::invalid_config(format!(
                "default_probability must be between 0 and 1, got {}",
                self.default_probability
            )));
        }

        if !(0.0..=1.0).contains(&self.probability_threshold) {
            return Err(ClassifierError::invalid_config(format!(
                "probability_threshold must be between 0 and 1, got {}",
                self.probability_threshold
            )));
        }

        Ok(())
    }

    /// Builder method: set damping factor
    pub fn with_damping(mut self, damping: f64) -> Self {
        self.damping = damping;
        self
    }

    /// Builder method: set max PageRank iterations
    pub fn with_max_iterations(mut self, max_iterations: usize) -> Self {
        self.max_iterations = max_iterations;
        self
    }

    /// Builder method: set convergence threshold
    pub fn with_convergence_threshold(mut self, threshold: f64) -> Self {
        self.convergence_threshold = threshold;
        self
    }

    /// Builder method: set the candidate POS tags
    pub fn with_include_tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.include_tags = tags.into_iter().map(Into::into).collect();
        self
    }

    /// Builder method: set the parallel edge-weighting threshold
    pub fn with_parallel_threshold(mut self, threshold: usize) -> Self {
        self.parallel_threshold = threshold;
        self
    }

    /// Builder method: set the no-evidence probability
    pub fn with_default_probability(mut self, probability: f64) -> Self {
        self.default_probability = probability;
        self
    }

    /// Builder method: set the human-help threshold
    pub fn with_probability_threshold(mut self, threshold: f64) -> Self {
        self.probability_threshold = threshold;
        self
    }

    /// Builder method: set the number of unlabelled passes
    pub fn with_max_training_iterations(mut self, iterations: usize) -> Self {
        self.max_training_iterations = iterations;
        self
    }

    /// Builder method: enable early exit once labels stop changing
    pub fn with_stop_when_stable(mut self, stop: bool) -> Self {
        self.stop_when_stable = stop;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_label_codes_round_trip() {
        for label in Label::ALL {
            assert_eq!(Label::from_code(label.code()), Some(label));
        }
        assert_eq!(Label::from_code(5), None);
        assert_eq!(Label::NoLabel.code(), -1);
    }

    #[test]
    fn test_label_parse() {
        assert_eq!("sport".parse::<Label>().unwrap(), Label::Sport);
        assert_eq!("  TECH ".parse::<Label>().unwrap(), Label::Tech);
        assert_eq!("no_label".parse::<Label>().unwrap(), Label::NoLabel);
        assert!("weather".parse::<Label>().is_err());
    }

    #[test]
    fn test_concrete_order() {
        assert_eq!(Label::CONCRETE[0], Label::Business);
        assert_eq!(Label::CONCRETE[4], Label::Tech);
        assert!(Label::CONCRETE.iter().all(Label::is_concrete));
    }

    #[test]
    fn test_label_from_file_name() {
        assert_eq!(
            Label::from_file_name("politics_042.txt").unwrap(),
            Label::Politics
        );
        assert_eq!(
            Label::from_file_name("tech_a_b.txt").unwrap(),
            Label::Tech
        );
        assert!(matches!(
            Label::from_file_name("042.txt"),
            Err(ClassifierError::UnknownDocumentCategory { .. })
        ));
        assert!(matches!(
            Label::from_file_name("weather_1.txt"),
            Err(ClassifierError::UnknownDocumentCategory { .. })
        ));
        assert!(Label::from_file_name("no_label.txt").is_err());
    }

    #[test]
    fn test_label_serde() {
        let json = serde_json::to_string(&Label::NoLabel).unwrap();
        assert_eq!(json, r#""no_label""#);
        let back: Label = serde_json::from_str(r#""entertainment""#).unwrap();
        assert_eq!(back, Label::Entertainment);
    }

    #[test]
    fn test_tagged_token_filter() {
        let tags = ClassifierConfig::default().include_tags;
        assert!(TaggedToken::new("market", "NN").has_tag_in(&tags));
        assert!(!TaggedToken::new("markets", "NNS").has_tag_in(&tags));
    }

    #[test]
    fn test_config_validation() {
        let config = ClassifierConfig::default();
        assert!(config.validate().is_ok());

        let bad_config = ClassifierConfig::default().with_damping(1.5);
        assert!(bad_config.validate().is_err());

        let bad_config = ClassifierConfig::default().with_include_tags(Vec::<String>::new());
        assert!(bad_config.validate().is_err());

        let bad_config = ClassifierConfig::default().with_probability_threshold(-0.1);
        assert!(bad_config.validate().is_err());
    }

    #[test]
    fn test_config_json_defaults() {
        let cfg = ClassifierConfig::from_json_str(r#"{"max_training_iterations": 5}"#).unwrap();
        assert_eq!(cfg.max_training_iterations, 5);
        assert_eq!(cfg.damping, 0.85);
        assert_eq!(cfg.include_tags, vec!["NN", "JJ", "NNP"]);
        assert!((cfg.default_probability - 0.2).abs() < 1e-12);
        assert!((cfg.probability_threshold - 0.65).abs() < 1e-12);
        assert!(!cfg.stop_when_stable);
    }

    #[test]
    fn test_config_json_rejects_invalid() {
        let err = ClassifierConfig::from_json_str(r#"{"damping": 2.0}"#).unwrap_err();
        assert!(matches!(err, ClassifierError::InvalidConfig { .. }));

        let err = ClassifierConfig::from_json_str("{not json").unwrap_err();
        assert!(matches!(err, ClassifierError::Serialization { .. }));
    }
}
