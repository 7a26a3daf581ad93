//! Keyword normalization
//!
//! Turns reconstructed key phrases into the flat list of single-word
//! keywords the classifier keys its knowledge on.

/// Lower-cases phrases, splits them into words and strips symbols.
#[derive(Debug, Clone, Copy, Default)]
pub struct TokenNormalizer;

impl TokenNormalizer {
    /// Create a new normalizer
    pub fn new() -> Self {
        Self
    }

    /// Normalize phrases into keywords.
    ///
    /// Steps, in order: lower-case, split multi-word phrases on whitespace,
    /// remove `-`, strip a trailing possessive `'s`. Words left empty are
    /// dropped; duplicates are kept.
    pub fn normalize<I, S>(&self, phrases: I) -> Vec<String>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        phrases
            .into_iter()
            .flat_map(|phrase| {
                phrase
                    .as_ref()
                    .to_lowercase()
                    .split_whitespace()
                    .map(clean_word)
                    .collect::<Vec<_>>()
            })
            .filter(|word| !word.is_empty())
            .collect()
    }
}

fn clean_word(word: &str) -> String {
    let word = word.replace('-', "");
    match word.strip_suffix("'s") {
        Some(stem) => stem.to_string(),
        None => word,
    }
}
