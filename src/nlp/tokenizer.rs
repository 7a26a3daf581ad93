//! Unicode-aware tokenization with heuristic Penn Treebank tagging
//!
//! This module provides UAX #29 word segmentation and a rule-based tagger
//! that stands in for a statistical POS tagger. Punctuation is kept as
//! tokens so that it separates words during phrase reconstruction.

use super::Tagger;
use crate::errors::Result;
use crate::types::TaggedToken;
use unicode_segmentation::UnicodeSegmentation;

/// A Unicode-aware tokenizer + tagger following UAX #29
#[derive(Debug, Clone)]
pub struct HeuristicTagger {
    /// Join `word-word` sequences into a single hyphenated token
    join_hyphenated: bool,
}

impl Default for HeuristicTagger {
    fn default() -> Self {
        Self::new()
    }
}

impl HeuristicTagger {
    /// Create a new tagger with default settings
    pub fn new() -> Self {
        Self {
            join_hyphenated: true,
        }
    }

    /// Keep hyphens as separate tokens instead of joining compounds
    pub fn with_join_hyphenated(mut self, join: bool) -> Self {
        self.join_hyphenated = join;
        self
    }

    /// Split text into word and punctuation segments, in source order.
    fn segments<'a>(&self, text: &'a str) -> Vec<&'a str> {
        let raw: Vec<(usize, &str)> = text.split_word_bound_indices().collect();
        let mut segments: Vec<&'a str> = Vec::with_capacity(raw.len());

        let mut i = 0;
        while i < raw.len() {
            let (start, segment) = raw[i];
            if segment.trim().is_empty() {
                i += 1;
                continue;
            }

            if self.join_hyphenated && is_word(segment) {
                // Extend over `-word` pairs with no whitespace in between
                let mut end = start + segment.len();
                let mut j = i + 1;
                while j + 1 < raw.len() && raw[j].1 == "-" && is_word(raw[j + 1].1) {
                    end = raw[j + 1].0 + raw[j + 1].1.len();
                    j += 2;
                }
                segments.push(&text[start..end]);
                i = j;
                continue;
            }

            segments.push(segment);
            i += 1;
        }

        segments
    }

    /// Basic heuristic Penn Treebank tagging
    ///
    /// This is intentionally simple; plug in a real tagger through [`Tagger`]
    /// for accurate tags.
    fn guess_tag(&self, word: &str) -> &'static str {
        if !is_word(word) {
            return punctuation_tag(word);
        }

        let lower = word.to_lowercase();

        if let Some(tag) = self.function_word_tag(&lower) {
            return tag;
        }

        // Numbers
        if word
            .chars()
            .all(|c| c.is_ascii_digit() || c == '.' || c == ',')
        {
            return "CD";
        }

        let mut chars = word.chars();
        let first_upper = chars.next().map(|c| c.is_uppercase()).unwrap_or(false);
        let rest: Vec<char> = chars.collect();
        if first_upper
            && (rest.iter().all(|c| !c.is_uppercase())
                || rest.iter().all(|c| !c.is_lowercase()))
        {
            // Capitalized word or acronym (might be proper noun or sentence start)
            return "NNP";
        }

        // Common adjective suffixes
        if lower.ends_with("ful")
            || lower.ends_with("less")
            || lower.ends_with("ous")
            || lower.ends_with("ive")
            || lower.ends_with("able")
            || lower.ends_with("ible")
            || lower.ends_with("al")
            || lower.ends_with("ic")
        {
            return "JJ";
        }

        // Common verb suffixes
        if lower.ends_with("ing") {
            return "VBG";
        }
        if lower.ends_with("ed") {
            return "VBD";
        }
        if lower.ends_with("ize") || lower.ends_with("ise") {
            return "VB";
        }

        // Common adverb suffix
        if lower.ends_with("ly") {
            return "RB";
        }

        // Plural nouns
        if lower.ends_with('s')
            && !lower.ends_with("ss")
            && !lower.ends_with("'s")
            && lower.chars().count() > 3
        {
            return "NNS";
        }

        // Default to noun (most content words are nouns)
        "NN"
    }

    fn function_word_tag(&self, lower: &str) -> Option<&'static str> {
        let tag = match lower {
            // Determiners
            "a" | "an" | "the" | "this" | "that" | "these" | "those" | "some" | "any" | "each"
            | "every" | "no" | "all" | "both" => "DT",
            // Possessive pronouns
            "my" | "your" | "his" | "her" | "its" | "our" | "their" => "PRP$",
            // Coordinating conjunctions
            "and" | "or" | "but" | "nor" | "yet" | "so" => "CC",
            "to" => "TO",
            // Prepositions and subordinating conjunctions
            "of" | "in" | "for" | "on" | "with" | "at" | "from" | "by" | "about" | "as"
            | "into" | "like" | "through" | "after" | "over" | "between" | "out" | "against"
            | "during" | "without" | "before" | "under" | "around" | "among" | "if"
            | "because" | "while" | "though" | "although" | "unless" | "until" | "since" => "IN",
            // Pronouns
            "i" | "you" | "he" | "she" | "it" | "we" | "they" | "me" | "him" | "us" | "them"
            | "myself" | "yourself" | "ourselves" | "themselves" => "PRP",
            "who" | "what" => "WP",
            "when" | "where" | "why" | "how" => "WRB",
            "which" => "WDT",
            // Auxiliaries
            "is" | "has" | "does" => "VBZ",
            "are" | "have" | "do" | "am" => "VBP",
            "was" | "were" | "had" | "did" => "VBD",
            "be" => "VB",
            "been" => "VBN",
            "being" => "VBG",
            "will" | "would" | "can" | "could" | "should" | "may" | "might" | "must"
            | "shall" => "MD",
            "not" | "n't" => "RB",
            _ => return None,
        };
        Some(tag)
    }
}

impl Tagger for HeuristicTagger {
    fn tag(&self, text: &str) -> Result<Vec<TaggedToken>> {
        Ok(self
            .segments(text)
            .into_iter()
            .map(|segment| TaggedToken::new(segment, self.guess_tag(segment)))
            .collect())
    }
}

fn is_word(segment: &str) -> bool {
    segment.chars().any(|c| c.is_alphanumeric())
}

fn punctuation_tag(segment: &str) -> &'static str {
    match segment {
        "." | "!" | "?" => ".",
        "," => ",",
        ":" | ";" | "-" | "--" | "—" | "–" => ":",
        "(" | "[" | "{" => "(",
        ")" | "]" | "}" => ")",
        "\"" | "'" | "“" | "”" | "‘" | "’" => "''",
        "$" | "£" | "€" => "$",
        _ => "SYM",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tags(text: &str) -> Vec<(String, String)> {
        HeuristicTagger::new()
            .tag(text)
            .unwrap()
            .into_iter()
            .map(|t| (t.text, t.tag))
            .collect()
    }

    #[test]
    fn test_basic_tagging() {
        let tagged = tags("The market rallied.");
        assert_eq!(
            tagged,
            vec![
                ("The".to_string(), "DT".to_string()),
                ("market".to_string(), "NN".to_string()),
                ("rallied".to_string(), "VBD".to_string()),
                (".".to_string(), ".".to_string()),
            ]
        );
    }

    #[test]
    fn test_punctuation_kept_in_order() {
        let tagged = tags("market, vote");
        let texts: Vec<&str> = tagged.iter().map(|(t, _)| t.as_str()).collect();
        assert_eq!(texts, vec!["market", ",", "vote"]);
        assert_eq!(tagged[1].1, ",");
    }

    #[test]
    fn test_guess_tag() {
        let tagger = HeuristicTagger::new();
        assert_eq!(tagger.guess_tag("beautiful"), "JJ");
        assert_eq!(tagger.guess_tag("running"), "VBG");
        assert_eq!(tagger.guess_tag("quickly"), "RB");
        assert_eq!(tagger.guess_tag("information"), "NN");
        assert_eq!(tagger.guess_tag("elections"), "NNS");
        assert_eq!(tagger.guess_tag("business"), "NN");
        assert_eq!(tagger.guess_tag("London"), "NNP");
        assert_eq!(tagger.guess_tag("BBC"), "NNP");
        assert_eq!(tagger.guess_tag("2005"), "CD");
        assert_eq!(tagger.guess_tag("the"), "DT");
    }

    #[test]
    fn test_hyphenated_compounds() {
        let tagged = tags("a well-known firm");
        assert!(tagged.iter().any(|(t, _)| t == "well-known"));

        let tagger = HeuristicTagger::new().with_join_hyphenated(false);
        let split: Vec<String> = tagger
            .tag("a well-known firm")
            .unwrap()
            .into_iter()
            .map(|t| t.text)
            .collect();
        assert!(split.contains(&"-".to_string()));
        assert!(!split.contains(&"well-known".to_string()));
    }

    #[test]
    fn test_possessive_stays_attached() {
        let tagged = tags("Brown's budget");
        assert_eq!(tagged[0].0, "Brown's");
        assert_eq!(tagged[0].1, "NNP");
    }

    #[test]
    fn test_unicode_handling() {
        let tagged = tags("Café résumé naïve.");
        assert!(tagged.iter().any(|(t, _)| t.contains('é')));
    }

    #[test]
    fn test_empty_input() {
        assert!(tags("").is_empty());
        assert!(tags("   \n\t").is_empty());
    }
}
