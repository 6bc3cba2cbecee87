//! Order label normalization
//!
//! Order files name their axes with labels such as `"two_portions"` or
//! `"four_recipes"`. The word before the first underscore is looked up in a
//! [`LabelVocabulary`]; anything outside the vocabulary is rejected rather
//! than passed through.

use std::collections::BTreeMap;

use crate::error::{AllocatorError, ErrorCode, Result};

/// Words understood out of the box
pub const DEFAULT_WORDS: &[(&str, u32)] = &[("two", 2), ("three", 3), ("four", 4)];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LabelVocabulary {
    words: BTreeMap<String, u32>,
}

impl Default for LabelVocabulary {
    fn default() -> Self {
        Self {
            words: DEFAULT_WORDS
                .iter()
                .map(|&(word, value)| (word.to_string(), value))
                .collect(),
        }
    }
}

impl LabelVocabulary {
    /// Add or replace a word
    pub fn with_word(mut self, word: impl Into<String>, value: u32) -> Result<Self> {
        self.insert(word, value)?;
        Ok(self)
    }

    pub fn insert(&mut self, word: impl Into<String>, value: u32) -> Result<()> {
        let word = word.into();
        if word.is_empty() || word.contains('_') {
            return Err(AllocatorError::config_with_code(
                ErrorCode::CONFIG_INVALID_VALUE,
                format!("label word '{word}' must be non-empty and contain no '_'"),
            ));
        }
        if value == 0 {
            return Err(AllocatorError::config_with_code(
                ErrorCode::CONFIG_INVALID_VALUE,
                format!("label word '{word}' must map to a positive number"),
            ));
        }
        self.words.insert(word.to_lowercase(), value);
        Ok(())
    }

    /// Extend the vocabulary with configured words
    pub fn extend<'a>(&mut self, words: impl IntoIterator<Item = (&'a String, &'a u32)>) -> Result<()> {
        for (word, &value) in words {
            self.insert(word.clone(), value)?;
        }
        Ok(())
    }

    pub fn words(&self) -> impl Iterator<Item = (&str, u32)> {
        self.words.iter().map(|(word, &value)| (word.as_str(), value))
    }

    /// Convert a label like `"three_portions"` to its number
    pub fn parse(&self, label: &str) -> Result<u32> {
        let word = label.split('_').next().unwrap_or_default();
        self.words
            .get(&word.to_lowercase())
            .copied()
            .ok_or_else(|| {
                let known: Vec<&str> = self.words.keys().map(String::as_str).collect();
                AllocatorError::input_with_code(
                    ErrorCode::VALIDATION_UNKNOWN_LABEL,
                    format!(
                        "unknown label '{label}' (known words: {})",
                        known.join(", ")
                    ),
                    Some(label.to_string()),
                )
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_words() {
        let vocab = LabelVocabulary::default();
        assert_eq!(vocab.parse("two_portions").unwrap(), 2);
        assert_eq!(vocab.parse("three_recipes").unwrap(), 3);
        assert_eq!(vocab.parse("four_portions").unwrap(), 4);
    }

    #[test]
    fn test_bare_word_and_case() {
        let vocab = LabelVocabulary::default();
        assert_eq!(vocab.parse("three").unwrap(), 3);
        assert_eq!(vocab.parse("Four_Recipes").unwrap(), 4);
    }

    #[test]
    fn test_unknown_label_is_an_error() {
        let vocab = LabelVocabulary::default();
        let err = vocab.parse("five_portions").unwrap_err();
        assert_eq!(err.code(), ErrorCode::VALIDATION_UNKNOWN_LABEL);
        assert!(err.to_string().contains("five_portions"));

        assert!(vocab.parse("").is_err());
        assert!(vocab.parse("_portions").is_err());
    }

    #[test]
    fn test_extended_vocabulary() {
        let vocab = LabelVocabulary::default().with_word("six", 6).unwrap();
        assert_eq!(vocab.parse("six_portions").unwrap(), 6);
        assert_eq!(vocab.words().count(), 4);
    }

    #[test]
    fn test_invalid_words_are_rejected() {
        let err = LabelVocabulary::default().with_word("one_", 1).unwrap_err();
        assert_eq!(err.code(), ErrorCode::CONFIG_INVALID_VALUE);

        let err = LabelVocabulary::default().with_word("zero", 0).unwrap_err();
        assert_eq!(err.code(), ErrorCode::CONFIG_INVALID_VALUE);
    }
}
