use crate::core::lexicon::{LexiconScorer, DEFAULT_MAX_TEXT_LEN, DEFAULT_NEGATION_WINDOW};
use crate::utils::error::Result;
use crate::utils::validation::{validate_positive_number, validate_range, Validate};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// 評分器與批次分類的設定，CLI 與 TOML 共用
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoringConfig {
    pub negation_window: usize,
    pub max_text_len: usize,
    pub parallelism: usize,
    pub extra_words: HashMap<String, f64>,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            negation_window: DEFAULT_NEGATION_WINDOW,
            max_text_len: DEFAULT_MAX_TEXT_LEN,
            parallelism: 1,
            extra_words: HashMap::new(),
        }
    }
}

impl ScoringConfig {
    pub fn build_scorer(&self) -> LexiconScorer {
        LexiconScorer::new()
            .with_negation_window(self.negation_window)
            .with_max_text_len(self.max_text_len)
            .with_extra_words(&self.extra_words)
    }
}

impl Validate for ScoringConfig {
    fn validate(&self) -> Result<()> {
        validate_positive_number("scoring.parallelism", self.parallelism, 1)?;
        validate_positive_number("scoring.max_text_len", self.max_text_len, 1)?;
        for (word, score) in &self.extra_words {
            validate_range(&format!("scoring.extra_words.{}", word), *score, -1.0, 1.0)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ports::PolarityScorer;

    #[test]
    fn test_defaults_are_valid() {
        assert!(ScoringConfig::default().validate().is_ok());
    }

    #[test]
    fn test_extra_words_reach_the_scorer() {
        let mut config = ScoringConfig::default();
        config.extra_words.insert("stellar".to_string(), 0.9);

        let scorer = config.build_scorer();
        assert!(scorer.score("a stellar release").unwrap() > 0.0);
    }

    #[test]
    fn test_out_of_range_extra_word_is_rejected() {
        let mut config = ScoringConfig::default();
        config.extra_words.insert("meh".to_string(), -2.0);
        assert!(config.validate().is_err());
    }
}
