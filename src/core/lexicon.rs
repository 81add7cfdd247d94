//! 以詞典為基礎的情緒極性評分
//!
//! 每個命中詞典的詞貢獻一個分數，前面的強化詞會放大分數，
//! 否定詞會在視窗內反轉並減弱分數，最後取平均並限制在 [-1, 1]。

use crate::domain::ports::PolarityScorer;
use crate::utils::error::{EtlError, Result};
use regex::Regex;
use std::collections::HashMap;
use std::sync::LazyLock;

static TOKEN_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[a-z]+(?:'[a-z]+)?|!").expect("token regex is valid"));

pub const DEFAULT_NEGATION_WINDOW: usize = 3;
pub const DEFAULT_MAX_TEXT_LEN: usize = 1024 * 1024;

const NEGATION_FACTOR: f64 = -0.5;
const EXCLAMATION_BOOST: f64 = 1.1;
const MAX_EXCLAMATIONS: i32 = 3;

const POSITIVE_WORDS: &[(&str, f64)] = &[
    ("love", 0.5),
    ("loved", 0.7),
    ("lovely", 0.5),
    ("like", 0.2),
    ("liked", 0.3),
    ("enjoy", 0.4),
    ("enjoyed", 0.4),
    ("good", 0.7),
    ("great", 0.8),
    ("excellent", 1.0),
    ("amazing", 0.6),
    ("awesome", 1.0),
    ("fantastic", 0.4),
    ("wonderful", 1.0),
    ("perfect", 1.0),
    ("best", 1.0),
    ("better", 0.5),
    ("nice", 0.6),
    ("happy", 0.8),
    ("glad", 0.5),
    ("pleased", 0.5),
    ("delighted", 0.7),
    ("beautiful", 0.85),
    ("brilliant", 0.9),
    ("superb", 1.0),
    ("outstanding", 0.5),
    ("impressive", 1.0),
    ("fun", 0.3),
    ("helpful", 0.5),
    ("useful", 0.3),
    ("recommend", 0.4),
    ("fine", 0.4),
    ("positive", 0.2),
    ("success", 0.3),
    ("successful", 0.75),
    ("win", 0.8),
    ("winning", 0.5),
    ("fast", 0.2),
    ("easy", 0.4),
    ("clean", 0.4),
    ("friendly", 0.4),
    ("satisfied", 0.5),
    ("exciting", 0.3),
    ("excited", 0.4),
    ("cool", 0.35),
    ("favorite", 0.5),
    ("thanks", 0.2),
    ("thank", 0.2),
    ("reliable", 0.5),
    ("comfortable", 0.4),
    ("smooth", 0.4),
    ("incredible", 0.9),
    ("kind", 0.6),
    ("fair", 0.7),
    ("right", 0.3),
    ("well", 0.2),
];

const NEGATIVE_WORDS: &[(&str, f64)] = &[
    ("hate", -0.8),
    ("hated", -0.9),
    ("dislike", -0.5),
    ("bad", -0.7),
    ("worse", -0.4),
    ("worst", -1.0),
    ("terrible", -1.0),
    ("horrible", -1.0),
    ("awful", -1.0),
    ("poor", -0.4),
    ("sad", -0.5),
    ("angry", -0.5),
    ("annoying", -0.8),
    ("annoyed", -0.4),
    ("disappointed", -0.75),
    ("disappointing", -0.6),
    ("boring", -1.0),
    ("broken", -0.4),
    ("useless", -0.5),
    ("slow", -0.3),
    ("ugly", -0.7),
    ("wrong", -0.5),
    ("fail", -0.5),
    ("failed", -0.5),
    ("failure", -0.3),
    ("problem", -0.2),
    ("problems", -0.2),
    ("issue", -0.1),
    ("difficult", -0.5),
    ("hard", -0.3),
    ("expensive", -0.5),
    ("dirty", -0.6),
    ("rude", -0.3),
    ("stupid", -0.8),
    ("nasty", -1.0),
    ("painful", -0.7),
    ("pain", -0.3),
    ("negative", -0.3),
    ("lose", -0.3),
    ("lost", -0.2),
    ("scary", -0.5),
    ("afraid", -0.6),
    ("unhappy", -0.6),
    ("frustrating", -0.4),
    ("frustrated", -0.7),
    ("waste", -0.2),
    ("crash", -0.3),
    ("crashed", -0.3),
    ("buggy", -0.5),
    ("mediocre", -0.3),
    ("unreliable", -0.5),
    ("dangerous", -0.6),
    ("sick", -0.7),
    ("cheap", -0.1),
    ("weird", -0.5),
];

const INTENSIFIERS: &[(&str, f64)] = &[
    ("very", 1.3),
    ("really", 1.3),
    ("extremely", 1.5),
    ("incredibly", 1.5),
    ("super", 1.4),
    ("absolutely", 1.4),
    ("totally", 1.3),
    ("completely", 1.3),
    ("highly", 1.3),
    ("so", 1.2),
    ("quite", 1.1),
    ("pretty", 1.1),
    ("somewhat", 0.7),
    ("slightly", 0.5),
    ("barely", 0.4),
];

const NEGATIONS: &[&str] = &[
    "not", "no", "never", "neither", "nor", "nobody", "nothing", "nowhere", "without",
    "don't", "dont", "doesn't", "doesnt", "didn't", "didnt", "can't", "cant", "cannot",
    "couldn't", "couldnt", "won't", "wont", "wouldn't", "wouldnt", "shouldn't", "shouldnt",
    "isn't", "isnt", "aren't", "arent", "wasn't", "wasnt", "weren't", "werent",
    "haven't", "havent", "hasn't", "hasnt", "hadn't", "hadnt", "ain't",
];

#[derive(Debug, Clone)]
pub struct LexiconScorer {
    words: HashMap<String, f64>,
    intensifiers: HashMap<String, f64>,
    negations: Vec<String>,
    negation_window: usize,
    max_text_len: usize,
}

impl LexiconScorer {
    pub fn new() -> Self {
        let words = POSITIVE_WORDS
            .iter()
            .chain(NEGATIVE_WORDS.iter())
            .map(|(w, s)| (w.to_string(), *s))
            .collect();
        let intensifiers = INTENSIFIERS
            .iter()
            .map(|(w, m)| (w.to_string(), *m))
            .collect();
        let negations = NEGATIONS.iter().map(|w| w.to_string()).collect();

        Self {
            words,
            intensifiers,
            negations,
            negation_window: DEFAULT_NEGATION_WINDOW,
            max_text_len: DEFAULT_MAX_TEXT_LEN,
        }
    }

    pub fn with_negation_window(mut self, window: usize) -> Self {
        self.negation_window = window;
        self
    }

    pub fn with_max_text_len(mut self, max_len: usize) -> Self {
        self.max_text_len = max_len;
        self
    }

    /// 合併自訂詞彙，同名詞會覆蓋內建分數
    pub fn with_extra_words<'a, I>(mut self, words: I) -> Self
    where
        I: IntoIterator<Item = (&'a String, &'a f64)>,
    {
        for (word, score) in words {
            self.add_word(word, *score);
        }
        self
    }

    pub fn add_word(&mut self, word: &str, score: f64) {
        self.words
            .insert(word.to_lowercase(), score.clamp(-1.0, 1.0));
    }

    pub fn word_score(&self, word: &str) -> Option<f64> {
        self.words.get(&word.to_lowercase()).copied()
    }

    pub fn is_negation(&self, word: &str) -> bool {
        self.negations.iter().any(|n| n == word)
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    fn polarity(&self, text: &str) -> f64 {
        let normalized = text.to_lowercase().replace('\u{2019}', "'");

        let mut total = 0.0;
        let mut hits = 0usize;
        let mut exclamations = 0i32;
        let mut modifier = 1.0;
        let mut negation_left = 0usize;

        for token in TOKEN_REGEX.find_iter(&normalized).map(|m| m.as_str()) {
            if token == "!" {
                exclamations += 1;
                continue;
            }

            if self.is_negation(token) {
                negation_left = self.negation_window;
                modifier = 1.0;
                continue;
            }

            if let Some(m) = self.intensifiers.get(token) {
                modifier = *m;
                continue;
            }

            match self.words.get(token) {
                Some(base) => {
                    let mut score = (base * modifier).clamp(-1.0, 1.0);
                    if negation_left > 0 {
                        score *= NEGATION_FACTOR;
                        negation_left = 0;
                    }
                    total += score;
                    hits += 1;
                }
                None => negation_left = negation_left.saturating_sub(1),
            }
            modifier = 1.0;
        }

        if hits == 0 {
            return 0.0;
        }

        let mut mean = total / hits as f64;
        if mean != 0.0 && exclamations > 0 {
            mean *= EXCLAMATION_BOOST.powi(exclamations.min(MAX_EXCLAMATIONS));
        }
        mean.clamp(-1.0, 1.0)
    }
}

impl Default for LexiconScorer {
    fn default() -> Self {
        Self::new()
    }
}

impl PolarityScorer for LexiconScorer {
    fn score(&self, text: &str) -> Result<f64> {
        if text.len() > self.max_text_len {
            return Err(EtlError::ScoringError {
                message: format!(
                    "text of {} bytes exceeds the {} byte limit",
                    text.len(),
                    self.max_text_len
                ),
            });
        }
        Ok(self.polarity(text))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn score(text: &str) -> f64 {
        LexiconScorer::new().score(text).unwrap()
    }

    #[test]
    fn test_plain_positive_and_negative() {
        assert!(score("I love this!") > 0.0);
        assert!(score("I hate this.") < 0.0);
    }

    #[test]
    fn test_no_sentiment_words_is_zero() {
        assert_eq!(score("It is a table."), 0.0);
        assert_eq!(score(""), 0.0);
        assert_eq!(score("42.0"), 0.0);
        assert_eq!(score("nan"), 0.0);
    }

    #[test]
    fn test_case_insensitive() {
        assert_eq!(score("GOOD"), score("good"));
    }

    #[test]
    fn test_negation_flips_and_damps() {
        let plain = score("this is good");
        let negated = score("this is not good");
        assert!(plain > 0.0);
        assert!(negated < 0.0);
        assert!(negated.abs() < plain.abs());
    }

    #[test]
    fn test_negation_window_expires() {
        let scorer = LexiconScorer::new().with_negation_window(1);
        let far = scorer.score("not at all the good one").unwrap();
        assert!(far > 0.0);
    }

    #[test]
    fn test_contraction_with_curly_apostrophe() {
        assert!(score("I don\u{2019}t like it") < 0.0);
    }

    #[test]
    fn test_intensifier_amplifies() {
        assert!(score("very good") > score("good"));
        assert!(score("slightly good") < score("good"));
    }

    #[test]
    fn test_exclamation_boost_is_bounded() {
        let calm = score("great");
        let loud = score("great!!!!!!!!");
        assert!(loud > calm);
        assert!(loud <= 1.0);
    }

    #[test]
    fn test_scores_stay_in_range() {
        for text in ["extremely awesome!!!", "absolutely terrible!!!", "worst worst worst"] {
            let s = score(text);
            assert!((-1.0..=1.0).contains(&s), "{} scored {}", text, s);
        }
    }

    #[test]
    fn test_extra_words_override() {
        let extra: HashMap<String, f64> = [("table".to_string(), 0.4), ("meh".to_string(), -3.0)]
            .into_iter()
            .collect();
        let scorer = LexiconScorer::new().with_extra_words(&extra);

        assert!(scorer.score("It is a table.").unwrap() > 0.0);
        assert_eq!(scorer.word_score("meh"), Some(-1.0));
    }

    #[test]
    fn test_overlong_text_is_a_scoring_error() {
        let scorer = LexiconScorer::new().with_max_text_len(8);
        assert!(matches!(
            scorer.score("this text is too long"),
            Err(EtlError::ScoringError { .. })
        ));
    }
}
