use crate::domain::model::{BatchResult, SentimentLabel, SentimentResult, TextRecord};
use crate::domain::ports::PolarityScorer;
use rayon::prelude::*;

/// 依極性分數決定標籤，0 (含 -0.0) 歸為 Neutral
pub fn threshold(polarity: f64) -> SentimentLabel {
    if polarity > 0.0 {
        SentimentLabel::Positive
    } else if polarity < 0.0 {
        SentimentLabel::Negative
    } else {
        SentimentLabel::Neutral
    }
}

/// 浮點數轉成評分用的文字：整數值保留 `.0`，極大或極小值用 `1e+16` 形式
pub fn float_to_text(value: f64) -> String {
    if value.is_nan() {
        return "nan".to_string();
    }
    if value.is_infinite() {
        return if value > 0.0 { "inf" } else { "-inf" }.to_string();
    }

    let magnitude = value.abs();
    if magnitude != 0.0 && !(1e-4..1e16).contains(&magnitude) {
        let formatted = format!("{:e}", value);
        return match formatted.split_once('e') {
            Some((mantissa, exponent)) => {
                let exp: i32 = exponent.parse().unwrap_or(0);
                let sign = if exp < 0 { '-' } else { '+' };
                format!("{}e{}{:02}", mantissa, sign, exp.abs())
            }
            None => formatted,
        };
    }

    let formatted = value.to_string();
    if formatted.contains('.') {
        formatted
    } else {
        format!("{}.0", formatted)
    }
}

/// 情緒分類器：輸入型別轉換 + 評分 + 門檻分類
///
/// 不保存任何跨呼叫狀態，同樣的輸入永遠得到同樣的結果。
#[derive(Debug, Clone)]
pub struct SentimentClassifier<P: PolarityScorer> {
    scorer: P,
}

impl<P: PolarityScorer> SentimentClassifier<P> {
    pub fn new(scorer: P) -> Self {
        Self { scorer }
    }

    pub fn classify(&self, input: &TextRecord) -> SentimentResult {
        let text = match input {
            TextRecord::Number(value) => float_to_text(*value),
            TextRecord::Text(text) => text.clone(),
            TextRecord::Other(_) => return SentimentResult::UNKNOWN,
        };
        self.classify_text(&text)
    }

    /// 評分失敗或回傳非有限值時，該筆降級為 Unknown
    pub fn classify_text(&self, text: &str) -> SentimentResult {
        match self.scorer.score(text) {
            Ok(polarity) if polarity.is_finite() => {
                let polarity = polarity.clamp(-1.0, 1.0);
                SentimentResult {
                    label: threshold(polarity),
                    polarity: Some(polarity),
                }
            }
            Ok(polarity) => {
                tracing::warn!("Scorer returned non-finite polarity {}, marking as Unknown", polarity);
                SentimentResult::UNKNOWN
            }
            Err(e) => {
                tracing::warn!("Scoring failed, marking as Unknown: {}", e);
                SentimentResult::UNKNOWN
            }
        }
    }

    pub fn classify_batch(&self, rows: &[TextRecord]) -> BatchResult {
        rows.iter().map(|row| self.classify(row)).collect()
    }

    /// 多執行緒版本，輸出順序與輸入一致
    pub fn classify_batch_parallel(&self, rows: &[TextRecord], workers: usize) -> BatchResult {
        if workers <= 1 || rows.len() < 2 {
            return self.classify_batch(rows);
        }

        match rayon::ThreadPoolBuilder::new().num_threads(workers).build() {
            Ok(pool) => pool.install(|| rows.par_iter().map(|row| self.classify(row)).collect()),
            Err(e) => {
                tracing::warn!("Failed to build worker pool ({}), classifying sequentially", e);
                self.classify_batch(rows)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::error::{EtlError, Result};
    use serde_json::json;
    use std::collections::HashMap;

    /// 依文字查表的假評分器，查不到回傳 0
    struct FixedScorer(HashMap<&'static str, f64>);

    impl FixedScorer {
        fn new(entries: &[(&'static str, f64)]) -> Self {
            Self(entries.iter().copied().collect())
        }
    }

    impl PolarityScorer for FixedScorer {
        fn score(&self, text: &str) -> Result<f64> {
            match text {
                "boom" => Err(EtlError::ScoringError {
                    message: "boom".to_string(),
                }),
                _ => Ok(self.0.get(text).copied().unwrap_or(0.0)),
            }
        }
    }

    fn classifier() -> SentimentClassifier<FixedScorer> {
        SentimentClassifier::new(FixedScorer::new(&[
            ("nice", 0.6),
            ("awful", -0.9),
            ("3.14", 0.25),
            ("nan?", f64::NAN),
            ("huge", 7.0),
        ]))
    }

    #[test]
    fn test_threshold_boundaries() {
        assert_eq!(threshold(-1.0), SentimentLabel::Negative);
        assert_eq!(threshold(-0.0001), SentimentLabel::Negative);
        assert_eq!(threshold(0.0), SentimentLabel::Neutral);
        assert_eq!(threshold(-0.0), SentimentLabel::Neutral);
        assert_eq!(threshold(0.0001), SentimentLabel::Positive);
        assert_eq!(threshold(1.0), SentimentLabel::Positive);
    }

    #[test]
    fn test_float_to_text() {
        assert_eq!(float_to_text(3.14), "3.14");
        assert_eq!(float_to_text(42.0), "42.0");
        assert_eq!(float_to_text(-7.0), "-7.0");
        assert_eq!(float_to_text(0.0), "0.0");
        assert_eq!(float_to_text(0.0001), "0.0001");
        assert_eq!(float_to_text(0.000015), "1.5e-05");
        assert_eq!(float_to_text(1e16), "1e+16");
        assert_eq!(float_to_text(f64::NAN), "nan");
        assert_eq!(float_to_text(f64::INFINITY), "inf");
        assert_eq!(float_to_text(f64::NEG_INFINITY), "-inf");
    }

    #[test]
    fn test_text_is_scored_as_is() {
        let c = classifier();
        assert_eq!(
            c.classify(&"nice".into()),
            SentimentResult {
                label: SentimentLabel::Positive,
                polarity: Some(0.6)
            }
        );
        assert_eq!(c.classify(&"awful".into()).label, SentimentLabel::Negative);
    }

    #[test]
    fn test_float_is_converted_to_text_first() {
        let result = classifier().classify(&TextRecord::Number(3.14));
        assert_eq!(result.label, SentimentLabel::Positive);
        assert_eq!(result.polarity, Some(0.25));
    }

    #[test]
    fn test_other_types_are_unknown() {
        let c = classifier();
        for value in [json!(null), json!(true), json!([1, 2]), json!(42), json!({"a": 1})] {
            assert_eq!(c.classify(&TextRecord::Other(value)), SentimentResult::UNKNOWN);
        }
    }

    #[test]
    fn test_empty_string_is_neutral_and_deterministic() {
        let c = classifier();
        let expected = SentimentResult {
            label: SentimentLabel::Neutral,
            polarity: Some(0.0),
        };
        for _ in 0..3 {
            assert_eq!(c.classify(&"".into()), expected);
        }
    }

    #[test]
    fn test_scorer_failure_degrades_to_unknown() {
        let c = classifier();
        assert_eq!(c.classify(&"boom".into()), SentimentResult::UNKNOWN);
        assert_eq!(c.classify(&"nan?".into()), SentimentResult::UNKNOWN);
    }

    #[test]
    fn test_out_of_range_scores_are_clamped() {
        assert_eq!(classifier().classify(&"huge".into()).polarity, Some(1.0));
    }

    #[test]
    fn test_batch_is_positional() {
        let c = classifier();
        let rows: Vec<TextRecord> = vec![
            "nice".into(),
            TextRecord::Other(json!(1)),
            "awful".into(),
            "".into(),
            "boom".into(),
        ];

        let results = c.classify_batch(&rows);
        assert_eq!(results.len(), rows.len());
        for (row, result) in rows.iter().zip(&results) {
            assert_eq!(*result, c.classify(row));
        }
    }

    #[test]
    fn test_parallel_batch_matches_sequential() {
        let c = classifier();
        let rows: Vec<TextRecord> = (0..200)
            .map(|i| match i % 4 {
                0 => "nice".into(),
                1 => "awful".into(),
                2 => TextRecord::Number(3.14),
                _ => TextRecord::Other(json!(i)),
            })
            .collect();

        assert_eq!(c.classify_batch_parallel(&rows, 4), c.classify_batch(&rows));
        assert!(c.classify_batch_parallel(&[], 4).is_empty());
    }

    #[test]
    fn test_reordering_inputs_reorders_outputs() {
        let c = classifier();
        let rows: Vec<TextRecord> = vec!["nice".into(), "awful".into(), "".into()];
        let reversed: Vec<TextRecord> = rows.iter().rev().cloned().collect();

        let mut forward = c.classify_batch(&rows);
        forward.reverse();
        assert_eq!(forward, c.classify_batch(&reversed));
    }
}
