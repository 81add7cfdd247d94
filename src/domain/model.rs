use serde::{Deserialize, Serialize};
use std::fmt;

/// 一筆待分析的輸入值
///
/// 試算表的儲存格可能是文字、浮點數或其他型別；只有前兩者會被評分。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum TextRecord {
    Text(String),
    Number(f64),
    Other(serde_json::Value),
}

impl From<&str> for TextRecord {
    fn from(value: &str) -> Self {
        TextRecord::Text(value.to_string())
    }
}

impl From<String> for TextRecord {
    fn from(value: String) -> Self {
        TextRecord::Text(value)
    }
}

impl From<f64> for TextRecord {
    fn from(value: f64) -> Self {
        TextRecord::Number(value)
    }
}

impl From<i64> for TextRecord {
    fn from(value: i64) -> Self {
        TextRecord::Other(serde_json::Value::from(value))
    }
}

impl From<bool> for TextRecord {
    fn from(value: bool) -> Self {
        TextRecord::Other(serde_json::Value::Bool(value))
    }
}

impl<T: Into<TextRecord>> From<Option<T>> for TextRecord {
    fn from(value: Option<T>) -> Self {
        match value {
            Some(v) => v.into(),
            None => TextRecord::Other(serde_json::Value::Null),
        }
    }
}

impl From<serde_json::Value> for TextRecord {
    fn from(value: serde_json::Value) -> Self {
        match value {
            serde_json::Value::String(s) => TextRecord::Text(s),
            serde_json::Value::Number(n) if !n.is_i64() && !n.is_u64() => match n.as_f64() {
                Some(f) => TextRecord::Number(f),
                None => TextRecord::Other(serde_json::Value::Number(n)),
            },
            other => TextRecord::Other(other),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SentimentLabel {
    Positive,
    Negative,
    Neutral,
    Unknown,
}

impl SentimentLabel {
    /// 圖表分組使用的固定順序
    pub const ALL: [SentimentLabel; 4] = [
        SentimentLabel::Positive,
        SentimentLabel::Negative,
        SentimentLabel::Neutral,
        SentimentLabel::Unknown,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            SentimentLabel::Positive => "Positive",
            SentimentLabel::Negative => "Negative",
            SentimentLabel::Neutral => "Neutral",
            SentimentLabel::Unknown => "Unknown",
        }
    }

    pub fn is_alert(&self) -> bool {
        matches!(self, SentimentLabel::Negative)
    }
}

impl fmt::Display for SentimentLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SentimentResult {
    pub label: SentimentLabel,
    pub polarity: Option<f64>,
}

impl SentimentResult {
    /// 無法評分時的固定結果 `(Unknown, None)`
    pub const UNKNOWN: SentimentResult = SentimentResult {
        label: SentimentLabel::Unknown,
        polarity: None,
    };
}

impl fmt::Display for SentimentResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.polarity {
            Some(p) => write!(f, "Sentiment: {}\nPolarity: {:.2}", self.label, p),
            None => write!(f, "Sentiment: {}\nPolarity: n/a", self.label),
        }
    }
}

/// 與輸入列一一對應、順序相同
pub type BatchResult = Vec<SentimentResult>;
