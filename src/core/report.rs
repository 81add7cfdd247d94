use crate::core::dataset::Dataset;
use crate::domain::model::{SentimentLabel, SentimentResult};
use crate::utils::error::{EtlError, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

pub const SENTIMENT_COLUMN: &str = "Sentiment";
pub const POLARITY_COLUMN: &str = "Polarity";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LabelCount {
    pub label: SentimentLabel,
    pub count: usize,
    pub percent: f64,
}

/// 各標籤的筆數與比例，長條圖與圓餅圖的資料來源
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SentimentDistribution {
    pub total: usize,
    pub buckets: Vec<LabelCount>,
}

impl SentimentDistribution {
    pub fn from_results(results: &[SentimentResult]) -> Self {
        let total = results.len();
        let buckets = SentimentLabel::ALL
            .iter()
            .map(|label| {
                let count = results.iter().filter(|r| r.label == *label).count();
                let percent = if total > 0 {
                    count as f64 * 100.0 / total as f64
                } else {
                    0.0
                };
                LabelCount {
                    label: *label,
                    count,
                    percent,
                }
            })
            .collect();
        Self { total, buckets }
    }

    pub fn count(&self, label: SentimentLabel) -> usize {
        self.buckets
            .iter()
            .find(|b| b.label == label)
            .map(|b| b.count)
            .unwrap_or(0)
    }
}

/// 散佈圖上的一點：列號、標籤、極性
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScatterPoint {
    pub index: usize,
    pub label: SentimentLabel,
    pub polarity: Option<f64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisReport {
    pub generated_at: DateTime<Utc>,
    pub column: String,
    pub total_rows: usize,
    pub distribution: SentimentDistribution,
    pub points: Vec<ScatterPoint>,
    /// Negative 列的索引，呈現端可據此發出警示
    pub negative_rows: Vec<usize>,
}

impl AnalysisReport {
    pub fn build(column: &str, results: &[SentimentResult]) -> Self {
        let points = results
            .iter()
            .enumerate()
            .map(|(index, r)| ScatterPoint {
                index,
                label: r.label,
                polarity: r.polarity,
            })
            .collect();

        Self {
            generated_at: Utc::now(),
            column: column.to_string(),
            total_rows: results.len(),
            distribution: SentimentDistribution::from_results(results),
            points,
            negative_rows: negative_rows(results),
        }
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

pub fn negative_rows(results: &[SentimentResult]) -> Vec<usize> {
    results
        .iter()
        .enumerate()
        .filter(|(_, r)| r.label.is_alert())
        .map(|(i, _)| i)
        .collect()
}

/// transform 階段的產出，load 階段依設定寫成各種格式
#[derive(Debug, Clone)]
pub struct AnalysisOutput {
    pub dataset: Dataset,
    pub results: Vec<SentimentResult>,
    pub report: AnalysisReport,
}

impl AnalysisOutput {
    pub fn new(dataset: Dataset, column: &str, results: Vec<SentimentResult>) -> Result<Self> {
        if dataset.len() != results.len() {
            return Err(EtlError::ProcessingError {
                message: format!(
                    "{} results for {} rows; results must align with input rows",
                    results.len(),
                    dataset.len()
                ),
            });
        }
        let report = AnalysisReport::build(column, &results);
        Ok(Self {
            dataset,
            results,
            report,
        })
    }

    pub fn to_csv(&self) -> Result<String> {
        render_table(&self.dataset, &self.results, b',')
    }

    pub fn to_tsv(&self) -> Result<String> {
        render_table(&self.dataset, &self.results, b'\t')
    }
}

pub fn format_polarity(polarity: Option<f64>) -> String {
    polarity.map(|p| format!("{:.4}", p)).unwrap_or_default()
}

/// 原始欄位後面接上 Sentiment、Polarity 兩欄
pub fn render_table(dataset: &Dataset, results: &[SentimentResult], delimiter: u8) -> Result<String> {
    let mut writer = csv::WriterBuilder::new()
        .delimiter(delimiter)
        .flexible(true)
        .from_writer(Vec::new());

    let mut header: Vec<&str> = dataset.columns().iter().map(|c| c.as_str()).collect();
    header.push(SENTIMENT_COLUMN);
    header.push(POLARITY_COLUMN);
    writer.write_record(&header)?;

    for (row, result) in dataset.rows().iter().zip(results) {
        let mut record: Vec<String> = row.clone();
        record.push(result.label.to_string());
        record.push(format_polarity(result.polarity));
        writer.write_record(&record)?;
    }

    let bytes = writer.into_inner().map_err(|e| EtlError::ProcessingError {
        message: format!("Failed to flush table output: {}", e),
    })?;
    String::from_utf8(bytes).map_err(|e| EtlError::ProcessingError {
        message: format!("Table output is not valid UTF-8: {}", e),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn result(label: SentimentLabel, polarity: Option<f64>) -> SentimentResult {
        SentimentResult { label, polarity }
    }

    fn sample_results() -> Vec<SentimentResult> {
        vec![
            result(SentimentLabel::Positive, Some(0.5)),
            result(SentimentLabel::Negative, Some(-0.8)),
            result(SentimentLabel::Neutral, Some(0.0)),
            result(SentimentLabel::Unknown, None),
        ]
    }

    #[test]
    fn test_distribution_counts_every_label() {
        let mut results = sample_results();
        results.push(result(SentimentLabel::Positive, Some(0.1)));

        let dist = SentimentDistribution::from_results(&results);
        assert_eq!(dist.total, 5);
        assert_eq!(dist.count(SentimentLabel::Positive), 2);
        assert_eq!(dist.count(SentimentLabel::Unknown), 1);
        assert_eq!(dist.buckets[0].percent, 40.0);
        let labels: Vec<_> = dist.buckets.iter().map(|b| b.label).collect();
        assert_eq!(labels, SentimentLabel::ALL.to_vec());
    }

    #[test]
    fn test_empty_distribution() {
        let dist = SentimentDistribution::from_results(&[]);
        assert_eq!(dist.total, 0);
        assert!(dist.buckets.iter().all(|b| b.count == 0 && b.percent == 0.0));
    }

    #[test]
    fn test_report_flags_negative_rows() {
        let report = AnalysisReport::build("review", &sample_results());
        assert_eq!(report.negative_rows, vec![1]);
        assert_eq!(report.points.len(), 4);
        assert_eq!(report.points[3].polarity, None);

        let json: serde_json::Value = serde_json::from_str(&report.to_json().unwrap()).unwrap();
        assert_eq!(json["column"], "review");
        assert_eq!(json["distribution"]["buckets"][1]["label"], "Negative");
    }

    #[test]
    fn test_table_appends_result_columns() {
        let dataset = Dataset::new(
            vec!["id".to_string(), "text".to_string()],
            vec![
                vec!["1".to_string(), "good, really".to_string()],
                vec!["2".to_string(), "bad".to_string()],
                vec!["3".to_string(), "table".to_string()],
                vec!["4".to_string(), "".to_string()],
            ],
        );
        let output = AnalysisOutput::new(dataset, "text", sample_results()).unwrap();

        let csv = output.to_csv().unwrap();
        let lines: Vec<&str> = csv.lines().collect();
        assert_eq!(lines[0], "id,text,Sentiment,Polarity");
        assert_eq!(lines[1], "1,\"good, really\",Positive,0.5000");
        assert_eq!(lines[4], "4,,Unknown,");

        let tsv = output.to_tsv().unwrap();
        assert!(tsv.starts_with("id\ttext\tSentiment\tPolarity"));
    }

    #[test]
    fn test_misaligned_results_are_rejected() {
        let dataset = Dataset::new(vec!["text".to_string()], vec![vec!["x".to_string()]]);
        assert!(AnalysisOutput::new(dataset, "text", sample_results()).is_err());
    }
}
