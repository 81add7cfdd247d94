use crate::core::classifier::SentimentClassifier;
use crate::core::dataset::Dataset;
use crate::core::report::AnalysisOutput;
use crate::core::{ConfigProvider, Pipeline, PolarityScorer, Storage};
use crate::utils::error::Result;
use std::io::Write;
use std::path::Path;
use zip::write::{SimpleFileOptions, ZipWriter};

pub const CSV_FILENAME: &str = "sentiment_results.csv";
pub const TSV_FILENAME: &str = "sentiment_results.tsv";
pub const REPORT_FILENAME: &str = "sentiment_report.json";

pub struct SentimentPipeline<S: Storage, C: ConfigProvider, P: PolarityScorer> {
    storage: S,
    config: C,
    classifier: SentimentClassifier<P>,
}

impl<S: Storage, C: ConfigProvider, P: PolarityScorer> SentimentPipeline<S, C, P> {
    pub fn new(storage: S, config: C, scorer: P) -> Self {
        Self {
            storage,
            config,
            classifier: SentimentClassifier::new(scorer),
        }
    }

    fn output_file(&self, name: &str) -> String {
        Path::new(self.config.output_path())
            .join(name)
            .to_string_lossy()
            .into_owned()
    }

    /// 依設定的格式產生 (檔名, 內容)
    fn render_outputs(&self, output: &AnalysisOutput) -> Result<Vec<(&'static str, Vec<u8>)>> {
        let mut files = Vec::new();
        for format in self.config.output_formats() {
            match format.as_str() {
                "csv" => files.push((CSV_FILENAME, output.to_csv()?.into_bytes())),
                "tsv" => files.push((TSV_FILENAME, output.to_tsv()?.into_bytes())),
                "json" => files.push((REPORT_FILENAME, output.report.to_json()?.into_bytes())),
                other => tracing::warn!("Skipping unsupported output format: {}", other),
            }
        }
        Ok(files)
    }
}

#[async_trait::async_trait]
impl<S: Storage, C: ConfigProvider, P: PolarityScorer> Pipeline for SentimentPipeline<S, C, P> {
    async fn extract(&self) -> Result<Dataset> {
        tracing::debug!("Reading input file: {}", self.config.input_path());
        let data = self.storage.read_file(self.config.input_path()).await?;
        let dataset = Dataset::from_csv_bytes(&data)?;

        tracing::debug!("Available columns: {}", dataset.columns().join(", "));
        Ok(dataset)
    }

    async fn transform(&self, data: Dataset) -> Result<AnalysisOutput> {
        let column = self.config.text_column();
        // 欄位不存在時在這裡就回報，不會進到分類器
        let rows = data.column(column)?;

        let workers = self.config.parallelism();
        tracing::debug!("Classifying {} rows with {} worker(s)", rows.len(), workers);
        let results = self.classifier.classify_batch_parallel(&rows, workers);

        let output = AnalysisOutput::new(data, column, results)?;
        let negatives = output.report.negative_rows.len();
        if negatives > 0 {
            tracing::warn!("⚠️ Negative sentiment detected in {} row(s)", negatives);
        }
        Ok(output)
    }

    async fn load(&self, output: AnalysisOutput) -> Result<String> {
        let files = self.render_outputs(&output)?;

        if let Some(archive) = self.config.archive_name() {
            tracing::debug!("Creating ZIP file with {} files", files.len());

            let zip_data = {
                let mut zip = ZipWriter::new(std::io::Cursor::new(Vec::new()));
                for (name, content) in &files {
                    zip.start_file(*name, SimpleFileOptions::default())?;
                    zip.write_all(content)?;
                }
                zip.finish()?.into_inner()
            };

            let archive_path = self.output_file(archive);
            tracing::debug!("Writing ZIP file ({} bytes) to storage", zip_data.len());
            self.storage.write_file(&archive_path, &zip_data).await?;
            return Ok(archive_path);
        }

        for (name, content) in &files {
            let path = self.output_file(name);
            self.storage.write_file(&path, content).await?;
            tracing::debug!("Wrote {} ({} bytes)", path, content.len());
        }

        Ok(self.config.output_path().to_string())
    }
}
