use crate::core::dataset::Dataset;
use crate::core::report::AnalysisOutput;
use crate::utils::error::Result;
use async_trait::async_trait;

/// 情緒極性評分能力：回傳 [-1.0, 1.0] 之間的分數
///
/// 分類器只依賴這個介面，測試時可替換成固定分數的假實作。
pub trait PolarityScorer: Send + Sync {
    fn score(&self, text: &str) -> Result<f64>;
}

pub trait Storage: Send + Sync {
    fn read_file(&self, path: &str) -> impl std::future::Future<Output = Result<Vec<u8>>> + Send;
    fn write_file(
        &self,
        path: &str,
        data: &[u8],
    ) -> impl std::future::Future<Output = Result<()>> + Send;
}

pub trait ConfigProvider: Send + Sync {
    fn input_path(&self) -> &str;
    fn text_column(&self) -> &str;
    fn output_path(&self) -> &str;
    fn output_formats(&self) -> &[String];
    /// 設定時把所有輸出打包成這個 ZIP 檔名
    fn archive_name(&self) -> Option<&str>;
    fn parallelism(&self) -> usize;
}

#[async_trait]
pub trait Pipeline: Send + Sync {
    async fn extract(&self) -> Result<Dataset>;
    async fn transform(&self, data: Dataset) -> Result<AnalysisOutput>;
    async fn load(&self, output: AnalysisOutput) -> Result<String>;
}
