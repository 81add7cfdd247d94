use crate::core::Pipeline;
use crate::utils::error::Result;
use crate::utils::monitor::ResourceMonitor;

pub struct AnalysisEngine<P: Pipeline> {
    pipeline: P,
    monitor: ResourceMonitor,
}

impl<P: Pipeline> AnalysisEngine<P> {
    pub fn new(pipeline: P) -> Self {
        Self::new_with_monitoring(pipeline, false)
    }

    pub fn new_with_monitoring(pipeline: P, monitor_enabled: bool) -> Self {
        Self {
            pipeline,
            monitor: ResourceMonitor::new(monitor_enabled),
        }
    }

    pub async fn run(&self) -> Result<String> {
        tracing::info!("Starting sentiment analysis...");
        self.monitor.log_stats("Start");

        // Extract
        let dataset = self.pipeline.extract().await?;
        tracing::info!(
            "Loaded {} rows ({} columns)",
            dataset.len(),
            dataset.columns().len()
        );
        self.monitor.log_stats("Extract");

        // Transform
        let output = self.pipeline.transform(dataset).await?;
        let dist = &output.report.distribution;
        tracing::info!(
            "Classified {} rows: {}",
            dist.total,
            dist.buckets
                .iter()
                .map(|b| format!("{} {} ({:.1}%)", b.label, b.count, b.percent))
                .collect::<Vec<_>>()
                .join(", ")
        );
        self.monitor.log_throughput("Transform", dist.total);

        // Load
        let output_path = self.pipeline.load(output).await?;
        tracing::info!("Output saved to: {}", output_path);
        self.monitor.log_final_stats();

        Ok(output_path)
    }
}
