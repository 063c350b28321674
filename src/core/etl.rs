use crate::core::Pipeline;
use crate::utils::error::Result;
use crate::utils::monitor::SystemMonitor;

pub struct EtlEngine<P: Pipeline> {
    pipeline: P,
    monitor: SystemMonitor,
}

impl<P: Pipeline> EtlEngine<P> {
    pub fn new(pipeline: P) -> Self {
        Self::new_with_monitoring(pipeline, false)
    }

    pub fn new_with_monitoring(pipeline: P, monitor_enabled: bool) -> Self {
        Self {
            pipeline,
            monitor: SystemMonitor::new(monitor_enabled),
        }
    }

    pub async fn run(&self) -> Result<String> {
        tracing::info!("Starting job posting analysis...");
        self.monitor.log_stats("Start");

        // Extract
        tracing::info!("Extracting job postings...");
        let postings = self.pipeline.extract().await?;
        tracing::info!("Extracted {} postings", postings.len());
        self.monitor.log_stats("Extract");

        // Transform
        tracing::info!("Classifying and aggregating...");
        let result = self.pipeline.transform(postings).await?;
        tracing::info!(
            "Classified {} postings ({} distinct ids)",
            result.classified.len(),
            result.report.total_postings
        );
        self.monitor.log_stats("Transform");

        // Load
        tracing::info!("Writing analysis output...");
        let output_path = self.pipeline.load(result).await?;
        tracing::info!("Output saved to: {}", output_path);
        self.monitor.log_stats("Load");

        self.monitor.log_final_stats();
        Ok(output_path)
    }
}
