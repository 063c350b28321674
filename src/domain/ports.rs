use crate::domain::model::{JobPosting, TransformResult};
use crate::utils::error::Result;
use async_trait::async_trait;

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
    fn output_path(&self) -> &str;
    fn output_formats(&self) -> &[String];
    fn top_companies(&self) -> usize;
    fn delimiter(&self) -> u8 {
        b','
    }
    /// ZIP 檔名；`None` 表示不壓縮，逐檔輸出
    fn archive_name(&self) -> Option<&str>;
}

#[async_trait]
pub trait Pipeline: Send + Sync {
    async fn extract(&self) -> Result<Vec<JobPosting>>;
    async fn transform(&self, data: Vec<JobPosting>) -> Result<TransformResult>;
    async fn load(&self, result: TransformResult) -> Result<String>;
}
