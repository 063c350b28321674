pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;
pub use config::{cli::LocalStorage, toml_config::TomlConfig};

pub use core::{etl::EtlEngine, pipeline::JobPostingPipeline};
pub use domain::classifier::{classify, classify_opt};
pub use domain::model::{AnalysisReport, JobPosting, RoleCategory};
pub use utils::error::{EtlError, Result};
