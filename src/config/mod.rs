pub mod cli;
pub mod toml_config;

#[cfg(feature = "cli")]
use crate::core::ConfigProvider;
#[cfg(feature = "cli")]
use crate::core::analysis::DEFAULT_TOP_COMPANIES;
#[cfg(feature = "cli")]
use crate::utils::error::Result;
#[cfg(feature = "cli")]
use crate::utils::validation::{self, Validate};
#[cfg(feature = "cli")]
use clap::Parser;
#[cfg(feature = "cli")]
use serde::{Deserialize, Serialize};

#[cfg(feature = "cli")]
#[derive(Debug, Clone, Serialize, Deserialize, Parser)]
#[command(name = "jobpost-etl")]
#[command(about = "Classify data/AI job postings and build the tables behind the hiring charts")]
pub struct CliConfig {
    #[arg(long, default_value = "clean_jobs.csv")]
    pub input: String,

    #[arg(long, default_value = "./output")]
    pub output_path: String,

    #[arg(long, value_delimiter = ',', default_value = "csv,json")]
    pub formats: Vec<String>,

    #[arg(long, default_value_t = DEFAULT_TOP_COMPANIES)]
    pub top_companies: usize,

    #[arg(long, default_value = ",", help = "Field delimiter of the input file")]
    pub delimiter: String,

    #[arg(long, help = "Bundle all output files into a single ZIP archive")]
    pub compress: bool,

    #[arg(long, default_value = "analysis_output.zip")]
    pub archive_name: String,

    #[arg(long, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, help = "Log CPU and memory usage per phase")]
    pub monitor: bool,
}

#[cfg(feature = "cli")]
impl ConfigProvider for CliConfig {
    fn input_path(&self) -> &str {
        &self.input
    }

    fn output_path(&self) -> &str {
        &self.output_path
    }

    fn output_formats(&self) -> &[String] {
        &self.formats
    }

    fn top_companies(&self) -> usize {
        self.top_companies
    }

    fn delimiter(&self) -> u8 {
        self.delimiter.as_bytes().first().copied().unwrap_or(b',')
    }

    fn archive_name(&self) -> Option<&str> {
        self.compress.then_some(self.archive_name.as_str())
    }
}

#[cfg(feature = "cli")]
impl Validate for CliConfig {
    fn validate(&self) -> Result<()> {
        validation::validate_path("input", &self.input)?;
        validation::validate_file_extensions("input", std::slice::from_ref(&self.input), &["csv", "tsv", "txt"])?;
        validation::validate_path("output_path", &self.output_path)?;
        validation::validate_output_formats("formats", &self.formats)?;
        validation::validate_positive_number("top_companies", self.top_companies, 1)?;
        validation::validate_delimiter("delimiter", &self.delimiter)?;
        if self.compress {
            validation::validate_file_extensions("archive_name", std::slice::from_ref(&self.archive_name), &["zip"])?;
        }
        Ok(())
    }
}

#[cfg(all(test, feature = "cli"))]
mod tests {
    use super::*;

    #[test]
    fn test_cli_defaults() {
        let config = CliConfig::parse_from(["jobpost-etl"]);
        assert_eq!(config.input_path(), "clean_jobs.csv");
        assert_eq!(config.output_formats(), &["csv".to_string(), "json".to_string()]);
        assert_eq!(config.top_companies(), 20);
        assert_eq!(config.delimiter(), b',');
        assert_eq!(config.archive_name(), None);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_cli_compress_and_formats() {
        let config = CliConfig::parse_from([
            "jobpost-etl",
            "--input",
            "jobs.tsv",
            "--delimiter",
            "\t",
            "--formats",
            "tsv",
            "--compress",
        ]);
        assert_eq!(config.delimiter(), b'\t');
        assert_eq!(config.archive_name(), Some("analysis_output.zip"));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_cli_validation_failures() {
        let config = CliConfig::parse_from(["jobpost-etl", "--top-companies", "0"]);
        assert!(config.validate().is_err());

        let config = CliConfig::parse_from(["jobpost-etl", "--formats", "html"]);
        assert!(config.validate().is_err());

        let config = CliConfig::parse_from(["jobpost-etl", "--input", "jobs.xlsx"]);
        assert!(config.validate().is_err());

        let config = CliConfig::parse_from(["jobpost-etl", "--formats", "csv,csv", "--compress"]);
        assert!(config.validate().is_err());
    }
}
