use crate::core::analysis;
use crate::core::{ConfigProvider, JobPosting, Pipeline, Storage, TransformResult};
use crate::domain::model::{AnalysisReport, ClassifiedPosting};
use crate::utils::error::{EtlError, Result};
use serde::Serialize;
use std::collections::HashSet;
use std::io::Write;
use std::path::Path;
use zip::write::{SimpleFileOptions, ZipWriter};

/// Flattened view of a classified posting for tabular output.
#[derive(Debug, Serialize)]
struct ClassifiedRow<'a> {
    id: &'a str,
    title: &'a str,
    company: &'a str,
    location: &'a str,
    state: &'a str,
    date_posted: &'a str,
    role: &'a str,
}

impl<'a> From<&'a ClassifiedPosting> for ClassifiedRow<'a> {
    fn from(row: &'a ClassifiedPosting) -> Self {
        let p = &row.posting;
        Self {
            id: &p.id,
            title: p.title.as_deref().unwrap_or_default(),
            company: p.company.as_deref().unwrap_or_default(),
            location: p.location.as_deref().unwrap_or_default(),
            state: row.state.as_deref().unwrap_or_default(),
            date_posted: p.date_posted.as_deref().unwrap_or_default(),
            role: row.role.label(),
        }
    }
}

pub struct JobPostingPipeline<S: Storage, C: ConfigProvider> {
    storage: S,
    config: C,
}

impl<S: Storage, C: ConfigProvider> JobPostingPipeline<S, C> {
    pub fn new(storage: S, config: C) -> Self {
        Self { storage, config }
    }

    fn output_file(&self, name: &str) -> String {
        Path::new(self.config.output_path())
            .join(name)
            .to_string_lossy()
            .into_owned()
    }
}

pub fn parse_postings(data: &[u8], delimiter: u8) -> Result<Vec<JobPosting>> {
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(true)
        .delimiter(delimiter)
        .flexible(true)
        .trim(csv::Trim::Headers)
        .from_reader(data);

    let mut postings = Vec::new();
    for result in rdr.deserialize() {
        let posting: JobPosting = result?;
        postings.push(posting);
    }
    Ok(postings)
}

fn write_table<T: Serialize>(rows: &[T], delimiter: u8) -> Result<Vec<u8>> {
    let mut wtr = csv::WriterBuilder::new()
        .delimiter(delimiter)
        .from_writer(Vec::new());
    for row in rows {
        wtr.serialize(row)?;
    }
    wtr.into_inner().map_err(|e| EtlError::IoError(e.into_error()))
}

/// Renders every table of the report in one delimited format.
pub fn render_tables(
    report: &AnalysisReport,
    classified: &[ClassifiedPosting],
    ext: &str,
    delimiter: u8,
) -> Result<Vec<(String, Vec<u8>)>> {
    let rows: Vec<ClassifiedRow> = classified.iter().map(ClassifiedRow::from).collect();

    Ok(vec![
        (
            format!("state_counts.{}", ext),
            write_table(&report.state_counts, delimiter)?,
        ),
        (
            format!("role_counts.{}", ext),
            write_table(&report.role_counts, delimiter)?,
        ),
        (
            format!("date_counts.{}", ext),
            write_table(&report.date_counts, delimiter)?,
        ),
        (
            format!("top_companies.{}", ext),
            write_table(&report.top_companies, delimiter)?,
        ),
        (
            format!("classified_postings.{}", ext),
            write_table(&rows, delimiter)?,
        ),
    ])
}

fn zip_files(files: &[(String, Vec<u8>)]) -> Result<Vec<u8>> {
    let mut zip = ZipWriter::new(std::io::Cursor::new(Vec::new()));
    for (name, data) in files {
        zip.start_file(name.as_str(), SimpleFileOptions::default())?;
        zip.write_all(data)?;
    }
    let cursor = zip.finish()?;
    Ok(cursor.into_inner())
}

#[async_trait::async_trait]
impl<S: Storage, C: ConfigProvider> Pipeline for JobPostingPipeline<S, C> {
    async fn extract(&self) -> Result<Vec<JobPosting>> {
        let input = self.config.input_path();
        tracing::debug!("Reading job postings from: {}", input);

        let data = self.storage.read_file(input).await?;
        let postings = parse_postings(&data, self.config.delimiter())?;

        if postings.is_empty() {
            return Err(EtlError::ProcessingError {
                message: format!("No job postings found in {}", input),
            });
        }

        let missing_titles = postings.iter().filter(|p| p.title.is_none()).count();
        if missing_titles > 0 {
            tracing::warn!("{} postings have no title and will be classified as Other", missing_titles);
        }

        Ok(postings)
    }

    async fn transform(&self, data: Vec<JobPosting>) -> Result<TransformResult> {
        let classified = analysis::classify_postings(data);
        let report = analysis::analyze(&classified, self.config.top_companies());

        tracing::debug!(
            "Analysis: {} distinct postings, {} states, {} dates, {} companies",
            report.total_postings,
            report.state_counts.len(),
            report.date_counts.len(),
            report.top_companies.len()
        );
        for role in &report.role_counts {
            tracing::debug!("  {}: {}", role.role, role.count);
        }

        Ok(TransformResult { classified, report })
    }

    async fn load(&self, result: TransformResult) -> Result<String> {
        let mut files = Vec::new();
        let mut rendered = HashSet::new();

        for format in self.config.output_formats() {
            // 重複的格式只輸出一次，避免 ZIP 內檔名衝突
            if !rendered.insert(format.as_str()) {
                tracing::warn!("Output format '{}' listed more than once, skipping", format);
                continue;
            }
            match format.as_str() {
                "csv" => files.extend(render_tables(&result.report, &result.classified, "csv", b',')?),
                "tsv" => files.extend(render_tables(&result.report, &result.classified, "tsv", b'\t')?),
                "json" => {
                    let json_data = serde_json::to_vec_pretty(&result.report)?;
                    files.push(("report.json".to_string(), json_data));
                }
                other => {
                    return Err(EtlError::InvalidConfigValueError {
                        field: "output_formats".to_string(),
                        value: other.to_string(),
                        reason: "Unsupported output format".to_string(),
                    })
                }
            }
        }

        if let Some(archive) = self.config.archive_name() {
            tracing::debug!("Creating ZIP file with {} files", files.len());
            let zip_data = zip_files(&files)?;

            let output_path = self.output_file(archive);
            tracing::debug!("Writing ZIP file ({} bytes) to storage", zip_data.len());
            self.storage.write_file(&output_path, &zip_data).await?;
            return Ok(output_path);
        }

        for (name, data) in &files {
            let path = self.output_file(name);
            tracing::debug!("Writing {} ({} bytes)", path, data.len());
            self.storage.write_file(&path, data).await?;
        }

        Ok(self.config.output_path().to_string())
    }
}
