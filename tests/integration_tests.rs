use anyhow::Result;
use jobpost_etl::{
    classify, AnalysisReport, CliConfig, EtlEngine, JobPostingPipeline, LocalStorage, RoleCategory,
    TomlConfig,
};
use std::path::Path;
use tempfile::TempDir;

const JOBS_CSV: &str = "\
id,title,company,location,date_posted,work_type,employment_type
101,Senior Data Scientist,Acme Analytics,\"San Francisco, CA\",2025-01-15,,
102,Data Engineer II,Acme Analytics,\"Austin, TX\",2025-01-14,,
103,Junior Data Analyst,Globex,\"Austin, TX, United States\",2025-01-15,,
104,Machine Learning Engineer,Initech,\"Seattle, WA\",2025-01-16,,
105,AI Research Scientist,Globex,United States,2025-01-16,,
106,Product Manager,Acme Analytics,Remote,2025-01-14,,
107,\"Data Scientist, Machine Learning\",Hooli,\"New York, NY\",2025-01-16,,
107,\"Data Scientist, Machine Learning\",Hooli,\"New York, NY\",2025-01-16,,
108,,Umbrella,\"Boston, MA\",,,
";

fn write_input(dir: &Path) -> String {
    let input = dir.join("clean_jobs.csv");
    std::fs::write(&input, JOBS_CSV).unwrap();
    input.to_str().unwrap().to_string()
}

fn cli_config(input: String, output_path: String, compress: bool) -> CliConfig {
    CliConfig {
        input,
        output_path,
        formats: vec!["csv".to_string(), "json".to_string()],
        top_companies: 3,
        delimiter: ",".to_string(),
        compress,
        archive_name: "analysis_output.zip".to_string(),
        verbose: false,
        monitor: false,
    }
}

#[test]
fn test_classifier_examples() {
    assert_eq!(classify(""), RoleCategory::Other);
    assert_eq!(classify("Senior Data Scientist"), RoleCategory::DataScientist);
    assert_eq!(classify("Data Engineer II"), RoleCategory::DataEngineer);
    assert_eq!(classify("Junior Data Analyst"), RoleCategory::DataAnalyst);
    assert_eq!(classify("Machine Learning Engineer"), RoleCategory::AIMLEngineer);
    assert_eq!(classify("AI Research Scientist"), RoleCategory::AIMLEngineer);
    assert_eq!(classify("Product Manager"), RoleCategory::Other);
    assert_eq!(
        classify("Data Scientist, Machine Learning"),
        RoleCategory::DataScientist
    );
}

#[tokio::test]
async fn test_end_to_end_with_individual_files() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let input = write_input(temp_dir.path());
    let output_dir = temp_dir.path().join("charts");
    let output_path = output_dir.to_str().unwrap().to_string();

    let config = cli_config(input, output_path.clone(), false);
    let pipeline = JobPostingPipeline::new(LocalStorage::default(), config);
    let engine = EtlEngine::new(pipeline);

    let result = engine.run().await?;
    assert_eq!(result, output_path);

    for name in [
        "state_counts.csv",
        "role_counts.csv",
        "date_counts.csv",
        "top_companies.csv",
        "classified_postings.csv",
        "report.json",
    ] {
        assert!(output_dir.join(name).exists(), "missing {}", name);
    }

    let report: AnalysisReport =
        serde_json::from_slice(&std::fs::read(output_dir.join("report.json"))?)?;
    assert_eq!(report.total_postings, 8);
    // 同數量時依州代碼排序
    assert_eq!(report.state_counts[0].state, "NY");
    assert_eq!(report.state_counts[0].job_count, 2);
    assert_eq!(report.state_counts[1].state, "TX");
    assert_eq!(report.top_companies.len(), 3);
    assert_eq!(report.top_companies[0].company, "Acme Analytics");
    assert_eq!(report.top_companies[0].job_count, 3);
    assert_eq!(report.charts[3].title, "Top 3 Companies Hiring Data/AI Roles");

    let dates: Vec<&str> = report.date_counts.iter().map(|d| d.date.as_str()).collect();
    assert_eq!(dates, vec!["2025-01-14", "2025-01-15", "2025-01-16"]);

    let roles = std::fs::read_to_string(output_dir.join("role_counts.csv"))?;
    assert_eq!(
        roles,
        "role,count\nData Scientist,3\nAI/ML Engineer,2\nOther,2\nData Engineer,1\nData Analyst,1\n"
    );

    let classified = std::fs::read_to_string(output_dir.join("classified_postings.csv"))?;
    assert!(classified.starts_with("id,title,company,location,state,date_posted,role\n"));
    assert!(classified.contains("108,,Umbrella,\"Boston, MA\",MA,,Other"));

    Ok(())
}

#[tokio::test]
async fn test_end_to_end_with_zip_archive() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let input = write_input(temp_dir.path());
    let output_path = temp_dir.path().to_str().unwrap().to_string();

    let config = cli_config(input, output_path.clone(), true);
    let pipeline = JobPostingPipeline::new(LocalStorage::default(), config);
    let engine = EtlEngine::new_with_monitoring(pipeline, false);

    let output_file = engine.run().await?;
    assert!(output_file.ends_with("analysis_output.zip"));

    let zip_data = std::fs::read(&output_file)?;
    let mut archive = zip::ZipArchive::new(std::io::Cursor::new(zip_data))?;
    assert_eq!(archive.len(), 6);

    let mut states = String::new();
    std::io::Read::read_to_string(&mut archive.by_name("state_counts.csv")?, &mut states)?;
    assert_eq!(states, "state,job_count\nNY,2\nTX,2\nCA,1\nMA,1\nWA,1\n");

    Ok(())
}

#[tokio::test]
async fn test_missing_input_fails_with_io_error() {
    let temp_dir = TempDir::new().unwrap();
    let missing = temp_dir.path().join("nope.csv").to_str().unwrap().to_string();
    let output_path = temp_dir.path().to_str().unwrap().to_string();

    let pipeline = JobPostingPipeline::new(
        LocalStorage::default(),
        cli_config(missing, output_path, false),
    );
    let err = EtlEngine::new(pipeline).run().await.unwrap_err();

    assert!(matches!(err, jobpost_etl::EtlError::IoError(_)));
    assert_eq!(err.exit_code(), 3);
}

#[tokio::test]
async fn test_toml_config_drives_pipeline() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let tsv_input = "id\ttitle\tcompany\tlocation\tdate_posted\n\
1\tData Engineer\tAcme\tAustin, TX\t2025-02-01\n\
2\tML Engineer\tAcme\tDenver, CO\t2025-02-02\n";
    std::fs::write(temp_dir.path().join("jobs.tsv"), tsv_input)?;

    let toml_content = format!(
        r#"
[pipeline]
name = "tsv-test"
version = "1.0"

[source]
path = "{dir}/jobs.tsv"
delimiter = "\t"

[analysis]
top_companies = 5

[load]
output_path = "{dir}/out"
output_formats = ["tsv"]
"#,
        dir = temp_dir.path().display()
    );
    let config = TomlConfig::from_toml_str(&toml_content)?;

    let pipeline = JobPostingPipeline::new(LocalStorage::default(), config);
    EtlEngine::new(pipeline).run().await?;

    let roles = std::fs::read_to_string(temp_dir.path().join("out/role_counts.tsv"))?;
    assert_eq!(roles, "role\tcount\nData Engineer\t1\nAI/ML Engineer\t1\n");

    let states = std::fs::read_to_string(temp_dir.path().join("out/state_counts.tsv"))?;
    assert_eq!(states, "state\tjob_count\nCO\t1\nTX\t1\n");

    Ok(())
}
