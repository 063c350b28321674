use clap::Parser;
use jobpost_etl::core::pipeline::parse_postings;
use jobpost_etl::core::{ConfigProvider, Storage};
use jobpost_etl::utils::{logger, validation::Validate};
use jobpost_etl::{classify_opt, EtlEngine, JobPostingPipeline, LocalStorage, RoleCategory, TomlConfig};
use std::collections::BTreeMap;

#[derive(Parser)]
#[command(name = "toml-etl")]
#[command(about = "Job posting analysis driven by a TOML configuration file")]
struct Args {
    /// Path to TOML configuration file
    #[arg(short, long, default_value = "jobpost-etl.toml")]
    config: String,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,

    /// Override monitoring setting from config
    #[arg(long)]
    monitor: Option<bool>,

    /// Dry run - classify the input and show what would be written, without writing
    #[arg(long)]
    dry_run: bool,
}

#[tokio::main]
async fn main() {
    let args = Args::parse();

    // 載入 TOML 配置
    let config = match TomlConfig::from_file(&args.config) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("❌ Failed to load config file '{}': {}", args.config, e);
            eprintln!("💡 Make sure the file exists and is valid TOML format");
            std::process::exit(1);
        }
    };

    if config.json_logs() {
        logger::init_json_logger(args.verbose);
    } else {
        logger::init_cli_logger(args.verbose);
    }

    tracing::info!("🚀 Starting TOML-based job posting analysis");
    tracing::info!("📁 Configuration loaded from: {}", args.config);

    if let Err(e) = config.validate() {
        tracing::error!("❌ Configuration validation failed: {}", e);
        tracing::error!("💡 Suggestion: {}", e.recovery_suggestion());
        eprintln!("❌ {}", e.user_friendly_message());
        std::process::exit(1);
    }

    display_config_summary(&config, &args);

    if args.dry_run {
        tracing::info!("🔍 DRY RUN MODE - No output will be written");
        if let Err(e) = perform_dry_run(&config).await {
            eprintln!("❌ {}", e.user_friendly_message());
            eprintln!("💡 Suggestion: {}", e.recovery_suggestion());
            std::process::exit(e.exit_code());
        }
        return;
    }

    let monitor_enabled = args.monitor.unwrap_or_else(|| config.monitoring_enabled());
    if monitor_enabled {
        tracing::info!("🔍 System monitoring enabled");
    }

    let pipeline = JobPostingPipeline::new(LocalStorage::default(), config);
    let engine = EtlEngine::new_with_monitoring(pipeline, monitor_enabled);

    match engine.run().await {
        Ok(output_path) => {
            tracing::info!("✅ Analysis completed successfully!");
            println!("✅ Analysis completed successfully!");
            println!("📁 Output saved to: {}", output_path);
        }
        Err(e) => {
            tracing::error!(
                "❌ Analysis failed: {} (Category: {:?}, Severity: {:?})",
                e,
                e.category(),
                e.severity()
            );
            tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());

            eprintln!("❌ {}", e.user_friendly_message());
            eprintln!("💡 Suggestion: {}", e.recovery_suggestion());

            std::process::exit(e.exit_code());
        }
    }
}

fn display_config_summary(config: &TomlConfig, args: &Args) {
    println!("📋 Configuration Summary:");
    println!(
        "  Pipeline: {} v{}",
        config.pipeline.name, config.pipeline.version
    );
    if let Some(description) = &config.pipeline.description {
        println!("  Description: {}", description);
    }
    println!("  Input: {}", config.input_path());
    println!("  Output: {}", config.output_path());
    println!("  Formats: {}", config.output_formats().join(", "));
    println!("  Top Companies: {}", config.top_companies());

    if let Some(archive) = config.archive_name() {
        println!("  Compression: {} (ZIP)", archive);
    }

    if args.dry_run {
        println!("  🔍 DRY RUN MODE ENABLED");
    }

    println!();
}

async fn perform_dry_run(config: &TomlConfig) -> jobpost_etl::Result<()> {
    let storage = LocalStorage::default();
    let data = storage.read_file(config.input_path()).await?;
    let postings = parse_postings(&data, config.delimiter())?;

    println!("🔍 Dry Run Analysis:");
    println!("  Rows: {}", postings.len());

    let mut by_role: BTreeMap<RoleCategory, usize> = BTreeMap::new();
    for posting in &postings {
        *by_role.entry(classify_opt(posting.title.as_deref())).or_insert(0) += 1;
    }

    println!();
    println!("🏷️ Role Categories:");
    for (role, count) in &by_role {
        println!("  {}: {}", role, count);
    }

    println!();
    println!("💾 Would write:");
    for format in config.output_formats() {
        match format.as_str() {
            "json" => println!("  report.json"),
            ext => {
                for table in [
                    "state_counts",
                    "role_counts",
                    "date_counts",
                    "top_companies",
                    "classified_postings",
                ] {
                    println!("  {}.{}", table, ext);
                }
            }
        }
    }
    if let Some(archive) = config.archive_name() {
        println!("  (bundled into {})", archive);
    }

    println!();
    println!("✅ Dry run analysis complete. Use --verbose for more details during actual run.");

    Ok(())
}
