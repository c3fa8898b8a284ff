use anyhow::Context;
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;
use tracing::{error, info};

use survey_normalizer::config::Config;
use survey_normalizer::domain::Vocabulary;
use survey_normalizer::logging;
use survey_normalizer::pipeline::ingestion::FsRecordSource;
use survey_normalizer::pipeline::processing::classify::{
    classify_automation_priority, classify_criticality, classify_frequency, classify_regulation,
    classify_routine, classify_task_type, resolve_department,
};
use survey_normalizer::pipeline::{write_dataset, BatchOrchestrator, BatchReport};

#[derive(Parser)]
#[command(name = "survey_normalizer")]
#[command(about = "Normalizes L1/L2/L3 process-survey questionnaires into one compact dataset")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Load, normalize and write the dataset
    Run {
        /// Config file (defaults to $SURVEY_NORMALIZER_CONFIG, then survey_normalizer.toml)
        #[arg(long)]
        config: Option<PathBuf>,
        /// Directory holding the L1_json/L2_json/L3_json folders
        #[arg(long)]
        base_dir: Option<PathBuf>,
        /// Output file, relative to the base directory unless absolute
        #[arg(long)]
        output: Option<PathBuf>,
    },
    /// Print the code a classifier assigns to a piece of text
    Classify {
        #[arg(value_enum)]
        kind: ClassifyKind,
        text: String,
        /// Division name, consulted first for department resolution
        #[arg(long)]
        division: Option<String>,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum ClassifyKind {
    Department,
    Criticality,
    Automation,
    Regulation,
    TaskType,
    Routine,
    Frequency,
}

fn classify(kind: ClassifyKind, text: &str, division: Option<&str>) -> String {
    fn show<V: Vocabulary>(v: V) -> String {
        format!("{}\t{}", v.code(), v.label())
    }
    match kind {
        ClassifyKind::Department => {
            let resolution = resolve_department(text, division);
            format!("{}\t{}", show(resolution.department), resolution.source.as_str())
        }
        ClassifyKind::Criticality => show(classify_criticality(text)),
        ClassifyKind::Automation => show(classify_automation_priority(text)),
        ClassifyKind::Regulation => show(classify_regulation(text)),
        ClassifyKind::TaskType => show(classify_task_type(text)),
        ClassifyKind::Routine => show(classify_routine(text)),
        ClassifyKind::Frequency => show(classify_frequency(text)),
    }
}

fn print_report(report: &BatchReport, output: &std::path::Path, fingerprint: &str) {
    println!("\n📊 Normalization results:");
    println!("   L1 questionnaires: {} ({} processes)", report.counts.l1, report.counts.processes_l1);
    println!("   L2 questionnaires: {} ({} items)", report.counts.l2, report.counts.items_l2);
    println!("   L3 questionnaires: {} ({} tasks)", report.counts.l3, report.counts.items_l3);
    println!("   Output file: {}", output.display());
    println!("   SHA-256: {}", fingerprint);

    if !report.distribution.is_empty() {
        println!("\n🏢 Records by department:");
        for (department, count) in &report.distribution {
            println!("   {:<4} {:>4}  {}", department.code(), count, department.label());
        }
    }

    if !report.failures.is_empty() {
        println!("\n⚠️  Files skipped:");
        for failure in &report.failures {
            println!("   - [{}] {}: {}", failure.level, failure.file, failure.reason);
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();
    let cli = Cli::parse();

    match cli.command {
        Commands::Classify {
            kind,
            text,
            division,
        } => {
            println!("{}", classify(kind, &text, division.as_deref()));
        }
        Commands::Run {
            config,
            base_dir,
            output,
        } => {
            let config_path = Config::resolve_path(config.as_deref()).context("locating configuration")?;
            let mut config =
                Config::load_from(config_path.as_deref()).context("loading configuration")?;
            if let Some(dir) = base_dir {
                config.base_dir = dir;
            }
            if let Some(out) = output {
                config.output = out;
            }

            let _guard = logging::init_logging(&config.log_path());
            match &config_path {
                Some(path) => info!(path = %path.display(), "configuration loaded"),
                None => info!("no config file, using defaults"),
            }
            info!(base_dir = %config.base_dir.display(), "configuration resolved");

            let orchestrator = BatchOrchestrator::new(FsRecordSource::from_config(&config));
            let outcome = match orchestrator.run().await {
                Ok(outcome) => outcome,
                Err(e) => {
                    error!("Batch failed: {}", e);
                    return Err(e.into());
                }
            };

            let output_path = config.output_path();
            let fingerprint = write_dataset(&outcome.dataset, &output_path)
                .await
                .with_context(|| format!("writing {}", output_path.display()))?;

            print_report(&outcome.report, &output_path, &fingerprint);
        }
    }
    Ok(())
}
