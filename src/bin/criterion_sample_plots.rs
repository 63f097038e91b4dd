use clap::Parser;
use criterion_sample_plots::config::{AnalysisConfig, DEFAULT_CRITERION_DIR};
use criterion_sample_plots::reports::{self, collisions};
use criterion_sample_plots::schema::{AnalysisReport, RunMeta};
use criterion_sample_plots::{AnalysisError, ReportKind, Result};
use log::info;
use std::fs;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "criterion-sample-plots")]
#[command(about = "Render hash/implementation comparison charts from criterion raw.csv samples")]
struct Args {
    /// Root of criterion's output directory.
    #[arg(long, value_name = "DIR", default_value = DEFAULT_CRITERION_DIR)]
    criterion_dir: PathBuf,

    /// Directory the PNG files are written to.
    #[arg(long, value_name = "DIR", default_value = ".")]
    out_dir: PathBuf,

    /// Which report(s) to generate.
    #[arg(long, value_enum, default_value_t = ReportKind::All)]
    report: ReportKind,

    /// JSON array of {file, function, unique_hashes} replacing the built-in
    /// collision table.
    #[arg(long, value_name = "FILE")]
    collisions: Option<PathBuf>,

    /// Where to write a JSON summary of the charts produced.
    #[arg(long, value_name = "FILE")]
    summary: Option<PathBuf>,
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();
    let cfg = AnalysisConfig {
        criterion_dir: args.criterion_dir.clone(),
        out_dir: args.out_dir.clone(),
    };

    let mut charts = Vec::new();

    if args.report.includes(ReportKind::Hashes) {
        charts.extend(reports::hashes::run(&cfg)?);
    }
    if args.report.includes(ReportKind::Impls) {
        charts.extend(reports::impls::run(&cfg)?);
    }
    if args.report.includes(ReportKind::Collisions) {
        let table = match &args.collisions {
            Some(path) => collisions::read_table(path)?,
            None => collisions::default_table(),
        };
        charts.extend(collisions::run(&cfg, &table)?);
    }

    info!("{} charts written to {}", charts.len(), cfg.out_dir.display());

    if let Some(out) = &args.summary {
        let report = AnalysisReport {
            run: RunMeta::capture(&cfg.criterion_dir),
            charts,
        };
        let json = serde_json::to_string_pretty(&report)?;
        fs::write(out, json).map_err(|e| AnalysisError::io(out, e))?;
    }

    Ok(())
}
