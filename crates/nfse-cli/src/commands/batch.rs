//! Batch processing command for multiple invoice files.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;

use clap::Args;
use console::style;
use glob::glob;
use indicatif::{ProgressBar, ProgressStyle};
use serde::Serialize;
use tracing::{debug, error, warn};

use nfse_core::{DocumentKind, ExtractionResult, NfseConfig, NfseExtractor, NfseParser};

use super::load_config;

/// Arguments for the batch command.
#[derive(Args)]
pub struct BatchArgs {
    /// Input files or glob pattern
    #[arg(required = true)]
    input: String,

    /// Output directory (one JSON file per input)
    #[arg(short, long)]
    output_dir: Option<PathBuf>,

    /// Also generate a summary CSV
    #[arg(long)]
    summary: bool,

    /// Continue on error (otherwise stop at the first failure; results
    /// already written are kept)
    #[arg(long)]
    continue_on_error: bool,
}

/// Result of processing a single file.
struct ProcessResult {
    path: PathBuf,
    result: Option<ExtractionResult>,
    error: Option<String>,
    processing_time_ms: u64,
}

/// One line of batch output on stdout.
#[derive(Serialize)]
struct BatchRecord<'a> {
    file: String,
    #[serde(flatten)]
    result: &'a ExtractionResult,
}

pub async fn run(args: BatchArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let start = Instant::now();
    let config = load_config(config_path)?;

    // Expand glob pattern, keeping only supported document types
    let files: Vec<PathBuf> = glob(&args.input)?
        .filter_map(|r| r.ok())
        .filter(|p| DocumentKind::from_path(p).is_ok())
        .collect();

    if files.is_empty() {
        anyhow::bail!("No matching files found for pattern: {}", args.input);
    }

    eprintln!(
        "{} Found {} files to process",
        style("ℹ").blue(),
        files.len()
    );

    if let Some(ref output_dir) = args.output_dir {
        fs::create_dir_all(output_dir)?;
    }

    let pb = ProgressBar::new(files.len() as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} files")?
            .progress_chars("=>-"),
    );

    // Compiled once; fails fast on bad patterns before any file is touched
    let parser = NfseParser::from_config(&config.extraction)?;
    let mut results = Vec::with_capacity(files.len());

    for path in files {
        let file_start = Instant::now();
        let outcome = process_single_file(&path, &parser, &config);
        let processing_time_ms = file_start.elapsed().as_millis() as u64;

        match outcome {
            Ok(result) => {
                write_output(&path, &result, args.output_dir.as_deref())?;
                results.push(ProcessResult {
                    path,
                    result: Some(result),
                    error: None,
                    processing_time_ms,
                });
            }
            Err(e) => {
                let error_msg = e.to_string();
                if args.continue_on_error {
                    warn!("Failed to process {}: {}", path.display(), error_msg);
                    results.push(ProcessResult {
                        path,
                        result: None,
                        error: Some(error_msg),
                        processing_time_ms,
                    });
                } else {
                    pb.abandon();
                    error!("Failed to process {}: {}", path.display(), error_msg);
                    anyhow::bail!("Processing failed for {}: {}", path.display(), error_msg);
                }
            }
        }

        pb.inc(1);
    }

    pb.finish_and_clear();

    let successful: Vec<_> = results.iter().filter(|r| r.result.is_some()).collect();
    let failed: Vec<_> = results.iter().filter(|r| r.error.is_some()).collect();

    if args.summary {
        let summary_path = args
            .output_dir
            .as_ref()
            .map(|d| d.join("summary.csv"))
            .unwrap_or_else(|| PathBuf::from("summary.csv"));

        write_summary(&summary_path, &results)?;
        eprintln!(
            "{} Summary written to {}",
            style("✓").green(),
            summary_path.display()
        );
    }

    eprintln!();
    eprintln!(
        "{} Processed {} files in {:?}",
        style("✓").green(),
        results.len(),
        start.elapsed()
    );
    eprintln!(
        "   {} successful, {} failed",
        style(successful.len()).green(),
        style(failed.len()).red()
    );

    if !failed.is_empty() {
        eprintln!();
        eprintln!("{}", style("Failed files:").red());
        for item in &failed {
            eprintln!(
                "  - {}: {}",
                item.path.display(),
                item.error.as_deref().unwrap_or("unknown error")
            );
        }
    }

    Ok(())
}

fn process_single_file(
    path: &Path,
    parser: &NfseParser,
    config: &NfseConfig,
) -> anyhow::Result<ExtractionResult> {
    let kind = DocumentKind::from_path(path)?;
    let text = nfse_core::read_text(path, kind, config)?;
    Ok(parser.extract(&text))
}

/// Write one result as soon as its file is done, either as `<stem>.json` in
/// the output directory or as a JSON line on stdout.
fn write_output(
    path: &Path,
    result: &ExtractionResult,
    output_dir: Option<&Path>,
) -> anyhow::Result<()> {
    match output_dir {
        Some(output_dir) => {
            let output_name = path.file_stem().and_then(|s| s.to_str()).unwrap_or("nfse");
            let output_path = output_dir.join(format!("{}.json", output_name));

            fs::write(&output_path, serde_json::to_string_pretty(result)?)?;
            debug!("Wrote output to {}", output_path.display());
        }
        None => {
            let record = BatchRecord {
                file: path.display().to_string(),
                result,
            };
            println!("{}", serde_json::to_string(&record)?);
        }
    }

    Ok(())
}

fn write_summary(path: &Path, results: &[ProcessResult]) -> anyhow::Result<()> {
    let mut wtr = csv::Writer::from_path(path)?;

    wtr.write_record([
        "filename",
        "status",
        "cnpj_prestador",
        "nome_prestador",
        "processing_time_ms",
        "error",
    ])?;

    for item in results {
        let filename = item.path.file_name().and_then(|s| s.to_str()).unwrap_or("");
        let time = item.processing_time_ms.to_string();

        if let Some(result) = &item.result {
            wtr.write_record([
                filename,
                "success",
                result.identifier.as_deref().unwrap_or(""),
                result.legal_name.as_deref().unwrap_or(""),
                &time,
                "",
            ])?;
        } else {
            wtr.write_record([
                filename,
                "error",
                "",
                "",
                &time,
                item.error.as_deref().unwrap_or(""),
            ])?;
        }
    }

    wtr.flush()?;
    Ok(())
}
