//! Extract command - read provider data from a single invoice file.

use std::fs;
use std::path::PathBuf;
use std::time::{Duration, Instant};

use clap::Args;
use console::style;
use indicatif::{ProgressBar, ProgressStyle};
use tracing::{debug, info, warn};

use nfse_core::{extract_from_file, DocumentKind, ExtractionResult, NfseError};

use super::load_config;

/// Arguments for the extract command.
#[derive(Args)]
pub struct ExtractArgs {
    /// Input file (PDF or image)
    #[arg(required = true)]
    input: PathBuf,

    /// Document type (default: from the file extension)
    #[arg(long = "type", value_enum)]
    kind: Option<KindArg>,

    /// Output file (default: stdout)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "json")]
    format: OutputFormat,
}

#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum KindArg {
    /// PDF with a text layer
    Pdf,
    /// Image read with OCR
    Image,
}

impl From<KindArg> for DocumentKind {
    fn from(kind: KindArg) -> Self {
        match kind {
            KindArg::Pdf => DocumentKind::Pdf,
            KindArg::Image => DocumentKind::Image,
        }
    }
}

#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    /// JSON output
    Json,
    /// Plain text summary
    Text,
}

pub async fn run(args: ExtractArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let start = Instant::now();
    let config = load_config(config_path)?;

    if !args.input.exists() {
        return Err(NfseError::NotFound(args.input.clone()).into());
    }

    let kind = match args.kind {
        Some(kind) => kind.into(),
        None => DocumentKind::from_path(&args.input)?,
    };

    info!("Processing {}: {}", kind, args.input.display());

    let spinner = ProgressBar::new_spinner();
    spinner.set_style(ProgressStyle::default_spinner().template("{spinner:.green} {msg}")?);
    spinner.enable_steady_tick(Duration::from_millis(100));
    spinner.set_message(match kind {
        DocumentKind::Pdf => "Extracting text...",
        DocumentKind::Image => "Running OCR...",
    });

    let result = extract_from_file(&args.input, kind, &config);
    spinner.finish_and_clear();
    let result = result?;

    if result.identifier.is_none() {
        warn!("Provider CNPJ not found in {}", args.input.display());
    }
    if result.legal_name.is_none() {
        warn!("Provider Razão Social not found in {}", args.input.display());
    }

    let output = format_result(&result, args.format)?;

    if let Some(output_path) = &args.output {
        fs::write(output_path, &output)?;
        eprintln!(
            "{} Output written to {}",
            style("✓").green(),
            output_path.display()
        );
    } else {
        println!("{}", output);
    }

    debug!("Total processing time: {:?}", start.elapsed());

    Ok(())
}

pub fn format_result(result: &ExtractionResult, format: OutputFormat) -> anyhow::Result<String> {
    match format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(result)?),
        OutputFormat::Text => Ok(format_text(result)),
    }
}

fn format_text(result: &ExtractionResult) -> String {
    format!(
        "CNPJ: {}\nRazão Social: {}",
        result.identifier.as_deref().unwrap_or("-"),
        result.legal_name.as_deref().unwrap_or("-")
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_json_keeps_nulls() {
        let result = ExtractionResult {
            identifier: Some("12.345.678/0001-90".to_string()),
            legal_name: None,
        };
        let json = format_result(&result, OutputFormat::Json).unwrap();
        assert!(json.contains("\"cnpj_prestador\": \"12.345.678/0001-90\""));
        assert!(json.contains("\"nome_prestador\": null"));
    }

    #[test]
    fn test_format_text() {
        let result = ExtractionResult {
            identifier: None,
            legal_name: Some("EMPRESA FICTÍCIA LTDA".to_string()),
        };
        assert_eq!(
            format_result(&result, OutputFormat::Text).unwrap(),
            "CNPJ: -\nRazão Social: EMPRESA FICTÍCIA LTDA"
        );
    }
}
