//! Extract command - read contact fields from a single card.

use std::fs;
use std::path::PathBuf;
use std::time::Instant;

use clap::Args;
use console::style;
use indicatif::{ProgressBar, ProgressStyle};
use tracing::{debug, info};

use bizcard_core::{CsvExporter, ExtractionResult, Field};

use super::{build_pipeline, load_config};

/// Arguments for the extract command.
#[derive(Args)]
pub struct ExtractArgs {
    /// Input card (image, or .txt with recognized text)
    #[arg(required = true)]
    input: PathBuf,

    /// Output file (default: stdout)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "json")]
    format: OutputFormat,

    /// Model directory
    #[arg(short, long)]
    model_dir: Option<PathBuf>,

    /// Also print the recognized text
    #[arg(long)]
    show_raw: bool,
}

#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    /// JSON output
    Json,
    /// CSV output
    Csv,
    /// Plain text summary
    Text,
}

pub async fn run(args: ExtractArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let start = Instant::now();
    let config = load_config(config_path)?;

    if !args.input.exists() {
        anyhow::bail!("Input file not found: {}", args.input.display());
    }

    info!("Extracting card: {}", args.input.display());

    let pb = ProgressBar::new_spinner();
    pb.set_style(ProgressStyle::default_spinner().template("{spinner:.green} {msg}")?);
    pb.set_message("Reading card...");

    let pipeline = build_pipeline(&config, args.model_dir.as_deref())?;
    let card = pipeline.process_file(&args.input);
    pb.finish_and_clear();
    let card = card?;

    let output = format_card(&card, args.format)?;

    if let Some(output_path) = &args.output {
        fs::write(output_path, &output)?;
        println!(
            "{} Output written to {}",
            style("✓").green(),
            output_path.display()
        );
    } else {
        println!("{}", output.trim_end());
    }

    if args.show_raw {
        println!();
        println!("{}", style("Recognized text:").blue());
        println!("{}", card.raw_text);
    }

    if card.is_empty() {
        eprintln!("{} No contact fields found", style("⚠").yellow());
    }

    debug!("Total processing time: {:?}", start.elapsed());

    Ok(())
}

fn format_card(card: &ExtractionResult, format: OutputFormat) -> anyhow::Result<String> {
    match format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(card)?),
        OutputFormat::Csv => Ok(CsvExporter::new().to_string(std::slice::from_ref(card))?),
        OutputFormat::Text => Ok(format_text(card)),
    }
}

fn format_text(card: &ExtractionResult) -> String {
    let mut output = String::new();
    for field in Field::ALL {
        let value = card.get(field);
        output.push_str(&format!(
            "{:<8} {}\n",
            format!("{}:", field),
            if value.is_empty() { "-" } else { value }
        ));
    }
    output
}
