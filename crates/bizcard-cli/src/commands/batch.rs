//! Batch processing command for multiple card files.

use std::collections::HashSet;
use std::fs;
use std::path::PathBuf;
use std::time::Instant;

use clap::Args;
use console::style;
use glob::glob;
use indicatif::{ProgressBar, ProgressStyle};
use tracing::{debug, error};

use bizcard_core::pipeline::TEXT_EXTENSION;
use bizcard_core::{timestamped_filename, BatchReport, CardOutcome, CsvExporter};

use super::{build_pipeline, load_config};

/// Arguments for the batch command.
#[derive(Args)]
pub struct BatchArgs {
    /// Input glob pattern (e.g. "cards/*.png")
    #[arg(required = true)]
    input: String,

    /// Output CSV file (default: timestamped file in the current directory)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Prepend a "#" column numbering the cards
    #[arg(long)]
    index: bool,

    /// Append a "Source File" column
    #[arg(long)]
    source: bool,

    /// Also write one JSON file per card into this directory
    #[arg(long)]
    json: Option<PathBuf>,

    /// Stop at the first file that fails
    #[arg(long)]
    fail_fast: bool,

    /// Model directory
    #[arg(short, long)]
    model_dir: Option<PathBuf>,
}

pub async fn run(args: BatchArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let start = Instant::now();
    let config = load_config(config_path)?;

    let mut files: Vec<PathBuf> = glob(&args.input)?
        .filter_map(|r| r.ok())
        .filter(|p| {
            let ext = p.extension().and_then(|e| e.to_str()).unwrap_or("");
            ext.eq_ignore_ascii_case(TEXT_EXTENSION) || config.is_supported_image(ext)
        })
        .collect();
    files.sort();

    if files.is_empty() {
        anyhow::bail!("No matching files found for pattern: {}", args.input);
    }

    println!(
        "{} Found {} files to process",
        style("ℹ").blue(),
        files.len()
    );

    let pipeline = build_pipeline(&config, args.model_dir.as_deref())?;

    let pb = ProgressBar::new(files.len().min(pipeline.max_upload_count()) as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} cards")?
            .progress_chars("=>-"),
    );

    let report = if args.fail_fast {
        let limit = pipeline.max_upload_count();
        let mut outcomes = Vec::new();
        for path in files.iter().take(limit) {
            match pipeline.process_file(path) {
                Ok(card) => outcomes.push(CardOutcome::Extracted { card }),
                Err(e) => {
                    pb.abandon();
                    error!("Failed to process {}: {}", path.display(), e);
                    anyhow::bail!("Processing failed: {}", e);
                }
            }
            pb.inc(1);
        }
        BatchReport {
            outcomes,
            skipped: files.iter().skip(limit).cloned().collect(),
            processing_time_ms: start.elapsed().as_millis() as u64,
        }
    } else {
        pipeline.process_batch_with(&files, |path, _| {
            pb.set_message(path.display().to_string());
            pb.inc(1);
        })
    };

    pb.finish_and_clear();

    let cards: Vec<_> = report.cards().cloned().collect();

    let mut exporter = CsvExporter::from_config(&config.export);
    if args.index {
        exporter = exporter.with_index(true);
    }
    if args.source {
        exporter = exporter.with_source(true);
    }

    let output_path = args.output.clone().unwrap_or_else(|| {
        PathBuf::from(timestamped_filename(
            &config.export.default_filename,
            &chrono::Local::now().naive_local(),
        ))
    });

    if let Some(parent) = output_path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    exporter.write_path(&output_path, &cards)?;

    println!(
        "{} CSV written to {}",
        style("✓").green(),
        output_path.display()
    );

    if let Some(json_dir) = &args.json {
        fs::create_dir_all(json_dir)?;
        let mut written = HashSet::new();
        for (i, card) in cards.iter().enumerate() {
            let json_path = json_dir.join(json_file_name(&card.source_file, i + 1, &mut written));
            fs::write(&json_path, serde_json::to_string_pretty(card)?)?;
            debug!("Wrote output to {}", json_path.display());
        }
    }

    let summary = report.summary();
    let failures: Vec<_> = report.failures().collect();

    println!();
    println!(
        "{} Processed {} files in {:?}",
        style("✓").green(),
        report.outcomes.len(),
        start.elapsed()
    );
    println!("   Cards processed: {}", style(summary.cards).green());
    println!("   Emails found:    {}", style(summary.emails_found).green());
    println!("   Phones found:    {}", style(summary.phones_found).green());
    println!("   Failures:        {}", style(failures.len()).red());

    if !report.skipped.is_empty() {
        println!();
        println!(
            "{} Maximum {} cards allowed. Skipped:",
            style("⚠").yellow(),
            pipeline.max_upload_count()
        );
        for path in &report.skipped {
            println!("  - {}", path.display());
        }
    }

    if !failures.is_empty() {
        println!();
        println!("{}", style("Failed files:").red());
        for (file, reason) in &failures {
            println!("  - {}: {}", file, reason);
        }
    }

    Ok(())
}

/// JSON file name for a card: the full source file name, with the card's
/// ordinal added when an earlier card already used that name.
fn json_file_name(source_file: &str, ordinal: usize, written: &mut HashSet<String>) -> String {
    let base = if source_file.is_empty() { "card" } else { source_file };
    let name = format!("{}.json", base);
    if written.insert(name.clone()) {
        return name;
    }
    let name = format!("{}.{}.json", base, ordinal);
    written.insert(name.clone());
    name
}
