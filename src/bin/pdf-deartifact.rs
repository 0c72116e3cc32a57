//! PDF De-Artifact CLI tool
//!
//! Strips `/Artifact` marked content from every page of each input PDF and
//! writes a `_filtered` copy next to it.

use anyhow::Context;
use clap::Parser;
use std::path::Path;
use std::process;
use tracing_subscriber::EnvFilter;

use pdf_deartifact::paths::{expand_inputs, filtered_output_path};
use pdf_deartifact::pdf::{filter_pdf_file_to, FilterOptions};
use pdf_deartifact::Error;

/// PDF De-Artifact - Remove /Artifact marked content from PDF pages
#[derive(Parser)]
#[command(name = "pdf-deartifact")]
#[command(author, version, about, long_about = None)]
#[command(after_help = "EXAMPLES:
    # Writes handout_filtered.pdf next to handout.pdf
    pdf-deartifact handout.pdf

    # Several files, processed in the order given
    pdf-deartifact intro.pdf \"chapters/*.pdf\"

    # Also drop BDC-tagged artifacts and fail on unbalanced streams
    pdf-deartifact --match-bdc --strict report.pdf")]
struct Cli {
    /// Input PDF files. Supports glob patterns like "*.pdf"
    inputs: Vec<String>,

    /// Also remove artifacts opened with BDC (tag plus property list)
    #[arg(long)]
    match_bdc: bool,

    /// Fail when an artifact region is missing its closing EMC
    #[arg(long)]
    strict: bool,
}

fn main() {
    init_tracing();

    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        eprintln!("Error: {:#}", e);
        process::exit(1);
    }
}

/// Diagnostics go to stderr, filtered by RUST_LOG (default: warnings only)
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

/// Filter each input in turn; the first failure stops the run
fn run(cli: Cli) -> anyhow::Result<()> {
    if cli.inputs.is_empty() {
        return Err(Error::NoInputFiles.into());
    }

    let inputs = expand_inputs(&cli.inputs)?;
    let options = FilterOptions {
        match_bdc: cli.match_bdc,
        strict: cli.strict,
    };

    for input in &inputs {
        filter_one(input, &options)
            .with_context(|| format!("Failed to filter {}", input.display()))?;
    }

    Ok(())
}

fn filter_one(input: &Path, options: &FilterOptions) -> anyhow::Result<()> {
    let output = filtered_output_path(input)?;

    println!();
    println!("{}", input.display());
    println!("->{}", output.display());

    let report = filter_pdf_file_to(input, &output, options)?;
    let summary = report.summary;

    eprintln!(
        "Removed {} artifact region(s) ({} operations) across {} page(s)",
        summary.stats.regions_removed, summary.stats.operations_removed, summary.pages
    );
    if summary.stats.unterminated > 0 {
        eprintln!(
            "Warning: {} artifact region(s) had no closing EMC",
            summary.stats.unterminated
        );
    }
    eprintln!("Output: {}", report.output.display());

    Ok(())
}
