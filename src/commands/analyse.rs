//! Analyse command implementation.
//!
//! The analyse command:
//! 1. Reads the header block from a file or stdin
//! 2. Builds the hop trail
//! 3. Writes the JSON report
//! 4. Optionally prints a hop table

use crate::aggregator::analyse_bytes;
use crate::output::{render_summary, report_to_string, write_report, write_report_compact};
use crate::parser::schema::Report;
use crate::utils::config::MAX_INPUT_BYTES;
use anyhow::{Context, Result};
use log::{debug, info};
use std::io::Read;
use std::path::PathBuf;
use std::time::Instant;

/// Arguments for the analyse command
///
/// **Public** - used by main.rs to construct from CLI args
#[derive(Debug, Clone, Default)]
pub struct AnalyseArgs {
    /// Header block file (None = read stdin)
    pub input: Option<PathBuf>,

    /// Output path for the JSON report (None = print to stdout)
    pub output: Option<PathBuf>,

    /// Write compact JSON instead of pretty-printed
    pub compact: bool,

    /// Print a hop table
    pub print_summary: bool,
}

/// Execute the analyse command
///
/// **Public** - main entry point called from main.rs
///
/// # Returns
/// The report that was written, so callers can inspect it
///
/// # Errors
/// * Unreadable or oversized input
/// * Input that is not UTF-8 text
/// * File write errors
pub fn execute_analyse(args: AnalyseArgs) -> Result<Report> {
    let start_time = Instant::now();

    let source = args
        .input
        .as_ref()
        .map(|path| path.display().to_string())
        .unwrap_or_else(|| "stdin".to_string());

    info!("Step 1/3: Reading header block from {}...", source);
    let raw = read_input(&args)?;
    debug!("Read {} bytes", raw.len());

    info!("Step 2/3: Building hop trail...");
    let message = analyse_bytes(Some(raw.as_slice()))
        .with_context(|| format!("Failed to analyse header block from {}", source))?
        .context("Header block produced no analysis")?;

    if let Some(trail) = &message.trail {
        for (i, hop) in trail.iter().enumerate() {
            debug!(
                "  {}. {} -> {} ({}) +{}s",
                i + 1,
                hop.from,
                hop.received_by,
                hop.protocol,
                hop.delay
            );
        }
    }

    let report = Report::new(message, source);

    info!("Step 3/3: Writing report...");
    match &args.output {
        Some(path) => {
            let written = if args.compact {
                write_report_compact(&report, path)
            } else {
                write_report(&report, path)
            };
            written.context("Failed to write report JSON")?;

            info!("✓ Report written to: {}", path.display());
        }
        None => {
            let json = report_to_string(&report, !args.compact)
                .context("Failed to serialize report")?;
            println!("{}", json);
        }
    }

    if args.print_summary {
        let summary = render_summary(&report.analysis);
        // stdout already carries the JSON when no output file was given
        if args.output.is_some() {
            println!("\n{}", summary);
        } else {
            eprintln!("\n{}", summary);
        }
    }

    let elapsed = start_time.elapsed();
    info!(
        "Analysed {} hops in {:.3}s",
        report.hop_count(),
        elapsed.as_secs_f64()
    );

    Ok(report)
}

/// Read the header block, refusing anything over the size limit
///
/// **Private** - internal helper for execute_analyse
fn read_input(args: &AnalyseArgs) -> Result<Vec<u8>> {
    let mut raw = Vec::new();

    match &args.input {
        Some(path) => {
            let file = std::fs::File::open(path)
                .with_context(|| format!("Failed to open {}", path.display()))?;
            file.take(MAX_INPUT_BYTES + 1)
                .read_to_end(&mut raw)
                .with_context(|| format!("Failed to read {}", path.display()))?;
        }
        None => {
            std::io::stdin()
                .lock()
                .take(MAX_INPUT_BYTES + 1)
                .read_to_end(&mut raw)
                .context("Failed to read stdin")?;
        }
    }

    if raw.len() as u64 > MAX_INPUT_BYTES {
        anyhow::bail!("Header block exceeds {} bytes", MAX_INPUT_BYTES);
    }

    Ok(raw)
}

/// Validate analyse arguments
///
/// **Public** - can be called before execute_analyse for early validation
pub fn validate_args(args: &AnalyseArgs) -> Result<()> {
    if let Some(input) = &args.input {
        if input.as_os_str().is_empty() {
            anyhow::bail!("Input path cannot be empty");
        }

        if !input.is_file() {
            anyhow::bail!("Input file not found: {}", input.display());
        }
    }

    if let Some(output) = &args.output {
        if output.as_os_str().is_empty() {
            anyhow::bail!("Output path cannot be empty");
        }

        if output.is_dir() {
            anyhow::bail!("Output path is a directory: {}", output.display());
        }

        if args.input.as_ref() == Some(output) {
            anyhow::bail!("Output path must differ from the input path");
        }
    }

    Ok(())
}
