//! Mail Hopper CLI
//!
//! Analyse the hops taken by an email to reach you.
//! Reads a raw header block and reports every relay with its delay.

use anyhow::Result;
use clap::{Parser, Subcommand};
use env_logger::Env;
use std::path::PathBuf;

use mail_hopper::commands::{
    display_schema, display_version, execute_analyse, validate_args, validate_report_file,
    AnalyseArgs,
};

/// Mail Hopper - trace the path of an email through its Received headers
#[derive(Parser, Debug)]
#[command(name = "hopper")]
#[command(version, about, long_about = None)]
struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,
}

/// Available commands
#[derive(Subcommand, Debug)]
enum Commands {
    /// Analyse a raw header block
    Analyse {
        /// Header block file (reads stdin when omitted)
        #[arg(short, long, env = "HOPPER_INPUT")]
        input: Option<PathBuf>,

        /// Output path for the JSON report (prints to stdout when omitted)
        #[arg(short, long, env = "HOPPER_OUTPUT")]
        output: Option<PathBuf>,

        /// Write compact JSON
        #[arg(long)]
        compact: bool,

        /// Print a hop table
        #[arg(long)]
        summary: bool,
    },

    /// Validate a report JSON file
    Validate {
        /// Path to report JSON file
        #[arg(short, long)]
        file: PathBuf,
    },

    /// Display schema information
    Schema {
        /// Show full schema details
        #[arg(long)]
        show: bool,
    },

    /// Display version information
    Version,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Logs go to stderr so stdout stays clean for the JSON report
    let log_level = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(Env::default().default_filter_or(log_level)).init();

    match cli.command {
        Commands::Analyse {
            input,
            output,
            compact,
            summary,
        } => {
            let args = AnalyseArgs {
                input,
                output,
                compact,
                print_summary: summary,
            };

            validate_args(&args)?;
            execute_analyse(args)?;
        }

        Commands::Validate { file } => {
            validate_report_file(&file)?;
        }

        Commands::Schema { show } => {
            display_schema(show);
        }

        Commands::Version => {
            display_version();
        }
    }

    Ok(())
}
