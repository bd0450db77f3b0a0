use crate::output::read_report;
use crate::utils::config::SCHEMA_VERSION;
use anyhow::Result;
use std::path::Path;

/// Validate a report JSON file
pub fn validate_report_file(file_path: &Path) -> Result<()> {
    println!("Validating report: {}", file_path.display());

    let report = read_report(file_path)?;

    println!("✓ Valid report JSON");
    println!("  Version: {}", report.version);
    println!("  Source: {}", report.source);
    println!("  From: {}", report.analysis.from.as_deref().unwrap_or("-"));
    println!("  Hops: {}", report.hop_count());
    println!("  Total Delay: {}s", report.analysis.total_delay);

    Ok(())
}

/// Display schema information
pub fn display_schema(show_details: bool) {
    println!("Mail Hopper Report Schema");
    println!("Current Version: {}", SCHEMA_VERSION);
    println!();

    if show_details {
        println!("Schema Structure:");
        println!("  version: string            - Schema version (e.g., '1.0.0')");
        println!("  source: string             - Input file path or 'stdin'");
        println!("  generated_at: string       - RFC 3339 timestamp");
        println!("  analysis: object           - Analysed message");
        println!("    From/To/Cc/Bcc: string?  - Decoded address headers");
        println!("    total_delay: number      - Sum of hop delays (seconds)");
        println!("    trail: array?            - Hops, earliest first");
        println!("      from: string           - Sending host");
        println!("      protocol: string       - Transfer protocol");
        println!("      receivedBy: string     - Receiving host");
        println!("      timestamp: number?     - Unix timestamp (UTC)");
        println!("      delay: number          - Seconds since previous hop");
    } else {
        println!("Use --show for detailed schema information");
    }
}

/// Display version information
pub fn display_version() {
    println!("Mail Hopper v{}", env!("CARGO_PKG_VERSION"));
    println!("Report Schema: v{}", SCHEMA_VERSION);
    println!();
    println!("Analyse the hops taken by an email to reach you.");
}
