//! JSON report output writer.
//!
//! Writes Report structs to JSON files or strings, pretty or compact.

use crate::parser::schema::Report;
use crate::utils::error::OutputError;
use log::{debug, info};
use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

/// Write a report to a JSON file
///
/// **Public** - main entry point for JSON output
///
/// # Arguments
/// * `report` - Report data to write
/// * `output_path` - Path to output JSON file
///
/// # Errors
/// * `OutputError::WriteFailed` - I/O error during write
/// * `OutputError::SerializationFailed` - JSON serialization error
/// * `OutputError::InvalidPath` - Path cannot be created or is invalid
pub fn write_report(report: &Report, output_path: impl AsRef<Path>) -> Result<(), OutputError> {
    write_report_with(report, output_path.as_ref(), true)
}

/// Write a report as compact JSON (no formatting)
///
/// **Public** - one line per report, handy when piping into other tools
pub fn write_report_compact(
    report: &Report,
    output_path: impl AsRef<Path>,
) -> Result<(), OutputError> {
    write_report_with(report, output_path.as_ref(), false)
}

/// Shared file writer
///
/// **Private** - internal helper for write_report and write_report_compact
fn write_report_with(report: &Report, output_path: &Path, pretty: bool) -> Result<(), OutputError> {
    info!("Writing report to: {}", output_path.display());

    validate_output_path(output_path)?;

    // Create parent directories if needed
    if let Some(parent) = output_path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            debug!("Creating parent directories: {}", parent.display());
            std::fs::create_dir_all(parent).map_err(|e| {
                OutputError::InvalidPath(format!(
                    "Cannot create directory {}: {}",
                    parent.display(),
                    e
                ))
            })?;
        }
    }

    let file = File::create(output_path).map_err(OutputError::WriteFailed)?;
    let writer = BufWriter::new(file);

    let written = if pretty {
        serde_json::to_writer_pretty(writer, report)
    } else {
        serde_json::to_writer(writer, report)
    };
    written.map_err(OutputError::SerializationFailed)?;

    info!(
        "Report written successfully ({} bytes)",
        calculate_file_size(output_path)
    );

    Ok(())
}

/// Write a report to a string
///
/// **Public** - used for stdout output and in tests
pub fn report_to_string(report: &Report, pretty: bool) -> Result<String, OutputError> {
    let serialized = if pretty {
        serde_json::to_string_pretty(report)
    } else {
        serde_json::to_string(report)
    };
    serialized.map_err(OutputError::SerializationFailed)
}

/// Validate that output path is writable
///
/// **Private** - internal validation
fn validate_output_path(path: &Path) -> Result<(), OutputError> {
    if path.as_os_str().is_empty() {
        return Err(OutputError::InvalidPath("Path is empty".to_string()));
    }

    // Check if we're trying to overwrite a directory
    if path.is_dir() {
        return Err(OutputError::InvalidPath(format!(
            "Path is a directory: {}",
            path.display()
        )));
    }

    Ok(())
}

/// Calculate file size in bytes
///
/// **Private** - internal utility
fn calculate_file_size(path: &Path) -> u64 {
    std::fs::metadata(path).map(|m| m.len()).unwrap_or(0)
}

/// Read a report from a JSON file
///
/// **Public** - used by the validate command and tests
///
/// # Errors
/// * `OutputError::WriteFailed` - File read error (reusing WriteFailed for I/O)
/// * `OutputError::SerializationFailed` - JSON parse error
pub fn read_report(input_path: impl AsRef<Path>) -> Result<Report, OutputError> {
    let input_path = input_path.as_ref();

    debug!("Reading report from: {}", input_path.display());

    let file = File::open(input_path).map_err(OutputError::WriteFailed)?;
    let report: Report = serde_json::from_reader(file).map_err(OutputError::SerializationFailed)?;

    debug!("Report loaded: version {}, source {}", report.version, report.source);

    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::schema::{Hop, Message};
    use tempfile::NamedTempFile;

    fn create_test_report() -> Report {
        Report {
            version: "1.0.0".to_string(),
            source: "stdin".to_string(),
            generated_at: "2024-01-01T00:00:00Z".to_string(),
            analysis: Message {
                from: Some("Dhruv <dhruv@foo.com>".to_string()),
                to: Some("robin@apple.com".to_string()),
                cc: None,
                bcc: None,
                total_delay: 2,
                trail: Some(vec![Hop {
                    from: String::new(),
                    protocol: "HTTP".to_string(),
                    received_by: "10.31.102.130".to_string(),
                    timestamp: Some(1_452_574_216),
                    delay: 0,
                }]),
            },
        }
    }

    #[test]
    fn test_write_and_read_report() {
        let report = create_test_report();
        let temp_file = NamedTempFile::new().unwrap();
        let path = temp_file.path();

        write_report(&report, path).unwrap();
        let loaded = read_report(path).unwrap();

        assert_eq!(loaded.version, report.version);
        assert_eq!(loaded.analysis, report.analysis);
    }

    #[test]
    fn test_write_report_compact() {
        let report = create_test_report();
        let temp_file = NamedTempFile::new().unwrap();

        write_report_compact(&report, temp_file.path()).unwrap();

        let content = std::fs::read_to_string(temp_file.path()).unwrap();
        assert!(!content.contains('\n'));
        assert!(content.contains("\"receivedBy\":\"10.31.102.130\""));
    }

    #[test]
    fn test_report_to_string_keys() {
        let json = report_to_string(&create_test_report(), false).unwrap();
        assert!(json.contains("\"From\":\"Dhruv <dhruv@foo.com>\""));
        assert!(json.contains("\"Cc\":null"));
        assert!(json.contains("\"total_delay\":2"));
    }

    #[test]
    fn test_validate_output_path_empty() {
        let result = validate_output_path(Path::new(""));
        assert!(result.is_err());
    }

    #[test]
    fn test_validate_output_path_directory() {
        let temp_dir = tempfile::tempdir().unwrap();
        let result = validate_output_path(temp_dir.path());
        assert!(result.is_err());
    }

    #[test]
    fn test_write_creates_parent_dirs() {
        let temp_dir = tempfile::tempdir().unwrap();
        let nested_path = temp_dir.path().join("nested/dirs/trail.json");

        write_report(&create_test_report(), &nested_path).unwrap();

        assert!(nested_path.exists());
    }
}
