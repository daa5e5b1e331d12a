//! Batch input and report files.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use clap::ValueEnum;

use crate::core::batch_format::{parse_batch_input, render_report};
use crate::core::types::{GameRequest, GameResult};

/// Report layout for `wikigame batch`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum ReportFormat {
    /// Header line per record followed by indented sentences.
    #[default]
    Text,
    /// Pretty-printed JSON array of results.
    Json,
}

/// Read and parse a batch input file.
pub fn read_batch_file(path: &Path, defaults: &GameRequest) -> Result<Vec<GameRequest>> {
    let contents = fs::read_to_string(path).with_context(|| format!("read {}", path.display()))?;
    Ok(parse_batch_input(&contents, defaults))
}

/// Render `results` in `format`.
pub fn render(results: &[GameResult], format: ReportFormat) -> Result<String> {
    match format {
        ReportFormat::Text => Ok(render_report(results)),
        ReportFormat::Json => {
            let mut buf = serde_json::to_string_pretty(results).context("serialize results")?;
            buf.push('\n');
            Ok(buf)
        }
    }
}

/// Write the batch report to `path`, creating parent directories.
pub fn write_report(path: &Path, results: &[GameResult], format: ReportFormat) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .with_context(|| format!("create directory {}", parent.display()))?;
    }
    let payload = render(results, format)?;
    fs::write(path, payload).with_context(|| format!("write {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::Value;

    fn results() -> Vec<GameResult> {
        vec![GameResult::TargetFound {
            start_title: "Rust".to_string(),
            target_title: "Philosophy".to_string(),
            total_steps: 4,
        }]
    }

    #[test]
    fn reads_batch_file() {
        let temp = tempfile::tempdir().expect("tempdir");
        let path = temp.path().join("input.txt");
        fs::write(&path, "# comment\nRust|Iron\n").expect("write input");
        let requests =
            read_batch_file(&path, &GameRequest::new("Special:Random", "Philosophy", "en"))
                .expect("read");
        assert_eq!(requests, vec![GameRequest::new("Rust", "Iron", "en")]);
    }

    #[test]
    fn missing_input_reports_path() {
        let temp = tempfile::tempdir().expect("tempdir");
        let path = temp.path().join("nope.txt");
        let err = read_batch_file(&path, &GameRequest::new("a", "b", "en")).unwrap_err();
        assert!(format!("{err:#}").contains("nope.txt"));
    }

    #[test]
    fn writes_text_report_into_new_directory() {
        let temp = tempfile::tempdir().expect("tempdir");
        let path = temp.path().join("out").join("output.txt");
        write_report(&path, &results(), ReportFormat::Text).expect("write");
        let written = fs::read_to_string(&path).expect("read back");
        assert_eq!(
            written,
            "Rust:\n\tArrived at \"Philosophy\" from \"Rust\" after 4 steps.\n\n"
        );
    }

    #[test]
    fn json_report_is_tagged_array() {
        let payload = render(&results(), ReportFormat::Json).expect("render");
        let value: Value = serde_json::from_str(&payload).expect("parse");
        assert_eq!(value[0]["result"], "target_found");
        assert_eq!(value[0]["start_title"], "Rust");
    }
}
