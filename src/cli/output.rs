//! Report formatting for a finished migration
//!
//! A run that reached `Done` is summarized as a [`MigrationReport`], which is
//! rendered either as status lines for a terminal or as pretty-printed JSON.
//!
//! # Example
//!
//! ```ignore
//! use apishift::cli::output::{MigrationReport, OutputFormat, OutputFormatter};
//!
//! let report = MigrationReport::from_outcome(&outcome, &artifact_path);
//! let formatter = OutputFormatter::new(OutputFormat::Json);
//! println!("{}", formatter.format(&report)?);
//! ```

use anyhow::{Context, Result};
use serde::Serialize;
use std::path::{Path, PathBuf};

use crate::migration::MigrationOutcome;

/// Output format enumeration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// JSON format (machine-readable)
    Json,
    /// Human-readable status lines
    Human,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ReportStatus {
    Migrated,
    ValidationFailed,
}

/// Summary of one run that reached `Done`
#[derive(Debug, Clone, Serialize)]
pub struct MigrationReport {
    pub status: ReportStatus,
    /// Where the artifact was (or would have been) written
    pub artifact: PathBuf,
    /// Whether the artifact file exists as a result of this run
    pub artifact_written: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub diagnostic: Option<String>,
    pub migrated_code: String,
    pub execution_output: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub exit_code: Option<i32>,
}

impl MigrationReport {
    pub fn from_outcome(outcome: &MigrationOutcome, artifact: &Path) -> Self {
        let execution = outcome.execution();
        let (status, diagnostic) = if outcome.is_persisted() {
            (ReportStatus::Migrated, None)
        } else {
            (
                ReportStatus::ValidationFailed,
                Some(execution.diagnostic.clone()),
            )
        };

        Self {
            status,
            artifact: outcome
                .artifact()
                .map(Path::to_path_buf)
                .unwrap_or_else(|| artifact.to_path_buf()),
            artifact_written: outcome.is_persisted(),
            diagnostic,
            migrated_code: outcome.code().to_string(),
            execution_output: execution.output.clone(),
            exit_code: execution.exit_code,
        }
    }
}

/// Output formatter for migration reports
pub struct OutputFormatter {
    format: OutputFormat,
}

impl OutputFormatter {
    pub fn new(format: OutputFormat) -> Self {
        Self { format }
    }

    pub fn format(&self, report: &MigrationReport) -> Result<String> {
        match self.format {
            OutputFormat::Json => self.format_json(report),
            OutputFormat::Human => Ok(self.format_human(report)),
        }
    }

    fn format_json(&self, report: &MigrationReport) -> Result<String> {
        serde_json::to_string_pretty(report).context("Failed to serialize report to JSON")
    }

    fn format_human(&self, report: &MigrationReport) -> String {
        let mut output = String::new();

        match report.status {
            ReportStatus::Migrated => {
                output.push_str("\n\u{2705} Migration successful!\n");
                if !report.execution_output.trim().is_empty() {
                    output.push_str("\nValidation output:\n");
                    output.push_str(report.execution_output.trim_end());
                    output.push('\n');
                }
                output.push_str(&format!(
                    "\n\u{2728} Migrated code saved to: {}\n",
                    report.artifact.display()
                ));
            }
            ReportStatus::ValidationFailed => {
                output.push_str("\n\u{274C} Execution of migrated code failed\n");
                if let Some(diagnostic) = &report.diagnostic {
                    output.push_str(diagnostic.trim_end());
                    output.push('\n');
                }
                output.push_str(&format!(
                    "\nNothing was written to {}\n",
                    report.artifact.display()
                ));
            }
        }

        output.push_str("\n--- Migrated Code ---\n\n");
        output.push_str(&report.migrated_code);
        output.push('\n');

        output
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validation::ExecutionOutcome;
    use std::time::Duration;

    fn migrated() -> MigrationOutcome {
        MigrationOutcome::Migrated {
            artifact: PathBuf::from("new_app.js"),
            code: "console.log('ok')".to_string(),
            execution: ExecutionOutcome::success("ok\n", Duration::from_millis(5)),
        }
    }

    fn failed() -> MigrationOutcome {
        MigrationOutcome::ValidationFailed {
            code: "throw new Error('boom')".to_string(),
            execution: ExecutionOutcome::failure(
                "exited with status 1\n--- stderr ---\nError: boom",
                Some(1),
                "Error: boom\n",
                Duration::from_millis(5),
            ),
        }
    }

    #[test]
    fn test_report_from_migrated() {
        let report = MigrationReport::from_outcome(&migrated(), Path::new("ignored.js"));
        assert_eq!(report.status, ReportStatus::Migrated);
        assert_eq!(report.artifact, PathBuf::from("new_app.js"));
        assert!(report.artifact_written);
        assert!(report.diagnostic.is_none());
        assert_eq!(report.exit_code, Some(0));
    }

    #[test]
    fn test_report_from_validation_failure() {
        let report = MigrationReport::from_outcome(&failed(), Path::new("new_code.js"));
        assert_eq!(report.status, ReportStatus::ValidationFailed);
        assert_eq!(report.artifact, PathBuf::from("new_code.js"));
        assert!(!report.artifact_written);
        assert!(report.diagnostic.as_deref().unwrap().contains("Error: boom"));
    }

    #[test]
    fn test_human_success() {
        let report = MigrationReport::from_outcome(&migrated(), Path::new("new_app.js"));
        let text = OutputFormatter::new(OutputFormat::Human)
            .format(&report)
            .unwrap();
        assert!(text.contains("Migration successful!"));
        assert!(text.contains("Migrated code saved to: new_app.js"));
        assert!(text.contains("--- Migrated Code ---\n\nconsole.log('ok')"));
        assert!(!text.contains("failed"));
    }

    #[test]
    fn test_human_failure_shows_diagnostic() {
        let report = MigrationReport::from_outcome(&failed(), Path::new("new_code.js"));
        let text = OutputFormatter::new(OutputFormat::Human)
            .format(&report)
            .unwrap();
        assert!(text.contains("Execution of migrated code failed"));
        assert!(text.contains("exited with status 1"));
        assert!(text.contains("Nothing was written to new_code.js"));
        assert!(!text.contains("saved to"));
    }

    #[test]
    fn test_json_output() {
        let report = MigrationReport::from_outcome(&failed(), Path::new("new_code.js"));
        let json = OutputFormatter::new(OutputFormat::Json)
            .format(&report)
            .unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["status"], "validation_failed");
        assert_eq!(value["artifact_written"], false);
        assert_eq!(value["exit_code"], 1);
        assert!(value["diagnostic"].as_str().unwrap().contains("boom"));
    }

    #[test]
    fn test_json_omits_empty_diagnostic() {
        let report = MigrationReport::from_outcome(&migrated(), Path::new("new_app.js"));
        let json = OutputFormatter::new(OutputFormat::Json)
            .format(&report)
            .unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["status"], "migrated");
        assert!(value.get("diagnostic").is_none());
    }
}
