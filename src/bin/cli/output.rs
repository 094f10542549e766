//! Output formatting for CLI operations.

use console::style;
use minipack::{RunSummary, StageReport, StageStatus};
use serde_json::json;

/// Trait for output formatting
pub trait OutputFormatter {
    /// Formats the end-of-run summary
    fn format_summary(&self, summary: &RunSummary) -> String;
}

/// Human-readable output formatter
pub struct HumanFormatter;

impl HumanFormatter {
    fn format_stage(&self, report: &StageReport, output: &mut String) {
        let status = match &report.status {
            StageStatus::Completed if report.is_ok() => style("ok").green(),
            StageStatus::Completed => style("partial").yellow(),
            StageStatus::Skipped(_) => style("skipped").yellow(),
            StageStatus::Aborted(_) => style("aborted").red(),
        };

        output.push_str(&format!(
            "{:<18} {:<9} {:>6} {:>6} {:>10}\n",
            report.stage.name(),
            status,
            report.written(),
            report.failed(),
            humanize_bytes(report.bytes_written())
        ));

        if let Some(reason) = report.status.reason() {
            output.push_str(&format!("    {}\n", reason));
        }
        for (path, error) in report.failures() {
            output.push_str(&format!("    {}: {}\n", path.display(), error));
        }
    }
}

impl OutputFormatter for HumanFormatter {
    fn format_summary(&self, summary: &RunSummary) -> String {
        let mut output = String::new();

        // Header
        output.push_str(&format!(
            "{:<18} {:<9} {:>6} {:>6} {:>10}\n",
            "Stage", "Status", "Files", "Failed", "Size"
        ));
        output.push_str(&"-".repeat(53));
        output.push('\n');

        for report in &summary.stages {
            self.format_stage(report, &mut output);
        }

        // Footer
        output.push_str(&"-".repeat(53));
        output.push('\n');
        output.push_str(&format!(
            "{} files written ({}), {} failed -> {}\n",
            summary.files_written(),
            humanize_bytes(summary.bytes_written()),
            summary.files_failed(),
            summary.output_dir.display()
        ));

        output
    }
}

/// JSON output formatter
pub struct JsonFormatter;

impl OutputFormatter for JsonFormatter {
    fn format_summary(&self, summary: &RunSummary) -> String {
        let stages: Vec<_> = summary
            .stages
            .iter()
            .map(|r| {
                json!({
                    "stage": r.stage.name(),
                    "status": r.status.name(),
                    "reason": r.status.reason(),
                    "written": r.written(),
                    "failed": r.failed(),
                    "bytes_written": r.bytes_written(),
                    "failures": r
                        .failures()
                        .map(|(p, e)| json!({"path": p.display().to_string(), "error": e}))
                        .collect::<Vec<_>>(),
                })
            })
            .collect();

        let obj = json!({
            "success": summary.is_ok(),
            "output_dir": summary.output_dir.display().to_string(),
            "files_written": summary.files_written(),
            "files_failed": summary.files_failed(),
            "stages": stages,
        });

        serde_json::to_string_pretty(&obj).unwrap_or_else(|_| "{}".to_string())
    }
}

/// Creates the appropriate formatter based on output format
pub fn create_formatter(format: super::OutputFormat) -> Box<dyn OutputFormatter> {
    match format {
        super::OutputFormat::Human => Box::new(HumanFormatter),
        super::OutputFormat::Json => Box::new(JsonFormatter),
    }
}

/// Converts bytes to a human-readable string
pub fn humanize_bytes(bytes: u64) -> String {
    const KB: u64 = 1024;
    const MB: u64 = KB * 1024;
    const GB: u64 = MB * 1024;

    if bytes >= GB {
        format!("{:.1} GB", bytes as f64 / GB as f64)
    } else if bytes >= MB {
        format!("{:.1} MB", bytes as f64 / MB as f64)
    } else if bytes >= KB {
        format!("{:.1} KB", bytes as f64 / KB as f64)
    } else {
        format!("{} B", bytes)
    }
}
