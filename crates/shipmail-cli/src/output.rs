//! Output formatting for the CLI.

use crate::config::OutputFormat;
use crate::error::Result;
use colored::*;
use shipmail_extractor::scoring::ScoreReport;
use shipmail_extractor::BatchReport;
use std::path::Path;
use tabled::{
    builder::Builder,
    settings::{object::Rows, Alignment, Modify, Style},
};

/// Output formatter.
pub struct Formatter {
    format: OutputFormat,
    color_enabled: bool,
}

impl Formatter {
    /// Create a new formatter.
    pub fn new(format: OutputFormat, color_enabled: bool) -> Self {
        Self {
            format,
            color_enabled,
        }
    }

    /// Format an evaluation report.
    pub fn format_score(&self, report: &ScoreReport) -> Result<String> {
        match self.format {
            OutputFormat::Json => Ok(serde_json::to_string_pretty(&serde_json::json!({
                "accuracy": report.accuracy(),
                "correct": report.correct,
                "total": report.total,
                "records_compared": report.records_compared,
                "fields": report.fields,
            }))?),
            OutputFormat::Table => Ok(self.format_score_table(report)),
        }
    }

    fn format_score_table(&self, report: &ScoreReport) -> String {
        let headline = format!("Overall Accuracy: {}%", report.accuracy());
        if report.fields.is_empty() {
            return format!("{}\n{}", headline, self.colorize("No fields compared.", "yellow"));
        }

        let mut builder = Builder::default();
        builder.push_record(["Field", "Correct", "Total", "Accuracy"]);
        for (name, field) in &report.fields {
            builder.push_record([
                name.clone(),
                field.correct.to_string(),
                field.total.to_string(),
                format!("{:.2}%", field.accuracy()),
            ]);
        }

        let mut table = builder.build();
        table
            .with(Style::rounded())
            .with(Modify::new(Rows::first()).with(Alignment::center()));

        format!("{}\n{}", self.colorize(&headline, "cyan"), table)
    }

    /// Summarize a finished batch.
    pub fn batch_summary(&self, report: &BatchReport, output: &Path) -> String {
        let mut lines = Vec::new();
        if let Some(halt) = &report.halted {
            lines.push(self.error(&format!(
                "Rate limit reached at email '{}' ({}/{}); run stopped",
                halt.email_id,
                halt.index + 1,
                report.total_emails
            )));
        }
        if report.fallbacks > 0 {
            lines.push(self.warning(&format!(
                "{} email(s) could not be extracted and were written as null records",
                report.fallbacks
            )));
        }
        lines.push(self.success(&format!(
            "{} generated ({} records)",
            output.display(),
            report.records.len()
        )));
        lines.join("\n")
    }

    /// Format a success message.
    pub fn success(&self, message: &str) -> String {
        self.colorize(&format!("✓ {}", message), "green")
    }

    /// Format an error message.
    pub fn error(&self, message: &str) -> String {
        self.colorize(&format!("✗ {}", message), "red")
    }

    /// Format a warning message.
    pub fn warning(&self, message: &str) -> String {
        self.colorize(&format!("⚠ {}", message), "yellow")
    }

    /// Colorize text if color is enabled.
    fn colorize(&self, text: &str, color: &str) -> String {
        if !self.color_enabled {
            return text.to_string();
        }

        match color {
            "red" => text.red().to_string(),
            "green" => text.green().to_string(),
            "yellow" => text.yellow().to_string(),
            "cyan" => text.cyan().to_string(),
            _ => text.to_string(),
        }
    }
}
