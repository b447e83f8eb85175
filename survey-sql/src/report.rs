//! Run report for a script generation pass
//!
//! Collects per-record warnings and counters so the operator can see what
//! made it into the script before deciding to COMMIT.

use std::path::Path;
use std::time::Duration;

use anyhow::Result;
use serde::Serialize;

/// Outcome of a script generation run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ScriptStatus {
    /// Every record became a statement
    Success,
    /// Some records were skipped with warnings
    PartialSuccess,
    /// No statement could be generated
    Failed,
}

/// A record that was skipped, with the reason
#[derive(Debug, Clone, Serialize)]
pub struct ScriptWarning {
    /// Identifier of the skipped record
    pub record: String,
    /// Why it was skipped
    pub message: String,
}

/// Report for one script generation run
#[derive(Debug, Clone, Serialize)]
pub struct ScriptReport {
    /// Source dataset
    pub source: String,
    /// Generated script path
    pub output: String,
    /// Wall-clock duration of the run
    pub duration_secs: f64,
    /// Final status
    pub status: ScriptStatus,

    /// Records read from the source dataset
    pub records_read: usize,
    /// INSERT statements written to the script
    pub statements_written: usize,
    /// Records skipped (geometry that cannot be encoded)
    pub records_skipped: usize,

    /// One entry per skipped record
    pub warnings: Vec<ScriptWarning>,
}

impl ScriptReport {
    /// Creates an empty report for a run
    pub fn new(source: &Path, output: &Path) -> Self {
        Self {
            source: source.display().to_string(),
            output: output.display().to_string(),
            duration_secs: 0.0,
            status: ScriptStatus::Success,
            records_read: 0,
            statements_written: 0,
            records_skipped: 0,
            warnings: Vec::new(),
        }
    }

    /// Records one written INSERT statement
    pub fn record_statement(&mut self) {
        self.statements_written += 1;
    }

    /// Records a skipped record with its reason
    pub fn record_skip(&mut self, record: &str, message: &str) {
        self.records_skipped += 1;
        self.warnings.push(ScriptWarning {
            record: record.to_string(),
            message: message.to_string(),
        });
    }

    /// Sets the run duration
    pub fn set_duration(&mut self, duration: Duration) {
        self.duration_secs = duration.as_secs_f64();
    }

    /// Determines the final status from the counters
    pub fn finalize(&mut self) {
        self.status = if self.records_skipped == 0 {
            ScriptStatus::Success
        } else if self.statements_written > 0 {
            ScriptStatus::PartialSuccess
        } else {
            ScriptStatus::Failed
        };
    }

    /// Prints the report to the console
    pub fn display(&self) {
        println!("\n{}", "=".repeat(60));
        println!("SCRIPT REPORT - {}", self.source);
        println!("{}", "=".repeat(60));

        println!("\nStatus: {:?}", self.status);
        println!("Duration: {:.2}s", self.duration_secs);
        println!("Output: {}", self.output);
        println!(
            "Records: {} read, {} written, {} skipped",
            self.records_read, self.statements_written, self.records_skipped
        );

        if !self.warnings.is_empty() {
            println!("\n--- WARNINGS ({}) ---", self.warnings.len());
            for w in self.warnings.iter().take(10) {
                println!("  {}: {}", w.record, w.message);
            }
            if self.warnings.len() > 10 {
                println!("  ... and {} more", self.warnings.len() - 10);
            }
        }

        println!("\n{}", "=".repeat(60));
    }

    /// Saves the report as JSON
    pub fn save_to_file(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)?;
        Ok(())
    }

    /// Compact one-line summary
    pub fn summary(&self) -> String {
        format!(
            "{}: {} read, {} written, {} skipped",
            self.source, self.records_read, self.statements_written, self.records_skipped
        )
    }
}
