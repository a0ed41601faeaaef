// Console reporting for batch runs: human, plain or JSON lines
use colored::Colorize;
use serde::{Deserialize, Serialize};
use std::io::{self, IsTerminal};

/// Output mode for CLI commands
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputMode {
    /// Human-friendly output with colors and symbols
    Human,
    /// Machine-readable JSON output
    Json,
    /// Plain text without colors (for pipes/logs)
    Plain,
}

impl OutputMode {
    /// Auto-detect output mode based on environment
    pub fn auto() -> Self {
        if std::env::var("MONSTER_TINT_JSON").is_ok() {
            Self::Json
        } else if !io::stdout().is_terminal() {
            Self::Plain
        } else {
            Self::Human
        }
    }
}

/// Structured progress update
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProgressUpdate {
    pub stage: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file: Option<String>,
    pub status: ProgressStatus,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProgressStatus {
    Started,
    Running,
    Completed,
    Failed,
    Warning,
}

/// Structured result for agent consumption
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CommandResult {
    pub success: bool,
    pub command: String,
    pub duration_ms: u64,
    pub output: serde_json::Value,
    pub errors: Vec<String>,
    pub warnings: Vec<String>,
}

/// CLI output writer with mode awareness
pub struct OutputWriter {
    mode: OutputMode,
}

impl OutputWriter {
    pub fn new(mode: OutputMode) -> Self {
        Self { mode }
    }

    pub fn auto() -> Self {
        Self::new(OutputMode::auto())
    }

    /// Print a neutral status line
    pub fn info(&self, message: &str) {
        match self.mode {
            OutputMode::Human => println!("{}", message.cyan()),
            OutputMode::Plain => println!("{}", message),
            OutputMode::Json => self.emit_progress(ProgressUpdate {
                stage: "scan".to_string(),
                message: message.to_string(),
                file: None,
                status: ProgressStatus::Started,
            }),
        }
    }

    /// Report a file that was (or would be) rewritten
    pub fn updated(&self, file: &str, message: &str) {
        match self.mode {
            OutputMode::Human => println!("  {} {}", "✓".green(), message),
            OutputMode::Plain => println!("  [OK] {}", message),
            OutputMode::Json => self.emit_progress(ProgressUpdate {
                stage: "update".to_string(),
                message: message.to_string(),
                file: Some(file.to_string()),
                status: ProgressStatus::Running,
            }),
        }
    }

    /// Report a skipped file
    pub fn warning(&self, file: &str, message: &str) {
        match self.mode {
            OutputMode::Human => println!("  {} {}", "⚠".yellow(), message),
            OutputMode::Plain => println!("  [WARN] {}", message),
            OutputMode::Json => self.emit_progress(ProgressUpdate {
                stage: "update".to_string(),
                message: message.to_string(),
                file: Some(file.to_string()),
                status: ProgressStatus::Warning,
            }),
        }
    }

    /// Print an error message
    pub fn error(&self, message: &str) {
        match self.mode {
            OutputMode::Human => eprintln!("{} {}", "✗".red(), message),
            OutputMode::Plain => eprintln!("[ERROR] {}", message),
            OutputMode::Json => self.emit_progress(ProgressUpdate {
                stage: "scan".to_string(),
                message: message.to_string(),
                file: None,
                status: ProgressStatus::Failed,
            }),
        }
    }

    /// Print the closing `updated/total` line
    pub fn summary(&self, updated: usize, total: usize) {
        let message = summary_line(updated, total);
        match self.mode {
            OutputMode::Human => {
                println!();
                if updated == total {
                    println!("{}", message.green().bold());
                } else {
                    println!("{}", message.yellow().bold());
                }
            }
            OutputMode::Plain => {
                println!();
                println!("{}", message);
            }
            OutputMode::Json => self.emit_progress(ProgressUpdate {
                stage: "summary".to_string(),
                message,
                file: None,
                status: ProgressStatus::Completed,
            }),
        }
    }

    /// Emit structured progress update (for JSON mode)
    fn emit_progress(&self, update: ProgressUpdate) {
        if matches!(self.mode, OutputMode::Json) {
            if let Ok(json) = serde_json::to_string(&update) {
                println!("{}", json);
            }
        }
    }

    /// Emit final structured result (for JSON mode)
    pub fn emit_result(&self, result: &CommandResult) {
        if let OutputMode::Json = self.mode {
            if let Ok(json) = serde_json::to_string_pretty(result) {
                println!("{}", json);
            }
        }
    }
}

pub fn summary_line(updated: usize, total: usize) -> String {
    format!("Updated {}/{} files", updated, total)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_auto_mode() {
        let mode = OutputMode::auto();
        // Will be Plain when running in cargo test (no TTY)
        assert!(matches!(
            mode,
            OutputMode::Plain | OutputMode::Human | OutputMode::Json
        ));
    }

    #[test]
    fn test_summary_line() {
        assert_eq!(summary_line(0, 0), "Updated 0/0 files");
        assert_eq!(summary_line(2, 3), "Updated 2/3 files");
    }

    #[test]
    fn test_progress_serialization() {
        let update = ProgressUpdate {
            stage: "update".to_string(),
            message: "Updated: slime.tres - gradient: diamond".to_string(),
            file: Some("slime.tres".to_string()),
            status: ProgressStatus::Running,
        };
        let json = serde_json::to_value(&update).unwrap();
        assert_eq!(json["status"], "running");
        assert_eq!(json["file"], "slime.tres");

        let without_file = ProgressUpdate {
            file: None,
            ..update
        };
        let json = serde_json::to_value(&without_file).unwrap();
        assert!(json.get("file").is_none());
    }
}
