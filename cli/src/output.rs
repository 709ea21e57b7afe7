//! Terminal output. Progress goes to stderr so stdout only carries the
//! summary, the prompt, the model reply, or the JSON report.

use loglens_core::AggregateSummary;
use owo_colors::OwoColorize;
use serde::Serialize;

#[derive(Debug, Clone, Copy)]
pub(crate) struct Printer {
    stdout_with_ansi: bool,
    stderr_with_ansi: bool,
}

impl Printer {
    pub(crate) fn new(stdout_with_ansi: bool, stderr_with_ansi: bool) -> Self {
        Self {
            stdout_with_ansi,
            stderr_with_ansi,
        }
    }

    pub(crate) fn progress(&self, message: &str) {
        if self.stderr_with_ansi {
            eprintln!("{} {message}", "[*]".cyan().bold());
        } else {
            eprintln!("[*] {message}");
        }
    }

    pub(crate) fn section(&self, title: &str, body: &str) {
        let header = format!("=== {title} ===");
        if self.stdout_with_ansi {
            println!("{}", header.bold());
        } else {
            println!("{header}");
        }
        println!("{body}");
    }
}

/// Machine-readable result for `--json`.
#[derive(Debug, Serialize)]
pub(crate) struct JsonReport<'a> {
    pub summary: &'a AggregateSummary,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub prompt: Option<&'a str>,
    pub response: Option<String>,
}

impl JsonReport<'_> {
    pub(crate) fn print(&self) -> anyhow::Result<()> {
        println!("{}", serde_json::to_string_pretty(self)?);
        Ok(())
    }
}
