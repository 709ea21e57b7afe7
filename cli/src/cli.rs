use std::path::PathBuf;

use clap::Parser;
use clap::ValueEnum;
use loglens_core::ConfigOverrides;

#[derive(Parser, Debug)]
#[command(
    name = "loglens",
    version,
    about = "Summarize a security log locally and ask an Ollama model for an incident report."
)]
pub struct Cli {
    /// Comma-separated log file. The first non-blank line is a header.
    #[arg(value_name = "LOG_FILE")]
    pub log_path: PathBuf,

    /// Model the Ollama server should use.
    #[arg(long, short = 'm')]
    pub model: Option<String>,

    /// Base URL of the Ollama server.
    #[arg(long = "url", value_name = "BASE_URL")]
    pub base_url: Option<String>,

    /// Config file to load instead of `$LOGLENS_HOME/config.toml`.
    #[arg(long = "config", value_name = "FILE")]
    pub config_path: Option<PathBuf>,

    /// Reject log files larger than this many bytes.
    #[arg(long = "max-file-bytes", value_name = "BYTES")]
    pub max_file_bytes: Option<u64>,

    /// Stop ingesting after this many entries.
    #[arg(long = "max-entries", value_name = "N")]
    pub max_ingest_entries: Option<usize>,

    /// Embed at most this many raw entries in the prompt.
    #[arg(long = "max-prompt-entries", value_name = "N")]
    pub max_prompt_entries: Option<usize>,

    /// Print the local summary only; do not contact the model.
    #[arg(long = "no-llm", default_value_t = false, conflicts_with = "print_prompt")]
    pub no_llm: bool,

    /// Print the composed prompt instead of sending it.
    #[arg(long = "print-prompt", default_value_t = false)]
    pub print_prompt: bool,

    /// Write a single JSON object to stdout instead of text sections.
    #[arg(long = "json", default_value_t = false)]
    pub json: bool,

    /// Specifies color settings for use in the output.
    #[arg(long = "color", value_enum, default_value_t = Color::Auto)]
    pub color: Color,
}

impl Cli {
    pub fn config_overrides(&self) -> ConfigOverrides {
        ConfigOverrides {
            model: self.model.clone(),
            base_url: self.base_url.clone(),
            max_file_bytes: self.max_file_bytes,
            max_ingest_entries: self.max_ingest_entries,
            max_prompt_entries: self.max_prompt_entries,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
#[value(rename_all = "kebab-case")]
pub enum Color {
    Always,
    Never,
    #[default]
    Auto,
}
