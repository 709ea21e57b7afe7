mod cli;
mod output;

pub use cli::Cli;
pub use cli::Color;

use anyhow::Context;
use anyhow::bail;
use loglens_core::AggregateSummary;
use loglens_core::Config;
use loglens_core::TracingDiagnostics;
use loglens_core::build_prompt_for_llm;
use loglens_core::ingest_file;
use loglens_ollama::OllamaClient;
use supports_color::Stream;
use tracing::debug;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::prelude::*;

use crate::output::JsonReport;
use crate::output::Printer;

/// Ingestion warnings are worth seeing without setting `RUST_LOG`.
const DEFAULT_LOG_LEVEL: &str = "warn";

pub async fn run_main(cli: Cli) -> anyhow::Result<()> {
    let (stdout_with_ansi, stderr_with_ansi) = match cli.color {
        Color::Always => (true, true),
        Color::Never => (false, false),
        Color::Auto => (
            supports_color::on_cached(Stream::Stdout).is_some(),
            supports_color::on_cached(Stream::Stderr).is_some(),
        ),
    };
    init_tracing(stderr_with_ansi);
    let printer = Printer::new(stdout_with_ansi, stderr_with_ansi);

    let config = Config::load(cli.config_path.as_deref(), cli.config_overrides())
        .context("failed to load configuration")?;
    debug!(?config, "resolved configuration");

    let log_path = cli.log_path.as_path();
    printer.progress(&format!("Parsing log file: {}", log_path.display()));
    let entries = ingest_file(log_path, &config.ingest_limits(), &mut TracingDiagnostics)?;
    if entries.is_empty() {
        bail!("no valid log entries found in {}", log_path.display());
    }

    printer.progress("Generating local analysis summary.");
    let summary = AggregateSummary::from_entries(&entries);
    if !cli.json {
        printer.section("LOCAL SUMMARY", &summary.to_string());
    }
    if cli.no_llm {
        return finish_json(cli.json, &summary, None, None);
    }

    printer.progress("Building prompt for LLM.");
    let prompt = build_prompt_for_llm(&entries, config.limits.max_prompt_entries);
    if cli.print_prompt {
        if !cli.json {
            printer.section("LLM PROMPT", &prompt);
        }
        return finish_json(cli.json, &summary, Some(&prompt), None);
    }

    let client = OllamaClient::from_config(&config.ollama)?;
    printer.progress(&format!(
        "Contacting Ollama at {} using model '{}'...",
        config.ollama.base_url,
        client.model()
    ));
    let response = client
        .chat(&prompt)
        .await
        .with_context(|| format!("request to Ollama at {} failed", client.chat_url()))?;

    if cli.json {
        return finish_json(true, &summary, None, Some(response));
    }
    println!();
    printer.section("LLM INCIDENT SUMMARY", &response);
    Ok(())
}

fn finish_json(
    json: bool,
    summary: &AggregateSummary,
    prompt: Option<&str>,
    response: Option<String>,
) -> anyhow::Result<()> {
    if !json {
        return Ok(());
    }
    JsonReport {
        summary,
        prompt,
        response,
    }
    .print()
}

fn init_tracing(with_ansi: bool) {
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(DEFAULT_LOG_LEVEL))
        .unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_LEVEL));

    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_ansi(with_ansi)
        .with_writer(std::io::stderr)
        .with_filter(env_filter);

    // A subscriber may already be installed when embedded in another binary.
    let _ = tracing_subscriber::registry().with(fmt_layer).try_init();
}
