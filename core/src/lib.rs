//! Root of the `loglens-core` library.
//!
//! Turns a delimited security log into a bounded list of [`LogEntry`] values,
//! a deterministic local summary, and a size-bounded prompt for a text model.

// Prevent accidental direct writes to stdout/stderr in library code. All
// user-visible output must go through the binary or the tracing stack.
#![deny(clippy::print_stdout, clippy::print_stderr)]

pub mod config;
pub mod diagnostics;
mod entry;
pub mod error;
pub mod ingest;
pub mod prompt;
pub mod severity;
pub mod summary;

pub use config::Config;
pub use config::ConfigOverrides;
pub use config::ConfigToml;
pub use diagnostics::DiagnosticSink;
pub use diagnostics::IngestDiagnostic;
pub use diagnostics::TracingDiagnostics;
pub use entry::LogEntry;
pub use error::ConfigError;
pub use error::IngestError;
pub use ingest::IngestLimits;
pub use ingest::ingest_file;
pub use ingest::parse_records;
pub use prompt::build_prompt_for_llm;
pub use summary::AggregateSummary;
pub use summary::compute_local_summary;
