use std::path::PathBuf;

use thiserror::Error;

/// Fatal conditions that make a log file untrustworthy as a whole.
///
/// Recoverable per-record problems are reported through
/// [`crate::DiagnosticSink`] instead and never surface here.
#[derive(Debug, Error)]
pub enum IngestError {
    #[error("invalid log file path: {reason}")]
    InvalidPath { reason: String },

    #[error("unable to read log file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("log file {path} is not a regular file")]
    NotAFile { path: PathBuf },

    #[error("log file {path} is too large: {size} bytes (max allowed: {limit} bytes)")]
    TooLarge { path: PathBuf, size: u64, limit: u64 },
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("unable to read config file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("unable to parse config file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}
