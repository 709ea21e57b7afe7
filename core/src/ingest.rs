//! Log ingestion: validated, bounded read of a delimited log file followed by
//! tolerant record parsing.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use tracing::debug;

use crate::config::DEFAULT_MAX_FILE_BYTES;
use crate::config::DEFAULT_MAX_INGEST_ENTRIES;
use crate::diagnostics::DiagnosticSink;
use crate::diagnostics::IngestDiagnostic;
use crate::entry::LogEntry;
use crate::error::IngestError;

/// Fields are split on this byte with no quoting or escaping, so a field that
/// contains it cannot be reconstructed.
pub const FIELD_DELIMITER: char = ',';

/// Records need timestamp, host, severity and message.
pub const MIN_FIELDS: usize = 4;

pub const MAX_PATH_LEN: usize = 4096;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IngestLimits {
    pub max_file_bytes: u64,
    pub max_entries: usize,
}

impl Default for IngestLimits {
    fn default() -> Self {
        Self {
            max_file_bytes: DEFAULT_MAX_FILE_BYTES,
            max_entries: DEFAULT_MAX_INGEST_ENTRIES,
        }
    }
}

/// Reads `path` and parses it into entries.
///
/// The path is validated before any I/O, and a file over
/// `limits.max_file_bytes` is rejected before a single line is parsed.
/// Malformed records and the entry cap are reported to `diagnostics` and
/// never fail the call.
pub fn ingest_file(
    path: impl AsRef<Path>,
    limits: &IngestLimits,
    diagnostics: &mut dyn DiagnosticSink,
) -> Result<Vec<LogEntry>, IngestError> {
    let path = path.as_ref();
    validate_path(path)?;

    let bytes = read_bounded(path, limits.max_file_bytes)?;
    let text = String::from_utf8_lossy(&bytes);
    let entries = parse_records(&text, limits.max_entries, diagnostics);
    debug!(
        path = %path.display(),
        bytes = bytes.len(),
        entries = entries.len(),
        "ingested log file"
    );
    Ok(entries)
}

fn validate_path(path: &Path) -> Result<(), IngestError> {
    let len = path.as_os_str().len();
    if len == 0 {
        return Err(IngestError::InvalidPath {
            reason: "path is empty".to_string(),
        });
    }
    if len > MAX_PATH_LEN {
        return Err(IngestError::InvalidPath {
            reason: format!("path is {len} bytes long (max {MAX_PATH_LEN})"),
        });
    }
    Ok(())
}

/// Probes the size from metadata and then reads at most `limit + 1` bytes,
/// so a file that grows between the two steps is still rejected whole.
fn read_bounded(path: &Path, limit: u64) -> Result<Vec<u8>, IngestError> {
    let io_err = |source| IngestError::Io {
        path: path.to_path_buf(),
        source,
    };

    let file = File::open(path).map_err(io_err)?;
    let metadata = file.metadata().map_err(io_err)?;
    if !metadata.is_file() {
        return Err(IngestError::NotAFile {
            path: path.to_path_buf(),
        });
    }
    let size = metadata.len();
    if size > limit {
        return Err(IngestError::TooLarge {
            path: path.to_path_buf(),
            size,
            limit,
        });
    }

    let mut bytes = Vec::with_capacity(usize::try_from(size).unwrap_or_default());
    file.take(limit.saturating_add(1))
        .read_to_end(&mut bytes)
        .map_err(io_err)?;
    let read = bytes.len() as u64;
    if read > limit {
        return Err(IngestError::TooLarge {
            path: path.to_path_buf(),
            size: read,
            limit,
        });
    }
    Ok(bytes)
}

/// Parses already-loaded log text.
///
/// Blank lines are skipped, the first non-blank line is discarded as the
/// header, and records with fewer than [`MIN_FIELDS`] fields are reported and
/// skipped. At most `max_entries` entries are returned.
pub fn parse_records(
    text: &str,
    max_entries: usize,
    diagnostics: &mut dyn DiagnosticSink,
) -> Vec<LogEntry> {
    let mut entries = Vec::new();
    let mut seen_header = false;

    for (idx, line) in text.lines().enumerate() {
        let line_number = idx + 1;
        if line.trim().is_empty() {
            continue;
        }
        if !seen_header {
            seen_header = true;
            continue;
        }

        let Some(entry) = parse_record(line, line_number, diagnostics) else {
            continue;
        };
        if entries.len() >= max_entries {
            diagnostics.report(IngestDiagnostic::EntryCapReached {
                cap: max_entries,
                line_number,
            });
            break;
        }
        entries.push(entry);
    }

    entries
}

fn parse_record(
    line: &str,
    line_number: usize,
    diagnostics: &mut dyn DiagnosticSink,
) -> Option<LogEntry> {
    let fields: Vec<&str> = line.split(FIELD_DELIMITER).collect();
    let Some(([timestamp, host, severity, message], _)) =
        fields.split_first_chunk::<MIN_FIELDS>()
    else {
        diagnostics.report(IngestDiagnostic::MalformedRecord {
            line_number,
            field_count: fields.len(),
            line: line.to_string(),
        });
        return None;
    };
    Some(LogEntry::new(*timestamp, *host, *severity, *message))
}
