use tracing::warn;

/// Malformed lines are echoed into logs; keep that bounded.
const LINE_PREVIEW_MAX_CHARS: usize = 200;

/// Non-fatal events observed while ingesting a log file.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum IngestDiagnostic {
    /// A record with fewer than four fields was skipped.
    MalformedRecord {
        line_number: usize,
        field_count: usize,
        line: String,
    },
    /// Ingestion stopped early because the entry cap was reached.
    EntryCapReached { cap: usize, line_number: usize },
}

/// Receives ingestion warnings. Reporting must never influence whether
/// ingestion succeeds.
pub trait DiagnosticSink {
    fn report(&mut self, diagnostic: IngestDiagnostic);
}

/// Collects diagnostics in memory for callers that want the full list.
impl DiagnosticSink for Vec<IngestDiagnostic> {
    fn report(&mut self, diagnostic: IngestDiagnostic) {
        self.push(diagnostic);
    }
}

/// Forwards diagnostics to the `tracing` stack as warnings.
#[derive(Clone, Copy, Debug, Default)]
pub struct TracingDiagnostics;

impl DiagnosticSink for TracingDiagnostics {
    fn report(&mut self, diagnostic: IngestDiagnostic) {
        match diagnostic {
            IngestDiagnostic::MalformedRecord {
                line_number,
                field_count,
                line,
            } => {
                let preview = line_preview(&line);
                warn!(
                    line_number,
                    field_count, "skipping malformed log line: {preview}"
                );
            }
            IngestDiagnostic::EntryCapReached { cap, line_number } => {
                warn!(line_number, "too many log entries, stopping read at {cap}");
            }
        }
    }
}

fn line_preview(line: &str) -> String {
    let mut chars = line.chars();
    let preview: String = chars.by_ref().take(LINE_PREVIEW_MAX_CHARS).collect();
    if chars.next().is_some() {
        format!("{preview}...")
    } else {
        preview
    }
}
