use std::fmt::Write;

use crate::entry::LogEntry;
use crate::summary::compute_local_summary;

const PREAMBLE: &str = "\
You are a cybersecurity SOC analyst assistant.
You will be given a local pre-analysis summary and a subset of raw log entries.
Your tasks:
1. Provide a concise incident summary (3-5 bullet points).
2. Identify likely threats or attack patterns.
3. Suggest triage priorities for an analyst.
4. Suggest 3-5 recommended next steps (e.g., block IP, reset password, collect more logs).

";

pub const SUMMARY_HEADER: &str = "=== LOCAL ANALYSIS SUMMARY ===";

pub const TRUNCATION_MARKER: &str = "[... additional log entries truncated for brevity ...]";

const CLOSING_INSTRUCTION: &str = "Please provide your analysis now.";

/// Builds the prompt handed to the text model.
///
/// At most `max_entries` raw entries are embedded, in input order; when more
/// exist a single [`TRUNCATION_MARKER`] line follows them.
pub fn build_prompt_for_llm(entries: &[LogEntry], max_entries: usize) -> String {
    let mut prompt = String::from(PREAMBLE);

    prompt.push_str(SUMMARY_HEADER);
    prompt.push('\n');
    prompt.push_str(&compute_local_summary(entries));
    prompt.push_str("\n\n");

    let _ = writeln!(
        prompt,
        "=== SAMPLE RAW LOG ENTRIES (capped at {max_entries}) ==="
    );
    for entry in entries.iter().take(max_entries) {
        prompt.push_str(&render_entry(entry));
        prompt.push('\n');
    }
    if entries.len() > max_entries {
        prompt.push_str(TRUNCATION_MARKER);
        prompt.push('\n');
    }

    prompt.push('\n');
    prompt.push_str(CLOSING_INSTRUCTION);
    prompt.push('\n');
    prompt
}

pub fn render_entry(entry: &LogEntry) -> String {
    format!(
        "[{}] host={} severity={} msg={}",
        entry.timestamp, entry.host, entry.severity_raw, entry.message
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn numbered_entries(n: usize) -> Vec<LogEntry> {
        (0..n)
            .map(|i| LogEntry::new(format!("t{i}"), format!("h{}", i % 3), "low", format!("m{i}")))
            .collect()
    }

    fn entry_lines(prompt: &str) -> Vec<&str> {
        prompt
            .lines()
            .filter(|line| line.starts_with('[') && line.contains("] host="))
            .collect()
    }

    #[test]
    fn renders_entry_with_raw_severity() {
        let entry = LogEntry::new("2024-05-01T10:00:00Z", "web-1", "HIGH", "failed login");
        assert_eq!(
            render_entry(&entry),
            "[2024-05-01T10:00:00Z] host=web-1 severity=HIGH msg=failed login"
        );
    }

    #[test]
    fn truncates_after_exactly_the_cap() {
        let entries = numbered_entries(205);
        let prompt = build_prompt_for_llm(&entries, 200);

        let lines = entry_lines(&prompt);
        assert_eq!(lines.len(), 200);
        assert_eq!(lines.last(), Some(&"[t199] host=h1 severity=low msg=m199"));
        assert_eq!(prompt.matches(TRUNCATION_MARKER).count(), 1);
        assert!(!prompt.contains("msg=m200"));

        let after_last_entry: Vec<&str> = prompt
            .lines()
            .skip_while(|line| *line != "[t199] host=h1 severity=low msg=m199")
            .skip(1)
            .collect();
        assert_eq!(
            after_last_entry,
            vec![TRUNCATION_MARKER, "", CLOSING_INSTRUCTION]
        );
    }

    #[test]
    fn no_marker_when_entries_fit() {
        let entries = numbered_entries(200);
        let prompt = build_prompt_for_llm(&entries, 200);
        assert_eq!(entry_lines(&prompt).len(), 200);
        assert!(!prompt.contains(TRUNCATION_MARKER));
    }

    #[test]
    fn embeds_summary_verbatim() {
        let entries = numbered_entries(4);
        let prompt = build_prompt_for_llm(&entries, 200);
        let summary = compute_local_summary(&entries);
        assert!(prompt.contains(&format!("{SUMMARY_HEADER}\n{summary}\n\n")));
    }

    #[test]
    fn empty_input_renders_framing_only() {
        let prompt = build_prompt_for_llm(&[], 200);

        assert!(prompt.starts_with("You are a cybersecurity SOC analyst assistant.\n"));
        assert!(prompt.contains("Total log entries: 0\n"));
        assert!(prompt.ends_with(
            "=== SAMPLE RAW LOG ENTRIES (capped at 200) ===\n\nPlease provide your analysis now.\n"
        ));
        assert_eq!(entry_lines(&prompt), Vec::<&str>::new());
        assert!(!prompt.contains(TRUNCATION_MARKER));
    }

    #[test]
    fn zero_cap_emits_only_the_marker() {
        let entries = numbered_entries(1);
        let prompt = build_prompt_for_llm(&entries, 0);
        assert_eq!(entry_lines(&prompt), Vec::<&str>::new());
        assert_eq!(prompt.matches(TRUNCATION_MARKER).count(), 1);
    }

    #[test]
    fn prompt_is_deterministic() {
        let entries = numbered_entries(7);
        assert_eq!(
            build_prompt_for_llm(&entries, 5),
            build_prompt_for_llm(&entries, 5)
        );
    }
}
