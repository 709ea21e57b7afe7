use std::cmp::Reverse;
use std::collections::BTreeMap;
use std::fmt;

use indexmap::IndexMap;
use serde::Serialize;

use crate::entry::LogEntry;

pub const TOP_HOSTS_LIMIT: usize = 5;

/// Substrings (matched against the lowercased message) that count an entry
/// as a possible failed login.
const FAILED_LOGIN_MARKERS: [&str; 3] = [
    "failed login",
    "authentication failure",
    "invalid password",
];

/// Aggregate statistics over a sequence of entries. Computed fresh per call.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct AggregateSummary {
    pub total_entries: usize,
    /// Keyed by severity score, ascending.
    pub severity_counts: BTreeMap<i32, usize>,
    /// Keyed by host in first-seen order.
    pub host_counts: IndexMap<String, usize>,
    pub failed_login_events: usize,
}

impl AggregateSummary {
    pub fn from_entries(entries: &[LogEntry]) -> Self {
        let mut summary = Self {
            total_entries: entries.len(),
            ..Default::default()
        };
        for entry in entries {
            *summary
                .severity_counts
                .entry(entry.severity_score)
                .or_default() += 1;
            *summary.host_counts.entry(entry.host.clone()).or_default() += 1;
            if is_possible_failed_login(&entry.message) {
                summary.failed_login_events += 1;
            }
        }
        summary
    }

    /// Hosts ranked by descending count. Hosts with equal counts keep the
    /// order in which they first appeared in the input.
    pub fn top_hosts(&self, limit: usize) -> Vec<(&str, usize)> {
        let mut hosts: Vec<(&str, usize)> = self
            .host_counts
            .iter()
            .map(|(host, count)| (host.as_str(), *count))
            .collect();
        hosts.sort_by_key(|(_, count)| Reverse(*count));
        hosts.truncate(limit);
        hosts
    }
}

impl fmt::Display for AggregateSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Total log entries: {}", self.total_entries)?;

        writeln!(f, "Severity distribution (numeric approximate):")?;
        for (score, count) in &self.severity_counts {
            writeln!(f, "  Severity {score}: {count} events")?;
        }

        writeln!(f, "Top hosts by event count:")?;
        for (host, count) in self.top_hosts(TOP_HOSTS_LIMIT) {
            writeln!(f, "  {host}: {count} events")?;
        }

        writeln!(
            f,
            "Detected possible failed login events: {}",
            self.failed_login_events
        )
    }
}

fn is_possible_failed_login(message: &str) -> bool {
    let message = message.to_lowercase();
    FAILED_LOGIN_MARKERS
        .iter()
        .any(|marker| message.contains(marker))
}

/// Human-readable local summary of `entries`.
pub fn compute_local_summary(entries: &[LogEntry]) -> String {
    AggregateSummary::from_entries(entries).to_string()
}
