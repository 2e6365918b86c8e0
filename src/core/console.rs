//! Console log - Append-only sequence of timestamped messages

use chrono::{Local, NaiveTime};

pub const MSG_INITIALIZED: &str = "System Initialized...";
pub const MSG_STARTING: &str = "Quantum Core Starting...";
pub const MSG_STOPPING: &str = "Quantum Core Stopping...";
pub const MSG_DIAGNOSTICS_RUNNING: &str = "Running System Diagnostics...";
pub const MSG_DIAGNOSTICS_COMPLETE: &str = "Diagnostics Complete: All Systems Nominal";

/// A single console line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogEntry {
    /// Wall-clock time of the message; `None` for the startup banner
    pub timestamp: Option<NaiveTime>,
    pub message: String,
}

impl LogEntry {
    /// Create an entry stamped with the current local time
    pub fn now(message: impl Into<String>) -> Self {
        Self::at(Local::now().time(), message)
    }

    pub fn at(timestamp: NaiveTime, message: impl Into<String>) -> Self {
        Self {
            timestamp: Some(timestamp),
            message: message.into(),
        }
    }

    pub fn untimestamped(message: impl Into<String>) -> Self {
        Self {
            timestamp: None,
            message: message.into(),
        }
    }
}

impl std::fmt::Display for LogEntry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.timestamp {
            Some(ts) => write!(f, "{}: {}", ts.format("%H:%M:%S"), self.message),
            None => f.write_str(&self.message),
        }
    }
}

/// Ordered, unbounded log. Entries are never removed or reordered.
#[derive(Debug, Clone, Default)]
pub struct ConsoleLog {
    entries: Vec<LogEntry>,
}

impl ConsoleLog {
    /// Log pre-seeded with the startup banner
    pub fn with_banner() -> Self {
        Self {
            entries: vec![LogEntry::untimestamped(MSG_INITIALIZED)],
        }
    }

    pub fn push(&mut self, entry: LogEntry) {
        self.entries.push(entry);
    }

    pub fn entries(&self) -> &[LogEntry] {
        &self.entries
    }
}

#[cfg(test)]
impl ConsoleLog {
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn last(&self) -> Option<&LogEntry> {
        self.entries.last()
    }

    /// Number of entries with exactly this message
    pub fn count(&self, message: &str) -> usize {
        self.entries.iter().filter(|e| e.message == message).count()
    }

    /// Number of entries whose message starts with `prefix`
    pub fn count_prefixed(&self, prefix: &str) -> usize {
        self.entries
            .iter()
            .filter(|e| e.message.starts_with(prefix))
            .count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn timestamped_entry_formats_as_hh_mm_ss() {
        let ts = NaiveTime::from_hms_opt(9, 5, 3).unwrap();
        let entry = LogEntry::at(ts, MSG_STARTING);
        assert_eq!(entry.to_string(), "09:05:03: Quantum Core Starting...");
    }

    #[test]
    fn banner_is_untimestamped() {
        let log = ConsoleLog::with_banner();
        assert_eq!(log.len(), 1);
        assert_eq!(log.entries()[0].timestamp, None);
        assert_eq!(log.entries()[0].to_string(), "System Initialized...");
    }

    #[test]
    fn entries_keep_insertion_order() {
        let mut log = ConsoleLog::default();
        for i in 0..5 {
            log.push(LogEntry::untimestamped(format!("line {}", i)));
        }
        let messages: Vec<_> = log.entries().iter().map(|e| e.message.as_str()).collect();
        assert_eq!(messages, ["line 0", "line 1", "line 2", "line 3", "line 4"]);
        assert_eq!(log.count_prefixed("line"), 5);
    }
}
