use time::OffsetDateTime;

use super::ids::EntryId;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Severity {
    Info,
    Success,
    Error,
    Warning,
}

impl Severity {
    pub fn as_str(self) -> &'static str {
        match self {
            Severity::Info => "info",
            Severity::Success => "success",
            Severity::Error => "error",
            Severity::Warning => "warning",
        }
    }
}

#[derive(Clone, Debug)]
pub struct LogEntry {
    pub id: EntryId,
    pub created_at: OffsetDateTime,
    pub severity: Severity,
    pub message: String,
}

impl LogEntry {
    pub fn new(severity: Severity, message: impl Into<String>) -> Self {
        Self {
            id: EntryId::random(),
            created_at: OffsetDateTime::now_utc(),
            severity,
            message: message.into(),
        }
    }
}

/// Anything that accepts activity-log entries.
pub trait LogSink {
    fn log(&mut self, severity: Severity, message: String);

    fn info(&mut self, message: impl Into<String>)
    where
        Self: Sized,
    {
        self.log(Severity::Info, message.into());
    }

    fn success(&mut self, message: impl Into<String>)
    where
        Self: Sized,
    {
        self.log(Severity::Success, message.into());
    }

    fn error(&mut self, message: impl Into<String>)
    where
        Self: Sized,
    {
        self.log(Severity::Error, message.into());
    }

    fn warning(&mut self, message: impl Into<String>)
    where
        Self: Sized,
    {
        self.log(Severity::Warning, message.into());
    }
}

/// Append-only session log; only `clear` removes entries.
#[derive(Clone, Debug, Default)]
pub struct ActivityLog {
    entries: Vec<LogEntry>,
}

impl ActivityLog {
    pub fn push(&mut self, entry: LogEntry) {
        self.entries.push(entry);
    }

    pub fn entries(&self) -> &[LogEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn last(&self) -> Option<&LogEntry> {
        self.entries.last()
    }
}

impl LogSink for ActivityLog {
    fn log(&mut self, severity: Severity, message: String) {
        self.push(LogEntry::new(severity, message));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clear_then_append_starts_from_empty() {
        let mut log = ActivityLog::default();
        log.info("one");
        log.error("two");
        assert_eq!(log.len(), 2);

        log.clear();
        assert!(log.is_empty());

        log.success("three");
        assert_eq!(log.len(), 1);
        assert_eq!(log.entries()[0].message, "three");
        assert_eq!(log.entries()[0].severity, Severity::Success);
    }
}
