//! Per-call transformation log.
//!
//! Every call to [`crate::transform`] builds its own [`TransformLog`] and
//! hands the entries back in the result, so two concurrent transformations
//! never see each other's messages. Each entry is also mirrored to
//! `tracing` for whoever installed a subscriber.

use serde::Serialize;

/// Severity of a log entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Info,
    Success,
    Warning,
    Error,
}

/// A single log entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LogEntry {
    pub level: LogLevel,
    pub message: String,
}

impl LogEntry {
    pub fn info(message: impl Into<String>) -> Self {
        Self { level: LogLevel::Info, message: message.into() }
    }

    pub fn success(message: impl Into<String>) -> Self {
        Self { level: LogLevel::Success, message: message.into() }
    }

    pub fn warning(message: impl Into<String>) -> Self {
        Self { level: LogLevel::Warning, message: message.into() }
    }

    pub fn is_warning(&self) -> bool {
        self.level == LogLevel::Warning
    }
}

/// Accumulator threaded through one transformation.
#[derive(Debug, Default)]
pub struct TransformLog {
    entries: Vec<LogEntry>,
}

impl TransformLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, entry: LogEntry) {
        match entry.level {
            LogLevel::Info | LogLevel::Success => tracing::info!("{}", entry.message),
            LogLevel::Warning => tracing::warn!("{}", entry.message),
            LogLevel::Error => tracing::error!("{}", entry.message),
        }
        self.entries.push(entry);
    }

    pub fn info(&mut self, msg: impl Into<String>) {
        self.push(LogEntry::info(msg));
    }

    pub fn success(&mut self, msg: impl Into<String>) {
        self.push(LogEntry::success(msg));
    }

    pub fn warning(&mut self, msg: impl Into<String>) {
        self.push(LogEntry::warning(msg));
    }

    pub fn entries(&self) -> &[LogEntry] {
        &self.entries
    }

    /// Messages of warning-level entries, in the order they were raised.
    pub fn warnings(&self) -> impl Iterator<Item = &str> {
        warning_messages(&self.entries)
    }

    pub fn into_entries(self) -> Vec<LogEntry> {
        self.entries
    }
}

pub(crate) fn warning_messages(entries: &[LogEntry]) -> impl Iterator<Item = &str> {
    entries.iter().filter(|e| e.is_warning()).map(|e| e.message.as_str())
}
