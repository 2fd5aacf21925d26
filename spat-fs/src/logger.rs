//! Logging abstraction.
//!
//! The write gate reports what it deleted and what it skipped through a
//! [`Logger`] passed in by the caller, so tests can assert on the messages and
//! hosts can route them to stderr, to the `log` facade, or nowhere.

use std::io::Write;
use std::sync::{Arc, RwLock};

/// Verbosity level for logging.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Verbosity {
    /// Always shown
    Normal,
    /// -v
    Verbose,
    /// -vv
    Debug,
}

impl Verbosity {
    /// Create verbosity from a CLI flag count.
    pub fn from_count(count: u8) -> Self {
        match count {
            0 => Verbosity::Normal,
            1 => Verbosity::Verbose,
            _ => Verbosity::Debug,
        }
    }
}

/// Trait for logging output.
pub trait Logger: Send + Sync {
    /// Log a message at the given verbosity level.
    fn log(&self, level: Verbosity, message: &str);

    fn info(&self, message: &str) {
        self.log(Verbosity::Normal, message);
    }

    fn verbose(&self, message: &str) {
        self.log(Verbosity::Verbose, message);
    }

    fn debug(&self, message: &str) {
        self.log(Verbosity::Debug, message);
    }
}

/// Logger that writes to stderr, dropping messages above its level.
#[derive(Debug)]
pub struct StderrLogger {
    level: Verbosity,
}

impl StderrLogger {
    pub fn new(level: Verbosity) -> Self {
        Self { level }
    }
}

impl Logger for StderrLogger {
    fn log(&self, level: Verbosity, message: &str) {
        if level <= self.level {
            let _ = writeln!(std::io::stderr(), "{}", message);
        }
    }
}

/// Logger that forwards to the `log` crate under the `spat_fs` target.
///
/// `Normal` maps to `info`, `Verbose` to `debug` and `Debug` to `trace`.
#[derive(Debug, Clone, Copy, Default)]
pub struct FacadeLogger;

impl Logger for FacadeLogger {
    fn log(&self, level: Verbosity, message: &str) {
        let level = match level {
            Verbosity::Normal => log::Level::Info,
            Verbosity::Verbose => log::Level::Debug,
            Verbosity::Debug => log::Level::Trace,
        };
        log::log!(target: "spat_fs", level, "{}", message);
    }
}

/// A captured log entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogEntry {
    pub level: Verbosity,
    pub message: String,
}

/// Mock logger for testing that captures every message regardless of level.
#[derive(Debug, Clone, Default)]
pub struct MockLogger {
    entries: Arc<RwLock<Vec<LogEntry>>>,
}

impl MockLogger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn entries(&self) -> Vec<LogEntry> {
        self.entries.read().unwrap().clone()
    }

    pub fn messages(&self) -> Vec<String> {
        self.entries().into_iter().map(|e| e.message).collect()
    }

    pub fn messages_at_level(&self, level: Verbosity) -> Vec<String> {
        self.entries()
            .into_iter()
            .filter(|e| e.level == level)
            .map(|e| e.message)
            .collect()
    }

    /// Check if any message contains the given substring.
    pub fn contains(&self, substring: &str) -> bool {
        self.entries().iter().any(|e| e.message.contains(substring))
    }

    pub fn count(&self) -> usize {
        self.entries.read().unwrap().len()
    }
}

impl Logger for MockLogger {
    fn log(&self, level: Verbosity, message: &str) {
        self.entries.write().unwrap().push(LogEntry {
            level,
            message: message.to_string(),
        });
    }
}

/// A no-op logger that discards all messages.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullLogger;

impl Logger for NullLogger {
    fn log(&self, _level: Verbosity, _message: &str) {}
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_verbosity_ordering() {
        assert!(Verbosity::Normal < Verbosity::Verbose);
        assert!(Verbosity::Verbose < Verbosity::Debug);
    }

    #[test]
    fn test_verbosity_from_count() {
        assert_eq!(Verbosity::from_count(0), Verbosity::Normal);
        assert_eq!(Verbosity::from_count(1), Verbosity::Verbose);
        assert_eq!(Verbosity::from_count(2), Verbosity::Debug);
        assert_eq!(Verbosity::from_count(255), Verbosity::Debug);
    }

    #[test]
    fn test_mock_logger_captures_all_levels() {
        let logger = MockLogger::new();
        logger.info("normal");
        logger.verbose("verbose");
        logger.debug("debug");

        let entries = logger.entries();
        assert_eq!(entries.len(), 3);
        assert_eq!(entries[0].level, Verbosity::Normal);
        assert_eq!(entries[1].level, Verbosity::Verbose);
        assert_eq!(entries[2].level, Verbosity::Debug);
    }

    #[test]
    fn test_mock_logger_messages_at_level() {
        let logger = MockLogger::new();
        logger.info("info1");
        logger.verbose("verbose1");
        logger.info("info2");

        assert_eq!(logger.messages_at_level(Verbosity::Verbose), vec!["verbose1"]);
        assert_eq!(logger.messages(), vec!["info1", "verbose1", "info2"]);
    }

    #[test]
    fn test_mock_logger_contains() {
        let logger = MockLogger::new();
        logger.info("removed sidecar out.tif.json");

        assert!(logger.contains("sidecar"));
        assert!(!logger.contains("overwrote"));
    }

    #[test]
    fn test_mock_logger_clone_shares_entries() {
        let logger = MockLogger::new();
        let other = logger.clone();

        logger.info("one");
        other.info("two");

        assert_eq!(logger.count(), 2);
        assert_eq!(other.count(), 2);
    }

    #[test]
    fn test_stderr_logger_debug_format() {
        let logger = StderrLogger::new(Verbosity::Verbose);
        assert_eq!(format!("{:?}", logger), "StderrLogger { level: Verbose }");
        logger.debug("filtered out");
    }

    #[test]
    fn test_facade_and_null_loggers_accept_messages() {
        let loggers: Vec<Box<dyn Logger>> = vec![Box::new(FacadeLogger), Box::new(NullLogger)];
        for logger in &loggers {
            logger.info("a");
            logger.verbose("b");
            logger.debug("c");
        }
    }
}
