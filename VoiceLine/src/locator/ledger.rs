//! Missing voice file ledger
//!
//! Every distinct missing file name is written to an append-only text log
//! once per process, so voice actors (or a TTS batch job) get a to-do list
//! of exactly the files the game asked for.

use std::collections::HashSet;
use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};

/// Default log file name inside the voice folder
pub const MISSING_LOG_NAME: &str = "_MISSING_FILES.txt";

/// Set of already-reported missing files plus the log they are written to
#[derive(Debug, Default)]
pub struct MissingFileLedger {
    /// File names reported so far in this process
    reported: HashSet<String>,
    /// Append-only log; `None` keeps the ledger in memory only
    log_path: Option<PathBuf>,
}

impl MissingFileLedger {
    /// A ledger that only tracks names in memory
    #[must_use]
    pub fn in_memory() -> Self {
        Self::default()
    }

    /// Open a ledger backed by `log_path`, appending a session banner.
    ///
    /// Failing to write the banner is not an error; the ledger still
    /// deduplicates and will keep trying to append later entries.
    pub fn open<P: AsRef<Path>>(log_path: P) -> Self {
        let ledger = Self {
            reported: HashSet::new(),
            log_path: Some(log_path.as_ref().to_path_buf()),
        };
        let now = chrono::Local::now().format("%Y-%m-%d %H:%M:%S");
        ledger.append(&format!("\n--- session start: {now} ---\n"));
        ledger
    }

    pub fn log_path(&self) -> Option<&Path> {
        self.log_path.as_deref()
    }

    /// Record a missing file; only the first report of a name is logged.
    ///
    /// Returns `true` if this was the first report.
    pub fn record(&mut self, file_name: &str, original_text: &str) -> bool {
        if !self.reported.insert(file_name.to_string()) {
            return false;
        }
        self.append(&format!("{file_name} | original: {original_text}\n"));
        true
    }

    pub fn contains(&self, file_name: &str) -> bool {
        self.reported.contains(file_name)
    }

    pub fn len(&self) -> usize {
        self.reported.len()
    }

    pub fn is_empty(&self) -> bool {
        self.reported.is_empty()
    }

    fn append(&self, line: &str) {
        let Some(path) = &self.log_path else {
            return;
        };
        let result = OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .and_then(|mut file| file.write_all(line.as_bytes()));
        if let Err(e) = result {
            tracing::debug!("Could not append to missing-file log {:?}: {}", path, e);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_in_memory_dedup() {
        let mut ledger = MissingFileLedger::in_memory();
        assert!(ledger.record("A_S1_0.wav", "Hello"));
        assert!(!ledger.record("A_S1_0.wav", "Hello"));
        assert!(ledger.record("A_S1_1.wav", "Bye"));
        assert_eq!(ledger.len(), 2);
        assert!(ledger.contains("A_S1_0.wav"));
        assert!(ledger.log_path().is_none());
    }

    #[test]
    fn test_log_written_once_per_name() {
        let dir = tempfile::tempdir().unwrap();
        let log = dir.path().join(MISSING_LOG_NAME);

        let mut ledger = MissingFileLedger::open(&log);
        for _ in 0..5 {
            ledger.record("Angela_Day1_intro_0.wav", "Good morning, manager.");
        }
        ledger.record("Angela_Common_-427590115.wav", "Good morning, manager.");

        let content = std::fs::read_to_string(&log).unwrap();
        assert!(content.starts_with("\n--- session start: "));
        assert_eq!(content.matches("Angela_Day1_intro_0.wav | original: ").count(), 1);
        assert!(content.ends_with("Angela_Common_-427590115.wav | original: Good morning, manager.\n"));
    }

    #[test]
    fn test_log_grows_across_sessions() {
        let dir = tempfile::tempdir().unwrap();
        let log = dir.path().join(MISSING_LOG_NAME);

        MissingFileLedger::open(&log).record("x.wav", "x");
        // A new process starts with an empty set, so the name is logged again
        MissingFileLedger::open(&log).record("x.wav", "x");

        let content = std::fs::read_to_string(&log).unwrap();
        assert_eq!(content.matches("--- session start: ").count(), 2);
        assert_eq!(content.matches("x.wav | original: x\n").count(), 2);
    }

    #[test]
    fn test_unwritable_log_is_ignored() {
        let dir = tempfile::tempdir().unwrap();
        // Parent directory does not exist, so every append fails
        let log = dir.path().join("missing_dir").join(MISSING_LOG_NAME);
        let mut ledger = MissingFileLedger::open(&log);
        assert!(ledger.record("a.wav", "a"));
        assert!(!ledger.record("a.wav", "a"));
        assert!(!log.exists());
    }
}
