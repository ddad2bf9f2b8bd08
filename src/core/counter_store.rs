use crate::common::timestamp_utils;
use crate::errors::CounterError;
use log::{debug, warn};
use std::fs;
use std::path::{Path, PathBuf};

/// Source of monotonically increasing counter values for filenames.
pub trait CounterSource {
    fn next_value(&mut self) -> Result<u64, CounterError>;
}

/// Counter persisted as a single decimal integer in a sidecar text file.
///
/// Every call to `next_value` is a read-increment-write. There is no lock:
/// concurrent writers sharing the file can observe the same value.
#[derive(Debug, Clone)]
pub struct FileCounter {
    path: PathBuf,
}

impl FileCounter {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        FileCounter { path: path.into() }
    }

    pub fn in_directory(directory: &Path, file_name: &str) -> Self {
        FileCounter::new(directory.join(file_name))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Current persisted value, without incrementing. Missing file reads as 0.
    pub fn peek(&self) -> Result<u64, CounterError> {
        let content = match fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(0),
            Err(source) => {
                return Err(CounterError::Read {
                    path: self.path.clone(),
                    source,
                })
            }
        };
        let trimmed = content.trim();
        trimmed.parse::<u64>().map_err(|_| CounterError::Corrupt {
            path: self.path.clone(),
            content: trimmed.to_string(),
        })
    }

    pub fn reset(&self) -> Result<(), CounterError> {
        self.store(0)
    }

    fn store(&self, value: u64) -> Result<(), CounterError> {
        fs::write(&self.path, value.to_string()).map_err(|source| CounterError::Write {
            path: self.path.clone(),
            source,
        })
    }
}

impl CounterSource for FileCounter {
    fn next_value(&mut self) -> Result<u64, CounterError> {
        let next = self.peek()?.saturating_add(1);
        self.store(next)?;
        debug!("Counter '{}' advanced to {}", self.path.display(), next);
        Ok(next)
    }
}

/// Next counter value, or a time-derived stand-in when the source fails.
pub fn next_or_fallback(source: &mut dyn CounterSource) -> u64 {
    match source.next_value() {
        Ok(value) => value,
        Err(e) => {
            let fallback = timestamp_utils::fallback_counter_value();
            warn!("⚠️ {}. Using time-derived counter {:05} instead.", e, fallback);
            fallback
        }
    }
}
