use crate::core::counter_store::{next_or_fallback, CounterSource};
use crate::errors::AllocationError;
use log::debug;
use std::path::{Path, PathBuf};

pub const PNG_EXTENSION: &str = "png";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AllocatedName {
    pub filename: String,
    pub path: PathBuf,
}

/// Picks a path under `directory` that does not exist yet.
///
/// Names look like `<prefix>_<counter:05>_.png`; on collision a suffix is
/// appended, `<prefix>_<counter:05>_<suffix:02>.png`, and a fresh counter
/// value is drawn for every retry. Both fields are minimum widths, so the
/// suffix grows to three digits after 99 instead of wrapping.
#[derive(Debug, Clone)]
pub struct FilenameAllocator {
    max_attempts: u32,
}

impl FilenameAllocator {
    pub fn new(max_attempts: u32) -> Self {
        FilenameAllocator {
            max_attempts: max_attempts.max(1),
        }
    }

    pub fn allocate(
        &self,
        prefix: &str,
        directory: &Path,
        counter: &mut dyn CounterSource,
    ) -> Result<AllocatedName, AllocationError> {
        let mut filename = format_filename(prefix, next_or_fallback(counter), None);
        let mut path = directory.join(&filename);

        let mut suffix: u32 = 0;
        while path.exists() {
            suffix += 1;
            if suffix >= self.max_attempts {
                return Err(AllocationError::Exhausted {
                    prefix: prefix.to_string(),
                    directory: directory.to_path_buf(),
                    attempts: suffix,
                });
            }
            debug!("'{}' already exists, probing with suffix {:02}", path.display(), suffix);
            filename = format_filename(prefix, next_or_fallback(counter), Some(suffix));
            path = directory.join(&filename);
        }

        Ok(AllocatedName { filename, path })
    }
}

impl Default for FilenameAllocator {
    fn default() -> Self {
        FilenameAllocator::new(10_000)
    }
}

pub fn format_filename(prefix: &str, counter: u64, suffix: Option<u32>) -> String {
    match suffix {
        None => format!("{}_{:05}_.{}", prefix, counter, PNG_EXTENSION),
        Some(suffix) => format!("{}_{:05}_{:02}.{}", prefix, counter, suffix, PNG_EXTENSION),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::counter_store::FileCounter;
    use crate::errors::CounterError;
    use std::fs;
    use tempfile::tempdir;

    /// Hands out a fixed sequence, then repeats the last value.
    struct ScriptedCounter {
        values: Vec<u64>,
        calls: usize,
    }

    impl CounterSource for ScriptedCounter {
        fn next_value(&mut self) -> Result<u64, CounterError> {
            let idx = self.calls.min(self.values.len() - 1);
            self.calls += 1;
            Ok(self.values[idx])
        }
    }

    #[test]
    fn formats_counter_and_suffix_widths() {
        assert_eq!(format_filename("p", 1, None), "p_00001_.png");
        assert_eq!(format_filename("p", 42, Some(3)), "p_00042_03.png");
        assert_eq!(format_filename("p", 123456, Some(100)), "p_123456_100.png");
    }

    #[test]
    fn first_allocation_uses_counter_one() {
        let dir = tempdir().unwrap();
        let mut counter = FileCounter::in_directory(dir.path(), "counter.txt");
        let name = FilenameAllocator::default().allocate("img", dir.path(), &mut counter).unwrap();
        assert_eq!(name.filename, "img_00001_.png");
        assert_eq!(name.path, dir.path().join("img_00001_.png"));
    }

    #[test]
    fn collision_draws_new_counter_and_suffix() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("img_00001_.png"), b"taken").unwrap();
        let mut counter = FileCounter::in_directory(dir.path(), "counter.txt");

        let name = FilenameAllocator::default().allocate("img", dir.path(), &mut counter).unwrap();

        assert_eq!(name.filename, "img_00002_01.png");
        assert!(!name.path.exists());
        assert_eq!(counter.peek().unwrap(), 2);
    }

    #[test]
    fn repeated_collisions_keep_probing() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("x_00007_.png"), b"").unwrap();
        fs::write(dir.path().join("x_00007_01.png"), b"").unwrap();
        fs::write(dir.path().join("x_00007_02.png"), b"").unwrap();
        let mut counter = ScriptedCounter { values: vec![7], calls: 0 };

        let name = FilenameAllocator::default().allocate("x", dir.path(), &mut counter).unwrap();

        assert_eq!(name.filename, "x_00007_03.png");
        assert_eq!(counter.calls, 4);
    }

    #[test]
    fn gives_up_after_max_attempts() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("x_00005_.png"), b"").unwrap();
        fs::write(dir.path().join("x_00005_01.png"), b"").unwrap();
        fs::write(dir.path().join("x_00005_02.png"), b"").unwrap();
        let mut counter = ScriptedCounter { values: vec![5], calls: 0 };

        let result = FilenameAllocator::new(3).allocate("x", dir.path(), &mut counter);

        assert!(matches!(result, Err(AllocationError::Exhausted { attempts: 3, .. })));
    }
}
