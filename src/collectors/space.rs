use crate::error::{DiskFillError, Result};
use std::path::{Path, PathBuf};

/// Point-in-time capacity of the filesystem holding the temp file.
pub trait SpaceProbe: Send + Sync {
    fn total_space(&self) -> Result<u64>;
    fn available_space(&self) -> Result<u64>;
}

/// Reads capacity with `statvfs` on a directory.
#[derive(Debug, Clone)]
pub struct StatvfsProbe {
    dir: PathBuf,
}

impl StatvfsProbe {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn stat(&self) -> Result<nix::sys::statvfs::Statvfs> {
        nix::sys::statvfs::statvfs(&self.dir).map_err(|errno| DiskFillError::Probe {
            path:   self.dir.clone(),
            source: errno.into(),
        })
    }
}

impl SpaceProbe for StatvfsProbe {
    fn total_space(&self) -> Result<u64> {
        let stat = self.stat()?;
        Ok(stat.blocks() as u64 * stat.fragment_size() as u64)
    }

    // Blocks available to unprivileged writers, not raw free blocks: the
    // reserved root blocks can never be filled by us.
    fn available_space(&self) -> Result<u64> {
        let stat = self.stat()?;
        Ok(stat.blocks_available() as u64 * stat.fragment_size() as u64)
    }
}

#[cfg(test)]
pub(crate) mod testing {
    use super::*;
    use std::collections::VecDeque;
    use std::io;
    use std::sync::Mutex;

    /// Replays a list of `available` readings; the last one repeats forever.
    /// With `fail_after`, every `available` reading past that count errors.
    pub(crate) struct ScriptedProbe {
        total:      u64,
        available:  Mutex<VecDeque<u64>>,
        failing:    bool,
        fail_after: Option<usize>,
        reads:      Mutex<usize>,
    }

    impl ScriptedProbe {
        pub(crate) fn new(total: u64, available: &[u64]) -> Self {
            Self {
                total,
                available:  Mutex::new(available.iter().copied().collect()),
                failing:    false,
                fail_after: None,
                reads:      Mutex::new(0),
            }
        }

        pub(crate) fn failing() -> Self {
            Self { failing: true, ..Self::new(0, &[]) }
        }

        pub(crate) fn failing_after(total: u64, available: &[u64], readings: usize) -> Self {
            Self { fail_after: Some(readings), ..Self::new(total, available) }
        }

        fn fail(&self) -> DiskFillError {
            DiskFillError::Probe {
                path:   PathBuf::from("<scripted>"),
                source: io::Error::new(io::ErrorKind::Other, "probe offline"),
            }
        }
    }

    impl SpaceProbe for ScriptedProbe {
        fn total_space(&self) -> Result<u64> {
            if self.failing { return Err(self.fail()); }
            Ok(self.total)
        }

        fn available_space(&self) -> Result<u64> {
            if self.failing { return Err(self.fail()); }
            let mut reads = self.reads.lock().unwrap();
            if self.fail_after.is_some_and(|n| *reads >= n) { return Err(self.fail()); }
            *reads += 1;
            let mut queue = self.available.lock().unwrap();
            let value = if queue.len() > 1 { queue.pop_front() } else { queue.front().copied() };
            Ok(value.unwrap_or(0))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn statvfs_reports_consistent_capacity() {
        let dir = TempDir::new().unwrap();
        let probe = StatvfsProbe::new(dir.path());
        let total = probe.total_space().unwrap();
        let available = probe.available_space().unwrap();
        assert!(total > 0);
        assert!(available <= total);
    }

    #[test]
    fn statvfs_on_missing_directory_is_a_probe_error() {
        let dir = TempDir::new().unwrap();
        let probe = StatvfsProbe::new(dir.path().join("does/not/exist"));
        let err = probe.available_space().unwrap_err();
        assert!(matches!(err, DiskFillError::Probe { .. }));
    }

    #[test]
    fn scripted_probe_repeats_last_reading() {
        let probe = testing::ScriptedProbe::new(1_000, &[300, 200]);
        assert_eq!(probe.available_space().unwrap(), 300);
        assert_eq!(probe.available_space().unwrap(), 200);
        assert_eq!(probe.available_space().unwrap(), 200);
        assert_eq!(probe.total_space().unwrap(), 1_000);
    }

    #[test]
    fn scripted_readings_can_fail_after_a_count() {
        let probe = testing::ScriptedProbe::failing_after(1_000, &[300], 1);
        assert_eq!(probe.available_space().unwrap(), 300);
        assert!(matches!(probe.available_space(), Err(DiskFillError::Probe { .. })));
        assert_eq!(probe.total_space().unwrap(), 1_000);
    }
}
