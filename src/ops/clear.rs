use crate::collectors::space::SpaceProbe;
use crate::error::{DiskFillError, Result};
use crate::models::status::StatusRecord;
use crate::ops::file_len;
use std::fs;
use std::io;
use std::path::Path;
use tracing::{debug, info};

/// Delete the temp file and hand its space back to the filesystem.
///
/// An already absent file is not an error, so clearing twice is a no-op.
///
/// If the delete succeeds but reading the free space afterwards fails, that
/// error is returned and the caller's record still shows the old
/// `temp_file_size` even though the file is gone. Running clear again settles it to zero.
pub fn clear(probe: &dyn SpaceProbe, path: &Path, current: StatusRecord) -> Result<StatusRecord> {
    match fs::remove_file(path) {
        Ok(()) => debug!("deleted {}", path.display()),
        Err(e) if e.kind() == io::ErrorKind::NotFound => debug!("{} already absent", path.display()),
        Err(source) => return Err(DiskFillError::Delete { path: path.to_path_buf(), source }),
    }

    let available = probe.available_space()?;
    let temp_file_size = file_len(path)?;

    info!(available, temp_file_size, "clear finished");
    Ok(current.with_available(available).with_temp_file_size(temp_file_size))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::collectors::space::testing::ScriptedProbe;
    use tempfile::TempDir;

    fn filled(size: u64) -> StatusRecord {
        StatusRecord { total_disk_space: 100_000, available_disk_space: 1_000, temp_file_size: size }
    }

    #[test]
    fn clear_removes_file_and_resets_size() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("clear.tmp");
        fs::write(&path, vec![0u8; 4_000]).unwrap();
        let probe = ScriptedProbe::new(100_000, &[5_000]);

        let rec = clear(&probe, &path, filled(4_000)).unwrap();

        assert!(!path.exists());
        assert_eq!(rec.temp_file_size, 0);
        assert_eq!(rec.available_disk_space, 5_000);
        assert_eq!(rec.total_disk_space, 100_000);
    }

    #[test]
    fn clear_twice_is_a_no_op() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("clear.tmp");
        fs::write(&path, b"x").unwrap();
        let probe = ScriptedProbe::new(100_000, &[5_000]);

        let first = clear(&probe, &path, filled(1)).unwrap();
        let second = clear(&probe, &path, first).unwrap();
        assert_eq!(first, second);
        assert!(!path.exists());
    }

    #[test]
    fn clear_treats_empty_placeholder_like_absent() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("clear.tmp");
        fs::File::create(&path).unwrap();
        let probe = ScriptedProbe::new(100_000, &[5_000]);

        let rec = clear(&probe, &path, filled(0)).unwrap();
        assert!(!path.exists());
        assert_eq!(rec.temp_file_size, 0);
    }

    #[test]
    fn delete_failure_is_typed() {
        let dir = TempDir::new().unwrap();
        // A directory cannot be removed with remove_file.
        let path = dir.path().join("not-a-file");
        fs::create_dir(&path).unwrap();
        let probe = ScriptedProbe::new(100_000, &[5_000]);

        let err = clear(&probe, &path, filled(0)).unwrap_err();
        assert!(matches!(err, DiskFillError::Delete { .. }));
    }

    #[test]
    fn probe_failure_after_delete_is_reported() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("clear.tmp");
        let err = clear(&ScriptedProbe::failing(), &path, filled(0)).unwrap_err();
        assert!(matches!(err, DiskFillError::Probe { .. }));
    }

    #[test]
    fn failed_reading_after_delete_leaves_file_gone() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("clear.tmp");
        fs::write(&path, vec![0u8; 4_000]).unwrap();

        let err = clear(&ScriptedProbe::failing(), &path, filled(4_000)).unwrap_err();
        assert!(matches!(err, DiskFillError::Probe { .. }));
        assert!(!path.exists());

        // The caller's stale record is settled by clearing again.
        let rec = clear(&ScriptedProbe::new(100_000, &[5_000]), &path, filled(4_000)).unwrap();
        assert_eq!(rec.temp_file_size, 0);
    }
}
