pub mod clear;
pub mod fill;

use crate::error::{DiskFillError, Result};
use std::io;
use std::path::Path;

/// Current on-disk length of `path`; an absent file counts as zero bytes.
pub(crate) fn file_len(path: &Path) -> Result<u64> {
    match std::fs::metadata(path) {
        Ok(meta) => Ok(meta.len()),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(0),
        Err(source) => Err(DiskFillError::Stat { path: path.to_path_buf(), source }),
    }
}
