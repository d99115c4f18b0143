//! Fill: grow the temp file until only the headroom is left free.
//!
//! The file is built from fixed-size zeroed chunks so the full target size is
//! never held in memory. A single chunk buffer is allocated and reused.

use crate::collectors::space::SpaceProbe;
use crate::error::{DiskFillError, Result};
use crate::models::status::StatusRecord;
use crate::ops::file_len;
use std::fs::{self, File};
use std::io::{self, Write};
use std::path::Path;
use tracing::{debug, info, warn};

/// Bytes left unconsumed so the filesystem never reaches literal zero.
pub const HEADROOM: u64 = 100 * 1024 * 1024;

/// Size of each zeroed buffer written to the temp file.
pub const CHUNK_SIZE: u64 = 100 * 1024 * 1024;

/// How a target size is split into whole chunks plus a tail.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FillPlan {
    pub target:    u64,
    pub chunks:    u64,
    pub remainder: u64,
}

impl FillPlan {
    /// Plan for the fixed headroom and chunk size.
    /// `None` when `available` is already below the headroom.
    pub fn for_available(available: u64) -> Option<Self> {
        Sizing::FIXED.plan(available)
    }
}

#[derive(Debug, Clone, Copy)]
pub(crate) struct Sizing {
    pub(crate) headroom: u64,
    pub(crate) chunk:    u64,
}

impl Sizing {
    pub(crate) const FIXED: Sizing = Sizing { headroom: HEADROOM, chunk: CHUNK_SIZE };

    pub(crate) fn plan(&self, available: u64) -> Option<FillPlan> {
        let target = available.checked_sub(self.headroom)?;
        Some(FillPlan {
            target,
            chunks:    target / self.chunk,
            remainder: target % self.chunk,
        })
    }
}

/// Consume all free space except [`HEADROOM`] with the file at `path`.
///
/// On success returns the re-probed record with `temp_file_size` set to the
/// written length. On any error `current` stays valid and no partial file is
/// left behind; [`DiskFillError::InsufficientSpace`] writes nothing at all.
pub fn fill(probe: &dyn SpaceProbe, path: &Path, current: StatusRecord) -> Result<StatusRecord> {
    fill_with(probe, path, current, Sizing::FIXED)
}

pub(crate) fn fill_with(
    probe: &dyn SpaceProbe,
    path: &Path,
    current: StatusRecord,
    sizing: Sizing,
) -> Result<StatusRecord> {
    let available = probe.available_space()?;
    let plan = match sizing.plan(available) {
        Some(plan) => plan,
        None => {
            warn!(available, headroom = sizing.headroom, "not enough disk space to fill");
            return Err(DiskFillError::InsufficientSpace { available, headroom: sizing.headroom });
        }
    };

    info!(
        available,
        target    = plan.target,
        chunk     = sizing.chunk,
        chunks    = plan.chunks,
        remainder = plan.remainder,
        "filling {}", path.display()
    );

    if let Err(source) = write_plan(path, &plan, sizing.chunk) {
        discard(path);
        return Err(DiskFillError::Write { path: path.to_path_buf(), source });
    }

    let written = match file_len(path) {
        Ok(len) => len,
        Err(e) => {
            discard(path);
            return Err(e);
        }
    };
    if written != plan.target {
        discard(path);
        return Err(DiskFillError::SizeMismatch { expected: plan.target, actual: written });
    }

    // A file the record does not account for must not outlive a failed reading.
    let available_after = match probe.available_space() {
        Ok(v) => v,
        Err(e) => {
            discard(path);
            return Err(e);
        }
    };

    info!(temp_file_size = written, available = available_after, "fill finished");
    Ok(current.with_available(available_after).with_temp_file_size(written))
}

fn write_plan(path: &Path, plan: &FillPlan, chunk: u64) -> io::Result<()> {
    let mut file = File::create(path)?;

    let buf_len = if plan.chunks > 0 { chunk } else { plan.remainder };
    let buf = vec![0u8; buf_len as usize];

    for i in 0..plan.chunks {
        file.write_all(&buf)?;
        debug!(chunk = i, "wrote chunk");
    }
    file.write_all(&buf[..plan.remainder as usize])?;
    debug!(bytes = plan.remainder, "wrote remainder");

    file.sync_all()
}

fn discard(path: &Path) {
    match fs::remove_file(path) {
        Ok(()) => debug!("removed partial {}", path.display()),
        Err(e) if e.kind() == io::ErrorKind::NotFound => {}
        Err(e) => warn!(error = %e, "could not remove partial {}", path.display()),
    }
}
