use crate::collectors::space::SpaceProbe;
use crate::error::Result;
use serde::Serialize;
use std::fmt;

/// One immutable snapshot of disk usage as last probed.
///
/// `available_disk_space` is whatever the probe said at the time; it is not
/// tracked live. Operations never mutate a record, they return a new one.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct StatusRecord {
    pub total_disk_space:     u64,
    pub available_disk_space: u64,
    pub temp_file_size:       u64,
}

impl StatusRecord {
    /// Fresh record from a live probe, with no temp file accounted for yet.
    pub fn probe(probe: &dyn SpaceProbe) -> Result<Self> {
        Ok(Self {
            total_disk_space:     probe.total_space()?,
            available_disk_space: probe.available_space()?,
            temp_file_size:       0,
        })
    }

    pub fn with_available(self, available_disk_space: u64) -> Self {
        Self { available_disk_space, ..self }
    }

    pub fn with_temp_file_size(self, temp_file_size: u64) -> Self {
        Self { temp_file_size, ..self }
    }

    /// Share of the filesystem currently held by the temp file, 0–100.
    pub fn temp_pct(&self) -> f64 {
        if self.total_disk_space == 0 { return 0.0; }
        self.temp_file_size as f64 / self.total_disk_space as f64 * 100.0
    }

    pub fn use_pct(&self) -> f64 {
        if self.total_disk_space == 0 { return 0.0; }
        self.total_disk_space.saturating_sub(self.available_disk_space) as f64
            / self.total_disk_space as f64 * 100.0
    }
}

impl fmt::Display for StatusRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Total Disk Space={}", self.total_disk_space)?;
        writeln!(f, "Available Disk Space={}", self.available_disk_space)?;
        writeln!(f, "Temp File Size={}", self.temp_file_size)
    }
}
