//! One fill/clear session: the temp file, its probe, the current status
//! snapshot and the Fill/Clear mode.
//!
//! Operations run on a worker thread and report back over a channel. The
//! session is the only writer of the snapshot and accepts one request at a
//! time; a request made while another is pending gets [`DiskFillError::Busy`].

use crate::collectors::space::{SpaceProbe, StatvfsProbe};
use crate::error::{DiskFillError, Result};
use crate::models::mode::Mode;
use crate::models::status::StatusRecord;
use crate::ops::{clear, file_len, fill};
use std::fs::{self, OpenOptions};
use std::path::{Path, PathBuf};
use std::sync::mpsc::{self, Receiver, TryRecvError};
use std::sync::Arc;
use tracing::{debug, info, warn};

struct Pending {
    mode: Mode,
    rx:   Receiver<Result<StatusRecord>>,
}

pub struct Session {
    path:    PathBuf,
    probe:   Arc<dyn SpaceProbe>,
    status:  StatusRecord,
    mode:    Mode,
    pending: Option<Pending>,
}

impl Session {
    /// Open a session on `dir/file_name`, probing with `statvfs` on `dir`.
    pub fn open(dir: &Path, file_name: &str) -> Result<Self> {
        fs::create_dir_all(dir).map_err(|source| DiskFillError::Write {
            path: dir.to_path_buf(),
            source,
        })?;
        Self::with_probe(dir.join(file_name), Arc::new(StatvfsProbe::new(dir)))
    }

    /// Open a session on `path` using any probe.
    ///
    /// A missing file is created empty as a placeholder. A leftover non-empty
    /// file from an earlier run is kept and accounted for, and the session
    /// starts in [`Mode::Clear`] so it can be released.
    pub fn with_probe(path: PathBuf, probe: Arc<dyn SpaceProbe>) -> Result<Self> {
        let status = StatusRecord::probe(probe.as_ref())?;

        OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(false)
            .open(&path)
            .map_err(|source| DiskFillError::Write { path: path.clone(), source })?;

        let existing = file_len(&path)?;
        let mode = if existing > 0 { Mode::Clear } else { Mode::Fill };
        if existing > 0 {
            info!(bytes = existing, "found leftover temp file {}", path.display());
        }

        Ok(Self {
            path,
            probe,
            status: status.with_temp_file_size(existing),
            mode,
            pending: None,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Latest published snapshot.
    pub fn status(&self) -> StatusRecord {
        self.status
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn is_busy(&self) -> bool {
        self.pending.is_some()
    }

    /// Start the operation for the current mode on a worker thread.
    pub fn request(&mut self) -> Result<()> {
        if self.pending.is_some() {
            debug!("request rejected, operation pending");
            return Err(DiskFillError::Busy);
        }

        let mode    = self.mode;
        let probe   = Arc::clone(&self.probe);
        let path    = self.path.clone();
        let current = self.status;
        let (tx, rx) = mpsc::channel();

        std::thread::spawn(move || {
            let result = match mode {
                Mode::Fill  => fill::fill(probe.as_ref(), &path, current),
                Mode::Clear => clear::clear(probe.as_ref(), &path, current),
            };
            let _ = tx.send(result);
        });

        info!(mode = mode.label(), "operation started");
        self.pending = Some(Pending { mode, rx });
        Ok(())
    }

    /// Apply a finished operation, if any, without blocking.
    pub fn poll(&mut self) -> Option<Result<StatusRecord>> {
        let pending = self.pending.as_ref()?;
        let result = match pending.rx.try_recv() {
            Ok(result) => result,
            Err(TryRecvError::Empty) => return None,
            Err(TryRecvError::Disconnected) => Err(DiskFillError::WorkerLost),
        };
        Some(self.apply(result))
    }

    /// Block until the pending operation finishes and apply it.
    /// `None` when nothing is pending.
    pub fn wait(&mut self) -> Option<Result<StatusRecord>> {
        let pending = self.pending.as_ref()?;
        let result = pending.rx.recv().unwrap_or(Err(DiskFillError::WorkerLost));
        Some(self.apply(result))
    }

    /// Run the operation for the current mode to completion.
    pub fn run(&mut self) -> Result<StatusRecord> {
        self.request()?;
        self.wait().unwrap_or(Err(DiskFillError::WorkerLost))
    }

    fn apply(&mut self, result: Result<StatusRecord>) -> Result<StatusRecord> {
        let Some(pending) = self.pending.take() else {
            return result;
        };
        match result {
            Ok(status) => {
                self.status = status;
                self.mode = pending.mode.next();
                info!(next = self.mode.label(), "operation succeeded");
                Ok(status)
            }
            Err(e) => {
                warn!(mode = pending.mode.label(), error = %e, "operation failed");
                Err(e)
            }
        }
    }
}
