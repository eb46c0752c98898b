use fs2::FileExt;
use std::fs::{File, OpenOptions};
use std::path::Path;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use tracing::{debug, warn};

use crate::engine::errors::PersistenceError;

/// RAII guard over the run lock. Released on drop.
#[derive(Debug)]
pub struct RunLock {
    inner: LockInner,
}

#[derive(Debug)]
enum LockInner {
    File(File),
    Flag(Arc<AtomicBool>),
}

impl RunLock {
    /// Exclusive advisory lock on `path`, created if missing. Never blocks.
    pub fn acquire_file(path: &Path) -> Result<Self, PersistenceError> {
        let file = OpenOptions::new()
            .read(true)
            .write(true)
            .create(true)
            .truncate(false)
            .open(path)?;
        file.try_lock_exclusive()
            .map_err(|e| PersistenceError::Locked(format!("{}: {}", path.display(), e)))?;
        debug!(target: "persist::lock", path = %path.display(), "Acquired run lock");
        Ok(Self {
            inner: LockInner::File(file),
        })
    }

    /// In-process lock backed by a shared flag.
    pub fn acquire_flag(flag: &Arc<AtomicBool>) -> Result<Self, PersistenceError> {
        if flag
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_err()
        {
            return Err(PersistenceError::Locked("in-memory store".into()));
        }
        Ok(Self {
            inner: LockInner::Flag(Arc::clone(flag)),
        })
    }
}

impl Drop for RunLock {
    fn drop(&mut self) {
        match &self.inner {
            LockInner::File(file) => {
                if let Err(e) = FileExt::unlock(file) {
                    warn!("Failed to release run lock: {}", e);
                }
            }
            LockInner::Flag(flag) => flag.store(false, Ordering::Release),
        }
    }
}
