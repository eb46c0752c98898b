use serde::{Deserialize, Serialize};
use std::fs::{self, File};
use std::io::{BufWriter, Read, Write};
use std::path::{Path, PathBuf};
use tracing::{debug, error, info, warn};

use super::constraints;
use super::lock::RunLock;
use super::sink::{CommitReceipt, FactSink, FactSource};
use crate::engine::errors::PersistenceError;
use crate::engine::types::{FactTable, HourlyFact};
use crate::shared::config::ConstraintConfig;
use crate::shared::storage_header::{BinaryHeader, FileKind};

const TABLE_FILE: &str = "facts.bin";
const STAGING_FILE: &str = "facts.staging";
const LOCK_FILE: &str = "run.lock";
const GENERATION_FILE: &str = "facts.generation";
const GENERATION_STAGING: &str = "facts.generation.staging";
const FORMAT_VERSION: u16 = 1;

#[derive(Debug, Serialize, Deserialize)]
struct StoredTable {
    generation: u64,
    rows: Vec<HourlyFact>,
}

/// Fact table persisted as a single checksummed file under `root`.
///
/// A replace writes `facts.staging`, syncs it and renames it over
/// `facts.bin`, so a crash leaves either the old or the new table.
/// The generation counter lives in `facts.generation` and is bumped before
/// the table is swapped, so a generation number is never handed out twice.
/// Leftover staging files are only removed by the holder of the run lock.
#[derive(Debug, Clone)]
pub struct FileFactStore {
    root: PathBuf,
    constraints: ConstraintConfig,
}

impl FileFactStore {
    pub fn open(root: impl Into<PathBuf>, constraints: ConstraintConfig) -> Result<Self, PersistenceError> {
        let root = root.into();
        fs::create_dir_all(&root)?;
        Ok(Self { root, constraints })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn table_path(&self) -> PathBuf {
        self.root.join(TABLE_FILE)
    }

    /// Must only be called while holding the run lock.
    fn remove_stale_staging(&self) {
        for name in [STAGING_FILE, GENERATION_STAGING] {
            let staging = self.root.join(name);
            if !staging.exists() {
                continue;
            }
            warn!(target: "persist::file_store", ?staging, "Found leftover staging file, removing");
            if let Err(e) = fs::remove_file(&staging) {
                error!(target: "persist::file_store", ?staging, "Failed to remove staging file: {}", e);
            }
        }
    }

    fn read_generation_file(&self) -> Result<Option<u64>, PersistenceError> {
        let path = self.root.join(GENERATION_FILE);
        let content = match fs::read_to_string(&path) {
            Ok(c) => c,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };
        content.trim().parse::<u64>().map(Some).map_err(|e| {
            PersistenceError::Corrupt(format!("{}: {}", path.display(), e))
        })
    }

    fn write_generation_file(&self, generation: u64) -> Result<(), PersistenceError> {
        let staging = self.root.join(GENERATION_STAGING);
        let mut file = File::create(&staging)?;
        writeln!(file, "{generation}")?;
        file.sync_all()?;
        drop(file);
        fs::rename(&staging, self.root.join(GENERATION_FILE))?;
        Ok(())
    }

    /// Generation the next commit builds on. Unreadable previous state never
    /// blocks a replace.
    fn previous_generation(&self) -> u64 {
        let err = match self.generation() {
            Ok(generation) => return generation,
            Err(e) => e,
        };
        warn!(target: "persist::file_store", path = %self.root.display(), "Generation file unreadable: {}", err);
        match self.read_stored() {
            Ok(stored) => stored.map_or(0, |s| s.generation),
            Err(e) => {
                warn!(
                    target: "persist::file_store",
                    path = %self.table_path().display(),
                    "Previous table unreadable, restarting generations at 0: {}",
                    e
                );
                0
            }
        }
    }

    fn read_stored(&self) -> Result<Option<StoredTable>, PersistenceError> {
        let path = self.table_path();
        let mut file = match File::open(&path) {
            Ok(f) => f,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };

        let header = BinaryHeader::read_from(&mut file)
            .map_err(|e| PersistenceError::Header(e.to_string()))?;
        header
            .expect(FileKind::FactTable, FORMAT_VERSION)
            .map_err(|e| PersistenceError::Header(e.to_string()))?;

        let mut body = Vec::with_capacity(header.body_len as usize);
        file.read_to_end(&mut body)?;
        header
            .verify_body(&body)
            .map_err(|e| PersistenceError::Corrupt(format!("{}: {}", path.display(), e)))?;

        let stored: StoredTable = bincode::deserialize(&body)?;
        Ok(Some(stored))
    }

    fn write_staged(&self, stored: &StoredTable) -> Result<(), PersistenceError> {
        let path = self.table_path();
        let staging = self.root.join(STAGING_FILE);

        let body = bincode::serialize(stored)?;
        let header = BinaryHeader::seal(FileKind::FactTable.magic(), FORMAT_VERSION, &body);

        let file = File::create(&staging)?;
        let mut writer = BufWriter::new(file);
        header.write_to(&mut writer)?;
        writer.write_all(&body)?;
        writer.flush()?;
        writer.get_ref().sync_all()?;
        drop(writer);

        fs::rename(&staging, &path)?;

        if let Ok(dir) = File::open(&self.root) {
            let _ = dir.sync_all();
        }
        Ok(())
    }
}

impl FactSink for FileFactStore {
    fn acquire_run_lock(&self) -> Result<RunLock, PersistenceError> {
        let lock = RunLock::acquire_file(&self.root.join(LOCK_FILE))?;
        self.remove_stale_staging();
        Ok(lock)
    }

    fn replace_all(&self, table: &FactTable) -> Result<CommitReceipt, PersistenceError> {
        constraints::check(table, &self.constraints)?;

        let stored = StoredTable {
            generation: self.previous_generation() + 1,
            rows: table.rows().to_vec(),
        };
        self.write_generation_file(stored.generation)?;
        self.write_staged(&stored)?;

        info!(
            target: "persist::file_store",
            generation = stored.generation,
            rows = stored.rows.len(),
            path = %self.table_path().display(),
            "Replaced fact table"
        );
        Ok(CommitReceipt {
            generation: stored.generation,
            rows: stored.rows.len(),
        })
    }
}

impl FactSource for FileFactStore {
    fn load(&self) -> Result<FactTable, PersistenceError> {
        match self.read_stored()? {
            Some(stored) => {
                debug!(target: "persist::file_store", generation = stored.generation, rows = stored.rows.len(), "Loaded fact table");
                Ok(FactTable::new(stored.rows))
            }
            None => Ok(FactTable::default()),
        }
    }

    fn generation(&self) -> Result<u64, PersistenceError> {
        match self.read_generation_file()? {
            Some(generation) => Ok(generation),
            None => Ok(self.read_stored()?.map_or(0, |s| s.generation)),
        }
    }
}
