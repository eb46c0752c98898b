use parking_lot::RwLock;
use std::sync::Arc;
use std::sync::atomic::AtomicBool;

use super::constraints;
use super::lock::RunLock;
use super::sink::{CommitReceipt, FactSink, FactSource};
use crate::engine::errors::PersistenceError;
use crate::engine::types::FactTable;
use crate::shared::config::ConstraintConfig;

#[derive(Debug, Default)]
struct Published {
    generation: u64,
    table: Arc<FactTable>,
}

/// Process-local destination. Swapping the `Arc` under the write lock is
/// the atomic replace.
#[derive(Debug, Clone, Default)]
pub struct MemoryFactStore {
    published: Arc<RwLock<Published>>,
    locked: Arc<AtomicBool>,
    constraints: ConstraintConfig,
}

impl MemoryFactStore {
    pub fn new(constraints: ConstraintConfig) -> Self {
        Self {
            constraints,
            ..Self::default()
        }
    }

    /// Current table without copying it.
    pub fn snapshot(&self) -> Arc<FactTable> {
        Arc::clone(&self.published.read().table)
    }
}

impl FactSink for MemoryFactStore {
    fn acquire_run_lock(&self) -> Result<RunLock, PersistenceError> {
        RunLock::acquire_flag(&self.locked)
    }

    fn replace_all(&self, table: &FactTable) -> Result<CommitReceipt, PersistenceError> {
        constraints::check(table, &self.constraints)?;

        let next = Arc::new(table.clone());
        let mut published = self.published.write();
        published.generation += 1;
        published.table = next;
        Ok(CommitReceipt {
            generation: published.generation,
            rows: published.table.len(),
        })
    }
}

impl FactSource for MemoryFactStore {
    fn load(&self) -> Result<FactTable, PersistenceError> {
        Ok(self.snapshot().as_ref().clone())
    }

    fn generation(&self) -> Result<u64, PersistenceError> {
        Ok(self.published.read().generation)
    }
}
