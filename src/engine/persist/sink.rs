use serde::Serialize;

use super::lock::RunLock;
use crate::engine::errors::PersistenceError;
use crate::engine::types::FactTable;

/// Result of a committed replace.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CommitReceipt {
    /// Bumped once per successful replace; 0 means nothing was ever written
    pub generation: u64,
    pub rows: usize,
}

/// Destination of the fact table.
///
/// `replace_all` publishes the whole table or nothing: readers observe either
/// the previous table or the new one.
pub trait FactSink: Send + Sync {
    /// Exclusive right to run the pipeline against this destination.
    fn acquire_run_lock(&self) -> Result<RunLock, PersistenceError>;

    fn replace_all(&self, table: &FactTable) -> Result<CommitReceipt, PersistenceError>;
}

/// Read side of the destination, used for re-validation and display.
pub trait FactSource: Send + Sync {
    fn load(&self) -> Result<FactTable, PersistenceError>;

    fn generation(&self) -> Result<u64, PersistenceError>;
}
