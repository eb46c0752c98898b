use serde::Serialize;
use std::fmt;

use crate::engine::ingest::Rejection;
use crate::engine::validate::ValidationReport;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RunStatus {
    Succeeded,
    /// Committed, but at least one check failed
    ValidationFailed,
}

impl fmt::Display for RunStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RunStatus::Succeeded => write!(f, "succeeded"),
            RunStatus::ValidationFailed => write!(f, "validation failed"),
        }
    }
}

/// Outcome of a committed run.
#[derive(Debug, Clone, Serialize)]
pub struct RunReport {
    pub run_id: String,
    pub generation: u64,
    pub rows_written: usize,
    pub rejected_rows: usize,
    pub rejections: Vec<Rejection>,
    pub validation: ValidationReport,
    pub status: RunStatus,
}

impl RunReport {
    pub fn is_success(&self) -> bool {
        self.status == RunStatus::Succeeded
    }
}

impl fmt::Display for RunReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "{}: {} (generation {}, {} rows written, {} rows rejected)",
            self.run_id, self.status, self.generation, self.rows_written, self.rejected_rows
        )?;
        for rejection in &self.rejections {
            writeln!(
                f,
                "  rejected {} row {}: {}",
                rejection.stream, rejection.row, rejection.reason
            )?;
        }
        write!(f, "{}", self.validation)
    }
}
