use chrono::NaiveDateTime;
use std::fmt;
use std::io;
use thiserror::Error;
use tracing::{debug, error};

use crate::engine::persist::ConstraintViolation;
use crate::shared::datetime::format_canonical;

/// Failures reading or decoding raw input files.
#[derive(Debug, Error)]
pub enum IngestError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("Failed to parse JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Failed to parse JSON on line {line}: {source}")]
    JsonLine {
        line: usize,
        source: serde_json::Error,
    },

    #[error("Invalid ingest configuration: {0}")]
    Config(String),
}

/// Several spin rows resolved to the same (hour, user_id).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyConflict {
    pub hour: NaiveDateTime,
    pub user_id: String,
    pub countries: Vec<String>,
}

impl fmt::Display for KeyConflict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "({}, {}) has {} spin rows [{}]",
            format_canonical(self.hour),
            self.user_id,
            self.countries.len(),
            self.countries.join(", ")
        )
    }
}

#[derive(Debug, Error)]
pub enum TransformError {
    #[error("Conflicting spin rows for {} key(s): {}", .0.len(), join_display(.0))]
    KeyConflict(Vec<KeyConflict>),
}

#[derive(Debug, Error)]
pub enum PersistenceError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("Serialization error: {0}")]
    Serialize(#[from] bincode::Error),

    #[error("Invalid storage header: {0}")]
    Header(String),

    #[error("Destination rejected the table with {} constraint violation(s): {}", .0.len(), join_display(.0))]
    ConstraintViolation(Vec<ConstraintViolation>),

    #[error("Another run holds the lock: {0}")]
    Locked(String),

    #[error("Stored table is corrupt: {0}")]
    Corrupt(String),
}

/// Anything that aborts a run. Validation failures are not errors; they are
/// reported on the run report.
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("Ingest failed: {0}")]
    Ingest(#[from] IngestError),

    #[error("Transform failed: {0}")]
    Transform(#[from] TransformError),

    #[error("Persistence failed: {0}")]
    Persistence(#[from] PersistenceError),
}

impl PipelineError {
    pub fn log_error(&self) {
        match self {
            PipelineError::Ingest(e) => {
                error!("Ingest failed: {}", e);
                debug!("Ingest error details: {:?}", e);
            }
            PipelineError::Transform(e) => {
                error!("Transform failed, nothing was written: {}", e);
                debug!("Transform error details: {:?}", e);
            }
            PipelineError::Persistence(e) => {
                error!("Persistence failed, previous table left in place: {}", e);
                debug!("Persistence error details: {:?}", e);
            }
        }
    }
}

fn join_display<T: fmt::Display>(items: &[T]) -> String {
    const SHOWN: usize = 5;
    let mut out = items
        .iter()
        .take(SHOWN)
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ");
    if items.len() > SHOWN {
        out.push_str(&format!("; and {} more", items.len() - SHOWN));
    }
    out
}
