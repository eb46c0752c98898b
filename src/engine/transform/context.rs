use chrono::{NaiveDateTime, Utc};
use std::sync::Arc;

use crate::engine::ingest::NormalizedBatch;
use crate::engine::types::{PurchaseRecord, SpinRecord};

/// Immutable inputs of one run, threaded through every stage.
#[derive(Debug, Clone)]
pub struct PipelineContext {
    run_id: String,
    started_at: NaiveDateTime,
    spins: Arc<[SpinRecord]>,
    purchases: Arc<[PurchaseRecord]>,
    rejected_rows: usize,
}

impl PipelineContext {
    pub fn new(spins: Vec<SpinRecord>, purchases: Vec<PurchaseRecord>) -> Self {
        let started_at = Utc::now().naive_utc();
        Self {
            run_id: format!("run-{}", started_at.format("%Y%m%dT%H%M%S%.3f")),
            started_at,
            spins: spins.into(),
            purchases: purchases.into(),
            rejected_rows: 0,
        }
    }

    pub fn from_batch(batch: NormalizedBatch) -> Self {
        let rejected = batch.rejections.len();
        let mut ctx = Self::new(batch.spins, batch.purchases);
        ctx.rejected_rows = rejected;
        ctx
    }

    pub fn run_id(&self) -> &str {
        &self.run_id
    }

    pub fn started_at(&self) -> NaiveDateTime {
        self.started_at
    }

    pub fn spins(&self) -> &[SpinRecord] {
        &self.spins
    }

    pub fn purchases(&self) -> &[PurchaseRecord] {
        &self.purchases
    }

    pub fn rejected_rows(&self) -> usize {
        self.rejected_rows
    }
}
