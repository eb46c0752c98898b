pub mod context;
pub mod daily;
pub mod hourly;
pub mod key_space;
pub mod rollup;

#[cfg(test)]
mod key_space_test;

pub use context::PipelineContext;
pub use daily::DailyRevenueTable;
pub use hourly::{JoinedHour, SpinIndex};
pub use key_space::KeySpace;

use std::time::Instant;
use tracing::info;

use crate::engine::errors::TransformError;
use crate::engine::types::FactTable;

/// Batch recompute of the hourly fact table from a run's inputs.
pub struct Transform;

impl Transform {
    pub fn run(ctx: &PipelineContext) -> Result<FactTable, TransformError> {
        let started = Instant::now();
        let keys = KeySpace::unify(ctx.spins(), ctx.purchases());

        // Hourly join and daily aggregation share nothing until the rollup.
        let (hours, daily) = rayon::join(
            || hourly::join(&keys, ctx.spins(), ctx.purchases()),
            || DailyRevenueTable::aggregate(ctx.purchases()),
        );
        let table = rollup::merge(hours?, &daily);

        info!(
            run_id = ctx.run_id(),
            keys = keys.len(),
            daily_groups = daily.len(),
            rows = table.len(),
            elapsed_ms = started.elapsed().as_millis() as u64,
            "Built hourly fact table"
        );
        Ok(table)
    }
}
