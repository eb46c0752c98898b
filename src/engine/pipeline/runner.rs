use tracing::{error, info, warn};

use super::report::{RunReport, RunStatus};
use crate::engine::errors::PipelineError;
use crate::engine::ingest::NormalizedBatch;
use crate::engine::persist::{FactSink, FactSource};
use crate::engine::transform::{PipelineContext, Transform};
use crate::engine::types::{PurchaseRecord, SpinRecord};
use crate::engine::validate::{
    CheckOutcome, Offense, ValidationInput, ValidationReport, ValidationSuite,
};
use crate::shared::config::Settings;

/// Drives one batch run against a destination store.
pub struct Pipeline<S> {
    store: S,
    suite: ValidationSuite,
}

impl<S> Pipeline<S>
where
    S: FactSink + FactSource,
{
    pub fn new(store: S, settings: &Settings) -> Self {
        Self::with_suite(
            store,
            ValidationSuite::from_config(&settings.validation, &settings.constraints),
        )
    }

    pub fn with_suite(store: S, suite: ValidationSuite) -> Self {
        Self { store, suite }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Lock, transform, swap in the new table, then validate what was
    /// actually persisted. Any error before the swap leaves the previous
    /// table visible.
    pub fn run(&self, batch: NormalizedBatch) -> Result<RunReport, PipelineError> {
        let _lock = self.store.acquire_run_lock()?;

        let rejections = batch.rejections.clone();
        let ctx = PipelineContext::from_batch(batch);
        info!(
            run_id = ctx.run_id(),
            spins = ctx.spins().len(),
            purchases = ctx.purchases().len(),
            rejected = ctx.rejected_rows(),
            "Starting run"
        );

        let table = Transform::run(&ctx)?;
        let receipt = self.store.replace_all(&table)?;

        let validation = match self.validate_inputs(ctx.spins(), ctx.purchases()) {
            Ok(report) => report,
            Err(e) => {
                error!(
                    run_id = ctx.run_id(),
                    generation = receipt.generation,
                    "Committed table could not be read back: {}",
                    e
                );
                ValidationReport::new(vec![reload_failure(&e)])
            }
        };
        let status = if validation.is_success() {
            RunStatus::Succeeded
        } else {
            RunStatus::ValidationFailed
        };

        let report = RunReport {
            run_id: ctx.run_id().to_string(),
            generation: receipt.generation,
            rows_written: receipt.rows,
            rejected_rows: ctx.rejected_rows(),
            rejections,
            validation,
            status,
        };
        match report.status {
            RunStatus::Succeeded => info!(
                run_id = %report.run_id,
                generation = report.generation,
                rows = report.rows_written,
                "Run succeeded"
            ),
            RunStatus::ValidationFailed => warn!(
                run_id = %report.run_id,
                generation = report.generation,
                failed_checks = report.validation.failed().count(),
                "Run committed but failed validation"
            ),
        }
        Ok(report)
    }

    /// Re-run the suite against the currently persisted table.
    pub fn validate(&self, batch: &NormalizedBatch) -> Result<ValidationReport, PipelineError> {
        self.validate_inputs(&batch.spins, &batch.purchases)
    }

    fn validate_inputs(
        &self,
        spins: &[SpinRecord],
        purchases: &[PurchaseRecord],
    ) -> Result<ValidationReport, PipelineError> {
        let facts = self.store.load()?;
        Ok(self.suite.run(&ValidationInput {
            facts: &facts,
            spins,
            purchases,
        }))
    }
}

/// Outcome recorded when the committed table cannot be reloaded for validation.
fn reload_failure(err: &PipelineError) -> CheckOutcome {
    CheckOutcome {
        name: "reload_persisted",
        description: "Committed table can be read back",
        offending: vec![Offense::new("persisted table", err.to_string())],
        offending_total: 1,
    }
}
