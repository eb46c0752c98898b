use rayon::prelude::*;
use std::time::Instant;
use tracing::{info, warn};

use super::check::{Check, ValidationInput};
use super::checks::{
    AverageRevenue, CanonicalTimestamps, DailyRevenueConsistency, KeyCompleteness, NonNegativeNumerics,
    NonNullKeys, RevenuePurchaseCoupling, StringBounds,
};
use super::report::ValidationReport;
use crate::shared::config::{ConstraintConfig, ValidationConfig};

/// Fixed battery of read-only checks; the acceptance gate of a run.
pub struct ValidationSuite {
    checks: Vec<Box<dyn Check>>,
    max_reported_rows: usize,
}

impl ValidationSuite {
    pub fn from_config(validation: &ValidationConfig, constraints: &ConstraintConfig) -> Self {
        Self::with_checks(
            default_checks(validation, constraints),
            validation.max_reported_rows,
        )
    }

    pub fn with_checks(checks: Vec<Box<dyn Check>>, max_reported_rows: usize) -> Self {
        Self {
            checks,
            max_reported_rows,
        }
    }

    pub fn check_names(&self) -> Vec<&'static str> {
        self.checks.iter().map(|c| c.name()).collect()
    }

    /// Every check runs regardless of the others' outcome. Outcomes keep
    /// registration order.
    pub fn run(&self, input: &ValidationInput<'_>) -> ValidationReport {
        let started = Instant::now();
        let outcomes: Vec<_> = self
            .checks
            .par_iter()
            .map(|check| check.run(input, self.max_reported_rows))
            .collect();
        let report = ValidationReport::new(outcomes);

        for outcome in report.failed() {
            warn!(
                target: "validate",
                check = outcome.name,
                offending = outcome.offending_total,
                "Validation check failed"
            );
        }
        if report.is_success() {
            info!(
                target: "validate",
                checks = report.outcomes.len(),
                rows = input.facts.len(),
                elapsed_ms = started.elapsed().as_millis() as u64,
                "All validation checks passed"
            );
        }
        report
    }
}

pub fn default_checks(
    validation: &ValidationConfig,
    constraints: &ConstraintConfig,
) -> Vec<Box<dyn Check>> {
    vec![
        Box::new(CanonicalTimestamps),
        Box::new(KeyCompleteness),
        Box::new(NonNullKeys),
        Box::new(NonNegativeNumerics),
        Box::new(RevenuePurchaseCoupling),
        Box::new(DailyRevenueConsistency {
            tolerance: validation.tolerance,
        }),
        Box::new(AverageRevenue {
            tolerance: validation.tolerance,
        }),
        Box::new(StringBounds {
            max_user_id_len: constraints.max_user_id_len,
            max_country_len: constraints.max_country_len,
        }),
    ]
}
