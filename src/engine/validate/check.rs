use serde::Serialize;

use crate::engine::types::{FactTable, PurchaseRecord, SpinRecord};

/// What a check reads: the persisted table and the inputs it was built from.
#[derive(Debug, Clone, Copy)]
pub struct ValidationInput<'a> {
    pub facts: &'a FactTable,
    pub spins: &'a [SpinRecord],
    pub purchases: &'a [PurchaseRecord],
}

/// One offending row or group.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Offense {
    pub subject: String,
    pub detail: String,
}

impl Offense {
    pub fn new(subject: impl ToString, detail: impl Into<String>) -> Self {
        Self {
            subject: subject.to_string(),
            detail: detail.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CheckOutcome {
    pub name: &'static str,
    pub description: &'static str,
    /// Capped sample of offenses
    pub offending: Vec<Offense>,
    pub offending_total: usize,
}

impl CheckOutcome {
    pub fn passed(&self) -> bool {
        self.offending_total == 0
    }
}

/// Read-only invariant over the persisted table.
pub trait Check: Send + Sync {
    fn name(&self) -> &'static str;

    fn description(&self) -> &'static str;

    fn find_offenses(&self, input: &ValidationInput<'_>) -> Vec<Offense>;

    fn run(&self, input: &ValidationInput<'_>, max_reported: usize) -> CheckOutcome {
        let mut offending = self.find_offenses(input);
        let offending_total = offending.len();
        offending.truncate(max_reported);
        CheckOutcome {
            name: self.name(),
            description: self.description(),
            offending,
            offending_total,
        }
    }
}
