use serde::Serialize;
use std::fmt;

use super::check::CheckOutcome;

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ValidationReport {
    pub outcomes: Vec<CheckOutcome>,
}

impl ValidationReport {
    pub fn new(outcomes: Vec<CheckOutcome>) -> Self {
        Self { outcomes }
    }

    pub fn is_success(&self) -> bool {
        self.outcomes.iter().all(CheckOutcome::passed)
    }

    pub fn failed(&self) -> impl Iterator<Item = &CheckOutcome> {
        self.outcomes.iter().filter(|o| !o.passed())
    }

    pub fn outcome(&self, name: &str) -> Option<&CheckOutcome> {
        self.outcomes.iter().find(|o| o.name == name)
    }
}

impl fmt::Display for ValidationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for outcome in &self.outcomes {
            if outcome.passed() {
                writeln!(f, "PASS  {:<28} {}", outcome.name, outcome.description)?;
                continue;
            }
            writeln!(
                f,
                "FAIL  {:<28} {} ({} offending)",
                outcome.name, outcome.description, outcome.offending_total
            )?;
            for offense in &outcome.offending {
                writeln!(f, "        {} {}", offense.subject, offense.detail)?;
            }
            let hidden = outcome.offending_total - outcome.offending.len();
            if hidden > 0 {
                writeln!(f, "        ... {hidden} more")?;
            }
        }
        Ok(())
    }
}
