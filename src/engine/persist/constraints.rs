use serde::Serialize;
use std::collections::HashSet;
use std::fmt;

use crate::engine::errors::PersistenceError;
use crate::engine::types::{FactTable, HourlyFact};
use crate::shared::config::ConstraintConfig;

/// A row the destination table would refuse.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ConstraintViolation {
    /// "(hour, user_id)" of the offending row
    pub subject: String,
    pub rule: &'static str,
    pub detail: String,
}

impl fmt::Display for ConstraintViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}: {}", self.subject, self.rule, self.detail)
    }
}

/// Check every row against the destination's declared constraints.
/// Nothing is staged unless the whole table passes.
pub fn check(table: &FactTable, cfg: &ConstraintConfig) -> Result<(), PersistenceError> {
    let violations = find_violations(table, cfg);
    if violations.is_empty() {
        Ok(())
    } else {
        Err(PersistenceError::ConstraintViolation(violations))
    }
}

pub fn find_violations(table: &FactTable, cfg: &ConstraintConfig) -> Vec<ConstraintViolation> {
    let mut out = Vec::new();
    let mut seen = HashSet::with_capacity(table.len());

    for row in table {
        let subject = row.key().to_string();
        let mut push = |rule: &'static str, detail: String| {
            out.push(ConstraintViolation {
                subject: subject.clone(),
                rule,
                detail,
            })
        };

        if row.user_id.trim().is_empty() {
            push("not_null", "user_id is empty".into());
        }
        let user_len = row.user_id.chars().count();
        if user_len > cfg.max_user_id_len {
            push(
                "length",
                format!("user_id has {} chars, max {}", user_len, cfg.max_user_id_len),
            );
        }
        if let Some(country) = &row.country {
            let country_len = country.chars().count();
            if country_len > cfg.max_country_len {
                push(
                    "length",
                    format!("country has {} chars, max {}", country_len, cfg.max_country_len),
                );
            }
        }
        for (column, value) in numeric_columns(row) {
            if !value.is_finite() || value < 0.0 {
                push("non_negative", format!("{} = {}", column, value));
            }
        }
        if !seen.insert((row.hour, row.user_id.as_str())) {
            push("primary_key", "duplicate (date, user_id)".into());
        }
    }
    out
}

fn numeric_columns(row: &HourlyFact) -> [(&'static str, f64); 3] {
    [
        ("total_revenue", row.total_revenue),
        ("avg_revenue_per_purchase", row.avg_revenue_per_purchase),
        ("total_daily_revenue", row.total_daily_revenue),
    ]
}
