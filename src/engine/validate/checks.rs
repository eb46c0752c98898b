use chrono::NaiveDateTime;
use std::collections::BTreeMap;

use super::check::{Check, Offense, ValidationInput};
use crate::engine::transform::{DailyRevenueTable, KeySpace};
use crate::engine::types::UnifiedKey;
use crate::shared::datetime::{format_canonical, is_hour_aligned, to_canonical};

/// Every row's `date` renders canonically and sits on an hour boundary.
pub struct CanonicalTimestamps;

impl Check for CanonicalTimestamps {
    fn name(&self) -> &'static str {
        "canonical_timestamps"
    }

    fn description(&self) -> &'static str {
        "date is rendered as YYYY-MM-DD HH:MM:SS and truncated to the hour"
    }

    fn find_offenses(&self, input: &ValidationInput<'_>) -> Vec<Offense> {
        let mut out = Vec::new();
        for row in input.facts {
            let rendered = match serde_json::to_value(row) {
                Ok(value) => value["date"].as_str().map(str::to_string),
                Err(e) => {
                    out.push(Offense::new(row.key(), format!("row does not serialize: {e}")));
                    continue;
                }
            };
            match rendered {
                Some(date) if to_canonical(&date).as_deref() == Some(date.as_str()) => {}
                other => out.push(Offense::new(
                    row.key(),
                    format!("date rendered as {:?}", other),
                )),
            }
            if !is_hour_aligned(row.hour) {
                out.push(Offense::new(
                    row.key(),
                    format!("{} is not on the hour", format_canonical(row.hour)),
                ));
            }
        }
        out
    }
}

/// Exactly one row per (hour, user_id) seen in either input stream, and none
/// for keys that were never seen.
pub struct KeyCompleteness;

impl Check for KeyCompleteness {
    fn name(&self) -> &'static str {
        "key_completeness"
    }

    fn description(&self) -> &'static str {
        "one row for every (hour, user_id) present in spins or purchases"
    }

    fn find_offenses(&self, input: &ValidationInput<'_>) -> Vec<Offense> {
        let expected = KeySpace::unify(input.spins, input.purchases);
        let mut seen: BTreeMap<UnifiedKey, usize> = BTreeMap::new();
        for row in input.facts {
            *seen.entry(row.key()).or_insert(0) += 1;
        }

        let mut out: Vec<Offense> = expected
            .iter()
            .filter(|key| !seen.contains_key(*key))
            .map(|key| Offense::new(key, "missing from fact table"))
            .collect();
        for (key, count) in &seen {
            if *count > 1 {
                out.push(Offense::new(key, format!("{count} rows share this key")));
            }
            if !expected.contains(key) {
                out.push(Offense::new(key, "not present in either input stream"));
            }
        }
        out
    }
}

pub struct NonNullKeys;

impl Check for NonNullKeys {
    fn name(&self) -> &'static str {
        "non_null_keys"
    }

    fn description(&self) -> &'static str {
        "no row has an empty user_id"
    }

    fn find_offenses(&self, input: &ValidationInput<'_>) -> Vec<Offense> {
        input
            .facts
            .iter()
            .filter(|row| row.user_id.trim().is_empty())
            .map(|row| Offense::new(row.key(), "user_id is empty"))
            .collect()
    }
}

pub struct NonNegativeNumerics;

impl Check for NonNegativeNumerics {
    fn name(&self) -> &'static str {
        "non_negative_numerics"
    }

    fn description(&self) -> &'static str {
        "revenue columns are finite and >= 0"
    }

    fn find_offenses(&self, input: &ValidationInput<'_>) -> Vec<Offense> {
        let mut out = Vec::new();
        for row in input.facts {
            for (column, value) in [
                ("total_revenue", row.total_revenue),
                ("avg_revenue_per_purchase", row.avg_revenue_per_purchase),
                ("total_daily_revenue", row.total_daily_revenue),
            ] {
                if !value.is_finite() || value < 0.0 {
                    out.push(Offense::new(row.key(), format!("{column} = {value}")));
                }
            }
        }
        out
    }
}

/// Revenue is positive exactly when at least one purchase was counted.
pub struct RevenuePurchaseCoupling;

impl Check for RevenuePurchaseCoupling {
    fn name(&self) -> &'static str {
        "revenue_purchase_coupling"
    }

    fn description(&self) -> &'static str {
        "total_revenue > 0 if and only if total_purchases > 0"
    }

    fn find_offenses(&self, input: &ValidationInput<'_>) -> Vec<Offense> {
        input
            .facts
            .iter()
            .filter(|row| (row.total_revenue > 0.0) != (row.total_purchases > 0))
            .map(|row| {
                Offense::new(
                    row.key(),
                    format!(
                        "total_revenue = {}, total_purchases = {}",
                        row.total_revenue, row.total_purchases
                    ),
                )
            })
            .collect()
    }
}

/// One total_daily_revenue per (day, user_id), equal to that day's raw
/// purchase revenue.
pub struct DailyRevenueConsistency {
    pub tolerance: f64,
}

impl Check for DailyRevenueConsistency {
    fn name(&self) -> &'static str {
        "daily_revenue_consistency"
    }

    fn description(&self) -> &'static str {
        "total_daily_revenue is constant per (day, user_id) and matches raw purchases"
    }

    fn find_offenses(&self, input: &ValidationInput<'_>) -> Vec<Offense> {
        let expected = DailyRevenueTable::aggregate(input.purchases);
        let mut groups: BTreeMap<(&str, NaiveDateTime), Vec<f64>> = BTreeMap::new();
        for row in input.facts {
            groups
                .entry((row.user_id.as_str(), row.day()))
                .or_default()
                .push(row.total_daily_revenue);
        }

        let mut out = Vec::new();
        for ((user_id, day), values) in groups {
            let subject = format!("({}, {})", day.date(), user_id);
            let first = values[0];
            if values.iter().any(|v| (v - first).abs() > self.tolerance) {
                out.push(Offense::new(
                    &subject,
                    format!("{} distinct values: {:?}", distinct(&values, self.tolerance), values),
                ));
                continue;
            }
            let want = expected.get(day, user_id).unwrap_or(0.0);
            if (first - want).abs() > self.tolerance {
                out.push(Offense::new(
                    &subject,
                    format!("total_daily_revenue = {first}, purchases sum to {want}"),
                ));
            }
        }
        out
    }
}

fn distinct(values: &[f64], tolerance: f64) -> usize {
    let mut seen: Vec<f64> = Vec::new();
    for v in values {
        if !seen.iter().any(|s| (s - v).abs() <= tolerance) {
            seen.push(*v);
        }
    }
    seen.len()
}

pub struct AverageRevenue {
    pub tolerance: f64,
}

impl Check for AverageRevenue {
    fn name(&self) -> &'static str {
        "average_revenue"
    }

    fn description(&self) -> &'static str {
        "avg_revenue_per_purchase = total_revenue / total_purchases, or 0 without purchases"
    }

    fn find_offenses(&self, input: &ValidationInput<'_>) -> Vec<Offense> {
        input
            .facts
            .iter()
            .filter_map(|row| {
                let want = if row.total_purchases == 0 {
                    0.0
                } else {
                    row.total_revenue / row.total_purchases as f64
                };
                ((row.avg_revenue_per_purchase - want).abs() > self.tolerance).then(|| {
                    Offense::new(
                        row.key(),
                        format!(
                            "avg_revenue_per_purchase = {}, expected {}",
                            row.avg_revenue_per_purchase, want
                        ),
                    )
                })
            })
            .collect()
    }
}

pub struct StringBounds {
    pub max_user_id_len: usize,
    pub max_country_len: usize,
}

impl Check for StringBounds {
    fn name(&self) -> &'static str {
        "string_bounds"
    }

    fn description(&self) -> &'static str {
        "user_id and country fit their column widths"
    }

    fn find_offenses(&self, input: &ValidationInput<'_>) -> Vec<Offense> {
        let mut out = Vec::new();
        for row in input.facts {
            let user_len = row.user_id.chars().count();
            if user_len > self.max_user_id_len {
                out.push(Offense::new(
                    row.key(),
                    format!("user_id length {user_len} > {}", self.max_user_id_len),
                ));
            }
            if let Some(country) = &row.country {
                let len = country.chars().count();
                if len > self.max_country_len {
                    out.push(Offense::new(
                        row.key(),
                        format!("country {country:?} length {len} > {}", self.max_country_len),
                    ));
                }
            }
        }
        out
    }
}
