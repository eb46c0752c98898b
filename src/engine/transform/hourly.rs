use chrono::NaiveDateTime;
use std::collections::HashMap;
use tracing::debug;

use super::key_space::KeySpace;
use crate::engine::errors::{KeyConflict, TransformError};
use crate::engine::types::{PurchaseRecord, SpinRecord, UnifiedKey};

type HourKey<'a> = (NaiveDateTime, &'a str);

/// Hourly row before the daily rollup is attached.
#[derive(Debug, Clone, PartialEq)]
pub struct JoinedHour {
    pub key: UnifiedKey,
    pub country: Option<String>,
    pub total_spins: u64,
    pub total_revenue: f64,
    pub total_purchases: u64,
    pub avg_revenue_per_purchase: f64,
}

/// Spins indexed by (hour, user_id). At most one row per key.
#[derive(Debug)]
pub struct SpinIndex<'a> {
    by_key: HashMap<HourKey<'a>, &'a SpinRecord>,
}

impl<'a> SpinIndex<'a> {
    /// Fails with every conflicting key when a (hour, user_id) pair carries
    /// more than one spin row, e.g. the same user in two countries.
    pub fn build(spins: &'a [SpinRecord]) -> Result<Self, TransformError> {
        let mut grouped: HashMap<HourKey<'a>, Vec<&'a SpinRecord>> =
            HashMap::with_capacity(spins.len());
        for spin in spins {
            grouped
                .entry((spin.hour, spin.user_id.as_str()))
                .or_default()
                .push(spin);
        }

        let mut conflicts: Vec<KeyConflict> = grouped
            .iter()
            .filter(|(_, rows)| rows.len() > 1)
            .map(|((hour, user_id), rows)| KeyConflict {
                hour: *hour,
                user_id: user_id.to_string(),
                countries: rows.iter().map(|r| r.country.clone()).collect(),
            })
            .collect();
        if !conflicts.is_empty() {
            conflicts.sort_by(|a, b| a.user_id.cmp(&b.user_id).then(a.hour.cmp(&b.hour)));
            return Err(TransformError::KeyConflict(conflicts));
        }

        let by_key = grouped
            .into_iter()
            .filter_map(|(key, rows)| rows.first().map(|spin| (key, *spin)))
            .collect();
        Ok(Self { by_key })
    }

    pub fn get(&self, key: &UnifiedKey) -> Option<&'a SpinRecord> {
        self.by_key.get(&(key.hour, key.user_id.as_str())).copied()
    }

    pub fn len(&self) -> usize {
        self.by_key.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_key.is_empty()
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq)]
struct HourPurchases {
    revenue: f64,
    count: u64,
}

/// Purchases summed per hour-truncated (hour, user_id).
#[derive(Debug)]
pub struct PurchaseIndex<'a> {
    by_key: HashMap<HourKey<'a>, HourPurchases>,
}

impl<'a> PurchaseIndex<'a> {
    pub fn build(purchases: &'a [PurchaseRecord]) -> Self {
        let mut by_key: HashMap<HourKey<'a>, HourPurchases> = HashMap::new();
        for purchase in purchases {
            let entry = by_key
                .entry((purchase.hour(), purchase.user_id.as_str()))
                .or_default();
            entry.revenue += purchase.revenue;
            entry.count += 1;
        }
        Self { by_key }
    }

    /// (total revenue, purchase count); zeros when the hour had no purchase.
    pub fn totals(&self, key: &UnifiedKey) -> (f64, u64) {
        self.by_key
            .get(&(key.hour, key.user_id.as_str()))
            .map(|p| (p.revenue, p.count))
            .unwrap_or((0.0, 0))
    }
}

/// Left-join every key in `keys` against spins and hour-truncated purchases.
pub fn join(
    keys: &KeySpace,
    spins: &[SpinRecord],
    purchases: &[PurchaseRecord],
) -> Result<Vec<JoinedHour>, TransformError> {
    let spin_index = SpinIndex::build(spins)?;
    let purchase_index = PurchaseIndex::build(purchases);

    let rows: Vec<JoinedHour> = keys
        .iter()
        .map(|key| {
            let spin = spin_index.get(key);
            let (total_revenue, total_purchases) = purchase_index.totals(key);
            JoinedHour {
                key: key.clone(),
                country: spin.map(|s| s.country.clone()),
                total_spins: spin.map_or(0, |s| s.total_spins),
                total_revenue,
                total_purchases,
                avg_revenue_per_purchase: average(total_revenue, total_purchases),
            }
        })
        .collect();

    debug!(
        keys = keys.len(),
        spin_keys = spin_index.len(),
        purchase_only = rows.iter().filter(|r| r.country.is_none()).count(),
        "Joined hourly facts"
    );
    Ok(rows)
}

pub fn average(total: f64, count: u64) -> f64 {
    if count == 0 { 0.0 } else { total / count as f64 }
}
