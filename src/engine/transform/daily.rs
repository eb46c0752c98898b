use chrono::NaiveDateTime;
use std::collections::{BTreeMap, HashMap};
use tracing::debug;

use crate::engine::types::{DailyRevenue, PurchaseRecord};

/// Purchase revenue per (day, user_id), computed straight from purchases so
/// hours without spins cannot drop anything.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DailyRevenueTable {
    by_user: HashMap<String, BTreeMap<NaiveDateTime, f64>>,
}

impl DailyRevenueTable {
    pub fn aggregate(purchases: &[PurchaseRecord]) -> Self {
        let mut by_user: HashMap<String, BTreeMap<NaiveDateTime, f64>> = HashMap::new();
        for purchase in purchases {
            *by_user
                .entry(purchase.user_id.clone())
                .or_default()
                .entry(purchase.day())
                .or_insert(0.0) += purchase.revenue;
        }

        let table = Self { by_user };
        debug!(groups = table.len(), "Aggregated daily revenue");
        table
    }

    pub fn get(&self, day: NaiveDateTime, user_id: &str) -> Option<f64> {
        self.by_user
            .get(user_id)
            .and_then(|days| days.get(&day))
            .copied()
    }

    pub fn len(&self) -> usize {
        self.by_user.values().map(BTreeMap::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.by_user.is_empty()
    }

    /// Materialized rows, ordered by user then day.
    pub fn rows(&self) -> Vec<DailyRevenue> {
        let mut rows: Vec<DailyRevenue> = self
            .by_user
            .iter()
            .flat_map(|(user_id, days)| {
                days.iter().map(move |(day, total)| DailyRevenue {
                    day: *day,
                    user_id: user_id.clone(),
                    total_daily_revenue: *total,
                })
            })
            .collect();
        rows.sort_by(|a, b| a.user_id.cmp(&b.user_id).then(a.day.cmp(&b.day)));
        rows
    }
}
