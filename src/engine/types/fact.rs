use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use super::records::UnifiedKey;
use crate::shared::datetime::format::canonical;
use crate::shared::datetime::truncate_to_day;

/// One row of the published table, keyed by (hour, user_id).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HourlyFact {
    #[serde(rename = "date", with = "canonical")]
    pub hour: NaiveDateTime,
    pub user_id: String,
    /// None when the user purchased without spinning in that hour
    pub country: Option<String>,
    pub total_spins: u64,
    pub total_revenue: f64,
    pub total_purchases: u64,
    pub avg_revenue_per_purchase: f64,
    pub total_daily_revenue: f64,
}

impl HourlyFact {
    pub fn key(&self) -> UnifiedKey {
        UnifiedKey::new(self.hour, &self.user_id)
    }

    pub fn day(&self) -> NaiveDateTime {
        truncate_to_day(self.hour)
    }
}

/// Complete output of one run, ordered by user then hour.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FactTable {
    rows: Vec<HourlyFact>,
}

impl FactTable {
    pub fn new(mut rows: Vec<HourlyFact>) -> Self {
        rows.sort_by(|a, b| a.user_id.cmp(&b.user_id).then(a.hour.cmp(&b.hour)));
        Self { rows }
    }

    pub fn rows(&self) -> &[HourlyFact] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, HourlyFact> {
        self.rows.iter()
    }

    pub fn get(&self, key: &UnifiedKey) -> Option<&HourlyFact> {
        self.rows
            .binary_search_by(|row| {
                row.user_id
                    .as_str()
                    .cmp(key.user_id.as_str())
                    .then(row.hour.cmp(&key.hour))
            })
            .ok()
            .map(|idx| &self.rows[idx])
    }

    pub fn into_rows(self) -> Vec<HourlyFact> {
        self.rows
    }
}

impl<'a> IntoIterator for &'a FactTable {
    type Item = &'a HourlyFact;
    type IntoIter = std::slice::Iter<'a, HourlyFact>;

    fn into_iter(self) -> Self::IntoIter {
        self.rows.iter()
    }
}
