use super::daily::DailyRevenueTable;
use super::hourly::JoinedHour;
use crate::engine::types::{FactTable, HourlyFact};

/// Attach each row's same-day revenue total. A (day, user) without purchases
/// rolls up to zero.
pub fn merge(hours: Vec<JoinedHour>, daily: &DailyRevenueTable) -> FactTable {
    let rows = hours
        .into_iter()
        .map(|h| {
            let total_daily_revenue = daily.get(h.key.day(), &h.key.user_id).unwrap_or(0.0);
            HourlyFact {
                hour: h.key.hour,
                user_id: h.key.user_id,
                country: h.country,
                total_spins: h.total_spins,
                total_revenue: h.total_revenue,
                total_purchases: h.total_purchases,
                avg_revenue_per_purchase: h.avg_revenue_per_purchase,
                total_daily_revenue,
            }
        })
        .collect();
    FactTable::new(rows)
}
