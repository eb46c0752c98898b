use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::shared::datetime::format::canonical;
use crate::shared::datetime::{Granularity, truncate, truncate_to_day};

/// Hourly spin count for one user in one country.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpinRecord {
    #[serde(with = "canonical")]
    pub hour: NaiveDateTime,
    pub user_id: String,
    pub country: String,
    pub total_spins: u64,
}

impl SpinRecord {
    pub fn key(&self) -> UnifiedKey {
        UnifiedKey::new(self.hour, &self.user_id)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PurchaseRecord {
    pub transaction_id: String,
    #[serde(with = "canonical")]
    pub timestamp: NaiveDateTime,
    pub user_id: String,
    pub revenue: f64,
    pub currency: String,
}

impl PurchaseRecord {
    pub fn hour(&self) -> NaiveDateTime {
        truncate(self.timestamp, Granularity::Hour)
    }

    pub fn day(&self) -> NaiveDateTime {
        truncate(self.timestamp, Granularity::Day)
    }

    pub fn key(&self) -> UnifiedKey {
        UnifiedKey::new(self.hour(), &self.user_id)
    }
}

/// Primary key of the fact table.
///
/// Field order drives the derived ordering: by user, then by hour.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct UnifiedKey {
    pub user_id: String,
    pub hour: NaiveDateTime,
}

impl UnifiedKey {
    pub fn new(hour: NaiveDateTime, user_id: &str) -> Self {
        Self {
            user_id: user_id.to_string(),
            hour,
        }
    }

    pub fn day(&self) -> NaiveDateTime {
        truncate_to_day(self.hour)
    }
}

impl std::fmt::Display for UnifiedKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "({}, {})",
            crate::shared::datetime::format_canonical(self.hour),
            self.user_id
        )
    }
}

/// Revenue for one user over one calendar day.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyRevenue {
    #[serde(with = "canonical")]
    pub day: NaiveDateTime,
    pub user_id: String,
    pub total_daily_revenue: f64,
}
