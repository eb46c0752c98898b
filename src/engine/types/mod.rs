pub mod fact;
pub mod records;

#[cfg(test)]
mod fact_test;

pub use fact::{FactTable, HourlyFact};
pub use records::{DailyRevenue, PurchaseRecord, SpinRecord, UnifiedKey};
