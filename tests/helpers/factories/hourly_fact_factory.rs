use crate::engine::types::HourlyFact;
use crate::test_helpers::ts;
use serde_json::{Value, json};
use std::collections::HashMap;

/// Builds a consistent single-purchase hour by default.
pub struct HourlyFactFactory {
    params: HashMap<String, Value>,
}

impl HourlyFactFactory {
    pub fn new() -> Self {
        let mut params = HashMap::new();
        params.insert("date".into(), json!("2022-04-01 10:00:00"));
        params.insert("user_id".into(), json!("U1"));
        params.insert("country".into(), json!("US"));
        params.insert("total_spins".into(), json!(5));
        params.insert("total_revenue".into(), json!(3.0));
        params.insert("total_purchases".into(), json!(1));
        params.insert("avg_revenue_per_purchase".into(), json!(3.0));
        params.insert("total_daily_revenue".into(), json!(3.0));
        Self { params }
    }

    pub fn with(mut self, key: &str, value: impl Into<Value>) -> Self {
        self.params.insert(key.to_string(), value.into());
        self
    }

    pub fn create(self) -> HourlyFact {
        HourlyFact {
            hour: ts(self.params["date"].as_str().unwrap()),
            user_id: self.params["user_id"].as_str().unwrap().to_string(),
            country: self.params["country"].as_str().map(str::to_string),
            total_spins: self.params["total_spins"].as_u64().unwrap(),
            total_revenue: self.params["total_revenue"].as_f64().unwrap(),
            total_purchases: self.params["total_purchases"].as_u64().unwrap(),
            avg_revenue_per_purchase: self.params["avg_revenue_per_purchase"].as_f64().unwrap(),
            total_daily_revenue: self.params["total_daily_revenue"].as_f64().unwrap(),
        }
    }
}
