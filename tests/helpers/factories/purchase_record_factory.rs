use crate::engine::types::PurchaseRecord;
use crate::test_helpers::ts;
use rand::Rng;
use serde_json::{Value, json};
use std::collections::HashMap;

pub struct PurchaseRecordFactory {
    params: HashMap<String, Value>,
}

impl PurchaseRecordFactory {
    pub fn new() -> Self {
        let mut params = HashMap::new();
        params.insert("transaction_id".into(), json!("T1"));
        params.insert("date".into(), json!("2022-04-01 10:16:26"));
        params.insert("user_id".into(), json!("U1"));
        params.insert("revenue".into(), json!(3.0));
        params.insert("currency".into(), json!("USD"));
        Self { params }
    }

    pub fn with(mut self, key: &str, value: impl Into<Value>) -> Self {
        self.params.insert(key.to_string(), value.into());
        self
    }

    pub fn create(self) -> PurchaseRecord {
        PurchaseRecord {
            transaction_id: self.params["transaction_id"].as_str().unwrap().to_string(),
            timestamp: ts(self.params["date"].as_str().unwrap()),
            user_id: self.params["user_id"].as_str().unwrap().to_string(),
            revenue: self.params["revenue"].as_f64().unwrap(),
            currency: self.params["currency"].as_str().unwrap().to_string(),
        }
    }

    /// Purchases with unique ids scattered over the configured calendar day.
    pub fn create_list(self, count: usize) -> Vec<PurchaseRecord> {
        let mut rng = rand::thread_rng();
        let template = self.create();
        let midnight = crate::shared::datetime::truncate_to_day(template.timestamp);
        (0..count)
            .map(|i| {
                let offset = rng.gen_range(0..86_400);
                let cents = rng.gen_range(1..10_000);
                PurchaseRecord {
                    transaction_id: format!("{}-{}", template.transaction_id, i + 1),
                    timestamp: midnight + chrono::Duration::seconds(offset),
                    revenue: cents as f64 / 100.0,
                    ..template.clone()
                }
            })
            .collect()
    }
}
