use crate::engine::types::SpinRecord;
use crate::test_helpers::ts;
use serde_json::{Value, json};
use std::collections::HashMap;

pub struct SpinRecordFactory {
    params: HashMap<String, Value>,
}

impl SpinRecordFactory {
    pub fn new() -> Self {
        let mut params = HashMap::new();
        params.insert("date".into(), json!("2022-04-01 10:00:00"));
        params.insert("user_id".into(), json!("U1"));
        params.insert("country".into(), json!("US"));
        params.insert("total_spins".into(), json!(5));
        Self { params }
    }

    pub fn with(mut self, key: &str, value: impl Into<Value>) -> Self {
        self.params.insert(key.to_string(), value.into());
        self
    }

    pub fn create(self) -> SpinRecord {
        SpinRecord {
            hour: ts(self.params["date"].as_str().unwrap()),
            user_id: self.params["user_id"].as_str().unwrap().to_string(),
            country: self.params["country"].as_str().unwrap().to_string(),
            total_spins: self.params["total_spins"].as_u64().unwrap(),
        }
    }

    /// One record per hour starting at the configured date, same user.
    pub fn create_hours(self, count: usize) -> Vec<SpinRecord> {
        let first = self.create();
        (0..count)
            .map(|i| SpinRecord {
                hour: first.hour + chrono::Duration::hours(i as i64),
                ..first.clone()
            })
            .collect()
    }
}
