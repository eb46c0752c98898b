use crate::engine::types::{FactTable, HourlyFact, UnifiedKey};
use crate::test_helpers::factory::Factory;
use crate::test_helpers::ts;

#[test]
fn table_orders_by_user_then_hour() {
    let table = FactTable::new(vec![
        Factory::fact().with("user_id", "U2").with("date", "2022-04-01 09:00:00").create(),
        Factory::fact().with("user_id", "U1").with("date", "2022-04-01 14:00:00").create(),
        Factory::fact().with("user_id", "U1").with("date", "2022-04-01 10:00:00").create(),
    ]);

    let keys: Vec<(String, String)> = table
        .iter()
        .map(|f| (f.user_id.clone(), f.hour.to_string()))
        .collect();
    assert_eq!(
        keys,
        vec![
            ("U1".to_string(), "2022-04-01 10:00:00".to_string()),
            ("U1".to_string(), "2022-04-01 14:00:00".to_string()),
            ("U2".to_string(), "2022-04-01 09:00:00".to_string()),
        ]
    );
}

#[test]
fn get_finds_rows_by_primary_key() {
    let table = FactTable::new(vec![
        Factory::fact().with("user_id", "U1").with("total_spins", 5).create(),
        Factory::fact().with("user_id", "U2").with("total_spins", 9).create(),
    ]);

    let hit = table.get(&UnifiedKey::new(ts("2022-04-01 10:00:00"), "U2"));
    assert_eq!(hit.map(|f| f.total_spins), Some(9));
    assert!(table.get(&UnifiedKey::new(ts("2022-04-01 11:00:00"), "U2")).is_none());
}

#[test]
fn json_uses_date_column_and_canonical_timestamps() {
    let fact: HourlyFact = Factory::fact()
        .with("date", "2022-04-01 14:00:00")
        .with("country", serde_json::Value::Null)
        .create();
    let json = serde_json::to_value(&fact).unwrap();
    assert_eq!(json["date"], "2022-04-01 14:00:00");
    assert!(json["country"].is_null());

    let back: HourlyFact = serde_json::from_value(json).unwrap();
    assert_eq!(back, fact);
}

#[test]
fn keys_order_by_user_before_hour() {
    let early_u2 = UnifiedKey::new(ts("2022-04-01 01:00:00"), "U2");
    let late_u1 = UnifiedKey::new(ts("2022-04-01 23:00:00"), "U1");
    assert!(late_u1 < early_u2);
}
