use crate::test_helpers::factory::Factory;
use serde_json::Value;

#[test]
fn test_hourly_fact_factory() {
    let fact = Factory::fact()
        .with("country", Value::Null)
        .with("total_spins", 0)
        .create();

    assert_eq!(fact.country, None);
    assert_eq!(fact.total_spins, 0);
    assert_eq!(fact.total_purchases, 1);
    assert_eq!(fact.avg_revenue_per_purchase, 3.0);
}
