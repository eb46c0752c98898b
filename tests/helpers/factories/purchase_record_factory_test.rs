use crate::test_helpers::factory::Factory;
use crate::test_helpers::ts;
use std::collections::HashSet;

#[test]
fn test_purchase_record_factory() {
    let purchase = Factory::purchase()
        .with("transaction_id", "T9")
        .with("revenue", 1.5)
        .create();

    assert_eq!(purchase.transaction_id, "T9");
    assert_eq!(purchase.revenue, 1.5);
    assert_eq!(purchase.timestamp, ts("2022-04-01 10:16:26"));
    assert_eq!(purchase.currency, "USD");
}

#[test]
fn test_purchase_record_factory_list_stays_within_day() {
    let purchases = Factory::purchase().create_list(50);
    let ids: HashSet<_> = purchases.iter().map(|p| p.transaction_id.clone()).collect();
    assert_eq!(ids.len(), 50);
    assert!(purchases.iter().all(|p| p.day() == ts("2022-04-01 00:00:00")));
    assert!(purchases.iter().all(|p| p.revenue > 0.0));
}
