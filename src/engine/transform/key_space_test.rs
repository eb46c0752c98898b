use crate::engine::transform::KeySpace;
use crate::engine::types::UnifiedKey;
use crate::test_helpers::factory::Factory;
use crate::test_helpers::ts;

#[test]
fn unify_includes_purchase_only_hours() {
    let spins = vec![Factory::spin().create()];
    let purchases = vec![
        Factory::purchase().with("date", "2022-04-01 10:16:26").create(),
        Factory::purchase()
            .with("transaction_id", "T2")
            .with("date", "2022-04-01 14:20:00")
            .create(),
    ];

    let keys = KeySpace::unify(&spins, &purchases);

    assert_eq!(keys.len(), 2);
    assert!(keys.contains(&UnifiedKey::new(ts("2022-04-01 10:00:00"), "U1")));
    assert!(keys.contains(&UnifiedKey::new(ts("2022-04-01 14:00:00"), "U1")));
}

#[test]
fn unify_orders_by_user_then_hour() {
    let spins = vec![
        Factory::spin().with("user_id", "U2").with("date", "2022-04-01 08:00:00").create(),
        Factory::spin().with("user_id", "U1").with("date", "2022-04-01 12:00:00").create(),
        Factory::spin().with("user_id", "U1").with("date", "2022-04-01 09:00:00").create(),
    ];

    let keys = KeySpace::unify(&spins, &[]);
    let ordered: Vec<_> = keys.iter().map(|k| (k.user_id.as_str(), k.hour)).collect();

    assert_eq!(
        ordered,
        vec![
            ("U1", ts("2022-04-01 09:00:00")),
            ("U1", ts("2022-04-01 12:00:00")),
            ("U2", ts("2022-04-01 08:00:00")),
        ]
    );
}

#[test]
fn unify_of_empty_inputs_is_empty() {
    let keys = KeySpace::unify(&[], &[]);
    assert!(keys.is_empty());
}
