use crate::test_helpers::factory::Factory;
use crate::test_helpers::ts;

#[test]
fn test_spin_record_factory() {
    let spin = Factory::spin()
        .with("user_id", "U42")
        .with("country", "NL")
        .with("total_spins", 12)
        .create();

    assert_eq!(spin.user_id, "U42");
    assert_eq!(spin.country, "NL");
    assert_eq!(spin.total_spins, 12);
    assert_eq!(spin.hour, ts("2022-04-01 10:00:00"));
}

#[test]
fn test_spin_record_factory_hours() {
    let spins = Factory::spin().create_hours(3);
    let hours: Vec<_> = spins.iter().map(|s| s.hour).collect();
    assert_eq!(
        hours,
        vec![
            ts("2022-04-01 10:00:00"),
            ts("2022-04-01 11:00:00"),
            ts("2022-04-01 12:00:00")
        ]
    );
}
