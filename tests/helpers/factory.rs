pub use super::factories::{HourlyFactFactory, PurchaseRecordFactory, SpinRecordFactory};

pub struct Factory;

impl Factory {
    pub fn spin() -> SpinRecordFactory {
        SpinRecordFactory::new()
    }

    pub fn purchase() -> PurchaseRecordFactory {
        PurchaseRecordFactory::new()
    }

    pub fn fact() -> HourlyFactFactory {
        HourlyFactFactory::new()
    }
}
