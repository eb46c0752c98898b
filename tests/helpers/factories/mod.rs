pub mod hourly_fact_factory;
pub mod purchase_record_factory;
pub mod spin_record_factory;

pub use hourly_fact_factory::HourlyFactFactory;
pub use purchase_record_factory::PurchaseRecordFactory;
pub use spin_record_factory::SpinRecordFactory;

#[cfg(test)]
mod hourly_fact_factory_test;
#[cfg(test)]
mod purchase_record_factory_test;
#[cfg(test)]
mod spin_record_factory_test;
