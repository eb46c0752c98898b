pub mod constraints;
pub mod file_store;
pub mod lock;
pub mod memory_store;
pub mod sink;


pub use constraints::ConstraintViolation;
pub use file_store::FileFactStore;
pub use lock::RunLock;
pub use memory_store::MemoryFactStore;
pub use sink::{CommitReceipt, FactSink, FactSource};
