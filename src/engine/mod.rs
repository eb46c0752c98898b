pub mod errors;
pub mod ingest;
pub mod persist;
pub mod pipeline;
pub mod transform;
pub mod types;
pub mod validate;

pub use errors::*;
