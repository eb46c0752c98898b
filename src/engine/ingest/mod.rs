pub mod loader;
pub mod normalizer;
pub mod price;
pub mod raw;


pub use loader::{load_records, parse_records};
pub use normalizer::{NormalizedBatch, Normalizer, Rejection, Stream};
pub use price::{Price, parse_price};
pub use raw::{RawNumber, RawPurchase, RawSpin};
