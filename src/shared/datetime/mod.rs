pub mod format;
pub mod truncate;


pub use format::{CANONICAL_FORMAT, TimestampParser, format_canonical, to_canonical};
pub use truncate::{Granularity, is_hour_aligned, truncate, truncate_to_day, truncate_to_hour};
