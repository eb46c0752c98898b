pub mod factories;
pub mod factory;

use chrono::NaiveDateTime;

/// Parse a canonical `YYYY-MM-DD HH:MM:SS` literal.
pub fn ts(s: &str) -> NaiveDateTime {
    NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S").unwrap()
}
