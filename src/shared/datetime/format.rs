use chrono::{DateTime, NaiveDateTime, Utc};
use chrono_tz::Tz;

/// Canonical rendering used for input normalization and display.
pub const CANONICAL_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Spreadsheet exports occasionally use slashes as date separators.
pub const SLASHED_FORMAT: &str = "%Y/%m/%d %H:%M:%S";

pub fn format_canonical(ts: NaiveDateTime) -> String {
    ts.format(CANONICAL_FORMAT).to_string()
}

pub fn parse_canonical(input: &str) -> Option<NaiveDateTime> {
    NaiveDateTime::parse_from_str(input, CANONICAL_FORMAT).ok()
}

/// Parses timestamps in every accepted input format into naive wall-clock time.
#[derive(Debug, Clone, Default)]
pub struct TimestampParser {
    timezone: Option<Tz>,
}

impl TimestampParser {
    /// `timezone` is the zone offset-qualified inputs are converted into (None = UTC).
    ///
    /// Conversion yields wall-clock time, so in a zone with daylight saving the
    /// two instants of the repeated fall-back hour land on the same hour and
    /// merge downstream. Leave the zone unset to keep every instant distinct.
    pub fn new(timezone: Option<&str>) -> Result<Self, String> {
        let timezone = match timezone {
            Some(name) => Some(
                name.parse::<Tz>()
                    .map_err(|e| format!("unknown timezone '{name}': {e}"))?,
            ),
            None => None,
        };
        Ok(Self { timezone })
    }

    /// Tries, in order: canonical, slashed, RFC 3339 (offset dropped after
    /// conversion), and bare ISO-8601 with a `T` separator.
    pub fn parse(&self, input: &str) -> Option<NaiveDateTime> {
        let s = input.trim();
        if let Ok(dt) = NaiveDateTime::parse_from_str(s, CANONICAL_FORMAT) {
            return Some(dt);
        }
        if let Ok(dt) = NaiveDateTime::parse_from_str(s, SLASHED_FORMAT) {
            return Some(dt);
        }
        if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
            return Some(match self.timezone {
                Some(tz) => dt.with_timezone(&tz).naive_local(),
                None => dt.with_timezone(&Utc).naive_utc(),
            });
        }
        s.parse::<NaiveDateTime>().ok()
    }
}

/// Normalize a destination-native rendering (e.g. `2022-04-01T00:00:00+00:00`)
/// to the canonical form before comparison or display.
pub fn to_canonical(rendered: &str) -> Option<String> {
    TimestampParser::default()
        .parse(rendered)
        .map(format_canonical)
}

/// Serde adapter storing timestamps in canonical form.
pub mod canonical {
    use super::{CANONICAL_FORMAT, format_canonical};
    use chrono::NaiveDateTime;
    use serde::{Deserialize, Deserializer, Serializer, de::Error};

    pub fn serialize<S: Serializer>(ts: &NaiveDateTime, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&format_canonical(*ts))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<NaiveDateTime, D::Error> {
        let raw = String::deserialize(deserializer)?;
        NaiveDateTime::parse_from_str(&raw, CANONICAL_FORMAT).map_err(D::Error::custom)
    }
}
