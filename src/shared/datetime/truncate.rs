use chrono::{Duration, NaiveDateTime, Timelike};

/// Calendar granularities the fact table rolls up to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Granularity {
    Hour,
    Day,
}

/// Round `ts` down to the start of its containing bucket.
pub fn truncate(ts: NaiveDateTime, gran: Granularity) -> NaiveDateTime {
    match gran {
        Granularity::Hour => truncate_to_hour(ts),
        Granularity::Day => truncate_to_day(ts),
    }
}

/// Zero minutes, seconds and sub-second precision.
pub fn truncate_to_hour(ts: NaiveDateTime) -> NaiveDateTime {
    let into_hour = i64::from(ts.minute() * 60 + ts.second());
    ts - Duration::seconds(into_hour) - Duration::nanoseconds(i64::from(ts.nanosecond()))
}

/// Midnight of the calendar day containing `ts`.
pub fn truncate_to_day(ts: NaiveDateTime) -> NaiveDateTime {
    let into_day = i64::from(ts.num_seconds_from_midnight());
    ts - Duration::seconds(into_day) - Duration::nanoseconds(i64::from(ts.nanosecond()))
}

pub fn is_hour_aligned(ts: NaiveDateTime) -> bool {
    truncate_to_hour(ts) == ts
}
