//! Coarse "how long ago" buckets for dashboard timestamps.

const MINUTE_MS: i64 = 60_000;
const HOUR_MS: i64 = 60 * MINUTE_MS;
const DAY_MS: i64 = 24 * HOUR_MS;

/// Placeholder for a timestamp that could not be read.
pub const UNKNOWN: &str = "Unknown";

/// Current wall-clock time in milliseconds since the Unix epoch.
pub fn now_ms() -> i64 {
    (time::OffsetDateTime::now_utc().unix_timestamp_nanos() / 1_000_000) as i64
}

/// Render `timestamp_ms` relative to `now_ms`.
///
/// Minutes and hours are rounded to the nearest unit, days are floored.
/// Each threshold is exclusive, so exactly one minute reads `1m ago`.
/// A zero timestamp counts as missing.
pub fn relative(timestamp_ms: Option<i64>, now_ms: i64) -> String {
    let ts = match timestamp_ms {
        Some(ts) if ts != 0 => ts,
        _ => return UNKNOWN.to_string(),
    };
    let diff = now_ms - ts;
    if diff < MINUTE_MS {
        "just now".to_string()
    } else if diff < HOUR_MS {
        format!("{}m ago", (diff + MINUTE_MS / 2) / MINUTE_MS)
    } else if diff < DAY_MS {
        format!("{}h ago", (diff + HOUR_MS / 2) / HOUR_MS)
    } else {
        format!("{}d ago", diff / DAY_MS)
    }
}

/// True when `timestamp_ms` lies within the last 24 hours of `now_ms`.
pub fn within_day(timestamp_ms: Option<i64>, now_ms: i64) -> bool {
    match timestamp_ms {
        Some(ts) => now_ms - ts < DAY_MS,
        None => false,
    }
}
