use chrono::{DateTime, Local, NaiveDateTime, TimeZone};

pub fn now_local() -> NaiveDateTime {
    Local::now().naive_local()
}

/// Renders a unix timestamp (seconds) as a local `YYYY-MM-DD` day.
pub fn format_day(timestamp: i64) -> String {
    local_datetime(timestamp)
        .map(|dt| dt.format("%Y-%m-%d").to_string())
        .unwrap_or_else(|| timestamp.to_string())
}

pub fn format_minute(timestamp: i64) -> String {
    local_datetime(timestamp)
        .map(|dt| dt.format("%Y-%m-%d %H:%M").to_string())
        .unwrap_or_else(|| timestamp.to_string())
}

fn local_datetime(timestamp: i64) -> Option<DateTime<Local>> {
    Local.timestamp_opt(timestamp, 0).single()
}
