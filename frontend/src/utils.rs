use chrono::{DateTime, Local, NaiveTime, TimeZone, Utc};

pub fn now_ms() -> i64 {
    js_sys::Date::now() as i64
}

pub fn utc_from_millis(ms: i64) -> DateTime<Utc> {
    Utc.timestamp_millis_opt(ms).single().unwrap_or_default()
}

pub fn local_label(ms: i64) -> String {
    DateTime::<Local>::from(utc_from_millis(ms))
        .format("%Y-%m-%d %H:%M:%S")
        .to_string()
}

/// Value of an `<input type="time">`, with or without seconds.
pub fn parse_time(value: &str) -> Option<NaiveTime> {
    NaiveTime::parse_from_str(value, "%H:%M:%S")
        .or_else(|_| NaiveTime::parse_from_str(value, "%H:%M"))
        .ok()
}

pub fn time_input_value(time: NaiveTime) -> String {
    time.format("%H:%M").to_string()
}

/// Empty or malformed threshold inputs are unset (NaN).
pub fn parse_bound(value: &str) -> f32 {
    value.trim().parse().unwrap_or(f32::NAN)
}

pub fn bound_input_value(bound: f32) -> String {
    if bound.is_finite() {
        bound.to_string()
    } else {
        String::new()
    }
}

pub fn duration_label(duration: chrono::Duration) -> String {
    match duration.to_std() {
        Ok(d) => humantime::format_duration(d).to_string(),
        Err(_) => "0s".to_string(),
    }
}
