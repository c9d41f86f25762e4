//! Formatting utilities used for CLI and export outputs.

use chrono::{DateTime, Local, NaiveDate, Utc};

/// Seconds → "HH:MM:SS" (negative values keep their sign).
pub fn format_duration(seconds: i64) -> String {
    let sign = if seconds < 0 { "-" } else { "" };
    let s = seconds.abs();
    format!("{}{:02}:{:02}:{:02}", sign, s / 3600, (s % 3600) / 60, s % 60)
}

/// Seconds → "8h 30m", or "45m" below one hour.
pub fn format_duration_human(seconds: i64) -> String {
    let hours = seconds / 3600;
    let minutes = (seconds % 3600) / 60;

    if hours > 0 {
        format!("{}h {}m", hours, minutes)
    } else {
        format!("{}m", minutes)
    }
}

pub fn format_date(date: NaiveDate) -> String {
    date.format("%-d %B %Y").to_string()
}

pub fn format_time(dt: DateTime<Utc>) -> String {
    dt.with_timezone(&Local).format("%H:%M").to_string()
}

pub fn format_datetime(dt: DateTime<Utc>) -> String {
    dt.with_timezone(&Local).format("%-d %b %Y %H:%M").to_string()
}

pub fn format_optional_time(dt: Option<DateTime<Utc>>) -> String {
    dt.map(format_time).unwrap_or_else(|| "--:--".to_string())
}

/// Integer with "." as thousands separator (1234567 → "1.234.567").
pub fn format_number(n: i64) -> String {
    let digits = n.unsigned_abs().to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3 + 1);

    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push('.');
        }
        out.push(c);
    }

    if n < 0 { format!("-{out}") } else { out }
}

/// Rounded percentage of `value` over `total`; 0 when `total` is 0.
pub fn calculate_percentage(value: i64, total: i64) -> i64 {
    if total == 0 {
        return 0;
    }
    ((value as f64 / total as f64) * 100.0).round() as i64
}
