//! Time utilities: parsing HH:MM, instants, duration computations, etc.

use crate::errors::{AppError, AppResult};
use chrono::{DateTime, Local, NaiveDate, NaiveDateTime, NaiveTime, SecondsFormat, TimeZone, Utc};

pub fn parse_time(t: &str) -> Option<NaiveTime> {
    NaiveTime::parse_from_str(t, "%H:%M")
        .or_else(|_| NaiveTime::parse_from_str(t, "%H:%M:%S"))
        .ok()
}

/// Whole seconds elapsed from `start` to `end`, floored.
/// Negative when `end` precedes `start`.
pub fn calculate_duration(start: DateTime<Utc>, end: DateTime<Utc>) -> i64 {
    (end - start).num_milliseconds().div_euclid(1000)
}

/// Interpret a wall-clock date and time in the local timezone.
pub fn local_instant(date: NaiveDate, time: NaiveTime) -> AppResult<DateTime<Local>> {
    Local
        .from_local_datetime(&date.and_time(time))
        .earliest()
        .ok_or_else(|| AppError::InvalidTime(format!("{} {} does not exist locally", date, time)))
}

/// Parse "YYYY-MM-DD HH:MM[:SS]" (local) or an RFC 3339 instant.
pub fn parse_instant(s: &str) -> AppResult<DateTime<Local>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Ok(dt.with_timezone(&Local));
    }

    let naive = NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S")
        .or_else(|_| NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M"))
        .map_err(|_| AppError::InvalidTime(s.to_string()))?;

    local_instant(naive.date(), naive.time())
}

/// Current instant, unless the caller pinned one (`--now`).
pub fn resolve_now(pinned: Option<&String>) -> AppResult<DateTime<Local>> {
    match pinned {
        Some(s) => parse_instant(s),
        None => Ok(Local::now()),
    }
}

/// Storage representation of an instant (UTC, millisecond precision).
pub fn to_db_instant(dt: DateTime<Utc>) -> String {
    dt.to_rfc3339_opts(SecondsFormat::Millis, true)
}

pub fn from_db_instant(s: &str) -> Option<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(s)
        .ok()
        .map(|dt| dt.with_timezone(&Utc))
}

/// Parse a work duration such as "8h", "7h30m", "450m" or "480" (minutes) into seconds.
pub fn parse_work_duration(s: &str) -> Option<i64> {
    let s = s.trim().to_lowercase();

    if let Ok(mins) = s.parse::<i64>() {
        return Some(mins * 60);
    }

    let mut total = 0;
    let mut digits = String::new();
    for c in s.chars() {
        match c {
            '0'..='9' => digits.push(c),
            'h' => {
                total += digits.parse::<i64>().ok()? * 3600;
                digits.clear();
            }
            'm' => {
                total += digits.parse::<i64>().ok()? * 60;
                digits.clear();
            }
            ' ' => {}
            _ => return None,
        }
    }

    if !digits.is_empty() {
        return None;
    }
    Some(total)
}
