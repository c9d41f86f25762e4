//! Per-session arithmetic: total, break, net and overtime seconds.

use crate::models::break_entry::Break;
use crate::models::work_session::WorkSession;
use crate::utils::time::calculate_duration;
use chrono::{DateTime, Utc};
use serde::Serialize;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Totals {
    pub total_seconds: i64,
    pub break_seconds: i64,
    pub net_seconds: i64,
    pub overtime_seconds: i64,
}

/// Net time beyond the nominal workday, never negative.
pub fn overtime(net_seconds: i64, nominal_seconds: i64) -> i64 {
    (net_seconds - nominal_seconds).max(0)
}

/// An open session runs until `now`; a closed one without clock-out counts as empty.
fn session_end(s: &WorkSession, now: DateTime<Utc>) -> DateTime<Utc> {
    match s.clock_out {
        Some(out) => out,
        None if s.is_active() => now,
        None => s.clock_in,
    }
}

fn break_end(b: &Break, now: DateTime<Utc>) -> DateTime<Utc> {
    match b.ended_at {
        Some(end) => end,
        None if b.is_open() => now,
        None => b.started_at,
    }
}

/// Seconds spent on breaks; an open break contributes up to `now`.
pub fn break_seconds(breaks: &[Break], now: DateTime<Utc>) -> i64 {
    breaks
        .iter()
        .map(|b| calculate_duration(b.started_at, break_end(b, now)))
        .sum()
}

/// Totals of a session using its attached breaks.
pub fn session_totals(s: &WorkSession, now: DateTime<Utc>, nominal_seconds: i64) -> Totals {
    let total = calculate_duration(s.clock_in, session_end(s, now));
    let breaks = break_seconds(&s.breaks, now);
    let net = total - breaks;

    Totals {
        total_seconds: total,
        break_seconds: breaks,
        net_seconds: net,
        overtime_seconds: overtime(net, nominal_seconds),
    }
}

/// Net seconds of a session closing at `clock_out`.
pub fn net_at_close(s: &WorkSession, clock_out: DateTime<Utc>) -> i64 {
    calculate_duration(s.clock_in, clock_out) - break_seconds(&s.breaks, clock_out)
}

/// Net time of a completed session: the stored value, recomputed from the
/// timestamps when the row has none.
pub fn completed_net_seconds(s: &WorkSession) -> i64 {
    match s.net_seconds {
        Some(net) => net,
        None => net_at_close(s, s.clock_out.unwrap_or(s.clock_in)),
    }
}
