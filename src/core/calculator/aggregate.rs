//! Period aggregation over completed sessions (weekly / monthly reports).

use crate::core::calculator::totals::{break_seconds, completed_net_seconds, overtime};
use crate::models::work_session::WorkSession;
use crate::utils::date::week_of_month;
use chrono::NaiveDate;
use serde::Serialize;
use std::collections::BTreeMap;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DayRow {
    pub date: NaiveDate,
    pub net_seconds: i64,
    pub break_seconds: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WeekBucket {
    pub week: u32,
    pub total_seconds: i64,
    pub days: i64,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct PeriodSummary {
    pub total_net_seconds: i64,
    pub total_break_seconds: i64,
    pub total_overtime_seconds: i64,
    pub days_worked: i64,
    pub average_daily_seconds: i64,
    pub daily: Vec<DayRow>,
}

/// Sum the completed sessions; active ones are still running and are skipped.
pub fn summarize(sessions: &[WorkSession], nominal_seconds: i64) -> PeriodSummary {
    let mut summary = PeriodSummary::default();

    for s in sessions.iter().filter(|s| s.is_completed()) {
        let net = completed_net_seconds(s);
        let end = s.clock_out.unwrap_or(s.clock_in);
        let breaks = break_seconds(&s.breaks, end);

        summary.total_net_seconds += net;
        summary.total_break_seconds += breaks;
        summary.total_overtime_seconds += overtime(net, nominal_seconds);
        summary.days_worked += 1;
        summary.daily.push(DayRow {
            date: s.work_date,
            net_seconds: net,
            break_seconds: breaks,
        });
    }

    summary.daily.sort_by_key(|d| d.date);

    if summary.days_worked > 0 {
        summary.average_daily_seconds = summary.total_net_seconds.div_euclid(summary.days_worked);
    }

    summary
}

/// Group day rows by week of the month (`ceil(day / 7)`), in week order.
pub fn group_by_week_of_month(rows: &[DayRow]) -> Vec<WeekBucket> {
    let mut weeks: BTreeMap<u32, WeekBucket> = BTreeMap::new();

    for row in rows {
        let week = week_of_month(row.date);
        let bucket = weeks.entry(week).or_insert(WeekBucket {
            week,
            total_seconds: 0,
            days: 0,
        });
        bucket.total_seconds += row.net_seconds;
        bucket.days += 1;
    }

    weeks.into_values().collect()
}
