//! Daily, weekly and monthly reports over the signed-in user's sessions.

use crate::core::calculator::aggregate::{DayRow, WeekBucket, group_by_week_of_month, summarize};
use crate::core::calculator::totals::{Totals, session_totals};
use crate::db::pool::DbPool;
use crate::db::queries::{self, SessionQuery};
use crate::errors::{AppError, AppResult};
use crate::models::break_entry::Break;
use crate::models::status::SessionStatus;
use crate::models::user::User;
use crate::models::work_session::WorkSession;
use crate::utils::date::{RangeKind, date_range, month_bounds};
use chrono::{DateTime, Datelike, Days, Local, NaiveDate, Utc};
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DailyReport {
    pub date: NaiveDate,
    /// False when no session exists for the day; every total is then zero.
    pub worked: bool,
    pub clock_in: Option<DateTime<Utc>>,
    pub clock_out: Option<DateTime<Utc>>,
    pub status: Option<SessionStatus>,
    pub totals: Totals,
    pub breaks: Vec<Break>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WeeklyReport {
    pub start: NaiveDate,
    pub end: NaiveDate,
    pub total_net_seconds: i64,
    pub total_break_seconds: i64,
    pub total_overtime_seconds: i64,
    pub days_worked: i64,
    pub average_daily_seconds: i64,
    pub daily: Vec<DayRow>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MonthlyReport {
    pub month: u32,
    pub year: i32,
    pub total_net_seconds: i64,
    pub total_break_seconds: i64,
    pub total_overtime_seconds: i64,
    pub days_worked: i64,
    pub average_daily_seconds: i64,
    pub weekly: Vec<WeekBucket>,
}

fn sessions_between(
    pool: &DbPool,
    user: &User,
    from: NaiveDate,
    to: NaiveDate,
) -> AppResult<Vec<WorkSession>> {
    queries::query_sessions(
        &pool.conn,
        &SessionQuery {
            user_id: user.id.clone(),
            from: Some(from),
            to: Some(to),
            ..SessionQuery::default()
        },
    )
}

pub struct ReportLogic;

impl ReportLogic {
    /// Most recent session of `date`; an active one is measured up to `now`.
    pub fn daily(
        pool: &DbPool,
        user: &User,
        date: NaiveDate,
        now: DateTime<Local>,
        nominal_seconds: i64,
    ) -> AppResult<DailyReport> {
        let Some(session) = queries::latest_session_with_breaks(&pool.conn, &user.id, &date)? else {
            return Ok(DailyReport {
                date,
                worked: false,
                clock_in: None,
                clock_out: None,
                status: None,
                totals: Totals::default(),
                breaks: Vec::new(),
            });
        };

        let totals = session_totals(&session, now.with_timezone(&Utc), nominal_seconds);

        Ok(DailyReport {
            date,
            worked: true,
            clock_in: Some(session.clock_in),
            clock_out: session.clock_out,
            status: Some(session.status),
            totals,
            breaks: session.breaks,
        })
    }

    /// Seven days from `start`, or the Sunday-to-Saturday week around `today`.
    pub fn weekly(
        pool: &DbPool,
        user: &User,
        start: Option<NaiveDate>,
        today: NaiveDate,
        nominal_seconds: i64,
    ) -> AppResult<WeeklyReport> {
        let (start, end) = match start {
            Some(s) => {
                let end = s
                    .checked_add_days(Days::new(6))
                    .ok_or_else(|| AppError::InvalidDate(s.to_string()))?;
                (s, end)
            }
            None => date_range(RangeKind::Week, today),
        };

        let summary = summarize(&sessions_between(pool, user, start, end)?, nominal_seconds);

        Ok(WeeklyReport {
            start,
            end,
            total_net_seconds: summary.total_net_seconds,
            total_break_seconds: summary.total_break_seconds,
            total_overtime_seconds: summary.total_overtime_seconds,
            days_worked: summary.days_worked,
            average_daily_seconds: summary.average_daily_seconds,
            daily: summary.daily,
        })
    }

    /// A whole calendar month, defaulting to the month of `today`.
    pub fn monthly(
        pool: &DbPool,
        user: &User,
        month: Option<u32>,
        year: Option<i32>,
        today: NaiveDate,
        nominal_seconds: i64,
    ) -> AppResult<MonthlyReport> {
        let month = month.unwrap_or_else(|| today.month());
        let year = year.unwrap_or_else(|| today.year());

        let (first, last) = month_bounds(year, month)
            .ok_or_else(|| AppError::InvalidDate(format!("{}-{:02}", year, month)))?;

        let summary = summarize(&sessions_between(pool, user, first, last)?, nominal_seconds);

        Ok(MonthlyReport {
            month,
            year,
            total_net_seconds: summary.total_net_seconds,
            total_break_seconds: summary.total_break_seconds,
            total_overtime_seconds: summary.total_overtime_seconds,
            days_worked: summary.days_worked,
            average_daily_seconds: summary.average_daily_seconds,
            weekly: group_by_week_of_month(&summary.daily),
        })
    }
}
