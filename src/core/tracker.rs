//! Work session state machine.
//!
//! `NoSession → Active → Completed`, with an orthogonal
//! `NoBreak ↔ OnBreak` inside `Active`. Rows live in the store; the
//! in-memory mirror is adopted from insert/update results and rebuilt by
//! [`TimeTracker::rehydrate`] on every load.

use crate::core::calculator::totals::{Totals, net_at_close, session_totals};
use crate::core::state::{SharedTracking, TrackingState};
use crate::core::ticker::{TICK_PERIOD, Ticker};
use crate::db::log::ttlog_quiet;
use crate::db::pool::DbPool;
use crate::db::queries;
use crate::errors::{AppError, AppResult};
use crate::models::break_entry::Break;
use crate::models::break_kind::BreakKind;
use crate::models::user::User;
use crate::models::work_session::WorkSession;
use crate::utils::time::calculate_duration;
use chrono::{DateTime, Local, NaiveDate, Utc};
use serde::Serialize;
use std::sync::Arc;

pub const CLOCK_IN_NOTICE: &str = "IMPORTANT: only one work session can be started per day.\n\
Once started you can take breaks whenever you need and clock out when your day is over.\n\
You will not be able to start another session until tomorrow.\n\
Start the work session now?";

/// Renders the live clock; called once per tick with the current mirror.
pub type Display = Arc<dyn Fn(&TrackingState, DateTime<Utc>) + Send + Sync>;

#[derive(Debug, Clone, PartialEq)]
pub enum ClockIn {
    Started(WorkSession),
    /// The user declined the confirmation: nothing was written.
    Cancelled,
}

/// Outcome of the load-time reconciliation with the store.
#[derive(Debug, Clone, PartialEq)]
pub enum Rehydrated {
    None,
    Session(WorkSession),
    SessionOnBreak(WorkSession, Break),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CurrentStatus {
    pub has_active_session: bool,
    pub has_active_break: bool,
    pub session_id: Option<i64>,
    pub break_id: Option<i64>,
    pub started_at: Option<DateTime<Utc>>,
    pub break_kind: Option<BreakKind>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct TodayStats {
    pub totals: Totals,
    pub is_active: bool,
    pub on_break: bool,
    pub session: Option<WorkSession>,
}

pub struct TimeTracker {
    tracking: SharedTracking,
    nominal_seconds: i64,
    display: Option<Display>,
    ticker: Option<Ticker>,
}

impl TimeTracker {
    pub fn new(tracking: SharedTracking, nominal_seconds: i64) -> Self {
        Self {
            tracking,
            nominal_seconds,
            display: None,
            ticker: None,
        }
    }

    /// Attach a live display: the 1-second tick only runs when one is set.
    pub fn set_display(&mut self, display: Display) {
        self.display = Some(display);
    }

    pub fn is_ticking(&self) -> bool {
        self.ticker.as_ref().is_some_and(Ticker::is_running)
    }

    fn start_timer(&mut self) {
        self.stop_timer();

        if let Some(display) = &self.display {
            let display = Arc::clone(display);
            let tracking = self.tracking.clone();
            self.ticker = Some(Ticker::start(TICK_PERIOD, move || {
                let snapshot = tracking.snapshot();
                display(&snapshot, Utc::now());
            }));
        }
    }

    fn stop_timer(&mut self) {
        if let Some(mut ticker) = self.ticker.take() {
            ticker.stop();
        }
    }

    /// Clock in. Refuses a second session for the same day, telling apart
    /// "still active" from "already completed". `confirm` is asked before
    /// anything is written.
    pub fn start_session<F>(
        &mut self,
        pool: &DbPool,
        user: &User,
        now: DateTime<Local>,
        confirm: F,
    ) -> AppResult<ClockIn>
    where
        F: FnOnce(&str) -> bool,
    {
        let today = now.date_naive();
        let existing = queries::sessions_for_day(&pool.conn, &user.id, &today)?;

        if existing.iter().any(WorkSession::is_active) {
            return Err(AppError::SessionAlreadyActive);
        }
        if !existing.is_empty() {
            return Err(AppError::SessionAlreadyCompleted);
        }

        if !confirm(CLOCK_IN_NOTICE) {
            return Ok(ClockIn::Cancelled);
        }

        let session = match queries::insert_session(&pool.conn, &user.id, &today, now.with_timezone(&Utc)) {
            Ok(s) => s,
            // another client clocked in between the check and the insert
            Err(e) if queries::is_unique_violation(&e) => {
                let raced = queries::sessions_for_day(&pool.conn, &user.id, &today)?;
                return Err(if raced.iter().any(WorkSession::is_active) {
                    AppError::SessionAlreadyActive
                } else {
                    AppError::SessionAlreadyCompleted
                });
            }
            Err(e) => return Err(e),
        };

        {
            let mut state = self.tracking.lock();
            state.session = Some(session.clone());
            state.open_break = None;
        }
        self.start_timer();

        ttlog_quiet(
            &pool.conn,
            "clock_in",
            &user.email,
            &format!("Session {} started on {}", session.id, today),
        );

        Ok(ClockIn::Started(session))
    }

    /// Clock out. An open break is ended first.
    pub fn end_session(&mut self, pool: &DbPool, now: DateTime<Local>) -> AppResult<WorkSession> {
        let Some(active) = self.tracking.lock().session.clone() else {
            return Err(AppError::NoActiveSession);
        };

        if self.tracking.lock().open_break.is_some() {
            self.end_break(pool, now)?;
        }

        let clock_out = now.with_timezone(&Utc);
        let mut current = active.clone();
        current.breaks = queries::load_breaks(&pool.conn, active.id)?;
        let net = net_at_close(&current, clock_out);

        let mut completed = queries::complete_session(&pool.conn, active.id, clock_out, net)?;
        completed.breaks = current.breaks;

        self.stop_timer();
        self.tracking.lock().clear();

        ttlog_quiet(
            &pool.conn,
            "clock_out",
            &active.user_id,
            &format!("Session {} completed, net {}s", completed.id, net),
        );

        Ok(completed)
    }

    pub fn start_break(
        &mut self,
        pool: &DbPool,
        kind: BreakKind,
        now: DateTime<Local>,
    ) -> AppResult<Break> {
        let (session, open) = {
            let state = self.tracking.lock();
            (state.session.clone(), state.open_break.is_some())
        };

        let Some(session) = session else {
            return Err(AppError::NoActiveSession);
        };
        if open {
            return Err(AppError::BreakAlreadyActive);
        }

        let b = queries::insert_break(&pool.conn, session.id, kind, now.with_timezone(&Utc))?;
        self.tracking.lock().open_break = Some(b.clone());

        ttlog_quiet(
            &pool.conn,
            "break_start",
            &session.user_id,
            &format!("Break {} ({}) started in session {}", b.id, kind.to_db_str(), session.id),
        );

        Ok(b)
    }

    pub fn end_break(&mut self, pool: &DbPool, now: DateTime<Local>) -> AppResult<Break> {
        let Some(open) = self.tracking.lock().open_break.clone() else {
            return Err(AppError::NoActiveBreak);
        };

        let ended_at = now.with_timezone(&Utc);
        let duration = calculate_duration(open.started_at, ended_at);
        let b = queries::close_break(&pool.conn, open.id, ended_at, duration)?;

        self.tracking.lock().open_break = None;

        ttlog_quiet(
            &pool.conn,
            "break_end",
            &open.session_id.to_string(),
            &format!("Break {} ended after {}s", b.id, duration),
        );

        Ok(b)
    }

    /// Rebuild the in-memory mirror from the store: today's active session
    /// and, when present, its open break. Resumes the tick.
    pub fn rehydrate(&mut self, pool: &DbPool, user: &User, today: NaiveDate) -> AppResult<Rehydrated> {
        let session = queries::find_active_session(&pool.conn, &user.id, &today)?;

        let Some(session) = session else {
            self.stop_timer();
            self.tracking.lock().clear();
            return Ok(Rehydrated::None);
        };

        let open_break = queries::find_open_break(&pool.conn, session.id)?;
        {
            let mut state = self.tracking.lock();
            state.session = Some(session.clone());
            state.open_break = open_break.clone();
        }
        self.start_timer();

        Ok(match open_break {
            Some(b) => Rehydrated::SessionOnBreak(session, b),
            None => Rehydrated::Session(session),
        })
    }

    pub fn status(&self) -> CurrentStatus {
        let state = self.tracking.lock();
        CurrentStatus {
            has_active_session: state.session.is_some(),
            has_active_break: state.open_break.is_some(),
            session_id: state.session.as_ref().map(|s| s.id),
            break_id: state.open_break.as_ref().map(|b| b.id),
            started_at: state.session.as_ref().map(|s| s.clock_in),
            break_kind: state.open_break.as_ref().map(|b| b.kind),
        }
    }

    /// Totals of today's most recent session, open intervals counted up to `now`.
    pub fn today_stats(&self, pool: &DbPool, user: &User, now: DateTime<Local>) -> AppResult<TodayStats> {
        let session =
            queries::latest_session_with_breaks(&pool.conn, &user.id, &now.date_naive())?;

        let Some(session) = session else {
            return Ok(TodayStats::default());
        };

        Ok(TodayStats {
            totals: session_totals(&session, now.with_timezone(&Utc), self.nominal_seconds),
            is_active: session.is_active(),
            on_break: self.tracking.lock().open_break.is_some(),
            session: Some(session),
        })
    }
}

impl Drop for TimeTracker {
    fn drop(&mut self) {
        self.stop_timer();
    }
}
