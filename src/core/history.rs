//! Session history: filtered, paginated listing plus the role-gated edit
//! and delete of past records. Every edit and delete leaves an audit row in
//! the `log` table.

use crate::core::auth::AuthLogic;
use crate::core::calculator::totals::net_at_close;
use crate::db::log::ttlog;
use crate::db::pool::DbPool;
use crate::db::queries::{self, SessionQuery};
use crate::db::users;
use crate::errors::{AppError, AppResult};
use crate::models::role::Access;
use crate::models::status::SessionStatus;
use crate::models::user::User;
use crate::models::work_session::WorkSession;
use chrono::{DateTime, NaiveDate, Utc};
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Pagination {
    pub page: i64,
    pub page_size: i64,
    pub total: i64,
    pub total_pages: i64,
}

/// `ceil(total / page_size)`; zero rows means zero pages.
pub fn total_pages(total: i64, page_size: i64) -> i64 {
    if page_size <= 0 || total <= 0 {
        return 0;
    }
    (total - 1) / page_size + 1
}

#[derive(Debug, Clone, Default)]
pub struct HistoryFilter {
    pub from: Option<NaiveDate>,
    pub to: Option<NaiveDate>,
    pub status: Option<SessionStatus>,
    /// 1-based.
    pub page: i64,
    pub page_size: i64,
    /// Another user's records (supervisors and admins only).
    pub user_email: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HistoryPage {
    pub user: User,
    pub rows: Vec<WorkSession>,
    pub pagination: Pagination,
}

/// Changes applied by a supervisor. `None` leaves the field untouched.
#[derive(Debug, Clone, Default)]
pub struct SessionEdit {
    pub clock_in: Option<DateTime<Utc>>,
    pub clock_out: Option<DateTime<Utc>>,
    pub status: Option<SessionStatus>,
}

impl SessionEdit {
    pub fn is_empty(&self) -> bool {
        self.clock_in.is_none() && self.clock_out.is_none() && self.status.is_none()
    }
}

fn describe(edit: &SessionEdit) -> String {
    let mut parts = Vec::new();
    if let Some(t) = edit.clock_in {
        parts.push(format!("clock_in={}", t.to_rfc3339()));
    }
    if let Some(t) = edit.clock_out {
        parts.push(format!("clock_out={}", t.to_rfc3339()));
    }
    if let Some(s) = edit.status {
        parts.push(format!("status={}", s.to_db_str()));
    }
    parts.join(", ")
}

/// Apply `edit` to `session` and bring `net_seconds` back in line with the
/// timestamps. Reopening a session drops its clock-out.
pub fn apply_edit(session: &mut WorkSession, edit: &SessionEdit) -> AppResult<()> {
    if let Some(t) = edit.clock_in {
        session.clock_in = t;
    }
    if let Some(t) = edit.clock_out {
        session.clock_out = Some(t);
        if edit.status.is_none() {
            session.status = SessionStatus::Completed;
        }
    }
    if let Some(status) = edit.status {
        session.status = status;
    }

    match session.status {
        SessionStatus::Active => {
            session.clock_out = None;
            session.net_seconds = None;
        }
        SessionStatus::Completed => {
            let out = session.clock_out.ok_or(AppError::MissingField("clock out"))?;
            session.net_seconds = Some(net_at_close(session, out));
        }
    }
    Ok(())
}

pub struct HistoryLogic;

impl HistoryLogic {
    /// Whose records the filter asks for: the signed-in user by default.
    fn target_user(pool: &DbPool, auth: &AuthLogic, filter: &HistoryFilter) -> AppResult<User> {
        let me = auth.require_user()?;

        match &filter.user_email {
            Some(email) if !email.trim().eq_ignore_ascii_case(&me.email) => {
                auth.require_role(
                    Access::Supervisor,
                    "only supervisors can view other users' records",
                )?;
                users::find_user_by_email(&pool.conn, email.trim())?
                    .ok_or_else(|| AppError::UserNotFound(email.clone()))
            }
            _ => Ok(me.clone()),
        }
    }

    fn query_for(user: &User, filter: &HistoryFilter) -> SessionQuery {
        SessionQuery {
            user_id: user.id.clone(),
            from: filter.from,
            to: filter.to,
            status: filter.status,
            newest_first: true,
            limit: None,
            offset: 0,
        }
    }

    /// One page of sessions, newest day first, each with its breaks.
    pub fn list(pool: &DbPool, auth: &AuthLogic, filter: &HistoryFilter) -> AppResult<HistoryPage> {
        let user = Self::target_user(pool, auth, filter)?;

        let page = filter.page.max(1);
        let page_size = filter.page_size.max(1);

        let mut query = Self::query_for(&user, filter);
        let total = queries::count_sessions(&pool.conn, &query)?;

        query.limit = Some(page_size);
        query.offset = (page - 1).saturating_mul(page_size);
        let rows = queries::query_sessions(&pool.conn, &query)?;

        Ok(HistoryPage {
            user,
            rows,
            pagination: Pagination {
                page,
                page_size,
                total,
                total_pages: total_pages(total, page_size),
            },
        })
    }

    /// Every session matching the filter, ignoring pagination (for export).
    pub fn all(pool: &DbPool, auth: &AuthLogic, filter: &HistoryFilter) -> AppResult<Vec<WorkSession>> {
        let user = Self::target_user(pool, auth, filter)?;
        queries::query_sessions(&pool.conn, &Self::query_for(&user, filter))
    }

    /// Supervisor or admin: change a session. The justification is mandatory
    /// and is stored with the audit entry.
    pub fn edit(
        pool: &DbPool,
        auth: &AuthLogic,
        id: i64,
        edit: &SessionEdit,
        justification: &str,
    ) -> AppResult<WorkSession> {
        let editor = auth.require_role(Access::Supervisor, "you are not allowed to edit records")?;

        let justification = justification.trim();
        if justification.is_empty() {
            return Err(AppError::MissingJustification);
        }

        let mut session =
            queries::load_session_with_breaks(&pool.conn, id)?.ok_or(AppError::SessionNotFound(id))?;

        apply_edit(&mut session, edit)?;
        queries::update_session(&pool.conn, &session)?;

        ttlog(
            &pool.conn,
            "edit",
            &format!("session {}", id),
            &format!("{} by {}: {}", describe(edit), editor.email, justification),
        )?;

        Ok(session)
    }

    /// Admin only: remove a session and its breaks.
    pub fn delete(pool: &DbPool, auth: &AuthLogic, id: i64) -> AppResult<WorkSession> {
        let admin = auth.require_role(Access::Admin, "only administrators can delete records")?;

        let session =
            queries::load_session(&pool.conn, id)?.ok_or(AppError::SessionNotFound(id))?;

        queries::delete_session(&pool.conn, id)?;

        ttlog(
            &pool.conn,
            "del",
            &format!("session {}", id),
            &format!("Session of {} deleted by {}", session.work_date, admin.email),
        )?;

        Ok(session)
    }
}
