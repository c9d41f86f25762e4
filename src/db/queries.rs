use crate::errors::{AppError, AppResult};
use crate::models::break_entry::Break;
use crate::models::break_kind::BreakKind;
use crate::models::status::{BreakStatus, SessionStatus};
use crate::models::work_session::WorkSession;
use crate::utils::time::{from_db_instant, to_db_instant};
use chrono::{DateTime, Local, NaiveDate, Utc};
use rusqlite::types::Type;
use rusqlite::{Connection, OptionalExtension, Result, Row, ToSql, params, params_from_iter};

fn conversion_error(col: usize, err: AppError) -> rusqlite::Error {
    rusqlite::Error::FromSqlConversionFailure(col, Type::Text, Box::new(err))
}

fn instant_col(row: &Row, name: &str) -> Result<DateTime<Utc>> {
    let raw: String = row.get(name)?;
    from_db_instant(&raw).ok_or_else(|| conversion_error(0, AppError::InvalidTime(raw.clone())))
}

fn optional_instant_col(row: &Row, name: &str) -> Result<Option<DateTime<Utc>>> {
    match row.get::<_, Option<String>>(name)? {
        Some(raw) => from_db_instant(&raw)
            .map(Some)
            .ok_or_else(|| conversion_error(0, AppError::InvalidTime(raw.clone()))),
        None => Ok(None),
    }
}

pub fn map_session_row(row: &Row) -> Result<WorkSession> {
    let date_str: String = row.get("work_date")?;
    let work_date = NaiveDate::parse_from_str(&date_str, "%Y-%m-%d")
        .map_err(|_| conversion_error(0, AppError::InvalidDate(date_str.clone())))?;

    let status_str: String = row.get("status")?;
    let status = SessionStatus::from_db_str(&status_str).ok_or_else(|| {
        conversion_error(0, AppError::Other(format!("Invalid session status: {}", status_str)))
    })?;

    Ok(WorkSession {
        id: row.get("id")?,
        user_id: row.get("user_id")?,
        work_date,
        clock_in: instant_col(row, "clock_in")?,
        clock_out: optional_instant_col(row, "clock_out")?,
        status,
        net_seconds: row.get("net_seconds")?,
        created_at: row.get("created_at")?,
        breaks: Vec::new(),
    })
}

pub fn map_break_row(row: &Row) -> Result<Break> {
    let kind_str: String = row.get("kind")?;
    let kind = BreakKind::from_db_str(&kind_str).ok_or_else(|| {
        conversion_error(0, AppError::Other(format!("Invalid break kind: {}", kind_str)))
    })?;

    let status_str: String = row.get("status")?;
    let status = BreakStatus::from_db_str(&status_str).ok_or_else(|| {
        conversion_error(0, AppError::Other(format!("Invalid break status: {}", status_str)))
    })?;

    Ok(Break {
        id: row.get("id")?,
        session_id: row.get("session_id")?,
        kind,
        started_at: instant_col(row, "started_at")?,
        ended_at: optional_instant_col(row, "ended_at")?,
        status,
        duration_seconds: row.get("duration_seconds")?,
    })
}

fn date_str(date: &NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

// ------------------------------------------------
// Work sessions
// ------------------------------------------------

/// All sessions of a user for one calendar day (normally zero or one).
pub fn sessions_for_day(conn: &Connection, user_id: &str, date: &NaiveDate) -> AppResult<Vec<WorkSession>> {
    let mut stmt = conn.prepare_cached(
        "SELECT * FROM work_sessions
         WHERE user_id = ?1 AND work_date = ?2
         ORDER BY created_at DESC, id DESC",
    )?;

    let rows = stmt.query_map(params![user_id, date_str(date)], map_session_row)?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}

pub fn find_active_session(
    conn: &Connection,
    user_id: &str,
    date: &NaiveDate,
) -> AppResult<Option<WorkSession>> {
    let session = conn
        .query_row(
            "SELECT * FROM work_sessions
             WHERE user_id = ?1 AND work_date = ?2 AND status = 'active'
             LIMIT 1",
            params![user_id, date_str(date)],
            map_session_row,
        )
        .optional()?;
    Ok(session)
}

pub fn load_session(conn: &Connection, id: i64) -> AppResult<Option<WorkSession>> {
    let session = conn
        .query_row("SELECT * FROM work_sessions WHERE id = ?1", [id], map_session_row)
        .optional()?;
    Ok(session)
}

/// Load one session together with its breaks.
pub fn load_session_with_breaks(conn: &Connection, id: i64) -> AppResult<Option<WorkSession>> {
    match load_session(conn, id)? {
        Some(mut s) => {
            s.breaks = load_breaks(conn, s.id)?;
            Ok(Some(s))
        }
        None => Ok(None),
    }
}

/// Most recent session of the day, with its breaks.
pub fn latest_session_with_breaks(
    conn: &Connection,
    user_id: &str,
    date: &NaiveDate,
) -> AppResult<Option<WorkSession>> {
    let latest = sessions_for_day(conn, user_id, date)?.into_iter().next();
    match latest {
        Some(mut s) => {
            s.breaks = load_breaks(conn, s.id)?;
            Ok(Some(s))
        }
        None => Ok(None),
    }
}

pub fn insert_session(
    conn: &Connection,
    user_id: &str,
    date: &NaiveDate,
    clock_in: DateTime<Utc>,
) -> AppResult<WorkSession> {
    conn.execute(
        "INSERT INTO work_sessions (user_id, work_date, clock_in, status, created_at)
         VALUES (?1, ?2, ?3, 'active', ?4)",
        params![
            user_id,
            date_str(date),
            to_db_instant(clock_in),
            Local::now().to_rfc3339(),
        ],
    )?;

    let id = conn.last_insert_rowid();
    load_session(conn, id)?.ok_or(AppError::SessionNotFound(id))
}

/// Close a session: clock-out, status `completed`, stored net time.
pub fn complete_session(
    conn: &Connection,
    id: i64,
    clock_out: DateTime<Utc>,
    net_seconds: i64,
) -> AppResult<WorkSession> {
    let changed = conn.execute(
        "UPDATE work_sessions
         SET clock_out = ?1, status = 'completed', net_seconds = ?2
         WHERE id = ?3",
        params![to_db_instant(clock_out), net_seconds, id],
    )?;

    if changed == 0 {
        return Err(AppError::SessionNotFound(id));
    }
    load_session(conn, id)?.ok_or(AppError::SessionNotFound(id))
}

/// Update a session (all fields except id, user and creation time)
pub fn update_session(conn: &Connection, s: &WorkSession) -> AppResult<()> {
    let changed = conn.execute(
        "UPDATE work_sessions
         SET work_date = ?1, clock_in = ?2, clock_out = ?3,
             status = ?4, net_seconds = ?5
         WHERE id = ?6",
        params![
            date_str(&s.work_date),
            to_db_instant(s.clock_in),
            s.clock_out.map(to_db_instant),
            s.status.to_db_str(),
            s.net_seconds,
            s.id,
        ],
    )?;

    if changed == 0 {
        return Err(AppError::SessionNotFound(s.id));
    }
    Ok(())
}

/// Delete a session and its breaks.
pub fn delete_session(conn: &Connection, id: i64) -> AppResult<()> {
    conn.execute("DELETE FROM breaks WHERE session_id = ?1", [id])?;
    let changed = conn.execute("DELETE FROM work_sessions WHERE id = ?1", [id])?;
    if changed == 0 {
        return Err(AppError::SessionNotFound(id));
    }
    Ok(())
}

/// Filters for the session listing. `None` means "no filter".
#[derive(Debug, Clone, Default)]
pub struct SessionQuery {
    pub user_id: String,
    pub from: Option<NaiveDate>,
    pub to: Option<NaiveDate>,
    pub status: Option<SessionStatus>,
    /// Newest first when true, oldest first otherwise.
    pub newest_first: bool,
    pub limit: Option<i64>,
    pub offset: i64,
}

impl SessionQuery {
    fn where_clause(&self) -> (String, Vec<Box<dyn ToSql>>) {
        let mut clause = String::from("user_id = ?");
        let mut args: Vec<Box<dyn ToSql>> = vec![Box::new(self.user_id.clone())];

        if let Some(from) = &self.from {
            clause.push_str(" AND work_date >= ?");
            args.push(Box::new(date_str(from)));
        }
        if let Some(to) = &self.to {
            clause.push_str(" AND work_date <= ?");
            args.push(Box::new(date_str(to)));
        }
        if let Some(status) = &self.status {
            clause.push_str(" AND status = ?");
            args.push(Box::new(status.to_db_str()));
        }

        (clause, args)
    }
}

/// Sessions matching the query, each with its breaks.
pub fn query_sessions(conn: &Connection, q: &SessionQuery) -> AppResult<Vec<WorkSession>> {
    let (clause, mut args) = q.where_clause();
    let order = if q.newest_first { "DESC" } else { "ASC" };

    let mut sql = format!(
        "SELECT * FROM work_sessions WHERE {} ORDER BY work_date {}, id {}",
        clause, order, order
    );

    if let Some(limit) = q.limit {
        sql.push_str(" LIMIT ? OFFSET ?");
        args.push(Box::new(limit));
        args.push(Box::new(q.offset));
    }

    let mut stmt = conn.prepare(&sql)?;
    let rows = stmt.query_map(params_from_iter(args.iter().map(|a| a.as_ref())), map_session_row)?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }

    for s in out.iter_mut() {
        s.breaks = load_breaks(conn, s.id)?;
    }
    Ok(out)
}

/// Exact number of sessions matching the query (limit/offset ignored).
pub fn count_sessions(conn: &Connection, q: &SessionQuery) -> AppResult<i64> {
    let (clause, args) = q.where_clause();
    let sql = format!("SELECT COUNT(*) FROM work_sessions WHERE {}", clause);

    let count = conn.query_row(
        &sql,
        params_from_iter(args.iter().map(|a| a.as_ref())),
        |row| row.get(0),
    )?;
    Ok(count)
}

// ------------------------------------------------
// Breaks
// ------------------------------------------------

/// Breaks of a session, most recent first.
pub fn load_breaks(conn: &Connection, session_id: i64) -> AppResult<Vec<Break>> {
    let mut stmt = conn.prepare_cached(
        "SELECT * FROM breaks
         WHERE session_id = ?1
         ORDER BY started_at DESC, id DESC",
    )?;

    let rows = stmt.query_map([session_id], map_break_row)?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}

pub fn find_open_break(conn: &Connection, session_id: i64) -> AppResult<Option<Break>> {
    let b = conn
        .query_row(
            "SELECT * FROM breaks
             WHERE session_id = ?1 AND status = 'active'
             ORDER BY started_at DESC
             LIMIT 1",
            [session_id],
            map_break_row,
        )
        .optional()?;
    Ok(b)
}

fn load_break(conn: &Connection, id: i64) -> AppResult<Break> {
    let b = conn.query_row("SELECT * FROM breaks WHERE id = ?1", [id], map_break_row)?;
    Ok(b)
}

pub fn insert_break(
    conn: &Connection,
    session_id: i64,
    kind: BreakKind,
    started_at: DateTime<Utc>,
) -> AppResult<Break> {
    conn.execute(
        "INSERT INTO breaks (session_id, kind, started_at, status)
         VALUES (?1, ?2, ?3, 'active')",
        params![session_id, kind.to_db_str(), to_db_instant(started_at)],
    )?;

    load_break(conn, conn.last_insert_rowid())
}

pub fn close_break(
    conn: &Connection,
    id: i64,
    ended_at: DateTime<Utc>,
    duration_seconds: i64,
) -> AppResult<Break> {
    conn.execute(
        "UPDATE breaks
         SET ended_at = ?1, status = 'ended', duration_seconds = ?2
         WHERE id = ?3",
        params![to_db_instant(ended_at), duration_seconds, id],
    )?;

    load_break(conn, id)
}

/// True when the error is the unique (user, day) index rejecting an insert.
pub fn is_unique_violation(err: &AppError) -> bool {
    matches!(
        err,
        AppError::Db(rusqlite::Error::SqliteFailure(e, _))
            if e.code == rusqlite::ErrorCode::ConstraintViolation
    )
}
