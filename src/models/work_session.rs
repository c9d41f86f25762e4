use super::{break_entry::Break, status::SessionStatus};
use chrono::{DateTime, NaiveDate, Utc};
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WorkSession {
    pub id: i64,
    pub user_id: String,
    pub work_date: NaiveDate,            // ⇔ work_sessions.work_date (TEXT "YYYY-MM-DD")
    pub clock_in: DateTime<Utc>,         // ⇔ work_sessions.clock_in (RFC 3339)
    pub clock_out: Option<DateTime<Utc>>,
    pub status: SessionStatus,           // ⇔ work_sessions.status ('active' | 'completed')
    pub net_seconds: Option<i64>,
    pub created_at: String,

    /// Filled only by the nested fetches (session with its breaks).
    pub breaks: Vec<Break>,
}

impl WorkSession {
    pub fn is_active(&self) -> bool {
        self.status == SessionStatus::Active
    }

    pub fn is_completed(&self) -> bool {
        self.status == SessionStatus::Completed
    }
}
