use super::{break_kind::BreakKind, status::BreakStatus};
use chrono::{DateTime, Utc};
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Break {
    pub id: i64,
    pub session_id: i64,        // ⇔ breaks.session_id
    pub kind: BreakKind,        // ⇔ breaks.kind ('meal' | 'rest' | 'personal')
    pub started_at: DateTime<Utc>,
    pub ended_at: Option<DateTime<Utc>>,
    pub status: BreakStatus,    // ⇔ breaks.status ('active' | 'ended')
    pub duration_seconds: Option<i64>,
}

impl Break {
    pub fn is_open(&self) -> bool {
        self.status == BreakStatus::Active
    }
}
