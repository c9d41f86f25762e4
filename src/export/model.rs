// src/export/model.rs

use crate::core::calculator::totals::{break_seconds, completed_net_seconds};
use crate::models::work_session::WorkSession;
use crate::utils::formatting::format_duration;
use crate::utils::time::to_db_instant;
use serde::Serialize;

/// Flat view of a work session, one row per session.
#[derive(Serialize, Clone, Debug, PartialEq)]
pub struct SessionExport {
    pub id: i64,
    pub date: String,
    pub clock_in: String,
    pub clock_out: String,
    pub status: String,
    pub breaks: usize,
    pub break_seconds: i64,
    pub net_seconds: Option<i64>,
    pub net: String,
}

impl From<&WorkSession> for SessionExport {
    fn from(s: &WorkSession) -> Self {
        let end = s.clock_out.unwrap_or(s.clock_in);
        // running sessions have no net time yet
        let net = s.is_completed().then(|| completed_net_seconds(s));

        Self {
            id: s.id,
            date: s.work_date.format("%Y-%m-%d").to_string(),
            clock_in: to_db_instant(s.clock_in),
            clock_out: s.clock_out.map(to_db_instant).unwrap_or_default(),
            status: s.status.to_db_str().to_string(),
            breaks: s.breaks.len(),
            break_seconds: break_seconds(&s.breaks, end),
            net_seconds: net,
            net: net.map(format_duration).unwrap_or_default(),
        }
    }
}
