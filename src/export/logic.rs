// src/export/logic.rs

use crate::errors::{AppError, AppResult};
use crate::export::ExportFormat;
use crate::export::fs_utils::ensure_writable;
use crate::export::json_csv::{export_csv, export_json};
use crate::export::model::SessionExport;
use crate::models::work_session::WorkSession;
use crate::ui::messages::warning;
use std::path::Path;

pub struct ExportLogic;

impl ExportLogic {
    /// Write `sessions` to `file` (absolute path) as CSV or JSON.
    /// Returns the number of exported rows.
    pub fn export(
        sessions: &[WorkSession],
        format: ExportFormat,
        file: &str,
        force: bool,
    ) -> AppResult<usize> {
        let path = Path::new(file);

        if !path.is_absolute() {
            return Err(AppError::Export(format!(
                "output file path must be absolute: {file}"
            )));
        }

        if sessions.is_empty() {
            warning("No sessions found for the selected filters. Nothing to export.");
            return Ok(0);
        }

        ensure_writable(path, force)?;

        let rows: Vec<SessionExport> = sessions.iter().map(SessionExport::from).collect();

        match format {
            ExportFormat::Csv => export_csv(&rows, path)?,
            ExportFormat::Json => export_json(&rows, path)?,
        }

        Ok(rows.len())
    }
}
