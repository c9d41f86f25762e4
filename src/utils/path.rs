//! Path utilities: expand ~, derive sibling files of the database, etc.

use std::path::PathBuf;

pub fn expand_tilde(path: &str) -> PathBuf {
    if path.starts_with("~/")
        && let Some(home) = dirs::home_dir()
    {
        return home.join(path.trim_start_matches("~/"));
    }
    PathBuf::from(path)
}

/// `<db>.local.json`: local device storage kept next to the database file.
pub fn local_storage_file(db_path: &str) -> PathBuf {
    let db = expand_tilde(db_path);
    let name = db
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_else(|| "rtimeclock".to_string());

    db.with_file_name(format!("{name}.local.json"))
}
