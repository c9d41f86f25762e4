use crate::errors::{AppError, AppResult};
use crate::models::break_kind::BreakKind;
use crate::utils::time::parse_work_duration;
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::io::{self, Write};
use std::path::PathBuf;

#[derive(Debug, Serialize, Deserialize)]
pub struct Config {
    pub database: String,
    /// Nominal workday; net time beyond it counts as overtime.
    #[serde(default = "default_min_work_duration")]
    pub min_work_duration: String,
    #[serde(default = "default_session_timeout")]
    pub session_timeout_hours: i64,
    #[serde(default = "default_page_size")]
    pub page_size: i64,
    #[serde(default = "default_break_kind")]
    pub default_break_kind: String,
    #[serde(default = "default_separator_char")]
    pub separator_char: String,
}

fn default_min_work_duration() -> String {
    "8h".to_string()
}
fn default_session_timeout() -> i64 {
    24
}
fn default_page_size() -> i64 {
    20
}
fn default_break_kind() -> String {
    "rest".to_string()
}
fn default_separator_char() -> String {
    "-".to_string()
}

impl Default for Config {
    fn default() -> Self {
        let db_path = Self::database_file();
        Self {
            database: db_path.to_string_lossy().to_string(),
            min_work_duration: default_min_work_duration(),
            session_timeout_hours: default_session_timeout(),
            page_size: default_page_size(),
            default_break_kind: default_break_kind(),
            separator_char: default_separator_char(),
        }
    }
}

impl Config {
    /// Return the standard configuration directory depending on the platform
    pub fn config_dir() -> PathBuf {
        if cfg!(target_os = "windows") {
            let appdata = env::var("APPDATA").unwrap_or_else(|_| ".".to_string());
            PathBuf::from(appdata).join("rtimeclock")
        } else {
            let home = env::var("HOME").unwrap_or_else(|_| ".".to_string());
            PathBuf::from(home).join(".rtimeclock")
        }
    }

    /// Return the full path of the config file
    pub fn config_file() -> PathBuf {
        Self::config_dir().join("rtimeclock.conf")
    }

    /// Return the full path of the SQLite database
    pub fn database_file() -> PathBuf {
        Self::config_dir().join("rtimeclock.sqlite")
    }

    /// Load configuration from file, or return defaults if not found
    pub fn load() -> AppResult<Self> {
        let path = Self::config_file();

        if path.exists() {
            let content = fs::read_to_string(&path).map_err(|_| AppError::ConfigLoad)?;
            serde_yaml::from_str(&content)
                .map_err(|e| AppError::Config(format!("{}: {}", path.display(), e)))
        } else {
            Ok(Config::default())
        }
    }

    /// Nominal workday in seconds (falls back to 8h on an unreadable value).
    pub fn nominal_workday_seconds(&self) -> i64 {
        parse_work_duration(&self.min_work_duration).unwrap_or(8 * 3600)
    }

    pub fn break_kind(&self) -> BreakKind {
        BreakKind::from_code(&self.default_break_kind).unwrap_or(BreakKind::Rest)
    }

    /// Initialize configuration and database files
    pub fn init_all(custom_name: Option<String>, is_test: bool) -> AppResult<PathBuf> {
        let dir = Self::config_dir();

        // DB name: user provided or default
        let db_path = if let Some(name) = custom_name {
            let p = std::path::Path::new(&name);
            if p.is_absolute() {
                p.to_path_buf()
            } else {
                dir.join(p)
            }
        } else {
            dir.join("rtimeclock.sqlite")
        };

        let config = Config {
            database: db_path.to_string_lossy().to_string(),
            ..Config::default()
        };

        // Write config file
        if !is_test {
            fs::create_dir_all(&dir)?;
            let yaml = serde_yaml::to_string(&config).map_err(|_| AppError::ConfigSave)?;
            let mut file = fs::File::create(Self::config_file())?;
            file.write_all(yaml.as_bytes())?;
            println!("✅ Config file: {:?}", Self::config_file());
        }

        if let Some(parent) = db_path.parent() {
            fs::create_dir_all(parent)
                .map_err(|e| io::Error::new(e.kind(), format!("{}: {}", parent.display(), e)))?;
        }

        // Create empty DB file if not exists
        if !db_path.exists() {
            fs::File::create(&db_path)?;
        }

        println!("✅ Database:    {:?}", db_path);

        Ok(db_path)
    }
}
