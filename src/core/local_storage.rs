//! Local device storage: a small JSON key-value file next to the database.
//! It only caches data (sign-in token, user profile); the store stays
//! authoritative.

use crate::errors::AppResult;
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};
use std::fs;
use std::path::{Path, PathBuf};

pub const AUTH_TOKEN_KEY: &str = "auth_token";
pub const USER_PROFILE_KEY: &str = "user_profile";

#[derive(Debug, Clone)]
pub struct LocalStorage {
    path: PathBuf,
}

impl LocalStorage {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_all(&self) -> Map<String, Value> {
        fs::read_to_string(&self.path)
            .ok()
            .and_then(|content| serde_json::from_str::<Map<String, Value>>(&content).ok())
            .unwrap_or_default()
    }

    fn write_all(&self, map: &Map<String, Value>) -> AppResult<()> {
        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent)?;
        }
        fs::write(&self.path, serde_json::to_string_pretty(map)?)?;
        Ok(())
    }

    pub fn save<T: Serialize>(&self, key: &str, value: &T) -> AppResult<()> {
        let mut map = self.read_all();
        map.insert(key.to_string(), serde_json::to_value(value)?);
        self.write_all(&map)
    }

    /// Stored value, or `None` when absent or unreadable.
    pub fn get<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        self.read_all()
            .remove(key)
            .and_then(|v| serde_json::from_value(v).ok())
    }

    pub fn remove(&self, key: &str) -> AppResult<()> {
        let mut map = self.read_all();
        if map.remove(key).is_some() {
            self.write_all(&map)?;
        }
        Ok(())
    }

    pub fn clear(&self) -> AppResult<()> {
        if self.path.exists() {
            fs::remove_file(&self.path)?;
        }
        Ok(())
    }
}
