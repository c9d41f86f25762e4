use super::role::Role;
use serde::{Deserialize, Serialize};

/// User profile as stored in `users` (the password hash never leaves the db layer).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    pub email: String,
    pub full_name: String,
    pub job_title: Option<String>,
    pub role: Role,
    pub created_at: String,
}

impl User {
    pub fn first_name(&self) -> &str {
        self.full_name
            .split_whitespace()
            .next()
            .unwrap_or(&self.full_name)
    }
}

/// Registration payload.
#[derive(Debug, Clone, Default)]
pub struct NewUser {
    pub email: String,
    pub password: String,
    pub full_name: String,
    pub job_title: Option<String>,
}

/// Fields a user may change on their own profile.
#[derive(Debug, Clone, Default)]
pub struct ProfileUpdate {
    pub full_name: Option<String>,
    pub job_title: Option<String>,
}

/// Row of `auth_sessions`.
#[derive(Debug, Clone, PartialEq)]
pub struct AuthSession {
    pub token: String,
    pub user_id: String,
    pub created_at: String,
    pub expires_at: String,
}
