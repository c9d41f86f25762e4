//! In-memory application state.
//!
//! Lifecycle: built empty at start-up, filled by the auth init / rehydrate
//! steps, mutated by auth and tracking operations, cleared on sign-out.
//! The tracking part mirrors rows owned by the store and is never trusted
//! across runs: it is rebuilt from the store on every load.

use crate::models::break_entry::Break;
use crate::models::user::{AuthSession, User};
use crate::models::work_session::WorkSession;
use std::sync::{Arc, Mutex, MutexGuard};

#[derive(Debug, Clone, Default, PartialEq)]
pub struct TrackingState {
    pub session: Option<WorkSession>,
    pub open_break: Option<Break>,
}

impl TrackingState {
    pub fn clear(&mut self) {
        self.session = None;
        self.open_break = None;
    }
}

/// Tracking state shared with the display ticker thread.
#[derive(Debug, Clone, Default)]
pub struct SharedTracking(Arc<Mutex<TrackingState>>);

impl SharedTracking {
    pub fn lock(&self) -> MutexGuard<'_, TrackingState> {
        // the ticker only reads, so a poisoned lock still holds valid data
        self.0.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    pub fn snapshot(&self) -> TrackingState {
        self.lock().clone()
    }
}

#[derive(Debug, Default)]
pub struct AppState {
    pub current_user: Option<User>,
    pub auth_session: Option<AuthSession>,
    pub tracking: SharedTracking,
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_authenticated(&self) -> bool {
        self.current_user.is_some() && self.auth_session.is_some()
    }

    pub fn sign_in(&mut self, user: User, session: AuthSession) {
        self.current_user = Some(user);
        self.auth_session = Some(session);
    }

    /// Forget everything: user, sign-in session and tracking mirror.
    pub fn clear(&mut self) {
        self.current_user = None;
        self.auth_session = None;
        self.tracking.lock().clear();
    }
}
