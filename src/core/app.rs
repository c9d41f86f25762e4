//! Application wiring: one store connection, the auth layer owning the
//! application state, and the tracker sharing its tracking mirror.

use crate::config::Config;
use crate::core::auth::{AuthEvent, AuthLogic};
use crate::core::local_storage::LocalStorage;
use crate::core::tracker::{Rehydrated, TimeTracker};
use crate::db::initialize::init_db;
use crate::db::pool::DbPool;
use crate::errors::AppResult;
use crate::utils::path::{expand_tilde, local_storage_file};
use chrono::{DateTime, Local};

pub struct App {
    pub cfg: Config,
    pub pool: DbPool,
    pub auth: AuthLogic,
    pub tracker: TimeTracker,
}

impl App {
    /// Open the database (applying pending migrations) and build the
    /// signed-out application.
    pub fn open(cfg: Config) -> AppResult<Self> {
        let db_path = expand_tilde(&cfg.database);
        let pool = DbPool::new(&db_path.to_string_lossy())?;
        init_db(&pool.conn)?;

        let storage = LocalStorage::new(local_storage_file(&cfg.database));
        let mut auth = AuthLogic::new(storage, cfg.session_timeout_hours);

        let tracking = auth.state().tracking.clone();
        auth.on_auth_state_change(move |event| {
            if let AuthEvent::SignedOut = event {
                tracking.lock().clear();
            }
        });

        let tracker = TimeTracker::new(auth.state().tracking.clone(), cfg.nominal_workday_seconds());

        Ok(Self {
            cfg,
            pool,
            auth,
            tracker,
        })
    }

    /// Restore the sign-in from local storage and, when someone is signed
    /// in, rebuild today's tracking state from the store.
    pub fn init(&mut self, now: DateTime<Local>) -> AppResult<Option<Rehydrated>> {
        if !self.auth.init(&self.pool, now)? {
            return Ok(None);
        }

        let user = self.auth.require_user()?.clone();
        let restored = self.tracker.rehydrate(&self.pool, &user, now.date_naive())?;
        Ok(Some(restored))
    }
}
