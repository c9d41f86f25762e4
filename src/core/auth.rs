//! Authentication: sign-up, sign-in, sign-out, password management and
//! role checks. Owns the application state (current user and sign-in
//! session) and announces sign-in/sign-out to subscribers.

use crate::core::local_storage::{AUTH_TOKEN_KEY, LocalStorage, USER_PROFILE_KEY};
use crate::core::state::AppState;
use crate::db::log::ttlog_quiet;
use crate::db::pool::DbPool;
use crate::db::users;
use crate::errors::{AppError, AppResult};
use crate::models::role::{Access, Role};
use crate::models::user::{AuthSession, NewUser, ProfileUpdate, User};
use crate::utils::time::to_db_instant;
use crate::utils::validation::{is_valid_email, validate_password};
use argon2::password_hash::SaltString;
use argon2::{Argon2, PasswordHash, PasswordHasher, PasswordVerifier};
use chrono::{DateTime, Duration, Local, Utc};
use uuid::Uuid;

/// Lifetime of a password reset code.
const RESET_CODE_TTL_MINUTES: i64 = 60;

#[derive(Debug, Clone, PartialEq)]
pub enum AuthEvent {
    SignedIn(User),
    SignedOut,
}

pub type AuthListener = Box<dyn FnMut(&AuthEvent)>;

pub struct AuthLogic {
    state: AppState,
    storage: LocalStorage,
    session_timeout: Duration,
    listeners: Vec<AuthListener>,
}

fn hash_password(password: &str) -> AppResult<String> {
    let salt = SaltString::generate(&mut rand::thread_rng());
    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|h| h.to_string())
        .map_err(|e| AppError::Other(format!("Failed to hash password: {}", e)))
}

fn verify_password(password: &str, hash: &str) -> bool {
    PasswordHash::new(hash)
        .map(|parsed| {
            Argon2::default()
                .verify_password(password.as_bytes(), &parsed)
                .is_ok()
        })
        .unwrap_or(false)
}

fn ensure_strong(password: &str) -> AppResult<()> {
    if validate_password(password).is_valid {
        Ok(())
    } else {
        Err(AppError::WeakPassword)
    }
}

impl AuthLogic {
    pub fn new(storage: LocalStorage, session_timeout_hours: i64) -> Self {
        Self {
            state: AppState::new(),
            storage,
            session_timeout: Duration::hours(session_timeout_hours.max(1)),
            listeners: Vec::new(),
        }
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    pub fn storage(&self) -> &LocalStorage {
        &self.storage
    }

    /// Subscribe to sign-in / sign-out events.
    pub fn on_auth_state_change(&mut self, listener: impl FnMut(&AuthEvent) + 'static) {
        self.listeners.push(Box::new(listener));
    }

    fn emit(&mut self, event: AuthEvent) {
        for listener in self.listeners.iter_mut() {
            listener(&event);
        }
    }

    /// Restore the sign-in recorded in local storage, if still valid.
    /// Returns whether a user is now signed in.
    pub fn init(&mut self, pool: &DbPool, now: DateTime<Local>) -> AppResult<bool> {
        let Some(token) = self.storage.get::<String>(AUTH_TOKEN_KEY) else {
            return Ok(false);
        };

        let Some(session) = users::find_auth_session(&pool.conn, &token, now.with_timezone(&Utc))?
        else {
            // expired or revoked elsewhere
            self.storage.remove(AUTH_TOKEN_KEY)?;
            self.storage.remove(USER_PROFILE_KEY)?;
            return Ok(false);
        };

        let user = self.load_user_profile(pool, &session.user_id)?;
        self.state.sign_in(user, session);
        Ok(true)
    }

    /// Fetch the profile from the store and refresh the local cache.
    fn load_user_profile(&self, pool: &DbPool, user_id: &str) -> AppResult<User> {
        let user = users::find_user_by_id(&pool.conn, user_id)?
            .ok_or_else(|| AppError::UserNotFound(user_id.to_string()))?;
        self.storage.save(USER_PROFILE_KEY, &user)?;
        Ok(user)
    }

    /// Create an account. The first account of an empty store is an admin,
    /// every later one an employee.
    pub fn register(&mut self, pool: &DbPool, input: &NewUser) -> AppResult<User> {
        let email = input.email.trim();
        let full_name = input.full_name.trim();

        if email.is_empty() {
            return Err(AppError::MissingField("email"));
        }
        if input.password.is_empty() {
            return Err(AppError::MissingField("password"));
        }
        if full_name.is_empty() {
            return Err(AppError::MissingField("full name"));
        }
        if !is_valid_email(email) {
            return Err(AppError::InvalidEmail(email.to_string()));
        }
        ensure_strong(&input.password)?;

        if users::find_user_by_email(&pool.conn, email)?.is_some() {
            return Err(AppError::EmailTaken(email.to_string()));
        }

        let role = if users::count_users(&pool.conn)? == 0 {
            Role::Admin
        } else {
            Role::Employee
        };

        let user = User {
            id: Uuid::new_v4().to_string(),
            email: email.to_string(),
            full_name: full_name.to_string(),
            job_title: input
                .job_title
                .as_ref()
                .map(|t| t.trim().to_string())
                .filter(|t| !t.is_empty()),
            role,
            created_at: Local::now().to_rfc3339(),
        };

        users::insert_user(&pool.conn, &user, &hash_password(&input.password)?)?;
        ttlog_quiet(
            &pool.conn,
            "register",
            &user.email,
            &format!("Account created with role {}", role.to_db_str()),
        );

        Ok(user)
    }

    /// Password sign-in: opens a sign-in session valid for the configured timeout.
    pub fn login(
        &mut self,
        pool: &DbPool,
        email: &str,
        password: &str,
        now: DateTime<Local>,
    ) -> AppResult<User> {
        if email.trim().is_empty() {
            return Err(AppError::MissingField("email"));
        }
        if password.is_empty() {
            return Err(AppError::MissingField("password"));
        }

        let (user, hash) =
            users::find_credentials(&pool.conn, email.trim())?.ok_or(AppError::InvalidCredentials)?;

        if !verify_password(password, &hash) {
            ttlog_quiet(&pool.conn, "login_failed", &user.email, "Wrong password");
            return Err(AppError::InvalidCredentials);
        }

        let now = now.with_timezone(&Utc);
        let session = AuthSession {
            token: Uuid::new_v4().simple().to_string(),
            user_id: user.id.clone(),
            created_at: to_db_instant(now),
            expires_at: to_db_instant(now + self.session_timeout),
        };
        users::insert_auth_session(&pool.conn, &session)?;

        self.storage.save(AUTH_TOKEN_KEY, &session.token)?;
        let user = self.load_user_profile(pool, &user.id)?;
        self.state.sign_in(user.clone(), session);

        ttlog_quiet(&pool.conn, "login", &user.email, "Signed in");
        self.emit(AuthEvent::SignedIn(user.clone()));

        Ok(user)
    }

    /// Sign out: drop the sign-in session, clear in-memory state and local storage.
    pub fn logout(&mut self, pool: &DbPool) -> AppResult<()> {
        if let Some(session) = &self.state.auth_session {
            users::delete_auth_session(&pool.conn, &session.token)?;
        }
        if let Some(user) = &self.state.current_user {
            ttlog_quiet(&pool.conn, "logout", &user.email, "Signed out");
        }

        self.state.clear();
        self.storage.clear()?;
        self.emit(AuthEvent::SignedOut);
        Ok(())
    }

    /// Record that the owner of `email` asked for a password reset. Nothing
    /// is handed back: the answer is the same whether the account exists
    /// or not, and the code itself is issued by an administrator.
    pub fn request_password_reset(
        &self,
        pool: &DbPool,
        email: &str,
        now: DateTime<Local>,
    ) -> AppResult<()> {
        let email = email.trim();
        if email.is_empty() || !is_valid_email(email) {
            return Err(AppError::InvalidEmail(email.to_string()));
        }

        if let Some(user) = users::find_user_by_email(&pool.conn, email)? {
            ttlog_quiet(
                &pool.conn,
                "password_reset_request",
                &user.email,
                &format!("Reset requested at {}", to_db_instant(now.with_timezone(&Utc))),
            );
        }
        Ok(())
    }

    /// Admin only: issue a single-use reset code for the account, valid for
    /// one hour. The administrator hands it over to the account owner.
    pub fn issue_reset_code(
        &self,
        pool: &DbPool,
        email: &str,
        now: DateTime<Local>,
    ) -> AppResult<String> {
        let admin = self.require_role(Access::Admin, "only administrators can issue reset codes")?;

        let email = email.trim();
        let user = users::find_user_by_email(&pool.conn, email)?
            .ok_or_else(|| AppError::UserNotFound(email.to_string()))?;

        let now = now.with_timezone(&Utc);
        let code = Uuid::new_v4().simple().to_string()[..12].to_uppercase();
        users::insert_reset_code(
            &pool.conn,
            &code,
            &user.id,
            &to_db_instant(now),
            &to_db_instant(now + Duration::minutes(RESET_CODE_TTL_MINUTES)),
        )?;

        ttlog_quiet(
            &pool.conn,
            "password_reset_code",
            &user.email,
            &format!("Reset code issued by {}", admin.email),
        );
        Ok(code)
    }

    /// Set a new password with a reset code. Existing sign-ins are revoked.
    pub fn reset_password(
        &self,
        pool: &DbPool,
        code: &str,
        new_password: &str,
        now: DateTime<Local>,
    ) -> AppResult<()> {
        ensure_strong(new_password)?;

        let user_id = users::take_reset_code(&pool.conn, code.trim(), now.with_timezone(&Utc))?
            .ok_or(AppError::InvalidResetCode)?;

        users::update_password_hash(&pool.conn, &user_id, &hash_password(new_password)?)?;
        users::delete_auth_sessions_for(&pool.conn, &user_id)?;
        ttlog_quiet(&pool.conn, "password_reset", &user_id, "Password reset with code");
        Ok(())
    }

    /// Change the password of the signed-in user.
    pub fn update_password(&self, pool: &DbPool, new_password: &str) -> AppResult<()> {
        ensure_strong(new_password)?;
        let user = self.require_user()?;

        users::update_password_hash(&pool.conn, &user.id, &hash_password(new_password)?)?;
        ttlog_quiet(&pool.conn, "password_update", &user.email, "Password changed");
        Ok(())
    }

    pub fn update_profile(&mut self, pool: &DbPool, update: &ProfileUpdate) -> AppResult<User> {
        let user_id = self.require_user()?.id.clone();

        if let Some(name) = &update.full_name
            && name.trim().is_empty()
        {
            return Err(AppError::MissingField("full name"));
        }

        let user = users::update_profile(&pool.conn, &user_id, update)?;
        self.storage.save(USER_PROFILE_KEY, &user)?;
        self.state.current_user = Some(user.clone());

        ttlog_quiet(&pool.conn, "profile", &user.email, "Profile updated");
        Ok(user)
    }

    /// Admin only: change another account's role.
    pub fn assign_role(&self, pool: &DbPool, email: &str, role: Role) -> AppResult<User> {
        let admin = self.require_role(Access::Admin, "only administrators can change roles")?;

        let target = users::find_user_by_email(&pool.conn, email.trim())?
            .ok_or_else(|| AppError::UserNotFound(email.to_string()))?;

        users::set_role(&pool.conn, &target.id, role)?;
        ttlog_quiet(
            &pool.conn,
            "role",
            &target.email,
            &format!("Role set to {} by {}", role.to_db_str(), admin.email),
        );

        users::find_user_by_id(&pool.conn, &target.id)?
            .ok_or_else(|| AppError::UserNotFound(email.to_string()))
    }

    pub fn is_authenticated(&self) -> bool {
        self.state.is_authenticated()
    }

    pub fn current_user(&self) -> Option<&User> {
        self.state.current_user.as_ref()
    }

    pub fn require_user(&self) -> AppResult<&User> {
        self.current_user().ok_or(AppError::NotAuthenticated)
    }

    pub fn has_role(&self, access: Access) -> bool {
        self.current_user()
            .map(|u| u.role.satisfies(access))
            .unwrap_or(false)
    }

    /// The signed-in user, provided their role grants `access`.
    pub fn require_role(&self, access: Access, denied: &str) -> AppResult<&User> {
        let user = self.require_user()?;
        if user.role.satisfies(access) {
            Ok(user)
        } else {
            Err(AppError::PermissionDenied(denied.to_string()))
        }
    }
}
