use rtimeclock::core::auth::AuthEvent;
use rtimeclock::core::local_storage::{AUTH_TOKEN_KEY, USER_PROFILE_KEY};
use rtimeclock::db::log::load_log;
use rtimeclock::errors::AppError;
use rtimeclock::models::role::{Access, Role};
use rtimeclock::models::user::{NewUser, ProfileUpdate, User};
use std::cell::RefCell;
use std::rc::Rc;

mod common;
use common::{PASSWORD, at, new_user, open_app, set_role, setup_test_db, sign_up_and_in};

const DAY: &str = "2025-06-02";

#[test]
fn registration_is_validated_before_any_store_call() {
    let db = setup_test_db("auth_validation");
    let mut app = open_app(&db);

    let bad_email = NewUser {
        email: "not-an-email".into(),
        ..new_user("", "Ana Lopez")
    };
    assert!(matches!(
        app.auth.register(&app.pool, &bad_email),
        Err(AppError::InvalidEmail(_))
    ));

    let weak = NewUser {
        password: "abcdefg1".into(),
        ..new_user("ana@example.com", "Ana Lopez")
    };
    assert!(matches!(
        app.auth.register(&app.pool, &weak),
        Err(AppError::WeakPassword)
    ));

    let no_name = new_user("ana@example.com", "  ");
    assert!(matches!(
        app.auth.register(&app.pool, &no_name),
        Err(AppError::MissingField(_))
    ));
}

#[test]
fn first_account_is_admin_and_later_ones_employees() {
    let db = setup_test_db("auth_roles_on_register");
    let mut app = open_app(&db);

    let first = app
        .auth
        .register(&app.pool, &new_user("boss@example.com", "Marta Ruiz"))
        .unwrap();
    let second = app
        .auth
        .register(&app.pool, &new_user("ana@example.com", "Ana Lopez"))
        .unwrap();

    assert_eq!(first.role, Role::Admin);
    assert_eq!(second.role, Role::Employee);

    let dup = app
        .auth
        .register(&app.pool, &new_user("ANA@example.com", "Other Ana"));
    assert!(matches!(dup, Err(AppError::EmailTaken(_))));
}

#[test]
fn wrong_password_does_not_sign_in() {
    let db = setup_test_db("auth_wrong_password");
    let mut app = open_app(&db);
    app.auth
        .register(&app.pool, &new_user("ana@example.com", "Ana Lopez"))
        .unwrap();

    let err = app
        .auth
        .login(&app.pool, "ana@example.com", "Wrong1234", at(DAY, "08:00"))
        .unwrap_err();
    assert!(matches!(err, AppError::InvalidCredentials));
    assert!(!app.auth.is_authenticated());

    let err = app
        .auth
        .login(&app.pool, "nobody@example.com", PASSWORD, at(DAY, "08:00"))
        .unwrap_err();
    assert!(matches!(err, AppError::InvalidCredentials));
}

#[test]
fn login_caches_token_and_profile_and_logout_clears_them() {
    let db = setup_test_db("auth_login_logout");
    let mut app = open_app(&db);

    let events = Rc::new(RefCell::new(Vec::new()));
    let seen = Rc::clone(&events);
    app.auth.on_auth_state_change(move |e| seen.borrow_mut().push(e.clone()));

    sign_up_and_in(&mut app, "ana@example.com", "Ana Lopez", at(DAY, "08:00"));

    assert!(app.auth.is_authenticated());
    assert!(app.auth.storage().get::<String>(AUTH_TOKEN_KEY).is_some());
    let cached: User = app.auth.storage().get(USER_PROFILE_KEY).unwrap();
    assert_eq!(cached.email, "ana@example.com");
    assert_eq!(cached.first_name(), "Ana");

    app.auth.logout(&app.pool).unwrap();

    assert!(!app.auth.is_authenticated());
    assert!(app.auth.current_user().is_none());
    assert!(app.auth.storage().get::<String>(AUTH_TOKEN_KEY).is_none());
    assert!(!app.auth.storage().path().exists());

    let events = events.borrow();
    assert_eq!(events.len(), 2);
    assert!(matches!(events[0], AuthEvent::SignedIn(_)));
    assert_eq!(events[1], AuthEvent::SignedOut);
}

#[test]
fn sign_in_survives_a_restart_until_it_expires() {
    let db = setup_test_db("auth_restore");
    {
        let mut app = open_app(&db);
        sign_up_and_in(&mut app, "ana@example.com", "Ana Lopez", at(DAY, "08:00"));
    }

    let mut app = open_app(&db);
    assert!(app.auth.init(&app.pool, at(DAY, "20:00")).unwrap());
    assert_eq!(app.auth.require_user().unwrap().email, "ana@example.com");

    // default timeout is 24 hours
    let mut app = open_app(&db);
    assert!(!app.auth.init(&app.pool, at("2025-06-03", "09:00")).unwrap());
    assert!(!app.auth.is_authenticated());
    assert!(app.auth.storage().get::<String>(AUTH_TOKEN_KEY).is_none());
}

#[test]
fn reset_code_works_once() {
    let db = setup_test_db("auth_reset_code");
    let mut app = open_app(&db);
    let now = at(DAY, "08:00");
    sign_up_and_in(&mut app, "boss@example.com", "Marta Ruiz", now);
    app.auth
        .register(&app.pool, &new_user("ana@example.com", "Ana Lopez"))
        .unwrap();

    let code = app
        .auth
        .issue_reset_code(&app.pool, "ana@example.com", now)
        .unwrap();
    assert_eq!(code.len(), 12);

    app.auth
        .reset_password(&app.pool, &code, "NewSecret9", now)
        .unwrap();

    let again = app.auth.reset_password(&app.pool, &code, "Another99X", now);
    assert!(matches!(again, Err(AppError::InvalidResetCode)));

    assert!(app.auth.login(&app.pool, "ana@example.com", PASSWORD, now).is_err());
    app.auth
        .login(&app.pool, "ana@example.com", "NewSecret9", now)
        .unwrap();
}

#[test]
fn expired_reset_code_is_rejected() {
    let db = setup_test_db("auth_reset_expired");
    let mut app = open_app(&db);
    sign_up_and_in(&mut app, "boss@example.com", "Marta Ruiz", at(DAY, "08:00"));
    app.auth
        .register(&app.pool, &new_user("ana@example.com", "Ana Lopez"))
        .unwrap();

    let code = app
        .auth
        .issue_reset_code(&app.pool, "ana@example.com", at(DAY, "08:00"))
        .unwrap();

    let late = app
        .auth
        .reset_password(&app.pool, &code, "NewSecret9", at(DAY, "09:30"));
    assert!(matches!(late, Err(AppError::InvalidResetCode)));
}

#[test]
fn reset_request_hands_nothing_back() {
    let db = setup_test_db("auth_reset_request");
    let mut app = open_app(&db);
    let now = at(DAY, "08:00");
    app.auth
        .register(&app.pool, &new_user("boss@example.com", "Marta Ruiz"))
        .unwrap();

    // signed out: the request is recorded, no code is issued
    app.auth
        .request_password_reset(&app.pool, "boss@example.com", now)
        .unwrap();
    app.auth
        .request_password_reset(&app.pool, "nobody@example.com", now)
        .unwrap();

    let requests = load_log(&app.pool.conn, Some("password_reset_request")).unwrap();
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].target, "boss@example.com");

    let issued = app.auth.issue_reset_code(&app.pool, "boss@example.com", now);
    assert!(matches!(issued, Err(AppError::NotAuthenticated)));
}

#[test]
fn only_admins_issue_reset_codes() {
    let db = setup_test_db("auth_reset_admin_only");
    let mut app = open_app(&db);
    let now = at(DAY, "08:00");
    app.auth
        .register(&app.pool, &new_user("boss@example.com", "Marta Ruiz"))
        .unwrap();
    sign_up_and_in(&mut app, "ana@example.com", "Ana Lopez", now);

    let denied = app.auth.issue_reset_code(&app.pool, "boss@example.com", now);
    assert!(matches!(denied, Err(AppError::PermissionDenied(_))));

    set_role(&mut app, "ana@example.com", Role::Supervisor, now);
    let denied = app.auth.issue_reset_code(&app.pool, "boss@example.com", now);
    assert!(matches!(denied, Err(AppError::PermissionDenied(_))));
}

#[test]
fn profile_and_password_updates() {
    let db = setup_test_db("auth_profile");
    let mut app = open_app(&db);
    let now = at(DAY, "08:00");
    sign_up_and_in(&mut app, "ana@example.com", "Ana Lopez", now);

    let updated = app
        .auth
        .update_profile(
            &app.pool,
            &ProfileUpdate {
                full_name: None,
                job_title: Some("Developer".into()),
            },
        )
        .unwrap();
    assert_eq!(updated.full_name, "Ana Lopez");
    assert_eq!(updated.job_title.as_deref(), Some("Developer"));

    let cached: User = app.auth.storage().get(USER_PROFILE_KEY).unwrap();
    assert_eq!(cached.job_title.as_deref(), Some("Developer"));

    assert!(matches!(
        app.auth.update_password(&app.pool, "short"),
        Err(AppError::WeakPassword)
    ));
    app.auth.update_password(&app.pool, "Changed123").unwrap();
    app.auth
        .login(&app.pool, "ana@example.com", "Changed123", now)
        .unwrap();
}

#[test]
fn role_matrix() {
    assert!(Role::Admin.satisfies(Access::Admin));
    assert!(Role::Admin.satisfies(Access::Supervisor));
    assert!(!Role::Supervisor.satisfies(Access::Admin));
    assert!(Role::Supervisor.satisfies(Access::Supervisor));
    assert!(!Role::Employee.satisfies(Access::Supervisor));
    assert!(Role::Employee.satisfies(Access::Any));
}

#[test]
fn only_admins_assign_roles() {
    let db = setup_test_db("auth_assign_role");
    let mut app = open_app(&db);
    let now = at(DAY, "08:00");

    sign_up_and_in(&mut app, "boss@example.com", "Marta Ruiz", now);
    app.auth
        .register(&app.pool, &new_user("ana@example.com", "Ana Lopez"))
        .unwrap();

    let promoted = app
        .auth
        .assign_role(&app.pool, "ana@example.com", Role::Supervisor)
        .unwrap();
    assert_eq!(promoted.role, Role::Supervisor);
    assert!(app.auth.has_role(Access::Admin));

    set_role(&mut app, "boss@example.com", Role::Employee, now);
    assert!(!app.auth.has_role(Access::Supervisor));
    assert!(app.auth.has_role(Access::Any));
    let denied = app
        .auth
        .assign_role(&app.pool, "ana@example.com", Role::Admin);
    assert!(matches!(denied, Err(AppError::PermissionDenied(_))));
}
