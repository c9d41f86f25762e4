use rtimeclock::core::router::{Resolution, View, is_protected, normalize, resolve};

#[test]
fn known_paths_render_their_view() {
    assert_eq!(resolve("/", false), Resolution::Render(View::Login));
    assert_eq!(resolve("/login", false), Resolution::Render(View::Login));
    assert_eq!(resolve("/register", false), Resolution::Render(View::Register));
    assert_eq!(resolve("/dashboard", true), Resolution::Render(View::Dashboard));
    assert_eq!(resolve("/reports", true), Resolution::Render(View::Reports));
    assert_eq!(resolve("/history", true), Resolution::Render(View::History));
    assert_eq!(resolve("/profile", true), Resolution::Render(View::Profile));
}

#[test]
fn protected_paths_redirect_to_login_when_signed_out() {
    for path in ["/dashboard", "/reports", "/history", "/profile"] {
        assert!(is_protected(path));
        assert_eq!(resolve(path, false), Resolution::Redirect(View::Login));
    }
    assert!(!is_protected("/register"));
}

#[test]
fn trailing_slashes_are_stripped() {
    assert_eq!(normalize("/dashboard/"), "/dashboard");
    assert_eq!(normalize("#/reports"), "/reports");
    assert_eq!(resolve("/history/", false), Resolution::Redirect(View::Login));
}

#[test]
fn unknown_paths_fall_back_to_root() {
    assert_eq!(normalize("/nowhere"), "/");
    assert_eq!(normalize(""), "/");
    assert_eq!(resolve("/admin", false), Resolution::Render(View::Login));
    assert_eq!(View::Dashboard.path(), "/dashboard");
}
