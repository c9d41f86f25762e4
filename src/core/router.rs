//! Route table: maps path tokens to views and gates the protected ones on
//! authentication.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum View {
    Login,
    Register,
    Dashboard,
    Reports,
    History,
    Profile,
}

impl View {
    /// Canonical path of the view.
    pub fn path(&self) -> &'static str {
        match self {
            View::Login => "/login",
            View::Register => "/register",
            View::Dashboard => "/dashboard",
            View::Reports => "/reports",
            View::History => "/history",
            View::Profile => "/profile",
        }
    }
}

const ROUTES: &[(&str, View)] = &[
    ("/", View::Login),
    ("/login", View::Login),
    ("/register", View::Register),
    ("/dashboard", View::Dashboard),
    ("/reports", View::Reports),
    ("/history", View::History),
    ("/profile", View::Profile),
];

const PROTECTED: &[&str] = &["/dashboard", "/reports", "/history", "/profile"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resolution {
    Render(View),
    Redirect(View),
}

/// Strip trailing slashes (the root stays `/`); unknown or empty paths
/// fall back to `/`.
pub fn normalize(path: &str) -> &'static str {
    let trimmed = path.trim().trim_start_matches('#');
    let trimmed = trimmed.trim_end_matches('/');
    let candidate = if trimmed.is_empty() { "/" } else { trimmed };

    ROUTES
        .iter()
        .find(|(p, _)| *p == candidate)
        .map(|(p, _)| *p)
        .unwrap_or("/")
}

pub fn is_protected(path: &str) -> bool {
    PROTECTED.contains(&normalize(path))
}

/// Resolve `path`: protected destinations redirect to the login view when
/// nobody is signed in.
pub fn resolve(path: &str, authenticated: bool) -> Resolution {
    let path = normalize(path);

    if PROTECTED.contains(&path) && !authenticated {
        return Resolution::Redirect(View::Login);
    }

    let view = ROUTES
        .iter()
        .find(|(p, _)| *p == path)
        .map(|(_, v)| *v)
        .unwrap_or(View::Login);

    Resolution::Render(view)
}
