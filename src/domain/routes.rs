//! Route table and navigation guard

use std::fmt;

/// Views of the dashboard
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Route {
    Login,
    Dashboard,
    Products,
    Users,
    Analytics,
}

/// Outcome of a navigation attempt
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Navigation {
    Proceed,
    Redirect(Route),
}

impl Route {
    pub const ALL: [Route; 5] = [
        Route::Login,
        Route::Dashboard,
        Route::Products,
        Route::Users,
        Route::Analytics,
    ];

    pub fn path(&self) -> &'static str {
        match self {
            Route::Login => "/login",
            Route::Dashboard => "/",
            Route::Products => "/products",
            Route::Users => "/users",
            Route::Analytics => "/analytics",
        }
    }

    pub fn from_path(path: &str) -> Option<Route> {
        Self::ALL.into_iter().find(|route| route.path() == path)
    }

    pub fn requires_auth(&self) -> bool {
        !matches!(self, Route::Login)
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.path())
    }
}

/// Decide whether navigating to `to` may proceed.
///
/// Protected routes send anonymous visitors to the login view, and the
/// login view sends authenticated visitors to the dashboard.
pub fn guard(to: Route, authenticated: bool) -> Navigation {
    if to.requires_auth() && !authenticated {
        Navigation::Redirect(Route::Login)
    } else if to == Route::Login && authenticated {
        Navigation::Redirect(Route::Dashboard)
    } else {
        Navigation::Proceed
    }
}
