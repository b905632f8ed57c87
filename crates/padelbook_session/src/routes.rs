//! Screens of the client and the rules for entering them.

use crate::auth_state::Identity;

/// A screen of the client, addressed by path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Route {
    Landing,
    Register,
    Login,
    Dashboard,
    MyReservations,
    Admin,
}

impl Route {
    /// Resolves a path. Unknown paths land on the entry screen.
    pub fn from_path(path: &str) -> Self {
        match path {
            "/registro" => Route::Register,
            "/login" => Route::Login,
            "/dashboard" => Route::Dashboard,
            "/mis-reservas" => Route::MyReservations,
            "/admin" => Route::Admin,
            _ => Route::Landing,
        }
    }

    pub fn path(self) -> &'static str {
        match self {
            Route::Landing => "/",
            Route::Register => "/registro",
            Route::Login => "/login",
            Route::Dashboard => "/dashboard",
            Route::MyReservations => "/mis-reservas",
            Route::Admin => "/admin",
        }
    }

    pub fn requires_token(self) -> bool {
        matches!(
            self,
            Route::Dashboard | Route::MyReservations | Route::Admin
        )
    }

    /// Where a visitor asking for `self` actually ends up.
    ///
    /// Admin needs a token and an admin identity, otherwise it falls back to
    /// the dashboard; the dashboard and reservation list need a token,
    /// otherwise they fall back to the landing screen.
    pub fn guard(self, has_token: bool, identity: &Identity) -> Route {
        match self {
            Route::Admin if !(has_token && identity.is_admin()) => {
                Route::Dashboard.guard(has_token, identity)
            }
            route if route.requires_token() && !has_token => Route::Landing,
            route => route,
        }
    }
}
