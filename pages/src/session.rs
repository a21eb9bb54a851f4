//! Leave the auth pages once a session exists.

use happyshop_core::domain::User;
use happyshop_core::{Route, Shell, Store};

/// Where a signed-in user belongs: verified accounts go home, the rest
/// finish verification first.
pub fn landing_for(user: &User) -> Route {
    if user.is_verified {
        Route::Home
    } else {
        Route::VerifyOtp
    }
}

/// Watches the session and redirects once per change.
#[derive(Debug, Default)]
pub struct SessionRedirect {
    last_seen: Option<(String, bool)>,
}

impl SessionRedirect {
    pub fn new() -> Self {
        Self::default()
    }

    /// Navigate if the session changed since the previous call.
    pub fn check(&mut self, store: &Store, shell: &Shell) -> Option<Route> {
        let user = store.session()?;
        let key = (user.id.clone(), user.is_verified);
        if self.last_seen.as_ref() == Some(&key) {
            return None;
        }
        self.last_seen = Some(key);

        let route = landing_for(&user);
        tracing::debug!(user = %user.id, %route, "Session redirect");
        shell.navigate(&route);
        Some(route)
    }
}
