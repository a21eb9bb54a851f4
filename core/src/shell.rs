//! Navigation and notification boundaries.
//!
//! Reactions never touch a router or a toast widget directly; they go
//! through a [`Shell`] injected at startup.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;

/// Named client routes.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Route {
    Home,
    Login,
    Signup,
    VerifyOtp,
    ForgotPassword,
    Cart,
    Wishlist,
    Profile,
    Orders,
    Logout,
    AdminDashboard,
    AdminProfile,
    AdminOrders,
    AdminAddProduct,
    AdminProductUpdate(String),
}

impl Route {
    pub fn path(&self) -> String {
        match self {
            Route::Home => "/".to_string(),
            Route::Login => "/login".to_string(),
            Route::Signup => "/signup".to_string(),
            Route::VerifyOtp => "/verify-otp".to_string(),
            Route::ForgotPassword => "/forgot-password".to_string(),
            Route::Cart => "/cart".to_string(),
            Route::Wishlist => "/wishlist".to_string(),
            Route::Profile => "/profile".to_string(),
            Route::Orders => "/orders".to_string(),
            Route::Logout => "/logout".to_string(),
            Route::AdminDashboard => "/admin/dashboard".to_string(),
            Route::AdminProfile => "/admin/profile".to_string(),
            Route::AdminOrders => "/admin/orders".to_string(),
            Route::AdminAddProduct => "/admin/add-product".to_string(),
            Route::AdminProductUpdate(id) => format!("/admin/product-update/{id}"),
        }
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.path())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ToastLevel {
    Success,
    Error,
    Info,
}

/// A transient user-facing message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Toast {
    pub level: ToastLevel,
    pub message: String,
}

impl Toast {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            level: ToastLevel::Success,
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            level: ToastLevel::Error,
            message: message.into(),
        }
    }
}

pub trait Navigator: Send + Sync + 'static {
    fn navigate(&self, route: &Route);
}

pub trait Notifier: Send + Sync + 'static {
    fn notify(&self, toast: &Toast);
}

/// Writes toasts and route changes to the log. Used when no UI is attached.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingShell;

impl Navigator for TracingShell {
    fn navigate(&self, route: &Route) {
        tracing::info!(route = %route, "Navigate");
    }
}

impl Notifier for TracingShell {
    fn notify(&self, toast: &Toast) {
        match toast.level {
            ToastLevel::Error => tracing::warn!(message = %toast.message, "Toast"),
            _ => tracing::info!(message = %toast.message, "Toast"),
        }
    }
}

#[derive(Clone)]
pub struct Shell {
    navigator: Arc<dyn Navigator>,
    notifier: Arc<dyn Notifier>,
}

impl Shell {
    pub fn new(navigator: Arc<dyn Navigator>, notifier: Arc<dyn Notifier>) -> Self {
        Self {
            navigator,
            notifier,
        }
    }

    /// A shell whose navigator and notifier are the same object.
    pub fn from_shared<T: Navigator + Notifier>(shared: Arc<T>) -> Self {
        Self {
            navigator: shared.clone(),
            notifier: shared,
        }
    }

    pub fn navigate(&self, route: &Route) {
        self.navigator.navigate(route);
    }

    pub fn notify(&self, toast: &Toast) {
        self.notifier.notify(toast);
    }
}

impl Default for Shell {
    fn default() -> Self {
        Shell::from_shared(Arc::new(TracingShell))
    }
}

impl fmt::Debug for Shell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Shell").finish_non_exhaustive()
    }
}
