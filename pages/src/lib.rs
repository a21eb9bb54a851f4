//! # Happy Shop pages
//!
//! Headless controllers for the storefront's form pages. Each page is
//! mounted with an [`AppContext`](happyshop_core::AppContext), holds its form
//! draft and a [`ReactionBinder`](happyshop_core::ReactionBinder) for its
//! action, and is torn down by dropping it.
//!
//! A page's `render` is one render pass: it observes the bound status,
//! performs any reaction and applies form resets.

pub mod add_product;
pub mod admin_orders;
pub mod error;
pub mod form_state;
pub mod login;
pub mod navbar;
pub mod product_form;
pub mod product_update;
pub mod session;
pub mod signup;

pub use add_product::AddProductPage;
pub use admin_orders::{AdminOrdersPage, OrderRow};
pub use error::SubmitError;
pub use form_state::FormState;
pub use login::LoginPage;
pub use navbar::{MenuEntry, NavbarView};
pub use product_update::ProductUpdatePage;
pub use session::SessionRedirect;
pub use signup::SignupPage;
