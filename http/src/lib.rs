//! # Happy Shop HTTP adapter
//!
//! Implements [`StorefrontApi`](happyshop_core::StorefrontApi) over the
//! backend's REST endpoints with `reqwest`. Every request resolves against
//! one base origin and carries the session cookie.

pub mod client;
pub mod endpoint;
pub mod error;

pub use client::HttpApi;
pub use endpoint::Endpoint;
pub use error::HttpApiError;
