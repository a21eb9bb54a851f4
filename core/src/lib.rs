//! # Happy Shop Core
//!
//! Protocol-agnostic client core: the *Async Action → Status Flag →
//! Effect-Driven UI Reaction* loop shared by every storefront page.
//!
//! * [`Dispatcher`] issues an [`Action`] and owns its tri-state status
//! * [`selector`] reads `(status, error)` from a [`Store`] snapshot
//! * [`ReactionBinder`] turns a terminal status into one-shot [`Effect`]s
//!   and resets the status when the page goes away
//! * [`form`] validates a [`FormDraft`] and assembles the submitted [`Payload`]

pub mod action;
pub mod api;
pub mod binder;
pub mod config;
pub mod context;
pub mod dispatch;
pub mod domain;
pub mod error;
pub mod form;
pub mod selector;
pub mod shell;
pub mod status;
pub mod store;
pub mod telemetry;

#[cfg(any(test, feature = "testing"))]
pub mod testing;

pub use action::{Action, ActionKind};
pub use api::StorefrontApi;
pub use binder::{BinderState, Effect, Reaction, ReactionBinder, Terminal};
pub use config::{ClientConfig, ConfigError};
pub use context::AppContext;
pub use dispatch::{BoxFuture, Dispatcher};
pub use error::ApiError;
pub use form::{FieldErrors, FormDraft, FormSchema, Payload, Rule};
pub use selector::StatusSnapshot;
pub use shell::{Navigator, Notifier, Route, Shell, Toast, ToastLevel};
pub use status::{RequestStatus, StatusError};
pub use store::{AppState, Entities, Store};

pub mod prelude {
    pub use crate::action::{Action, ActionKind};
    pub use crate::binder::{Effect, Reaction, ReactionBinder, Terminal};
    pub use crate::context::AppContext;
    pub use crate::dispatch::{BoxFuture, Dispatcher};
    pub use crate::error::ApiError;
    pub use crate::form::rules::{FieldSemantics, rules_for};
    pub use crate::form::{FieldErrors, FormDraft, FormSchema, Payload, Rule};
    pub use crate::shell::{Route, Shell, Toast};
    pub use crate::status::RequestStatus;
    pub use crate::store::Store;
}
