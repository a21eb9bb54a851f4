//! # Dispatcher: action → status
//!
//! `dispatch` writes `Pending` before it returns, then hands back the future
//! that performs the call. Any read between the two observes `Pending`,
//! never a stale terminal value.

use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use tracing::Instrument;

use crate::action::Action;
use crate::api::StorefrontApi;
use crate::status::RequestStatus;
use crate::store::Store;

/// Type alias for boxed futures returned by the dispatcher.
pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

/// The only writer of `Pending` and terminal statuses.
#[derive(Clone)]
pub struct Dispatcher {
    store: Store,
    api: Arc<dyn StorefrontApi>,
}

impl Dispatcher {
    pub fn new(store: Store, api: Arc<dyn StorefrontApi>) -> Self {
        Self { store, api }
    }

    pub fn store(&self) -> &Store {
        &self.store
    }

    /// Start `action` with `input`.
    ///
    /// The returned future resolves to the status written on completion
    /// (the current status if the completion was stale). Dropping it
    /// without polling leaves the action `Pending` until reset.
    pub fn dispatch<A: Action>(&self, action: A, input: A::Input) -> BoxFuture<'static, RequestStatus> {
        let kind = action.kind();
        let ticket = self.store.begin(kind);
        let store = self.store.clone();
        let api = self.api.clone();
        let span = tracing::info_span!("Action", happyshop.action = %kind);

        Box::pin(
            async move {
                let start = std::time::Instant::now();
                let result = action.call(api.as_ref(), input).await;
                let status = store.settle(kind, ticket, result, |entities, output| {
                    action.commit(entities, output)
                });
                tracing::info!(%status, duration = ?start.elapsed(), "Action settled");
                status
            }
            .instrument(span),
        )
    }
}

impl std::fmt::Debug for Dispatcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Dispatcher").finish_non_exhaustive()
    }
}
