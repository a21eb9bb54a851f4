//! # Reaction Binder: status transition → one-shot effect
//!
//! A page acquires a [`ReactionBinder`] for its action when it mounts and
//! calls [`observe`](ReactionBinder::observe) on every render. The first time
//! a terminal status is seen for a given dispatch, the binder runs the
//! page's [`Reaction`] and performs the resulting [`Effect`]s.
//!
//! Dropping the binder is the page's teardown: the action is reset to
//! `Idle` and teardown hooks run, on every exit path including unwinding.
//!
//! Known gap: a terminal status that lands after the last `observe` and
//! before the drop is never reacted to, so its notification is lost.

use crate::action::ActionKind;
use crate::error::ApiError;
use crate::selector::StatusSnapshot;
use crate::shell::{Route, Shell, Toast};
use crate::status::{RequestStatus, Ticket};
use crate::store::{Entities, Store};

/// A user-visible side effect requested by a reaction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    Navigate(Route),
    Notify(Toast),
    /// Clear the page's form draft. Applied by the page itself.
    ResetForm,
}

/// The terminal outcome handed to a reaction.
#[derive(Debug, Clone, Copy)]
pub enum Terminal<'a> {
    Fulfilled(&'a Entities),
    Rejected(&'a ApiError),
}

/// Converts a terminal outcome into effects.
///
/// Runs while the store's read lock is held. Everything a reaction may
/// read arrives through [`Terminal`]; a reaction must not call back into a
/// [`Store`] handle, as a queued writer would deadlock the re-entrant read.
pub trait Reaction: Send + 'static {
    fn react(&mut self, outcome: Terminal<'_>) -> Vec<Effect>;
}

impl<F> Reaction for F
where
    F: FnMut(Terminal<'_>) -> Vec<Effect> + Send + 'static,
{
    fn react(&mut self, outcome: Terminal<'_>) -> Vec<Effect> {
        self(outcome)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinderState {
    WatchingIdle,
    WatchingPending,
    Reacted,
}

type TeardownHook = Box<dyn FnOnce(&Store) + Send>;

/// Scoped subscription of one page to one action's status.
pub struct ReactionBinder {
    store: Store,
    shell: Shell,
    action: ActionKind,
    reaction: Box<dyn Reaction>,
    state: BinderState,
    last_seen: Option<(RequestStatus, Ticket)>,
    teardown: Vec<TeardownHook>,
}

impl ReactionBinder {
    /// Acquire the binding. Reset happens when the binder is dropped.
    pub fn bind(store: Store, shell: Shell, action: ActionKind, reaction: impl Reaction) -> Self {
        tracing::debug!(happyshop.action = %action, "Binder acquired");
        Self {
            store,
            shell,
            action,
            reaction: Box::new(reaction),
            state: BinderState::WatchingIdle,
            last_seen: None,
            teardown: Vec::new(),
        }
    }

    /// Register extra teardown work, run after the status reset.
    pub fn on_teardown(mut self, hook: impl FnOnce(&Store) + Send + 'static) -> Self {
        self.teardown.push(Box::new(hook));
        self
    }

    pub fn action(&self) -> ActionKind {
        self.action
    }

    pub fn state(&self) -> BinderState {
        self.state
    }

    /// Current `(status, error)` of the bound action.
    pub fn snapshot(&self) -> StatusSnapshot {
        self.store.status(self.action)
    }

    /// Read the status and react if it newly became terminal.
    ///
    /// Returns the effects performed during this call. Navigation and
    /// notification are applied through the shell; `ResetForm` is left for
    /// the caller.
    pub fn observe(&mut self) -> Vec<Effect> {
        let store = self.store.clone();
        // Effects run after the read lock is released: a navigation may
        // tear down another page, which writes to the store.
        let effects = store.read(|state| {
            let snapshot = crate::selector::select_status(state, self.action);
            let seen = (snapshot.status, snapshot.ticket);
            if self.last_seen == Some(seen) {
                return Vec::new();
            }
            self.last_seen = Some(seen);

            match snapshot.status {
                RequestStatus::Idle => {
                    self.state = BinderState::WatchingIdle;
                    Vec::new()
                }
                RequestStatus::Pending => {
                    self.state = BinderState::WatchingPending;
                    Vec::new()
                }
                RequestStatus::Fulfilled => {
                    self.state = BinderState::Reacted;
                    self.reaction.react(Terminal::Fulfilled(state.entities()))
                }
                RequestStatus::Rejected => {
                    self.state = BinderState::Reacted;
                    let fallback = ApiError::new("Request failed");
                    let error = snapshot.error.as_ref().unwrap_or(&fallback);
                    self.reaction.react(Terminal::Rejected(error))
                }
            }
        });
        if !effects.is_empty() {
            tracing::debug!(happyshop.action = %self.action, count = effects.len(), "Reacted");
        }
        self.perform(&effects);
        effects
    }

    fn perform(&self, effects: &[Effect]) {
        for effect in effects {
            match effect {
                Effect::Navigate(route) => self.shell.navigate(route),
                Effect::Notify(toast) => self.shell.notify(toast),
                Effect::ResetForm => {}
            }
        }
    }
}

impl Drop for ReactionBinder {
    fn drop(&mut self) {
        self.store.reset(self.action);
        for hook in self.teardown.drain(..) {
            hook(&self.store);
        }
        tracing::debug!(happyshop.action = %self.action, "Binder released");
    }
}

impl std::fmt::Debug for ReactionBinder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ReactionBinder")
            .field("action", &self.action)
            .field("state", &self.state)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::action::{AddProduct, Login};
    use crate::dispatch::Dispatcher;
    use crate::domain::{Credentials, ProductInput};
    use crate::shell::ToastLevel;
    use crate::testing::{RecordingShell, ScriptedApi};
    use std::sync::Arc;

    fn add_product_reaction(outcome: Terminal<'_>) -> Vec<Effect> {
        match outcome {
            Terminal::Fulfilled(_) => vec![
                Effect::ResetForm,
                Effect::Notify(Toast::success("New product added")),
                Effect::Navigate(Route::AdminDashboard),
            ],
            Terminal::Rejected(_) => vec![Effect::Notify(Toast::error(
                "Error adding product, please try again later",
            ))],
        }
    }

    fn input() -> ProductInput {
        ProductInput {
            title: "Chair".into(),
            brand: "b".into(),
            category: "c".into(),
            description: "d".into(),
            price: 1.0,
            discount_percentage: 0.0,
            stock_quantity: 1,
            thumbnail: "t".into(),
            images: vec!["a".into(), "b".into(), "c".into(), "d".into()],
        }
    }

    #[tokio::test]
    async fn test_reacts_once_per_terminal_transition() {
        let api = Arc::new(ScriptedApi::new());
        let store = Store::new();
        let recorder = Arc::new(RecordingShell::default());
        let dispatcher = Dispatcher::new(store.clone(), api);
        let mut binder = ReactionBinder::bind(
            store.clone(),
            recorder.shell(),
            ActionKind::AddProduct,
            add_product_reaction,
        );

        assert!(binder.observe().is_empty());
        let pending = dispatcher.dispatch(AddProduct, input());
        assert!(binder.observe().is_empty());
        assert_eq!(binder.state(), BinderState::WatchingPending);

        pending.await;
        let effects = binder.observe();
        assert!(effects.contains(&Effect::ResetForm));
        assert_eq!(binder.state(), BinderState::Reacted);

        // Re-renders do not re-fire.
        assert!(binder.observe().is_empty());
        assert!(binder.observe().is_empty());
        assert_eq!(recorder.toasts().len(), 1);
        assert_eq!(recorder.routes(), vec![Route::AdminDashboard]);
    }

    #[tokio::test]
    async fn test_reaction_reads_committed_entities_from_terminal() {
        let api = Arc::new(ScriptedApi::new());
        let store = Store::new();
        let recorder = Arc::new(RecordingShell::default());
        let dispatcher = Dispatcher::new(store.clone(), api);
        let mut binder = ReactionBinder::bind(
            store.clone(),
            recorder.shell(),
            ActionKind::AddProduct,
            |outcome: Terminal<'_>| match outcome {
                Terminal::Fulfilled(entities) => {
                    let title = entities.products().last().map(|p| p.title.clone());
                    vec![Effect::Notify(Toast::success(title.unwrap_or_default()))]
                }
                Terminal::Rejected(_) => Vec::new(),
            },
        );

        dispatcher.dispatch(AddProduct, input()).await;
        binder.observe();

        assert_eq!(recorder.toasts(), vec![Toast::success("Chair")]);
        drop(binder);
        assert_eq!(store.products().len(), 1);
    }

    #[tokio::test]
    async fn test_rejection_notifies_once_and_teardown_resets() {
        let api = Arc::new(ScriptedApi::new());
        api.fail_next(ActionKind::AddProduct, "duplicate title");
        let store = Store::new();
        let recorder = Arc::new(RecordingShell::default());
        let dispatcher = Dispatcher::new(store.clone(), api);

        {
            let mut binder = ReactionBinder::bind(
                store.clone(),
                recorder.shell(),
                ActionKind::AddProduct,
                add_product_reaction,
            );
            dispatcher.dispatch(AddProduct, input()).await;
            binder.observe();
            binder.observe();
            assert_eq!(
                store.status(ActionKind::AddProduct).status,
                RequestStatus::Rejected
            );
        }

        let toasts = recorder.toasts();
        assert_eq!(toasts.len(), 1);
        assert_eq!(toasts[0].level, ToastLevel::Error);
        assert_eq!(toasts[0].message, "Error adding product, please try again later");
        assert_eq!(store.status(ActionKind::AddProduct).status, RequestStatus::Idle);
        assert!(store.status(ActionKind::AddProduct).error.is_none());
    }

    #[tokio::test]
    async fn test_teardown_while_pending_leaves_idle() {
        let api = Arc::new(ScriptedApi::new());
        let store = Store::new();
        let dispatcher = Dispatcher::new(store.clone(), api);
        let binder =
            ReactionBinder::bind(store.clone(), Shell::default(), ActionKind::Login, |_: Terminal<'_>| {
                Vec::new()
            });

        let pending = dispatcher.dispatch(
            Login,
            Credentials {
                email: "a@b.co".into(),
                password: "x".into(),
            },
        );
        drop(binder);
        pending.await;

        assert_eq!(store.status(ActionKind::Login).status, RequestStatus::Idle);
    }

    #[test]
    fn test_teardown_runs_on_unwind() {
        let store = Store::new();
        let ticket = store.begin(ActionKind::UpdateOrder);
        store.settle(ActionKind::UpdateOrder, ticket, Ok(()), |_, _| {});

        let cloned = store.clone();
        let result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(move || {
            let _binder = ReactionBinder::bind(
                cloned,
                Shell::default(),
                ActionKind::UpdateOrder,
                |_: Terminal<'_>| Vec::new(),
            );
            panic!("render failed");
        }));

        assert!(result.is_err());
        assert_eq!(store.status(ActionKind::UpdateOrder).status, RequestStatus::Idle);
    }

    #[test]
    fn test_teardown_hooks_run_after_reset() {
        let store = Store::new();
        let flag = Arc::new(parking_lot::Mutex::new(None));
        let seen = flag.clone();
        let binder = ReactionBinder::bind(
            store.clone(),
            Shell::default(),
            ActionKind::UpdateProduct,
            |_: Terminal<'_>| Vec::new(),
        )
        .on_teardown(move |store| {
            *seen.lock() = Some(store.status(ActionKind::UpdateProduct).status);
        });
        drop(binder);
        assert_eq!(*flag.lock(), Some(RequestStatus::Idle));
    }
}
