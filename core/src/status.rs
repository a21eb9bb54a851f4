//! # Request Status: the tri-state outcome of one action
//!
//! Every [`ActionKind`] owns exactly one [`ActionSlice`] in the store.
//! The slice is overwritten, never queued.
//!
//! ```text
//! Idle ──dispatch──▶ Pending ──ok──▶ Fulfilled ──reset──▶ Idle
//!                        └────err──▶ Rejected  ──reset──▶ Idle
//! ```
//!
//! Any other edge is a [`StatusError`].

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::action::ActionKind;
use crate::error::ApiError;

/// Lifecycle of a single logical action.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RequestStatus {
    #[default]
    Idle,
    Pending,
    Fulfilled,
    Rejected,
}

impl RequestStatus {
    /// `Fulfilled` or `Rejected`.
    pub fn is_terminal(self) -> bool {
        matches!(self, RequestStatus::Fulfilled | RequestStatus::Rejected)
    }

    pub fn is_pending(self) -> bool {
        self == RequestStatus::Pending
    }

    /// Whether `self → next` is an edge of the status machine.
    pub fn can_transition_to(self, next: RequestStatus) -> bool {
        use RequestStatus::*;
        matches!(
            (self, next),
            (Idle, Pending)
                | (Pending, Fulfilled)
                | (Pending, Rejected)
                | (Fulfilled, Idle)
                | (Rejected, Idle)
        )
    }

    pub fn as_str(self) -> &'static str {
        match self {
            RequestStatus::Idle => "idle",
            RequestStatus::Pending => "pending",
            RequestStatus::Fulfilled => "fulfilled",
            RequestStatus::Rejected => "rejected",
        }
    }
}

impl fmt::Display for RequestStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Status machine errors.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StatusError {
    #[error("invalid status transition for {action}: {from} -> {to}")]
    InvalidTransition {
        action: ActionKind,
        from: RequestStatus,
        to: RequestStatus,
    },
}

/// Monotonic ticket identifying one dispatch of an action.
///
/// Completions carrying an outdated ticket are discarded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Ticket(pub(crate) u64);

/// Per-action slice of shared state: status, error payload and dispatch generation.
#[derive(Debug, Clone)]
pub struct ActionSlice {
    action: ActionKind,
    status: RequestStatus,
    error: Option<ApiError>,
    generation: u64,
}

impl ActionSlice {
    pub(crate) fn new(action: ActionKind) -> Self {
        Self {
            action,
            status: RequestStatus::Idle,
            error: None,
            generation: 0,
        }
    }

    pub fn action(&self) -> ActionKind {
        self.action
    }

    pub fn status(&self) -> RequestStatus {
        self.status
    }

    /// Present only while `Rejected`.
    pub fn error(&self) -> Option<&ApiError> {
        self.error.as_ref()
    }

    pub(crate) fn ticket(&self) -> Ticket {
        Ticket(self.generation)
    }

    fn transition(&mut self, to: RequestStatus) -> Result<(), StatusError> {
        if !self.status.can_transition_to(to) {
            return Err(StatusError::InvalidTransition {
                action: self.action,
                from: self.status,
                to,
            });
        }
        tracing::debug!(
            happyshop.action = %self.action,
            from = %self.status,
            to = %to,
            "Status transition"
        );
        self.status = to;
        Ok(())
    }

    /// Enter `Pending` and hand out a fresh ticket.
    ///
    /// From a terminal value the slice walks through `Idle` first so the
    /// recorded path stays on the machine's edges. A dispatch while already
    /// `Pending` supersedes the earlier request.
    pub(crate) fn begin(&mut self) -> Ticket {
        match self.status {
            RequestStatus::Pending => {
                tracing::warn!(
                    happyshop.action = %self.action,
                    "Dispatch while pending; earlier request is superseded"
                );
            }
            RequestStatus::Fulfilled | RequestStatus::Rejected => {
                self.reset();
                let _ = self.transition(RequestStatus::Pending);
            }
            RequestStatus::Idle => {
                let _ = self.transition(RequestStatus::Pending);
            }
        }
        self.generation += 1;
        self.ticket()
    }

    /// Record a terminal outcome for `ticket`.
    ///
    /// Returns `false` when the ticket is stale (reset or superseded) and the
    /// outcome was dropped.
    pub(crate) fn settle(&mut self, ticket: Ticket, result: Result<(), ApiError>) -> bool {
        if ticket != self.ticket() || !self.status.is_pending() {
            tracing::debug!(
                happyshop.action = %self.action,
                status = %self.status,
                "Dropping stale completion"
            );
            return false;
        }
        match result {
            Ok(()) => {
                let _ = self.transition(RequestStatus::Fulfilled);
            }
            Err(err) => {
                tracing::warn!(happyshop.action = %self.action, error = %err, "Action rejected");
                let _ = self.transition(RequestStatus::Rejected);
                self.error = Some(err);
            }
        }
        true
    }

    /// Return to `Idle`, clearing the error payload. Idempotent.
    ///
    /// A reset from `Pending` abandons the in-flight request: the generation
    /// advances so its completion is discarded.
    pub(crate) fn reset(&mut self) {
        match self.status {
            RequestStatus::Idle => {}
            RequestStatus::Pending => {
                tracing::debug!(happyshop.action = %self.action, "Abandoning in-flight request");
                self.generation += 1;
                self.status = RequestStatus::Idle;
            }
            RequestStatus::Fulfilled | RequestStatus::Rejected => {
                let _ = self.transition(RequestStatus::Idle);
            }
        }
        self.error = None;
    }
}
