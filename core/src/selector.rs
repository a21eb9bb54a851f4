//! Pure read accessors over an [`AppState`] snapshot.

use crate::action::ActionKind;
use crate::domain::User;
use crate::error::ApiError;
use crate::status::{RequestStatus, Ticket};
use crate::store::AppState;

/// `(status, error)` of one action at the time of the read.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusSnapshot {
    pub status: RequestStatus,
    pub error: Option<ApiError>,
    pub(crate) ticket: Ticket,
}

impl StatusSnapshot {
    pub fn is_pending(&self) -> bool {
        self.status.is_pending()
    }
}

pub fn select_status(state: &AppState, action: ActionKind) -> StatusSnapshot {
    let slice = state.slices().get(action);
    StatusSnapshot {
        status: slice.status(),
        error: slice.error().cloned(),
        ticket: slice.ticket(),
    }
}

pub fn select_session(state: &AppState) -> Option<&User> {
    state.entities().session()
}

pub fn select_is_admin(state: &AppState) -> bool {
    select_session(state).is_some_and(|user| user.is_admin)
}
