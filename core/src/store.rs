//! # Store: explicit, injected application state
//!
//! The store is a cheap-to-clone handle over one [`AppState`]. It is passed
//! to pages through [`AppContext`](crate::context::AppContext); there is no
//! ambient singleton.
//!
//! Write access is split by owner:
//! - status slices: only the dispatcher (`begin` / `settle`) and the reaction
//!   binder (`reset`) write them, both crate-private;
//! - session, products, orders: committed by actions on success;
//! - UI-local flags and the cart/wishlist counters: public setters.

use parking_lot::RwLock;
use std::sync::Arc;

use crate::action::ActionKind;
use crate::domain::{Order, Product, User};
use crate::error::ApiError;
use crate::selector::{self, StatusSnapshot};
use crate::status::{ActionSlice, RequestStatus, Ticket};

/// Entities returned by the backend plus small UI-local state.
#[derive(Debug, Clone, Default)]
pub struct Entities {
    pub(crate) session: Option<User>,
    pub(crate) selected_product: Option<Product>,
    pub(crate) products: Vec<Product>,
    pub(crate) orders: Vec<Order>,
    pub(crate) cart_count: usize,
    pub(crate) wishlist_count: usize,
    pub(crate) filters_open: bool,
}

impl Entities {
    pub fn session(&self) -> Option<&User> {
        self.session.as_ref()
    }

    pub fn selected_product(&self) -> Option<&Product> {
        self.selected_product.as_ref()
    }

    pub fn products(&self) -> &[Product] {
        &self.products
    }

    pub fn orders(&self) -> &[Order] {
        &self.orders
    }

    pub fn cart_count(&self) -> usize {
        self.cart_count
    }

    pub fn wishlist_count(&self) -> usize {
        self.wishlist_count
    }

    pub fn filters_open(&self) -> bool {
        self.filters_open
    }
}

/// One status slice per [`ActionKind`], indexed in O(1).
#[derive(Debug, Clone)]
pub struct Slices([ActionSlice; ActionKind::ALL.len()]);

impl Default for Slices {
    fn default() -> Self {
        Slices(ActionKind::ALL.map(ActionSlice::new))
    }
}

impl Slices {
    pub fn get(&self, action: ActionKind) -> &ActionSlice {
        &self.0[action.index()]
    }

    fn get_mut(&mut self, action: ActionKind) -> &mut ActionSlice {
        &mut self.0[action.index()]
    }
}

#[derive(Debug, Clone, Default)]
pub struct AppState {
    pub(crate) slices: Slices,
    pub(crate) entities: Entities,
}

impl AppState {
    pub fn slices(&self) -> &Slices {
        &self.slices
    }

    pub fn entities(&self) -> &Entities {
        &self.entities
    }
}

/// Shared handle to the application state.
#[derive(Clone, Default)]
pub struct Store {
    inner: Arc<RwLock<AppState>>,
}

impl Store {
    pub fn new() -> Self {
        Self::default()
    }

    /// Run `f` against a consistent snapshot of the state.
    pub fn read<R>(&self, f: impl FnOnce(&AppState) -> R) -> R {
        f(&self.inner.read())
    }

    /// Current `(status, error)` of `action`.
    pub fn status(&self, action: ActionKind) -> StatusSnapshot {
        self.read(|state| selector::select_status(state, action))
    }

    pub fn session(&self) -> Option<User> {
        self.read(|state| selector::select_session(state).cloned())
    }

    pub fn selected_product(&self) -> Option<Product> {
        self.read(|state| state.entities.selected_product.clone())
    }

    pub fn products(&self) -> Vec<Product> {
        self.read(|state| state.entities.products.clone())
    }

    pub fn orders(&self) -> Vec<Order> {
        self.read(|state| state.entities.orders.clone())
    }

    pub fn clear_selected_product(&self) {
        self.inner.write().entities.selected_product = None;
    }

    pub fn toggle_filters(&self) {
        let mut state = self.inner.write();
        state.entities.filters_open = !state.entities.filters_open;
    }

    /// Counters owned by the cart and wishlist features.
    pub fn set_basket_counts(&self, cart: usize, wishlist: usize) {
        let mut state = self.inner.write();
        state.entities.cart_count = cart;
        state.entities.wishlist_count = wishlist;
    }

    pub(crate) fn begin(&self, action: ActionKind) -> Ticket {
        self.inner.write().slices.get_mut(action).begin()
    }

    /// Write the terminal outcome and, on success, commit the entity under
    /// the same lock.
    pub(crate) fn settle<T>(
        &self,
        action: ActionKind,
        ticket: Ticket,
        result: Result<T, ApiError>,
        commit: impl FnOnce(&mut Entities, T),
    ) -> RequestStatus {
        let mut guard = self.inner.write();
        let AppState { slices, entities } = &mut *guard;
        let slice = slices.get_mut(action);
        match result {
            Ok(output) => {
                if slice.settle(ticket, Ok(())) {
                    commit(entities, output);
                }
            }
            Err(err) => {
                slice.settle(ticket, Err(err));
            }
        }
        slice.status()
    }

    pub(crate) fn reset(&self, action: ActionKind) {
        self.inner.write().slices.get_mut(action).reset();
    }

    /// Raw write access for sibling modules' tests.
    #[cfg(any(test, feature = "testing"))]
    pub fn with_entities(&self, f: impl FnOnce(&mut Entities)) {
        f(&mut self.inner.write().entities);
    }
}

impl std::fmt::Debug for Store {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let state = self.inner.read();
        f.debug_struct("Store")
            .field("logged_in", &state.entities.session.is_some())
            .field("orders", &state.entities.orders.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Taxon;

    fn product(id: &str) -> Product {
        Product {
            id: id.to_string(),
            title: "Lamp".to_string(),
            description: String::new(),
            price: 10.0,
            discount_percentage: 0.0,
            stock_quantity: 3,
            brand: Taxon {
                id: "b1".to_string(),
                name: "Acme".to_string(),
            },
            category: Taxon {
                id: "c1".to_string(),
                name: "Home".to_string(),
            },
            thumbnail: String::new(),
            images: Vec::new(),
        }
    }

    #[test]
    fn test_every_action_starts_idle() {
        let store = Store::new();
        for kind in ActionKind::ALL {
            let snapshot = store.status(kind);
            assert_eq!(snapshot.status, RequestStatus::Idle);
            assert!(snapshot.error.is_none());
        }
    }

    #[test]
    fn test_failed_settle_does_not_commit() {
        let store = Store::new();
        let ticket = store.begin(ActionKind::FetchProduct);
        let status = store.settle(
            ActionKind::FetchProduct,
            ticket,
            Err::<Product, _>(ApiError::new("not found")),
            |entities, p| entities.selected_product = Some(p),
        );
        assert_eq!(status, RequestStatus::Rejected);
        assert!(store.selected_product().is_none());
    }

    #[test]
    fn test_stale_settle_does_not_commit() {
        let store = Store::new();
        let ticket = store.begin(ActionKind::FetchProduct);
        store.reset(ActionKind::FetchProduct);
        let status = store.settle(ActionKind::FetchProduct, ticket, Ok(product("p1")), |e, p| {
            e.selected_product = Some(p)
        });
        assert_eq!(status, RequestStatus::Idle);
        assert!(store.selected_product().is_none());
    }

    #[test]
    fn test_ui_flags() {
        let store = Store::new();
        store.toggle_filters();
        store.set_basket_counts(2, 5);
        store.read(|state| {
            assert!(state.entities().filters_open());
            assert_eq!(state.entities().cart_count(), 2);
            assert_eq!(state.entities().wishlist_count(), 5);
        });
    }
}
