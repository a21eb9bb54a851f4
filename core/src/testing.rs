//! In-memory test doubles: a scripted backend and a recording shell.

use async_trait::async_trait;
use parking_lot::Mutex;
use std::collections::{HashMap, VecDeque};
use std::sync::Arc;

use crate::action::ActionKind;
use crate::api::StorefrontApi;
use crate::domain::{
    Credentials, NewAccount, Order, OrderStatusUpdate, Product, ProductInput, ProductPatch, Taxon,
    User,
};
use crate::error::ApiError;
use crate::shell::{Navigator, Notifier, Route, Shell, Toast};

#[derive(Default)]
struct Backend {
    failures: HashMap<ActionKind, VecDeque<ApiError>>,
    calls: HashMap<ActionKind, usize>,
    products: HashMap<String, Product>,
    orders: Vec<Order>,
    login_verified: bool,
    login_admin: bool,
    next_id: u64,
}

/// A backend whose answers are scripted by the test.
///
/// Calls succeed against an in-memory catalogue unless a failure was queued
/// with [`fail_next`](ScriptedApi::fail_next).
pub struct ScriptedApi {
    backend: Mutex<Backend>,
}

impl Default for ScriptedApi {
    fn default() -> Self {
        Self::new()
    }
}

impl ScriptedApi {
    pub fn new() -> Self {
        Self {
            backend: Mutex::new(Backend {
                login_verified: true,
                ..Backend::default()
            }),
        }
    }

    /// The next call of `action` fails with `message`.
    pub fn fail_next(&self, action: ActionKind, message: impl Into<String>) {
        self.backend
            .lock()
            .failures
            .entry(action)
            .or_default()
            .push_back(ApiError::new(message));
    }

    /// Flags carried by users returned from `login`.
    pub fn set_login_profile(&self, verified: bool, admin: bool) {
        let mut backend = self.backend.lock();
        backend.login_verified = verified;
        backend.login_admin = admin;
    }

    pub fn seed_product(&self, product: Product) {
        self.backend
            .lock()
            .products
            .insert(product.id.clone(), product);
    }

    pub fn seed_order(&self, id: &str, status: &str) {
        self.seed_full_order(Order {
            id: id.to_string(),
            lines: Vec::new(),
            status: status.to_string().into(),
            total: 0.0,
            address: Vec::new(),
            payment_mode: None,
            created_at: None,
        });
    }

    pub fn seed_full_order(&self, order: Order) {
        self.backend.lock().orders.push(order);
    }

    pub fn calls(&self, action: ActionKind) -> usize {
        self.backend.lock().calls.get(&action).copied().unwrap_or(0)
    }

    pub fn product(&self, id: &str) -> Option<Product> {
        self.backend.lock().products.get(id).cloned()
    }

    fn enter(&self, action: ActionKind) -> Result<(), ApiError> {
        let mut backend = self.backend.lock();
        *backend.calls.entry(action).or_default() += 1;
        match backend.failures.get_mut(&action).and_then(VecDeque::pop_front) {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }

    fn next_id(&self, prefix: &str) -> String {
        let mut backend = self.backend.lock();
        backend.next_id += 1;
        format!("{prefix}-{}", backend.next_id)
    }
}

fn product_from(id: String, input: &ProductInput) -> Product {
    Product {
        id,
        title: input.title.clone(),
        description: input.description.clone(),
        price: input.price,
        discount_percentage: input.discount_percentage,
        stock_quantity: input.stock_quantity,
        brand: Taxon {
            id: input.brand.clone(),
            name: String::new(),
        },
        category: Taxon {
            id: input.category.clone(),
            name: String::new(),
        },
        thumbnail: input.thumbnail.clone(),
        images: input.images.clone(),
    }
}

#[async_trait]
impl StorefrontApi for ScriptedApi {
    async fn login(&self, credentials: &Credentials) -> Result<User, ApiError> {
        self.enter(ActionKind::Login)?;
        let id = self.next_id("u");
        let backend = self.backend.lock();
        Ok(User {
            id,
            name: credentials
                .email
                .split('@')
                .next()
                .unwrap_or_default()
                .to_string(),
            email: credentials.email.clone(),
            is_verified: backend.login_verified,
            is_admin: backend.login_admin,
        })
    }

    async fn signup(&self, account: &NewAccount) -> Result<User, ApiError> {
        self.enter(ActionKind::Signup)?;
        Ok(User {
            id: self.next_id("u"),
            name: account.name.clone(),
            email: account.email.clone(),
            is_verified: false,
            is_admin: false,
        })
    }

    async fn add_product(&self, product: &ProductInput) -> Result<Product, ApiError> {
        self.enter(ActionKind::AddProduct)?;
        let created = product_from(self.next_id("p"), product);
        self.seed_product(created.clone());
        Ok(created)
    }

    async fn fetch_product(&self, id: &str) -> Result<Product, ApiError> {
        self.enter(ActionKind::FetchProduct)?;
        self.product(id)
            .ok_or_else(|| ApiError::new("Product not found"))
    }

    async fn update_product(&self, patch: &ProductPatch) -> Result<Product, ApiError> {
        self.enter(ActionKind::UpdateProduct)?;
        if self.product(&patch.id).is_none() {
            return Err(ApiError::new("Product not found"));
        }
        let updated = product_from(patch.id.clone(), &patch.fields);
        self.seed_product(updated.clone());
        Ok(updated)
    }

    async fn fetch_orders(&self) -> Result<Vec<Order>, ApiError> {
        self.enter(ActionKind::FetchOrders)?;
        Ok(self.backend.lock().orders.clone())
    }

    async fn update_order(&self, update: &OrderStatusUpdate) -> Result<Order, ApiError> {
        self.enter(ActionKind::UpdateOrder)?;
        let mut backend = self.backend.lock();
        let order = backend
            .orders
            .iter_mut()
            .find(|o| o.id == update.id)
            .ok_or_else(|| ApiError::new("Order not found"))?;
        order.status = update.status.clone();
        Ok(order.clone())
    }
}

/// Records every navigation and toast.
#[derive(Debug, Default)]
pub struct RecordingShell {
    routes: Mutex<Vec<Route>>,
    toasts: Mutex<Vec<Toast>>,
}

impl RecordingShell {
    pub fn shell(self: &Arc<Self>) -> Shell {
        Shell::from_shared(self.clone())
    }

    pub fn routes(&self) -> Vec<Route> {
        self.routes.lock().clone()
    }

    pub fn toasts(&self) -> Vec<Toast> {
        self.toasts.lock().clone()
    }
}

impl Navigator for RecordingShell {
    fn navigate(&self, route: &Route) {
        self.routes.lock().push(route.clone());
    }
}

impl Notifier for RecordingShell {
    fn notify(&self, toast: &Toast) {
        self.toasts.lock().push(toast.clone());
    }
}
