//! # Actions: named units of work
//!
//! An [`Action`] makes exactly one backend call and, on success, may commit
//! the returned entity into shared state. The [`Dispatcher`](crate::dispatch::Dispatcher)
//! owns the status bookkeeping around it.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::api::StorefrontApi;
use crate::domain::{
    Credentials, NewAccount, Order, OrderStatusUpdate, Product, ProductInput, ProductPatch, User,
};
use crate::error::ApiError;
use crate::store::Entities;

/// Identifies the status slice an action writes to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ActionKind {
    Login,
    Signup,
    AddProduct,
    FetchProduct,
    UpdateProduct,
    FetchOrders,
    UpdateOrder,
}

impl ActionKind {
    pub const ALL: [ActionKind; 7] = [
        ActionKind::Login,
        ActionKind::Signup,
        ActionKind::AddProduct,
        ActionKind::FetchProduct,
        ActionKind::UpdateProduct,
        ActionKind::FetchOrders,
        ActionKind::UpdateOrder,
    ];

    pub(crate) fn index(self) -> usize {
        self as usize
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ActionKind::Login => "login",
            ActionKind::Signup => "signup",
            ActionKind::AddProduct => "add-product",
            ActionKind::FetchProduct => "fetch-product",
            ActionKind::UpdateProduct => "update-product",
            ActionKind::FetchOrders => "fetch-orders",
            ActionKind::UpdateOrder => "update-order",
        }
    }
}

impl fmt::Display for ActionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The contract for a dispatchable action.
#[async_trait]
pub trait Action: Send + Sync + 'static {
    type Input: Send + Sync + 'static;
    type Output: Send + 'static;

    fn kind(&self) -> ActionKind;

    /// Issue the backend call.
    async fn call(
        &self,
        api: &dyn StorefrontApi,
        input: Self::Input,
    ) -> Result<Self::Output, ApiError>;

    /// Store the successful result. Runs under the same write as the
    /// `Fulfilled` status, so readers never see one without the other.
    fn commit(&self, _entities: &mut Entities, _output: Self::Output) {}
}

#[derive(Debug, Clone, Copy, Default)]
pub struct Login;

#[async_trait]
impl Action for Login {
    type Input = Credentials;
    type Output = User;

    fn kind(&self) -> ActionKind {
        ActionKind::Login
    }

    async fn call(&self, api: &dyn StorefrontApi, input: Credentials) -> Result<User, ApiError> {
        api.login(&input).await
    }

    fn commit(&self, entities: &mut Entities, user: User) {
        entities.session = Some(user);
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct Signup;

#[async_trait]
impl Action for Signup {
    type Input = NewAccount;
    type Output = User;

    fn kind(&self) -> ActionKind {
        ActionKind::Signup
    }

    async fn call(&self, api: &dyn StorefrontApi, input: NewAccount) -> Result<User, ApiError> {
        api.signup(&input).await
    }

    fn commit(&self, entities: &mut Entities, user: User) {
        entities.session = Some(user);
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct AddProduct;

#[async_trait]
impl Action for AddProduct {
    type Input = ProductInput;
    type Output = Product;

    fn kind(&self) -> ActionKind {
        ActionKind::AddProduct
    }

    async fn call(
        &self,
        api: &dyn StorefrontApi,
        input: ProductInput,
    ) -> Result<Product, ApiError> {
        api.add_product(&input).await
    }

    fn commit(&self, entities: &mut Entities, product: Product) {
        entities.products.push(product);
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct FetchProduct;

#[async_trait]
impl Action for FetchProduct {
    type Input = String;
    type Output = Product;

    fn kind(&self) -> ActionKind {
        ActionKind::FetchProduct
    }

    async fn call(&self, api: &dyn StorefrontApi, id: String) -> Result<Product, ApiError> {
        api.fetch_product(&id).await
    }

    fn commit(&self, entities: &mut Entities, product: Product) {
        entities.selected_product = Some(product);
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct UpdateProduct;

#[async_trait]
impl Action for UpdateProduct {
    type Input = ProductPatch;
    type Output = Product;

    fn kind(&self) -> ActionKind {
        ActionKind::UpdateProduct
    }

    async fn call(
        &self,
        api: &dyn StorefrontApi,
        input: ProductPatch,
    ) -> Result<Product, ApiError> {
        api.update_product(&input).await
    }

    fn commit(&self, entities: &mut Entities, product: Product) {
        if let Some(slot) = entities.products.iter_mut().find(|p| p.id == product.id) {
            *slot = product;
        }
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct FetchOrders;

#[async_trait]
impl Action for FetchOrders {
    type Input = ();
    type Output = Vec<Order>;

    fn kind(&self) -> ActionKind {
        ActionKind::FetchOrders
    }

    async fn call(&self, api: &dyn StorefrontApi, _input: ()) -> Result<Vec<Order>, ApiError> {
        api.fetch_orders().await
    }

    fn commit(&self, entities: &mut Entities, orders: Vec<Order>) {
        entities.orders = orders;
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct UpdateOrder;

#[async_trait]
impl Action for UpdateOrder {
    type Input = OrderStatusUpdate;
    type Output = Order;

    fn kind(&self) -> ActionKind {
        ActionKind::UpdateOrder
    }

    async fn call(
        &self,
        api: &dyn StorefrontApi,
        input: OrderStatusUpdate,
    ) -> Result<Order, ApiError> {
        api.update_order(&input).await
    }

    fn commit(&self, entities: &mut Entities, order: Order) {
        match entities.orders.iter_mut().find(|o| o.id == order.id) {
            Some(slot) => *slot = order,
            None => entities.orders.push(order),
        }
    }
}
