//! The storefront backend as seen by the client.
//!
//! Implemented over HTTP by `happyshop-http` and in memory by
//! [`ScriptedApi`](crate::testing::ScriptedApi) for tests.

use async_trait::async_trait;

use crate::domain::{
    Credentials, NewAccount, Order, OrderStatusUpdate, Product, ProductInput, ProductPatch, User,
};
use crate::error::ApiError;

/// One method per backend endpoint. Each call is a single request.
#[async_trait]
pub trait StorefrontApi: Send + Sync + 'static {
    async fn login(&self, credentials: &Credentials) -> Result<User, ApiError>;

    async fn signup(&self, account: &NewAccount) -> Result<User, ApiError>;

    async fn add_product(&self, product: &ProductInput) -> Result<Product, ApiError>;

    async fn fetch_product(&self, id: &str) -> Result<Product, ApiError>;

    async fn update_product(&self, patch: &ProductPatch) -> Result<Product, ApiError>;

    async fn fetch_orders(&self) -> Result<Vec<Order>, ApiError>;

    async fn update_order(&self, update: &OrderStatusUpdate) -> Result<Order, ApiError>;
}
