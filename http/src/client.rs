//! # HttpApi - reqwest-backed `StorefrontApi`
//!
//! One request per call. Non-success responses become
//! [`HttpApiError::Rejected`] carrying the backend's `message`, which the
//! core then records as the action's error payload.

use async_trait::async_trait;
use happyshop_core::domain::{
    Credentials, NewAccount, Order, OrderStatusUpdate, Product, ProductInput, ProductPatch, User,
};
use happyshop_core::{ApiError, ClientConfig, StorefrontApi};
use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::endpoint::Endpoint;
use crate::error::HttpApiError;

pub struct HttpApi {
    client: reqwest::Client,
    config: ClientConfig,
}

impl HttpApi {
    pub fn new(config: ClientConfig) -> Result<Self, HttpApiError> {
        let client = reqwest::Client::builder()
            .cookie_store(config.with_credentials)
            .timeout(config.timeout())
            .user_agent(config.user_agent.clone())
            .build()?;
        tracing::info!(base_url = %config.base_url, "HTTP client ready");
        Ok(Self { client, config })
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    async fn send<T, B>(&self, endpoint: Endpoint, body: Option<&B>) -> Result<T, HttpApiError>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        let url = self.config.endpoint(&endpoint.path);
        let mut request = self.client.request(endpoint.method.clone(), &url);
        if let Some(body) = body {
            request = request.json(body);
        }

        tracing::debug!(method = %endpoint.method, %url, "Sending request");
        let response = request.send().await?;
        let status = response.status();
        let bytes = response.bytes().await?;

        if !status.is_success() {
            let err = HttpApiError::rejected(status, &bytes);
            tracing::warn!(method = %endpoint.method, %url, %status, error = %err, "Request rejected");
            return Err(err);
        }
        Ok(serde_json::from_slice(&bytes)?)
    }

    async fn get<T: DeserializeOwned>(&self, endpoint: Endpoint) -> Result<T, ApiError> {
        Ok(self.send::<T, ()>(endpoint, None).await?)
    }

    async fn with_body<T, B>(&self, endpoint: Endpoint, body: &B) -> Result<T, ApiError>
    where
        T: DeserializeOwned,
        B: Serialize + Sync + ?Sized,
    {
        Ok(self.send(endpoint, Some(body)).await?)
    }
}

#[async_trait]
impl StorefrontApi for HttpApi {
    async fn login(&self, credentials: &Credentials) -> Result<User, ApiError> {
        self.with_body(Endpoint::login(), credentials).await
    }

    async fn signup(&self, account: &NewAccount) -> Result<User, ApiError> {
        self.with_body(Endpoint::signup(), account).await
    }

    async fn add_product(&self, product: &ProductInput) -> Result<Product, ApiError> {
        self.with_body(Endpoint::add_product(), product).await
    }

    async fn fetch_product(&self, id: &str) -> Result<Product, ApiError> {
        self.get(Endpoint::fetch_product(id)).await
    }

    async fn update_product(&self, patch: &ProductPatch) -> Result<Product, ApiError> {
        self.with_body(Endpoint::update_product(&patch.id), patch)
            .await
    }

    async fn fetch_orders(&self) -> Result<Vec<Order>, ApiError> {
        self.get(Endpoint::fetch_orders()).await
    }

    async fn update_order(&self, update: &OrderStatusUpdate) -> Result<Order, ApiError> {
        self.with_body(Endpoint::update_order(&update.id), update)
            .await
    }
}
