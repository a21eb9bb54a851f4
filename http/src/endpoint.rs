//! Backend endpoint table.

use http::Method;

/// A backend route: method plus path relative to the base origin.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoint {
    pub method: Method,
    pub path: String,
}

impl Endpoint {
    fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
        }
    }

    pub fn login() -> Self {
        Self::new(Method::POST, "/auth/login")
    }

    pub fn signup() -> Self {
        Self::new(Method::POST, "/auth/signup")
    }

    pub fn add_product() -> Self {
        Self::new(Method::POST, "/products")
    }

    pub fn fetch_product(id: &str) -> Self {
        Self::new(Method::GET, format!("/products/{id}"))
    }

    pub fn update_product(id: &str) -> Self {
        Self::new(Method::PATCH, format!("/products/{id}"))
    }

    pub fn fetch_orders() -> Self {
        Self::new(Method::GET, "/orders")
    }

    pub fn update_order(id: &str) -> Self {
        Self::new(Method::PATCH, format!("/orders/{id}"))
    }
}
