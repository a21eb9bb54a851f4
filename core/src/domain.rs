//! Storefront entities exchanged with the backend.
//!
//! Field names follow the backend's JSON (`_id`, camelCase).

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// The logged-in account. Owned by the authentication actions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(default)]
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub is_verified: bool,
    #[serde(default)]
    pub is_admin: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewAccount {
    pub name: String,
    pub email: String,
    pub password: String,
}

/// Brand or category reference as populated by the backend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Taxon {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(default)]
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    #[serde(rename = "_id")]
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub price: f64,
    #[serde(default)]
    pub discount_percentage: f64,
    #[serde(default)]
    pub stock_quantity: i64,
    pub brand: Taxon,
    pub category: Taxon,
    #[serde(default)]
    pub thumbnail: String,
    #[serde(default)]
    pub images: Vec<String>,
}

/// Product fields as submitted by the admin forms. `brand` and `category` are ids.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductInput {
    pub title: String,
    pub brand: String,
    pub category: String,
    pub description: String,
    pub price: f64,
    pub discount_percentage: f64,
    pub stock_quantity: i64,
    pub thumbnail: String,
    pub images: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductPatch {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(flatten)]
    pub fields: ProductInput,
}

/// Fulfilment state of an order, as labelled by the backend.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum OrderStatus {
    Pending,
    Dispatched,
    OutForDelivery,
    Delivered,
    Cancelled,
    Other(String),
}

impl OrderStatus {
    /// The statuses an admin may pick, in menu order.
    pub const EDIT_OPTIONS: [OrderStatus; 5] = [
        OrderStatus::Pending,
        OrderStatus::Dispatched,
        OrderStatus::OutForDelivery,
        OrderStatus::Delivered,
        OrderStatus::Cancelled,
    ];

    pub fn label(&self) -> &str {
        match self {
            OrderStatus::Pending => "Pending",
            OrderStatus::Dispatched => "Dispatched",
            OrderStatus::OutForDelivery => "Out for delivery",
            OrderStatus::Delivered => "Delivered",
            OrderStatus::Cancelled => "Cancelled",
            OrderStatus::Other(label) => label,
        }
    }

    /// Chip colours. Unknown statuses share the cancelled palette.
    pub fn palette(&self) -> StatusPalette {
        match self {
            OrderStatus::Pending => StatusPalette::new("#dfc9f7", "#7c59a4"),
            OrderStatus::Dispatched => StatusPalette::new("#feed80", "#927b1e"),
            OrderStatus::OutForDelivery => StatusPalette::new("#AACCFF", "#4793AA"),
            OrderStatus::Delivered => StatusPalette::new("#b3f5ca", "#548c6a"),
            OrderStatus::Cancelled | OrderStatus::Other(_) => {
                StatusPalette::new("#fac0c0", "#cc6d72")
            }
        }
    }
}

impl From<String> for OrderStatus {
    fn from(label: String) -> Self {
        match label.as_str() {
            "Pending" => OrderStatus::Pending,
            "Dispatched" => OrderStatus::Dispatched,
            "Out for delivery" => OrderStatus::OutForDelivery,
            "Delivered" => OrderStatus::Delivered,
            "Cancelled" => OrderStatus::Cancelled,
            _ => OrderStatus::Other(label),
        }
    }
}

impl From<OrderStatus> for String {
    fn from(status: OrderStatus) -> Self {
        status.label().to_string()
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Background / foreground colour pair for a status chip.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StatusPalette {
    pub background: &'static str,
    pub foreground: &'static str,
}

impl StatusPalette {
    const fn new(background: &'static str, foreground: &'static str) -> Self {
        Self {
            background,
            foreground,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderLine {
    pub product: Product,
    pub quantity: u32,
}

/// Shipping address snapshot stored on an order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Address {
    pub street: String,
    pub city: String,
    pub state: String,
    pub postal_code: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(rename = "item", default)]
    pub lines: Vec<OrderLine>,
    pub status: OrderStatus,
    #[serde(default)]
    pub total: f64,
    #[serde(default)]
    pub address: Vec<Address>,
    #[serde(default)]
    pub payment_mode: Option<String>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderStatusUpdate {
    #[serde(rename = "_id")]
    pub id: String,
    pub status: OrderStatus,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_order_status_labels_parse_from_backend_strings() {
        let order: Order = serde_json::from_value(json!({
            "_id": "o1",
            "item": [],
            "status": "Out for delivery",
            "total": 42.0
        }))
        .unwrap();
        assert_eq!(order.status, OrderStatus::OutForDelivery);
        assert!(order.address.is_empty());
        assert_eq!(
            serde_json::to_value(&order.status).unwrap(),
            json!("Out for delivery")
        );
    }

    #[test]
    fn test_order_carries_address_payment_and_date() {
        let order: Order = serde_json::from_value(json!({
            "_id": "o2",
            "item": [],
            "status": "Pending",
            "total": 10.0,
            "address": [{
                "street": "12 Elm St",
                "city": "Springfield",
                "state": "IL",
                "postalCode": "62701",
                "country": "US"
            }],
            "paymentMode": "COD",
            "createdAt": "2024-03-09T10:00:00.000Z"
        }))
        .unwrap();
        assert_eq!(order.address[0].postal_code, "62701");
        assert_eq!(order.payment_mode.as_deref(), Some("COD"));
        let placed = order.created_at.unwrap();
        assert_eq!(placed.format("%Y-%m-%d").to_string(), "2024-03-09");
    }

    #[test]
    fn test_unknown_status_uses_cancelled_palette() {
        let unknown = OrderStatus::from("Returned".to_string());
        assert_eq!(unknown.label(), "Returned");
        assert_eq!(unknown.palette(), OrderStatus::Cancelled.palette());
        assert_eq!(OrderStatus::Delivered.palette().background, "#b3f5ca");
    }

    #[test]
    fn test_user_flags_default_to_false() {
        let user: User = serde_json::from_value(json!({
            "_id": "u1",
            "email": "a@b.co"
        }))
        .unwrap();
        assert!(!user.is_verified);
        assert!(!user.is_admin);
    }
}
