//! Record and payload DTOs for the products and users API.
//!
//! # Design
//! These types mirror the mock-server's schema but are defined independently.
//! Integration tests catch any schema drift between the two crates.
//!
//! Identifiers and `created_at` are server-assigned; the client never
//! invents them. `User` has no password field at all: the server never
//! returns one, and the only way to send one is through `NewUser` or
//! `UserUpdate`.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A persisted product as returned by the API.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Product {
    pub id: Uuid,
    pub name: String,
    pub description: String,
    pub price: f64,
    pub category: String,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default = "default_in_stock")]
    pub in_stock: bool,
    pub created_at: DateTime<Utc>,
}

fn default_in_stock() -> bool {
    true
}

/// Request payload for creating a product.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct NewProduct {
    pub name: String,
    pub description: String,
    pub price: f64,
    pub category: String,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default = "default_in_stock")]
    pub in_stock: bool,
}

/// Request payload for updating a product. Only the fields present in
/// the JSON are applied; omitted fields remain unchanged on the server.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct ProductUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub in_stock: Option<bool>,
}

/// A persisted user as returned by the API.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct User {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub created_at: DateTime<Utc>,
}

/// Request payload for creating a user.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct NewUser {
    pub name: String,
    pub email: String,
    pub password: String,
}

/// Request payload for updating a user.
///
/// `password: None` means "keep the current password" and is omitted from
/// the JSON body.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct UserUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn product_defaults_tags_and_stock() {
        let product: Product = serde_json::from_str(
            r#"{"id":"00000000-0000-0000-0000-000000000001","name":"Mug","description":"Ceramic","price":8.5,"category":"Kitchen","created_at":"2024-03-01T12:00:00Z"}"#,
        )
        .unwrap();
        assert!(product.tags.is_empty());
        assert!(product.in_stock);
    }

    #[test]
    fn user_ignores_password_in_response() {
        let user: User = serde_json::from_str(
            r#"{"id":"00000000-0000-0000-0000-000000000002","name":"Ada","email":"ada@example.com","password":"secret1","created_at":"2024-03-01T12:00:00Z"}"#,
        )
        .unwrap();
        let json = serde_json::to_value(&user).unwrap();
        assert!(json.get("password").is_none());
    }

    #[test]
    fn user_update_without_password_omits_field() {
        let update = UserUpdate {
            name: Some("Ada".to_string()),
            email: Some("ada@example.com".to_string()),
            password: None,
        };
        let json = serde_json::to_value(&update).unwrap();
        assert_eq!(json["name"], "Ada");
        assert!(json.get("password").is_none());
    }

    #[test]
    fn product_update_partial_fields() {
        let update = ProductUpdate {
            price: Some(3.25),
            ..Default::default()
        };
        let json = serde_json::to_value(&update).unwrap();
        assert_eq!(json, serde_json::json!({ "price": 3.25 }));
    }
}
