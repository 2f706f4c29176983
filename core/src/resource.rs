//! Resource descriptors.
//!
//! A [`Resource`] ties a path segment to its record and payload types so the
//! client, service and controllers can be written once and instantiated for
//! products and users.

use std::fmt::Debug;

use serde::de::DeserializeOwned;
use serde::Serialize;
use uuid::Uuid;

use crate::types::{NewProduct, NewUser, Product, ProductUpdate, User, UserUpdate};

/// One resource type exposed by the API.
pub trait Resource {
    /// Persisted record returned by the server.
    type Record: DeserializeOwned + Serialize + Clone + Debug;
    /// Body of `POST /{path}`.
    type Create: Serialize + Clone + Debug;
    /// Body of `PUT /{path}/{id}`.
    type Update: Serialize + Clone + Debug;

    /// Path segment under the base URL, e.g. `products`.
    const PATH: &'static str;
    /// Noun used in single-record messages, e.g. `product`.
    const SINGULAR: &'static str;
    /// Noun used in collection messages, e.g. `products`.
    const PLURAL: &'static str;

    fn id(record: &Self::Record) -> Uuid;
}

/// Marker for the `/products` resource.
#[derive(Debug, Clone, Copy, Default)]
pub struct Products;

impl Resource for Products {
    type Record = Product;
    type Create = NewProduct;
    type Update = ProductUpdate;

    const PATH: &'static str = "products";
    const SINGULAR: &'static str = "product";
    const PLURAL: &'static str = "products";

    fn id(record: &Product) -> Uuid {
        record.id
    }
}

/// Marker for the `/users` resource.
#[derive(Debug, Clone, Copy, Default)]
pub struct Users;

impl Resource for Users {
    type Record = User;
    type Create = NewUser;
    type Update = UserUpdate;

    const PATH: &'static str = "users";
    const SINGULAR: &'static str = "user";
    const PLURAL: &'static str = "users";

    fn id(record: &User) -> Uuid {
        record.id
    }
}
