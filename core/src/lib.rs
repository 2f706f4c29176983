//! Client-side CRUD core for the products and users API.
//!
//! # Overview
//! Builds `HttpRequest` values and parses `HttpResponse` values without
//! touching the network (host-does-IO pattern). On top of that sit the
//! pieces a front end needs to keep a local list in step with the server:
//! draft validation, a form controller, and a collection controller.
//!
//! # Design
//! - `ResourceClient<R>` is stateless: base URL and default headers only.
//!   Each CRUD operation is split into `build_*` and `parse_*`.
//! - `Transport` is the single I/O seam; `ResourceService` pairs it with a
//!   client.
//! - `CollectionController` is the only writer of its collection and only
//!   applies records the server returned.
//! - `FormController` owns the draft and gates submission on validation.
//! - DTOs are defined independently from the mock-server crate; integration
//!   tests catch schema drift.

pub mod client;
pub mod collection;
pub mod draft;
pub mod error;
pub mod form;
pub mod http;
pub mod resource;
pub mod service;
pub mod types;
pub mod validate;

#[cfg(test)]
mod testing;

pub use client::{ProductClient, ResourceClient, UserClient};
pub use collection::{
    CollectionController, CollectionError, Confirm, DeleteOutcome, ListView, LoadStatus, Operation,
    ProductCollection, UserCollection,
};
pub use draft::{FormResource, ProductDraft, UserDraft};
pub use error::ApiError;
pub use form::{FormController, FormError, FormMode, FormState, ProductForm, Submission, UserForm};
pub use http::{HttpMethod, HttpRequest, HttpResponse};
pub use resource::{Products, Resource, Users};
pub use service::{ProductService, ResourceService, Transport, UserService};
pub use types::{NewProduct, NewUser, Product, ProductUpdate, User, UserUpdate};
pub use validate::FieldErrors;
