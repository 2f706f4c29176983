//! Resource services: CRUD verbs bound to a transport.
//!
//! # Design
//! The core never performs I/O. A [`Transport`] supplied by the host
//! executes each `HttpRequest`; [`ResourceService`] pairs it with a
//! [`ResourceClient`] so callers get plain `list`/`get`/`create`/`update`/
//! `delete` calls. No retries, no caching.

use log::debug;
use uuid::Uuid;

use crate::client::ResourceClient;
use crate::error::ApiError;
use crate::http::{HttpRequest, HttpResponse};
use crate::resource::{Products, Resource, Users};

/// Executes one HTTP round-trip on behalf of the core.
///
/// Implementations must return non-2xx responses as `Ok(HttpResponse)` so
/// the client can interpret the status; `Err` is reserved for requests that
/// never produced a response.
pub trait Transport {
    fn execute(&self, request: HttpRequest) -> Result<HttpResponse, ApiError>;
}

impl<T: Transport + ?Sized> Transport for &T {
    fn execute(&self, request: HttpRequest) -> Result<HttpResponse, ApiError> {
        (**self).execute(request)
    }
}

pub type ProductService<T> = ResourceService<Products, T>;
pub type UserService<T> = ResourceService<Users, T>;

/// CRUD operations for one resource over a transport.
#[derive(Debug, Clone)]
pub struct ResourceService<R, T> {
    client: ResourceClient<R>,
    transport: T,
}

impl<R: Resource, T: Transport> ResourceService<R, T> {
    pub fn new(client: ResourceClient<R>, transport: T) -> Self {
        Self { client, transport }
    }

    pub fn client(&self) -> &ResourceClient<R> {
        &self.client
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    fn send(&self, request: HttpRequest) -> Result<HttpResponse, ApiError> {
        debug!("{} {}", request.method, request.path);
        let response = self.transport.execute(request)?;
        debug!("-> {}", response.status);
        Ok(response)
    }

    pub fn list(&self) -> Result<Vec<R::Record>, ApiError> {
        let response = self.send(self.client.build_list())?;
        self.client.parse_list(response)
    }

    pub fn get(&self, id: Uuid) -> Result<R::Record, ApiError> {
        let response = self.send(self.client.build_get(id))?;
        self.client.parse_get(response)
    }

    pub fn create(&self, input: &R::Create) -> Result<R::Record, ApiError> {
        let response = self.send(self.client.build_create(input)?)?;
        self.client.parse_create(response)
    }

    pub fn update(&self, id: Uuid, input: &R::Update) -> Result<R::Record, ApiError> {
        let response = self.send(self.client.build_update(id, input)?)?;
        self.client.parse_update(response)
    }

    pub fn delete(&self, id: Uuid) -> Result<(), ApiError> {
        let response = self.send(self.client.build_delete(id))?;
        self.client.parse_delete(response)
    }
}
