//! Stateless HTTP request builder and response parser for one resource.
//!
//! # Design
//! `ResourceClient` holds only a `base_url` and the default headers from
//! configuration, and carries no mutable state between calls. Each CRUD
//! operation is split into a `build_*` method that produces an
//! `HttpRequest` and a `parse_*` method that consumes an `HttpResponse`.
//!
//! Any 2xx status counts as success. The reference backend answers creates
//! with 200 and deletes with 200 plus a message body, while other servers
//! answer 201 and 204; the client does not care which.

use std::marker::PhantomData;

use serde::de::DeserializeOwned;
use serde::Serialize;
use uuid::Uuid;

use crate::error::ApiError;
use crate::http::{HttpMethod, HttpRequest, HttpResponse};
use crate::resource::{Products, Resource, Users};

pub type ProductClient = ResourceClient<Products>;
pub type UserClient = ResourceClient<Users>;

/// Synchronous, stateless client for the `/{R::PATH}` endpoints.
#[derive(Debug)]
pub struct ResourceClient<R> {
    base_url: String,
    headers: Vec<(String, String)>,
    _resource: PhantomData<fn() -> R>,
}

impl<R> Clone for ResourceClient<R> {
    fn clone(&self) -> Self {
        Self {
            base_url: self.base_url.clone(),
            headers: self.headers.clone(),
            _resource: PhantomData,
        }
    }
}

impl<R: Resource> ResourceClient<R> {
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            headers: Vec::new(),
            _resource: PhantomData,
        }
    }

    /// Attach headers sent with every request (auth tokens, tracing ids).
    pub fn with_headers(mut self, headers: Vec<(String, String)>) -> Self {
        self.headers = headers;
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn collection_url(&self) -> String {
        format!("{}/{}", self.base_url, R::PATH)
    }

    fn record_url(&self, id: Uuid) -> String {
        format!("{}/{}/{id}", self.base_url, R::PATH)
    }

    fn request(&self, method: HttpMethod, path: String) -> HttpRequest {
        HttpRequest {
            method,
            path,
            headers: self.headers.clone(),
            body: None,
        }
    }

    fn json_request<B: Serialize>(
        &self,
        method: HttpMethod,
        path: String,
        input: &B,
    ) -> Result<HttpRequest, ApiError> {
        let body = serde_json::to_string(input).map_err(|e| ApiError::SerializationError(e.to_string()))?;
        let mut request = self.request(method, path);
        request
            .headers
            .push(("content-type".to_string(), "application/json".to_string()));
        request.body = Some(body);
        Ok(request)
    }

    pub fn build_list(&self) -> HttpRequest {
        self.request(HttpMethod::Get, self.collection_url())
    }

    pub fn build_get(&self, id: Uuid) -> HttpRequest {
        self.request(HttpMethod::Get, self.record_url(id))
    }

    pub fn build_create(&self, input: &R::Create) -> Result<HttpRequest, ApiError> {
        self.json_request(HttpMethod::Post, self.collection_url(), input)
    }

    pub fn build_update(&self, id: Uuid, input: &R::Update) -> Result<HttpRequest, ApiError> {
        self.json_request(HttpMethod::Put, self.record_url(id), input)
    }

    pub fn build_delete(&self, id: Uuid) -> HttpRequest {
        self.request(HttpMethod::Delete, self.record_url(id))
    }

    pub fn parse_list(&self, response: HttpResponse) -> Result<Vec<R::Record>, ApiError> {
        check_status(&response)?;
        parse_body(&response)
    }

    pub fn parse_get(&self, response: HttpResponse) -> Result<R::Record, ApiError> {
        check_status(&response)?;
        parse_body(&response)
    }

    pub fn parse_create(&self, response: HttpResponse) -> Result<R::Record, ApiError> {
        check_status(&response)?;
        parse_body(&response)
    }

    pub fn parse_update(&self, response: HttpResponse) -> Result<R::Record, ApiError> {
        check_status(&response)?;
        parse_body(&response)
    }

    pub fn parse_delete(&self, response: HttpResponse) -> Result<(), ApiError> {
        check_status(&response)
    }
}

fn parse_body<T: DeserializeOwned>(response: &HttpResponse) -> Result<T, ApiError> {
    serde_json::from_str(&response.body).map_err(|e| ApiError::DeserializationError(e.to_string()))
}

/// Map non-success status codes to the appropriate `ApiError` variant.
fn check_status(response: &HttpResponse) -> Result<(), ApiError> {
    if response.is_success() {
        return Ok(());
    }
    if response.status == 404 {
        return Err(ApiError::NotFound);
    }
    Err(ApiError::HttpError {
        status: response.status,
        body: response.body.clone(),
    })
}
