//! Collection controller: the client's cached view of one resource.
//!
//! # Design
//! The controller is the only writer of its collection. Every mutation is
//! applied after the server confirms it and uses the record the server
//! returned, never the payload that was sent. A failed call leaves the
//! collection as it was and replaces the single current error.
//!
//! Operations return `Result`s so callers (the form controller, the CLI)
//! react to the outcome directly instead of through callbacks.

use std::fmt;

use log::{error, warn};
use thiserror::Error;
use uuid::Uuid;

use crate::client::ResourceClient;
use crate::error::ApiError;
use crate::resource::{Products, Resource, Users};
use crate::service::{ResourceService, Transport};

pub type ProductCollection<T> = CollectionController<Products, T>;
pub type UserCollection<T> = CollectionController<Users, T>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    Load,
    Create,
    Update,
    Delete,
}

impl Operation {
    fn verb(self) -> &'static str {
        match self {
            Operation::Load => "load",
            Operation::Create => "create",
            Operation::Update => "update",
            Operation::Delete => "delete",
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.verb())
    }
}

/// A failed collection operation.
///
/// `Display` is the user-facing message; the API cause is kept as the
/// error source for logs.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct CollectionError {
    operation: Operation,
    message: String,
    #[source]
    cause: ApiError,
}

impl CollectionError {
    fn new<R: Resource>(operation: Operation, cause: ApiError) -> Self {
        let noun = match operation {
            Operation::Load => R::PLURAL,
            _ => R::SINGULAR,
        };
        Self {
            operation,
            message: format!("Failed to {} {noun}", operation.verb()),
            cause,
        }
    }

    pub fn operation(&self) -> Operation {
        self.operation
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn cause(&self) -> &ApiError {
        &self.cause
    }

    /// Only load failures offer a retry; mutation failures leave the form
    /// open instead.
    pub fn is_retryable(&self) -> bool {
        self.operation == Operation::Load
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadStatus {
    NotLoaded,
    Loaded,
    Failed,
}

/// What a list view should show.
#[derive(Debug, PartialEq)]
pub enum ListView<'a, T> {
    NotLoaded,
    /// The load failed; the view offers a retry.
    LoadFailed(&'a str),
    /// Loaded successfully with no records. Not an error.
    Empty,
    Records(&'a [T]),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeleteOutcome {
    Deleted,
    /// The user declined; no request was sent.
    Declined,
}

/// Asks the user to confirm a destructive action.
pub trait Confirm {
    fn confirm(&mut self, prompt: &str) -> bool;
}

impl<F: FnMut(&str) -> bool> Confirm for F {
    fn confirm(&mut self, prompt: &str) -> bool {
        self(prompt)
    }
}

/// Owns the local collection for resource `R` and reconciles it with the
/// server through a [`ResourceService`].
#[derive(Debug)]
pub struct CollectionController<R: Resource, T> {
    service: ResourceService<R, T>,
    records: Vec<R::Record>,
    status: LoadStatus,
    error: Option<CollectionError>,
}

impl<R: Resource, T: Transport> CollectionController<R, T> {
    pub fn new(service: ResourceService<R, T>) -> Self {
        Self {
            service,
            records: Vec::new(),
            status: LoadStatus::NotLoaded,
            error: None,
        }
    }

    pub fn with_transport(client: ResourceClient<R>, transport: T) -> Self {
        Self::new(ResourceService::new(client, transport))
    }

    pub fn service(&self) -> &ResourceService<R, T> {
        &self.service
    }

    pub fn records(&self) -> &[R::Record] {
        &self.records
    }

    pub fn find(&self, id: Uuid) -> Option<&R::Record> {
        self.records.iter().find(|record| R::id(record) == id)
    }

    pub fn status(&self) -> LoadStatus {
        self.status
    }

    /// The current error, if any. There is never more than one.
    pub fn error(&self) -> Option<&CollectionError> {
        self.error.as_ref()
    }

    pub fn clear_error(&mut self) {
        self.error = None;
    }

    /// `LoadFailed` is shown only while the current error is the load
    /// failure itself. Once another error replaces it (or it is cleared)
    /// the view falls back to whatever records are held.
    pub fn view(&self) -> ListView<'_, R::Record> {
        match (self.status, &self.error) {
            (LoadStatus::NotLoaded, _) => ListView::NotLoaded,
            (LoadStatus::Failed, Some(err)) if err.is_retryable() => {
                ListView::LoadFailed(err.message())
            }
            _ if self.records.is_empty() => ListView::Empty,
            _ => ListView::Records(&self.records),
        }
    }

    /// The server accepted a call, so it is reachable and any stale error
    /// no longer applies.
    fn confirmed(&mut self) {
        self.status = LoadStatus::Loaded;
        self.error = None;
    }

    fn fail(&mut self, operation: Operation, cause: ApiError) -> CollectionError {
        let err = CollectionError::new::<R>(operation, cause);
        error!("{}: {}", err.message(), err.cause());
        self.error = Some(err.clone());
        err
    }

    /// Replace the collection with the server's list.
    ///
    /// On failure the collection keeps its previous contents.
    pub fn load(&mut self) -> Result<&[R::Record], CollectionError> {
        match self.service.list() {
            Ok(records) => {
                self.records = records;
                self.confirmed();
                Ok(&self.records)
            }
            Err(cause) => {
                self.status = LoadStatus::Failed;
                Err(self.fail(Operation::Load, cause))
            }
        }
    }

    /// Fetch a single record without touching the collection.
    pub fn fetch(&self, id: Uuid) -> Result<R::Record, ApiError> {
        self.service.get(id)
    }

    /// Create a record and append the server's copy.
    pub fn create(&mut self, input: &R::Create) -> Result<R::Record, CollectionError> {
        match self.service.create(input) {
            Ok(record) => {
                self.records.push(record.clone());
                self.confirmed();
                Ok(record)
            }
            Err(cause) => Err(self.fail(Operation::Create, cause)),
        }
    }

    /// Update a record and replace the entry with the same id in place.
    pub fn update(&mut self, id: Uuid, input: &R::Update) -> Result<R::Record, CollectionError> {
        match self.service.update(id, input) {
            Ok(record) => {
                match self.records.iter_mut().find(|existing| R::id(existing) == id) {
                    Some(slot) => *slot = record.clone(),
                    None => warn!("updated {} {id} is not in the local collection", R::SINGULAR),
                }
                self.confirmed();
                Ok(record)
            }
            Err(cause) => Err(self.fail(Operation::Update, cause)),
        }
    }

    /// Delete a record after the user confirms.
    pub fn delete(
        &mut self,
        id: Uuid,
        mut confirm: impl Confirm,
    ) -> Result<DeleteOutcome, CollectionError> {
        let prompt = format!("Are you sure you want to delete this {}?", R::SINGULAR);
        if !confirm.confirm(&prompt) {
            return Ok(DeleteOutcome::Declined);
        }
        match self.service.delete(id) {
            Ok(()) => {
                self.records.retain(|record| R::id(record) != id);
                self.confirmed();
                Ok(DeleteOutcome::Deleted)
            }
            Err(cause) => Err(self.fail(Operation::Delete, cause)),
        }
    }
}
